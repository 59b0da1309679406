//! HTTP routes for booking endpoints.
//!
//! Mounted by the application under `/api/bookings`.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use super::handlers::{
    cancel_booking, confirm_booking, create_booking, get_booking, list_bookings,
    set_booking_status, BookingHandlers,
};

/// Creates the booking router with all endpoints.
pub fn booking_routes(handlers: BookingHandlers) -> Router {
    Router::new()
        .route("/", post(create_booking))
        .route("/", get(list_bookings))
        .route("/:id", get(get_booking))
        .route("/:id", delete(cancel_booking))
        .route("/:id/status", patch(set_booking_status))
        .route("/:id/confirm", post(confirm_booking))
        .with_state(handlers)
}
