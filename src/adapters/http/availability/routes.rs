//! HTTP routes for vendor availability endpoints.
//!
//! Mounted by the application under `/api/vendors`.

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{get_availability, set_schedule, AvailabilityHandlers};

/// Creates the availability router.
pub fn availability_routes(handlers: AvailabilityHandlers) -> Router {
    Router::new()
        .route("/:id/availability", get(get_availability))
        .route("/:id/availability", put(set_schedule))
        .with_state(handlers)
}
