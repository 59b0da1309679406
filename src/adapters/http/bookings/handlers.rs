//! HTTP handlers for booking endpoints.
//!
//! Thin translation layer: parse the request, invoke the application
//! handler, render the result. All policy lives below this file.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::adapters::http::error::{status_for, ErrorResponse};
use crate::adapters::http::middleware::{RequireParty, RequireUser, RequireVendor};
use crate::application::handlers::booking::{
    CancelBookingCommand, CancelBookingHandler, CreateBookingCommand, CreateBookingHandler,
    GetBookingHandler, GetBookingQuery, ItemSelection, ListBookingsHandler, ListBookingsQuery,
    SetBookingStatusCommand, SetBookingStatusHandler,
};
use crate::domain::booking::{BookingError, BookingStatus};
use crate::domain::foundation::{BookingId, Party};

use super::dto::{
    BookingListResponse, BookingOutcomeResponse, BookingResponse, CreateBookingRequest,
    SetBookingStatusRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Application handlers the booking routes dispatch to.
#[derive(Clone)]
pub struct BookingHandlers {
    pub create_booking: Arc<CreateBookingHandler>,
    pub cancel_booking: Arc<CancelBookingHandler>,
    pub set_booking_status: Arc<SetBookingStatusHandler>,
    pub get_booking: Arc<GetBookingHandler>,
    pub list_bookings: Arc<ListBookingsHandler>,
}

impl BookingHandlers {
    pub fn new(
        create_booking: Arc<CreateBookingHandler>,
        cancel_booking: Arc<CancelBookingHandler>,
        set_booking_status: Arc<SetBookingStatusHandler>,
        get_booking: Arc<GetBookingHandler>,
        list_bookings: Arc<ListBookingsHandler>,
    ) -> Self {
        Self {
            create_booking,
            cancel_booking,
            set_booking_status,
            get_booking,
            list_bookings,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/bookings
pub async fn create_booking(
    State(handlers): State<BookingHandlers>,
    RequireUser(user_id): RequireUser,
    Json(request): Json<CreateBookingRequest>,
) -> Response {
    let command = CreateBookingCommand {
        user_id,
        vendor_id: request.vendor_id,
        event_date: request.event_date,
        slot: request.slot,
        items: request
            .items
            .into_iter()
            .map(|item| ItemSelection {
                menu_item_id: item.menu_item_id,
                quantity: item.quantity,
            })
            .collect(),
        instructions: request.instructions,
        address: request.address,
    };

    match handlers.create_booking.handle(command).await {
        Ok(booking) => {
            (StatusCode::CREATED, Json(BookingResponse::from(&booking))).into_response()
        }
        Err(e) => handle_booking_error(e),
    }
}

/// GET /api/bookings
pub async fn list_bookings(
    State(handlers): State<BookingHandlers>,
    RequireParty(party): RequireParty,
) -> Response {
    let query = ListBookingsQuery { requester: party };

    match handlers.list_bookings.handle(query).await {
        Ok(bookings) => {
            (StatusCode::OK, Json(BookingListResponse::from_bookings(&bookings))).into_response()
        }
        Err(e) => handle_booking_error(e),
    }
}

/// GET /api/bookings/:id
pub async fn get_booking(
    State(handlers): State<BookingHandlers>,
    RequireParty(party): RequireParty,
    Path(booking_id): Path<String>,
) -> Response {
    let booking_id = match parse_booking_id(&booking_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = GetBookingQuery {
        booking_id,
        requester: party,
    };

    match handlers.get_booking.handle(query).await {
        Ok(booking) => (StatusCode::OK, Json(BookingResponse::from(&booking))).into_response(),
        Err(e) => handle_booking_error(e),
    }
}

/// PATCH /api/bookings/:id/status
pub async fn set_booking_status(
    State(handlers): State<BookingHandlers>,
    RequireParty(party): RequireParty,
    Path(booking_id): Path<String>,
    Json(request): Json<SetBookingStatusRequest>,
) -> Response {
    let booking_id = match parse_booking_id(&booking_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let Ok(new_status) = BookingStatus::from_str(&request.status) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Unknown booking status: {}",
                request.status
            ))),
        )
            .into_response();
    };

    let command = SetBookingStatusCommand {
        booking_id,
        requester: party,
        new_status,
    };

    match handlers.set_booking_status.handle(command).await {
        Ok(outcome) => {
            (StatusCode::OK, Json(BookingOutcomeResponse::from(outcome))).into_response()
        }
        Err(e) => handle_booking_error(e),
    }
}

/// POST /api/bookings/:id/confirm
///
/// Shorthand for the vendor accepting a pending booking.
pub async fn confirm_booking(
    State(handlers): State<BookingHandlers>,
    RequireVendor(vendor_id): RequireVendor,
    Path(booking_id): Path<String>,
) -> Response {
    let booking_id = match parse_booking_id(&booking_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let command = SetBookingStatusCommand {
        booking_id,
        requester: Party::Vendor(vendor_id),
        new_status: BookingStatus::Confirmed,
    };

    match handlers.set_booking_status.handle(command).await {
        Ok(outcome) => {
            (StatusCode::OK, Json(BookingOutcomeResponse::from(outcome))).into_response()
        }
        Err(e) => handle_booking_error(e),
    }
}

/// DELETE /api/bookings/:id
pub async fn cancel_booking(
    State(handlers): State<BookingHandlers>,
    RequireUser(user_id): RequireUser,
    Path(booking_id): Path<String>,
) -> Response {
    let booking_id = match parse_booking_id(&booking_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let command = CancelBookingCommand {
        booking_id,
        requester: user_id,
    };

    match handlers.cancel_booking.handle(command).await {
        Ok(outcome) => {
            (StatusCode::OK, Json(BookingOutcomeResponse::from(outcome))).into_response()
        }
        Err(e) => handle_booking_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_booking_id(raw: &str) -> Result<BookingId, Response> {
    BookingId::from_str(raw).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid booking ID")),
        )
            .into_response()
    })
}

fn handle_booking_error(error: BookingError) -> Response {
    let status = status_for(error.code());

    if status.is_server_error() {
        tracing::error!(code = %error.code(), "Booking request failed: {}", error.message());
    }

    (status, Json(ErrorResponse::new(error.code(), error.message()))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::domain::scheduling::Slot;

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_booking_error(BookingError::NotFound(BookingId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let response = handle_booking_error(BookingError::Forbidden);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn slot_unavailable_maps_to_400() {
        let response = handle_booking_error(BookingError::SlotUnavailable {
            date: NaiveDate::from_ymd_opt(2025, 7, 4).unwrap(),
            slot: Slot::new("14:00").unwrap(),
        });
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_state_maps_to_400() {
        let response =
            handle_booking_error(BookingError::InvalidState("completed is terminal".into()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unavailable_maps_to_503() {
        let response = handle_booking_error(BookingError::Unavailable("pool timeout".into()));
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn infrastructure_maps_to_500() {
        let response = handle_booking_error(BookingError::Infrastructure("boom".into()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn booking_id_parse_rejects_garbage() {
        assert!(parse_booking_id("not-a-uuid").is_err());
        assert!(parse_booking_id(&BookingId::new().to_string()).is_ok());
    }
}
