//! HTTP handlers for vendor availability endpoints.
//!
//! Reads are public so users can browse open slots before booking.
//! Writes require the vendor identity to match the vendor in the path.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::adapters::http::error::{status_for, ErrorResponse};
use crate::adapters::http::middleware::RequireVendor;
use crate::application::handlers::booking::{
    GetAvailabilityHandler, GetAvailabilityQuery, SetScheduleCommand, SetScheduleHandler,
};
use crate::domain::booking::BookingError;
use crate::domain::foundation::{ErrorCode, VendorId};

use super::dto::{AvailabilityQuery, AvailabilityResponse, SetScheduleRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Application handlers the availability routes dispatch to.
#[derive(Clone)]
pub struct AvailabilityHandlers {
    pub get_availability: Arc<GetAvailabilityHandler>,
    pub set_schedule: Arc<SetScheduleHandler>,
}

impl AvailabilityHandlers {
    pub fn new(
        get_availability: Arc<GetAvailabilityHandler>,
        set_schedule: Arc<SetScheduleHandler>,
    ) -> Self {
        Self {
            get_availability,
            set_schedule,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/vendors/:id/availability?date=YYYY-MM-DD
///
/// Public read. An unknown vendor or a date with no record renders as the
/// closed view rather than an error.
pub async fn get_availability(
    State(handlers): State<AvailabilityHandlers>,
    Path(vendor_id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Response {
    let vendor_id = match parse_vendor_id(&vendor_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let date = query.date;

    let query = GetAvailabilityQuery { vendor_id, date };

    match handlers.get_availability.handle(query).await {
        Ok(view) => (
            StatusCode::OK,
            Json(AvailabilityResponse::from_view(&vendor_id, date, &view)),
        )
            .into_response(),
        Err(e) => handle_availability_error(e),
    }
}

/// PUT /api/vendors/:id/availability
///
/// Only the vendor named in the path may edit its own schedule.
pub async fn set_schedule(
    State(handlers): State<AvailabilityHandlers>,
    RequireVendor(requester): RequireVendor,
    Path(vendor_id): Path<String>,
    Json(request): Json<SetScheduleRequest>,
) -> Response {
    let vendor_id = match parse_vendor_id(&vendor_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    if requester != vendor_id {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::new(
                ErrorCode::Forbidden,
                "Cannot edit another vendor's schedule",
            )),
        )
            .into_response();
    }
    let date = request.date;

    let command = SetScheduleCommand {
        vendor_id,
        date,
        slots: request.slots,
        is_available: request.is_available,
    };

    match handlers.set_schedule.handle(command).await {
        Ok(view) => (
            StatusCode::OK,
            Json(AvailabilityResponse::from_view(&vendor_id, date, &view)),
        )
            .into_response(),
        Err(e) => handle_availability_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_vendor_id(raw: &str) -> Result<VendorId, Response> {
    VendorId::from_str(raw).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid vendor ID")),
        )
            .into_response()
    })
}

fn handle_availability_error(error: BookingError) -> Response {
    let status = status_for(error.code());

    if status.is_server_error() {
        tracing::error!(code = %error.code(), "Availability request failed: {}", error.message());
    }

    (status, Json(ErrorResponse::new(error.code(), error.message()))).into_response()
}
