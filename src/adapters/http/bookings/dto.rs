//! HTTP DTOs for booking endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::booking::{Booking, BookingItem, BookingOutcome, BookingStatus};
use crate::domain::foundation::{MenuItemId, VendorId};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One requested menu line.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingItemRequest {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
}

/// Request to place a booking.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingRequest {
    pub vendor_id: VendorId,
    pub event_date: NaiveDate,
    pub slot: String,
    pub items: Vec<BookingItemRequest>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Request to move a booking to a new status.
///
/// The status arrives as a plain string so an unknown value renders as a
/// 400 rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct SetBookingStatusRequest {
    pub status: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One booking line as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct BookingItemResponse {
    pub id: String,
    pub menu_item_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl From<&BookingItem> for BookingItemResponse {
    fn from(item: &BookingItem) -> Self {
        Self {
            id: item.id().to_string(),
            menu_item_id: item.menu_item_id().to_string(),
            quantity: item.quantity(),
            unit_price: item.unit_price(),
            line_total: item.line_total(),
        }
    }
}

/// Full booking representation.
#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub user_id: String,
    pub vendor_id: String,
    pub event_date: NaiveDate,
    pub slot: String,
    pub status: BookingStatus,
    pub items: Vec<BookingItemResponse>,
    pub total_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Booking> for BookingResponse {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id().to_string(),
            user_id: booking.user_id().to_string(),
            vendor_id: booking.vendor_id().to_string(),
            event_date: booking.event_date(),
            slot: booking.slot().as_str().to_string(),
            status: booking.status(),
            items: booking.items().iter().map(BookingItemResponse::from).collect(),
            total_amount: booking.total_amount(),
            instructions: booking.instructions().map(String::from),
            address: booking.address().map(String::from),
            created_at: booking.created_at().to_rfc3339(),
            updated_at: booking.updated_at().to_rfc3339(),
        }
    }
}

/// Response for listing bookings.
#[derive(Debug, Clone, Serialize)]
pub struct BookingListResponse {
    pub bookings: Vec<BookingResponse>,
}

impl BookingListResponse {
    pub fn from_bookings(bookings: &[Booking]) -> Self {
        Self {
            bookings: bookings.iter().map(BookingResponse::from).collect(),
        }
    }
}

/// What a cancel or status change actually did.
///
/// Cancellation removes the rows outright, so there is no booking body to
/// return; the two cases stay distinguishable through the `outcome` tag.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BookingOutcomeResponse {
    Cancelled {
        booking_id: String,
        event_date: NaiveDate,
        released_slot: String,
    },
    Transitioned {
        booking_id: String,
        from: BookingStatus,
        to: BookingStatus,
    },
}

impl From<BookingOutcome> for BookingOutcomeResponse {
    fn from(outcome: BookingOutcome) -> Self {
        match outcome {
            BookingOutcome::Cancelled {
                booking_id,
                event_date,
                released_slot,
            } => Self::Cancelled {
                booking_id: booking_id.to_string(),
                event_date,
                released_slot: released_slot.as_str().to_string(),
            },
            BookingOutcome::Transitioned {
                booking_id,
                from,
                to,
            } => Self::Transitioned {
                booking_id: booking_id.to_string(),
                from,
                to,
            },
        }
    }
}
