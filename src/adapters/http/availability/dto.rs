//! HTTP DTOs for vendor availability endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::VendorId;
use crate::ports::AvailabilityView;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Query parameters for reading availability.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
}

/// Request to replace a vendor's schedule for one date.
///
/// The full slot list is sent every time; there is no incremental edit.
#[derive(Debug, Clone, Deserialize)]
pub struct SetScheduleRequest {
    pub date: NaiveDate,
    pub slots: Vec<String>,
    pub is_available: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Open slots for one (vendor, date).
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub vendor_id: String,
    pub date: NaiveDate,
    pub is_available: bool,
    pub available_slots: Vec<String>,
}

impl AvailabilityResponse {
    pub fn from_view(vendor_id: &VendorId, date: NaiveDate, view: &AvailabilityView) -> Self {
        Self {
            vendor_id: vendor_id.to_string(),
            date,
            is_available: view.is_available,
            available_slots: view.slots.to_labels(),
        }
    }
}
