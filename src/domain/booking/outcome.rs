//! Outcome of a booking mutation.
//!
//! Cancellation and rejection are two different representations of "this
//! booking will not happen": cancellation hard-deletes the booking and its
//! items and releases the slot, while rejection (and every other transition)
//! only flips the status flag. The tagged outcome keeps the two shapes
//! explicit instead of conflating them.

use chrono::NaiveDate;

use crate::domain::booking::BookingStatus;
use crate::domain::foundation::BookingId;
use crate::domain::scheduling::Slot;

/// Result of a booking cancellation or status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// The booking and its items were deleted and the slot released.
    Cancelled {
        booking_id: BookingId,
        event_date: NaiveDate,
        released_slot: Slot,
    },

    /// The booking row survived with a new status.
    Transitioned {
        booking_id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
    },
}

impl BookingOutcome {
    /// Returns the affected booking's ID.
    pub fn booking_id(&self) -> &BookingId {
        match self {
            Self::Cancelled { booking_id, .. } => booking_id,
            Self::Transitioned { booking_id, .. } => booking_id,
        }
    }

    /// True when the booking rows were removed rather than re-flagged.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}
