//! SlotLedger port - Interface for per-(vendor, date) availability state.
//!
//! The ledger is the single authority on which slots are open. Bookings
//! claim slots out of it and cancellations release them back.
//!
//! # Design
//!
//! - **Claim = removal**: a claimed slot disappears from the open set
//! - **Release = ordered re-insert**: idempotent, keeps ascending order
//! - **Absent record reads as closed**: no row means nothing bookable

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::VendorId;
use crate::domain::scheduling::{Slot, SlotSet};

/// Read view of one (vendor, date) availability record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityView {
    /// Overall on/off flag for the date.
    pub is_available: bool,
    /// Open slots in ascending order.
    pub slots: SlotSet,
}

impl AvailabilityView {
    /// The view returned when no record exists: closed, nothing bookable.
    pub fn closed() -> Self {
        Self {
            is_available: false,
            slots: SlotSet::new(),
        }
    }
}

/// Errors that can occur in slot ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotLedgerError {
    /// The slot is not open on that date (absent record, closed date, or
    /// already claimed).
    #[error("slot {slot} on {date} is not available")]
    SlotUnavailable { date: NaiveDate, slot: Slot },

    /// Persistence failure.
    #[error("database error: {0}")]
    Database(String),

    /// Transient storage failure; the caller may retry.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Port for reading and mutating slot availability.
///
/// Implementations must keep the slot set deduplicated and ascending in
/// its persisted form, and must make `claim_slot` safe against concurrent
/// claims of the same slot.
#[async_trait]
pub trait SlotLedger: Send + Sync {
    /// Check whether a slot is currently open.
    ///
    /// Returns `false` when the record is absent, the date is flagged
    /// unavailable, or the slot is not in the open set.
    async fn is_slot_free(
        &self,
        vendor_id: &VendorId,
        date: NaiveDate,
        slot: &Slot,
    ) -> Result<bool, SlotLedgerError>;

    /// Remove a slot from the open set.
    ///
    /// # Errors
    ///
    /// - `SlotUnavailable` if the record is absent, the date is closed, or
    ///   the slot is not in the set
    async fn claim_slot(
        &self,
        vendor_id: &VendorId,
        date: NaiveDate,
        slot: &Slot,
    ) -> Result<(), SlotLedgerError>;

    /// Re-insert a slot into the open set, preserving ascending order.
    ///
    /// Idempotent: releasing a slot that is already present, or releasing
    /// against an absent record, succeeds without effect. This tolerates
    /// retried cancellations.
    async fn release_slot(
        &self,
        vendor_id: &VendorId,
        date: NaiveDate,
        slot: &Slot,
    ) -> Result<(), SlotLedgerError>;

    /// Read the availability view for a date.
    ///
    /// Returns [`AvailabilityView::closed`] when no record exists.
    async fn get_availability(
        &self,
        vendor_id: &VendorId,
        date: NaiveDate,
    ) -> Result<AvailabilityView, SlotLedgerError>;

    /// Upsert the full schedule for a date, replacing the open set.
    ///
    /// Returns the stored view.
    async fn set_schedule(
        &self,
        vendor_id: &VendorId,
        date: NaiveDate,
        slots: SlotSet,
        is_available: bool,
    ) -> Result<AvailabilityView, SlotLedgerError>;
}

impl From<SlotLedgerError> for crate::domain::booking::BookingError {
    fn from(err: SlotLedgerError) -> Self {
        use crate::domain::booking::BookingError;
        match err {
            SlotLedgerError::SlotUnavailable { date, slot } => {
                BookingError::SlotUnavailable { date, slot }
            }
            SlotLedgerError::Database(msg) => BookingError::Infrastructure(msg),
            SlotLedgerError::Unavailable(msg) => BookingError::Unavailable(msg),
        }
    }
}
