//! BookingStore port (write side).
//!
//! Defines the contract for persisting Booking aggregates together with
//! their slot claims. The two mutating bulk operations are transactional
//! by contract:
//!
//! - `create` inserts the booking and its items and claims the slot as one
//!   atomic unit; a concurrent claim of the same slot must fail cleanly.
//! - `delete` removes the items and the booking and releases the slot as
//!   one atomic unit.
//!
//! Partial state (booking without claim, claim without booking) must never
//! be observable by a concurrent reader.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{BookingId, UserId, VendorId};
use crate::domain::scheduling::Slot;

/// Errors that can occur in booking persistence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingStoreError {
    /// The slot was not open at commit time (absent record, closed date,
    /// or claimed by a concurrent booking).
    #[error("slot {slot} on {date} is not available")]
    SlotUnavailable { date: NaiveDate, slot: Slot },

    /// No booking row with that ID.
    #[error("booking not found: {0}")]
    NotFound(BookingId),

    /// Persistence failure.
    #[error("database error: {0}")]
    Database(String),

    /// Transient storage failure; the caller may retry.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Repository port for Booking aggregate persistence.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Insert a booking with its items and claim the slot, atomically.
    ///
    /// The availability row is re-checked under a row lock inside the
    /// transaction; the pre-flight `is_slot_free` read is advisory only.
    ///
    /// # Errors
    ///
    /// - `SlotUnavailable` if the slot is not open at commit time
    /// - `Database` on persistence failure (everything rolled back)
    async fn create(&self, booking: &Booking) -> Result<(), BookingStoreError>;

    /// Find a booking by its ID, including its items.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, BookingStoreError>;

    /// Delete a booking and its items and release its slot, atomically.
    ///
    /// The booking's items rows are removed first, then the booking row,
    /// then the slot is re-inserted into the availability record. Succeeds
    /// even when the availability record no longer exists (the release is
    /// then a no-op).
    async fn delete(&self, booking: &Booking) -> Result<(), BookingStoreError>;

    /// Update a booking's status flag.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no booking row with that ID exists
    async fn update_status(
        &self,
        id: &BookingId,
        status: BookingStatus,
    ) -> Result<(), BookingStoreError>;

    /// List a user's bookings, most recent first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Booking>, BookingStoreError>;

    /// List a vendor's bookings, most recent first.
    async fn list_for_vendor(
        &self,
        vendor_id: &VendorId,
    ) -> Result<Vec<Booking>, BookingStoreError>;
}

impl From<BookingStoreError> for crate::domain::booking::BookingError {
    fn from(err: BookingStoreError) -> Self {
        use crate::domain::booking::BookingError;
        match err {
            BookingStoreError::SlotUnavailable { date, slot } => {
                BookingError::SlotUnavailable { date, slot }
            }
            BookingStoreError::NotFound(id) => BookingError::NotFound(id),
            BookingStoreError::Database(msg) => BookingError::Infrastructure(msg),
            BookingStoreError::Unavailable(msg) => BookingError::Unavailable(msg),
        }
    }
}
