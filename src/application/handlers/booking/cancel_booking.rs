//! CancelBookingHandler - Command handler for user-side cancellation.
//!
//! Cancellation is a hard delete: the booking and its items are removed
//! and the slot goes back into the availability record. Vendor-side
//! rejection keeps the row and flips the status instead.

use std::sync::Arc;

use crate::domain::booking::{BookingError, BookingOutcome};
use crate::domain::foundation::{BookingId, UserId};
use crate::ports::BookingStore;

/// Command to cancel (hard delete) a booking.
#[derive(Debug, Clone)]
pub struct CancelBookingCommand {
    pub booking_id: BookingId,
    pub requester: UserId,
}

/// Handler for booking cancellation.
pub struct CancelBookingHandler {
    booking_store: Arc<dyn BookingStore>,
}

impl CancelBookingHandler {
    pub fn new(booking_store: Arc<dyn BookingStore>) -> Self {
        Self { booking_store }
    }

    pub async fn handle(&self, cmd: CancelBookingCommand) -> Result<BookingOutcome, BookingError> {
        // 1. Load; a booking owned by someone else reads as absent
        let booking = self
            .booking_store
            .find_by_id(&cmd.booking_id)
            .await?
            .ok_or(BookingError::NotFound(cmd.booking_id))?;
        if !booking.is_user_owner(&cmd.requester) {
            return Err(BookingError::not_found(cmd.booking_id));
        }

        // 2. Terminal bookings cannot be cancelled
        booking.ensure_cancellable()?;

        // 3. Delete items + booking and release the slot, atomically
        self.booking_store.delete(&booking).await?;

        Ok(BookingOutcome::Cancelled {
            booking_id: *booking.id(),
            event_date: booking.event_date(),
            released_slot: booking.slot().clone(),
        })
    }
}
