//! Booking domain module.
//!
//! Covers the booking lifecycle: creation against an open slot, vendor
//! confirmation/rejection, completion, and cancellation. Cancellation is a
//! hard delete that releases the claimed slot; rejection and completion are
//! status-flag transitions. Both shapes surface as [`BookingOutcome`].

mod aggregate;
mod errors;
mod item;
mod outcome;
mod status;

pub use aggregate::{Booking, MAX_ADDRESS_LENGTH, MAX_INSTRUCTIONS_LENGTH};
pub use errors::BookingError;
pub use item::{BookingItem, MAX_ITEM_QUANTITY};
pub use outcome::BookingOutcome;
pub use status::BookingStatus;
