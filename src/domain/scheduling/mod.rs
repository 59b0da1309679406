//! Scheduling module - per-vendor slot availability.
//!
//! The slot ledger's domain types: slot labels, the ordered unique slot
//! set, and the per-(vendor, date) availability record that the booking
//! engine claims slots from.

mod availability;
mod slot;
mod slot_set;

pub use availability::AvailabilityRecord;
pub use slot::Slot;
pub use slot_set::SlotSet;
