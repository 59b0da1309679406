//! Availability record aggregate.
//!
//! One record per (vendor, calendar date), created lazily when a vendor
//! first publishes a schedule for that date. The record is the single
//! authority on which slots are open: the booking engine claims and
//! releases slots through it, and reads go through it unchanged.

use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, VendorId};

use super::{Slot, SlotSet};

/// The per-(vendor, date) set of open slots plus an overall on/off flag.
///
/// # Invariants
///
/// - The slot set never contains duplicates and is always in ascending order
/// - A claimed slot is absent from the set until released
/// - When `is_available` is false the whole date is closed regardless of
///   slot membership
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRecord {
    /// Vendor this record belongs to.
    vendor_id: VendorId,

    /// Calendar date the slots apply to.
    date: NaiveDate,

    /// Open slots, ascending and unique.
    slots: SlotSet,

    /// Whether the date as a whole is open for booking.
    is_available: bool,

    /// When the record was last written.
    updated_at: Timestamp,
}

impl AvailabilityRecord {
    /// Creates a record with the given schedule.
    pub fn new(vendor_id: VendorId, date: NaiveDate, slots: SlotSet, is_available: bool) -> Self {
        Self {
            vendor_id,
            date,
            slots,
            is_available,
            updated_at: Timestamp::now(),
        }
    }

    /// Reconstitutes a record from persistence.
    pub fn reconstitute(
        vendor_id: VendorId,
        date: NaiveDate,
        slots: SlotSet,
        is_available: bool,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            vendor_id,
            date,
            slots,
            is_available,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the vendor this record belongs to.
    pub fn vendor_id(&self) -> &VendorId {
        &self.vendor_id
    }

    /// Returns the calendar date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the open slots.
    pub fn slots(&self) -> &SlotSet {
        &self.slots
    }

    /// Returns whether the date is open for booking at all.
    pub fn is_available(&self) -> bool {
        self.is_available
    }

    /// Returns when the record was last written.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries and mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns true if the slot can currently be claimed.
    pub fn is_slot_free(&self, slot: &Slot) -> bool {
        self.is_available && self.slots.contains(slot)
    }

    /// Claims a slot, removing it from the set.
    ///
    /// # Errors
    ///
    /// - `SlotUnavailable` if the date is closed or the slot is absent
    pub fn claim(&mut self, slot: &Slot) -> Result<(), DomainError> {
        if !self.is_available {
            return Err(DomainError::new(
                ErrorCode::SlotUnavailable,
                format!("Date {} is not open for booking", self.date),
            ));
        }
        if !self.slots.remove(slot) {
            return Err(DomainError::new(
                ErrorCode::SlotUnavailable,
                format!("Slot {} is not open on {}", slot, self.date),
            ));
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Releases a slot back into the set.
    ///
    /// Idempotent: re-releasing an already-open slot is a no-op, so retried
    /// cancellations are harmless. Returns true if the slot was re-added.
    pub fn release(&mut self, slot: Slot) -> bool {
        let added = self.slots.insert(slot);
        if added {
            self.updated_at = Timestamp::now();
        }
        added
    }

    /// Replaces the whole schedule for this date.
    pub fn set_schedule(&mut self, slots: SlotSet, is_available: bool) {
        self.slots = slots;
        self.is_available = is_available;
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(label: &str) -> Slot {
        Slot::new(label).unwrap()
    }

    fn test_record(labels: &[&str]) -> AvailabilityRecord {
        let slots = SlotSet::from_slots(labels.iter().map(|l| slot(l)).collect());
        AvailabilityRecord::new(
            VendorId::new(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            slots,
            true,
        )
    }

    #[test]
    fn open_slot_is_free() {
        let record = test_record(&["10:00", "14:00"]);
        assert!(record.is_slot_free(&slot("14:00")));
    }

    #[test]
    fn absent_slot_is_not_free() {
        let record = test_record(&["10:00"]);
        assert!(!record.is_slot_free(&slot("14:00")));
    }

    #[test]
    fn closed_date_makes_all_slots_unfree() {
        let mut record = test_record(&["10:00", "14:00"]);
        record.set_schedule(record.slots().clone(), false);
        assert!(!record.is_slot_free(&slot("10:00")));
    }

    #[test]
    fn claim_removes_slot_from_set() {
        let mut record = test_record(&["10:00", "14:00"]);
        record.claim(&slot("14:00")).unwrap();
        assert_eq!(record.slots().to_labels(), vec!["10:00"]);
    }

    #[test]
    fn claim_fails_for_absent_slot() {
        let mut record = test_record(&["10:00"]);
        let err = record.claim(&slot("14:00")).unwrap_err();
        assert_eq!(err.code, ErrorCode::SlotUnavailable);
    }

    #[test]
    fn claim_fails_when_date_closed() {
        let mut record = test_record(&["10:00"]);
        record.set_schedule(record.slots().clone(), false);
        let err = record.claim(&slot("10:00")).unwrap_err();
        assert_eq!(err.code, ErrorCode::SlotUnavailable);
    }

    #[test]
    fn claim_twice_fails_second_time() {
        let mut record = test_record(&["14:00"]);
        record.claim(&slot("14:00")).unwrap();
        assert!(record.claim(&slot("14:00")).is_err());
    }

    #[test]
    fn release_restores_slot_in_order() {
        let mut record = test_record(&["10:00", "14:00", "18:00"]);
        record.claim(&slot("14:00")).unwrap();
        assert!(record.release(slot("14:00")));
        assert_eq!(record.slots().to_labels(), vec!["10:00", "14:00", "18:00"]);
    }

    #[test]
    fn release_is_idempotent() {
        let mut record = test_record(&["10:00", "14:00"]);
        assert!(!record.release(slot("14:00")));
        assert_eq!(record.slots().to_labels(), vec!["10:00", "14:00"]);
    }

    #[test]
    fn claim_then_release_round_trips() {
        let original = test_record(&["10:00", "14:00", "18:00"]);
        let mut record = original.clone();

        record.claim(&slot("10:00")).unwrap();
        record.release(slot("10:00"));

        assert_eq!(record.slots(), original.slots());
    }

    #[test]
    fn set_schedule_replaces_slots_and_flag() {
        let mut record = test_record(&["10:00"]);
        let new_slots = SlotSet::from_slots(vec![slot("09:00"), slot("17:00")]);
        record.set_schedule(new_slots, false);

        assert_eq!(record.slots().to_labels(), vec!["09:00", "17:00"]);
        assert!(!record.is_available());
    }
}
