//! SlotSet - ordered, duplicate-free collection of slots.

use std::fmt;

use super::Slot;

/// The open slots of one availability record.
///
/// # Invariants
///
/// - No slot appears twice
/// - Iteration order is always ascending lexical order
///
/// Both invariants hold after every operation, including construction from
/// arbitrary input: [`SlotSet::from_slots`] canonicalizes by sorting and
/// dropping duplicates, so records read back from storage are repaired
/// rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlotSet {
    slots: Vec<Slot>,
}

impl SlotSet {
    /// Creates an empty slot set.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Creates a slot set from arbitrary slots, sorting and deduplicating.
    pub fn from_slots(slots: Vec<Slot>) -> Self {
        let mut slots = slots;
        slots.sort();
        slots.dedup();
        Self { slots }
    }

    /// Returns true if the slot is present.
    pub fn contains(&self, slot: &Slot) -> bool {
        self.slots.binary_search(slot).is_ok()
    }

    /// Removes a slot, returning true if it was present.
    pub fn remove(&mut self, slot: &Slot) -> bool {
        match self.slots.binary_search(slot) {
            Ok(index) => {
                self.slots.remove(index);
                true
            }
            Err(_) => false,
        }
    }

    /// Inserts a slot in order, returning true if it was newly added.
    ///
    /// Inserting an already-present slot is a no-op, so a retried release
    /// cannot produce duplicates.
    pub fn insert(&mut self, slot: Slot) -> bool {
        match self.slots.binary_search(&slot) {
            Ok(_) => false,
            Err(index) => {
                self.slots.insert(index, slot);
                true
            }
        }
    }

    /// Returns the number of open slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no slots are open.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the slots in ascending order.
    pub fn as_slice(&self) -> &[Slot] {
        &self.slots
    }

    /// Iterates the slots in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    /// Returns the slot labels in ascending order, for serialization.
    pub fn to_labels(&self) -> Vec<String> {
        self.slots.iter().map(|s| s.as_str().to_string()).collect()
    }
}

impl fmt::Display for SlotSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.to_labels().join(", "))
    }
}

impl FromIterator<Slot> for SlotSet {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        Self::from_slots(iter.into_iter().collect())
    }
}
