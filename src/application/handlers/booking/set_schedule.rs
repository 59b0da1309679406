//! SetScheduleHandler - Command handler for vendor schedule edits.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::booking::BookingError;
use crate::domain::foundation::VendorId;
use crate::domain::scheduling::{Slot, SlotSet};
use crate::ports::{AvailabilityView, SlotLedger};

/// Command to replace a vendor's schedule for one date.
#[derive(Debug, Clone)]
pub struct SetScheduleCommand {
    pub vendor_id: VendorId,
    pub date: NaiveDate,
    pub slots: Vec<String>,
    pub is_available: bool,
}

/// Handler for schedule upserts.
pub struct SetScheduleHandler {
    slot_ledger: Arc<dyn SlotLedger>,
}

impl SetScheduleHandler {
    pub fn new(slot_ledger: Arc<dyn SlotLedger>) -> Self {
        Self { slot_ledger }
    }

    pub async fn handle(&self, cmd: SetScheduleCommand) -> Result<AvailabilityView, BookingError> {
        // 1. Validate every label; normalization (dedupe + sort) happens in
        //    the set constructor
        let mut slots = Vec::with_capacity(cmd.slots.len());
        for label in cmd.slots {
            slots.push(Slot::new(label)?);
        }
        let slots = SlotSet::from_slots(slots);

        // 2. Replace the record
        let view = self
            .slot_ledger
            .set_schedule(&cmd.vendor_id, cmd.date, slots, cmd.is_available)
            .await?;
        Ok(view)
    }
}
