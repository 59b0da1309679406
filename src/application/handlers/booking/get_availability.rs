//! GetAvailabilityHandler - Query handler for one (vendor, date) view.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::booking::BookingError;
use crate::domain::foundation::VendorId;
use crate::ports::{AvailabilityView, SlotLedger};

/// Query for a vendor's open slots on one date.
#[derive(Debug, Clone)]
pub struct GetAvailabilityQuery {
    pub vendor_id: VendorId,
    pub date: NaiveDate,
}

/// Handler for availability reads.
pub struct GetAvailabilityHandler {
    slot_ledger: Arc<dyn SlotLedger>,
}

impl GetAvailabilityHandler {
    pub fn new(slot_ledger: Arc<dyn SlotLedger>) -> Self {
        Self { slot_ledger }
    }

    /// Returns the closed view when no record exists for the date.
    pub async fn handle(
        &self,
        query: GetAvailabilityQuery,
    ) -> Result<AvailabilityView, BookingError> {
        let view = self
            .slot_ledger
            .get_availability(&query.vendor_id, query.date)
            .await?;
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scheduling::{Slot, SlotSet};
    use crate::ports::SlotLedgerError;
    use async_trait::async_trait;

    struct MockSlotLedger {
        view: AvailabilityView,
    }

    #[async_trait]
    impl SlotLedger for MockSlotLedger {
        async fn is_slot_free(
            &self,
            _vendor_id: &VendorId,
            _date: NaiveDate,
            _slot: &Slot,
        ) -> Result<bool, SlotLedgerError> {
            Ok(false)
        }

        async fn claim_slot(
            &self,
            _vendor_id: &VendorId,
            _date: NaiveDate,
            _slot: &Slot,
        ) -> Result<(), SlotLedgerError> {
            Ok(())
        }

        async fn release_slot(
            &self,
            _vendor_id: &VendorId,
            _date: NaiveDate,
            _slot: &Slot,
        ) -> Result<(), SlotLedgerError> {
            Ok(())
        }

        async fn get_availability(
            &self,
            _vendor_id: &VendorId,
            _date: NaiveDate,
        ) -> Result<AvailabilityView, SlotLedgerError> {
            Ok(self.view.clone())
        }

        async fn set_schedule(
            &self,
            _vendor_id: &VendorId,
            _date: NaiveDate,
            slots: SlotSet,
            is_available: bool,
        ) -> Result<AvailabilityView, SlotLedgerError> {
            Ok(AvailabilityView {
                is_available,
                slots,
            })
        }
    }

    #[tokio::test]
    async fn returns_ledger_view() {
        let slots = SlotSet::from_slots(vec![
            Slot::new("10:00").unwrap(),
            Slot::new("14:00").unwrap(),
        ]);
        let ledger = Arc::new(MockSlotLedger {
            view: AvailabilityView {
                is_available: true,
                slots: slots.clone(),
            },
        });
        let handler = GetAvailabilityHandler::new(ledger);

        let view = handler
            .handle(GetAvailabilityQuery {
                vendor_id: VendorId::new(),
                date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            })
            .await
            .unwrap();
        assert!(view.is_available);
        assert_eq!(view.slots, slots);
    }

    #[tokio::test]
    async fn missing_record_reads_as_closed() {
        let ledger = Arc::new(MockSlotLedger {
            view: AvailabilityView::closed(),
        });
        let handler = GetAvailabilityHandler::new(ledger);

        let view = handler
            .handle(GetAvailabilityQuery {
                vendor_id: VendorId::new(),
                date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            })
            .await
            .unwrap();
        assert!(!view.is_available);
        assert!(view.slots.is_empty());
    }
}
