//! SetBookingStatusHandler - Command handler for status transitions.
//!
//! Covers vendor confirmation, rejection and completion, and cancellation
//! by either party. A `cancelled` target goes through the same hard delete
//! as user-side cancellation; every other target is a status-flag update.

use std::sync::Arc;

use crate::domain::booking::{BookingError, BookingOutcome, BookingStatus};
use crate::domain::foundation::{BookingId, Party};
use crate::ports::BookingStore;

/// Command to move a booking to a new status.
#[derive(Debug, Clone)]
pub struct SetBookingStatusCommand {
    pub booking_id: BookingId,
    pub requester: Party,
    pub new_status: BookingStatus,
}

/// Handler for booking status transitions.
pub struct SetBookingStatusHandler {
    booking_store: Arc<dyn BookingStore>,
}

impl SetBookingStatusHandler {
    pub fn new(booking_store: Arc<dyn BookingStore>) -> Self {
        Self { booking_store }
    }

    pub async fn handle(
        &self,
        cmd: SetBookingStatusCommand,
    ) -> Result<BookingOutcome, BookingError> {
        // 1. Load
        let mut booking = self
            .booking_store
            .find_by_id(&cmd.booking_id)
            .await?
            .ok_or(BookingError::NotFound(cmd.booking_id))?;

        // 2. Ownership, transition table, and which side may drive the target
        booking.authorize_transition(&cmd.requester, cmd.new_status)?;

        // 3. A cancelled target hard-deletes; everything else is a flag write
        if cmd.new_status == BookingStatus::Cancelled {
            self.booking_store.delete(&booking).await?;
            return Ok(BookingOutcome::Cancelled {
                booking_id: *booking.id(),
                event_date: booking.event_date(),
                released_slot: booking.slot().clone(),
            });
        }

        let previous = booking.transition_to(cmd.new_status)?;
        self.booking_store
            .update_status(booking.id(), cmd.new_status)
            .await?;

        Ok(BookingOutcome::Transitioned {
            booking_id: *booking.id(),
            from: previous,
            to: cmd.new_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{Booking, BookingItem};
    use crate::domain::foundation::{BookingItemId, MenuItemId, UserId, VendorId};
    use crate::domain::scheduling::Slot;
    use crate::ports::BookingStoreError;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::sync::Mutex;

    struct MockBookingStore {
        booking: Option<Booking>,
        updates: Mutex<Vec<(BookingId, BookingStatus)>>,
        deleted: Mutex<Vec<BookingId>>,
    }

    impl MockBookingStore {
        fn with_booking(booking: Booking) -> Self {
            Self {
                booking: Some(booking),
                updates: Mutex::new(Vec::new()),
                deleted: Mutex::new(Vec::new()),
            }
        }

        fn empty() -> Self {
            Self {
                booking: None,
                updates: Mutex::new(Vec::new()),
                deleted: Mutex::new(Vec::new()),
            }
        }

        fn updates(&self) -> Vec<(BookingId, BookingStatus)> {
            self.updates.lock().unwrap().clone()
        }

        fn deleted(&self) -> Vec<BookingId> {
            self.deleted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BookingStore for MockBookingStore {
        async fn create(&self, _booking: &Booking) -> Result<(), BookingStoreError> {
            Ok(())
        }

        async fn find_by_id(
            &self,
            _id: &BookingId,
        ) -> Result<Option<Booking>, BookingStoreError> {
            Ok(self.booking.clone())
        }

        async fn delete(&self, booking: &Booking) -> Result<(), BookingStoreError> {
            self.deleted.lock().unwrap().push(*booking.id());
            Ok(())
        }

        async fn update_status(
            &self,
            id: &BookingId,
            status: BookingStatus,
        ) -> Result<(), BookingStoreError> {
            self.updates.lock().unwrap().push((*id, status));
            Ok(())
        }

        async fn list_for_user(
            &self,
            _user_id: &UserId,
        ) -> Result<Vec<Booking>, BookingStoreError> {
            Ok(vec![])
        }

        async fn list_for_vendor(
            &self,
            _vendor_id: &VendorId,
        ) -> Result<Vec<Booking>, BookingStoreError> {
            Ok(vec![])
        }
    }

    fn pending_booking() -> Booking {
        Booking::new(
            BookingId::new(),
            UserId::new(),
            VendorId::new(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            Slot::new("14:00").unwrap(),
            vec![BookingItem::new(
                BookingItemId::new(),
                MenuItemId::new(),
                1,
                Decimal::from(50),
            )
            .unwrap()],
            None,
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn vendor_confirms_pending_booking() {
        let booking = pending_booking();
        let booking_id = *booking.id();
        let vendor = Party::Vendor(*booking.vendor_id());
        let store = Arc::new(MockBookingStore::with_booking(booking));
        let handler = SetBookingStatusHandler::new(store.clone());

        let outcome = handler
            .handle(SetBookingStatusCommand {
                booking_id,
                requester: vendor,
                new_status: BookingStatus::Confirmed,
            })
            .await
            .unwrap();

        assert_eq!(
            outcome,
            BookingOutcome::Transitioned {
                booking_id,
                from: BookingStatus::Pending,
                to: BookingStatus::Confirmed,
            }
        );
        assert_eq!(store.updates(), vec![(booking_id, BookingStatus::Confirmed)]);
        assert!(store.deleted().is_empty());
    }

    #[tokio::test]
    async fn vendor_rejection_keeps_the_row() {
        let booking = pending_booking();
        let booking_id = *booking.id();
        let vendor = Party::Vendor(*booking.vendor_id());
        let store = Arc::new(MockBookingStore::with_booking(booking));
        let handler = SetBookingStatusHandler::new(store.clone());

        let outcome = handler
            .handle(SetBookingStatusCommand {
                booking_id,
                requester: vendor,
                new_status: BookingStatus::Rejected,
            })
            .await
            .unwrap();

        assert!(!outcome.is_cancellation());
        assert_eq!(store.updates(), vec![(booking_id, BookingStatus::Rejected)]);
        assert!(store.deleted().is_empty());
    }

    #[tokio::test]
    async fn cancellation_via_status_hard_deletes() {
        let booking = pending_booking();
        let booking_id = *booking.id();
        let user = Party::User(*booking.user_id());
        let store = Arc::new(MockBookingStore::with_booking(booking));
        let handler = SetBookingStatusHandler::new(store.clone());

        let outcome = handler
            .handle(SetBookingStatusCommand {
                booking_id,
                requester: user,
                new_status: BookingStatus::Cancelled,
            })
            .await
            .unwrap();

        assert!(outcome.is_cancellation());
        assert_eq!(store.deleted(), vec![booking_id]);
        assert!(store.updates().is_empty());
    }

    #[tokio::test]
    async fn completes_confirmed_booking() {
        let mut booking = pending_booking();
        booking.transition_to(BookingStatus::Confirmed).unwrap();
        let booking_id = *booking.id();
        let vendor = Party::Vendor(*booking.vendor_id());
        let store = Arc::new(MockBookingStore::with_booking(booking));
        let handler = SetBookingStatusHandler::new(store);

        let outcome = handler
            .handle(SetBookingStatusCommand {
                booking_id,
                requester: vendor,
                new_status: BookingStatus::Completed,
            })
            .await
            .unwrap();

        assert_eq!(
            outcome,
            BookingOutcome::Transitioned {
                booking_id,
                from: BookingStatus::Confirmed,
                to: BookingStatus::Completed,
            }
        );
    }

    #[tokio::test]
    async fn stranger_is_forbidden() {
        let booking = pending_booking();
        let booking_id = *booking.id();
        let store = Arc::new(MockBookingStore::with_booking(booking));
        let handler = SetBookingStatusHandler::new(store);

        let err = handler
            .handle(SetBookingStatusCommand {
                booking_id,
                requester: Party::Vendor(VendorId::new()),
                new_status: BookingStatus::Confirmed,
            })
            .await
            .unwrap_err();
        assert_eq!(err, BookingError::Forbidden);
    }

    #[tokio::test]
    async fn user_cannot_confirm_own_booking() {
        let booking = pending_booking();
        let booking_id = *booking.id();
        let user = Party::User(*booking.user_id());
        let store = Arc::new(MockBookingStore::with_booking(booking));
        let handler = SetBookingStatusHandler::new(store);

        let err = handler
            .handle(SetBookingStatusCommand {
                booking_id,
                requester: user,
                new_status: BookingStatus::Confirmed,
            })
            .await
            .unwrap_err();
        assert_eq!(err, BookingError::Forbidden);
    }

    #[tokio::test]
    async fn rejects_unlisted_edge() {
        let mut booking = pending_booking();
        booking.transition_to(BookingStatus::Confirmed).unwrap();
        booking.transition_to(BookingStatus::Completed).unwrap();
        let booking_id = *booking.id();
        let vendor = Party::Vendor(*booking.vendor_id());
        let store = Arc::new(MockBookingStore::with_booking(booking));
        let handler = SetBookingStatusHandler::new(store.clone());

        let err = handler
            .handle(SetBookingStatusCommand {
                booking_id,
                requester: vendor,
                new_status: BookingStatus::Confirmed,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidState(_)));
        assert!(store.updates().is_empty());
    }

    #[tokio::test]
    async fn reports_not_found_for_missing_booking() {
        let store = Arc::new(MockBookingStore::empty());
        let handler = SetBookingStatusHandler::new(store);

        let err = handler
            .handle(SetBookingStatusCommand {
                booking_id: BookingId::new(),
                requester: Party::Vendor(VendorId::new()),
                new_status: BookingStatus::Confirmed,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::NotFound(_)));
    }
}
