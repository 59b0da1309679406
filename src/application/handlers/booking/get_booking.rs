//! GetBookingHandler - Query handler for one booking.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::{BookingId, Party};
use crate::ports::BookingStore;

/// Query to fetch one booking with its items.
#[derive(Debug, Clone)]
pub struct GetBookingQuery {
    pub booking_id: BookingId,
    pub requester: Party,
}

/// Handler for retrieving booking details.
pub struct GetBookingHandler {
    booking_store: Arc<dyn BookingStore>,
}

impl GetBookingHandler {
    pub fn new(booking_store: Arc<dyn BookingStore>) -> Self {
        Self { booking_store }
    }

    pub async fn handle(&self, query: GetBookingQuery) -> Result<Booking, BookingError> {
        let booking = self
            .booking_store
            .find_by_id(&query.booking_id)
            .await?
            .ok_or(BookingError::NotFound(query.booking_id))?;

        // Only the two parties may see a booking
        booking.authorize(&query.requester)?;

        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{BookingItem, BookingStatus};
    use crate::domain::foundation::{BookingItemId, MenuItemId, UserId, VendorId};
    use crate::domain::scheduling::Slot;
    use crate::ports::BookingStoreError;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    struct MockBookingStore {
        booking: Option<Booking>,
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

        async fn delete(&self, _booking: &Booking) -> Result<(), BookingStoreError> {
            Ok(())
        }

        async fn update_status(
            &self,
            _id: &BookingId,
            _status: BookingStatus,
        ) -> Result<(), BookingStoreError> {
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

    fn test_booking() -> Booking {
        Booking::new(
            BookingId::new(),
            UserId::new(),
            VendorId::new(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            Slot::new("10:00").unwrap(),
            vec![BookingItem::new(
                BookingItemId::new(),
                MenuItemId::new(),
                1,
                Decimal::from(25),
            )
            .unwrap()],
            None,
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn returns_booking_to_either_party() {
        let booking = test_booking();
        let booking_id = *booking.id();
        let store = Arc::new(MockBookingStore {
            booking: Some(booking.clone()),
        });
        let handler = GetBookingHandler::new(store);

        for requester in [
            Party::User(*booking.user_id()),
            Party::Vendor(*booking.vendor_id()),
        ] {
            let found = handler
                .handle(GetBookingQuery {
                    booking_id,
                    requester,
                })
                .await
                .unwrap();
            assert_eq!(found.id(), &booking_id);
        }
    }

    #[tokio::test]
    async fn rejects_stranger() {
        let booking = test_booking();
        let booking_id = *booking.id();
        let store = Arc::new(MockBookingStore {
            booking: Some(booking),
        });
        let handler = GetBookingHandler::new(store);

        let err = handler
            .handle(GetBookingQuery {
                booking_id,
                requester: Party::User(UserId::new()),
            })
            .await
            .unwrap_err();
        assert_eq!(err, BookingError::Forbidden);
    }

    #[tokio::test]
    async fn reports_not_found() {
        let store = Arc::new(MockBookingStore { booking: None });
        let handler = GetBookingHandler::new(store);

        let err = handler
            .handle(GetBookingQuery {
                booking_id: BookingId::new(),
                requester: Party::User(UserId::new()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::NotFound(_)));
    }
}
