//! ListBookingsHandler - Query handler for a party's bookings.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::Party;
use crate::ports::BookingStore;

/// Query to list the requester's bookings.
#[derive(Debug, Clone)]
pub struct ListBookingsQuery {
    pub requester: Party,
}

/// Handler for listing bookings.
pub struct ListBookingsHandler {
    booking_store: Arc<dyn BookingStore>,
}

impl ListBookingsHandler {
    pub fn new(booking_store: Arc<dyn BookingStore>) -> Self {
        Self { booking_store }
    }

    pub async fn handle(&self, query: ListBookingsQuery) -> Result<Vec<Booking>, BookingError> {
        let bookings = match &query.requester {
            Party::User(user_id) => self.booking_store.list_for_user(user_id).await?,
            Party::Vendor(vendor_id) => self.booking_store.list_for_vendor(vendor_id).await?,
        };
        Ok(bookings)
    }
}
