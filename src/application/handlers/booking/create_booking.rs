//! CreateBookingHandler - Command handler for placing a booking.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::booking::{Booking, BookingError, BookingItem};
use crate::domain::foundation::{BookingId, BookingItemId, MenuItemId, UserId, VendorId};
use crate::domain::scheduling::Slot;
use crate::ports::{BookingStore, MenuReader, SlotLedger};

/// One requested menu line.
#[derive(Debug, Clone)]
pub struct ItemSelection {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
}

/// Command to place a booking for one slot on one date.
#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub user_id: UserId,
    pub vendor_id: VendorId,
    pub event_date: NaiveDate,
    pub slot: String,
    pub items: Vec<ItemSelection>,
    pub instructions: Option<String>,
    pub address: Option<String>,
}

/// Handler for placing bookings.
pub struct CreateBookingHandler {
    menu_reader: Arc<dyn MenuReader>,
    slot_ledger: Arc<dyn SlotLedger>,
    booking_store: Arc<dyn BookingStore>,
}

impl CreateBookingHandler {
    pub fn new(
        menu_reader: Arc<dyn MenuReader>,
        slot_ledger: Arc<dyn SlotLedger>,
        booking_store: Arc<dyn BookingStore>,
    ) -> Self {
        Self {
            menu_reader,
            slot_ledger,
            booking_store,
        }
    }

    pub async fn handle(&self, cmd: CreateBookingCommand) -> Result<Booking, BookingError> {
        // 1. Validate shape: a well-formed slot label and at least one selection
        let slot = Slot::new(cmd.slot)?;
        if cmd.items.is_empty() {
            return Err(BookingError::validation(
                "items",
                "at least one item is required",
            ));
        }

        // 2. Resolve selections against the vendor's menu, snapshotting prices
        let requested: Vec<MenuItemId> = cmd.items.iter().map(|s| s.menu_item_id).collect();
        let menu = self
            .menu_reader
            .find_for_vendor(&cmd.vendor_id, &requested)
            .await?;

        let mut items = Vec::with_capacity(cmd.items.len());
        for selection in &cmd.items {
            let menu_item = menu
                .iter()
                .find(|item| item.id == selection.menu_item_id)
                .ok_or(BookingError::InvalidMenuItem(selection.menu_item_id))?;
            if !menu_item.is_available {
                return Err(BookingError::invalid_menu_item(menu_item.id));
            }
            items.push(BookingItem::new(
                BookingItemId::new(),
                menu_item.id,
                selection.quantity,
                menu_item.price,
            )?);
        }

        // 3. Advisory pre-check; the authoritative re-check runs under a row
        //    lock inside the store transaction
        if !self
            .slot_ledger
            .is_slot_free(&cmd.vendor_id, cmd.event_date, &slot)
            .await?
        {
            return Err(BookingError::slot_unavailable(cmd.event_date, slot));
        }

        // 4. Commit booking + items + slot claim as one atomic unit
        let booking = Booking::new(
            BookingId::new(),
            cmd.user_id,
            cmd.vendor_id,
            cmd.event_date,
            slot,
            items,
            cmd.instructions,
            cmd.address,
        )?;
        self.booking_store.create(&booking).await?;

        Ok(booking)
    }
}
