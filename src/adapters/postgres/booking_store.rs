//! PostgreSQL implementation of BookingStore.
//!
//! The two bulk mutations are single transactions so a concurrent reader
//! never sees a booking without its slot claim or the other way round:
//!
//! - `create`: insert booking + items, then claim the slot under the
//!   availability row lock. The lock re-check is what loses a race cleanly.
//! - `delete`: remove items + booking, then release the slot back.
//!
//! Each transaction runs under a bounded deadline; expiry surfaces as the
//! retryable `Unavailable` class rather than hanging the request.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingItem, BookingStatus};
use crate::domain::foundation::{
    BookingId, BookingItemId, MenuItemId, Timestamp, UserId, VendorId,
};
use crate::domain::scheduling::Slot;
use crate::ports::{BookingStore, BookingStoreError, SlotLedgerError};

use super::slot_ledger::{claim_slot_in_tx, classify_sqlx_error, release_slot_in_tx};

/// PostgreSQL implementation of BookingStore.
#[derive(Clone)]
pub struct PgBookingStore {
    pool: PgPool,
    /// Upper bound on one create/delete transaction.
    transaction_timeout: Duration,
}

impl PgBookingStore {
    /// Creates a new PgBookingStore.
    pub fn new(pool: PgPool, transaction_timeout: Duration) -> Self {
        Self {
            pool,
            transaction_timeout,
        }
    }

    async fn create_in_tx(&self, booking: &Booking) -> Result<(), BookingStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("Failed to begin booking transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, user_id, vendor_id, event_date, slot, status,
                total_amount, instructions, address, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(booking.id().as_uuid())
        .bind(booking.user_id().as_uuid())
        .bind(booking.vendor_id().as_uuid())
        .bind(booking.event_date())
        .bind(booking.slot().as_str())
        .bind(booking.status().to_string())
        .bind(booking.total_amount())
        .bind(booking.instructions())
        .bind(booking.address())
        .bind(booking.created_at().as_datetime())
        .bind(booking.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| storage_error("Failed to insert booking", e))?;

        for item in booking.items() {
            sqlx::query(
                r#"
                INSERT INTO booking_items (id, booking_id, menu_item_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(item.id().as_uuid())
            .bind(booking.id().as_uuid())
            .bind(item.menu_item_id().as_uuid())
            .bind(item.quantity() as i32)
            .bind(item.unit_price())
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("Failed to insert booking item", e))?;
        }

        // The row lock inside the claim is the authoritative re-check
        claim_slot_in_tx(
            &mut tx,
            booking.vendor_id(),
            booking.event_date(),
            booking.slot(),
        )
        .await
        .map_err(ledger_error)?;

        tx.commit()
            .await
            .map_err(|e| storage_error("Failed to commit booking transaction", e))
    }

    async fn delete_in_tx(&self, booking: &Booking) -> Result<(), BookingStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("Failed to begin delete transaction", e))?;

        sqlx::query("DELETE FROM booking_items WHERE booking_id = $1")
            .bind(booking.id().as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("Failed to delete booking items", e))?;

        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(booking.id().as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("Failed to delete booking", e))?;

        if result.rows_affected() == 0 {
            return Err(BookingStoreError::NotFound(*booking.id()));
        }

        release_slot_in_tx(
            &mut tx,
            booking.vendor_id(),
            booking.event_date(),
            booking.slot().clone(),
        )
        .await
        .map_err(ledger_error)?;

        tx.commit()
            .await
            .map_err(|e| storage_error("Failed to commit delete transaction", e))
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn create(&self, booking: &Booking) -> Result<(), BookingStoreError> {
        match tokio::time::timeout(self.transaction_timeout, self.create_in_tx(booking)).await {
            Ok(result) => result,
            Err(_) => Err(BookingStoreError::Unavailable(
                "Booking transaction timed out".to_string(),
            )),
        }
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, BookingStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, vendor_id, event_date, slot, status,
                   total_amount, instructions, address, created_at, updated_at
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to fetch booking", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = fetch_items(&self.pool, &[*id.as_uuid()]).await?;
        let booking = row_to_booking(row, &items)?;
        Ok(Some(booking))
    }

    async fn delete(&self, booking: &Booking) -> Result<(), BookingStoreError> {
        match tokio::time::timeout(self.transaction_timeout, self.delete_in_tx(booking)).await {
            Ok(result) => result,
            Err(_) => Err(BookingStoreError::Unavailable(
                "Delete transaction timed out".to_string(),
            )),
        }
    }

    async fn update_status(
        &self,
        id: &BookingId,
        status: BookingStatus,
    ) -> Result<(), BookingStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings SET status = $2, updated_at = $3 WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(status.to_string())
        .bind(Timestamp::now().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to update booking status", e))?;

        if result.rows_affected() == 0 {
            return Err(BookingStoreError::NotFound(*id));
        }

        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Booking>, BookingStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, vendor_id, event_date, slot, status,
                   total_amount, instructions, address, created_at, updated_at
            FROM bookings
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to fetch bookings by user", e))?;

        rows_to_bookings(&self.pool, rows).await
    }

    async fn list_for_vendor(
        &self,
        vendor_id: &VendorId,
    ) -> Result<Vec<Booking>, BookingStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, vendor_id, event_date, slot, status,
                   total_amount, instructions, address, created_at, updated_at
            FROM bookings
            WHERE vendor_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(vendor_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to fetch bookings by vendor", e))?;

        rows_to_bookings(&self.pool, rows).await
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

/// Items for a set of bookings, keyed by booking ID.
async fn fetch_items(
    pool: &PgPool,
    booking_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<BookingItem>>, BookingStoreError> {
    let rows = sqlx::query(
        r#"
        SELECT id, booking_id, menu_item_id, quantity, unit_price
        FROM booking_items
        WHERE booking_id = ANY($1)
        "#,
    )
    .bind(booking_ids)
    .fetch_all(pool)
    .await
    .map_err(|e| storage_error("Failed to fetch booking items", e))?;

    let mut items: HashMap<Uuid, Vec<BookingItem>> = HashMap::new();
    for row in rows {
        let booking_id: Uuid = row
            .try_get("booking_id")
            .map_err(|e| BookingStoreError::Database(format!("Failed to get booking_id: {}", e)))?;
        items.entry(booking_id).or_default().push(row_to_item(row)?);
    }

    Ok(items)
}

async fn rows_to_bookings(
    pool: &PgPool,
    rows: Vec<sqlx::postgres::PgRow>,
) -> Result<Vec<Booking>, BookingStoreError> {
    let ids: Vec<Uuid> = rows
        .iter()
        .map(|row| row.try_get("id"))
        .collect::<Result<_, _>>()
        .map_err(|e| BookingStoreError::Database(format!("Failed to get id: {}", e)))?;

    let items = fetch_items(pool, &ids).await?;
    rows.into_iter().map(|row| row_to_booking(row, &items)).collect()
}

fn row_to_item(row: sqlx::postgres::PgRow) -> Result<BookingItem, BookingStoreError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| BookingStoreError::Database(format!("Failed to get item id: {}", e)))?;

    let menu_item_id: Uuid = row
        .try_get("menu_item_id")
        .map_err(|e| BookingStoreError::Database(format!("Failed to get menu_item_id: {}", e)))?;

    let quantity: i32 = row
        .try_get("quantity")
        .map_err(|e| BookingStoreError::Database(format!("Failed to get quantity: {}", e)))?;

    let unit_price: Decimal = row
        .try_get("unit_price")
        .map_err(|e| BookingStoreError::Database(format!("Failed to get unit_price: {}", e)))?;

    Ok(BookingItem::reconstitute(
        BookingItemId::from_uuid(id),
        MenuItemId::from_uuid(menu_item_id),
        quantity as u32,
        unit_price,
    ))
}

fn row_to_booking(
    row: sqlx::postgres::PgRow,
    items: &HashMap<Uuid, Vec<BookingItem>>,
) -> Result<Booking, BookingStoreError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| BookingStoreError::Database(format!("Failed to get id: {}", e)))?;

    let user_id: Uuid = row
        .try_get("user_id")
        .map_err(|e| BookingStoreError::Database(format!("Failed to get user_id: {}", e)))?;

    let vendor_id: Uuid = row
        .try_get("vendor_id")
        .map_err(|e| BookingStoreError::Database(format!("Failed to get vendor_id: {}", e)))?;

    let event_date: NaiveDate = row
        .try_get("event_date")
        .map_err(|e| BookingStoreError::Database(format!("Failed to get event_date: {}", e)))?;

    let slot: String = row
        .try_get("slot")
        .map_err(|e| BookingStoreError::Database(format!("Failed to get slot: {}", e)))?;
    let slot = Slot::new(slot)
        .map_err(|e| BookingStoreError::Database(format!("Invalid stored slot: {}", e)))?;

    let status: String = row
        .try_get("status")
        .map_err(|e| BookingStoreError::Database(format!("Failed to get status: {}", e)))?;
    let status: BookingStatus = status
        .parse()
        .map_err(|e| BookingStoreError::Database(format!("Invalid stored status: {}", e)))?;

    let total_amount: Decimal = row
        .try_get("total_amount")
        .map_err(|e| BookingStoreError::Database(format!("Failed to get total_amount: {}", e)))?;

    let instructions: Option<String> = row
        .try_get("instructions")
        .map_err(|e| BookingStoreError::Database(format!("Failed to get instructions: {}", e)))?;

    let address: Option<String> = row
        .try_get("address")
        .map_err(|e| BookingStoreError::Database(format!("Failed to get address: {}", e)))?;

    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| BookingStoreError::Database(format!("Failed to get created_at: {}", e)))?;

    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| BookingStoreError::Database(format!("Failed to get updated_at: {}", e)))?;

    Ok(Booking::reconstitute(
        BookingId::from_uuid(id),
        UserId::from_uuid(user_id),
        VendorId::from_uuid(vendor_id),
        event_date,
        slot,
        status,
        items.get(&id).cloned().unwrap_or_default(),
        total_amount,
        instructions,
        address,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

fn ledger_error(err: SlotLedgerError) -> BookingStoreError {
    match err {
        SlotLedgerError::SlotUnavailable { date, slot } => {
            BookingStoreError::SlotUnavailable { date, slot }
        }
        SlotLedgerError::Database(msg) => BookingStoreError::Database(msg),
        SlotLedgerError::Unavailable(msg) => BookingStoreError::Unavailable(msg),
    }
}

fn storage_error(context: &str, e: sqlx::Error) -> BookingStoreError {
    if classify_sqlx_error(&e) {
        BookingStoreError::Unavailable(format!("{}: {}", context, e))
    } else {
        BookingStoreError::Database(format!("{}: {}", context, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_errors_map_onto_store_errors() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let slot = Slot::new("14:00").unwrap();

        let mapped = ledger_error(SlotLedgerError::SlotUnavailable {
            date,
            slot: slot.clone(),
        });
        assert_eq!(mapped, BookingStoreError::SlotUnavailable { date, slot });

        let mapped = ledger_error(SlotLedgerError::Unavailable("pool".to_string()));
        assert!(matches!(mapped, BookingStoreError::Unavailable(_)));
    }

    #[test]
    fn timeouts_classify_as_transient() {
        let err = storage_error("ctx", sqlx::Error::PoolTimedOut);
        assert!(matches!(err, BookingStoreError::Unavailable(_)));

        let err = storage_error("ctx", sqlx::Error::RowNotFound);
        assert!(matches!(err, BookingStoreError::Database(_)));
    }
}
