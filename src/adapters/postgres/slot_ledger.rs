//! PostgreSQL implementation of SlotLedger.
//!
//! One row per (vendor, date) in `vendor_availability`, with the open
//! slots stored as an ordered JSONB array. Mutations read the row `FOR
//! UPDATE` so concurrent claims of the same slot serialize on the row
//! lock; the loser sees the slot already gone and fails cleanly.
//!
//! The in-transaction claim/release helpers are shared with the booking
//! store, which runs them inside its own insert/delete transactions.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool, Row};

use crate::domain::foundation::{Timestamp, VendorId};
use crate::domain::scheduling::{AvailabilityRecord, Slot, SlotSet};
use crate::ports::{AvailabilityView, SlotLedger, SlotLedgerError};

/// PostgreSQL implementation of SlotLedger.
#[derive(Clone)]
pub struct PgSlotLedger {
    pool: PgPool,
}

impl PgSlotLedger {
    /// Creates a new PgSlotLedger.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotLedger for PgSlotLedger {
    async fn is_slot_free(
        &self,
        vendor_id: &VendorId,
        date: NaiveDate,
        slot: &Slot,
    ) -> Result<bool, SlotLedgerError> {
        let record = fetch_record(&self.pool, vendor_id, date).await?;
        Ok(record.map_or(false, |r| r.is_slot_free(slot)))
    }

    async fn claim_slot(
        &self,
        vendor_id: &VendorId,
        date: NaiveDate,
        slot: &Slot,
    ) -> Result<(), SlotLedgerError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("Failed to begin claim transaction", e))?;

        claim_slot_in_tx(&mut tx, vendor_id, date, slot).await?;

        tx.commit()
            .await
            .map_err(|e| storage_error("Failed to commit claim transaction", e))
    }

    async fn release_slot(
        &self,
        vendor_id: &VendorId,
        date: NaiveDate,
        slot: &Slot,
    ) -> Result<(), SlotLedgerError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("Failed to begin release transaction", e))?;

        release_slot_in_tx(&mut tx, vendor_id, date, slot.clone()).await?;

        tx.commit()
            .await
            .map_err(|e| storage_error("Failed to commit release transaction", e))
    }

    async fn get_availability(
        &self,
        vendor_id: &VendorId,
        date: NaiveDate,
    ) -> Result<AvailabilityView, SlotLedgerError> {
        let record = fetch_record(&self.pool, vendor_id, date).await?;
        Ok(match record {
            Some(record) => AvailabilityView {
                is_available: record.is_available(),
                slots: record.slots().clone(),
            },
            None => AvailabilityView::closed(),
        })
    }

    async fn set_schedule(
        &self,
        vendor_id: &VendorId,
        date: NaiveDate,
        slots: SlotSet,
        is_available: bool,
    ) -> Result<AvailabilityView, SlotLedgerError> {
        let record = AvailabilityRecord::new(*vendor_id, date, slots, is_available);

        sqlx::query(
            r#"
            INSERT INTO vendor_availability (vendor_id, date, slots, is_available, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (vendor_id, date) DO UPDATE SET
                slots = EXCLUDED.slots,
                is_available = EXCLUDED.is_available,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(vendor_id.as_uuid())
        .bind(date)
        .bind(slots_to_json(record.slots()))
        .bind(record.is_available())
        .bind(record.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to upsert availability record", e))?;

        Ok(AvailabilityView {
            is_available: record.is_available(),
            slots: record.slots().clone(),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// In-transaction helpers (shared with the booking store)
// ════════════════════════════════════════════════════════════════════════════

/// Claim a slot inside an open transaction.
///
/// Locks the availability row `FOR UPDATE` so a concurrent claim of the
/// same slot waits here and then fails on the re-check.
pub(crate) async fn claim_slot_in_tx(
    conn: &mut PgConnection,
    vendor_id: &VendorId,
    date: NaiveDate,
    slot: &Slot,
) -> Result<(), SlotLedgerError> {
    let mut record = fetch_record_for_update(conn, vendor_id, date)
        .await?
        .ok_or_else(|| SlotLedgerError::SlotUnavailable {
            date,
            slot: slot.clone(),
        })?;

    record
        .claim(slot)
        .map_err(|_| SlotLedgerError::SlotUnavailable {
            date,
            slot: slot.clone(),
        })?;

    write_record_slots(conn, &record).await
}

/// Release a slot inside an open transaction.
///
/// A missing availability row is tolerated: the vendor deleted or never
/// published the schedule, and there is nothing to release into.
pub(crate) async fn release_slot_in_tx(
    conn: &mut PgConnection,
    vendor_id: &VendorId,
    date: NaiveDate,
    slot: Slot,
) -> Result<(), SlotLedgerError> {
    let Some(mut record) = fetch_record_for_update(conn, vendor_id, date).await? else {
        return Ok(());
    };

    if record.release(slot) {
        write_record_slots(conn, &record).await?;
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

async fn fetch_record(
    pool: &PgPool,
    vendor_id: &VendorId,
    date: NaiveDate,
) -> Result<Option<AvailabilityRecord>, SlotLedgerError> {
    let row = sqlx::query(
        r#"
        SELECT slots, is_available, updated_at
        FROM vendor_availability
        WHERE vendor_id = $1 AND date = $2
        "#,
    )
    .bind(vendor_id.as_uuid())
    .bind(date)
    .fetch_optional(pool)
    .await
    .map_err(|e| storage_error("Failed to fetch availability record", e))?;

    row.map(|row| row_to_record(*vendor_id, date, row)).transpose()
}

async fn fetch_record_for_update(
    conn: &mut PgConnection,
    vendor_id: &VendorId,
    date: NaiveDate,
) -> Result<Option<AvailabilityRecord>, SlotLedgerError> {
    let row = sqlx::query(
        r#"
        SELECT slots, is_available, updated_at
        FROM vendor_availability
        WHERE vendor_id = $1 AND date = $2
        FOR UPDATE
        "#,
    )
    .bind(vendor_id.as_uuid())
    .bind(date)
    .fetch_optional(conn)
    .await
    .map_err(|e| storage_error("Failed to lock availability record", e))?;

    row.map(|row| row_to_record(*vendor_id, date, row)).transpose()
}

async fn write_record_slots(
    conn: &mut PgConnection,
    record: &AvailabilityRecord,
) -> Result<(), SlotLedgerError> {
    sqlx::query(
        r#"
        UPDATE vendor_availability
        SET slots = $3, updated_at = $4
        WHERE vendor_id = $1 AND date = $2
        "#,
    )
    .bind(record.vendor_id().as_uuid())
    .bind(record.date())
    .bind(slots_to_json(record.slots()))
    .bind(record.updated_at().as_datetime())
    .execute(conn)
    .await
    .map_err(|e| storage_error("Failed to write availability record", e))?;

    Ok(())
}

fn row_to_record(
    vendor_id: VendorId,
    date: NaiveDate,
    row: sqlx::postgres::PgRow,
) -> Result<AvailabilityRecord, SlotLedgerError> {
    let slots_json: serde_json::Value = row
        .try_get("slots")
        .map_err(|e| SlotLedgerError::Database(format!("Failed to get slots: {}", e)))?;
    let slots = slots_from_json(slots_json)?;

    let is_available: bool = row
        .try_get("is_available")
        .map_err(|e| SlotLedgerError::Database(format!("Failed to get is_available: {}", e)))?;

    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| SlotLedgerError::Database(format!("Failed to get updated_at: {}", e)))?;

    Ok(AvailabilityRecord::reconstitute(
        vendor_id,
        date,
        slots,
        is_available,
        Timestamp::from_datetime(updated_at),
    ))
}

fn slots_to_json(slots: &SlotSet) -> serde_json::Value {
    serde_json::json!(slots.to_labels())
}

fn slots_from_json(value: serde_json::Value) -> Result<SlotSet, SlotLedgerError> {
    let labels: Vec<String> = serde_json::from_value(value)
        .map_err(|e| SlotLedgerError::Database(format!("Malformed slots column: {}", e)))?;

    let slots: Result<Vec<Slot>, _> = labels.into_iter().map(Slot::new).collect();
    let slots = slots
        .map_err(|e| SlotLedgerError::Database(format!("Invalid slot label in storage: {}", e)))?;

    Ok(SlotSet::from_slots(slots))
}

/// Classify a sqlx failure: pool exhaustion and connection loss are the
/// retryable `Unavailable` class, everything else is `Database`.
pub(crate) fn classify_sqlx_error(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
    )
}

fn storage_error(context: &str, e: sqlx::Error) -> SlotLedgerError {
    if classify_sqlx_error(&e) {
        SlotLedgerError::Unavailable(format!("{}: {}", context, e))
    } else {
        SlotLedgerError::Database(format!("{}: {}", context, e))
    }
}
