//! PostgreSQL implementation of MenuReader.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{MenuItemId, VendorId};
use crate::domain::vendor::MenuItem;
use crate::ports::{MenuReader, MenuReaderError};

use super::slot_ledger::classify_sqlx_error;

/// PostgreSQL implementation of MenuReader.
#[derive(Clone)]
pub struct PgMenuReader {
    pool: PgPool,
}

impl PgMenuReader {
    /// Creates a new PgMenuReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MenuReader for PgMenuReader {
    async fn find_for_vendor(
        &self,
        vendor_id: &VendorId,
        ids: &[MenuItemId],
    ) -> Result<Vec<MenuItem>, MenuReaderError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows = sqlx::query(
            r#"
            SELECT id, vendor_id, name, price, is_available
            FROM menu_items
            WHERE vendor_id = $1 AND id = ANY($2)
            "#,
        )
        .bind(vendor_id.as_uuid())
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to fetch menu items", e))?;

        rows.into_iter().map(row_to_menu_item).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_menu_item(row: sqlx::postgres::PgRow) -> Result<MenuItem, MenuReaderError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| MenuReaderError::Database(format!("Failed to get id: {}", e)))?;

    let vendor_id: Uuid = row
        .try_get("vendor_id")
        .map_err(|e| MenuReaderError::Database(format!("Failed to get vendor_id: {}", e)))?;

    let name: String = row
        .try_get("name")
        .map_err(|e| MenuReaderError::Database(format!("Failed to get name: {}", e)))?;

    let price: Decimal = row
        .try_get("price")
        .map_err(|e| MenuReaderError::Database(format!("Failed to get price: {}", e)))?;

    let is_available: bool = row
        .try_get("is_available")
        .map_err(|e| MenuReaderError::Database(format!("Failed to get is_available: {}", e)))?;

    Ok(MenuItem {
        id: MenuItemId::from_uuid(id),
        vendor_id: VendorId::from_uuid(vendor_id),
        name,
        price,
        is_available,
    })
}

fn storage_error(context: &str, e: sqlx::Error) -> MenuReaderError {
    if classify_sqlx_error(&e) {
        MenuReaderError::Unavailable(format!("{}: {}", context, e))
    } else {
        MenuReaderError::Database(format!("{}: {}", context, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_loss_classifies_as_transient() {
        let err = storage_error("ctx", sqlx::Error::PoolClosed);
        assert!(matches!(err, MenuReaderError::Unavailable(_)));
    }
}
