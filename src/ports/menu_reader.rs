//! MenuReader port (read side).
//!
//! The booking engine validates item selections against the vendor's menu
//! and snapshots prices at booking time. Menu management itself belongs to
//! the catalog service; this port is read-only.

use async_trait::async_trait;

use crate::domain::foundation::{MenuItemId, VendorId};
use crate::domain::vendor::MenuItem;

/// Errors that can occur reading menu data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuReaderError {
    /// Persistence failure.
    #[error("database error: {0}")]
    Database(String),

    /// Transient storage failure; the caller may retry.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Read port for vendor menu items.
#[async_trait]
pub trait MenuReader: Send + Sync {
    /// Fetch the given menu items, restricted to the given vendor.
    ///
    /// Returns only the items that exist AND belong to that vendor; callers
    /// detect unknown or foreign IDs by comparing against the requested set.
    async fn find_for_vendor(
        &self,
        vendor_id: &VendorId,
        ids: &[MenuItemId],
    ) -> Result<Vec<MenuItem>, MenuReaderError>;
}

impl From<MenuReaderError> for crate::domain::booking::BookingError {
    fn from(err: MenuReaderError) -> Self {
        use crate::domain::booking::BookingError;
        match err {
            MenuReaderError::Database(msg) => BookingError::Infrastructure(msg),
            MenuReaderError::Unavailable(msg) => BookingError::Unavailable(msg),
        }
    }
}
