//! Live connection registry.
//!
//! Tracks every open realtime connection and, for connections that have
//! identified themselves as a vendor, a vendor → connection mapping used
//! for diagnostics and lookup. The registry is an injected component owned
//! by the composition root; tests construct isolated instances.
//!
//! # Vendor keying
//!
//! Keying is last-write-wins: when a vendor opens a second connection the
//! mapping moves to the new connection, but the old connection's entry
//! stays in the table until its own close event prunes it. An old
//! connection's close never removes the newer mapping.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::foundation::VendorId;

/// Unique identifier for one realtime connection.
///
/// Generated server-side when a client connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Create a new random connection ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Both maps are guarded by one lock so registration and pruning can never
/// be observed half-applied.
#[derive(Default)]
struct RegistryState {
    /// Every open connection, with the vendor it registered as (if any).
    connections: HashMap<ConnectionId, Option<VendorId>>,

    /// Vendor → most recently registered connection.
    vendor_index: HashMap<VendorId, ConnectionId>,
}

/// Table of live realtime connections.
#[derive(Default)]
pub struct ConnectionRegistry {
    state: RwLock<RegistryState>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or update a connection's entry.
    ///
    /// Registering with a vendor moves that vendor's mapping here
    /// (last-write-wins). Re-registering the same connection under a
    /// different vendor releases its previous mapping first.
    pub async fn register(&self, connection_id: ConnectionId, vendor: Option<VendorId>) {
        let mut state = self.state.write().await;

        if let Some(Some(previous)) = state.connections.get(&connection_id) {
            let previous = *previous;
            if Some(&previous) != vendor.as_ref()
                && state.vendor_index.get(&previous) == Some(&connection_id)
            {
                state.vendor_index.remove(&previous);
            }
        }

        state.connections.insert(connection_id, vendor);
        if let Some(vendor_id) = vendor {
            state.vendor_index.insert(vendor_id, connection_id);
        }
    }

    /// Remove a connection's entry. Idempotent.
    ///
    /// The vendor mapping is removed only if it still points at this
    /// connection; a newer registration by the same vendor survives.
    pub async fn unregister(&self, connection_id: &ConnectionId) {
        let mut state = self.state.write().await;

        if let Some(Some(vendor_id)) = state.connections.remove(connection_id) {
            if state.vendor_index.get(&vendor_id) == Some(connection_id) {
                state.vendor_index.remove(&vendor_id);
            }
        }
    }

    /// Number of open connections.
    pub async fn open_count(&self) -> usize {
        self.state.read().await.connections.len()
    }

    /// The vendor a connection registered as, if any.
    pub async fn vendor_of(&self, connection_id: &ConnectionId) -> Option<VendorId> {
        self.state
            .read()
            .await
            .connections
            .get(connection_id)
            .copied()
            .flatten()
    }

    /// The connection currently keyed to a vendor, if any.
    pub async fn connection_for(&self, vendor_id: &VendorId) -> Option<ConnectionId> {
        self.state.read().await.vendor_index.get(vendor_id).copied()
    }
}
