//! EventBroadcaster port - fan-out of realtime events.
//!
//! The coordination core pushes three event kinds to live connections:
//! vendor location updates, location removals, and new chat messages.
//! Delivery is deliberately unfiltered (every open connection receives
//! every event and filters client-side) and fire-and-forget: no recipient
//! acknowledgment is tracked, and publish failures never propagate into
//! the publishing operation.

use async_trait::async_trait;

use crate::domain::chat::Message;
use crate::domain::foundation::{Timestamp, VendorId};
use crate::domain::vendor::GeoPoint;

/// A realtime event pushed to every open connection.
#[derive(Debug, Clone, PartialEq)]
pub enum BroadcastEvent {
    /// A vendor reported a new live position.
    LocationUpdated {
        vendor_id: VendorId,
        location: GeoPoint,
        timestamp: Timestamp,
    },

    /// A vendor went off the map.
    LocationRemoved {
        vendor_id: VendorId,
        timestamp: Timestamp,
    },

    /// A chat message was persisted.
    MessageSent { message: Message },
}

/// Port for publishing realtime events to all open connections.
#[async_trait]
pub trait EventBroadcaster: Send + Sync {
    /// Publish an event to every open connection.
    ///
    /// Returns the number of connections the event was handed to, for
    /// diagnostics only. Zero when nobody is listening; never an error.
    async fn broadcast(&self, event: BroadcastEvent) -> usize;
}
