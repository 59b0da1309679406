//! Single-topic broadcast hub for realtime fan-out.
//!
//! All realtime events (vendor locations, chat messages) flow through one
//! `tokio::sync::broadcast` channel: every subscriber receives every event
//! and clients filter on their side. Delivery is fire-and-forget; there is
//! no per-recipient ack, and a slow subscriber lags and skips rather than
//! backing up the publisher.
//!
//! The hub is the process-local implementation of the
//! [`EventBroadcaster`] port, so application handlers publish through the
//! port while the connection loop subscribes to the concrete hub.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::ports::{BroadcastEvent, EventBroadcaster};

use super::messages::ServerMessage;

/// Fan-out hub shared by all realtime connections.
pub struct BroadcastHub {
    /// Publish side of the topic. Payloads are Arc-shared so a large
    /// subscriber set never deep-clones messages.
    sender: broadcast::Sender<Arc<ServerMessage>>,
}

impl BroadcastHub {
    /// Create a hub whose channel buffers `capacity` undelivered messages
    /// per subscriber before that subscriber starts skipping.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a hub with a reasonable default capacity.
    pub fn with_default_capacity() -> Self {
        Self::new(128)
    }

    /// Subscribe to the topic.
    ///
    /// The receiver sees every message published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<ServerMessage>> {
        self.sender.subscribe()
    }

    /// Publish a message to every current subscriber.
    ///
    /// Returns the number of subscribers the message was handed to.
    /// Zero subscribers is not an error.
    pub fn publish(&self, message: ServerMessage) -> usize {
        self.sender.send(Arc::new(message)).unwrap_or(0)
    }

    /// Number of currently attached subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[async_trait]
impl EventBroadcaster for BroadcastHub {
    async fn broadcast(&self, event: BroadcastEvent) -> usize {
        self.publish(ServerMessage::from(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, VendorId};
    use crate::domain::vendor::GeoPoint;

    fn location_update(vendor_id: VendorId) -> ServerMessage {
        ServerMessage::LocationUpdate {
            vendor_id,
            location: GeoPoint::new(52.52, 13.405).unwrap(),
            timestamp: Timestamp::now().to_rfc3339(),
        }
    }

    #[tokio::test]
    async fn publish_without_subscribers_delivers_to_nobody() {
        let hub = BroadcastHub::with_default_capacity();
        assert_eq!(hub.publish(ServerMessage::Pong), 0);
    }

    #[tokio::test]
    async fn every_subscriber_receives_the_same_payload() {
        let hub = BroadcastHub::with_default_capacity();
        let mut first = hub.subscribe();
        let mut second = hub.subscribe();

        let delivered = hub.publish(location_update(VendorId::new()));
        assert_eq!(delivered, 2);

        let a = first.recv().await.unwrap();
        let b = second.recv().await.unwrap();
        assert_eq!(
            serde_json::to_string(&*a).unwrap(),
            serde_json::to_string(&*b).unwrap()
        );
    }

    #[tokio::test]
    async fn dropped_subscriber_no_longer_counts() {
        let hub = BroadcastHub::with_default_capacity();
        let mut first = hub.subscribe();
        let mut second = hub.subscribe();
        let third = hub.subscribe();
        drop(third);

        let delivered = hub.publish(location_update(VendorId::new()));
        assert_eq!(delivered, 2);

        assert!(first.recv().await.is_ok());
        assert!(second.recv().await.is_ok());
    }

    #[tokio::test]
    async fn slow_subscriber_lags_and_skips() {
        let hub = BroadcastHub::new(1);
        let mut rx = hub.subscribe();

        hub.publish(ServerMessage::Pong);
        hub.publish(ServerMessage::Pong);
        hub.publish(ServerMessage::Pong);

        // The oldest messages were dropped, not queued without bound
        match rx.try_recv() {
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => assert!(skipped >= 1),
            other => panic!("expected lag, got {:?}", other),
        }
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn broadcasts_port_events_as_wire_messages() {
        let hub = BroadcastHub::with_default_capacity();
        let mut rx = hub.subscribe();
        let vendor_id = VendorId::new();

        let delivered = hub
            .broadcast(BroadcastEvent::LocationUpdated {
                vendor_id,
                location: GeoPoint::new(48.85, 2.35).unwrap(),
                timestamp: Timestamp::now(),
            })
            .await;
        assert_eq!(delivered, 1);

        let message = rx.recv().await.unwrap();
        assert!(matches!(
            &*message,
            ServerMessage::LocationUpdate { vendor_id: v, .. } if *v == vendor_id
        ));
    }
}
