//! Realtime adapters for the WebSocket control channel.
//!
//! This module provides the infrastructure for pushing live updates
//! (vendor locations, chat messages) to connected clients.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Application Handlers                        │
//! │        publish through the EventBroadcaster port             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      BroadcastHub                            │
//! │   single topic - every subscriber sees every event           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │            Connection loops (one per WebSocket)              │
//! │   conn-a (vendor 7)   conn-b (anonymous)   conn-c (...)      │
//! │            tracked by the ConnectionRegistry                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - Wire protocol types and frame parsing
//! - [`registry`] - Table of live connections and vendor keying
//! - [`hub`] - Single-topic broadcast fan-out
//! - [`socket`] - Axum WebSocket upgrade handler and connection loop

pub mod hub;
pub mod messages;
pub mod registry;
pub mod socket;

pub use hub::BroadcastHub;
pub use messages::{
    parse_frame, ClientMessage, FrameError, InboundFrame, LocationPayload, MessagePayload,
    ServerMessage,
};
pub use registry::{ConnectionId, ConnectionRegistry};
pub use socket::{realtime_router, ws_handler, RealtimeState};
