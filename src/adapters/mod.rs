//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - PostgreSQL-backed storage ports
//! - `http` - REST API surface
//! - `realtime` - WebSocket control channel and broadcast hub

pub mod http;
pub mod postgres;
pub mod realtime;
