//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod availability;
pub mod bookings;
pub mod chat;
pub mod error;
pub mod health;
pub mod middleware;

// Re-export key types for convenience
pub use availability::{availability_routes, AvailabilityHandlers};
pub use bookings::{booking_routes, BookingHandlers};
pub use chat::{chat_routes, ChatHandlers};
pub use error::ErrorResponse;
pub use health::health_routes;
