//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `scheduling` - Per-(vendor, date) slot availability and claim/release rules
//! - `booking` - Booking aggregate, line items, and status lifecycle
//! - `chat` - User/vendor conversations and messages
//! - `vendor` - Read-side menu and live-location types

pub mod booking;
pub mod chat;
pub mod foundation;
pub mod scheduling;
pub mod vendor;
