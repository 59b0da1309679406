//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Vendora domain.

mod errors;
mod ids;
mod party;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{BookingId, BookingItemId, ConversationId, MenuItemId, MessageId, UserId, VendorId};
pub use party::{Party, PartyRole};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
