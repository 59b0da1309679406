//! Chat domain module.
//!
//! One conversation per (user, vendor) pair; messages carry the sending
//! side and a per-message read flag. Listing a thread marks the other
//! side's messages as read.

mod conversation;
mod errors;
mod message;

pub use conversation::Conversation;
pub use errors::ChatError;
pub use message::{Message, MAX_MESSAGE_LENGTH};
