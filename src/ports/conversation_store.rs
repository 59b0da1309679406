//! ConversationStore port.
//!
//! Defines the contract for persisting conversations and their messages.
//!
//! # Design
//!
//! - **One conversation per (user, vendor)**: unique constraint, with an
//!   idempotent get-or-create
//! - **Append-only messages**: appending a message also bumps the
//!   conversation's last-activity stamp in the same unit
//! - **Read-marking on list**: listing a thread marks the other side's
//!   messages as read, atomically with the read

use async_trait::async_trait;

use crate::domain::chat::{Conversation, Message};
use crate::domain::foundation::{ConversationId, Party, PartyRole, UserId, VendorId};

/// A conversation plus its unread count for one party's inbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSummary {
    pub conversation: Conversation,
    /// Messages sent by the other side that this party has not yet read.
    pub unread_count: i64,
}

/// Errors that can occur in conversation persistence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversationStoreError {
    /// No conversation with that ID.
    #[error("conversation not found: {0}")]
    NotFound(ConversationId),

    /// The vendor side of a new conversation does not exist.
    #[error("vendor not found: {0}")]
    VendorNotFound(VendorId),

    /// Persistence failure.
    #[error("database error: {0}")]
    Database(String),

    /// Transient storage failure; the caller may retry.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Repository port for conversations and messages.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Look up or create the conversation for a (user, vendor) pair.
    ///
    /// Idempotent: concurrent calls for the same pair converge on one row.
    ///
    /// # Errors
    ///
    /// - `VendorNotFound` if the vendor does not exist
    async fn get_or_create(
        &self,
        user_id: &UserId,
        vendor_id: &VendorId,
    ) -> Result<Conversation, ConversationStoreError>;

    /// Find a conversation by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, ConversationStoreError>;

    /// Append a message and bump the conversation's last activity, in one
    /// transaction.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the conversation no longer exists
    async fn append_message(&self, message: &Message) -> Result<(), ConversationStoreError>;

    /// List a thread oldest-first, marking messages NOT authored by
    /// `reader_role` as read in the same unit.
    async fn list_messages_marking_read(
        &self,
        conversation_id: &ConversationId,
        reader_role: PartyRole,
    ) -> Result<Vec<Message>, ConversationStoreError>;

    /// List one party's conversations, most recent activity first, with
    /// unread counts.
    async fn list_for_party(
        &self,
        party: &Party,
    ) -> Result<Vec<ConversationSummary>, ConversationStoreError>;
}

impl From<ConversationStoreError> for crate::domain::chat::ChatError {
    fn from(err: ConversationStoreError) -> Self {
        use crate::domain::chat::ChatError;
        match err {
            ConversationStoreError::NotFound(id) => ChatError::NotFound(id),
            ConversationStoreError::VendorNotFound(id) => ChatError::VendorNotFound(id),
            ConversationStoreError::Database(msg) => ChatError::Infrastructure(msg),
            ConversationStoreError::Unavailable(msg) => ChatError::Unavailable(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn conversation_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn ConversationStore) {}
    }
}
