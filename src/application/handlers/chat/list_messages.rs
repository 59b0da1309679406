//! ListMessagesHandler - Query handler for one conversation thread.
//!
//! Listing is not a pure read: messages written by the other side are
//! marked read in the same storage unit, so the sender's next poll sees
//! up-to-date read receipts.

use std::sync::Arc;

use crate::domain::chat::{ChatError, Message};
use crate::domain::foundation::{ConversationId, Party};
use crate::ports::ConversationStore;

/// Query for a conversation's messages, oldest first.
#[derive(Debug, Clone)]
pub struct ListMessagesQuery {
    pub conversation_id: ConversationId,
    pub requester: Party,
}

/// Handler for listing (and read-marking) a thread.
pub struct ListMessagesHandler {
    conversation_store: Arc<dyn ConversationStore>,
}

impl ListMessagesHandler {
    pub fn new(conversation_store: Arc<dyn ConversationStore>) -> Self {
        Self { conversation_store }
    }

    pub async fn handle(&self, query: ListMessagesQuery) -> Result<Vec<Message>, ChatError> {
        // 1. Load and check the requester is a party, learning their side
        let conversation = self
            .conversation_store
            .find_by_id(&query.conversation_id)
            .await?
            .ok_or(ChatError::NotFound(query.conversation_id))?;
        let reader_role = conversation.authorize_party(&query.requester)?;

        // 2. Read the thread; the other side's messages become read
        let messages = self
            .conversation_store
            .list_messages_marking_read(&query.conversation_id, reader_role)
            .await?;
        Ok(messages)
    }
}
