//! ListConversationsHandler - Query handler for a party's inbox.

use std::sync::Arc;

use crate::domain::chat::ChatError;
use crate::domain::foundation::Party;
use crate::ports::{ConversationStore, ConversationSummary};

/// Query for the requester's conversations, most recent activity first.
#[derive(Debug, Clone)]
pub struct ListConversationsQuery {
    pub requester: Party,
}

/// Handler for listing conversations with unread counts.
pub struct ListConversationsHandler {
    conversation_store: Arc<dyn ConversationStore>,
}

impl ListConversationsHandler {
    pub fn new(conversation_store: Arc<dyn ConversationStore>) -> Self {
        Self { conversation_store }
    }

    pub async fn handle(
        &self,
        query: ListConversationsQuery,
    ) -> Result<Vec<ConversationSummary>, ChatError> {
        let summaries = self
            .conversation_store
            .list_for_party(&query.requester)
            .await?;
        Ok(summaries)
    }
}
