//! StartConversationHandler - Command handler for opening a chat channel.

use std::sync::Arc;

use crate::domain::chat::{ChatError, Conversation};
use crate::domain::foundation::{UserId, VendorId};
use crate::ports::ConversationStore;

/// Command to open (or return) the conversation with a vendor.
#[derive(Debug, Clone)]
pub struct StartConversationCommand {
    pub user_id: UserId,
    pub vendor_id: VendorId,
}

/// Handler for the idempotent conversation lookup-or-insert.
pub struct StartConversationHandler {
    conversation_store: Arc<dyn ConversationStore>,
}

impl StartConversationHandler {
    pub fn new(conversation_store: Arc<dyn ConversationStore>) -> Self {
        Self { conversation_store }
    }

    pub async fn handle(&self, cmd: StartConversationCommand) -> Result<Conversation, ChatError> {
        let conversation = self
            .conversation_store
            .get_or_create(&cmd.user_id, &cmd.vendor_id)
            .await?;
        Ok(conversation)
    }
}
