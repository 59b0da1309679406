//! SendMessageHandler - Command handler for posting a chat message.

use std::sync::Arc;

use crate::domain::chat::{ChatError, Message};
use crate::domain::foundation::{ConversationId, MessageId, Party};
use crate::ports::{BroadcastEvent, ConversationStore, EventBroadcaster};

/// Command to post a message into a conversation.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub conversation_id: ConversationId,
    pub sender: Party,
    pub body: String,
}

/// Handler for sending messages.
pub struct SendMessageHandler {
    conversation_store: Arc<dyn ConversationStore>,
    broadcaster: Arc<dyn EventBroadcaster>,
}

impl SendMessageHandler {
    pub fn new(
        conversation_store: Arc<dyn ConversationStore>,
        broadcaster: Arc<dyn EventBroadcaster>,
    ) -> Self {
        Self {
            conversation_store,
            broadcaster,
        }
    }

    pub async fn handle(&self, cmd: SendMessageCommand) -> Result<Message, ChatError> {
        // 1. Load the conversation and check the sender is a party
        let conversation = self
            .conversation_store
            .find_by_id(&cmd.conversation_id)
            .await?
            .ok_or(ChatError::NotFound(cmd.conversation_id))?;
        conversation.authorize_party(&cmd.sender)?;

        // 2. Validate and persist; the store bumps last activity in the
        //    same transaction
        let message = Message::new(MessageId::new(), cmd.conversation_id, cmd.sender, cmd.body)?;
        self.conversation_store.append_message(&message).await?;

        // 3. Fan out, fire-and-forget; the count is diagnostics only
        let delivered = self
            .broadcaster
            .broadcast(BroadcastEvent::MessageSent {
                message: message.clone(),
            })
            .await;
        tracing::debug!(
            conversation_id = %cmd.conversation_id,
            delivered,
            "published new message event"
        );

        Ok(message)
    }
}
