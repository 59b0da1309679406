//! HTTP DTOs for conversation and message endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::chat::{Conversation, Message};
use crate::domain::foundation::VendorId;
use crate::ports::ConversationSummary;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to open (or return) the conversation with a vendor.
#[derive(Debug, Clone, Deserialize)]
pub struct StartConversationRequest {
    pub vendor_id: VendorId,
}

/// Request to post a message.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub body: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One conversation channel.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationResponse {
    pub id: String,
    pub user_id: String,
    pub vendor_id: String,
    pub created_at: String,
    pub last_activity: String,
}

impl From<&Conversation> for ConversationResponse {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id().to_string(),
            user_id: conversation.user_id().to_string(),
            vendor_id: conversation.vendor_id().to_string(),
            created_at: conversation.created_at().to_rfc3339(),
            last_activity: conversation.last_activity().to_rfc3339(),
        }
    }
}

/// One inbox entry: the conversation plus its unread count.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummaryResponse {
    pub id: String,
    pub user_id: String,
    pub vendor_id: String,
    pub created_at: String,
    pub last_activity: String,
    pub unread_count: i64,
}

impl From<&ConversationSummary> for ConversationSummaryResponse {
    fn from(summary: &ConversationSummary) -> Self {
        let conversation = ConversationResponse::from(&summary.conversation);
        Self {
            id: conversation.id,
            user_id: conversation.user_id,
            vendor_id: conversation.vendor_id,
            created_at: conversation.created_at,
            last_activity: conversation.last_activity,
            unread_count: summary.unread_count,
        }
    }
}

/// Response for listing a party's conversations.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationListResponse {
    pub conversations: Vec<ConversationSummaryResponse>,
}

impl ConversationListResponse {
    pub fn from_summaries(summaries: &[ConversationSummary]) -> Self {
        Self {
            conversations: summaries
                .iter()
                .map(ConversationSummaryResponse::from)
                .collect(),
        }
    }
}

/// One chat message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub sender_role: String,
    pub body: String,
    pub is_read: bool,
    pub sent_at: String,
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id().to_string(),
            conversation_id: message.conversation_id().to_string(),
            sender_id: message.sender().as_uuid().to_string(),
            sender_role: message.sender_role().to_string(),
            body: message.body().to_string(),
            is_read: message.is_read(),
            sent_at: message.sent_at().to_rfc3339(),
        }
    }
}

/// Response for listing a conversation's messages, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct MessageListResponse {
    pub messages: Vec<MessageResponse>,
}

impl MessageListResponse {
    pub fn from_messages(messages: &[Message]) -> Self {
        Self {
            messages: messages.iter().map(MessageResponse::from).collect(),
        }
    }
}
