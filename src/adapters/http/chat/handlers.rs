//! HTTP handlers for conversation and message endpoints.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::adapters::http::error::{status_for, ErrorResponse};
use crate::adapters::http::middleware::{RequireParty, RequireUser};
use crate::application::handlers::chat::{
    ListConversationsHandler, ListConversationsQuery, ListMessagesHandler, ListMessagesQuery,
    SendMessageCommand, SendMessageHandler, StartConversationCommand, StartConversationHandler,
};
use crate::domain::chat::ChatError;
use crate::domain::foundation::ConversationId;

use super::dto::{
    ConversationListResponse, ConversationResponse, MessageListResponse, MessageResponse,
    SendMessageRequest, StartConversationRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Application handlers the chat routes dispatch to.
#[derive(Clone)]
pub struct ChatHandlers {
    pub start_conversation: Arc<StartConversationHandler>,
    pub send_message: Arc<SendMessageHandler>,
    pub list_messages: Arc<ListMessagesHandler>,
    pub list_conversations: Arc<ListConversationsHandler>,
}

impl ChatHandlers {
    pub fn new(
        start_conversation: Arc<StartConversationHandler>,
        send_message: Arc<SendMessageHandler>,
        list_messages: Arc<ListMessagesHandler>,
        list_conversations: Arc<ListConversationsHandler>,
    ) -> Self {
        Self {
            start_conversation,
            send_message,
            list_messages,
            list_conversations,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/conversations
///
/// Idempotent: opening a channel that already exists returns the existing
/// conversation with a 200.
pub async fn start_conversation(
    State(handlers): State<ChatHandlers>,
    RequireUser(user_id): RequireUser,
    Json(request): Json<StartConversationRequest>,
) -> Response {
    let command = StartConversationCommand {
        user_id,
        vendor_id: request.vendor_id,
    };

    match handlers.start_conversation.handle(command).await {
        Ok(conversation) => {
            (StatusCode::OK, Json(ConversationResponse::from(&conversation))).into_response()
        }
        Err(e) => handle_chat_error(e),
    }
}

/// GET /api/conversations
pub async fn list_conversations(
    State(handlers): State<ChatHandlers>,
    RequireParty(party): RequireParty,
) -> Response {
    let query = ListConversationsQuery { requester: party };

    match handlers.list_conversations.handle(query).await {
        Ok(summaries) => (
            StatusCode::OK,
            Json(ConversationListResponse::from_summaries(&summaries)),
        )
            .into_response(),
        Err(e) => handle_chat_error(e),
    }
}

/// GET /api/conversations/:id/messages
///
/// Reading the thread marks the other side's messages as read.
pub async fn list_messages(
    State(handlers): State<ChatHandlers>,
    RequireParty(party): RequireParty,
    Path(conversation_id): Path<String>,
) -> Response {
    let conversation_id = match parse_conversation_id(&conversation_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = ListMessagesQuery {
        conversation_id,
        requester: party,
    };

    match handlers.list_messages.handle(query).await {
        Ok(messages) => (
            StatusCode::OK,
            Json(MessageListResponse::from_messages(&messages)),
        )
            .into_response(),
        Err(e) => handle_chat_error(e),
    }
}

/// POST /api/conversations/:id/messages
pub async fn send_message(
    State(handlers): State<ChatHandlers>,
    RequireParty(party): RequireParty,
    Path(conversation_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Response {
    let conversation_id = match parse_conversation_id(&conversation_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let command = SendMessageCommand {
        conversation_id,
        sender: party,
        body: request.body,
    };

    match handlers.send_message.handle(command).await {
        Ok(message) => {
            (StatusCode::CREATED, Json(MessageResponse::from(&message))).into_response()
        }
        Err(e) => handle_chat_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_conversation_id(raw: &str) -> Result<ConversationId, Response> {
    ConversationId::from_str(raw).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid conversation ID")),
        )
            .into_response()
    })
}

fn handle_chat_error(error: ChatError) -> Response {
    let status = status_for(error.code());

    if status.is_server_error() {
        tracing::error!(code = %error.code(), "Chat request failed: {}", error.message());
    }

    (status, Json(ErrorResponse::new(error.code(), error.message()))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::VendorId;

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_chat_error(ChatError::NotFound(ConversationId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn vendor_not_found_maps_to_404() {
        let response = handle_chat_error(ChatError::VendorNotFound(VendorId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let response = handle_chat_error(ChatError::Forbidden);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn validation_maps_to_400() {
        let response = handle_chat_error(ChatError::validation("body", "must not be empty"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unavailable_maps_to_503() {
        let response = handle_chat_error(ChatError::Unavailable("pool timeout".into()));
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn conversation_id_parse_rejects_garbage() {
        assert!(parse_conversation_id("not-a-uuid").is_err());
        assert!(parse_conversation_id(&ConversationId::new().to_string()).is_ok());
    }
}
