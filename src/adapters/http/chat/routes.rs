//! HTTP routes for conversation and message endpoints.
//!
//! Mounted by the application under `/api/conversations`.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    list_conversations, list_messages, send_message, start_conversation, ChatHandlers,
};

/// Creates the chat router with all endpoints.
pub fn chat_routes(handlers: ChatHandlers) -> Router {
    Router::new()
        .route("/", post(start_conversation))
        .route("/", get(list_conversations))
        .route("/:id/messages", get(list_messages))
        .route("/:id/messages", post(send_message))
        .with_state(handlers)
}
