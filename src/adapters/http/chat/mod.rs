//! HTTP adapter for conversation and message endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ConversationListResponse, ConversationResponse, ConversationSummaryResponse,
    MessageListResponse, MessageResponse, SendMessageRequest, StartConversationRequest,
};
pub use handlers::ChatHandlers;
pub use routes::chat_routes;
