//! Chat command and query handlers.

mod list_conversations;
mod list_messages;
mod send_message;
mod start_conversation;

pub use list_conversations::{ListConversationsHandler, ListConversationsQuery};
pub use list_messages::{ListMessagesHandler, ListMessagesQuery};
pub use send_message::{SendMessageCommand, SendMessageHandler};
pub use start_conversation::{StartConversationCommand, StartConversationHandler};
