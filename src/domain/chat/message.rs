//! Message entity - one chat message within a conversation.

use crate::domain::foundation::{
    ConversationId, DomainError, MessageId, Party, PartyRole, Timestamp, ValidationError,
};

/// Maximum length for a message body.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// A single chat message.
///
/// The sender is recorded as a [`Party`] so the message carries both the
/// sender's ID and which side of the conversation wrote it. Read state is
/// tracked per message and flipped when the other side lists the thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: MessageId,
    conversation_id: ConversationId,
    sender: Party,
    body: String,
    is_read: bool,
    sent_at: Timestamp,
}

impl Message {
    /// Create a new unread message.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the body is empty after trimming
    /// - `OutOfRange` if the body exceeds [`MAX_MESSAGE_LENGTH`]
    pub fn new(
        id: MessageId,
        conversation_id: ConversationId,
        sender: Party,
        body: String,
    ) -> Result<Self, DomainError> {
        let body = body.trim().to_string();
        if body.is_empty() {
            return Err(ValidationError::empty_field("body").into());
        }
        if body.len() > MAX_MESSAGE_LENGTH {
            return Err(ValidationError::out_of_range(
                "body",
                1,
                MAX_MESSAGE_LENGTH as i64,
                body.len() as i64,
            )
            .into());
        }
        Ok(Self {
            id,
            conversation_id,
            sender,
            body,
            is_read: false,
            sent_at: Timestamp::now(),
        })
    }

    /// Reconstitute a message from persistence.
    pub fn reconstitute(
        id: MessageId,
        conversation_id: ConversationId,
        sender: Party,
        body: String,
        is_read: bool,
        sent_at: Timestamp,
    ) -> Self {
        Self {
            id,
            conversation_id,
            sender,
            body,
            is_read,
            sent_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the message ID.
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// Returns the conversation this message belongs to.
    pub fn conversation_id(&self) -> &ConversationId {
        &self.conversation_id
    }

    /// Returns the sending party.
    pub fn sender(&self) -> &Party {
        &self.sender
    }

    /// Returns which side of the conversation wrote this message.
    pub fn sender_role(&self) -> PartyRole {
        self.sender.role()
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns whether the other side has read this message.
    pub fn is_read(&self) -> bool {
        self.is_read
    }

    /// Returns when the message was sent.
    pub fn sent_at(&self) -> &Timestamp {
        &self.sent_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Mark the message as read.
    pub fn mark_read(&mut self) {
        self.is_read = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    #[test]
    fn new_message_starts_unread() {
        let message = Message::new(
            MessageId::new(),
            ConversationId::new(),
            Party::User(UserId::new()),
            "Is the 14:00 slot still open?".to_string(),
        )
        .unwrap();
        assert!(!message.is_read());
        assert_eq!(message.sender_role(), PartyRole::User);
    }

    #[test]
    fn new_message_trims_body() {
        let message = Message::new(
            MessageId::new(),
            ConversationId::new(),
            Party::User(UserId::new()),
            "  hello  ".to_string(),
        )
        .unwrap();
        assert_eq!(message.body(), "hello");
    }

    #[test]
    fn new_message_rejects_blank_body() {
        let result = Message::new(
            MessageId::new(),
            ConversationId::new(),
            Party::User(UserId::new()),
            "   ".to_string(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_message_rejects_oversized_body() {
        let result = Message::new(
            MessageId::new(),
            ConversationId::new(),
            Party::User(UserId::new()),
            "x".repeat(MAX_MESSAGE_LENGTH + 1),
        );
        assert!(result.is_err());
    }

    #[test]
    fn mark_read_flips_flag() {
        let mut message = Message::new(
            MessageId::new(),
            ConversationId::new(),
            Party::User(UserId::new()),
            "hello".to_string(),
        )
        .unwrap();
        message.mark_read();
        assert!(message.is_read());
    }
}
