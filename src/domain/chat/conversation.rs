//! Conversation aggregate entity.
//!
//! A conversation is the unique channel between one user and one vendor.
//! It does not own its messages; those are appended and queried through the
//! conversation store, keyed by conversation ID.

use crate::domain::foundation::{
    ConversationId, DomainError, ErrorCode, Party, PartyRole, Timestamp, UserId, VendorId,
};

/// Conversation aggregate - the unique (user, vendor) chat channel.
///
/// # Invariants
///
/// - At most one conversation exists per (user, vendor) pair
/// - Only the two parties may read or write it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    /// Unique identifier for this conversation.
    id: ConversationId,

    /// User side of the channel.
    user_id: UserId,

    /// Vendor side of the channel.
    vendor_id: VendorId,

    /// When the conversation was created.
    created_at: Timestamp,

    /// When a message was last sent.
    last_activity: Timestamp,
}

impl Conversation {
    /// Create a new conversation between a user and a vendor.
    pub fn new(id: ConversationId, user_id: UserId, vendor_id: VendorId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            user_id,
            vendor_id,
            created_at: now,
            last_activity: now,
        }
    }

    /// Reconstitute a conversation from persistence.
    pub fn reconstitute(
        id: ConversationId,
        user_id: UserId,
        vendor_id: VendorId,
        created_at: Timestamp,
        last_activity: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            vendor_id,
            created_at,
            last_activity,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the conversation ID.
    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    /// Returns the user side of the channel.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the vendor side of the channel.
    pub fn vendor_id(&self) -> &VendorId {
        &self.vendor_id
    }

    /// Returns when the conversation was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when a message was last sent.
    pub fn last_activity(&self) -> &Timestamp {
        &self.last_activity
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates that the requester is one of the two parties, returning
    /// which side they are on.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the requester is neither the user nor the vendor
    pub fn authorize_party(&self, requester: &Party) -> Result<PartyRole, DomainError> {
        match requester {
            Party::User(user_id) if user_id == &self.user_id => Ok(PartyRole::User),
            Party::Vendor(vendor_id) if vendor_id == &self.vendor_id => Ok(PartyRole::Vendor),
            _ => Err(DomainError::new(
                ErrorCode::Forbidden,
                "Requester is not a party to this conversation",
            )),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Record message activity now.
    pub fn touch(&mut self) {
        self.last_activity = Timestamp::now();
    }
}
