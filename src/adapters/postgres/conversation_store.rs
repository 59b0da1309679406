//! PostgreSQL implementation of ConversationStore.
//!
//! Conversations are unique per (user, vendor); `get_or_create` leans on
//! the unique constraint with an upsert read-back so concurrent starts
//! converge on one row. Message appends and read-marking run inside
//! transactions with the rows they must stay consistent with.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::chat::{Conversation, Message};
use crate::domain::foundation::{
    ConversationId, MessageId, Party, PartyRole, Timestamp, UserId, VendorId,
};
use crate::ports::{ConversationStore, ConversationStoreError, ConversationSummary};

use super::slot_ledger::classify_sqlx_error;

/// PostgreSQL implementation of ConversationStore.
#[derive(Clone)]
pub struct PgConversationStore {
    pool: PgPool,
}

impl PgConversationStore {
    /// Creates a new PgConversationStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationStore for PgConversationStore {
    async fn get_or_create(
        &self,
        user_id: &UserId,
        vendor_id: &VendorId,
    ) -> Result<Conversation, ConversationStoreError> {
        let candidate = Conversation::new(ConversationId::new(), *user_id, *vendor_id);

        // The no-op DO UPDATE makes RETURNING yield the surviving row for
        // both the insert and the conflict case
        let row = sqlx::query(
            r#"
            INSERT INTO conversations (id, user_id, vendor_id, created_at, last_activity)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, vendor_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, vendor_id, created_at, last_activity
            "#,
        )
        .bind(candidate.id().as_uuid())
        .bind(user_id.as_uuid())
        .bind(vendor_id.as_uuid())
        .bind(candidate.created_at().as_datetime())
        .bind(candidate.last_activity().as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("conversations_vendor_id_fkey") {
                    return ConversationStoreError::VendorNotFound(*vendor_id);
                }
            }
            storage_error("Failed to get or create conversation", e)
        })?;

        row_to_conversation(row)
    }

    async fn find_by_id(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, ConversationStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, vendor_id, created_at, last_activity
            FROM conversations
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to fetch conversation", e))?;

        row.map(row_to_conversation).transpose()
    }

    async fn append_message(&self, message: &Message) -> Result<(), ConversationStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("Failed to begin message transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO messages (id, conversation_id, sender_id, sender_role, body, is_read, sent_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(message.id().as_uuid())
        .bind(message.conversation_id().as_uuid())
        .bind(message.sender().as_uuid())
        .bind(message.sender_role().to_string())
        .bind(message.body())
        .bind(message.is_read())
        .bind(message.sent_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("messages_conversation_id_fkey") {
                    return ConversationStoreError::NotFound(*message.conversation_id());
                }
            }
            storage_error("Failed to insert message", e)
        })?;

        let result = sqlx::query(
            r#"
            UPDATE conversations SET last_activity = $2 WHERE id = $1
            "#,
        )
        .bind(message.conversation_id().as_uuid())
        .bind(message.sent_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| storage_error("Failed to bump conversation activity", e))?;

        if result.rows_affected() == 0 {
            return Err(ConversationStoreError::NotFound(*message.conversation_id()));
        }

        tx.commit()
            .await
            .map_err(|e| storage_error("Failed to commit message transaction", e))
    }

    async fn list_messages_marking_read(
        &self,
        conversation_id: &ConversationId,
        reader_role: PartyRole,
    ) -> Result<Vec<Message>, ConversationStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("Failed to begin read transaction", e))?;

        // Everything the other side wrote is read the moment it is listed
        sqlx::query(
            r#"
            UPDATE messages SET is_read = TRUE
            WHERE conversation_id = $1 AND sender_role <> $2 AND is_read = FALSE
            "#,
        )
        .bind(conversation_id.as_uuid())
        .bind(reader_role.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| storage_error("Failed to mark messages read", e))?;

        let rows = sqlx::query(
            r#"
            SELECT id, conversation_id, sender_id, sender_role, body, is_read, sent_at
            FROM messages
            WHERE conversation_id = $1
            ORDER BY sent_at ASC
            "#,
        )
        .bind(conversation_id.as_uuid())
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| storage_error("Failed to fetch messages", e))?;

        tx.commit()
            .await
            .map_err(|e| storage_error("Failed to commit read transaction", e))?;

        rows.into_iter().map(row_to_message).collect()
    }

    async fn list_for_party(
        &self,
        party: &Party,
    ) -> Result<Vec<ConversationSummary>, ConversationStoreError> {
        let rows = match party {
            Party::User(user_id) => {
                sqlx::query(LIST_FOR_USER_SQL)
                    .bind(user_id.as_uuid())
                    .bind(party.role().to_string())
                    .fetch_all(&self.pool)
                    .await
            }
            Party::Vendor(vendor_id) => {
                sqlx::query(LIST_FOR_VENDOR_SQL)
                    .bind(vendor_id.as_uuid())
                    .bind(party.role().to_string())
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| storage_error("Failed to fetch conversations", e))?;

        rows.into_iter().map(row_to_summary).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

const LIST_FOR_USER_SQL: &str = r#"
    SELECT c.id, c.user_id, c.vendor_id, c.created_at, c.last_activity,
           COUNT(m.id) FILTER (WHERE m.sender_role <> $2 AND m.is_read = FALSE) AS unread_count
    FROM conversations c
    LEFT JOIN messages m ON m.conversation_id = c.id
    WHERE c.user_id = $1
    GROUP BY c.id, c.user_id, c.vendor_id, c.created_at, c.last_activity
    ORDER BY c.last_activity DESC
"#;

const LIST_FOR_VENDOR_SQL: &str = r#"
    SELECT c.id, c.user_id, c.vendor_id, c.created_at, c.last_activity,
           COUNT(m.id) FILTER (WHERE m.sender_role <> $2 AND m.is_read = FALSE) AS unread_count
    FROM conversations c
    LEFT JOIN messages m ON m.conversation_id = c.id
    WHERE c.vendor_id = $1
    GROUP BY c.id, c.user_id, c.vendor_id, c.created_at, c.last_activity
    ORDER BY c.last_activity DESC
"#;

fn row_to_conversation(
    row: sqlx::postgres::PgRow,
) -> Result<Conversation, ConversationStoreError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| ConversationStoreError::Database(format!("Failed to get id: {}", e)))?;

    let user_id: Uuid = row
        .try_get("user_id")
        .map_err(|e| ConversationStoreError::Database(format!("Failed to get user_id: {}", e)))?;

    let vendor_id: Uuid = row
        .try_get("vendor_id")
        .map_err(|e| ConversationStoreError::Database(format!("Failed to get vendor_id: {}", e)))?;

    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| ConversationStoreError::Database(format!("Failed to get created_at: {}", e)))?;

    let last_activity: chrono::DateTime<chrono::Utc> = row.try_get("last_activity").map_err(|e| {
        ConversationStoreError::Database(format!("Failed to get last_activity: {}", e))
    })?;

    Ok(Conversation::reconstitute(
        ConversationId::from_uuid(id),
        UserId::from_uuid(user_id),
        VendorId::from_uuid(vendor_id),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(last_activity),
    ))
}

fn row_to_summary(row: sqlx::postgres::PgRow) -> Result<ConversationSummary, ConversationStoreError> {
    let unread_count: i64 = row.try_get("unread_count").map_err(|e| {
        ConversationStoreError::Database(format!("Failed to get unread_count: {}", e))
    })?;

    Ok(ConversationSummary {
        conversation: row_to_conversation(row)?,
        unread_count,
    })
}

fn row_to_message(row: sqlx::postgres::PgRow) -> Result<Message, ConversationStoreError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| ConversationStoreError::Database(format!("Failed to get id: {}", e)))?;

    let conversation_id: Uuid = row.try_get("conversation_id").map_err(|e| {
        ConversationStoreError::Database(format!("Failed to get conversation_id: {}", e))
    })?;

    let sender_id: Uuid = row
        .try_get("sender_id")
        .map_err(|e| ConversationStoreError::Database(format!("Failed to get sender_id: {}", e)))?;

    let sender_role: String = row.try_get("sender_role").map_err(|e| {
        ConversationStoreError::Database(format!("Failed to get sender_role: {}", e))
    })?;
    let sender = str_to_party(&sender_role, sender_id)?;

    let body: String = row
        .try_get("body")
        .map_err(|e| ConversationStoreError::Database(format!("Failed to get body: {}", e)))?;

    let is_read: bool = row
        .try_get("is_read")
        .map_err(|e| ConversationStoreError::Database(format!("Failed to get is_read: {}", e)))?;

    let sent_at: chrono::DateTime<chrono::Utc> = row
        .try_get("sent_at")
        .map_err(|e| ConversationStoreError::Database(format!("Failed to get sent_at: {}", e)))?;

    Ok(Message::reconstitute(
        MessageId::from_uuid(id),
        ConversationId::from_uuid(conversation_id),
        sender,
        body,
        is_read,
        Timestamp::from_datetime(sent_at),
    ))
}

fn str_to_party(role: &str, id: Uuid) -> Result<Party, ConversationStoreError> {
    match role {
        "user" => Ok(Party::User(UserId::from_uuid(id))),
        "vendor" => Ok(Party::Vendor(VendorId::from_uuid(id))),
        other => Err(ConversationStoreError::Database(format!(
            "Invalid sender role: {}",
            other
        ))),
    }
}

fn storage_error(context: &str, e: sqlx::Error) -> ConversationStoreError {
    if classify_sqlx_error(&e) {
        ConversationStoreError::Unavailable(format!("{}: {}", context, e))
    } else {
        ConversationStoreError::Database(format!("{}: {}", context, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_role_conversion_round_trips() {
        let id = Uuid::new_v4();

        let user = str_to_party("user", id).unwrap();
        assert_eq!(user.role().to_string(), "user");

        let vendor = str_to_party("vendor", id).unwrap();
        assert_eq!(vendor.role().to_string(), "vendor");
    }

    #[test]
    fn str_to_party_rejects_invalid_role() {
        assert!(str_to_party("moderator", Uuid::new_v4()).is_err());
    }
}
