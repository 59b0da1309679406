//! Chat-specific error types.

use crate::domain::foundation::{ConversationId, DomainError, ErrorCode, ValidationError, VendorId};

/// Chat-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// Conversation was not found.
    NotFound(ConversationId),
    /// Vendor side of a new conversation does not exist.
    VendorNotFound(VendorId),
    /// Requester is not a party to the conversation.
    Forbidden,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Storage is temporarily unavailable; the caller may retry.
    Unavailable(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl ChatError {
    pub fn not_found(id: ConversationId) -> Self {
        ChatError::NotFound(id)
    }
    pub fn vendor_not_found(id: VendorId) -> Self {
        ChatError::VendorNotFound(id)
    }
    pub fn forbidden() -> Self {
        ChatError::Forbidden
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ChatError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn unavailable(message: impl Into<String>) -> Self {
        ChatError::Unavailable(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        ChatError::Infrastructure(message.into())
    }

    /// True for the transient storage class the caller may retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ChatError::Unavailable(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ChatError::NotFound(_) => ErrorCode::ConversationNotFound,
            ChatError::VendorNotFound(_) => ErrorCode::VendorNotFound,
            ChatError::Forbidden => ErrorCode::Forbidden,
            ChatError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ChatError::Unavailable(_) => ErrorCode::StorageUnavailable,
            ChatError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ChatError::NotFound(id) => format!("Conversation not found: {}", id),
            ChatError::VendorNotFound(id) => format!("Vendor not found: {}", id),
            ChatError::Forbidden => "Permission denied".to_string(),
            ChatError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ChatError::Unavailable(msg) => {
                format!("Storage temporarily unavailable: {}", msg)
            }
            ChatError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ChatError {}

impl From<ValidationError> for ChatError {
    fn from(err: ValidationError) -> Self {
        ChatError::from(DomainError::from(err))
    }
}

impl From<DomainError> for ChatError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => ChatError::Forbidden,
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => ChatError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.to_string(),
            },
            _ => ChatError::Infrastructure(err.to_string()),
        }
    }
}
