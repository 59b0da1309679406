//! Booking-specific error types.

use chrono::NaiveDate;

use crate::domain::foundation::{BookingId, DomainError, ErrorCode, MenuItemId, ValidationError};
use crate::domain::scheduling::Slot;

/// Booking-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Booking was not found (or is not visible to the requester).
    NotFound(BookingId),
    /// A requested menu item is unknown, belongs to another vendor, or is
    /// not currently orderable.
    InvalidMenuItem(MenuItemId),
    /// The requested slot is not open on that date.
    SlotUnavailable { date: NaiveDate, slot: Slot },
    /// Requester is not authorized.
    Forbidden,
    /// Invalid status transition.
    InvalidState(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Storage is temporarily unavailable; the caller may retry.
    Unavailable(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl BookingError {
    pub fn not_found(id: BookingId) -> Self {
        BookingError::NotFound(id)
    }
    pub fn invalid_menu_item(id: MenuItemId) -> Self {
        BookingError::InvalidMenuItem(id)
    }
    pub fn slot_unavailable(date: NaiveDate, slot: Slot) -> Self {
        BookingError::SlotUnavailable { date, slot }
    }
    pub fn forbidden() -> Self {
        BookingError::Forbidden
    }
    pub fn invalid_state(message: impl Into<String>) -> Self {
        BookingError::InvalidState(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BookingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn unavailable(message: impl Into<String>) -> Self {
        BookingError::Unavailable(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        BookingError::Infrastructure(message.into())
    }

    /// True for the transient storage class the caller may retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BookingError::Unavailable(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::NotFound(_) => ErrorCode::BookingNotFound,
            BookingError::InvalidMenuItem(_) => ErrorCode::InvalidMenuItem,
            BookingError::SlotUnavailable { .. } => ErrorCode::SlotUnavailable,
            BookingError::Forbidden => ErrorCode::Forbidden,
            BookingError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            BookingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            BookingError::Unavailable(_) => ErrorCode::StorageUnavailable,
            BookingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            BookingError::NotFound(id) => format!("Booking not found: {}", id),
            BookingError::InvalidMenuItem(id) => {
                format!("Unknown or unavailable menu item: {}", id)
            }
            BookingError::SlotUnavailable { date, slot } => {
                format!("Slot {} on {} is not available", slot, date)
            }
            BookingError::Forbidden => "Permission denied".to_string(),
            BookingError::InvalidState(msg) => format!("Invalid state: {}", msg),
            BookingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            BookingError::Unavailable(msg) => {
                format!("Storage temporarily unavailable: {}", msg)
            }
            BookingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BookingError {}

impl From<ValidationError> for BookingError {
    fn from(err: ValidationError) -> Self {
        BookingError::from(DomainError::from(err))
    }
}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => BookingError::Forbidden,
            ErrorCode::InvalidStateTransition => BookingError::InvalidState(err.to_string()),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => BookingError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.to_string(),
            },
            _ => BookingError::Infrastructure(err.to_string()),
        }
    }
}
