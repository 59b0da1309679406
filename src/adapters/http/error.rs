//! Standard error body for the REST surface.
//!
//! Every failed request renders as `{code, message}`, with the code taken
//! from the domain error taxonomy so clients can branch without parsing
//! message text.

use axum::http::StatusCode;
use serde::Serialize;

use crate::domain::foundation::ErrorCode;

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }

    /// Ad-hoc 400 for request-shape problems caught before the domain.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }
}

/// HTTP status for a domain error code.
///
/// Kept in one place so every resource renders the same code the same way.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::BookingNotFound
        | ErrorCode::ConversationNotFound
        | ErrorCode::VendorNotFound => StatusCode::NOT_FOUND,
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat
        | ErrorCode::SlotUnavailable
        | ErrorCode::InvalidMenuItem
        | ErrorCode::InvalidStateTransition => StatusCode::BAD_REQUEST,
        ErrorCode::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_the_domain_code_string() {
        let error = ErrorResponse::new(ErrorCode::SlotUnavailable, "Slot 14:00 is taken");
        assert_eq!(error.code, "SLOT_UNAVAILABLE");
        assert_eq!(error.message, "Slot 14:00 is taken");
    }

    #[test]
    fn bad_request_uses_the_validation_code() {
        let error = ErrorResponse::bad_request("Invalid booking ID");
        assert_eq!(error.code, "VALIDATION_FAILED");
    }

    #[test]
    fn serializes_to_code_and_message() {
        let error = ErrorResponse::new(ErrorCode::Forbidden, "Permission denied");
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, r#"{"code":"FORBIDDEN","message":"Permission denied"}"#);
    }

    #[test]
    fn status_mapping_covers_the_main_classes() {
        assert_eq!(status_for(ErrorCode::BookingNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::VendorNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorCode::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorCode::SlotUnavailable), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(ErrorCode::InvalidStateTransition),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(ErrorCode::StorageUnavailable),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(ErrorCode::DatabaseError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
