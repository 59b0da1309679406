//! Identity extractors for axum.
//!
//! The API gateway in front of this service authenticates callers and
//! forwards the verified identity in plain headers; this core never mints
//! or verifies tokens itself.
//!
//! - `x-user-id` - the customer account UUID
//! - `x-vendor-id` - the vendor account UUID
//!
//! Handlers pick the extractor matching who may call them:
//! - `RequireUser` - customer-only endpoints
//! - `RequireVendor` - vendor-only endpoints
//! - `RequireParty` - endpoints both sides use (user header wins if both
//!   are present)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{Party, UserId, VendorId};

/// Header carrying the authenticated customer ID.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the authenticated vendor ID.
pub const VENDOR_ID_HEADER: &str = "x-vendor-id";

/// Extractor that requires a customer identity.
#[derive(Debug, Clone)]
pub struct RequireUser(pub UserId);

impl<S> axum::extract::FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            header_id(parts, USER_ID_HEADER)?
                .map(RequireUser)
                .ok_or(IdentityRejection::Missing)
        })
    }
}

/// Extractor that requires a vendor identity.
#[derive(Debug, Clone)]
pub struct RequireVendor(pub VendorId);

impl<S> axum::extract::FromRequestParts<S> for RequireVendor
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            header_id(parts, VENDOR_ID_HEADER)?
                .map(RequireVendor)
                .ok_or(IdentityRejection::Missing)
        })
    }
}

/// Extractor that accepts either side of the marketplace.
#[derive(Debug, Clone)]
pub struct RequireParty(pub Party);

impl<S> axum::extract::FromRequestParts<S> for RequireParty
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            if let Some(user_id) = header_id::<UserId>(parts, USER_ID_HEADER)? {
                return Ok(RequireParty(Party::User(user_id)));
            }
            if let Some(vendor_id) = header_id::<VendorId>(parts, VENDOR_ID_HEADER)? {
                return Ok(RequireParty(Party::Vendor(vendor_id)));
            }
            Err(IdentityRejection::Missing)
        })
    }
}

/// Parse one identity header, if present.
fn header_id<T: std::str::FromStr>(
    parts: &axum::http::request::Parts,
    header: &str,
) -> Result<Option<T>, IdentityRejection> {
    let Some(value) = parts.headers.get(header) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Some)
        .ok_or(IdentityRejection::Invalid)
}

/// Rejection type for identity failures.
#[derive(Debug, Clone)]
pub enum IdentityRejection {
    /// No identity header was provided.
    Missing,

    /// An identity header was present but not a valid UUID.
    Invalid,
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        let message = match self {
            IdentityRejection::Missing => "Identity required",
            IdentityRejection::Invalid => "Invalid identity header",
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": message,
                "code": "UNAUTHENTICATED"
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    fn parts_with_header(header: &str, value: &str) -> axum::http::request::Parts {
        let request: Request<()> = Request::builder()
            .uri("/test")
            .header(header, value)
            .body(())
            .unwrap();
        request.into_parts().0
    }

    fn bare_parts() -> axum::http::request::Parts {
        let request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        request.into_parts().0
    }

    #[tokio::test]
    async fn require_user_reads_the_header() {
        let user_id = UserId::new();
        let mut parts = parts_with_header(USER_ID_HEADER, &user_id.to_string());

        let RequireUser(extracted) = RequireUser::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(extracted, user_id);
    }

    #[tokio::test]
    async fn require_user_fails_without_header() {
        let mut parts = bare_parts();

        let result = RequireUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(IdentityRejection::Missing)));
    }

    #[tokio::test]
    async fn require_user_rejects_malformed_uuid() {
        let mut parts = parts_with_header(USER_ID_HEADER, "not-a-uuid");

        let result = RequireUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(IdentityRejection::Invalid)));
    }

    #[tokio::test]
    async fn require_vendor_reads_its_own_header() {
        let vendor_id = VendorId::new();
        let mut parts = parts_with_header(VENDOR_ID_HEADER, &vendor_id.to_string());

        let RequireVendor(extracted) = RequireVendor::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(extracted, vendor_id);
    }

    #[tokio::test]
    async fn require_party_accepts_either_side() {
        let user_id = UserId::new();
        let mut parts = parts_with_header(USER_ID_HEADER, &user_id.to_string());
        let RequireParty(party) = RequireParty::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(party, Party::User(user_id));

        let vendor_id = VendorId::new();
        let mut parts = parts_with_header(VENDOR_ID_HEADER, &vendor_id.to_string());
        let RequireParty(party) = RequireParty::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(party, Party::Vendor(vendor_id));
    }

    #[tokio::test]
    async fn require_party_fails_with_no_identity() {
        let mut parts = bare_parts();

        let result = RequireParty::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(IdentityRejection::Missing)));
    }

    #[test]
    fn identity_rejection_returns_401() {
        let response = IdentityRejection::Missing.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
