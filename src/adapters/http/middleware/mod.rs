//! HTTP middleware for axum.
//!
//! This module contains middleware layers for cross-cutting concerns:
//!
//! - `identity` - Gateway-supplied identity extractors

pub mod identity;

pub use identity::{
    IdentityRejection, RequireParty, RequireUser, RequireVendor, USER_ID_HEADER, VENDOR_ID_HEADER,
};
