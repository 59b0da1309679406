//! Requester identity for booking and chat operations.
//!
//! Every mutating operation is performed by exactly one party: a customer
//! account or a vendor account. The party carries both the role and the
//! strongly-typed identifier, so authorization checks cannot mix the two
//! identifier spaces.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{UserId, VendorId};

/// Which side of the marketplace a party acts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyRole {
    User,
    Vendor,
}

impl PartyRole {
    /// Returns the opposite role.
    pub fn other(&self) -> PartyRole {
        match self {
            PartyRole::User => PartyRole::Vendor,
            PartyRole::Vendor => PartyRole::User,
        }
    }
}

impl fmt::Display for PartyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PartyRole::User => "user",
            PartyRole::Vendor => "vendor",
        };
        write!(f, "{}", s)
    }
}

/// An authenticated requester: either a customer or a vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Party {
    User(UserId),
    Vendor(VendorId),
}

impl Party {
    /// Returns the role of this party.
    pub fn role(&self) -> PartyRole {
        match self {
            Party::User(_) => PartyRole::User,
            Party::Vendor(_) => PartyRole::Vendor,
        }
    }

    /// Returns the untyped identifier, for persistence and wire payloads.
    pub fn as_uuid(&self) -> &Uuid {
        match self {
            Party::User(id) => id.as_uuid(),
            Party::Vendor(id) => id.as_uuid(),
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::User(id) => write!(f, "user:{}", id),
            Party::Vendor(id) => write!(f, "vendor:{}", id),
        }
    }
}

impl From<UserId> for Party {
    fn from(id: UserId) -> Self {
        Party::User(id)
    }
}

impl From<VendorId> for Party {
    fn from(id: VendorId) -> Self {
        Party::Vendor(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn party_role_other_flips_sides() {
        assert_eq!(PartyRole::User.other(), PartyRole::Vendor);
        assert_eq!(PartyRole::Vendor.other(), PartyRole::User);
    }

    #[test]
    fn party_role_serializes_to_snake_case() {
        assert_eq!(serde_json::to_string(&PartyRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&PartyRole::Vendor).unwrap(),
            "\"vendor\""
        );
    }

    #[test]
    fn party_role_deserializes_from_snake_case() {
        let role: PartyRole = serde_json::from_str("\"vendor\"").unwrap();
        assert_eq!(role, PartyRole::Vendor);
    }

    #[test]
    fn party_reports_its_role() {
        assert_eq!(Party::User(UserId::new()).role(), PartyRole::User);
        assert_eq!(Party::Vendor(VendorId::new()).role(), PartyRole::Vendor);
    }

    #[test]
    fn party_as_uuid_matches_inner_id() {
        let user_id = UserId::new();
        let party = Party::User(user_id);
        assert_eq!(party.as_uuid(), user_id.as_uuid());
    }

    #[test]
    fn party_display_includes_role_prefix() {
        let vendor_id = VendorId::new();
        let display = format!("{}", Party::Vendor(vendor_id));
        assert!(display.starts_with("vendor:"));
        assert!(display.contains(&vendor_id.to_string()));
    }

    #[test]
    fn party_converts_from_typed_ids() {
        let user_id = UserId::new();
        let party: Party = user_id.into();
        assert_eq!(party, Party::User(user_id));
    }
}
