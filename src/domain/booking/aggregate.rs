//! Booking aggregate entity.
//!
//! A booking reserves one slot on one date with one vendor and owns its
//! line items. The total is computed once from the item price snapshots
//! and never recomputed afterwards.
//!
//! # Ownership
//!
//! Bookings own their [`BookingItem`]s: items are created and deleted
//! atomically with the booking and are never shared across bookings.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::booking::{BookingItem, BookingStatus};
use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, Party, PartyRole, StateMachine, Timestamp, UserId,
    ValidationError, VendorId,
};
use crate::domain::scheduling::Slot;

/// Maximum length for booking instructions.
pub const MAX_INSTRUCTIONS_LENGTH: usize = 1000;

/// Maximum length for a delivery/event address.
pub const MAX_ADDRESS_LENGTH: usize = 500;

/// Booking aggregate - one reserved slot plus its priced line items.
///
/// # Invariants
///
/// - `items` is non-empty
/// - `total_amount` equals the sum of the item line totals
/// - `status` only changes along the transitions of [`BookingStatus`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// Unique identifier for this booking.
    id: BookingId,

    /// User who placed the booking.
    user_id: UserId,

    /// Vendor being booked.
    vendor_id: VendorId,

    /// Date of the event.
    event_date: NaiveDate,

    /// Slot claimed on that date.
    slot: Slot,

    /// Current lifecycle status.
    status: BookingStatus,

    /// Line items (owned, at least one).
    items: Vec<BookingItem>,

    /// Sum of item line totals, fixed at creation.
    total_amount: Decimal,

    /// Optional free-form instructions from the user.
    instructions: Option<String>,

    /// Optional event address.
    address: Option<String>,

    /// When the booking was created.
    created_at: Timestamp,

    /// When the booking was last updated.
    updated_at: Timestamp,
}

impl Booking {
    /// Create a new pending booking.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if `items` is empty
    /// - `OutOfRange` if instructions or address exceed their limits
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BookingId,
        user_id: UserId,
        vendor_id: VendorId,
        event_date: NaiveDate,
        slot: Slot,
        items: Vec<BookingItem>,
        instructions: Option<String>,
        address: Option<String>,
    ) -> Result<Self, DomainError> {
        if items.is_empty() {
            return Err(DomainError::validation("items", "Booking requires at least one item")
                .with_detail("field", "items"));
        }
        Self::validate_optional_text("instructions", &instructions, MAX_INSTRUCTIONS_LENGTH)?;
        Self::validate_optional_text("address", &address, MAX_ADDRESS_LENGTH)?;

        let total_amount = Self::sum_items(&items);
        let now = Timestamp::now();
        Ok(Self {
            id,
            user_id,
            vendor_id,
            event_date,
            slot,
            status: BookingStatus::Pending,
            items,
            total_amount,
            instructions,
            address,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a booking from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: BookingId,
        user_id: UserId,
        vendor_id: VendorId,
        event_date: NaiveDate,
        slot: Slot,
        status: BookingStatus,
        items: Vec<BookingItem>,
        total_amount: Decimal,
        instructions: Option<String>,
        address: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            vendor_id,
            event_date,
            slot,
            status,
            items,
            total_amount,
            instructions,
            address,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the booking ID.
    pub fn id(&self) -> &BookingId {
        &self.id
    }

    /// Returns the booking user's ID.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the booked vendor's ID.
    pub fn vendor_id(&self) -> &VendorId {
        &self.vendor_id
    }

    /// Returns the event date.
    pub fn event_date(&self) -> NaiveDate {
        self.event_date
    }

    /// Returns the claimed slot.
    pub fn slot(&self) -> &Slot {
        &self.slot
    }

    /// Returns the current status.
    pub fn status(&self) -> BookingStatus {
        self.status
    }

    /// Returns the line items.
    pub fn items(&self) -> &[BookingItem] {
        &self.items
    }

    /// Returns the booking total.
    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    /// Returns the user's instructions, if any.
    pub fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }

    /// Returns the event address, if any.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Returns when the booking was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the booking was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks if the given user placed this booking.
    pub fn is_user_owner(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Checks if the given vendor is the booked vendor.
    pub fn is_vendor_owner(&self, vendor_id: &VendorId) -> bool {
        &self.vendor_id == vendor_id
    }

    /// Validates that the requester is a party to this booking.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the requester is neither the booking user nor the
    ///   booked vendor
    pub fn authorize(&self, requester: &Party) -> Result<(), DomainError> {
        let owns = match requester {
            Party::User(user_id) => self.is_user_owner(user_id),
            Party::Vendor(vendor_id) => self.is_vendor_owner(vendor_id),
        };
        if owns {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Requester is not a party to this booking",
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Status transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates that the requester may move this booking to `new_status`.
    ///
    /// Checks ownership, then the transition table, then which side of the
    /// booking may drive the target status. Does not mutate.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the requester is not a party, or the target status is
    ///   vendor-side only and the requester is the user
    /// - `InvalidStateTransition` if the edge is not in the transition table
    pub fn authorize_transition(
        &self,
        requester: &Party,
        new_status: BookingStatus,
    ) -> Result<(), DomainError> {
        self.authorize(requester)?;
        self.ensure_edge(new_status)?;
        Self::ensure_role_permitted(requester.role(), new_status)
    }

    /// Validates that the booking can still be cancelled.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the booking is in a terminal status
    pub fn ensure_cancellable(&self) -> Result<(), DomainError> {
        self.ensure_edge(BookingStatus::Cancelled)
    }

    /// Apply a status transition, returning the previous status.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the edge is not in the transition table
    pub fn transition_to(&mut self, new_status: BookingStatus) -> Result<BookingStatus, DomainError> {
        self.ensure_edge(new_status)?;
        let previous = self.status;
        self.status = new_status;
        self.updated_at = Timestamp::now();
        Ok(previous)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates the edge against the status transition table.
    fn ensure_edge(&self, new_status: BookingStatus) -> Result<(), DomainError> {
        if self.status.can_transition_to(&new_status) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot transition booking from {} to {}",
                    self.status, new_status
                ),
            ))
        }
    }

    /// Confirmation, rejection and completion are vendor-side moves;
    /// cancellation is open to either party.
    fn ensure_role_permitted(role: PartyRole, new_status: BookingStatus) -> Result<(), DomainError> {
        let permitted = match new_status {
            BookingStatus::Confirmed | BookingStatus::Rejected | BookingStatus::Completed => {
                role == PartyRole::Vendor
            }
            BookingStatus::Cancelled => true,
            BookingStatus::Pending => false,
        };
        if permitted {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                format!("A {} may not set booking status to {}", role, new_status),
            ))
        }
    }

    fn sum_items(items: &[BookingItem]) -> Decimal {
        items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc + item.line_total())
    }

    fn validate_optional_text(
        field: &str,
        value: &Option<String>,
        max: usize,
    ) -> Result<(), DomainError> {
        if let Some(text) = value {
            if text.len() > max {
                return Err(ValidationError::out_of_range(
                    field,
                    0,
                    max as i64,
                    text.len() as i64,
                )
                .into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{BookingItemId, MenuItemId};

    fn test_items() -> Vec<BookingItem> {
        vec![
            BookingItem::new(
                BookingItemId::new(),
                MenuItemId::new(),
                2,
                Decimal::from(50),
            )
            .unwrap(),
            BookingItem::new(
                BookingItemId::new(),
                MenuItemId::new(),
                1,
                Decimal::new(1050, 2),
            )
            .unwrap(),
        ]
    }

    fn test_booking() -> Booking {
        Booking::new(
            BookingId::new(),
            UserId::new(),
            VendorId::new(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            Slot::new("14:00").unwrap(),
            test_items(),
            None,
            None,
        )
        .unwrap()
    }

    #[test]
    fn new_booking_starts_pending_with_summed_total() {
        let booking = test_booking();
        assert_eq!(booking.status(), BookingStatus::Pending);
        // 2 * 50 + 1 * 10.50
        assert_eq!(booking.total_amount(), Decimal::new(11050, 2));
    }

    #[test]
    fn new_booking_rejects_empty_items() {
        let result = Booking::new(
            BookingId::new(),
            UserId::new(),
            VendorId::new(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            Slot::new("14:00").unwrap(),
            Vec::new(),
            None,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_booking_rejects_oversized_instructions() {
        let result = Booking::new(
            BookingId::new(),
            UserId::new(),
            VendorId::new(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            Slot::new("14:00").unwrap(),
            test_items(),
            Some("x".repeat(MAX_INSTRUCTIONS_LENGTH + 1)),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn authorize_accepts_both_parties() {
        let booking = test_booking();
        assert!(booking.authorize(&Party::User(*booking.user_id())).is_ok());
        assert!(booking
            .authorize(&Party::Vendor(*booking.vendor_id()))
            .is_ok());
    }

    #[test]
    fn authorize_rejects_strangers() {
        let booking = test_booking();
        let err = booking.authorize(&Party::User(UserId::new())).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        let err = booking
            .authorize(&Party::Vendor(VendorId::new()))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[test]
    fn vendor_may_confirm_pending_booking() {
        let booking = test_booking();
        let vendor = Party::Vendor(*booking.vendor_id());
        assert!(booking
            .authorize_transition(&vendor, BookingStatus::Confirmed)
            .is_ok());
    }

    #[test]
    fn user_may_not_confirm_own_booking() {
        let booking = test_booking();
        let user = Party::User(*booking.user_id());
        let err = booking
            .authorize_transition(&user, BookingStatus::Confirmed)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[test]
    fn either_party_may_cancel_pending_booking() {
        let booking = test_booking();
        assert!(booking
            .authorize_transition(&Party::User(*booking.user_id()), BookingStatus::Cancelled)
            .is_ok());
        assert!(booking
            .authorize_transition(
                &Party::Vendor(*booking.vendor_id()),
                BookingStatus::Cancelled
            )
            .is_ok());
    }

    #[test]
    fn transition_follows_table() {
        let mut booking = test_booking();
        let previous = booking.transition_to(BookingStatus::Confirmed).unwrap();
        assert_eq!(previous, BookingStatus::Pending);
        assert_eq!(booking.status(), BookingStatus::Confirmed);

        let previous = booking.transition_to(BookingStatus::Completed).unwrap();
        assert_eq!(previous, BookingStatus::Confirmed);
    }

    #[test]
    fn transition_rejects_unlisted_edge() {
        let mut booking = test_booking();
        booking.transition_to(BookingStatus::Confirmed).unwrap();
        booking.transition_to(BookingStatus::Completed).unwrap();

        let err = booking.transition_to(BookingStatus::Pending).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn completed_booking_is_not_cancellable() {
        let mut booking = test_booking();
        booking.transition_to(BookingStatus::Confirmed).unwrap();
        booking.transition_to(BookingStatus::Completed).unwrap();
        assert!(booking.ensure_cancellable().is_err());
    }

    #[test]
    fn pending_and_confirmed_bookings_are_cancellable() {
        let mut booking = test_booking();
        assert!(booking.ensure_cancellable().is_ok());
        booking.transition_to(BookingStatus::Confirmed).unwrap();
        assert!(booking.ensure_cancellable().is_ok());
    }
}
