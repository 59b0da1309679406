//! BookingItem - a priced line item within a booking.

use rust_decimal::Decimal;

use crate::domain::foundation::{BookingItemId, DomainError, MenuItemId, ValidationError};

/// Maximum quantity for a single line item.
pub const MAX_ITEM_QUANTITY: u32 = 1000;

/// A menu selection within a booking.
///
/// The unit price is snapshotted from the menu item at booking time and is
/// never recomputed, so later menu edits cannot change a committed total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingItem {
    id: BookingItemId,
    menu_item_id: MenuItemId,
    quantity: u32,
    unit_price: Decimal,
}

impl BookingItem {
    /// Creates a line item, snapshotting the given unit price.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if quantity is zero or above [`MAX_ITEM_QUANTITY`]
    /// - `InvalidFormat` if the unit price is negative
    pub fn new(
        id: BookingItemId,
        menu_item_id: MenuItemId,
        quantity: u32,
        unit_price: Decimal,
    ) -> Result<Self, DomainError> {
        if quantity == 0 || quantity > MAX_ITEM_QUANTITY {
            return Err(ValidationError::out_of_range(
                "quantity",
                1,
                MAX_ITEM_QUANTITY as i64,
                quantity as i64,
            )
            .into());
        }
        if unit_price.is_sign_negative() {
            return Err(
                ValidationError::invalid_format("unit_price", "price cannot be negative").into(),
            );
        }
        Ok(Self {
            id,
            menu_item_id,
            quantity,
            unit_price,
        })
    }

    /// Reconstitutes a line item from persistence.
    pub fn reconstitute(
        id: BookingItemId,
        menu_item_id: MenuItemId,
        quantity: u32,
        unit_price: Decimal,
    ) -> Self {
        Self {
            id,
            menu_item_id,
            quantity,
            unit_price,
        }
    }

    /// Returns the line item ID.
    pub fn id(&self) -> &BookingItemId {
        &self.id
    }

    /// Returns the referenced menu item.
    pub fn menu_item_id(&self) -> &MenuItemId {
        &self.menu_item_id
    }

    /// Returns the ordered quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the unit price snapshotted at booking time.
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Returns quantity times unit price.
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        let item =
            BookingItem::new(BookingItemId::new(), MenuItemId::new(), 2, Decimal::from(50))
                .unwrap();
        assert_eq!(item.line_total(), Decimal::from(100));
    }

    #[test]
    fn line_total_handles_fractional_prices() {
        // 19.99 * 3 = 59.97
        let item =
            BookingItem::new(BookingItemId::new(), MenuItemId::new(), 3, Decimal::new(1999, 2))
                .unwrap();
        assert_eq!(item.line_total(), Decimal::new(5997, 2));
    }

    #[test]
    fn rejects_zero_quantity() {
        let result = BookingItem::new(BookingItemId::new(), MenuItemId::new(), 0, Decimal::from(10));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_excessive_quantity() {
        let result = BookingItem::new(
            BookingItemId::new(),
            MenuItemId::new(),
            MAX_ITEM_QUANTITY + 1,
            Decimal::from(10),
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_negative_price() {
        let result =
            BookingItem::new(BookingItemId::new(), MenuItemId::new(), 1, Decimal::from(-5));
        assert!(result.is_err());
    }

    #[test]
    fn zero_price_is_allowed() {
        let item =
            BookingItem::new(BookingItemId::new(), MenuItemId::new(), 1, Decimal::ZERO).unwrap();
        assert_eq!(item.line_total(), Decimal::ZERO);
    }
}
