use std::fmt;

use rust_decimal::Decimal;

use crate::domain::menu_item::MenuItemRef;
use crate::errors::DomainError;
use crate::records::OrderLineRecord;

/// One line of an order: a shared catalog item and how many of it.
#[derive(Clone, Debug)]
pub struct OrderItem {
    item: MenuItemRef,
    quantity: u32,
}

impl OrderItem {
    pub fn new(item: MenuItemRef, quantity: u32) -> Result<Self, DomainError> {
        validate_quantity(quantity)?;
        Ok(Self { item, quantity })
    }

    pub fn item(&self) -> &MenuItemRef {
        &self.item
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn update_quantity(&mut self, new_quantity: u32) -> Result<(), DomainError> {
        validate_quantity(new_quantity)?;
        self.quantity = new_quantity;
        Ok(())
    }

    /// Current item price times quantity; never cached.
    pub fn subtotal(&self) -> Decimal {
        self.item.price().saturating_mul(Decimal::from(self.quantity))
    }

    pub fn to_record(&self) -> OrderLineRecord {
        OrderLineRecord {
            item: self.item.borrow().to_record(),
            quantity: self.quantity,
            subtotal: self.subtotal(),
        }
    }
}

impl fmt::Display for OrderItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} -> ${:.2}", self.quantity, self.item.borrow().name(), self.subtotal())
    }
}

pub(crate) fn validate_quantity(quantity: u32) -> Result<(), DomainError> {
    if quantity < 1 {
        return Err(DomainError::validation("quantity must be at least 1"));
    }
    Ok(())
}
