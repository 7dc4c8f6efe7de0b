use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::key::CatalogKey;
use crate::domain::menu_item::MenuItemRef;
use crate::domain::order_item::{validate_quantity, OrderItem};
use crate::errors::{DomainError, LookupScope};
use crate::records::OrderRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u32);

impl OrderId {
    pub fn new(value: u32) -> Result<Self, DomainError> {
        if value < 1 {
            return Err(DomainError::validation("order_id must be at least 1"));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub(crate) fn first() -> Self {
        Self(1)
    }

    /// The id after this one; fails once the `u32` id space is used up.
    pub(crate) fn next(self) -> Result<Self, DomainError> {
        self.0.checked_add(1).map(Self).ok_or_else(|| {
            DomainError::validation(format!("no order id is available after {self}"))
        })
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Strict parse used for persisted records: only the exact label matches.
    pub fn from_label(label: &str) -> Result<Self, DomainError> {
        [Self::Pending, Self::Completed, Self::Cancelled]
            .into_iter()
            .find(|status| status.label() == label)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "unknown order status `{label}` (expected Pending|Completed|Cancelled)"
                ))
            })
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::validation(format!(
                "unknown order status `{}` (expected Pending|Completed|Cancelled)",
                value.trim()
            ))),
        }
    }
}

/// A customer order: at most one line per catalog key.
#[derive(Clone, Debug)]
pub struct Order {
    id: OrderId,
    status: OrderStatus,
    lines: IndexMap<CatalogKey, OrderItem>,
}

impl Order {
    pub fn new(id: OrderId, status: OrderStatus) -> Self {
        Self { id, status, lines: IndexMap::new() }
    }

    /// Validating constructor for raw ids coming from outside the registry.
    pub fn with_raw_id(order_id: u32, status: OrderStatus) -> Result<Self, DomainError> {
        Ok(Self::new(OrderId::new(order_id)?, status))
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// No transition rules: any status may follow any other.
    pub fn set_status(&mut self, new_status: OrderStatus) {
        self.status = new_status;
    }

    /// Adds `quantity` of `item`, merging into an existing line for the same key.
    pub fn add_item(&mut self, item: &MenuItemRef, quantity: u32) -> Result<(), DomainError> {
        validate_quantity(quantity)?;

        let key = item.key();
        match self.lines.get_mut(&key) {
            Some(line) => {
                let merged = line.quantity().checked_add(quantity).ok_or_else(|| {
                    DomainError::validation(format!("quantity overflow for {key}"))
                })?;
                line.update_quantity(merged)
            }
            None => {
                self.lines.insert(key, OrderItem::new(item.clone(), quantity)?);
                Ok(())
            }
        }
    }

    pub fn change_item_quantity(
        &mut self,
        item: &MenuItemRef,
        new_quantity: u32,
    ) -> Result<(), DomainError> {
        validate_quantity(new_quantity)?;

        let key = item.key();
        match self.lines.get_mut(&key) {
            Some(line) => line.update_quantity(new_quantity),
            None => Err(missing_line(item)),
        }
    }

    pub fn remove_item(&mut self, item: &MenuItemRef) -> Result<(), DomainError> {
        let key = item.key();
        match self.lines.shift_remove(&key) {
            Some(_) => Ok(()),
            None => Err(missing_line(item)),
        }
    }

    pub fn get_item(&self, key: &CatalogKey) -> Option<&OrderItem> {
        self.lines.get(key)
    }

    pub fn items(&self) -> impl Iterator<Item = &OrderItem> {
        self.lines.values()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn total(&self) -> Decimal {
        self.lines
            .values()
            .map(OrderItem::subtotal)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    pub fn to_record(&self) -> OrderRecord {
        OrderRecord {
            order_id: self.id.get(),
            status: self.status.label().to_owned(),
            items: self.lines.values().map(OrderItem::to_record).collect(),
            total: self.total(),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lines.is_empty() {
            return write!(f, "Order #{} ({}) - empty", self.id, self.status);
        }

        writeln!(f, "Order #{} ({})", self.id, self.status)?;
        for line in self.lines.values() {
            writeln!(f, "{line}")?;
        }
        write!(f, "Total: ${:.2}", self.total())
    }
}

fn missing_line(item: &MenuItemRef) -> DomainError {
    let item = item.borrow();
    DomainError::ItemNotFound {
        name: item.name().to_owned(),
        category: item.category(),
        scope: LookupScope::Order,
    }
}
