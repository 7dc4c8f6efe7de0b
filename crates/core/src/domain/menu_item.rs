use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use rust_decimal::Decimal;

use crate::domain::category::Category;
use crate::domain::key::CatalogKey;
use crate::errors::DomainError;
use crate::records::MenuItemRecord;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    name: String,
    price: Decimal,
    category: Category,
    description: String,
    available: bool,
}

impl MenuItem {
    /// Builds an available item with an empty description.
    ///
    /// Fails with [`DomainError::Validation`] when the name is blank or the price
    /// is not strictly positive, the same rules [`MenuItem::update_price`] enforces.
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        category: Category,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("menu item name must not be empty"));
        }
        validate_price(price)?;

        Ok(Self {
            name: name.to_owned(),
            price,
            category,
            description: String::new(),
            available: true,
        })
    }

    pub fn with_description(mut self, description: impl AsRef<str>) -> Self {
        self.description = description.as_ref().trim().to_owned();
        self
    }

    pub fn with_availability(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn key(&self) -> CatalogKey {
        CatalogKey::new(&self.name, self.category)
    }

    pub fn update_price(&mut self, new_price: Decimal) -> Result<(), DomainError> {
        validate_price(new_price)?;
        self.price = new_price;
        Ok(())
    }

    pub fn set_availability(&mut self, available: bool) {
        self.available = available;
    }

    /// `None` clears the description; text is stored trimmed.
    pub fn update_description(&mut self, new_description: Option<&str>) {
        self.description = new_description.map(|text| text.trim().to_owned()).unwrap_or_default();
    }

    pub fn to_record(&self) -> MenuItemRecord {
        MenuItemRecord {
            name: self.name.clone(),
            price: self.price,
            category: self.category.label().to_owned(),
            description: self.description.clone(),
            available: self.available,
        }
    }

    pub fn from_record(record: &MenuItemRecord) -> Result<Self, DomainError> {
        let category = Category::from_label(&record.category)?;
        Ok(Self::new(record.name.clone(), record.price, category)?
            .with_description(&record.description)
            .with_availability(record.available))
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let availability = if self.available { "Available" } else { "Unavailable" };
        write!(f, "{} - ${:.2} [{}] ({availability})", self.name, self.price, self.category)
    }
}

/// Highest accepted unit price. Keeps `price * u32::MAX` and order totals
/// well inside `Decimal` range.
pub const MAX_PRICE_UNITS: i64 = 1_000_000_000;

fn validate_price(price: Decimal) -> Result<(), DomainError> {
    if price <= Decimal::ZERO {
        return Err(DomainError::validation("price must be strictly greater than 0"));
    }
    if price > Decimal::from(MAX_PRICE_UNITS) {
        return Err(DomainError::validation(format!("price must not exceed {MAX_PRICE_UNITS}")));
    }
    Ok(())
}

/// Shared handle to a catalog entry.
///
/// The menu and every order line for the same key hold clones of one handle, so
/// edits made through the menu show up in open orders.
#[derive(Clone, Debug)]
pub struct MenuItemRef(Rc<RefCell<MenuItem>>);

impl MenuItemRef {
    pub fn new(item: MenuItem) -> Self {
        Self(Rc::new(RefCell::new(item)))
    }

    pub fn borrow(&self) -> Ref<'_, MenuItem> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, MenuItem> {
        self.0.borrow_mut()
    }

    pub fn key(&self) -> CatalogKey {
        self.borrow().key()
    }

    pub fn price(&self) -> Decimal {
        self.borrow().price()
    }

    pub fn shares_item_with(&self, other: &MenuItemRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<MenuItem> for MenuItemRef {
    fn from(item: MenuItem) -> Self {
        Self::new(item)
    }
}
