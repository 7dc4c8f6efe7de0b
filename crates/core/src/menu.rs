use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::domain::category::Category;
use crate::domain::key::{normalize_name, CatalogKey};
use crate::domain::menu_item::{MenuItem, MenuItemRef};
use crate::errors::{DomainError, LookupScope};

/// The catalog: unique items keyed by [`CatalogKey`], kept in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Menu {
    items: IndexMap<CatalogKey, MenuItemRef>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: MenuItem) -> Result<MenuItemRef, DomainError> {
        let key = item.key();
        if self.items.contains_key(&key) {
            return Err(DomainError::DuplicateItem {
                name: item.name().to_owned(),
                category: item.category(),
            });
        }

        tracing::debug!(
            event_name = "menu.item.added",
            item = item.name(),
            category = item.category().label(),
            "menu item added"
        );
        let handle = MenuItemRef::new(item);
        self.items.insert(key, handle.clone());
        Ok(handle)
    }

    pub fn remove_item(
        &mut self,
        name: &str,
        category: Category,
    ) -> Result<MenuItemRef, DomainError> {
        let removed = self
            .items
            .shift_remove(&CatalogKey::new(name, category))
            .ok_or_else(|| not_found(name, category))?;

        tracing::debug!(
            event_name = "menu.item.removed",
            item = name.trim(),
            category = category.label(),
            "menu item removed"
        );
        Ok(removed)
    }

    pub fn get_item(&self, name: &str, category: Category) -> Option<&MenuItemRef> {
        self.items.get(&CatalogKey::new(name, category))
    }

    /// Like [`Menu::get_item`] but a missing key is an error.
    pub fn require_item(
        &self,
        name: &str,
        category: Category,
    ) -> Result<&MenuItemRef, DomainError> {
        self.get_item(name, category).ok_or_else(|| not_found(name, category))
    }

    pub fn contains(&self, key: &CatalogKey) -> bool {
        self.items.contains_key(key)
    }

    pub fn list_items(&self, category: Option<Category>) -> Vec<&MenuItemRef> {
        self.items
            .iter()
            .filter(|(key, _)| category.map_or(true, |wanted| key.category() == wanted))
            .map(|(_, item)| item)
            .collect()
    }

    pub fn update_item_price(
        &mut self,
        name: &str,
        category: Category,
        new_price: Decimal,
    ) -> Result<(), DomainError> {
        self.require_item(name, category)?.borrow_mut().update_price(new_price)
    }

    pub fn set_item_availability(
        &mut self,
        name: &str,
        category: Category,
        available: bool,
    ) -> Result<(), DomainError> {
        self.require_item(name, category)?.borrow_mut().set_availability(available);
        Ok(())
    }

    pub fn update_item_description(
        &mut self,
        name: &str,
        category: Category,
        description: Option<&str>,
    ) -> Result<(), DomainError> {
        self.require_item(name, category)?.borrow_mut().update_description(description);
        Ok(())
    }

    /// Case-insensitive substring match on name or description.
    pub fn search(&self, keyword: &str) -> Vec<&MenuItemRef> {
        let needle = normalize_name(keyword);
        self.items
            .values()
            .filter(|handle| {
                let item = handle.borrow();
                item.name().to_lowercase().contains(&needle)
                    || item.description().to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return f.write_str("Menu is empty.");
        }

        let mut groups: BTreeMap<Category, Vec<&MenuItemRef>> = BTreeMap::new();
        for (key, item) in &self.items {
            groups.entry(key.category()).or_default().push(item);
        }

        for (index, (category, items)) in groups.iter().enumerate() {
            if index > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "=== {category} ===")?;
            for item in items {
                write!(f, "\n{}", item.borrow())?;
            }
        }
        Ok(())
    }
}

fn not_found(name: &str, category: Category) -> DomainError {
    DomainError::ItemNotFound { name: name.trim().to_owned(), category, scope: LookupScope::Menu }
}
