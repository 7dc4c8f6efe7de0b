use std::fmt;

use crate::domain::category::Category;

/// Identity of a catalog entry: trimmed, lower-cased name plus category.
///
/// Menu and Order both key their entries by this value, so `" Iced Tea "` and
/// `"iced tea"` under [`Category::Drink`] address the same slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CatalogKey {
    name: String,
    category: Category,
}

impl CatalogKey {
    pub fn new(name: &str, category: Category) -> Self {
        Self { name: normalize_name(name), category }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.category)
    }
}

pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
