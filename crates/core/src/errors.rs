use std::fmt;

use thiserror::Error;

use crate::domain::category::Category;
use crate::persistence::PersistenceError;

/// Where a missing catalog key was looked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupScope {
    Menu,
    Order,
}

impl fmt::Display for LookupScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Menu => f.write_str("menu"),
            Self::Order => f.write_str("order"),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("item `{name}` [{category}] already exists in menu")]
    DuplicateItem { name: String, category: Category },
    #[error("item `{name}` [{category}] not found in {scope}")]
    ItemNotFound { name: String, category: Category, scope: LookupScope },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::DuplicateItem { .. } => "duplicate_item",
            Self::ItemNotFound { .. } => "item_not_found",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(error) => error.error_class(),
            Self::Persistence(_) => "persistence",
            Self::Configuration(_) => "configuration",
        }
    }

    /// Process exit code an operator command should report for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Configuration(_) => 2,
            Self::Persistence(_) => 3,
            Self::Domain(DomainError::Validation(_)) => 4,
            Self::Domain(DomainError::DuplicateItem { .. }) => 5,
            Self::Domain(DomainError::ItemNotFound { .. }) => 6,
        }
    }
}

impl From<PersistenceError> for ApplicationError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::category::Category;
    use crate::errors::{ApplicationError, DomainError, LookupScope};
    use crate::persistence::PersistenceError;

    #[test]
    fn domain_errors_keep_their_class_through_application_layer() {
        let error = ApplicationError::from(DomainError::ItemNotFound {
            name: "Iced Tea".to_owned(),
            category: Category::Drink,
            scope: LookupScope::Order,
        });

        assert_eq!(error.error_class(), "item_not_found");
        assert_eq!(error.exit_code(), 6);
        assert_eq!(error.to_string(), "item `Iced Tea` [Drink] not found in order");
    }

    #[test]
    fn duplicate_item_message_uses_category_label() {
        let error = DomainError::DuplicateItem {
            name: "Burger".to_owned(),
            category: Category::MainCourse,
        };

        assert_eq!(error.to_string(), "item `Burger` [Main Course] already exists in menu");
    }

    #[test]
    fn persistence_errors_map_to_persistence_class() {
        let error = ApplicationError::from(PersistenceError::Decode {
            collection: "orders".to_owned(),
            message: "expected an array".to_owned(),
        });

        assert!(matches!(
            error,
            ApplicationError::Persistence(ref message) if message.contains("orders")
        ));
        assert_eq!(error.error_class(), "persistence");
        assert_eq!(error.exit_code(), 3);
    }
}
