use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Appetizer,
    #[serde(rename = "Main Course")]
    MainCourse,
    Dessert,
    Drink,
}

impl Category {
    pub const ALL: [Category; 4] =
        [Category::Appetizer, Category::MainCourse, Category::Dessert, Category::Drink];

    /// Display label, also the persisted form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Appetizer => "Appetizer",
            Self::MainCourse => "Main Course",
            Self::Dessert => "Dessert",
            Self::Drink => "Drink",
        }
    }

    /// Strict parse used for persisted records: only the exact label matches.
    pub fn from_label(label: &str) -> Result<Self, DomainError> {
        Self::ALL.into_iter().find(|category| category.label() == label).ok_or_else(|| {
            DomainError::validation(format!(
                "unknown category `{label}` (expected Appetizer|Main Course|Dessert|Drink)"
            ))
        })
    }
}

// Categories sort by label, not by declaration order.
impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.label().cmp(other.label())
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let compact: String = value
            .trim()
            .chars()
            .filter(|ch| !ch.is_whitespace() && *ch != '_' && *ch != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        match compact.as_str() {
            "appetizer" => Ok(Self::Appetizer),
            "maincourse" => Ok(Self::MainCourse),
            "dessert" => Ok(Self::Dessert),
            "drink" => Ok(Self::Drink),
            _ => Err(DomainError::validation(format!(
                "unknown category `{}` (expected Appetizer|Main Course|Dessert|Drink)",
                value.trim()
            ))),
        }
    }
}
