//! Plain record shapes exchanged with a [`crate::persistence::RecordStore`].
//!
//! Field names are the external contract. `subtotal` and `total` are written for
//! readers of the files but are never read back as a source of truth.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuItemRecord {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderLineRecord {
    pub item: MenuItemRecord,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float", default)]
    pub subtotal: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: u32,
    pub status: String,
    #[serde(default)]
    pub items: Vec<OrderLineRecord>,
    #[serde(with = "rust_decimal::serde::float", default)]
    pub total: Decimal,
}

/// Full serialisable view of a restaurant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    pub name: String,
    pub menu: Vec<MenuItemRecord>,
    pub orders: Vec<OrderRecord>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
}

fn default_available() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::{MenuItemRecord, OrderRecord};

    #[test]
    fn menu_item_record_uses_numeric_price() {
        let record = MenuItemRecord {
            name: "Cheesecake".to_string(),
            price: Decimal::new(22, 0),
            category: "Dessert".to_string(),
            description: "Creamy".to_string(),
            available: true,
        };

        let value = serde_json::to_value(&record).expect("serialize record");
        assert_eq!(value["price"], json!(22.0));
        assert_eq!(value["category"], json!("Dessert"));
    }

    #[test]
    fn order_record_tolerates_missing_derived_fields() {
        let value = json!({
            "order_id": 7,
            "status": "Pending",
            "items": [{
                "item": {"name": "Iced Tea", "price": 10.5, "category": "Drink"},
                "quantity": 2
            }]
        });

        let record: OrderRecord = serde_json::from_value(value).expect("deserialize order");
        assert_eq!(record.order_id, 7);
        assert_eq!(record.items[0].item.price, Decimal::new(105, 1));
        assert!(record.items[0].item.available);
        assert_eq!(record.total, Decimal::ZERO);
    }
}
