use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::domain::category::Category;
use crate::domain::menu_item::{MenuItem, MenuItemRef};
use crate::domain::order::{Order, OrderId, OrderStatus};
use crate::errors::{ApplicationError, DomainError};
use crate::menu::Menu;
use crate::persistence::{PersistenceError, RecordStore, MENU_COLLECTION, ORDERS_COLLECTION};
use crate::records::{MenuItemRecord, OrderRecord, RestaurantRecord};

/// Owns the menu and the order registry and coordinates every mutation that
/// needs both.
#[derive(Debug)]
pub struct Restaurant {
    name: String,
    menu: Menu,
    orders: BTreeMap<OrderId, Order>,
    next_order_id: OrderId,
}

/// Counts of what a [`Restaurant::load_data`] call brought in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub menu_items: usize,
    pub orders: usize,
    /// Catalog items rebuilt from order snapshots because the menu lacked them.
    pub repaired_items: usize,
}

impl Restaurant {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("restaurant name must be a non-empty string"));
        }

        Ok(Self {
            name: name.to_owned(),
            menu: Menu::new(),
            orders: BTreeMap::new(),
            next_order_id: OrderId::first(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut Menu {
        &mut self.menu
    }

    pub fn next_order_id(&self) -> OrderId {
        self.next_order_id
    }

    pub fn create_order(&mut self) -> Result<&Order, DomainError> {
        let id = self.next_order_id;
        self.next_order_id = id.next()?;

        tracing::info!(
            event_name = "restaurant.order.created",
            order_id = id.get(),
            "order created"
        );
        Ok(self.orders.entry(id).or_insert_with(|| Order::new(id, OrderStatus::Pending)))
    }

    pub fn get_order(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.get(&order_id)
    }

    /// Unknown ids are a validation failure at this layer, not a not-found.
    pub fn require_order(&self, order_id: OrderId) -> Result<&Order, DomainError> {
        self.get_order(order_id).ok_or_else(|| unknown_order(order_id))
    }

    pub fn list_orders(&self) -> Vec<&Order> {
        self.orders.values().collect()
    }

    pub fn list_orders_by_status(&self, status: OrderStatus) -> Vec<&Order> {
        self.orders.values().filter(|order| order.status() == status).collect()
    }

    pub fn add_item_to_order(
        &mut self,
        order_id: OrderId,
        item_name: &str,
        category: Category,
        quantity: u32,
    ) -> Result<(), DomainError> {
        let order = order_entry(&mut self.orders, order_id)?;
        let item = self.menu.require_item(item_name, category)?;
        order.add_item(item, quantity)?;

        tracing::debug!(
            event_name = "restaurant.order.item_added",
            order_id = order_id.get(),
            item = item_name.trim(),
            quantity,
            "item added to order"
        );
        Ok(())
    }

    pub fn change_order_item_quantity(
        &mut self,
        order_id: OrderId,
        item_name: &str,
        category: Category,
        new_quantity: u32,
    ) -> Result<(), DomainError> {
        let order = order_entry(&mut self.orders, order_id)?;
        let item = self.menu.require_item(item_name, category)?;
        order.change_item_quantity(item, new_quantity)?;

        tracing::debug!(
            event_name = "restaurant.order.quantity_changed",
            order_id = order_id.get(),
            item = item_name.trim(),
            quantity = new_quantity,
            "order line quantity changed"
        );
        Ok(())
    }

    pub fn remove_item_from_order(
        &mut self,
        order_id: OrderId,
        item_name: &str,
        category: Category,
    ) -> Result<(), DomainError> {
        let order = order_entry(&mut self.orders, order_id)?;
        let item = self.menu.require_item(item_name, category)?;
        order.remove_item(item)?;

        tracing::debug!(
            event_name = "restaurant.order.item_removed",
            order_id = order_id.get(),
            item = item_name.trim(),
            "item removed from order"
        );
        Ok(())
    }

    /// Takes an item off the menu.
    ///
    /// Refused while any order still has a line for the item: saved orders
    /// would rebuild it on the next load.
    pub fn remove_menu_item(
        &mut self,
        item_name: &str,
        category: Category,
    ) -> Result<MenuItemRef, DomainError> {
        let key = self.menu.require_item(item_name, category)?.key();
        let referencing: Vec<String> = self
            .orders
            .values()
            .filter(|order| order.get_item(&key).is_some())
            .map(|order| format!("#{}", order.id()))
            .collect();
        if !referencing.is_empty() {
            return Err(DomainError::validation(format!(
                "{} [{category}] is still on order {}; remove it from those orders first",
                item_name.trim(),
                referencing.join(", ")
            )));
        }

        self.menu.remove_item(item_name, category)
    }

    pub fn set_order_status(
        &mut self,
        order_id: OrderId,
        new_status: OrderStatus,
    ) -> Result<(), DomainError> {
        let order = order_entry(&mut self.orders, order_id)?;
        let previous = order.status();
        order.set_status(new_status);

        tracing::info!(
            event_name = "restaurant.order.status_changed",
            order_id = order_id.get(),
            from = previous.label(),
            to = new_status.label(),
            "order status changed"
        );
        Ok(())
    }

    /// Sum of totals over completed orders only.
    pub fn total_revenue(&self) -> Decimal {
        self.list_orders_by_status(OrderStatus::Completed)
            .into_iter()
            .map(Order::total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    pub fn snapshot(&self) -> RestaurantRecord {
        RestaurantRecord {
            name: self.name.clone(),
            menu: self.menu_records(),
            orders: self.orders.values().map(Order::to_record).collect(),
            total_revenue: self.total_revenue(),
        }
    }

    pub fn save_data(&self, store: &dyn RecordStore) -> Result<(), ApplicationError> {
        let menu = encode_records(MENU_COLLECTION, &self.menu_records())?;
        store.save(MENU_COLLECTION, &menu)?;

        let orders: Vec<OrderRecord> = self.orders.values().map(Order::to_record).collect();
        let orders = encode_records(ORDERS_COLLECTION, &orders)?;
        store.save(ORDERS_COLLECTION, &orders)?;

        tracing::info!(
            event_name = "restaurant.data.saved",
            menu_items = menu.len(),
            orders = orders.len(),
            "restaurant data saved"
        );
        Ok(())
    }

    /// Merges persisted menu items and orders into this restaurant.
    ///
    /// Menu records whose key is already present are skipped. Orders replace any
    /// in-memory order with the same id. An order line whose item is missing from
    /// the menu has that item rebuilt from the line's embedded snapshot and added
    /// to the menu, so every loaded line shares its item with the catalog.
    /// Persisted subtotals and totals are ignored.
    ///
    /// Records are applied to working copies; on any error the restaurant is
    /// left exactly as it was.
    pub fn load_data(&mut self, store: &dyn RecordStore) -> Result<LoadReport, ApplicationError> {
        let menu_records: Vec<MenuItemRecord> = match store.load(MENU_COLLECTION)? {
            Some(values) => decode_records(MENU_COLLECTION, values)?,
            None => Vec::new(),
        };
        let order_records: Vec<OrderRecord> = match store.load(ORDERS_COLLECTION)? {
            Some(values) => decode_records(ORDERS_COLLECTION, values)?,
            None => Vec::new(),
        };

        let mut menu = self.menu.clone();
        let mut orders = self.orders.clone();
        let mut report = LoadReport::default();

        for record in &menu_records {
            let item = MenuItem::from_record(record)?;
            if !menu.contains(&item.key()) {
                menu.add_item(item)?;
                report.menu_items += 1;
            }
        }

        for record in &order_records {
            let status = OrderStatus::from_label(&record.status)?;
            let mut order = Order::with_raw_id(record.order_id, status)?;

            for line in &record.items {
                let handle = resolve_or_repair(&mut menu, &line.item, &mut report)?;
                order.add_item(&handle, line.quantity)?;
            }

            orders.insert(order.id(), order);
            report.orders += 1;
        }

        let next_order_id = match orders.keys().next_back() {
            Some(highest) => highest.next()?,
            None => OrderId::first(),
        };

        self.menu = menu;
        self.orders = orders;
        self.next_order_id = next_order_id;

        tracing::info!(
            event_name = "restaurant.data.loaded",
            menu_items = report.menu_items,
            orders = report.orders,
            repaired_items = report.repaired_items,
            next_order_id = self.next_order_id.get(),
            "restaurant data loaded"
        );
        Ok(report)
    }

    fn menu_records(&self) -> Vec<MenuItemRecord> {
        self.menu.list_items(None).into_iter().map(|item| item.borrow().to_record()).collect()
    }
}

impl fmt::Display for Restaurant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Restaurant: {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "=== MENU ===")?;
        writeln!(f, "{}", self.menu)?;
        writeln!(f)?;

        if self.orders.is_empty() {
            return f.write_str("No orders yet.");
        }

        f.write_str("=== ORDERS ===")?;
        for order in self.orders.values() {
            write!(f, "\n{order}\n")?;
        }
        Ok(())
    }
}

fn resolve_or_repair(
    menu: &mut Menu,
    snapshot: &MenuItemRecord,
    report: &mut LoadReport,
) -> Result<MenuItemRef, DomainError> {
    let category = Category::from_label(&snapshot.category)?;
    if let Some(existing) = menu.get_item(&snapshot.name, category) {
        return Ok(existing.clone());
    }

    tracing::warn!(
        event_name = "restaurant.data.item_repaired",
        item = snapshot.name.as_str(),
        category = category.label(),
        "order references an item missing from the menu; restoring it from the order snapshot"
    );
    report.repaired_items += 1;
    menu.add_item(MenuItem::from_record(snapshot)?)
}

fn order_entry(
    orders: &mut BTreeMap<OrderId, Order>,
    order_id: OrderId,
) -> Result<&mut Order, DomainError> {
    orders.get_mut(&order_id).ok_or_else(|| unknown_order(order_id))
}

fn unknown_order(order_id: OrderId) -> DomainError {
    DomainError::validation(format!("order with id {order_id} does not exist"))
}

fn encode_records<T: Serialize>(
    collection: &str,
    records: &[T],
) -> Result<Vec<Value>, PersistenceError> {
    records
        .iter()
        .map(|record| {
            serde_json::to_value(record).map_err(|error| PersistenceError::Encode {
                collection: collection.to_string(),
                message: error.to_string(),
            })
        })
        .collect()
}

fn decode_records<T: DeserializeOwned>(
    collection: &str,
    values: Vec<Value>,
) -> Result<Vec<T>, PersistenceError> {
    values
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).map_err(|error| PersistenceError::Decode {
                collection: collection.to_string(),
                message: error.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::{LoadReport, Restaurant};
    use crate::domain::category::Category;
    use crate::domain::menu_item::MenuItem;
    use crate::domain::order::{OrderId, OrderStatus};
    use crate::errors::{ApplicationError, DomainError, LookupScope};
    use crate::persistence::{InMemoryRecordStore, RecordStore};

    fn restaurant() -> Restaurant {
        let mut restaurant = Restaurant::new("Adams Restaurant").expect("valid name");
        let menu = restaurant.menu_mut();
        menu.add_item(
            MenuItem::new("Margherita Pizza", Decimal::new(45, 0), Category::MainCourse)
                .expect("pizza"),
        )
        .expect("add pizza");
        menu.add_item(
            MenuItem::new("Cheesecake", Decimal::new(22, 0), Category::Dessert).expect("cake"),
        )
        .expect("add cake");
        menu.add_item(MenuItem::new("Iced Tea", Decimal::new(10, 0), Category::Drink).expect("tea"))
            .expect("add tea");
        restaurant
    }

    fn id(value: u32) -> OrderId {
        OrderId::new(value).expect("valid id")
    }

    #[test]
    fn rejects_blank_name() {
        assert!(matches!(Restaurant::new("   "), Err(DomainError::Validation(_))));
        assert_eq!(Restaurant::new("  Bistro ").expect("valid").name(), "Bistro");
    }

    #[test]
    fn order_ids_increase_from_one() {
        let mut restaurant = restaurant();
        assert_eq!(restaurant.create_order().expect("create order").id(), id(1));
        assert_eq!(restaurant.create_order().expect("create order").id(), id(2));
        assert_eq!(restaurant.next_order_id(), id(3));
        let third = restaurant.create_order().expect("create order");
        assert_eq!(third.status(), OrderStatus::Pending);
    }

    #[test]
    fn unknown_order_is_a_validation_error() {
        let mut restaurant = restaurant();
        let error = restaurant
            .add_item_to_order(id(42), "Iced Tea", Category::Drink, 1)
            .expect_err("no such order");
        assert!(matches!(error, DomainError::Validation(_)));
        assert!(matches!(restaurant.require_order(id(42)), Err(DomainError::Validation(_))));
        assert!(restaurant.get_order(id(42)).is_none());
    }

    #[test]
    fn unknown_menu_item_is_not_found_in_menu() {
        let mut restaurant = restaurant();
        let order_id = restaurant.create_order().expect("create order").id();
        let error = restaurant
            .add_item_to_order(order_id, "Espresso", Category::Drink, 1)
            .expect_err("not on menu");
        assert!(matches!(error, DomainError::ItemNotFound { scope: LookupScope::Menu, .. }));
    }

    #[test]
    fn menu_items_on_an_order_cannot_be_removed() {
        let mut restaurant = restaurant();
        let order_id = restaurant.create_order().expect("create order").id();
        restaurant.add_item_to_order(order_id, "Iced Tea", Category::Drink, 1).expect("add");

        let error = restaurant
            .remove_menu_item("iced tea", Category::Drink)
            .expect_err("still on order #1");
        assert!(matches!(error, DomainError::Validation(ref message) if message.contains("#1")));
        assert!(restaurant.menu().get_item("Iced Tea", Category::Drink).is_some());

        restaurant.remove_item_from_order(order_id, "Iced Tea", Category::Drink).expect("remove");
        let removed = restaurant.remove_menu_item("Iced Tea", Category::Drink).expect("unused");
        assert_eq!(removed.borrow().name(), "Iced Tea");
        assert!(restaurant.menu().get_item("Iced Tea", Category::Drink).is_none());
    }

    #[test]
    fn removing_unknown_menu_item_is_not_found() {
        let mut restaurant = restaurant();
        let error = restaurant
            .remove_menu_item("Espresso", Category::Drink)
            .expect_err("not on menu");
        assert!(matches!(error, DomainError::ItemNotFound { scope: LookupScope::Menu, .. }));
    }

    #[test]
    fn revenue_counts_completed_orders_only() {
        let mut restaurant = restaurant();
        let first = restaurant.create_order().expect("create order").id();
        let second = restaurant.create_order().expect("create order").id();
        restaurant.add_item_to_order(first, "Cheesecake", Category::Dessert, 2).expect("add");
        restaurant.add_item_to_order(second, "Iced Tea", Category::Drink, 1).expect("add");

        assert_eq!(restaurant.total_revenue(), Decimal::ZERO);

        restaurant.set_order_status(first, OrderStatus::Completed).expect("complete");
        restaurant.set_order_status(second, OrderStatus::Cancelled).expect("cancel");
        assert_eq!(restaurant.total_revenue(), Decimal::new(44, 0));

        restaurant.set_order_status(first, OrderStatus::Pending).expect("reopen");
        assert_eq!(restaurant.total_revenue(), Decimal::ZERO);
    }

    #[test]
    fn lists_orders_by_status() {
        let mut restaurant = restaurant();
        let first = restaurant.create_order().expect("create order").id();
        restaurant.create_order().expect("create order");
        restaurant.set_order_status(first, OrderStatus::Completed).expect("complete");

        assert_eq!(restaurant.list_orders().len(), 2);
        let completed = restaurant.list_orders_by_status(OrderStatus::Completed);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id(), first);
    }

    #[test]
    fn catalog_price_edits_reach_open_orders() {
        let mut restaurant = restaurant();
        let order_id = restaurant.create_order().expect("create order").id();
        restaurant.add_item_to_order(order_id, "Iced Tea", Category::Drink, 3).expect("add");

        restaurant
            .menu_mut()
            .update_item_price("iced tea", Category::Drink, Decimal::new(12, 0))
            .expect("price");

        let order = restaurant.require_order(order_id).expect("order");
        assert_eq!(order.total(), Decimal::new(36, 0));
    }

    #[test]
    fn load_rebuilds_missing_menu_items_from_order_snapshots() {
        let store = InMemoryRecordStore::new();
        store.save("menu", &[]).expect("save menu");
        store
            .save(
                "orders",
                &[json!({
                    "order_id": 4,
                    "status": "Completed",
                    "items": [{
                        "item": {
                            "name": "Tiramisu",
                            "price": 18.0,
                            "category": "Dessert",
                            "description": "Coffee-soaked",
                            "available": true
                        },
                        "quantity": 2,
                        "subtotal": 999.0
                    }],
                    "total": 999.0
                })],
            )
            .expect("save orders");

        let mut restaurant = Restaurant::new("Fresh").expect("valid name");
        let report = restaurant.load_data(&store).expect("load");

        assert_eq!(report.repaired_items, 1);
        assert_eq!(report.orders, 1);
        let tiramisu = restaurant.menu().get_item("tiramisu", Category::Dessert).expect("repaired");
        assert_eq!(tiramisu.borrow().description(), "Coffee-soaked");

        let order = restaurant.require_order(id(4)).expect("loaded order");
        assert_eq!(order.total(), Decimal::new(36, 0));
        assert_eq!(restaurant.total_revenue(), Decimal::new(36, 0));
        assert_eq!(restaurant.next_order_id(), id(5));

        let line = order.items().next().expect("one line");
        assert!(line.item().shares_item_with(tiramisu));
    }

    #[test]
    fn load_from_empty_store_resets_counter_to_one() {
        let store = InMemoryRecordStore::new();
        let mut restaurant = Restaurant::new("Fresh").expect("valid name");
        let report = restaurant.load_data(&store).expect("load");

        assert_eq!(report, LoadReport::default());
        assert_eq!(restaurant.next_order_id(), id(1));
    }

    #[test]
    fn malformed_records_fail_as_persistence_errors() {
        let store = InMemoryRecordStore::new();
        store.save("menu", &[json!({"name": "Broken"})]).expect("save");

        let mut restaurant = Restaurant::new("Fresh").expect("valid name");
        let error = restaurant.load_data(&store).expect_err("missing fields");
        assert!(matches!(error, ApplicationError::Persistence(_)));
        assert!(restaurant.menu().is_empty());
    }

    #[test]
    fn invalid_labels_fail_as_validation_errors() {
        let store = InMemoryRecordStore::new();
        store
            .save("orders", &[json!({"order_id": 1, "status": "Shipped", "items": []})])
            .expect("save");

        let mut restaurant = Restaurant::new("Fresh").expect("valid name");
        let error = restaurant.load_data(&store).expect_err("unknown status");
        assert!(matches!(error, ApplicationError::Domain(DomainError::Validation(_))));
    }

    #[test]
    fn renders_overview() {
        let mut restaurant = Restaurant::new("Adams Restaurant").expect("valid name");
        assert_eq!(
            restaurant.to_string(),
            "Restaurant: Adams Restaurant\n\n=== MENU ===\nMenu is empty.\n\nNo orders yet."
        );

        restaurant.create_order().expect("create order");
        assert!(restaurant.to_string().ends_with("=== ORDERS ===\nOrder #1 (Pending) - empty\n"));
    }
}
