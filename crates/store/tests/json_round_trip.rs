use std::fs;

use rust_decimal::Decimal;
use serde_json::Value;
use tempfile::TempDir;
use trattoria_core::{Category, MenuItem, OrderStatus, Restaurant};
use trattoria_store::JsonFileStore;

fn restaurant_with_completed_order() -> Restaurant {
    let mut restaurant = Restaurant::new("Adams Restaurant").expect("valid name");
    restaurant
        .menu_mut()
        .add_item(
            MenuItem::new("Margherita Pizza", Decimal::new(45, 0), Category::MainCourse)
                .expect("pizza")
                .with_description("Classic pizza with tomatoes, mozzarella, and basil."),
        )
        .expect("add pizza");
    restaurant
        .menu_mut()
        .add_item(MenuItem::new("Iced Tea", Decimal::new(10, 0), Category::Drink).expect("tea"))
        .expect("add tea");

    let order_id = restaurant.create_order().expect("create order").id();
    restaurant
        .add_item_to_order(order_id, "Margherita Pizza", Category::MainCourse, 2)
        .expect("add pizza");
    restaurant.add_item_to_order(order_id, "Iced Tea", Category::Drink, 1).expect("add tea");
    restaurant.set_order_status(order_id, OrderStatus::Completed).expect("complete");
    restaurant
}

#[test]
fn files_follow_the_record_contract() {
    let dir = TempDir::new().expect("temp dir");
    let store = JsonFileStore::new(dir.path().join("data"));
    restaurant_with_completed_order().save_data(&store).expect("save");

    let orders: Value =
        serde_json::from_str(&fs::read_to_string(store.path_for("orders")).expect("orders file"))
            .expect("orders json");
    let order = &orders[0];
    assert_eq!(order["order_id"], 1);
    assert_eq!(order["status"], "Completed");
    assert_eq!(order["total"], 100.0);
    assert_eq!(order["items"][0]["item"]["category"], "Main Course");
    assert_eq!(order["items"][0]["quantity"], 2);
    assert_eq!(order["items"][0]["subtotal"], 90.0);

    let menu: Value =
        serde_json::from_str(&fs::read_to_string(store.path_for("menu")).expect("menu file"))
            .expect("menu json");
    assert_eq!(menu.as_array().map(Vec::len), Some(2));
    assert_eq!(menu[1]["available"], true);
}

#[test]
fn reload_from_disk_restores_revenue_and_counter() {
    let dir = TempDir::new().expect("temp dir");
    let store = JsonFileStore::new(dir.path());
    let original = restaurant_with_completed_order();
    original.save_data(&store).expect("save");

    let mut restored = Restaurant::new("Adams Restaurant").expect("valid name");
    restored.load_data(&store).expect("load");

    assert_eq!(restored.total_revenue(), Decimal::new(100, 0));
    assert_eq!(restored.next_order_id().get(), 2);
    assert_eq!(restored.menu().len(), 2);
}

#[test]
fn orders_file_alone_repairs_the_menu() {
    let dir = TempDir::new().expect("temp dir");
    let store = JsonFileStore::new(dir.path());
    restaurant_with_completed_order().save_data(&store).expect("save");
    fs::remove_file(store.path_for("menu")).expect("drop menu file");

    let mut restored = Restaurant::new("Adams Restaurant").expect("valid name");
    let report = restored.load_data(&store).expect("load");

    assert_eq!(report.repaired_items, 2);
    let pizza = restored
        .menu()
        .get_item("margherita pizza", Category::MainCourse)
        .expect("pizza restored from order snapshot");
    assert_eq!(pizza.price(), Decimal::new(45, 0));
    assert_eq!(restored.total_revenue(), Decimal::new(100, 0));
}
