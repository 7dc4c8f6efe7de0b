use rust_decimal::Decimal;
use trattoria_core::{ApplicationError, Category, MenuItem, OrderStatus, Restaurant};

use super::{execute, CommandResult, Persist};

const SAMPLE_MENU: [(&str, i64, Category, &str); 3] = [
    (
        "Margherita Pizza",
        45,
        Category::MainCourse,
        "Classic pizza with tomatoes, mozzarella, and basil.",
    ),
    ("Cheesecake", 22, Category::Dessert, "Creamy cheesecake with strawberry sauce."),
    ("Iced Tea", 10, Category::Drink, "Cold black tea with lemon."),
];

pub fn run() -> CommandResult {
    execute("demo", Persist::Yes, walkthrough)
}

/// Seeds the sample menu when empty, then takes one order through its whole
/// lifecycle and reports each intermediate state.
pub fn walkthrough(restaurant: &mut Restaurant) -> Result<String, ApplicationError> {
    if restaurant.menu().is_empty() {
        seed_menu(restaurant)?;
    }

    let mut sections = vec![format!("=== RESTAURANT MENU ===\n{}", restaurant.menu())];

    let order_id = restaurant.create_order()?.id();
    sections.push(format!("Created order #{order_id} with status: {}", OrderStatus::Pending));

    restaurant.add_item_to_order(order_id, "Margherita Pizza", Category::MainCourse, 2)?;
    restaurant.add_item_to_order(order_id, "Iced Tea", Category::Drink, 1)?;
    sections.push(format!(
        "=== ORDER AFTER ADDING ITEMS ===\n{}",
        restaurant.require_order(order_id)?
    ));

    restaurant.change_order_item_quantity(order_id, "Iced Tea", Category::Drink, 3)?;
    sections.push(format!(
        "=== ORDER AFTER CHANGING ICED TEA QUANTITY TO 3 ===\n{}",
        restaurant.require_order(order_id)?
    ));

    restaurant.remove_item_from_order(order_id, "Margherita Pizza", Category::MainCourse)?;
    sections.push(format!(
        "=== ORDER AFTER REMOVING MARGHERITA ===\n{}",
        restaurant.require_order(order_id)?
    ));

    restaurant.set_order_status(order_id, OrderStatus::Completed)?;
    sections.push(format!(
        "=== FINAL ORDER (COMPLETED) ===\n{}",
        restaurant.require_order(order_id)?
    ));

    sections.push(format!(
        "Total revenue from completed orders: ${:.2}",
        restaurant.total_revenue()
    ));
    Ok(sections.join("\n\n"))
}

fn seed_menu(restaurant: &mut Restaurant) -> Result<(), ApplicationError> {
    for (name, price, category, description) in SAMPLE_MENU {
        let item =
            MenuItem::new(name, Decimal::new(price, 0), category)?.with_description(description);
        restaurant.menu_mut().add_item(item)?;
    }
    tracing::info!(
        event_name = "cli.demo.menu_seeded",
        items = SAMPLE_MENU.len(),
        "sample menu seeded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use trattoria_core::{Category, OrderId, OrderStatus, Restaurant};

    use super::walkthrough;

    #[test]
    fn walkthrough_completes_one_order_worth_thirty() {
        let mut restaurant = Restaurant::new("Adams Restaurant").expect("valid name");
        let report = walkthrough(&mut restaurant).expect("walkthrough");

        assert_eq!(restaurant.menu().len(), 3);
        assert_eq!(restaurant.total_revenue(), Decimal::new(30, 0));
        let order = restaurant.require_order(OrderId::new(1).expect("id")).expect("order");
        assert_eq!(order.status(), OrderStatus::Completed);
        assert!(report.contains(
            "Order #1 (Pending)\n\
             2 x Margherita Pizza -> $90.00\n\
             1 x Iced Tea -> $10.00\n\
             Total: $100.00"
        ));
        assert!(report.ends_with("Total revenue from completed orders: $30.00"));
    }

    #[test]
    fn second_walkthrough_reuses_menu_and_opens_next_order() {
        let mut restaurant = Restaurant::new("Adams Restaurant").expect("valid name");
        walkthrough(&mut restaurant).expect("first run");
        restaurant
            .menu_mut()
            .update_item_price("Iced Tea", Category::Drink, Decimal::new(12, 0))
            .expect("price");
        walkthrough(&mut restaurant).expect("second run");

        assert_eq!(restaurant.menu().len(), 3);
        assert_eq!(restaurant.list_orders().len(), 2);
        assert_eq!(restaurant.total_revenue(), Decimal::new(72, 0));
    }
}
