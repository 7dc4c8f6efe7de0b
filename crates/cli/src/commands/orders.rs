use trattoria_core::{Category, OrderStatus};

use super::{execute, order_id, CommandResult, Persist};

pub fn list(status: Option<OrderStatus>) -> CommandResult {
    execute("orders", Persist::No, |restaurant| {
        let orders = match status {
            Some(status) => restaurant.list_orders_by_status(status),
            None => restaurant.list_orders(),
        };

        if orders.is_empty() {
            return Ok("no orders".to_string());
        }
        Ok(orders.iter().map(|order| order.to_string()).collect::<Vec<_>>().join("\n\n"))
    })
}

pub fn create() -> CommandResult {
    execute("new-order", Persist::Yes, |restaurant| {
        let order = restaurant.create_order()?;
        Ok(format!("created order #{} ({})", order.id(), order.status()))
    })
}

pub fn add_item(
    raw_order_id: u32,
    name: String,
    category: Category,
    quantity: u32,
) -> CommandResult {
    execute("add-to-order", Persist::Yes, |restaurant| {
        let id = order_id(raw_order_id)?;
        restaurant.add_item_to_order(id, &name, category, quantity)?;
        Ok(restaurant.require_order(id)?.to_string())
    })
}

pub fn set_quantity(
    raw_order_id: u32,
    name: String,
    category: Category,
    quantity: u32,
) -> CommandResult {
    execute("set-quantity", Persist::Yes, |restaurant| {
        let id = order_id(raw_order_id)?;
        restaurant.change_order_item_quantity(id, &name, category, quantity)?;
        Ok(restaurant.require_order(id)?.to_string())
    })
}

pub fn remove_item(raw_order_id: u32, name: String, category: Category) -> CommandResult {
    execute("remove-from-order", Persist::Yes, |restaurant| {
        let id = order_id(raw_order_id)?;
        restaurant.remove_item_from_order(id, &name, category)?;
        Ok(restaurant.require_order(id)?.to_string())
    })
}

pub fn set_status(raw_order_id: u32, status: OrderStatus) -> CommandResult {
    execute("set-status", Persist::Yes, |restaurant| {
        let id = order_id(raw_order_id)?;
        restaurant.set_order_status(id, status)?;
        Ok(format!("order #{id} is now {status}"))
    })
}
