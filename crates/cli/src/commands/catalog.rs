use rust_decimal::Decimal;
use trattoria_core::{Category, MenuItem, MenuItemRef};

use super::{execute, CommandResult, Persist};

pub fn list(category: Option<Category>, search: Option<String>) -> CommandResult {
    execute("menu", Persist::No, |restaurant| {
        let menu = restaurant.menu();
        let items: Vec<&MenuItemRef> = match search.as_deref() {
            Some(keyword) => menu
                .search(keyword)
                .into_iter()
                .filter(|item| category.map_or(true, |wanted| item.borrow().category() == wanted))
                .collect(),
            None if category.is_some() => menu.list_items(category),
            None => return Ok(menu.to_string()),
        };

        if items.is_empty() {
            return Ok("no matching menu items".to_string());
        }
        Ok(items.iter().map(|item| item.borrow().to_string()).collect::<Vec<_>>().join("\n"))
    })
}

pub fn add(
    name: String,
    price: Decimal,
    category: Category,
    description: Option<String>,
) -> CommandResult {
    execute("add-item", Persist::Yes, |restaurant| {
        let mut item = MenuItem::new(name, price, category)?;
        if let Some(description) = description {
            item = item.with_description(description);
        }
        let added = restaurant.menu_mut().add_item(item)?;
        let rendered = added.borrow().to_string();
        Ok(format!("added {rendered}"))
    })
}

pub fn set_price(name: String, category: Category, price: Decimal) -> CommandResult {
    execute("set-price", Persist::Yes, |restaurant| {
        restaurant.menu_mut().update_item_price(&name, category, price)?;
        Ok(format!("{} [{category}] now costs ${price:.2}", name.trim()))
    })
}

pub fn set_availability(name: String, category: Category, available: bool) -> CommandResult {
    execute("set-availability", Persist::Yes, |restaurant| {
        restaurant.menu_mut().set_item_availability(&name, category, available)?;
        let state = if available { "available" } else { "unavailable" };
        Ok(format!("{} [{category}] is now {state}", name.trim()))
    })
}

pub fn set_description(
    name: String,
    category: Category,
    description: Option<String>,
) -> CommandResult {
    execute("set-description", Persist::Yes, |restaurant| {
        restaurant.menu_mut().update_item_description(&name, category, description.as_deref())?;
        Ok(format!("{} [{category}] description updated", name.trim()))
    })
}

pub fn remove(name: String, category: Category) -> CommandResult {
    execute("remove-item", Persist::Yes, |restaurant| {
        let removed = restaurant.remove_menu_item(&name, category)?;
        let removed_name = removed.borrow().name().to_owned();
        Ok(format!("removed {removed_name} [{category}] from the menu"))
    })
}
