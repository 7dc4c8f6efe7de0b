pub mod category;
pub mod key;
pub mod menu_item;
pub mod order;
pub mod order_item;
