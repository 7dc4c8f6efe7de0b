pub mod config;
pub mod domain;
pub mod errors;
pub mod menu;
pub mod persistence;
pub mod records;
pub mod restaurant;

pub use domain::category::Category;
pub use domain::key::CatalogKey;
pub use domain::menu_item::{MenuItem, MenuItemRef};
pub use domain::order::{Order, OrderId, OrderStatus};
pub use domain::order_item::OrderItem;
pub use errors::{ApplicationError, DomainError, LookupScope};
pub use menu::Menu;
pub use persistence::{InMemoryRecordStore, PersistenceError, RecordStore};
pub use records::{MenuItemRecord, OrderLineRecord, OrderRecord, RestaurantRecord};
pub use restaurant::{LoadReport, Restaurant};
