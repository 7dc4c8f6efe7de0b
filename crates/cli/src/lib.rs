pub mod commands;
pub mod logging;

use clap::{ArgAction, Parser, Subcommand};
use rust_decimal::Decimal;
use std::process::ExitCode;
use trattoria_core::config::{AppConfig, LoadOptions};
use trattoria_core::{Category, OrderStatus};

#[derive(Debug, Parser)]
#[command(
    name = "trattoria",
    about = "Trattoria back-office CLI",
    long_about = concat!(
        "Maintain the menu, take and amend orders, and report revenue. ",
        "State is kept in JSON files under the configured data directory."
    ),
    after_help = concat!(
        "Examples:\n",
        "  trattoria demo\n",
        "  trattoria add-item --name \"Iced Tea\" --price 10 --category Drink\n",
        "  trattoria add-to-order --order 1 --name \"iced tea\" --category drink --quantity 2\n",
        "  trattoria set-status --order 1 --status completed\n",
        "  trattoria revenue"
    )
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(
        about = "Seed the sample menu if empty and walk one order from creation to completion"
    )]
    Demo,
    #[command(about = "Render the whole restaurant: menu and every order")]
    Show,
    #[command(about = "List menu items, optionally filtered by category or keyword")]
    Menu {
        #[arg(long, help = "Only items in this category")]
        category: Option<Category>,
        #[arg(long, help = "Case-insensitive match on name or description")]
        search: Option<String>,
    },
    #[command(about = "Add an item to the menu")]
    AddItem {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long)]
        category: Category,
        #[arg(long)]
        description: Option<String>,
    },
    #[command(about = "Change the price of a menu item")]
    SetPrice {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: Category,
        #[arg(long)]
        price: Decimal,
    },
    #[command(about = "Mark a menu item available or unavailable")]
    SetAvailability {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: Category,
        #[arg(long, action = ArgAction::Set)]
        available: bool,
    },
    #[command(about = "Replace a menu item's description; omit --description to clear it")]
    SetDescription {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: Category,
        #[arg(long)]
        description: Option<String>,
    },
    #[command(about = "Remove an item from the menu; refused while any order still lists it")]
    RemoveItem {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: Category,
    },
    #[command(about = "List orders, optionally filtered by status")]
    Orders {
        #[arg(long)]
        status: Option<OrderStatus>,
    },
    #[command(about = "Open a new pending order")]
    NewOrder,
    #[command(about = "Add a menu item to an order, merging with an existing line")]
    AddToOrder {
        #[arg(long = "order")]
        order_id: u32,
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: Category,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    #[command(about = "Set the quantity of an existing order line")]
    SetQuantity {
        #[arg(long = "order")]
        order_id: u32,
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: Category,
        #[arg(long)]
        quantity: u32,
    },
    #[command(about = "Remove a line from an order")]
    RemoveFromOrder {
        #[arg(long = "order")]
        order_id: u32,
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: Category,
    },
    #[command(about = "Set an order's status (pending, completed, cancelled)")]
    SetStatus {
        #[arg(long = "order")]
        order_id: u32,
        #[arg(long)]
        status: OrderStatus,
    },
    #[command(about = "Total of all completed orders")]
    Revenue,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        logging::init(&config);
    }

    use commands::{catalog, orders, report};
    let result = match cli.command {
        Command::Demo => commands::demo::run(),
        Command::Show => report::show(),
        Command::Menu { category, search } => catalog::list(category, search),
        Command::AddItem { name, price, category, description } => {
            catalog::add(name, price, category, description)
        }
        Command::SetPrice { name, category, price } => catalog::set_price(name, category, price),
        Command::SetAvailability { name, category, available } => {
            catalog::set_availability(name, category, available)
        }
        Command::SetDescription { name, category, description } => {
            catalog::set_description(name, category, description)
        }
        Command::RemoveItem { name, category } => catalog::remove(name, category),
        Command::Orders { status } => orders::list(status),
        Command::NewOrder => orders::create(),
        Command::AddToOrder { order_id, name, category, quantity } => {
            orders::add_item(order_id, name, category, quantity)
        }
        Command::SetQuantity { order_id, name, category, quantity } => {
            orders::set_quantity(order_id, name, category, quantity)
        }
        Command::RemoveFromOrder { order_id, name, category } => {
            orders::remove_item(order_id, name, category)
        }
        Command::SetStatus { order_id, status } => orders::set_status(order_id, status),
        Command::Revenue => report::revenue(),
        Command::Config => commands::config::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
