use super::{execute, CommandResult, Persist};

pub fn revenue() -> CommandResult {
    execute("revenue", Persist::No, |restaurant| {
        Ok(format!("total revenue from completed orders: ${:.2}", restaurant.total_revenue()))
    })
}

pub fn show() -> CommandResult {
    execute("show", Persist::No, |restaurant| Ok(restaurant.to_string()))
}
