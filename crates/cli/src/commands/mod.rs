pub mod catalog;
pub mod config;
pub mod demo;
pub mod orders;
pub mod report;

use serde::Serialize;
use trattoria_core::config::{AppConfig, LoadOptions};
use trattoria_core::{ApplicationError, Restaurant};
use trattoria_store::JsonFileStore;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_error(command: &str, error: &ApplicationError) -> Self {
        Self::failure(command, error.error_class(), error.to_string(), error.exit_code())
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            concat!(
                "{{\"command\":\"unknown\",\"status\":\"error\",",
                "\"error_class\":\"serialization\",\"message\":\"{}\"}}"
            ),
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// A restaurant loaded from the configured data directory.
pub struct Session {
    pub config: AppConfig,
    pub store: JsonFileStore,
    pub restaurant: Restaurant,
}

impl Session {
    pub fn open() -> Result<Self, ApplicationError> {
        let config = AppConfig::load(LoadOptions::default())
            .map_err(|error| ApplicationError::Configuration(error.to_string()))?;
        Self::open_with(config)
    }

    pub fn open_with(config: AppConfig) -> Result<Self, ApplicationError> {
        let store = JsonFileStore::new(&config.storage.data_dir);
        let mut restaurant = Restaurant::new(config.restaurant.name.clone())?;
        restaurant.load_data(&store)?;
        Ok(Self { config, store, restaurant })
    }

    pub fn persist(&self) -> Result<(), ApplicationError> {
        self.restaurant.save_data(&self.store)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Persist {
    Yes,
    No,
}

/// Opens a session, runs `action` against the restaurant, and saves afterwards
/// when `persist` is [`Persist::Yes`] and the action succeeded.
pub(crate) fn execute<F>(command: &str, persist: Persist, action: F) -> CommandResult
where
    F: FnOnce(&mut Restaurant) -> Result<String, ApplicationError>,
{
    let outcome = Session::open().and_then(|mut session| {
        let message = action(&mut session.restaurant)?;
        if persist == Persist::Yes {
            session.persist()?;
        }
        Ok(message)
    });

    match outcome {
        Ok(message) => CommandResult::success(command, message),
        Err(error) => {
            tracing::warn!(
                event_name = "cli.command.failed",
                command,
                error_class = error.error_class(),
                "{error}"
            );
            CommandResult::from_error(command, &error)
        }
    }
}

pub(crate) fn order_id(raw: u32) -> Result<trattoria_core::OrderId, ApplicationError> {
    Ok(trattoria_core::OrderId::new(raw)?)
}
