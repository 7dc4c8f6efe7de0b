use std::env;
use std::fs;
use std::path::Path;

use toml::Value;
use trattoria_core::config::{resolve_config_path, AppConfig, LoadOptions};
use trattoria_core::ApplicationError;

use super::CommandResult;

/// Plain-text report; a config that fails validation exits with the
/// configuration exit code.
pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            let exit_code = ApplicationError::Configuration(error.to_string()).exit_code();
            return CommandResult {
                exit_code,
                output: format!("config validation failed: {error}"),
            };
        }
    };

    let config_file_path = resolve_config_path(None);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let lines = [
        "effective config (source precedence: env > file > default):".to_string(),
        render_line(
            "restaurant.name",
            &config.restaurant.name,
            source("restaurant.name", &["TRATTORIA_RESTAURANT_NAME"]),
        ),
        render_line(
            "storage.data_dir",
            &config.storage.data_dir.display().to_string(),
            source("storage.data_dir", &["TRATTORIA_STORAGE_DATA_DIR"]),
        ),
        render_line(
            "logging.level",
            &config.logging.level,
            source("logging.level", &["TRATTORIA_LOGGING_LEVEL", "TRATTORIA_LOG_LEVEL"]),
        ),
        render_line(
            "logging.format",
            &format!("{:?}", config.logging.format),
            source("logging.format", &["TRATTORIA_LOGGING_FORMAT", "TRATTORIA_LOG_FORMAT"]),
        ),
    ];

    CommandResult { exit_code: 0, output: lines.join("\n") }
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<toml::Table>().ok().map(Value::Table)
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) =
        env_keys.iter().find(|key| env::var(key).is_ok_and(|value| !value.trim().is_empty()))
    {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
