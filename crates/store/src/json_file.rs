use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use trattoria_core::persistence::{PersistenceError, RecordStore};

/// One pretty-printed JSON array per collection, at `<root>/<collection>.json`.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.json"))
    }
}

impl RecordStore for JsonFileStore {
    fn save(&self, collection: &str, records: &[Value]) -> Result<(), PersistenceError> {
        let path = self.path_for(collection);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| io_error(collection, source))?;
        }

        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        records.serialize(&mut serializer).map_err(|error| PersistenceError::Encode {
            collection: collection.to_string(),
            message: error.to_string(),
        })?;

        fs::write(&path, buffer).map_err(|source| io_error(collection, source))?;
        tracing::debug!(
            event_name = "store.collection.saved",
            collection,
            path = %path.display(),
            records = records.len(),
            "collection written"
        );
        Ok(())
    }

    fn load(&self, collection: &str) -> Result<Option<Vec<Value>>, PersistenceError> {
        let path = self.path_for(collection);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    event_name = "store.collection.missing",
                    collection,
                    path = %path.display(),
                    "collection file not found"
                );
                return Ok(None);
            }
            Err(source) => return Err(io_error(collection, source)),
        };

        let records = serde_json::from_str::<Vec<Value>>(&raw).map_err(|error| {
            PersistenceError::Decode {
                collection: collection.to_string(),
                message: error.to_string(),
            }
        })?;
        Ok(Some(records))
    }
}

fn io_error(collection: &str, source: io::Error) -> PersistenceError {
    PersistenceError::Io { collection: collection.to_string(), source }
}
