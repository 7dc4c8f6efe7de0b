use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;
use thiserror::Error;

pub const MENU_COLLECTION: &str = "menu";
pub const ORDERS_COLLECTION: &str = "orders";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("i/o error on `{collection}`: {source}")]
    Io { collection: String, source: std::io::Error },
    #[error("could not encode `{collection}`: {message}")]
    Encode { collection: String, message: String },
    #[error("could not decode `{collection}`: {message}")]
    Decode { collection: String, message: String },
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Flat storage for named collections of plain records.
///
/// `save` overwrites the whole collection. `load` returns `Ok(None)` when the
/// collection has never been written.
pub trait RecordStore {
    fn save(&self, collection: &str, records: &[Value]) -> Result<(), PersistenceError>;
    fn load(&self, collection: &str) -> Result<Option<Vec<Value>>, PersistenceError>;
}

#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn save(&self, collection: &str, records: &[Value]) -> Result<(), PersistenceError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| PersistenceError::Unavailable("in-memory store lock poisoned".into()))?;
        collections.insert(collection.to_string(), records.to_vec());
        Ok(())
    }

    fn load(&self, collection: &str) -> Result<Option<Vec<Value>>, PersistenceError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| PersistenceError::Unavailable("in-memory store lock poisoned".into()))?;
        Ok(collections.get(collection).cloned())
    }
}
