//! Durable key/value persistence for lifetime statistics.

use std::{collections::HashMap, sync::Mutex};

use anyhow::{anyhow, Result};

mod json_file;
mod migrations;
mod sqlite;

pub use json_file::JsonFileBackend;
pub use sqlite::SqliteBackend;

/// String-keyed, string-valued store. Every `set` is durable when it returns.
pub trait KeyValueBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Volatile backend for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let guard = self
            .values
            .lock()
            .map_err(|_| anyhow!("memory backend lock poisoned"))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self
            .values
            .lock()
            .map_err(|_| anyhow!("memory backend lock poisoned"))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
