use std::{collections::BTreeMap, fs, path::PathBuf, sync::RwLock};

use anyhow::{anyhow, Context, Result};
use log::warn;

use super::KeyValueBackend;

/// All keys in one pretty-printed JSON object, rewritten on every `set`.
pub struct JsonFileBackend {
    path: PathBuf,
    data: RwLock<BTreeMap<String, String>>,
}

impl JsonFileBackend {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read statistics from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!(
                    "Ignoring unreadable statistics file {}: {err}",
                    path.display()
                );
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    fn persist(&self, data: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create statistics directory {}", parent.display())
            })?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write statistics to {}", self.path.display()))
    }
}

impl KeyValueBackend for JsonFileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let guard = self
            .data
            .read()
            .map_err(|_| anyhow!("statistics lock poisoned"))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("statistics lock poisoned"))?;
        guard.insert(key.to_string(), value.to_string());
        self.persist(&guard)
    }
}
