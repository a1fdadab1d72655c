//! A small string key-value store for local preferences.
//!
//! `FileStorage` keeps every key in a single JSON object on disk, rewriting the whole file on each
//! `set_item`. `MemoryStorage` is the same thing without the file.

use crate::{utils, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::trace;

#[async_trait::async_trait]
pub trait Storage {
    /// Returns the value stored under `key`, or `None` if nothing is.
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Keeps values in memory only.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    async fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Keeps values in a JSON file such as `$EXPENSE_HOME/storage.json`. The file is created on the
/// first `set_item`; a missing file reads as empty.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.is_file() {
            return Ok(BTreeMap::new());
        }
        utils::deserialize(&self.path).await
    }
}

#[async_trait::async_trait]
impl Storage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load().await?.remove(key))
    }

    async fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let mut items = self.load().await?;
        items.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&items)?;
        utils::write(&self.path, json).await?;
        trace!("Stored '{key}' in {}", self.path.display());
        Ok(())
    }
}
