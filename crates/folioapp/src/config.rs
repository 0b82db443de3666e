//! # Configuration
//!
//! Folio configuration lives in `config.json` inside the data directory, written
//! through the same [`StorageBackend`] as the pages.
//! Missing files and missing keys fall back to compiled defaults.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `api-url` | `https://api.github.com` | Base URL of the gist API used for backups |
//! | `token` | unset | Bearer token for the backup API |
//! | `store-id` | unset | Id of the backup gist, recorded by the first push |
//!
//! ## CLI Usage
//!
//! - `folio config`: Show all configuration values.
//! - `folio config set <key> <value>`: Set a value.
//! - `folio config unset <key>`: Remove a value (api-url returns to its default).

use crate::error::{FolioError, Result};
use crate::store::backend::StorageBackend;
use crate::sync::gist::DEFAULT_API_URL;
use crate::sync::SyncConfig;
use serde::{Deserialize, Serialize};

/// Stored next to the pages blob, i.e. `config.json` in the data directory.
pub const CONFIG_KEY: &str = "config";

pub const CONFIG_KEYS: [&str; 3] = ["api-url", "token", "store-id"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FolioConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default)]
    pub sync: SyncConfig,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            sync: SyncConfig::default(),
        }
    }
}

impl FolioConfig {
    /// Load config from the backend, or return defaults if nothing is stored
    pub fn load<B: StorageBackend>(backend: &B) -> Result<Self> {
        match backend.read_blob(CONFIG_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(FolioError::Serialization),
            None => Ok(Self::default()),
        }
    }

    pub fn save<B: StorageBackend>(&self, backend: &B) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(FolioError::Serialization)?;
        backend.write_blob(CONFIG_KEY, &content)
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match key {
            "api-url" => Ok(Some(self.api_url.clone())),
            "token" => Ok(self.sync.token.clone()),
            "store-id" => Ok(self.sync.store_id.clone()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "api-url" => self.api_url = value.trim_end_matches('/').to_string(),
            "token" => self.sync.token = Some(value.to_string()),
            "store-id" => self.sync.store_id = Some(value.to_string()),
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "api-url" => self.api_url = default_api_url(),
            "token" => self.sync.token = None,
            "store-id" => self.sync.store_id = None,
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> FolioError {
    FolioError::Api(format!(
        "Unknown config key: {} (expected one of {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}
