//! # Backup Sync
//!
//! Pushes and pulls the page collection to a remote single-file store (a
//! GitHub gist in production). The remote file holds exactly the same JSON
//! array as the local `pages.json`.
//!
//! ## Configuration States
//!
//! ```text
//! Unconfigured ──token──▶ NoRemote ──first push──▶ WithRemote
//!   (no token)            (token, no store id)      (token + store id)
//! ```
//!
//! `push` with a token moves any state forward; `pull` needs `WithRemote`.
//!
//! ## Semantics
//!
//! Last write wins. There is no versioning, no ETag check and no lock: a push
//! from another device between our pull and our next push is silently lost.
//! Neither operation retries.
//!
//! The HTTP client is behind [`BackupTransport`] so the command layer can be
//! tested with [`mem_transport::MemTransport`].

use crate::codec::{decode_pages, encode_pages};
use crate::error::{FolioError, Result};
use crate::model::Page;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod gist;
pub mod mem_transport;

/// The one file this crate reads and writes inside a backup store.
pub const BACKUP_FILENAME: &str = "folio-pages.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Unconfigured,
    NoRemote,
    WithRemote,
}

impl SyncConfig {
    pub fn state(&self) -> SyncState {
        match (non_blank(&self.token), non_blank(&self.store_id)) {
            (None, _) => SyncState::Unconfigured,
            (Some(_), None) => SyncState::NoRemote,
            (Some(_), Some(_)) => SyncState::WithRemote,
        }
    }

    pub fn token(&self) -> Option<&str> {
        non_blank(&self.token)
    }

    pub fn store_id(&self) -> Option<&str> {
        non_blank(&self.store_id)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// A file inside a remote store, as reported by the fetch endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteFile {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub raw_url: Option<String>,
    /// Set when `content` was cut short (large files); the raw URL has it all.
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteStore {
    pub id: String,
    #[serde(default)]
    pub files: HashMap<String, RemoteFile>,
}

/// Boundary to the remote single-file store.
///
/// Every method fails with [`FolioError::Transport`] when the remote side does
/// not report success.
pub trait BackupTransport {
    /// Create a new store holding one file, returning the new store id.
    fn create(&self, token: &str, filename: &str, content: &str) -> Result<String>;

    /// Overwrite one file of an existing store.
    fn update(&self, token: &str, store_id: &str, filename: &str, content: &str) -> Result<()>;

    /// Fetch a store and its file listing.
    fn fetch(&self, token: &str, store_id: &str) -> Result<RemoteStore>;

    /// Fetch a file body from its raw content URL.
    fn fetch_raw(&self, token: &str, url: &str) -> Result<String>;
}

/// Uploads the collection, creating the store on first use.
///
/// Returns the store id to remember for the next push.
pub fn push<T: BackupTransport>(
    transport: &T,
    token: &str,
    store_id: Option<&str>,
    pages: &[Page],
) -> Result<String> {
    let content = encode_pages(pages)?;
    match store_id {
        Some(id) => {
            transport.update(token, id, BACKUP_FILENAME, &content)?;
            tracing::info!(store = id, pages = pages.len(), "updated backup");
            Ok(id.to_string())
        }
        None => {
            let id = transport.create(token, BACKUP_FILENAME, &content)?;
            if id.trim().is_empty() {
                return Err(FolioError::Transport(
                    "backup store was created without an id".to_string(),
                ));
            }
            tracing::info!(store = %id, pages = pages.len(), "created backup");
            Ok(id)
        }
    }
}

/// Downloads the collection. Read-only on the remote side.
pub fn pull<T: BackupTransport>(transport: &T, token: &str, store_id: &str) -> Result<Vec<Page>> {
    let store = transport.fetch(token, store_id)?;
    let file = store.files.get(BACKUP_FILENAME).ok_or_else(|| {
        FolioError::Transport(format!("backup file {} not found", BACKUP_FILENAME))
    })?;

    let inline = file.content.clone().unwrap_or_default();
    let needs_raw = file.truncated || inline.trim().is_empty();
    let content = match file.raw_url.as_deref() {
        Some(url) if needs_raw => {
            tracing::debug!(url, truncated = file.truncated, "fetching raw backup file");
            transport.fetch_raw(token, url)?
        }
        _ => inline,
    };

    if content.trim().is_empty() {
        return Err(FolioError::Transport("backup file is empty".to_string()));
    }

    let pages = decode_pages(&content)?;
    if pages.is_empty() {
        return Err(FolioError::Transport(
            "backup contains no pages".to_string(),
        ));
    }
    tracing::info!(store = store_id, pages = pages.len(), "pulled backup");
    Ok(pages)
}
