//! # Data Directory and Wiring
//!
//! Folio keeps one data directory per user, holding `pages.json` and
//! `config.json`. It is resolved in order:
//!
//! 1. `FOLIO_DATA` environment variable (used by the end-to-end tests to
//!    isolate state)
//! 2. The OS data directory from [`directories::ProjectDirs`]
//!
//! [`initialize`] builds the production wiring on top of it: an [`FsBackend`]
//! rooted there, the stored config, and a [`GistTransport`] pointed at the
//! configured API URL.

use crate::api::FolioApi;
use crate::config::FolioConfig;
use crate::error::{FolioError, Result};
use crate::store::fs_backend::FsBackend;
use crate::store::page_store::PageStore;
use crate::sync::gist::GistTransport;
use directories::ProjectDirs;
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "FOLIO_DATA";

pub struct FolioContext {
    pub api: FolioApi<FsBackend, GistTransport>,
    pub data_dir: PathBuf,
}

pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "folio", "folio")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| FolioError::Store("Could not determine a data directory".to_string()))
}

pub fn initialize() -> Result<FolioContext> {
    let data_dir = data_dir()?;
    tracing::debug!(dir = %data_dir.display(), "using data directory");

    let backend = FsBackend::new(data_dir.clone());
    let config = FolioConfig::load(&backend)?;
    let transport = GistTransport::new(&config.api_url)?;
    let api = FolioApi::new(PageStore::open(backend)?, transport, config);

    Ok(FolioContext { api, data_dir })
}
