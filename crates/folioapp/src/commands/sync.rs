use crate::commands::{CmdMessage, CmdResult};
use crate::config::FolioConfig;
use crate::error::{FolioError, Result};
use crate::store::backend::StorageBackend;
use crate::store::page_store::PageStore;
use crate::sync::{self, BackupTransport, SyncConfig, SyncState};

/// Uploads the collection, creating the remote store on first use.
///
/// `token` overrides the configured one. The token and the returned store id
/// are written to the config only after the push succeeds.
pub fn push<B: StorageBackend, T: BackupTransport>(
    store: &PageStore<B>,
    transport: &T,
    config: &mut FolioConfig,
    token: Option<&str>,
) -> Result<CmdResult> {
    let mut next = config.sync.clone();
    if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
        next.token = Some(token.to_string());
    }

    let Some(token) = next.token().map(str::to_string) else {
        return Err(FolioError::SyncNotConfigured(
            "a backup token is required to push".to_string(),
        ));
    };
    let created = next.state() == SyncState::NoRemote;

    let pages = store.notebook().pages();
    let store_id = sync::push(transport, &token, next.store_id(), pages)?;
    next.store_id = Some(store_id.clone());

    let mut updated = config.clone();
    updated.sync = next;
    updated.save(store.backend())?;
    *config = updated;

    let mut result = CmdResult::default();
    let message = if created {
        format!("Backed up {} pages to new store {}", pages.len(), store_id)
    } else {
        format!("Backed up {} pages to store {}", pages.len(), store_id)
    };
    result.add_message(CmdMessage::success(message));
    Ok(result)
}

/// Replaces the local collection with the remote copy.
pub fn pull<B: StorageBackend, T: BackupTransport>(
    store: &mut PageStore<B>,
    transport: &T,
    config: &SyncConfig,
) -> Result<CmdResult> {
    let (Some(token), Some(store_id)) = (config.token(), config.store_id()) else {
        return Err(FolioError::SyncNotConfigured(
            "a backup token and store id are required to pull, push once first".to_string(),
        ));
    };

    let pages = sync::pull(transport, token, store_id)?;
    let count = pages.len();
    store.commit(|notebook| notebook.replace(pages))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Restored {} pages from store {}",
        count, store_id
    )));
    Ok(result)
}

pub fn status(config: &FolioConfig) -> CmdResult {
    let mut result = CmdResult::default();
    let sync = &config.sync;
    let message = match sync.state() {
        SyncState::Unconfigured => CmdMessage::warning("Backup: not configured (no token)"),
        SyncState::NoRemote => CmdMessage::info("Backup: token set, nothing pushed yet"),
        SyncState::WithRemote => CmdMessage::success(format!(
            "Backup: store {}",
            sync.store_id().unwrap_or_default()
        )),
    };
    result.add_message(message);
    result.add_message(CmdMessage::info(format!("API: {}", config.api_url)));
    result
}
