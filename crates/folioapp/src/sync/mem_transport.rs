use super::{BackupTransport, RemoteFile, RemoteStore};
use crate::error::{FolioError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

const RAW_PREFIX: &str = "mem://";

/// In-memory backup transport for testing.
///
/// Stores are keyed by a generated id; raw URLs look like `mem://<id>/<file>`.
#[derive(Default)]
pub struct MemTransport {
    stores: RefCell<HashMap<String, HashMap<String, String>>>,
    next_id: RefCell<usize>,
    fail: RefCell<bool>,
    hide_inline: RefCell<bool>,
    truncate_inline: RefCell<bool>,
}

impl MemTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as if the remote rejected it.
    pub fn set_fail(&self, fail: bool) {
        *self.fail.borrow_mut() = fail;
    }

    /// Report no inline content on fetch, forcing the raw URL path.
    pub fn set_hide_inline(&self, hide: bool) {
        *self.hide_inline.borrow_mut() = hide;
    }

    /// Report the first half of each file inline, flagged as truncated.
    pub fn set_truncate_inline(&self, truncate: bool) {
        *self.truncate_inline.borrow_mut() = truncate;
    }

    pub fn store_count(&self) -> usize {
        self.stores.borrow().len()
    }

    /// Seed a store directly, returning its id.
    pub fn insert_store(&self, filename: &str, content: &str) -> String {
        let id = self.allocate_id();
        let files = HashMap::from([(filename.to_string(), content.to_string())]);
        self.stores.borrow_mut().insert(id.clone(), files);
        id
    }

    pub fn file_content(&self, store_id: &str, filename: &str) -> Option<String> {
        self.stores
            .borrow()
            .get(store_id)
            .and_then(|files| files.get(filename).cloned())
    }

    fn allocate_id(&self) -> String {
        let mut next = self.next_id.borrow_mut();
        *next += 1;
        format!("mem-store-{}", *next)
    }

    fn check(&self, token: &str) -> Result<()> {
        if *self.fail.borrow() {
            return Err(FolioError::Transport("simulated remote failure".to_string()));
        }
        if token.trim().is_empty() {
            return Err(FolioError::Transport("401 Unauthorized".to_string()));
        }
        Ok(())
    }
}

impl BackupTransport for MemTransport {
    fn create(&self, token: &str, filename: &str, content: &str) -> Result<String> {
        self.check(token)?;
        Ok(self.insert_store(filename, content))
    }

    fn update(&self, token: &str, store_id: &str, filename: &str, content: &str) -> Result<()> {
        self.check(token)?;
        let mut stores = self.stores.borrow_mut();
        let files = stores
            .get_mut(store_id)
            .ok_or_else(|| FolioError::Transport(format!("404 store {} not found", store_id)))?;
        files.insert(filename.to_string(), content.to_string());
        Ok(())
    }

    fn fetch(&self, token: &str, store_id: &str) -> Result<RemoteStore> {
        self.check(token)?;
        let stores = self.stores.borrow();
        let files = stores
            .get(store_id)
            .ok_or_else(|| FolioError::Transport(format!("404 store {} not found", store_id)))?;
        let hide = *self.hide_inline.borrow();
        let truncate = *self.truncate_inline.borrow();

        Ok(RemoteStore {
            id: store_id.to_string(),
            files: files
                .iter()
                .map(|(name, content)| {
                    let inline = if hide {
                        None
                    } else if truncate {
                        Some(content.chars().take(content.chars().count() / 2).collect())
                    } else {
                        Some(content.clone())
                    };
                    let file = RemoteFile {
                        content: inline,
                        raw_url: Some(format!("{}{}/{}", RAW_PREFIX, store_id, name)),
                        truncated: truncate && !hide,
                    };
                    (name.clone(), file)
                })
                .collect(),
        })
    }

    fn fetch_raw(&self, token: &str, url: &str) -> Result<String> {
        self.check(token)?;
        let (store_id, filename) = url
            .strip_prefix(RAW_PREFIX)
            .and_then(|rest| rest.split_once('/'))
            .ok_or_else(|| FolioError::Transport(format!("bad raw url {}", url)))?;
        self.file_content(store_id, filename)
            .ok_or_else(|| FolioError::Transport(format!("404 {}", url)))
    }
}
