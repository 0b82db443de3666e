use super::backend::StorageBackend;
use crate::error::{FolioError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Blobs held in a map, for tests and throwaway sessions.
///
/// Folio never shares a backend across threads, so `Cell`/`RefCell` give the
/// `&self` methods their mutability.
#[derive(Default)]
pub struct MemBackend {
    blobs: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    failing: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every `write_blob` fails with a `Store` error.
    pub fn fail_writes(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// Successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl StorageBackend for MemBackend {
    fn read_blob(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn write_blob(&self, key: &str, value: &str) -> Result<()> {
        if self.failing.get() {
            return Err(FolioError::Store(format!("write to '{}' refused", key)));
        }
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
