use super::backend::StorageBackend;
use crate::error::{FolioError, Result};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// Stores each key as `<root>/<key>.json`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(FolioError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read_blob(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(FolioError::Io)?;
        Ok(Some(content))
    }

    fn write_blob(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;

        // Atomic write
        let tmp_path = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_path, value).map_err(FolioError::Io)?;
        if let Err(err) = fs::rename(&tmp_path, self.blob_path(key)) {
            let _ = fs::remove_file(&tmp_path);
            return Err(FolioError::Io(err));
        }

        Ok(())
    }
}
