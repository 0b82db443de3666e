use crate::error::Result;

/// Abstract interface for raw blob storage.
///
/// One string value per key, read and written whole. This trait handles the
/// "how" of storage (filesystem vs memory), while [`super::PagePersistence`]
/// handles the "what" (encoding, seeding).
pub trait StorageBackend {
    /// Read the value stored under `key`.
    /// Returns Ok(None) if nothing was ever written.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read_blob(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`.
    fn write_blob(&self, key: &str, value: &str) -> Result<()>;
}
