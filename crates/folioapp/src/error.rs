use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Malformed storage blob or pasted JSON. Local state is left untouched.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Remote create/update/fetch did not report success, or the backup file is missing.
    #[error("Sync failed: {0}")]
    Transport(String),

    #[error("Sync is not configured: {0}")]
    SyncNotConfigured(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for FolioError {
    fn from(err: reqwest::Error) -> Self {
        FolioError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;
