//! # Storage Layer
//!
//! The whole page collection is persisted as **one JSON blob under one key**.
//! There are no incremental writes: every save re-encodes every page and
//! overwrites the previous value.
//!
//! ## Layers
//!
//! - [`backend::StorageBackend`]: raw key → string I/O.
//!   - [`fs_backend::FsBackend`]: `<data dir>/<key>.json`, written via tmp file + rename.
//!   - [`mem_backend::MemBackend`]: in-memory, for tests.
//! - [`PagePersistence`]: encodes/decodes pages (see [`crate::codec`]) and seeds
//!   the welcome page on first run.
//! - [`page_store::PageStore`]: the loaded notebook plus its persistence; every
//!   mutation goes through `commit`, which is also the only trigger for writes.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── pages.json      # The page collection (JSON array)
//! └── config.json     # FolioConfig (api url, sync token, store id)
//! ```
//!
//! No migrations and no schema version: compatibility is handled by the
//! per-field defaults in the codec.

use crate::codec::{decode_pages, encode_pages};
use crate::error::Result;
use crate::model::{Page, PagePatch};
use crate::notebook::Notebook;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod page_store;

use backend::StorageBackend;

/// The single key the page collection lives under.
pub const PAGES_KEY: &str = "pages";

const WELCOME_TITLE: &str = "Welcome to Folio";
const WELCOME_CONTENT: &str = "# Your first page\n\
Pages can be nested under other pages and marked as favorites.\n\
- [ ] Create a page\n\
- [ ] Back up your pages with `folio sync push`";

pub struct PagePersistence<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> PagePersistence<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Reads the stored collection.
    ///
    /// Nothing stored (or an empty array) seeds a welcome page and persists it
    /// right away. A malformed blob is a decode error and nothing is written.
    pub fn load(&self) -> Result<Vec<Page>> {
        let pages = match self.backend.read_blob(PAGES_KEY)? {
            Some(raw) => decode_pages(&raw)?,
            None => Vec::new(),
        };

        if !pages.is_empty() {
            tracing::debug!(count = pages.len(), "loaded pages");
            return Ok(pages);
        }

        let seeded = vec![welcome_page()];
        tracing::info!("no stored pages, seeding welcome page");
        self.save(&seeded)?;
        Ok(seeded)
    }

    /// Total overwrite of the stored collection.
    pub fn save(&self, pages: &[Page]) -> Result<()> {
        let encoded = encode_pages(pages)?;
        self.backend.write_blob(PAGES_KEY, &encoded)
    }
}

pub fn welcome_page() -> Page {
    let mut notebook = Notebook::new();
    let page = notebook.create(None);
    notebook.edit(
        &page.id,
        PagePatch::title(WELCOME_TITLE).with_content(WELCOME_CONTENT),
    );
    notebook.pages()[0].clone()
}
