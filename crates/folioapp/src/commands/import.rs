use crate::codec::decode_pages;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FolioError, Result};
use crate::store::backend::StorageBackend;
use crate::store::page_store::PageStore;

/// Replaces the whole collection with the pages encoded in `text`.
///
/// Invalid JSON, or an array with no pages, is rejected before anything is
/// touched.
pub fn run<B: StorageBackend>(store: &mut PageStore<B>, text: &str) -> Result<CmdResult> {
    let pages = decode_pages(text)?;
    if pages.is_empty() {
        return Err(FolioError::Decode("import contains no pages".to_string()));
    }

    let count = pages.len();
    store.commit(|notebook| notebook.replace(pages))?;
    tracing::info!(count, "imported pages");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Imported {} pages", count)));
    Ok(result)
}
