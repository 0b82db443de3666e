use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::index_pages;
use crate::store::backend::StorageBackend;
use crate::store::page_store::PageStore;

/// The tree listing, or the flat list of matches when `query` is non-blank.
pub fn run<B: StorageBackend>(store: &PageStore<B>, query: &str) -> Result<CmdResult> {
    let listed = index_pages(store.notebook(), query);
    Ok(CmdResult::default().with_listed_pages(listed))
}
