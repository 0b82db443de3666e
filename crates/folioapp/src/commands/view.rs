use crate::commands::helpers::resolve_selectors;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::{index_pages, PageSelector};
use crate::store::backend::StorageBackend;
use crate::store::page_store::PageStore;

pub fn run<B: StorageBackend>(
    store: &PageStore<B>,
    selectors: &[PageSelector],
) -> Result<CmdResult> {
    let notebook = store.notebook();
    let resolved = resolve_selectors(notebook, selectors)?;
    let listing = index_pages(notebook, "");

    let listed = resolved
        .iter()
        .filter_map(|(_, id)| listing.iter().find(|dp| &dp.page.id == id).cloned())
        .collect();
    Ok(CmdResult::default().with_listed_pages(listed))
}
