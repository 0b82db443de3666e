use crate::commands::helpers::resolve_one;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::PageSelector;
use crate::model::PagePatch;
use crate::store::backend::StorageBackend;
use crate::store::page_store::PageStore;

/// Applies an editor change to the page `id` and persists the collection.
///
/// An unknown id is not an error: the editor may hold a page that was deleted
/// underneath it. Nothing is written in that case.
pub fn run<B: StorageBackend>(
    store: &mut PageStore<B>,
    id: &str,
    patch: PagePatch,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if store.notebook().get(id).is_none() {
        tracing::debug!(id, "edit for unknown page ignored");
        result.add_message(CmdMessage::warning(format!("No page with id {}", id)));
        return Ok(result);
    }
    if patch.is_empty() {
        result.add_message(CmdMessage::info("Nothing to change"));
        return Ok(result);
    }

    let page = store.commit(|notebook| {
        notebook.edit(id, patch);
        notebook.get(id).cloned()
    })?;

    if let Some(page) = page {
        result.add_message(CmdMessage::success(format!("Page updated: {}", page.title)));
        result.affected_pages.push(page);
    }
    Ok(result)
}

/// Same as [`run`], addressing the page by selector.
pub fn run_selected<B: StorageBackend>(
    store: &mut PageStore<B>,
    selector: &PageSelector,
    patch: PagePatch,
) -> Result<CmdResult> {
    let (_, id) = resolve_one(store.notebook(), selector)?;
    run(store, &id, patch)
}
