use crate::commands::helpers::resolve_one;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FolioError, Result};
use crate::index::PageSelector;
use crate::store::backend::StorageBackend;
use crate::store::page_store::PageStore;

pub fn run<B: StorageBackend>(
    store: &mut PageStore<B>,
    selector: &PageSelector,
) -> Result<CmdResult> {
    let (_, id) = resolve_one(store.notebook(), selector)?;
    run_id(store, &id)
}

pub fn run_id<B: StorageBackend>(store: &mut PageStore<B>, id: &str) -> Result<CmdResult> {
    let page = store
        .commit_changed(|notebook| {
            notebook.toggle_favorite(id)?;
            notebook.get(id).cloned()
        })?
        .ok_or_else(|| FolioError::PageNotFound(id.to_string()))?;

    let mut result = CmdResult::default();
    let verb = if page.is_favorite {
        "Favorited"
    } else {
        "Unfavorited"
    };
    result.add_message(CmdMessage::success(format!("{}: {}", verb, page.title)));
    result.affected_pages.push(page);
    Ok(result)
}
