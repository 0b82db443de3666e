use crate::commands::helpers::resolve_one;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::PageSelector;
use crate::store::backend::StorageBackend;
use crate::store::page_store::PageStore;

/// Deletes the selected page together with all of its descendants.
pub fn run<B: StorageBackend>(
    store: &mut PageStore<B>,
    selector: &PageSelector,
) -> Result<CmdResult> {
    let (index, id) = resolve_one(store.notebook(), selector)?;
    run_id(store, &id, Some(index))
}

/// Deletes by page id. An unknown id, the last page, or a subtree covering
/// every page leaves the collection untouched and is reported as a warning.
pub fn run_id<B: StorageBackend>(
    store: &mut PageStore<B>,
    id: &str,
    index: Option<usize>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(page) = store.notebook().get(id).cloned() else {
        result.add_message(CmdMessage::warning(format!("No page with id {}", id)));
        return Ok(result);
    };

    let removed = store.commit_changed(|notebook| {
        let removed = notebook.delete(id);
        (!removed.is_empty()).then_some(removed)
    })?;
    let Some(removed) = removed else {
        result.add_message(CmdMessage::warning(
            "At least one page must remain, nothing was deleted",
        ));
        return Ok(result);
    };

    let label = index.map(|i| format!(" ({})", i)).unwrap_or_default();
    let descendants = removed.len() - 1;
    let message = if descendants == 0 {
        format!("Page deleted{}: {}", label, page.title)
    } else {
        format!(
            "Page deleted{}: {} (and {} nested page{})",
            label,
            page.title,
            descendants,
            if descendants == 1 { "" } else { "s" }
        )
    };
    result.add_message(CmdMessage::success(message));
    result.affected_pages.push(page);
    Ok(result)
}
