use crate::commands::helpers::resolve_one;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::PageSelector;
use crate::store::backend::StorageBackend;
use crate::store::page_store::PageStore;

/// Re-parents the selected page. `target = None` moves it to the root level.
pub fn run<B: StorageBackend>(
    store: &mut PageStore<B>,
    selector: &PageSelector,
    target: Option<&PageSelector>,
) -> Result<CmdResult> {
    let (_, id) = resolve_one(store.notebook(), selector)?;
    let target_id = match target {
        Some(target) => Some(resolve_one(store.notebook(), target)?.1),
        None => None,
    };

    let page = store.try_commit(|notebook| {
        notebook.move_page(&id, target_id.as_deref())?;
        Ok(notebook.get(&id).cloned())
    })?;

    let mut result = CmdResult::default();
    if let Some(page) = page {
        let destination = match target_id.as_deref().and_then(|t| store.notebook().get(t)) {
            Some(parent) => format!("under {}", parent.title),
            None => "to the top level".to_string(),
        };
        result.add_message(CmdMessage::success(format!(
            "Moved {} {}",
            page.title, destination
        )));
        result.affected_pages.push(page);
    }
    Ok(result)
}
