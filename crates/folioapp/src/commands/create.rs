use crate::commands::helpers::resolve_one;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::PageSelector;
use crate::model::PagePatch;
use crate::store::backend::StorageBackend;
use crate::store::page_store::PageStore;

pub fn run<B: StorageBackend>(
    store: &mut PageStore<B>,
    parent: Option<&PageSelector>,
    title: Option<String>,
) -> Result<CmdResult> {
    let parent_id = match parent {
        Some(selector) => Some(resolve_one(store.notebook(), selector)?.1),
        None => None,
    };

    let page = store.commit(|notebook| {
        let page = notebook.create(parent_id);
        match title {
            Some(title) => {
                notebook.edit(&page.id, PagePatch::title(title));
                notebook.get(&page.id).cloned().unwrap_or(page)
            }
            None => page,
        }
    })?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Page created: {}", page.title)));
    Ok(result.with_affected_pages(vec![page]))
}
