//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the single
//! entry point for all folio operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (parsing raw selector strings into [`PageSelector`]s)
//! - **Owns the session state**: the loaded pages, the backup transport and the config
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or file formatting
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Mutations
//!
//! Every mutating call persists the full collection before returning. An
//! editor front end calls [`FolioApi::edit_page`] with a [`PagePatch`] whenever
//! the user commits a change; it is the one write path for page bodies.
//!
//! ## Generic Over Storage and Transport
//!
//! `FolioApi<B: StorageBackend, T: BackupTransport>`:
//! - Production: `FolioApi<FsBackend, GistTransport>`
//! - Testing: `FolioApi<MemBackend, MemTransport>`

use crate::commands::{self, CmdMessage, CmdResult};
use crate::config::FolioConfig;
use crate::error::Result;
use crate::index::PageSelector;
use crate::model::{Page, PagePatch};
use crate::notebook::Notebook;
use crate::store::backend::StorageBackend;
use crate::store::page_store::PageStore;
use crate::sync::BackupTransport;

pub struct FolioApi<B: StorageBackend, T: BackupTransport> {
    store: PageStore<B>,
    transport: T,
    config: FolioConfig,
}

impl<B: StorageBackend, T: BackupTransport> FolioApi<B, T> {
    /// Loads pages (seeding the welcome page on first run) and config from `backend`.
    pub fn open(backend: B, transport: T) -> Result<Self> {
        let config = FolioConfig::load(&backend)?;
        let store = PageStore::open(backend)?;
        Ok(Self::new(store, transport, config))
    }

    pub fn new(store: PageStore<B>, transport: T, config: FolioConfig) -> Self {
        Self {
            store,
            transport,
            config,
        }
    }

    pub fn notebook(&self) -> &Notebook {
        self.store.notebook()
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list_pages(&self, query: &str) -> Result<CmdResult> {
        commands::list::run(&self.store, query)
    }

    /// The page `id` if visible under `query`, else the first visible page.
    pub fn selected(&self, id: Option<&str>, query: &str) -> Option<&Page> {
        self.store.notebook().selected(id, query)
    }

    pub fn create_page(&mut self, parent: Option<&str>, title: Option<String>) -> Result<CmdResult> {
        let parent = parent.map(PageSelector::parse);
        commands::create::run(&mut self.store, parent.as_ref(), title)
    }

    pub fn view_pages<I: AsRef<str>>(&self, selectors: &[I]) -> Result<CmdResult> {
        commands::view::run(&self.store, &parse_selectors(selectors))
    }

    /// Applies an editor change to page `id`. Unknown ids are ignored.
    pub fn edit_page(&mut self, id: &str, patch: PagePatch) -> Result<CmdResult> {
        commands::update::run(&mut self.store, id, patch)
    }

    pub fn update_page(&mut self, selector: &str, patch: PagePatch) -> Result<CmdResult> {
        commands::update::run_selected(&mut self.store, &PageSelector::parse(selector), patch)
    }

    pub fn delete_page(&mut self, selector: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, &PageSelector::parse(selector))
    }

    pub fn toggle_favorite(&mut self, selector: &str) -> Result<CmdResult> {
        commands::favorite::run(&mut self.store, &PageSelector::parse(selector))
    }

    pub fn move_page(&mut self, selector: &str, to: Option<&str>) -> Result<CmdResult> {
        let target = to.map(PageSelector::parse);
        commands::move_pages::run(
            &mut self.store,
            &PageSelector::parse(selector),
            target.as_ref(),
        )
    }

    pub fn export_json(&self) -> Result<CmdResult> {
        commands::export::run_json(&self.store)
    }

    pub fn export_markdown<I: AsRef<str>>(&self, selectors: &[I]) -> Result<CmdResult> {
        commands::export::run_markdown(&self.store, &parse_selectors(selectors))
    }

    pub fn import_json(&mut self, text: &str) -> Result<CmdResult> {
        commands::import::run(&mut self.store, text)
    }

    pub fn sync_push(&mut self, token: Option<&str>) -> Result<CmdResult> {
        commands::sync::push(&self.store, &self.transport, &mut self.config, token)
    }

    pub fn sync_pull(&mut self) -> Result<CmdResult> {
        commands::sync::pull(&mut self.store, &self.transport, &self.config.sync)
    }

    pub fn sync_status(&self) -> CmdResult {
        commands::sync::status(&self.config)
    }

    pub fn config_get(&self, key: &str) -> Result<Option<String>> {
        self.config.get(key)
    }

    pub fn config_set(&mut self, key: &str, value: &str) -> Result<CmdResult> {
        let mut updated = self.config.clone();
        updated.set(key, value)?;
        updated.save(self.store.backend())?;
        self.config = updated;

        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success(format!("{} updated", key)));
        Ok(result)
    }

    pub fn config_unset(&mut self, key: &str) -> Result<CmdResult> {
        let mut updated = self.config.clone();
        updated.unset(key)?;
        updated.save(self.store.backend())?;
        self.config = updated;

        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success(format!("{} cleared", key)));
        Ok(result)
    }
}

fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Vec<PageSelector> {
    inputs
        .iter()
        .map(|raw| PageSelector::parse(raw.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FolioError;
    use crate::store::mem_backend::MemBackend;
    use crate::store::PAGES_KEY;
    use crate::sync::mem_transport::MemTransport;

    fn api() -> FolioApi<MemBackend, MemTransport> {
        FolioApi::open(MemBackend::new(), MemTransport::new()).unwrap()
    }

    #[test]
    fn open_seeds_welcome_page() {
        let api = api();
        assert_eq!(api.notebook().len(), 1);
        assert_eq!(api.selected(None, "").unwrap().title, "Welcome to Folio");
    }

    #[test]
    fn edit_page_persists_every_change() {
        let mut api = api();
        let id = api.create_page(None, None).unwrap().affected_pages[0].id.clone();

        api.edit_page(&id, PagePatch::title("Groceries")).unwrap();
        api.edit_page(&id, PagePatch::content("milk")).unwrap();

        let stored = api.store.backend().read_blob(PAGES_KEY).unwrap().unwrap();
        assert!(stored.contains("Groceries"));
        assert!(stored.contains("milk"));
    }

    #[test]
    fn selectors_are_parsed() {
        let mut api = api();
        api.create_page(None, Some("Groceries".into())).unwrap();
        api.create_page(Some("groc"), Some("Dairy".into())).unwrap();

        let viewed = api.view_pages(&["1", "dairy"]).unwrap().listed_pages;
        assert_eq!(viewed[0].page.title, "Groceries");
        assert_eq!(viewed[1].depth, 1);

        api.toggle_favorite("welcome").unwrap();
        assert_eq!(api.list_pages("").unwrap().listed_pages[0].page.title, "Welcome to Folio");
    }

    #[test]
    fn config_changes_persist() {
        let mut api = api();
        api.config_set("token", "secret").unwrap();
        assert_eq!(api.config_get("token").unwrap().as_deref(), Some("secret"));
        assert_eq!(
            FolioConfig::load(api.store.backend()).unwrap().sync.token.as_deref(),
            Some("secret")
        );

        api.config_unset("token").unwrap();
        assert!(api.config_get("token").unwrap().is_none());
        assert!(matches!(api.config_set("bogus", "x"), Err(FolioError::Api(_))));
    }

    #[test]
    fn configured_token_drives_push_and_pull() {
        let mut api = api();
        api.config_set("token", "secret").unwrap();
        api.sync_push(None).unwrap();
        assert!(api.config().sync.store_id.is_some());

        api.create_page(None, Some("Scratch".into())).unwrap();
        api.sync_pull().unwrap();
        assert_eq!(api.notebook().len(), 1);
        assert_eq!(api.transport().store_count(), 1);
    }
}
