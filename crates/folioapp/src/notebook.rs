//! # Notebook
//!
//! The in-memory page collection and its derived views. The notebook knows
//! nothing about storage: callers persist [`Notebook::pages`] after mutating.
//!
//! The collection is never empty once loaded. [`Notebook::delete`] refuses to
//! remove the last page, or a subtree that covers every page.

use crate::error::{FolioError, Result};
use crate::model::{Page, PagePatch};
use crate::tree::{display_order, subtree_ids, Forest};
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct Notebook {
    pages: Vec<Page>,
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pages(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == id)
    }

    /// Replaces the whole collection (pull, import).
    pub fn replace(&mut self, pages: Vec<Page>) {
        self.pages = pages;
    }

    /// Adds a fresh "Untitled" page. Roots go to the front, children to the back.
    pub fn create(&mut self, parent_id: Option<String>) -> Page {
        let parent_id = parent_id.filter(|parent| self.get(parent).is_some());
        let page = Page::new(parent_id);
        if page.parent_id.is_some() {
            self.pages.push(page.clone());
        } else {
            self.pages.insert(0, page.clone());
        }
        page
    }

    /// Removes `id` and all of its descendants in one step.
    ///
    /// Returns the removed ids; empty when nothing was removed (unknown id,
    /// last remaining page, or a subtree spanning the whole collection).
    pub fn delete(&mut self, id: &str) -> HashSet<String> {
        if self.pages.len() <= 1 || self.get(id).is_none() {
            return HashSet::new();
        }

        let closure = subtree_ids(&self.pages, id);
        let doomed = self
            .pages
            .iter()
            .filter(|p| closure.contains(&p.id))
            .count();
        if doomed >= self.pages.len() {
            return HashSet::new();
        }

        self.pages.retain(|p| !closure.contains(&p.id));
        closure
    }

    /// Applies an editor change. Returns false when `id` is unknown.
    pub fn edit(&mut self, id: &str, patch: PagePatch) -> bool {
        let Some(page) = self.get_mut(id) else {
            return false;
        };
        if let Some(title) = patch.title {
            page.set_title(&title);
        }
        match (patch.content, patch.blocks) {
            (Some(content), Some(blocks)) => {
                page.content = content;
                page.blocks = blocks;
            }
            (Some(content), None) => page.set_content(content),
            (None, Some(blocks)) => page.set_blocks(blocks),
            (None, None) => {}
        }
        page.touch();
        true
    }

    pub fn toggle_favorite(&mut self, id: &str) -> Option<bool> {
        let page = self.get_mut(id)?;
        page.is_favorite = !page.is_favorite;
        page.touch();
        Some(page.is_favorite)
    }

    /// Re-parents `id` under `new_parent` (or to the root level).
    pub fn move_page(&mut self, id: &str, new_parent: Option<&str>) -> Result<()> {
        if self.get(id).is_none() {
            return Err(FolioError::PageNotFound(id.to_string()));
        }
        if let Some(target) = new_parent {
            if self.get(target).is_none() {
                return Err(FolioError::PageNotFound(target.to_string()));
            }
            if target == id {
                return Err(FolioError::Api("Cannot move a page into itself".to_string()));
            }
            if subtree_ids(&self.pages, id).contains(target) {
                return Err(FolioError::Api(
                    "Cannot move a page into its own descendant".to_string(),
                ));
            }
        }

        if let Some(page) = self.get_mut(id) {
            page.parent_id = new_parent.map(str::to_string);
            page.touch();
        }
        Ok(())
    }

    /// Pages to display, each with its tree depth.
    ///
    /// An empty query yields the whole forest in pre-order. A non-empty query
    /// yields a flat, sorted list of matches.
    pub fn visible(&self, query: &str) -> Vec<(&Page, usize)> {
        let forest = Forest::build(&self.pages);
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return forest.preorder();
        }

        let mut hits: Vec<(&Page, usize)> = self
            .pages
            .iter()
            .enumerate()
            .filter(|(_, page)| page.matches(&needle))
            .map(|(pos, page)| (page, forest.depth(pos)))
            .collect();
        hits.sort_by(|a, b| display_order(a.0, b.0));
        hits
    }

    /// The page `id` if it is visible under `query`, else the first visible page.
    pub fn selected(&self, id: Option<&str>, query: &str) -> Option<&Page> {
        let visible = self.visible(query);
        id.and_then(|id| visible.iter().find(|(p, _)| p.id == id))
            .or_else(|| visible.first())
            .map(|(page, _)| *page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(notebook: &mut Notebook, title: &str, parent: Option<&str>) -> String {
        let page = notebook.create(parent.map(str::to_string));
        notebook.edit(&page.id, PagePatch::title(title));
        page.id
    }

    #[test]
    fn create_returns_untitled_page() {
        let mut notebook = Notebook::new();
        let page = notebook.create(None);
        assert_eq!(page.title, "Untitled");
        assert_eq!(page.content, "");
        assert_eq!(notebook.len(), 1);
    }

    #[test]
    fn roots_insert_at_front_children_at_back() {
        let mut notebook = Notebook::new();
        let first = notebook.create(None).id;
        let second = notebook.create(None).id;
        let child = notebook.create(Some(second.clone())).id;
        let ids: Vec<&str> = notebook.pages().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec![second.as_str(), first.as_str(), child.as_str()]);
    }

    #[test]
    fn create_with_unknown_parent_makes_root() {
        let mut notebook = Notebook::new();
        let page = notebook.create(Some("nope".to_string()));
        assert!(page.parent_id.is_none());
    }

    #[test]
    fn blank_title_defaults_to_untitled() {
        let mut notebook = Notebook::new();
        let id = notebook.create(None).id;
        notebook.edit(&id, PagePatch::title("Real"));
        notebook.edit(&id, PagePatch::title("   "));
        assert_eq!(notebook.get(&id).unwrap().title, "Untitled");
    }

    #[test]
    fn edit_bumps_updated_at() {
        let mut notebook = Notebook::new();
        let page = notebook.create(None);
        assert!(notebook.edit(&page.id, PagePatch::content("hello")));
        let edited = notebook.get(&page.id).unwrap();
        assert!(edited.updated_at > page.updated_at);
        assert_eq!(edited.content, "hello");
        assert_eq!(edited.blocks[0].text, "hello");
    }

    #[test]
    fn edit_unknown_page_is_false() {
        let mut notebook = Notebook::new();
        notebook.create(None);
        assert!(!notebook.edit("missing", PagePatch::title("x")));
    }

    #[test]
    fn delete_last_page_is_noop() {
        let mut notebook = Notebook::new();
        let id = notebook.create(None).id;
        assert!(notebook.delete(&id).is_empty());
        assert_eq!(notebook.len(), 1);
    }

    #[test]
    fn delete_subtree_covering_everything_is_noop() {
        let mut notebook = Notebook::new();
        let root = notebook.create(None).id;
        notebook.create(Some(root.clone()));
        notebook.create(Some(root.clone()));
        assert!(notebook.delete(&root).is_empty());
        assert_eq!(notebook.len(), 3);
    }

    #[test]
    fn delete_removes_exactly_the_subtree() {
        let mut notebook = Notebook::new();
        let a = titled(&mut notebook, "A", None);
        let b = titled(&mut notebook, "B", Some(a.as_str()));
        let c = titled(&mut notebook, "C", Some(b.as_str()));
        let other = titled(&mut notebook, "Other", None);

        let removed = notebook.delete(&a);
        let expected: HashSet<String> = [a, b, c].into_iter().collect();
        assert_eq!(removed, expected);
        assert_eq!(notebook.len(), 1);
        assert_eq!(notebook.pages()[0].id, other);
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let mut notebook = Notebook::new();
        notebook.create(None);
        notebook.create(None);
        assert!(notebook.delete("ghost").is_empty());
        assert_eq!(notebook.len(), 2);
    }

    #[test]
    fn toggle_favorite_flips_and_bumps() {
        let mut notebook = Notebook::new();
        let page = notebook.create(None);
        assert_eq!(notebook.toggle_favorite(&page.id), Some(true));
        assert!(notebook.get(&page.id).unwrap().updated_at > page.updated_at);
        assert_eq!(notebook.toggle_favorite(&page.id), Some(false));
        assert_eq!(notebook.toggle_favorite("ghost"), None);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut notebook = Notebook::new();
        titled(&mut notebook, "Groceries", None);
        titled(&mut notebook, "Taxes", None);

        let hits = notebook.visible("rocer");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0.title, "Groceries");

        let hits = notebook.visible("TAX");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0.title, "Taxes");
    }

    #[test]
    fn search_matches_content_and_keeps_depth() {
        let mut notebook = Notebook::new();
        let parent = titled(&mut notebook, "Trips", None);
        let child = titled(&mut notebook, "Lisbon", Some(parent.as_str()));
        notebook.edit(&child, PagePatch::content("book the tram tour"));

        let hits = notebook.visible("tram");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0.id, child);
        assert_eq!(hits[0].1, 1);
    }

    #[test]
    fn visible_tree_orders_favorites_then_recency() {
        let mut notebook = Notebook::new();
        let old = titled(&mut notebook, "Old", None);
        let new = titled(&mut notebook, "New", None);
        let child = titled(&mut notebook, "Child", Some(old.as_str()));
        notebook.toggle_favorite(&old);

        let order: Vec<(String, usize)> = notebook
            .visible("")
            .into_iter()
            .map(|(p, d)| (p.id.clone(), d))
            .collect();
        assert_eq!(order, vec![(old, 0), (child, 1), (new, 0)]);
    }

    #[test]
    fn visible_pairs_respect_sort_rule() {
        let mut notebook = Notebook::new();
        for title in ["a", "b", "c", "d"] {
            titled(&mut notebook, title, None);
        }
        let b = notebook.pages()[2].id.clone();
        notebook.toggle_favorite(&b);

        let hits = notebook.visible("");
        for pair in hits.windows(2) {
            let (x, y) = (pair[0].0, pair[1].0);
            if x.is_favorite != y.is_favorite {
                assert!(x.is_favorite);
            } else {
                assert!(x.updated_at >= y.updated_at);
            }
        }
    }

    #[test]
    fn search_hits_sort_favorites_then_recency() {
        let now = chrono::Utc::now();
        let page = |title: &str, minutes_ago: i64, favorite: bool| {
            let mut page = Page::new(None);
            page.title = title.to_string();
            page.updated_at = now - chrono::TimeDelta::minutes(minutes_ago);
            page.is_favorite = favorite;
            page
        };
        let notebook = Notebook::from_pages(vec![
            page("note b", 20, false),
            page("other", 0, false),
            page("note a", 30, true),
            page("note c", 10, false),
            page("note d", 40, false),
        ]);

        let hits = notebook.visible("NOTE");
        let titles: Vec<&str> = hits.iter().map(|(p, _)| p.title.as_str()).collect();
        assert_eq!(titles, vec!["note a", "note c", "note b", "note d"]);

        for pair in hits.windows(2) {
            let (x, y) = (pair[0].0, pair[1].0);
            if x.is_favorite != y.is_favorite {
                assert!(x.is_favorite);
            } else {
                assert!(x.updated_at >= y.updated_at);
            }
        }
    }

    #[test]
    fn selected_falls_back_to_first_visible() {
        let mut notebook = Notebook::new();
        let groceries = titled(&mut notebook, "Groceries", None);
        let taxes = titled(&mut notebook, "Taxes", None);

        assert_eq!(notebook.selected(Some(groceries.as_str()), "").unwrap().id, groceries);
        assert_eq!(notebook.selected(Some(groceries.as_str()), "tax").unwrap().id, taxes);
        assert_eq!(notebook.selected(None, "").unwrap().id, taxes);
        assert!(notebook.selected(Some(taxes.as_str()), "zzz").is_none());
    }

    #[test]
    fn move_rejects_descendant_targets() {
        let mut notebook = Notebook::new();
        let a = titled(&mut notebook, "A", None);
        let b = titled(&mut notebook, "B", Some(a.as_str()));
        assert!(matches!(
            notebook.move_page(&a, Some(b.as_str())),
            Err(FolioError::Api(_))
        ));
        assert!(matches!(
            notebook.move_page(&a, Some(a.as_str())),
            Err(FolioError::Api(_))
        ));

        notebook.move_page(&b, None).unwrap();
        assert!(notebook.get(&b).unwrap().parent_id.is_none());
        notebook.move_page(&a, Some(b.as_str())).unwrap();
        assert_eq!(notebook.get(&a).unwrap().parent_id.as_deref(), Some(b.as_str()));
    }
}
