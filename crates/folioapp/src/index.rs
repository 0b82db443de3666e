//! # Page Identifiers: Id vs Display Index
//!
//! Page ids are opaque tokens (`18f3a2c01b2-4e1f0a9c`) that nobody wants to type.
//! Clients refer to pages by a **display index** instead: the 1-based position
//! of the page in the full, unfiltered tree listing.
//!
//! ## Canonical Ordering
//!
//! The index is always taken from the unfiltered listing (favorites first, then
//! most recent, children right after their parent). A search shows the same
//! index a page has in the full list, so `folio delete 3` targets the same page
//! whether or not a filter was active when the user read the number.
//!
//! ## Selectors
//!
//! - `N`: display index (`1`, `12`); when no page has that index the number is
//!   tried as a title fragment instead
//! - anything else: an exact page id, or else a case-insensitive title fragment
//!   that must match exactly one page
//!
//! Resolution lives in [`crate::commands::helpers`].

use crate::model::Page;
use crate::notebook::Notebook;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayPage {
    pub page: Page,
    pub index: usize,
    pub depth: usize,
}

/// Visible pages for `query`, each tagged with its canonical display index.
pub fn index_pages(notebook: &Notebook, query: &str) -> Vec<DisplayPage> {
    let full = notebook.visible("");
    let canonical: HashMap<&str, usize> = full
        .iter()
        .enumerate()
        .map(|(i, (page, _))| (page.id.as_str(), i + 1))
        .collect();

    let rows = if query.trim().is_empty() {
        full.clone()
    } else {
        notebook.visible(query)
    };

    rows.into_iter()
        .map(|(page, depth)| DisplayPage {
            page: page.clone(),
            index: canonical.get(page.id.as_str()).copied().unwrap_or(0),
            depth,
        })
        .collect()
}

/// A user reference to a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSelector {
    Index(usize),
    Term(String),
}

impl PageSelector {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<usize>() {
            Ok(n) if n > 0 => PageSelector::Index(n),
            _ => PageSelector::Term(trimmed.to_string()),
        }
    }
}

impl fmt::Display for PageSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSelector::Index(n) => write!(f, "{}", n),
            PageSelector::Term(term) => write!(f, "\"{}\"", term),
        }
    }
}
