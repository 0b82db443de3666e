use crate::codec::encode_pages;
use crate::commands::helpers::{indexed_pages, resolve_selectors};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FolioError, Result};
use crate::index::{DisplayPage, PageSelector};
use crate::store::backend::StorageBackend;
use crate::store::page_store::PageStore;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use pulldown_cmark_to_cmark::cmark;

/// The whole collection, in the same JSON format as the storage blob.
pub fn run_json<B: StorageBackend>(store: &PageStore<B>) -> Result<CmdResult> {
    let pages = store.notebook().pages();
    let encoded = encode_pages(pages)?;

    let mut result = CmdResult::default().with_output(encoded);
    result.add_message(CmdMessage::success(format!("Exported {} pages", pages.len())));
    Ok(result)
}

/// Selected pages (all of them when `selectors` is empty) merged into one
/// markdown document.
pub fn run_markdown<B: StorageBackend>(
    store: &PageStore<B>,
    selectors: &[PageSelector],
) -> Result<CmdResult> {
    let pages = resolve_pages(store, selectors)?;
    let merged = merge_as_markdown(&pages)?;

    let mut result = CmdResult::default().with_output(merged);
    result.add_message(CmdMessage::success(format!("Exported {} pages", pages.len())));
    Ok(result)
}

fn resolve_pages<B: StorageBackend>(
    store: &PageStore<B>,
    selectors: &[PageSelector],
) -> Result<Vec<DisplayPage>> {
    let listing = indexed_pages(store.notebook());
    if selectors.is_empty() {
        return Ok(listing);
    }
    let resolved = resolve_selectors(store.notebook(), selectors)?;
    Ok(resolved
        .iter()
        .filter_map(|(_, id)| listing.iter().find(|dp| &dp.page.id == id).cloned())
        .collect())
}

fn merge_as_markdown(pages: &[DisplayPage]) -> Result<String> {
    let mut output = String::new();

    for (i, dp) in pages.iter().enumerate() {
        if i > 0 {
            output.push_str("\n\n---\n\n");
        }

        output.push_str("## ");
        output.push_str(&dp.page.title);

        let body = dp.page.content.trim();
        if !body.is_empty() {
            output.push_str("\n\n");
            output.push_str(&bump_markdown_headers(body)?);
        }
    }

    output.push('\n');
    Ok(output)
}

/// Pushes every heading below the `##` page title: H1 becomes H3, capped at H6.
pub fn bump_markdown_headers(content: &str) -> Result<String> {
    let events: Vec<Event> = Parser::new_ext(content, Options::all())
        .map(|event| match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => Event::Start(Tag::Heading {
                level: bump_heading_level(level),
                id,
                classes,
                attrs,
            }),
            Event::End(TagEnd::Heading(level)) => {
                Event::End(TagEnd::Heading(bump_heading_level(level)))
            }
            other => other,
        })
        .collect();

    let mut output = String::new();
    cmark(events.iter(), &mut output)
        .map_err(|e| FolioError::Api(format!("Markdown rendering failed: {}", e)))?;
    Ok(output)
}

fn bump_heading_level(level: HeadingLevel) -> HeadingLevel {
    match level {
        HeadingLevel::H1 => HeadingLevel::H3,
        HeadingLevel::H2 => HeadingLevel::H4,
        HeadingLevel::H3 => HeadingLevel::H5,
        _ => HeadingLevel::H6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_pages;
    use crate::commands::{create, update};
    use crate::model::PagePatch;
    use crate::store::mem_backend::MemBackend;

    fn store_with(title: &str, content: &str) -> PageStore<MemBackend> {
        let mut store = PageStore::open(MemBackend::new()).unwrap();
        let id = create::run(&mut store, None, Some(title.into()))
            .unwrap()
            .affected_pages[0]
            .id
            .clone();
        update::run(&mut store, &id, PagePatch::content(content)).unwrap();
        store
    }

    #[test]
    fn json_export_decodes_to_the_collection() {
        let store = store_with("Groceries", "milk");
        let output = run_json(&store).unwrap().output.unwrap();
        assert_eq!(decode_pages(&output).unwrap(), store.notebook().pages());
    }

    #[test]
    fn markdown_export_merges_selected_pages() {
        let store = store_with("Recipes", "# Soup\n\nBoil water");
        let output = run_markdown(&store, &[PageSelector::Term("recipes".into())])
            .unwrap()
            .output
            .unwrap();
        assert!(output.starts_with("## Recipes"));
        assert!(output.contains("### Soup"));
        assert!(output.contains("Boil water"));
        assert!(!output.contains("---"));
    }

    #[test]
    fn markdown_export_defaults_to_every_page() {
        let store = store_with("Recipes", "text");
        let output = run_markdown(&store, &[]).unwrap().output.unwrap();
        assert!(output.contains("## Recipes"));
        assert!(output.contains("## Welcome to Folio"));
        assert!(output.contains("\n---\n"));
    }

    #[test]
    fn test_bump_markdown_headers_caps_at_h6() {
        let output = bump_markdown_headers("##### H5\n\n###### H6\n\nText").unwrap();
        assert!(output.contains("###### H5"));
        assert_eq!(output.matches("######").count(), 2);
    }

    #[test]
    fn test_bump_markdown_headers_preserves_non_headers() {
        let input = "Regular paragraph\n\n- List item\n\n```rust\ncode\n```";
        let output = bump_markdown_headers(input).unwrap();
        assert!(output.contains("Regular paragraph"));
        assert!(output.contains("List item"));
        assert!(output.contains("code"));
    }
}
