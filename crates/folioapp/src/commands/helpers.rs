use crate::error::{FolioError, Result};
use crate::index::{index_pages, DisplayPage, PageSelector};
use crate::notebook::Notebook;

/// The full listing, each page tagged with its display index.
pub fn indexed_pages(notebook: &Notebook) -> Vec<DisplayPage> {
    index_pages(notebook, "")
}

/// Resolves selectors to `(display index, page id)` pairs, in selector order.
///
/// A term first matches an exact page id, then a case-insensitive title
/// fragment that must be unique. A number with no page at that index is
/// retried as a title fragment, so a page titled "2024" stays reachable.
pub fn resolve_selectors(
    notebook: &Notebook,
    selectors: &[PageSelector],
) -> Result<Vec<(usize, String)>> {
    let listing = indexed_pages(notebook);
    let mut results = Vec::new();

    for selector in selectors {
        let hit = match selector {
            PageSelector::Index(n) => match listing.iter().find(|dp| dp.index == *n) {
                Some(dp) => dp,
                None => match resolve_term(&listing, &n.to_string()) {
                    Err(FolioError::PageNotFound(_)) => {
                        return Err(FolioError::Api(format!("Index {} not found", n)))
                    }
                    other => other?,
                },
            },
            PageSelector::Term(term) => resolve_term(&listing, term)?,
        };
        let pair = (hit.index, hit.page.id.clone());
        if !results.contains(&pair) {
            results.push(pair);
        }
    }

    Ok(results)
}

/// Resolves exactly one selector.
pub fn resolve_one(notebook: &Notebook, selector: &PageSelector) -> Result<(usize, String)> {
    resolve_selectors(notebook, std::slice::from_ref(selector))?
        .into_iter()
        .next()
        .ok_or_else(|| FolioError::PageNotFound(selector.to_string()))
}

fn resolve_term<'a>(listing: &'a [DisplayPage], term: &str) -> Result<&'a DisplayPage> {
    if term.is_empty() {
        return Err(FolioError::Api("Empty page selector".to_string()));
    }
    if let Some(exact) = listing.iter().find(|dp| dp.page.id == term) {
        return Ok(exact);
    }

    let needle = term.to_lowercase();
    let matches: Vec<&DisplayPage> = listing
        .iter()
        .filter(|dp| dp.page.title.to_lowercase().contains(&needle))
        .collect();

    match matches.as_slice() {
        [] => Err(FolioError::PageNotFound(format!("\"{}\"", term))),
        [only] => Ok(only),
        many => Err(FolioError::Api(format!(
            "Term \"{}\" matches {} pages. Please be more specific.",
            term,
            many.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PagePatch;

    fn notebook() -> (Notebook, String, String) {
        let mut notebook = Notebook::new();
        let taxes = notebook.create(None).id;
        notebook.edit(&taxes, PagePatch::title("Taxes 2024"));
        let groceries = notebook.create(None).id;
        notebook.edit(&groceries, PagePatch::title("Groceries"));
        (notebook, taxes, groceries)
    }

    #[test]
    fn resolves_indexes_ids_and_titles() {
        let (notebook, taxes, groceries) = notebook();
        let resolved = resolve_selectors(
            &notebook,
            &[
                PageSelector::Index(1),
                PageSelector::Term(taxes.clone()),
                PageSelector::Term("GROC".to_string()),
            ],
        )
        .unwrap();
        assert_eq!(
            resolved,
            vec![(1, groceries.clone()), (2, taxes)]
        );
    }

    #[test]
    fn unknown_index_and_term_fail() {
        let (notebook, _, _) = notebook();
        assert!(resolve_selectors(&notebook, &[PageSelector::Index(9)]).is_err());
        assert!(matches!(
            resolve_one(&notebook, &PageSelector::Term("zzz".to_string())),
            Err(FolioError::PageNotFound(_))
        ));
    }

    #[test]
    fn unmatched_index_falls_back_to_numeric_title() {
        let (mut notebook, _, _) = notebook();
        let year = notebook.create(None).id;
        notebook.edit(&year, PagePatch::title("2023"));

        let resolved = resolve_one(&notebook, &PageSelector::Index(2023)).unwrap();
        assert_eq!(resolved.1, year);

        // "Taxes 2024" is the only title holding the number.
        let (_, taxes) = resolve_one(&notebook, &PageSelector::Index(2024)).unwrap();
        assert_eq!(notebook.get(&taxes).unwrap().title, "Taxes 2024");

        let err = resolve_one(&notebook, &PageSelector::Index(77)).unwrap_err();
        assert!(err.to_string().contains("Index 77 not found"));
    }

    #[test]
    fn ambiguous_term_fails() {
        let (notebook, _, _) = notebook();
        let err = resolve_one(&notebook, &PageSelector::Term("e".to_string())).unwrap_err();
        assert!(err.to_string().contains("more specific"));
    }
}
