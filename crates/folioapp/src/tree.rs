//! # Page Forest
//!
//! Pages live in one flat `Vec<Page>`; the tree exists only as `parent_id`
//! references. [`Forest`] resolves those references once per query into an
//! adjacency map of positions (parent → children), so traversals never chase
//! embedded pointers and never rescan the whole list per node.
//!
//! A page whose `parent_id` names no existing page is a root.
//!
//! Cyclic parent references are not repaired here. Walks keep a seen-set and
//! log a warning when they revisit a page, so they always terminate.

use crate::model::Page;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet, VecDeque};

/// Favorites first, then most recently updated first.
pub fn display_order(a: &Page, b: &Page) -> Ordering {
    b.is_favorite
        .cmp(&a.is_favorite)
        .then_with(|| b.updated_at.cmp(&a.updated_at))
}

pub struct Forest<'a> {
    pages: &'a [Page],
    positions: HashMap<&'a str, usize>,
    children: HashMap<usize, Vec<usize>>,
    roots: Vec<usize>,
}

impl<'a> Forest<'a> {
    pub fn build(pages: &'a [Page]) -> Self {
        let mut positions = HashMap::new();
        for (pos, page) in pages.iter().enumerate() {
            // First match wins for duplicated ids.
            positions.entry(page.id.as_str()).or_insert(pos);
        }

        let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();
        for (pos, page) in pages.iter().enumerate() {
            match page
                .parent_id
                .as_deref()
                .and_then(|parent| positions.get(parent))
            {
                Some(&parent) => children.entry(parent).or_default().push(pos),
                None => roots.push(pos),
            }
        }

        let by_display = |a: &usize, b: &usize| display_order(&pages[*a], &pages[*b]);
        roots.sort_by(by_display);
        for siblings in children.values_mut() {
            siblings.sort_by(by_display);
        }

        Self {
            pages,
            positions,
            children,
            roots,
        }
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn parent_of(&self, pos: usize) -> Option<usize> {
        self.pages[pos]
            .parent_id
            .as_deref()
            .and_then(|parent| self.position(parent))
    }

    /// Number of existing ancestors above `pos`.
    pub fn depth(&self, pos: usize) -> usize {
        let mut seen = HashSet::from([pos]);
        let mut depth = 0;
        let mut current = pos;
        while let Some(parent) = self.parent_of(current) {
            if !seen.insert(parent) {
                tracing::warn!(
                    page = %self.pages[pos].id,
                    "parent cycle detected while computing depth"
                );
                break;
            }
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Depth-first, root-to-leaf walk over the sorted roots, yielding `(page, depth)`.
    ///
    /// Pages that no root reaches (members of a parent cycle and everything
    /// below them) are walked afterwards starting at depth 0.
    pub fn preorder(&self) -> Vec<(&'a Page, usize)> {
        let mut visited = vec![false; self.pages.len()];
        let mut out = Vec::with_capacity(self.pages.len());

        for &root in &self.roots {
            self.walk(root, &mut visited, &mut out);
        }

        if out.len() < self.pages.len() {
            let mut stranded: Vec<usize> = (0..self.pages.len()).filter(|p| !visited[*p]).collect();
            tracing::warn!(
                count = stranded.len(),
                "pages unreachable from any root, parent references form a cycle"
            );
            stranded.sort_by(|a, b| display_order(&self.pages[*a], &self.pages[*b]));
            for pos in stranded {
                if !visited[pos] {
                    self.walk(pos, &mut visited, &mut out);
                }
            }
        }

        out
    }

    fn walk(&self, start: usize, visited: &mut [bool], out: &mut Vec<(&'a Page, usize)>) {
        let mut stack = vec![(start, 0usize)];
        while let Some((pos, depth)) = stack.pop() {
            if visited[pos] {
                continue;
            }
            visited[pos] = true;
            out.push((&self.pages[pos], depth));
            if let Some(kids) = self.children.get(&pos) {
                // Reverse so the first sorted child is popped first.
                for &kid in kids.iter().rev() {
                    if !visited[kid] {
                        stack.push((kid, depth + 1));
                    }
                }
            }
        }
    }
}

/// The page `id` and every page transitively below it, by id.
///
/// Follows raw `parent_id` edges breadth-first until no new id is added.
pub fn subtree_ids(pages: &[Page], id: &str) -> HashSet<String> {
    let mut edges: HashMap<&str, Vec<&str>> = HashMap::new();
    for page in pages {
        if let Some(parent) = page.parent_id.as_deref() {
            edges.entry(parent).or_default().push(page.id.as_str());
        }
    }

    let mut closure = HashSet::from([id.to_string()]);
    let mut queue = VecDeque::from([id]);
    while let Some(current) = queue.pop_front() {
        for &child in edges.get(current).into_iter().flatten() {
            if closure.insert(child.to_string()) {
                queue.push_back(child);
            }
        }
    }
    closure
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn page(id: &str, parent: Option<&str>, age_minutes: i64) -> Page {
        let mut page = Page::new(parent.map(str::to_string));
        page.id = id.to_string();
        page.title = id.to_uppercase();
        page.updated_at = Utc::now() - Duration::minutes(age_minutes);
        page
    }

    fn ids(walk: &[(&Page, usize)]) -> Vec<(String, usize)> {
        walk.iter().map(|(p, d)| (p.id.clone(), *d)).collect()
    }

    #[test]
    fn favorites_sort_before_newer_pages() {
        let mut old_fav = page("a", None, 60);
        old_fav.is_favorite = true;
        let fresh = page("b", None, 1);
        assert_eq!(display_order(&old_fav, &fresh), Ordering::Less);
        assert_eq!(display_order(&fresh, &old_fav), Ordering::Greater);
    }

    #[test]
    fn newer_sorts_first_among_equals() {
        let older = page("a", None, 10);
        let newer = page("b", None, 1);
        assert_eq!(display_order(&newer, &older), Ordering::Less);
    }

    #[test]
    fn preorder_walks_sorted_siblings_depth_first() {
        let pages = vec![
            page("a", None, 5),
            page("a1", Some("a"), 3),
            page("a2", Some("a"), 1),
            page("b", None, 2),
            page("a2x", Some("a2"), 9),
        ];
        let forest = Forest::build(&pages);
        assert_eq!(
            ids(&forest.preorder()),
            vec![
                ("b".to_string(), 0),
                ("a".to_string(), 0),
                ("a2".to_string(), 1),
                ("a2x".to_string(), 2),
                ("a1".to_string(), 1),
            ]
        );
    }

    #[test]
    fn missing_parent_makes_a_root() {
        let pages = vec![page("a", Some("ghost"), 1)];
        let forest = Forest::build(&pages);
        assert_eq!(forest.depth(0), 0);
        assert_eq!(ids(&forest.preorder()), vec![("a".to_string(), 0)]);
    }

    #[test]
    fn depth_counts_existing_ancestors() {
        let pages = vec![
            page("a", None, 1),
            page("b", Some("a"), 1),
            page("c", Some("b"), 1),
        ];
        let forest = Forest::build(&pages);
        assert_eq!(forest.depth(2), 2);
        assert_eq!(forest.depth(1), 1);
        assert_eq!(forest.depth(0), 0);
    }

    #[test]
    fn cycles_terminate_and_stay_visible() {
        let pages = vec![
            page("root", None, 1),
            page("x", Some("y"), 2),
            page("y", Some("x"), 3),
        ];
        let forest = Forest::build(&pages);
        assert_eq!(forest.depth(1), 1);

        let walk = ids(&forest.preorder());
        assert_eq!(walk.len(), 3);
        assert_eq!(walk[0], ("root".to_string(), 0));
        assert_eq!(walk[1], ("x".to_string(), 0));
        assert_eq!(walk[2], ("y".to_string(), 1));
    }

    #[test]
    fn self_parent_does_not_loop() {
        let pages = vec![page("a", Some("a"), 1)];
        let forest = Forest::build(&pages);
        assert_eq!(forest.depth(0), 0);
        assert_eq!(forest.preorder().len(), 1);
    }

    #[test]
    fn subtree_is_transitive_closure() {
        let pages = vec![
            page("a", None, 1),
            page("b", Some("a"), 1),
            page("c", Some("b"), 1),
            page("d", None, 1),
        ];
        let closure = subtree_ids(&pages, "a");
        let expected: HashSet<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(closure, expected);
    }

    #[test]
    fn subtree_survives_cycles() {
        let pages = vec![page("x", Some("y"), 1), page("y", Some("x"), 1)];
        assert_eq!(subtree_ids(&pages, "x").len(), 2);
    }
}
