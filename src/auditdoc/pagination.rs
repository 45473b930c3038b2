//! # Pagination Engine
//!
//! Two structural operations over the page list. Both are pure: they take the
//! current snapshot and return a new one, never mutating in place.
//!
//! ## Page Break (`split_at`)
//!
//! ```text
//! before:  P1 [r0 r1 r2 r3 r4]            split_at(P1, 2)
//! after:   P1 [r0 r1]   P1' [r2 r3 r4]
//! ```
//!
//! `P1'` is inserted right after `P1`. It copies `P1`'s header, doc-meta values,
//! column labels and widths, colors and logo, with a fresh page id and fresh
//! doc-meta ids. The tail rows are moved, not cloned: they keep their ids.
//! Splitting before the first row or at/after the last is a no-op, as is
//! addressing an unknown page.
//!
//! ## Flatten (`merge_all`)
//!
//! ```text
//! before:  P0 [a b]   P1 [c d e]   P2 [f]
//! after:   P0 [a b c d e f]
//! ```
//!
//! The result keeps only the first page's header, meta and styling; the
//! other pages' headers are dropped.
//!
//! Neither operation checks row-id uniqueness across pages.

use tracing::debug;

use crate::ids::IdGenerator;
use crate::model::Page;

/// Insert a page break above row `row_index` of the page `page_id`.
pub fn split_at(pages: &[Page], page_id: &str, row_index: usize, ids: &impl IdGenerator) -> Vec<Page> {
    let Some(pos) = pages.iter().position(|p| p.id == page_id) else {
        debug!(page_id, "split skipped: unknown page");
        return pages.to_vec();
    };

    let page = &pages[pos];
    if row_index == 0 || row_index >= page.rows.len() {
        debug!(page_id, row_index, rows = page.rows.len(), "split skipped: index out of range");
        return pages.to_vec();
    }

    let mut head = page.clone();
    let tail_rows = head.rows.split_off(row_index);
    let tail = page.sibling(ids, tail_rows);
    debug!(page_id, new_page = %tail.id, row_index, "split page");

    let mut next = Vec::with_capacity(pages.len() + 1);
    next.extend_from_slice(&pages[..pos]);
    next.push(head);
    next.push(tail);
    next.extend_from_slice(&pages[pos + 1..]);
    next
}

/// Concatenate every page's rows onto the first page.
pub fn merge_all(pages: &[Page]) -> Vec<Page> {
    let Some((first, rest)) = pages.split_first() else {
        return Vec::new();
    };
    if rest.is_empty() {
        return pages.to_vec();
    }

    let mut merged = first.clone();
    merged
        .rows
        .extend(rest.iter().flat_map(|p| p.rows.iter().cloned()));
    debug!(pages = pages.len(), rows = merged.rows.len(), "merged pages");
    vec![merged]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::model::{new_page, new_question_row, Row};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn page_with_rows(id: &str, count: usize, ids: &SequentialIds) -> Page {
        let mut page = new_page(id, ids);
        page.rows = (0..count).map(|_| new_question_row(ids)).collect();
        page
    }

    fn row_ids(rows: &[Row]) -> Vec<String> {
        rows.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn test_split_moves_tail_to_new_page() {
        let ids = SequentialIds::new("t");
        let mut page = page_with_rows("p1", 5, &ids);
        page.logo_data_url = Some("data:logo".into());
        page.doc_title = "AUDIT".into();
        let original = row_ids(&page.rows);

        let pages = split_at(&[page.clone()], "p1", 2, &ids);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].id, "p1");
        assert_eq!(row_ids(&pages[0].rows), original[..2].to_vec());
        assert_eq!(row_ids(&pages[1].rows), original[2..].to_vec());

        let new_page = &pages[1];
        assert_ne!(new_page.id, "p1");
        assert_eq!(new_page.doc_title, "AUDIT");
        assert_eq!(new_page.logo_data_url.as_deref(), Some("data:logo"));
        assert_eq!(new_page.table_columns, page.table_columns);
        assert_eq!(new_page.table_column_widths, page.table_column_widths);
        assert_eq!(new_page.header_color, page.header_color);
        for (a, b) in page.doc_meta.iter().zip(&new_page.doc_meta) {
            assert_ne!(a.id, b.id);
            assert_eq!((&a.label, &a.value), (&b.label, &b.value));
        }
    }

    #[test]
    fn test_split_conserves_rows() {
        let ids = SequentialIds::new("t");
        for k in 1..6 {
            let page = page_with_rows("p1", 6, &ids);
            let pages = split_at(&[page.clone()], "p1", k, &ids);
            let mut joined = pages[0].rows.clone();
            joined.extend(pages[1].rows.iter().cloned());
            assert_eq!(joined, page.rows);

            let head: HashSet<_> = pages[0].rows.iter().map(|r| r.id()).collect();
            assert!(pages[1].rows.iter().all(|r| !head.contains(r.id())));
        }
    }

    #[test]
    fn test_split_inserts_after_target() {
        let ids = SequentialIds::new("t");
        let pages = vec![
            page_with_rows("a", 2, &ids),
            page_with_rows("b", 3, &ids),
            page_with_rows("c", 1, &ids),
        ];
        let next = split_at(&pages, "b", 1, &ids);
        let order: Vec<&str> = next.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order.len(), 4);
        assert_eq!(order[0], "a");
        assert_eq!(order[1], "b");
        assert_eq!(order[3], "c");
        assert_eq!(next[2].rows.len(), 2);
    }

    #[test]
    fn test_split_out_of_range_is_noop() {
        let ids = SequentialIds::new("t");
        let pages = vec![page_with_rows("p1", 3, &ids)];
        assert_eq!(split_at(&pages, "p1", 0, &ids), pages);
        assert_eq!(split_at(&pages, "p1", 3, &ids), pages);
        assert_eq!(split_at(&pages, "p1", 10, &ids), pages);
        assert_eq!(split_at(&pages, "missing", 1, &ids), pages);
    }

    #[test]
    fn test_merge_flattens_in_order() {
        let ids = SequentialIds::new("t");
        let mut pages = vec![
            page_with_rows("p0", 2, &ids),
            page_with_rows("p1", 3, &ids),
            page_with_rows("p2", 1, &ids),
        ];
        pages[1].company_name = "Other".into();
        let expected: Vec<String> = pages.iter().flat_map(|p| row_ids(&p.rows)).collect();

        let merged = merge_all(&pages);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].rows.len(), 6);
        assert_eq!(row_ids(&merged[0].rows), expected);
        assert_eq!(merged[0].id, "p0");
        assert_eq!(merged[0].company_name, pages[0].company_name);
        assert_eq!(merged[0].doc_meta, pages[0].doc_meta);
    }

    #[test]
    fn test_merge_single_or_empty_is_noop() {
        let ids = SequentialIds::new("t");
        let pages = vec![page_with_rows("p0", 2, &ids)];
        assert_eq!(merge_all(&pages), pages);
        assert!(merge_all(&[]).is_empty());
    }

    #[test]
    fn test_split_then_merge_restores_rows() {
        let ids = SequentialIds::new("t");
        let page = page_with_rows("p0", 4, &ids);
        let split = split_at(&[page.clone()], "p0", 3, &ids);
        let merged = merge_all(&split);
        assert_eq!(merged, vec![page]);
    }
}
