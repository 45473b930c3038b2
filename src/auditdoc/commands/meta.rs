use tracing::debug;

use crate::commands::{edit_page, Direction, MetaPatch};
use crate::ids::IdGenerator;
use crate::model::{DocMetaItem, Page, META_PLACEHOLDER_LABEL};

pub fn add_meta_item(pages: &[Page], page_id: &str, ids: &impl IdGenerator) -> Vec<Page> {
    edit_page(pages, page_id, |page| {
        page.doc_meta
            .push(DocMetaItem::new(ids, META_PLACEHOLDER_LABEL, ""))
    })
}

pub fn update_meta_item(pages: &[Page], page_id: &str, item_id: &str, patch: &MetaPatch) -> Vec<Page> {
    edit_page(pages, page_id, |page| {
        let Some(item) = page.doc_meta.iter_mut().find(|m| m.id == item_id) else {
            debug!(item_id, "meta edit skipped: unknown item");
            return;
        };
        if let Some(label) = &patch.label {
            item.label = label.clone();
        }
        if let Some(value) = &patch.value {
            item.value = value.clone();
        }
    })
}

/// Swap an item with its neighbour. Moving past either edge does nothing.
pub fn move_meta_item(pages: &[Page], page_id: &str, item_id: &str, direction: Direction) -> Vec<Page> {
    edit_page(pages, page_id, |page| {
        let Some(pos) = page.doc_meta.iter().position(|m| m.id == item_id) else {
            return;
        };
        let target = match direction {
            Direction::Up => pos.checked_sub(1),
            Direction::Down => Some(pos + 1).filter(|t| *t < page.doc_meta.len()),
        };
        if let Some(target) = target {
            page.doc_meta.swap(pos, target);
        }
    })
}

/// Remove an item. The last remaining item is never removed.
pub fn remove_meta_item(pages: &[Page], page_id: &str, item_id: &str) -> Vec<Page> {
    edit_page(pages, page_id, |page| {
        if page.doc_meta.len() <= 1 {
            debug!(page_id = %page.id, "meta removal refused: last item");
            return;
        }
        page.doc_meta.retain(|m| m.id != item_id);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::model::new_page;

    fn labels(page: &Page) -> Vec<&str> {
        page.doc_meta.iter().map(|m| m.label.as_str()).collect()
    }

    #[test]
    fn test_add_meta_item() {
        let ids = SequentialIds::new("t");
        let pages = vec![new_page("p1", &ids)];
        let next = add_meta_item(&pages, "p1", &ids);
        let added = next[0].doc_meta.last().unwrap();
        assert_eq!(next[0].doc_meta.len(), 5);
        assert_eq!(added.label, META_PLACEHOLDER_LABEL);
        assert!(added.value.is_empty());
        assert!(pages[0].doc_meta.iter().all(|m| m.id != added.id));
    }

    #[test]
    fn test_update_meta_item() {
        let ids = SequentialIds::new("t");
        let pages = vec![new_page("p1", &ids)];
        let id = pages[0].doc_meta[1].id.clone();
        let next = update_meta_item(&pages, "p1", &id, &MetaPatch::value("01"));
        assert_eq!(next[0].doc_meta[1].label, "Révision");
        assert_eq!(next[0].doc_meta[1].value, "01");
        assert_eq!(update_meta_item(&pages, "p1", "nope", &MetaPatch::value("x")), pages);
    }

    #[test]
    fn test_move_meta_item() {
        let ids = SequentialIds::new("t");
        let pages = vec![new_page("p1", &ids)];
        let first = pages[0].doc_meta[0].id.clone();
        let last = pages[0].doc_meta[3].id.clone();

        let next = move_meta_item(&pages, "p1", &first, Direction::Down);
        assert_eq!(labels(&next[0]), vec!["Révision", "N° Doc", "Date", "Norme"]);

        assert_eq!(move_meta_item(&pages, "p1", &first, Direction::Up), pages);
        assert_eq!(move_meta_item(&pages, "p1", &last, Direction::Down), pages);

        let next = move_meta_item(&pages, "p1", &last, Direction::Up);
        assert_eq!(labels(&next[0]), vec!["N° Doc", "Révision", "Norme", "Date"]);
    }

    #[test]
    fn test_remove_keeps_last_item() {
        let ids = SequentialIds::new("t");
        let mut pages = vec![new_page("p1", &ids)];
        while pages[0].doc_meta.len() > 1 {
            let id = pages[0].doc_meta[0].id.clone();
            pages = remove_meta_item(&pages, "p1", &id);
        }
        let id = pages[0].doc_meta[0].id.clone();
        let next = remove_meta_item(&pages, "p1", &id);
        assert_eq!(next, pages);
        assert_eq!(next[0].doc_meta.len(), 1);
    }
}
