use tracing::debug;

use crate::commands::{edit_page, PagePatch};
use crate::ids::IdGenerator;
use crate::model::{new_page, new_question_row, ColumnKey, Page, Palette};

/// Append a page styled like the first one, with a single fresh question.
/// An empty document gets a default page.
pub fn add_page(pages: &[Page], ids: &impl IdGenerator) -> Vec<Page> {
    let mut next = pages.to_vec();
    let page = match pages.first() {
        Some(first) => first.sibling(ids, vec![new_question_row(ids)]),
        None => new_page(ids.next_id(), ids),
    };
    debug!(page_id = %page.id, "added page");
    next.push(page);
    next
}

/// Remove a page. The last remaining page is never removed.
pub fn remove_page(pages: &[Page], page_id: &str) -> Vec<Page> {
    if pages.len() <= 1 {
        debug!(page_id, "page removal refused: last page");
        return pages.to_vec();
    }
    pages.iter().filter(|p| p.id != page_id).cloned().collect()
}

pub fn update_page(pages: &[Page], page_id: &str, patch: &PagePatch) -> Vec<Page> {
    edit_page(pages, page_id, |page| patch.apply(page))
}

pub fn set_column_label(pages: &[Page], page_id: &str, key: ColumnKey, label: &str) -> Vec<Page> {
    edit_page(pages, page_id, |page| page.table_columns.set(key, label))
}

/// Recolor every page.
pub fn apply_palette(pages: &[Page], palette: &Palette) -> Vec<Page> {
    pages
        .iter()
        .cloned()
        .map(|mut page| {
            page.set_palette(palette);
            page
        })
        .collect()
}
