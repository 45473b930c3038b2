//! Column boundary dragging.
//!
//! A drag moves the boundary between a column and its right-hand neighbour:
//! one grows by exactly what the other loses, so the table total is
//! unchanged. The delta is clamped so neither column drops below
//! [`MIN_COLUMN_WIDTH`].

use tracing::debug;

use crate::commands::edit_page;
use crate::model::{ColumnKey, ColumnWidths, Page, MIN_COLUMN_WIDTH};

pub fn resize_column(pages: &[Page], page_id: &str, key: ColumnKey, delta: f64) -> Vec<Page> {
    edit_page(pages, page_id, |page| {
        page.table_column_widths = drag_boundary(page.table_column_widths, key, delta);
    })
}

/// Move the right edge of `key` by `delta` percentage points.
pub fn drag_boundary(widths: ColumnWidths, key: ColumnKey, delta: f64) -> ColumnWidths {
    let Some(right) = key.next() else {
        return widths;
    };
    if !delta.is_finite() {
        return widths;
    }

    let left_width = widths.get(key);
    let right_width = widths.get(right);
    let shrink_limit = (left_width - MIN_COLUMN_WIDTH).max(0.0);
    let grow_limit = (right_width - MIN_COLUMN_WIDTH).max(0.0);
    let applied = delta.clamp(-shrink_limit, grow_limit);
    if applied != delta {
        debug!(column = key.key(), delta, applied, "column drag clamped");
    }

    let mut next = widths;
    next.set(key, left_width + applied);
    next.set(right, right_width - applied);
    next
}
