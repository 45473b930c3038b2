use tracing::{debug, warn};

use crate::commands::rows::replace_rows;
use crate::error::{AuditError, Result};
use crate::ids::IdGenerator;
use crate::model::Page;
use crate::outline;

/// Replace the first page's rows with the rows parsed from `text`.
///
/// Returns the new pages and the number of rows recognized. When nothing is
/// recognized the document is left alone and `NothingRecognized` is returned.
pub fn fill_from_outline(pages: &[Page], text: &str, ids: &impl IdGenerator) -> Result<(Vec<Page>, usize)> {
    let rows = outline::parse(text, ids);
    if rows.is_empty() {
        warn!("outline fill rejected: no rows recognized");
        return Err(AuditError::NothingRecognized);
    }
    let Some(first) = pages.first() else {
        return Err(AuditError::Api("document has no pages".to_string()));
    };

    let count = rows.len();
    debug!(page_id = %first.id, rows = count, "filled page from outline");
    Ok((replace_rows(pages, &first.id, rows), count))
}
