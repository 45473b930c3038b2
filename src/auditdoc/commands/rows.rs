use tracing::debug;

use crate::commands::{edit_page, edit_row, QuestionPatch};
use crate::ids::IdGenerator;
use crate::model::{new_question_row, new_section_row, OptionSet, Page, ResponseOption, Row};

pub fn append_section(pages: &[Page], page_id: &str, ids: &impl IdGenerator) -> Vec<Page> {
    edit_page(pages, page_id, |page| page.rows.push(new_section_row(ids)))
}

pub fn append_question(pages: &[Page], page_id: &str, ids: &impl IdGenerator) -> Vec<Page> {
    edit_page(pages, page_id, |page| page.rows.push(new_question_row(ids)))
}

/// Insert a placeholder question directly below `after_id`.
pub fn insert_question_after(
    pages: &[Page],
    page_id: &str,
    after_id: &str,
    ids: &impl IdGenerator,
) -> Vec<Page> {
    edit_page(pages, page_id, |page| match page.row_position(after_id) {
        Some(pos) => page.rows.insert(pos + 1, new_question_row(ids)),
        None => debug!(after_id, "insert skipped: unknown row"),
    })
}

pub fn delete_row(pages: &[Page], page_id: &str, row_id: &str) -> Vec<Page> {
    edit_page(pages, page_id, |page| page.rows.retain(|r| r.id() != row_id))
}

/// Apply a text patch to a question. Sections are left untouched.
pub fn update_question(pages: &[Page], page_id: &str, row_id: &str, patch: &QuestionPatch) -> Vec<Page> {
    edit_row(pages, page_id, row_id, |row| {
        if let Row::Question(q) = row {
            if let Some(title) = &patch.title {
                q.title = title.clone();
            }
            if let Some(description) = &patch.description {
                q.description = description.clone();
            }
            if let Some(observation) = &patch.observation {
                q.observation = observation.clone();
            }
        }
    })
}

pub fn rename_section(pages: &[Page], page_id: &str, row_id: &str, title: &str) -> Vec<Page> {
    edit_row(pages, page_id, row_id, |row| {
        if let Row::Section(s) = row {
            s.title = title.to_string();
        }
    })
}

/// Toggle `option` on a question: selecting the current response clears it.
/// Options outside `option_set` are refused.
pub fn select_response(
    pages: &[Page],
    page_id: &str,
    row_id: &str,
    option: ResponseOption,
    option_set: OptionSet,
) -> Vec<Page> {
    if !option_set.contains(option) {
        debug!(option = option.key(), "response refused: not in option set");
        return pages.to_vec();
    }
    edit_row(pages, page_id, row_id, |row| {
        if let Row::Question(q) = row {
            q.select(option);
        }
    })
}

pub fn replace_rows(pages: &[Page], page_id: &str, rows: Vec<Row>) -> Vec<Page> {
    edit_page(pages, page_id, |page| page.rows = rows)
}
