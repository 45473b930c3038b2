//! # Command Layer
//!
//! Each submodule implements one family of edits as pure functions over the
//! page list. The UI holds the canonical `Vec<Page>`; every command takes the
//! latest snapshot and returns a complete replacement.
//!
//! ## Role and Responsibilities
//!
//! Commands are where the invariants live:
//! - Rows and doc-meta items are addressed by id, never by position
//! - A page always keeps at least one doc-meta item
//! - A document always keeps at least one page
//! - Responses outside the active option set are refused
//!
//! ## What Commands Do NOT Do
//!
//! - **Fail on stale addresses**: unknown page/row/meta ids are no-ops that
//!   return the unchanged snapshot
//! - **Any I/O**: text comes in as `&str`, pages go out as values
//! - **User-facing wording**: the caller decides how to surface a rejection
//!
//! ## Command Modules
//!
//! - [`rows`]: add, insert-after, delete, edit rows; toggle responses
//! - [`meta`]: add, edit, reorder, remove doc-meta items
//! - [`pages`]: add/remove pages, header fields, palette, column labels
//! - [`columns`]: drag column boundaries within the width floor
//! - [`fill`]: replace the first page's body from an outline
//!
//! Page breaks and flattening live in [`crate::pagination`].

use tracing::debug;

use crate::model::{Page, Row};

pub mod columns;
pub mod fill;
pub mod meta;
pub mod pages;
pub mod rows;

/// Partial update of a page's header fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagePatch {
    pub company_name: Option<String>,
    pub company_subtitle: Option<String>,
    pub doc_title: Option<String>,
    /// `Some(None)` clears the logo.
    pub logo_data_url: Option<Option<String>>,
}

impl PagePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = Some(name.into());
        self
    }

    pub fn with_company_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.company_subtitle = Some(subtitle.into());
        self
    }

    pub fn with_doc_title(mut self, title: impl Into<String>) -> Self {
        self.doc_title = Some(title.into());
        self
    }

    pub fn with_logo(mut self, data_url: Option<String>) -> Self {
        self.logo_data_url = Some(data_url);
        self
    }

    pub(crate) fn apply(&self, page: &mut Page) {
        if let Some(name) = &self.company_name {
            page.company_name = name.clone();
        }
        if let Some(subtitle) = &self.company_subtitle {
            page.company_subtitle = subtitle.clone();
        }
        if let Some(title) = &self.doc_title {
            page.doc_title = title.clone();
        }
        if let Some(logo) = &self.logo_data_url {
            page.logo_data_url = logo.clone();
        }
    }
}

/// Partial update of a question's text fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub observation: Option<String>,
}

impl QuestionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_observation(mut self, observation: impl Into<String>) -> Self {
        self.observation = Some(observation.into());
        self
    }
}

/// Partial update of a doc-meta item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaPatch {
    pub label: Option<String>,
    pub value: Option<String>,
}

impl MetaPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            value: None,
        }
    }

    pub fn value(value: impl Into<String>) -> Self {
        Self {
            label: None,
            value: Some(value.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Copy the snapshot and run `edit` on the page `page_id`, if present.
pub(crate) fn edit_page(pages: &[Page], page_id: &str, edit: impl FnOnce(&mut Page)) -> Vec<Page> {
    let mut next = pages.to_vec();
    match next.iter_mut().find(|p| p.id == page_id) {
        Some(page) => edit(page),
        None => debug!(page_id, "edit skipped: unknown page"),
    }
    next
}

/// Copy the snapshot and run `edit` on the row `row_id` of page `page_id`.
pub(crate) fn edit_row(
    pages: &[Page],
    page_id: &str,
    row_id: &str,
    edit: impl FnOnce(&mut Row),
) -> Vec<Page> {
    edit_page(pages, page_id, |page| {
        match page.rows.iter_mut().find(|r| r.id() == row_id) {
            Some(row) => edit(row),
            None => debug!(row_id, "edit skipped: unknown row"),
        }
    })
}
