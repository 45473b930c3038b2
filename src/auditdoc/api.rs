//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It owns the
//! current document snapshot and is the single entry point for every UI
//! collaborator (the bundled CLI, a web front end, tests).
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns state**: the `Vec<Page>` snapshot, the id generator and the
//!   active [`OptionSet`]
//! - **Dispatches** to the appropriate command function
//! - **Replaces the snapshot wholesale** with each command's result
//! - **Normalizes inputs**: converts 1-based display numbers to ids
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`, `pagination` and `codec`
//! - **I/O operations**: Documents come in and go out as strings
//! - **Presentation concerns**: Returns data, never formatted output
//!
//! ## Change Reporting
//!
//! Edit methods return `bool`: `true` when the snapshot changed. Commands
//! addressed at stale ids are no-ops, so a UI can tell a refused edit
//! (removing the last page, toggling an option outside the set) from an
//! applied one without inspecting the pages itself.
//!
//! ## Generic Over IdGenerator
//!
//! `AuditApi<G: IdGenerator>` is generic over id minting:
//! - Production: `AuditApi<UuidIds>`
//! - Testing: `AuditApi<SequentialIds>`

use chrono::NaiveDate;
use tracing::debug;

use crate::codec;
use crate::commands::{self, Direction, MetaPatch, PagePatch, QuestionPatch};
use crate::error::{AuditError, Result};
use crate::ids::{IdGenerator, UuidIds};
use crate::model::{ColumnKey, OptionSet, Page, PageTemplate, Palette, ResponseOption};
use crate::pagination;

pub struct AuditApi<G: IdGenerator = UuidIds> {
    pages: Vec<Page>,
    ids: G,
    option_set: OptionSet,
}

impl AuditApi<UuidIds> {
    /// A one-page document built from `template`.
    pub fn new(template: &PageTemplate, option_set: OptionSet) -> Self {
        Self::with_ids(UuidIds, template, option_set)
    }
}

impl<G: IdGenerator> AuditApi<G> {
    pub fn with_ids(ids: G, template: &PageTemplate, option_set: OptionSet) -> Self {
        let page = template.new_page(ids.next_id(), &ids);
        Self {
            pages: vec![page],
            ids,
            option_set,
        }
    }

    /// Wrap an existing snapshot, e.g. one just loaded from disk.
    pub fn from_pages(pages: Vec<Page>, ids: G, option_set: OptionSet) -> Self {
        Self {
            pages,
            ids,
            option_set,
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    pub fn option_set(&self) -> OptionSet {
        self.option_set
    }

    pub fn row_count(&self) -> usize {
        self.pages.iter().map(|p| p.rows.len()).sum()
    }

    /// Resolve a 1-based page number to its id.
    pub fn page_id(&self, page_number: usize) -> Result<String> {
        page_number
            .checked_sub(1)
            .and_then(|i| self.pages.get(i))
            .map(|p| p.id.clone())
            .ok_or_else(|| AuditError::Api(format!("No page {}", page_number)))
    }

    /// Resolve 1-based page and row numbers to `(page_id, row_id)`.
    pub fn row_id(&self, page_number: usize, row_number: usize) -> Result<(String, String)> {
        let page_id = self.page_id(page_number)?;
        let page = &self.pages[page_number - 1];
        let row = row_number
            .checked_sub(1)
            .and_then(|i| page.rows.get(i))
            .ok_or_else(|| {
                AuditError::Api(format!("No row {} on page {}", row_number, page_number))
            })?;
        Ok((page_id, row.id().to_string()))
    }

    fn apply(&mut self, next: Vec<Page>) -> bool {
        let changed = next != self.pages;
        self.pages = next;
        changed
    }

    // Rows

    pub fn append_section(&mut self, page_id: &str) -> bool {
        let next = commands::rows::append_section(&self.pages, page_id, &self.ids);
        self.apply(next)
    }

    pub fn append_question(&mut self, page_id: &str) -> bool {
        let next = commands::rows::append_question(&self.pages, page_id, &self.ids);
        self.apply(next)
    }

    pub fn insert_question_after(&mut self, page_id: &str, row_id: &str) -> bool {
        let next = commands::rows::insert_question_after(&self.pages, page_id, row_id, &self.ids);
        self.apply(next)
    }

    pub fn delete_row(&mut self, page_id: &str, row_id: &str) -> bool {
        let next = commands::rows::delete_row(&self.pages, page_id, row_id);
        self.apply(next)
    }

    pub fn update_question(&mut self, page_id: &str, row_id: &str, patch: &QuestionPatch) -> bool {
        let next = commands::rows::update_question(&self.pages, page_id, row_id, patch);
        self.apply(next)
    }

    pub fn rename_section(&mut self, page_id: &str, row_id: &str, title: &str) -> bool {
        let next = commands::rows::rename_section(&self.pages, page_id, row_id, title);
        self.apply(next)
    }

    pub fn select_response(&mut self, page_id: &str, row_id: &str, option: ResponseOption) -> bool {
        let next =
            commands::rows::select_response(&self.pages, page_id, row_id, option, self.option_set);
        self.apply(next)
    }

    // Header

    pub fn add_meta_item(&mut self, page_id: &str) -> bool {
        let next = commands::meta::add_meta_item(&self.pages, page_id, &self.ids);
        self.apply(next)
    }

    pub fn update_meta_item(&mut self, page_id: &str, item_id: &str, patch: &MetaPatch) -> bool {
        let next = commands::meta::update_meta_item(&self.pages, page_id, item_id, patch);
        self.apply(next)
    }

    pub fn move_meta_item(&mut self, page_id: &str, item_id: &str, direction: Direction) -> bool {
        let next = commands::meta::move_meta_item(&self.pages, page_id, item_id, direction);
        self.apply(next)
    }

    pub fn remove_meta_item(&mut self, page_id: &str, item_id: &str) -> bool {
        let next = commands::meta::remove_meta_item(&self.pages, page_id, item_id);
        self.apply(next)
    }

    pub fn update_page(&mut self, page_id: &str, patch: &PagePatch) -> bool {
        let next = commands::pages::update_page(&self.pages, page_id, patch);
        self.apply(next)
    }

    // Pages and layout

    pub fn add_page(&mut self) -> bool {
        let next = commands::pages::add_page(&self.pages, &self.ids);
        self.apply(next)
    }

    pub fn remove_page(&mut self, page_id: &str) -> bool {
        let next = commands::pages::remove_page(&self.pages, page_id);
        self.apply(next)
    }

    pub fn apply_palette(&mut self, palette: &Palette) -> bool {
        let next = commands::pages::apply_palette(&self.pages, palette);
        self.apply(next)
    }

    pub fn set_column_label(&mut self, page_id: &str, key: ColumnKey, label: &str) -> bool {
        let next = commands::pages::set_column_label(&self.pages, page_id, key, label);
        self.apply(next)
    }

    pub fn resize_column(&mut self, page_id: &str, key: ColumnKey, delta: f64) -> bool {
        let next = commands::columns::resize_column(&self.pages, page_id, key, delta);
        self.apply(next)
    }

    pub fn split_at(&mut self, page_id: &str, row_index: usize) -> bool {
        let next = pagination::split_at(&self.pages, page_id, row_index, &self.ids);
        self.apply(next)
    }

    pub fn merge_all(&mut self) -> bool {
        let next = pagination::merge_all(&self.pages);
        self.apply(next)
    }

    // Documents

    /// Replace the first page's body from an outline. Returns the row count.
    pub fn fill_from_outline(&mut self, text: &str) -> Result<usize> {
        let (next, count) = commands::fill::fill_from_outline(&self.pages, text, &self.ids)?;
        self.pages = next;
        Ok(count)
    }

    /// Replace the whole snapshot with an imported document. On failure the
    /// current snapshot is kept. Returns the number of pages imported.
    pub fn import_document(&mut self, text: &str) -> Result<usize> {
        let pages = codec::deserialize_with(text, &self.ids, self.option_set)?;
        debug!(pages = pages.len(), "replaced document");
        self.pages = pages;
        Ok(self.pages.len())
    }

    pub fn export_document(&self) -> Result<String> {
        Ok(codec::serialize(&self.pages)?)
    }

    pub fn export_file_name(date: NaiveDate) -> String {
        codec::export_file_name(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::model::Row;

    fn api() -> AuditApi<SequentialIds> {
        AuditApi::with_ids(
            SequentialIds::new("t"),
            &PageTemplate::default(),
            OptionSet::Standard,
        )
    }

    #[test]
    fn test_new_document_has_one_page() {
        let api = api();
        assert_eq!(api.pages().len(), 1);
        assert_eq!(api.row_count(), 3);
    }

    #[test]
    fn test_display_numbers_resolve_to_ids() {
        let api = api();
        let page_id = api.page_id(1).unwrap();
        assert_eq!(page_id, api.pages()[0].id);
        let (_, row_id) = api.row_id(1, 2).unwrap();
        assert_eq!(row_id, api.pages()[0].rows[1].id());

        assert!(api.page_id(0).is_err());
        assert!(api.page_id(2).is_err());
        assert!(api.row_id(1, 4).is_err());
    }

    #[test]
    fn test_edits_report_change() {
        let mut api = api();
        let (page_id, row_id) = api.row_id(1, 2).unwrap();
        assert!(api.select_response(&page_id, &row_id, ResponseOption::Observed));
        assert!(!api.delete_row(&page_id, "nope"));
        assert!(!api.remove_page(&page_id));
        assert!(api.add_page());
        assert!(api.remove_page(&page_id));
        assert_eq!(api.pages().len(), 1);
    }

    #[test]
    fn test_binary_option_set_refuses_extra_options() {
        let mut api = AuditApi::with_ids(
            SequentialIds::new("t"),
            &PageTemplate::default(),
            OptionSet::Binary,
        );
        let (page_id, row_id) = api.row_id(1, 2).unwrap();
        assert!(!api.select_response(&page_id, &row_id, ResponseOption::NotApplicable));
        assert!(api.select_response(&page_id, &row_id, ResponseOption::No));
    }

    #[test]
    fn test_split_and_merge() {
        let mut api = api();
        let before = api.pages().to_vec();
        let page_id = api.page_id(1).unwrap();
        assert!(api.split_at(&page_id, 1));
        assert_eq!(api.pages().len(), 2);
        assert!(!api.split_at(&page_id, 0));
        assert!(api.merge_all());
        assert_eq!(api.pages(), before.as_slice());
        assert!(!api.merge_all());
    }

    #[test]
    fn test_export_then_import() {
        let mut api = api();
        let page_id = api.page_id(1).unwrap();
        api.update_page(&page_id, &PagePatch::new().with_company_name("ACME"));
        let text = api.export_document().unwrap();

        let mut other = AuditApi::with_ids(
            SequentialIds::new("o"),
            &PageTemplate::default(),
            OptionSet::Standard,
        );
        assert_eq!(other.import_document(&text).unwrap(), 1);
        assert_eq!(other.pages(), api.pages());
    }

    #[test]
    fn test_failed_import_keeps_snapshot() {
        let mut api = api();
        let before = api.pages().to_vec();
        let err = api.import_document(r#"{"pages": []}"#).unwrap_err();
        assert!(matches!(err, AuditError::Import(_)));
        assert_eq!(api.pages(), before.as_slice());
    }

    #[test]
    fn test_fill_from_outline() {
        let mut api = api();
        assert_eq!(api.fill_from_outline("Section: A\nQ1 | d\nQ2").unwrap(), 3);
        assert!(matches!(api.pages()[0].rows[0], Row::Section(_)));
        assert!(matches!(
            api.fill_from_outline(""),
            Err(AuditError::NothingRecognized)
        ));
        assert_eq!(api.row_count(), 3);
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(
            AuditApi::<UuidIds>::export_file_name(date),
            "audit-document-2026-03-07.json"
        );
    }
}
