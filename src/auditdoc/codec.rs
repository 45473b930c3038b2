//! # Document Codec: Export Envelope and Import Normalization
//!
//! Pages are exported wrapped in a versioned envelope:
//!
//! ```text
//! {
//!   "version": 1,
//!   "exportedAt": "2026-10-18T09:30:00.000Z",
//!   "app": "Audit-Doc-maker",
//!   "pages": [ { "id": ..., "companyName": ..., "rows": [...] }, ... ]
//! }
//! ```
//!
//! Output is pretty-printed JSON with two-space indentation so exported files
//! stay readable and hand-editable.
//!
//! ## Import Contract
//!
//! Import treats the two kinds of damage differently:
//!
//! - **Structural corruption rejects the whole file**: not JSON, not an object,
//!   `pages` missing / not a list / empty, or a `version` other than 1. The
//!   caller gets an [`ImportError`] and nothing is imported.
//! - **Content corruption never fails the import**: every field of every page
//!   is type-checked and defaulted independently by the [`Normalizer`], so a
//!   truncated or hand-edited file yields as much data as it still carries.
//!
//! ## Normalization Rules
//!
//! | Field | Rule |
//! |-------|------|
//! | strings | `""` when absent or not a string |
//! | `logoDataUrl` | `null` unless a string |
//! | colors | default palette when absent or not a string |
//! | `id` (page, row, meta) | freshly minted when absent or not a string |
//! | `docMeta` | non-object entries dropped; empty result gets one `N° Doc` entry |
//! | `tableColumns` | merged key by key over the default labels |
//! | `tableColumnWidths` | merged key by key over the default widths (sum not re-checked) |
//! | row `type: "section"` | section with `title` |
//! | any other row | question; `response` kept only when in the option set |
//!
//! Normalizing an already normalized page yields the identical page, so
//! `deserialize(serialize(pages)) == pages` for well-formed pages.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::ids::IdGenerator;
use crate::model::{
    fallback_doc_meta, ColumnKey, ColumnWidths, DocMetaItem, OptionSet, Page, Question,
    ResponseOption, Row, Section, TableColumns, DEFAULT_HEADER_COLOR,
    DEFAULT_QUESTION_ROW_COLOR, DEFAULT_SECTION_HEADER_COLOR,
};

/// The single supported format version.
pub const EXPORT_VERSION: u32 = 1;

/// Application tag written into every export.
pub const APP_TAG: &str = "Audit-Doc-maker";

/// Why an import was rejected as a whole.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("top-level value is not an object")]
    NotAnObject,

    #[error("`pages` is missing or not a list")]
    MissingPages,

    #[error("`pages` is empty")]
    EmptyPages,

    #[error("unsupported version {0}")]
    UnsupportedVersion(Value),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
    version: u32,
    exported_at: String,
    app: &'a str,
    pages: &'a [Page],
}

/// Serialize `pages` into an export document stamped with the current time.
pub fn serialize(pages: &[Page]) -> Result<String, serde_json::Error> {
    serialize_at(pages, Utc::now())
}

pub fn serialize_at(pages: &[Page], exported_at: DateTime<Utc>) -> Result<String, serde_json::Error> {
    let envelope = Envelope {
        version: EXPORT_VERSION,
        exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        app: APP_TAG,
        pages,
    };
    let text = serde_json::to_string_pretty(&envelope)?;
    debug!(pages = pages.len(), bytes = text.len(), "serialized document");
    Ok(text)
}

/// Suggested download name for an export made on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("audit-document-{}.json", date.format("%Y-%m-%d"))
}

/// Parse and normalize an export document with the standard option set.
pub fn deserialize(text: &str, ids: &impl IdGenerator) -> Result<Vec<Page>, ImportError> {
    deserialize_with(text, ids, OptionSet::Standard)
}

pub fn deserialize_with(
    text: &str,
    ids: &impl IdGenerator,
    option_set: OptionSet,
) -> Result<Vec<Page>, ImportError> {
    let result = serde_json::from_str::<Value>(text)
        .map_err(ImportError::from)
        .and_then(|data| read_envelope(&data, ids, option_set));
    if let Err(err) = &result {
        warn!(%err, "rejected document import");
    }
    result
}

fn read_envelope(
    data: &Value,
    ids: &impl IdGenerator,
    option_set: OptionSet,
) -> Result<Vec<Page>, ImportError> {
    let doc = data.as_object().ok_or(ImportError::NotAnObject)?;
    check_version(doc.get("version"))?;

    let raw_pages = doc
        .get("pages")
        .and_then(Value::as_array)
        .ok_or(ImportError::MissingPages)?;
    if raw_pages.is_empty() {
        return Err(ImportError::EmptyPages);
    }

    let normalizer = Normalizer::new(ids, option_set);
    let pages: Vec<Page> = raw_pages.iter().map(|raw| normalizer.page(raw)).collect();
    debug!(pages = pages.len(), "imported document");
    Ok(pages)
}

fn check_version(version: Option<&Value>) -> Result<(), ImportError> {
    match version {
        None => Ok(()),
        Some(v) if v.as_f64() == Some(f64::from(EXPORT_VERSION)) => Ok(()),
        Some(v) => Err(ImportError::UnsupportedVersion(v.clone())),
    }
}

/// Field-by-field coercion of untrusted JSON into canonical pages and rows.
pub struct Normalizer<'a, G: IdGenerator> {
    ids: &'a G,
    option_set: OptionSet,
}

impl<'a, G: IdGenerator> Normalizer<'a, G> {
    pub fn new(ids: &'a G, option_set: OptionSet) -> Self {
        Self { ids, option_set }
    }

    pub fn page(&self, raw: &Value) -> Page {
        let empty = Map::new();
        let obj = raw.as_object().unwrap_or(&empty);

        Page {
            id: self.id(obj),
            company_name: string_field(obj, "companyName"),
            company_subtitle: string_field(obj, "companySubtitle"),
            doc_title: string_field(obj, "docTitle"),
            doc_meta: self.doc_meta(obj.get("docMeta")),
            logo_data_url: obj
                .get("logoDataUrl")
                .and_then(Value::as_str)
                .map(str::to_string),
            header_color: string_or(obj, "headerColor", DEFAULT_HEADER_COLOR),
            section_header_color: string_or(obj, "sectionHeaderColor", DEFAULT_SECTION_HEADER_COLOR),
            question_row_color: string_or(obj, "questionRowColor", DEFAULT_QUESTION_ROW_COLOR),
            table_columns: table_columns(obj.get("tableColumns")),
            table_column_widths: column_widths(obj.get("tableColumnWidths")),
            rows: obj
                .get("rows")
                .and_then(Value::as_array)
                .map(|rows| rows.iter().map(|r| self.row(r)).collect())
                .unwrap_or_default(),
        }
    }

    pub fn row(&self, raw: &Value) -> Row {
        let empty = Map::new();
        let obj = raw.as_object().unwrap_or(&empty);
        let id = self.id(obj);

        if obj.get("type").and_then(Value::as_str) == Some("section") {
            return Row::Section(Section {
                id,
                title: string_field(obj, "title"),
            });
        }

        let response = obj
            .get("response")
            .and_then(Value::as_str)
            .and_then(ResponseOption::from_key)
            .filter(|option| self.option_set.contains(*option));

        Row::Question(Question {
            id,
            title: string_field(obj, "title"),
            description: string_field(obj, "description"),
            response,
            observation: string_field(obj, "observation"),
        })
    }

    fn doc_meta(&self, raw: Option<&Value>) -> Vec<DocMetaItem> {
        let items: Vec<DocMetaItem> = raw
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|item| DocMetaItem {
                        id: self.id(item),
                        label: string_field(item, "label"),
                        value: string_field(item, "value"),
                    })
                    .collect()
            })
            .unwrap_or_default();

        if items.is_empty() {
            trace!("docMeta empty, substituting fallback entry");
            vec![fallback_doc_meta(self.ids)]
        } else {
            items
        }
    }

    fn id(&self, obj: &Map<String, Value>) -> String {
        match obj.get("id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                trace!("minting id for entry without one");
                self.ids.next_id()
            }
        }
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    string_or(obj, key, "")
}

fn string_or(obj: &Map<String, Value>, key: &str, default: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        other => {
            if other.is_some() {
                trace!(key, "wrong type, using default");
            }
            default.to_string()
        }
    }
}

fn table_columns(raw: Option<&Value>) -> TableColumns {
    let mut columns = TableColumns::default();
    if let Some(raw) = raw.and_then(Value::as_object) {
        for key in ColumnKey::ALL {
            if let Some(label) = raw.get(key.key()).and_then(Value::as_str) {
                columns.set(key, label);
            }
        }
    }
    columns
}

fn column_widths(raw: Option<&Value>) -> ColumnWidths {
    let mut widths = ColumnWidths::default();
    if let Some(raw) = raw.and_then(Value::as_object) {
        for key in ColumnKey::ALL {
            if let Some(width) = raw.get(key.key()).and_then(Value::as_f64) {
                widths.set(key, width);
            }
        }
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::model::new_page;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_pages(ids: &SequentialIds) -> Vec<Page> {
        let mut first = new_page("page-a", ids);
        first.logo_data_url = Some("data:image/png;base64,AAAA".into());
        if let Row::Question(q) = &mut first.rows[1] {
            q.response = Some(ResponseOption::Observed);
            q.observation = "Registre à jour".into();
        }
        let mut second = new_page("page-b", ids);
        second.table_column_widths.set(ColumnKey::Requirements, 30.5);
        second.table_column_widths.set(ColumnKey::Observation, 24.5);
        second.table_columns.set(ColumnKey::Yes, "Yes");
        vec![first, second]
    }

    fn import(text: &str) -> Result<Vec<Page>, ImportError> {
        deserialize(text, &SequentialIds::new("n"))
    }

    #[test]
    fn test_round_trip_identity() {
        let ids = SequentialIds::new("t");
        let pages = sample_pages(&ids);
        let text = serialize(&pages).unwrap();

        let fresh = SequentialIds::new("n");
        let back = deserialize(&text, &fresh).unwrap();
        assert_eq!(back, pages);
        assert_eq!(fresh.issued(), 0, "well-formed input needs no new ids");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let ids = SequentialIds::new("t");
        let normalizer = Normalizer::new(&ids, OptionSet::Standard);
        let once = normalizer.page(&json!({
            "companyName": 12,
            "docMeta": [{"label": "Doc"}, "junk"],
            "rows": [{"type": "section"}, {"title": "Q", "response": "maybe"}]
        }));
        let twice = normalizer.page(&serde_json::to_value(&once).unwrap());
        assert_eq!(twice, once);
    }

    #[test]
    fn test_envelope_fields() {
        let ids = SequentialIds::new("t");
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let text = serialize_at(&[new_page("p", &ids)], at).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["exportedAt"], "2026-10-18T09:30:00.000Z");
        assert_eq!(value["app"], APP_TAG);
        assert_eq!(value["pages"].as_array().unwrap().len(), 1);
        assert!(text.contains("\n  \"version\": 1"));
    }

    #[test]
    fn test_rejects_structural_corruption() {
        assert!(matches!(import("not json"), Err(ImportError::Malformed(_))));
        assert!(matches!(import("[1, 2]"), Err(ImportError::NotAnObject)));
        assert!(matches!(import("null"), Err(ImportError::NotAnObject)));
        assert!(matches!(import("{}"), Err(ImportError::MissingPages)));
        assert!(matches!(
            import(r#"{"pages": {"a": 1}}"#),
            Err(ImportError::MissingPages)
        ));
        assert!(matches!(
            import(r#"{"pages": []}"#),
            Err(ImportError::EmptyPages)
        ));
        assert!(matches!(
            import(r#"{"version": 2, "pages": [{}]}"#),
            Err(ImportError::UnsupportedVersion(_))
        ));
        assert!(matches!(
            import(r#"{"version": "1", "pages": [{}]}"#),
            Err(ImportError::UnsupportedVersion(_))
        ));
        assert!(matches!(
            import(r#"{"version": null, "pages": [{}]}"#),
            Err(ImportError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_version_absent_or_one_is_accepted() {
        assert_eq!(import(r#"{"pages": [{}]}"#).unwrap().len(), 1);
        assert_eq!(import(r#"{"version": 1, "pages": [{}]}"#).unwrap().len(), 1);
        assert_eq!(import(r#"{"version": 1.0, "pages": [{}]}"#).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_page_gets_defaults() {
        let pages = import(r#"{"pages": [{}]}"#).unwrap();
        let page = &pages[0];
        assert_eq!(page.id, "n-1");
        assert_eq!(page.company_name, "");
        assert_eq!(page.doc_title, "");
        assert_eq!(page.logo_data_url, None);
        assert_eq!(page.header_color, DEFAULT_HEADER_COLOR);
        assert_eq!(page.section_header_color, DEFAULT_SECTION_HEADER_COLOR);
        assert_eq!(page.question_row_color, DEFAULT_QUESTION_ROW_COLOR);
        assert_eq!(page.table_columns, TableColumns::default());
        assert_eq!(page.table_column_widths, ColumnWidths::default());
        assert_eq!(page.doc_meta.len(), 1);
        assert_eq!(page.doc_meta[0].label, "N° Doc");
        assert_eq!(page.doc_meta[0].value, "");
        assert!(page.rows.is_empty());
    }

    #[test]
    fn test_wrong_types_are_defaulted() {
        let pages = import(
            r##"{"pages": [{
                "id": 7,
                "companyName": ["x"],
                "companySubtitle": "Sub",
                "logoDataUrl": 42,
                "headerColor": false,
                "sectionHeaderColor": "#000000",
                "docMeta": "oops",
                "rows": "nope"
            }]}"##,
        )
        .unwrap();
        let page = &pages[0];
        assert_eq!(page.id, "n-1");
        assert_eq!(page.company_name, "");
        assert_eq!(page.company_subtitle, "Sub");
        assert_eq!(page.logo_data_url, None);
        assert_eq!(page.header_color, DEFAULT_HEADER_COLOR);
        assert_eq!(page.section_header_color, "#000000");
        assert_eq!(page.doc_meta.len(), 1);
        assert!(page.rows.is_empty());
    }

    #[test]
    fn test_doc_meta_filters_and_coerces() {
        let pages = import(
            r#"{"pages": [{"docMeta": [
                {"id": "m1", "label": "Révision", "value": "02"},
                null,
                {"label": 3},
                "text"
            ]}]}"#,
        )
        .unwrap();
        let meta = &pages[0].doc_meta;
        assert_eq!(meta.len(), 2);
        assert_eq!(meta[0].id, "m1");
        assert_eq!(meta[0].value, "02");
        assert_eq!(meta[1].id, "n-2");
        assert_eq!(meta[1].label, "");
        assert_eq!(meta[1].value, "");
    }

    #[test]
    fn test_columns_merge_over_defaults() {
        let pages = import(
            r#"{"pages": [{
                "tableColumns": {"oui": "Yes", "non": 5, "extra": "ignored"},
                "tableColumnWidths": {"exigences": 40, "observation": "wide"}
            }]}"#,
        )
        .unwrap();
        let page = &pages[0];
        assert_eq!(page.table_columns.yes, "Yes");
        assert_eq!(page.table_columns.no, "Non");
        assert_eq!(page.table_columns.observation, "Observation");
        assert_eq!(page.table_column_widths.requirements, 40.0);
        assert_eq!(page.table_column_widths.observation, 27.0);
        assert_eq!(page.table_column_widths.yes, 6.0);
    }

    #[test]
    fn test_row_normalization() {
        let pages = import(
            r#"{"pages": [{"rows": [
                {"type": "section", "id": "s1", "title": "Intro", "response": "oui"},
                {"type": "question", "id": "q1", "title": "A", "response": "oui"},
                {"type": "question", "id": "q2", "response": "peut-être", "observation": 1},
                {"type": "weird", "title": "B"},
                null
            ]}]}"#,
        )
        .unwrap();
        let rows = &pages[0].rows;
        assert_eq!(rows.len(), 5);
        assert_eq!(
            rows[0],
            Row::Section(Section {
                id: "s1".into(),
                title: "Intro".into()
            })
        );
        assert_eq!(
            rows[1].as_question().unwrap().response,
            Some(ResponseOption::Yes)
        );
        let q2 = rows[2].as_question().unwrap();
        assert_eq!(q2.response, None);
        assert_eq!(q2.title, "");
        assert_eq!(q2.observation, "");
        assert_eq!(rows[3].title(), "B");
        assert!(rows[3].as_question().is_some());
        assert!(rows[4].as_question().is_some());
    }

    #[test]
    fn test_binary_option_set_drops_extended_responses() {
        let text = r#"{"pages": [{"rows": [
            {"id": "q1", "response": "non"},
            {"id": "q2", "response": "observe"}
        ]}]}"#;
        let pages = deserialize_with(text, &SequentialIds::new("n"), OptionSet::Binary).unwrap();
        let rows = &pages[0].rows;
        assert_eq!(rows[0].as_question().unwrap().response, Some(ResponseOption::No));
        assert_eq!(rows[1].as_question().unwrap().response, None);
    }

    #[test]
    fn test_non_object_page_normalizes_to_default() {
        let pages = import(r#"{"pages": [42, {"id": "p2"}]}"#).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].id, "n-1");
        assert_eq!(pages[1].id, "p2");
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        assert_eq!(export_file_name(date), "audit-document-2026-03-04.json");
    }
}
