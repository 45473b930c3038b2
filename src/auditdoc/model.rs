//! # Domain Model: Pages, Rows and Document Header
//!
//! This module defines the core data structures of an audit checklist document:
//! [`Page`], [`Row`] (a [`Section`] heading or a [`Question`]), and [`DocMetaItem`].
//! It also supplies the default template every other module builds from, so no
//! literal defaults are duplicated elsewhere.
//!
//! ## Shape of a Page
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │ logo │ companyName / companySubtitle │ docTitle │ docMeta │  <-- header
//! ├───────────────────────────────────────────────────────────┤
//! │ Exigences │ Oui │ Non │ N/C │ Obs. │ Affirmé │ Observation │  <-- tableColumns
//! ├───────────────────────────────────────────────────────────┤
//! │ 4. CONTEXTE DE L'ORGANISATION                             │  <-- Section row
//! │ 4.1 ... │  ☐  │  ☐  │  ☐  │  ☐   │   ☐     │ ........... │  <-- Question row
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rows
//!
//! A row is a closed sum type discriminated on the wire by a `type` tag
//! (`"section"` or `"question"`). Row order within a page is the printed order.
//!
//! ## Responses
//!
//! A question's `response` is `None` or one [`ResponseOption`]. Selecting the
//! option that is already selected clears it (toggle, not set). Which options
//! are valid depends on the document's [`OptionSet`]; the binary yes/no
//! generation is a strict subset of the standard five-way one.
//!
//! ## Identity
//!
//! Rows, doc-meta items and pages carry opaque ids minted by an
//! [`IdGenerator`]. Ids are never reused or recomputed on edit.
//!
//! ## Key Functions
//!
//! - [`new_question_row`] / [`new_section_row`]: placeholder rows for "add row".
//! - [`new_page`]: a default page with the starter body.
//! - [`PageTemplate::new_page`]: same, from a configured template.
//! - [`Page::sibling`]: copy header, meta and styling into a new page.

use serde::{Deserialize, Serialize};

use crate::ids::IdGenerator;

pub const QUESTION_PLACEHOLDER_TITLE: &str = "Nouveau titre";
pub const QUESTION_PLACEHOLDER_DESCRIPTION: &str = "Description ou question...";
pub const SECTION_PLACEHOLDER_TITLE: &str = "NOUVEAU TITRE DE SECTION";
pub const META_PLACEHOLDER_LABEL: &str = "Nouveau champ";

pub const DEFAULT_HEADER_COLOR: &str = "#ff8500";
pub const DEFAULT_SECTION_HEADER_COLOR: &str = "#e2e8f0";
pub const DEFAULT_QUESTION_ROW_COLOR: &str = "#f8fafc";

/// Smallest width, in percent, a table column may be dragged down to.
pub const MIN_COLUMN_WIDTH: f64 = 3.0;

const WIDTH_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseOption {
    #[serde(rename = "oui")]
    Yes,
    #[serde(rename = "non")]
    No,
    #[serde(rename = "nonConcerne")]
    NotApplicable,
    #[serde(rename = "observe")]
    Observed,
    #[serde(rename = "affirmeParOperateur")]
    AffirmedByOperator,
}

impl ResponseOption {
    pub const ALL: [ResponseOption; 5] = [
        ResponseOption::Yes,
        ResponseOption::No,
        ResponseOption::NotApplicable,
        ResponseOption::Observed,
        ResponseOption::AffirmedByOperator,
    ];

    /// Wire key used in export files.
    pub fn key(self) -> &'static str {
        match self {
            ResponseOption::Yes => "oui",
            ResponseOption::No => "non",
            ResponseOption::NotApplicable => "nonConcerne",
            ResponseOption::Observed => "observe",
            ResponseOption::AffirmedByOperator => "affirmeParOperateur",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.key() == key)
    }
}

/// The closed list of responses a document generation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionSet {
    /// oui / non / non concerné / observé / affirmé par l'opérateur
    #[default]
    Standard,
    /// oui / non
    Binary,
}

impl OptionSet {
    pub fn options(self) -> &'static [ResponseOption] {
        match self {
            OptionSet::Standard => &ResponseOption::ALL,
            OptionSet::Binary => &ResponseOption::ALL[..2],
        }
    }

    pub fn contains(self, option: ResponseOption) -> bool {
        self.options().contains(&option)
    }

    /// Columns shown by a table of this generation, left to right.
    pub fn columns(self) -> Vec<ColumnKey> {
        let mut columns = vec![ColumnKey::Requirements];
        columns.extend(self.options().iter().map(|o| ColumnKey::for_response(*o)));
        columns.push(ColumnKey::Observation);
        columns
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKey {
    #[serde(rename = "exigences")]
    Requirements,
    #[serde(rename = "oui")]
    Yes,
    #[serde(rename = "non")]
    No,
    #[serde(rename = "nonConcerne")]
    NotApplicable,
    #[serde(rename = "observe")]
    Observed,
    #[serde(rename = "affirmeParOperateur")]
    AffirmedByOperator,
    #[serde(rename = "observation")]
    Observation,
}

impl ColumnKey {
    /// All columns in table order.
    pub const ALL: [ColumnKey; 7] = [
        ColumnKey::Requirements,
        ColumnKey::Yes,
        ColumnKey::No,
        ColumnKey::NotApplicable,
        ColumnKey::Observed,
        ColumnKey::AffirmedByOperator,
        ColumnKey::Observation,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ColumnKey::Requirements => "exigences",
            ColumnKey::Yes => "oui",
            ColumnKey::No => "non",
            ColumnKey::NotApplicable => "nonConcerne",
            ColumnKey::Observed => "observe",
            ColumnKey::AffirmedByOperator => "affirmeParOperateur",
            ColumnKey::Observation => "observation",
        }
    }

    pub fn for_response(option: ResponseOption) -> Self {
        match option {
            ResponseOption::Yes => ColumnKey::Yes,
            ResponseOption::No => ColumnKey::No,
            ResponseOption::NotApplicable => ColumnKey::NotApplicable,
            ResponseOption::Observed => ColumnKey::Observed,
            ResponseOption::AffirmedByOperator => ColumnKey::AffirmedByOperator,
        }
    }

    /// The column immediately to the right, if any.
    pub fn next(self) -> Option<Self> {
        let pos = Self::ALL.iter().position(|k| *k == self)?;
        Self::ALL.get(pos + 1).copied()
    }
}

/// Header label displayed for each column. Labels are free text, not structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumns {
    #[serde(rename = "exigences")]
    pub requirements: String,
    #[serde(rename = "oui")]
    pub yes: String,
    #[serde(rename = "non")]
    pub no: String,
    #[serde(rename = "nonConcerne")]
    pub not_applicable: String,
    #[serde(rename = "observe")]
    pub observed: String,
    #[serde(rename = "affirmeParOperateur")]
    pub affirmed_by_operator: String,
    #[serde(rename = "observation")]
    pub observation: String,
}

impl Default for TableColumns {
    fn default() -> Self {
        Self {
            requirements: "Exigences".to_string(),
            yes: "Oui".to_string(),
            no: "Non".to_string(),
            not_applicable: "Non\nconcerné".to_string(),
            observed: "Observe".to_string(),
            affirmed_by_operator: "Affirmé par\nl'opérateur".to_string(),
            observation: "Observation".to_string(),
        }
    }
}

impl TableColumns {
    pub fn get(&self, key: ColumnKey) -> &str {
        match key {
            ColumnKey::Requirements => &self.requirements,
            ColumnKey::Yes => &self.yes,
            ColumnKey::No => &self.no,
            ColumnKey::NotApplicable => &self.not_applicable,
            ColumnKey::Observed => &self.observed,
            ColumnKey::AffirmedByOperator => &self.affirmed_by_operator,
            ColumnKey::Observation => &self.observation,
        }
    }

    pub fn set(&mut self, key: ColumnKey, label: impl Into<String>) {
        let slot = match key {
            ColumnKey::Requirements => &mut self.requirements,
            ColumnKey::Yes => &mut self.yes,
            ColumnKey::No => &mut self.no,
            ColumnKey::NotApplicable => &mut self.not_applicable,
            ColumnKey::Observed => &mut self.observed,
            ColumnKey::AffirmedByOperator => &mut self.affirmed_by_operator,
            ColumnKey::Observation => &mut self.observation,
        };
        *slot = label.into();
    }
}

/// Percentage width of each column. A valid table sums to 100 with every
/// column at or above [`MIN_COLUMN_WIDTH`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnWidths {
    #[serde(rename = "exigences")]
    pub requirements: f64,
    #[serde(rename = "oui")]
    pub yes: f64,
    #[serde(rename = "non")]
    pub no: f64,
    #[serde(rename = "nonConcerne")]
    pub not_applicable: f64,
    #[serde(rename = "observe")]
    pub observed: f64,
    #[serde(rename = "affirmeParOperateur")]
    pub affirmed_by_operator: f64,
    #[serde(rename = "observation")]
    pub observation: f64,
}

impl Default for ColumnWidths {
    fn default() -> Self {
        Self {
            requirements: 28.0,
            yes: 6.0,
            no: 6.0,
            not_applicable: 11.0,
            observed: 11.0,
            affirmed_by_operator: 11.0,
            observation: 27.0,
        }
    }
}

impl ColumnWidths {
    pub fn get(&self, key: ColumnKey) -> f64 {
        match key {
            ColumnKey::Requirements => self.requirements,
            ColumnKey::Yes => self.yes,
            ColumnKey::No => self.no,
            ColumnKey::NotApplicable => self.not_applicable,
            ColumnKey::Observed => self.observed,
            ColumnKey::AffirmedByOperator => self.affirmed_by_operator,
            ColumnKey::Observation => self.observation,
        }
    }

    pub fn set(&mut self, key: ColumnKey, width: f64) {
        let slot = match key {
            ColumnKey::Requirements => &mut self.requirements,
            ColumnKey::Yes => &mut self.yes,
            ColumnKey::No => &mut self.no,
            ColumnKey::NotApplicable => &mut self.not_applicable,
            ColumnKey::Observed => &mut self.observed,
            ColumnKey::AffirmedByOperator => &mut self.affirmed_by_operator,
            ColumnKey::Observation => &mut self.observation,
        };
        *slot = width;
    }

    pub fn total(&self) -> f64 {
        ColumnKey::ALL.iter().map(|k| self.get(*k)).sum()
    }

    pub fn is_valid(&self) -> bool {
        (self.total() - 100.0).abs() <= WIDTH_TOLERANCE
            && ColumnKey::ALL
                .iter()
                .all(|k| self.get(*k) >= MIN_COLUMN_WIDTH - WIDTH_TOLERANCE)
    }
}

/// One labeled header field, e.g. `N° Doc: FR/ADC-PM-02/03`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMetaItem {
    pub id: String,
    pub label: String,
    pub value: String,
}

impl DocMetaItem {
    pub fn new(ids: &impl IdGenerator, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: ids.next_id(),
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub title: String,
    pub description: String,
    pub response: Option<ResponseOption>,
    pub observation: String,
}

impl Question {
    pub fn new(id: String, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            response: None,
            observation: String::new(),
        }
    }

    /// Toggle `option`: selecting the current response clears it.
    pub fn select(&mut self, option: ResponseOption) {
        self.response = if self.response == Some(option) {
            None
        } else {
            Some(option)
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Row {
    Section(Section),
    Question(Question),
}

impl Row {
    pub fn id(&self) -> &str {
        match self {
            Row::Section(s) => &s.id,
            Row::Question(q) => &q.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Row::Section(s) => &s.title,
            Row::Question(q) => &q.title,
        }
    }

    pub fn as_question(&self) -> Option<&Question> {
        match self {
            Row::Question(q) => Some(q),
            Row::Section(_) => None,
        }
    }
}

/// Colors applied to the table header, section rows, and question rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub header: String,
    pub section_header: String,
    pub question_row: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER_COLOR.to_string(),
            section_header: DEFAULT_SECTION_HEADER_COLOR.to_string(),
            question_row: DEFAULT_QUESTION_ROW_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub company_name: String,
    pub company_subtitle: String,
    pub doc_title: String,
    pub doc_meta: Vec<DocMetaItem>,
    pub logo_data_url: Option<String>,
    pub header_color: String,
    pub section_header_color: String,
    pub question_row_color: String,
    pub table_columns: TableColumns,
    pub table_column_widths: ColumnWidths,
    pub rows: Vec<Row>,
}

impl Page {
    pub fn row(&self, row_id: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.id() == row_id)
    }

    pub fn row_position(&self, row_id: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.id() == row_id)
    }

    pub fn palette(&self) -> Palette {
        Palette {
            header: self.header_color.clone(),
            section_header: self.section_header_color.clone(),
            question_row: self.question_row_color.clone(),
        }
    }

    pub fn set_palette(&mut self, palette: &Palette) {
        self.header_color = palette.header.clone();
        self.section_header_color = palette.section_header.clone();
        self.question_row_color = palette.question_row.clone();
    }

    /// A new page carrying this page's header, meta and styling with `rows` as
    /// its body. The page id and every doc-meta id are freshly minted; values
    /// are preserved, identities are not.
    pub fn sibling(&self, ids: &impl IdGenerator, rows: Vec<Row>) -> Page {
        Page {
            id: ids.next_id(),
            company_name: self.company_name.clone(),
            company_subtitle: self.company_subtitle.clone(),
            doc_title: self.doc_title.clone(),
            doc_meta: self
                .doc_meta
                .iter()
                .map(|item| DocMetaItem::new(ids, item.label.clone(), item.value.clone()))
                .collect(),
            logo_data_url: self.logo_data_url.clone(),
            header_color: self.header_color.clone(),
            section_header_color: self.section_header_color.clone(),
            question_row_color: self.question_row_color.clone(),
            table_columns: self.table_columns.clone(),
            table_column_widths: self.table_column_widths,
            rows,
        }
    }
}

/// A label/value pair used to seed doc-meta items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaField {
    pub label: String,
    pub value: String,
}

impl MetaField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Defaults for newly created pages. Configurable through `config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageTemplate {
    pub company_name: String,
    pub company_subtitle: String,
    pub doc_title: String,
    pub doc_meta: Vec<MetaField>,
    pub palette: Palette,
    pub table_columns: TableColumns,
    pub table_column_widths: ColumnWidths,
}

impl Default for PageTemplate {
    fn default() -> Self {
        Self {
            company_name: "PT. ARTHA DAYA COALINDO".to_string(),
            company_subtitle: "Filiale de PT. INDONESIA POWER".to_string(),
            doc_title: "AUDIT INTERNE".to_string(),
            doc_meta: vec![
                MetaField::new("N° Doc", "FR/ADC-PM-02/03"),
                MetaField::new("Révision", "00"),
                MetaField::new("Date", "03 avril 2023"),
                MetaField::new("Norme", "ISO 14001:2015"),
            ],
            palette: Palette::default(),
            table_columns: TableColumns::default(),
            table_column_widths: ColumnWidths::default(),
        }
    }
}

impl PageTemplate {
    pub fn doc_meta(&self, ids: &impl IdGenerator) -> Vec<DocMetaItem> {
        let items: Vec<DocMetaItem> = self
            .doc_meta
            .iter()
            .map(|f| DocMetaItem::new(ids, f.label.clone(), f.value.clone()))
            .collect();
        if items.is_empty() {
            vec![fallback_doc_meta(ids)]
        } else {
            items
        }
    }

    /// A page with this template's header and the starter body: one section
    /// and two example questions.
    pub fn new_page(&self, id: impl Into<String>, ids: &impl IdGenerator) -> Page {
        Page {
            id: id.into(),
            company_name: self.company_name.clone(),
            company_subtitle: self.company_subtitle.clone(),
            doc_title: self.doc_title.clone(),
            doc_meta: self.doc_meta(ids),
            logo_data_url: None,
            header_color: self.palette.header.clone(),
            section_header_color: self.palette.section_header.clone(),
            question_row_color: self.palette.question_row.clone(),
            table_columns: self.table_columns.clone(),
            table_column_widths: self.table_column_widths,
            rows: starter_rows(ids),
        }
    }
}

/// Single entry substituted whenever a page would otherwise have no doc-meta.
pub fn fallback_doc_meta(ids: &impl IdGenerator) -> DocMetaItem {
    DocMetaItem::new(ids, "N° Doc", "")
}

pub fn default_doc_meta(ids: &impl IdGenerator) -> Vec<DocMetaItem> {
    PageTemplate::default().doc_meta(ids)
}

pub fn new_question_row(ids: &impl IdGenerator) -> Row {
    Row::Question(Question::new(
        ids.next_id(),
        QUESTION_PLACEHOLDER_TITLE,
        QUESTION_PLACEHOLDER_DESCRIPTION,
    ))
}

pub fn new_section_row(ids: &impl IdGenerator) -> Row {
    Row::Section(Section {
        id: ids.next_id(),
        title: SECTION_PLACEHOLDER_TITLE.to_string(),
    })
}

pub fn new_page(id: impl Into<String>, ids: &impl IdGenerator) -> Page {
    PageTemplate::default().new_page(id, ids)
}

fn starter_rows(ids: &impl IdGenerator) -> Vec<Row> {
    vec![
        Row::Section(Section {
            id: ids.next_id(),
            title: "4. CONTEXTE DE L'ORGANISATION".to_string(),
        }),
        Row::Question(Question::new(
            ids.next_id(),
            "4.1 Compréhension de l'organisation",
            "L'organisation a-t-elle déterminé les enjeux externes et internes pertinents pour son objectif ?",
        )),
        Row::Question(Question::new(
            ids.next_id(),
            "4.2 Parties intéressées",
            "Les exigences des parties intéressées ont-elles été identifiées ?",
        )),
    ]
}
