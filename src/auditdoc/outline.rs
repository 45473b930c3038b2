//! # Outline Parser
//!
//! Turns a pasted (or uploaded) plain-text outline into table rows.
//!
//! ## Line Shapes
//!
//! ```text
//! Section: 4. CONTEXTE DE L'ORGANISATION          --> Section row
//! 4.1 Compréhension | L'organisation a-t-elle...  --> Question (title | description)
//! 4.3 Domaine d'application                       --> Question (title only)
//! ```
//!
//! - The section marker is `Section` followed by optional whitespace and `:`,
//!   matched case-insensitively at the start of the trimmed line.
//! - The question delimiter is the literal `" | "`; only the first occurrence
//!   splits, everything after it is the description.
//! - Blank and whitespace-only lines produce nothing. Both `\n` and `\r\n`
//!   line endings are accepted.
//!
//! An empty result means nothing was recognized; callers must treat it as
//! "nothing to apply" rather than replacing existing rows with nothing.

use crate::ids::IdGenerator;
use crate::model::{Question, Row, Section};

const SECTION_MARKER: &str = "section";
const QUESTION_DELIMITER: &str = " | ";

pub const EMPTY_SECTION_TITLE: &str = "Nouvelle section";
pub const EMPTY_QUESTION_TITLE: &str = "Sans titre";

/// Suggested file name for [`OUTLINE_TEMPLATE`].
pub const OUTLINE_TEMPLATE_FILE_NAME: &str = "modele-liste-audit.txt";

/// Downloadable example showing all three line shapes.
pub const OUTLINE_TEMPLATE: &str = "Section: 4. CONTEXTE DE L'ORGANISATION
4.1 Compréhension de l'organisation | L'organisation a-t-elle déterminé les enjeux externes et internes pertinents pour son objectif ?
4.2 Parties intéressées | Les exigences des parties intéressées ont-elles été identifiées ?
Section: 5. LEADERSHIP
5.1 Leadership et engagement | La direction a-t-elle démontré son engagement ?
5.2 Politique | La politique est-elle appropriée et communiquée ?";

/// Parse `text` into rows, in input order.
pub fn parse(text: &str, ids: &impl IdGenerator) -> Vec<Row> {
    text.lines().filter_map(|line| parse_line(line, ids)).collect()
}

/// Classify a single line. Returns `None` for blank lines.
pub fn parse_line(line: &str, ids: &impl IdGenerator) -> Option<Row> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(rest) = strip_section_marker(trimmed) {
        let title = if rest.is_empty() {
            EMPTY_SECTION_TITLE
        } else {
            rest
        };
        return Some(Row::Section(Section {
            id: ids.next_id(),
            title: title.to_string(),
        }));
    }

    let (title, description) = match trimmed.split_once(QUESTION_DELIMITER) {
        Some((left, right)) => {
            let left = left.trim();
            let title = if left.is_empty() {
                EMPTY_QUESTION_TITLE
            } else {
                left
            };
            (title, right.trim())
        }
        None => (trimmed, ""),
    };

    Some(Row::Question(Question::new(ids.next_id(), title, description)))
}

/// If `line` starts with the section marker, return the trimmed remainder.
fn strip_section_marker(line: &str) -> Option<&str> {
    let head = line.get(..SECTION_MARKER.len())?;
    if !head.eq_ignore_ascii_case(SECTION_MARKER) {
        return None;
    }
    let rest = line[SECTION_MARKER.len()..].trim_start();
    rest.strip_prefix(':').map(str::trim)
}
