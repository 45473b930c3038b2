use auditdoc::model::{OptionSet, Page, Row};
use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const RESPONSE_WIDTH: usize = 22;

pub(super) fn print_success(message: &str) {
    println!("{}", message.green());
}

pub(super) fn print_warning(message: &str) {
    println!("{}", message.yellow());
}

pub(super) fn print_document(pages: &[Page], option_set: OptionSet) {
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!(
            "{} {} · {}",
            format!("Page {}", i + 1).yellow().bold(),
            page.company_name.bold(),
            page.doc_title
        );
        let meta: Vec<String> = page
            .doc_meta
            .iter()
            .map(|m| format!("{}: {}", m.label, m.value))
            .collect();
        println!("  {}", meta.join("  ").dimmed());

        if page.rows.is_empty() {
            println!("  {}", "(no rows)".dimmed());
            continue;
        }
        for (n, row) in page.rows.iter().enumerate() {
            print_row(n + 1, row, option_set);
        }
    }
}

fn print_row(number: usize, row: &Row, option_set: OptionSet) {
    let idx = format!("{:>4}. ", number);
    match row {
        Row::Section(section) => {
            let title = truncate_to_width(&section.title, LINE_WIDTH - idx.width());
            println!("{}{}", idx.dimmed(), title.bold().underline());
        }
        Row::Question(question) => {
            let response = question
                .response
                .filter(|r| option_set.contains(*r))
                .map(|r| r.key())
                .unwrap_or("-");
            let available = LINE_WIDTH.saturating_sub(idx.width() + RESPONSE_WIDTH);
            let title = truncate_to_width(&question.title, available);
            let padding = available.saturating_sub(title.width());
            let response = format!("{:>width$}", response, width = RESPONSE_WIDTH);
            let response = if question.response.is_some() {
                response.cyan()
            } else {
                response.dimmed()
            };
            println!("{}{}{}{}", idx, title, " ".repeat(padding), response);
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let c = if c == '\n' { ' ' } else { c };
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_to_width("4.1 Contexte", 40), "4.1 Contexte");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        let out = truncate_to_width("Compréhension de l'organisation", 10);
        assert!(out.ends_with('…'));
        assert!(out.width() <= 10);
    }

    #[test]
    fn test_truncate_flattens_newlines() {
        assert_eq!(truncate_to_width("Non\nconcerné", 40), "Non concerné");
    }
}
