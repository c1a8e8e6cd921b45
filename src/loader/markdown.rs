// ABOUTME: Parser for markdown exports holding one pipe table per `## ` section
// ABOUTME: Section titles become dataset names; empty and "No data available" sections are skipped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::models::Table;
use tracing::{debug, warn};

/// Marker of a section the exporter had nothing for
const NO_DATA_MARKER: &str = "No data available";

/// Header prefix starting a section
const SECTION_PREFIX: &str = "## ";

/// A `## ` section of the document
struct Section<'a> {
    title: &'a str,
    lines: Vec<&'a str>,
}

/// Dataset name for a section title: `Activity Summary` becomes `ActivitySummary`
#[must_use]
pub fn dataset_key(title: &str) -> String {
    title.trim().replace(' ', "")
}

/// Split a table line into cells
///
/// Leading and trailing pipes are dropped, cells are split on unescaped pipes,
/// `\|` becomes a literal pipe and every cell is trimmed.
#[must_use]
pub fn split_row(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut current).trim().to_owned()),
            _ => current.push(ch),
        }
    }
    // text after the last pipe is kept only when the row has no closing pipe
    if !current.trim().is_empty() {
        cells.push(current.trim().to_owned());
    }
    cells
}

fn sections(content: &str) -> Vec<Section<'_>> {
    let mut sections = Vec::new();
    let mut current: Option<Section<'_>> = None;

    for line in content.lines() {
        if let Some(title) = line.strip_prefix(SECTION_PREFIX) {
            if let Some(section) = current.take() {
                sections.push(section);
            }
            current = Some(Section {
                title: title.trim(),
                lines: Vec::new(),
            });
        } else if let Some(section) = current.as_mut() {
            section.lines.push(line);
        }
    }
    sections.extend(current);
    sections
}

fn parse_section(section: &Section<'_>) -> Option<Table> {
    let table_lines: Vec<&str> = section
        .lines
        .iter()
        .copied()
        .filter(|line| line.trim_start().starts_with('|'))
        .collect();

    if table_lines.len() < 2 {
        debug!(section = section.title, "Section has no table");
        return None;
    }
    if section.lines.iter().any(|line| line.contains(NO_DATA_MARKER)) {
        debug!(section = section.title, "Section marked as having no data");
        return None;
    }

    let headers = split_row(table_lines[0]);
    // index 1 is the separator row
    let rows: Vec<Vec<String>> = table_lines.iter().skip(2).copied().map(split_row).collect();

    if headers.is_empty() || rows.is_empty() {
        warn!(section = section.title, "Table has no header or no data rows");
        return None;
    }
    Some(Table::from_rows(&headers, &rows))
}

/// Parse every usable table of a markdown export, in document order
#[must_use]
pub fn parse_markdown_tables(content: &str) -> Vec<(String, Table)> {
    sections(content)
        .iter()
        .filter_map(|section| {
            parse_section(section).map(|table| (dataset_key(section.title), table))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_row_handles_escaped_pipes() {
        assert_eq!(
            split_row("| 1 | Morning \\| Run |  |"),
            vec!["1".to_owned(), "Morning | Run".to_owned(), String::new()]
        );
    }

    #[test]
    fn test_split_row_without_closing_pipe() {
        assert_eq!(split_row("| a | b"), vec!["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn test_dataset_key_removes_spaces() {
        assert_eq!(dataset_key("Activity Summary "), "ActivitySummary");
    }

    #[test]
    fn test_deeper_headings_stay_inside_section() {
        let content = "## Sleep Summary\n### Notes\n| time | sleepScore |\n|---|---|\n| 2025-03-01 | 80 |\n";
        let tables = parse_markdown_tables(content);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].0, "SleepSummary");
        assert_eq!(tables[0].1.number(0, "sleepScore"), Some(80.0));
    }
}
