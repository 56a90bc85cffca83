//! Console table and summary report
//!
//! Read-only consumers of a [`Document`]. The table is clipped to
//! `column_count()` columns: extra fields of ragged rows are not shown.

use std::fmt::Write as _;

use serde::Serialize;

use super::model::{Document, Field};

const NULL_DOCUMENT: &str = "CSV Document is NULL.";

/// Display width of a field, in characters
fn cell_width(field: &Field) -> usize {
    field.to_str_lossy().chars().count()
}

/// Widest cell per column, over the header and every row
pub fn column_widths(doc: &Document) -> Vec<usize> {
    let num_cols = doc.column_count();
    let mut widths = vec![0; num_cols];

    let header = doc.header().unwrap_or_default();
    let lines = std::iter::once(header).chain(doc.rows().iter().map(|r| r.fields()));
    for fields in lines {
        for (width, field) in widths.iter_mut().zip(fields) {
            *width = (*width).max(cell_width(field));
        }
    }

    widths
}

fn push_cell(out: &mut String, text: &str, width: usize) {
    let _ = write!(out, "{:<width$} | ", text, width = width);
}

/// Render the document as a left-aligned table
///
/// ```text
/// id | name  |
/// ---+-------+-
/// 1  | Alice |
/// ```
pub fn format_table(doc: &Document) -> String {
    let widths = column_widths(doc);
    let mut out = String::new();

    if let Some(header) = doc.header() {
        for (i, width) in widths.iter().enumerate() {
            let text = header.get(i).map(Field::to_str_lossy).unwrap_or_default();
            push_cell(&mut out, &text, *width);
        }
        out.push('\n');
        for width in &widths {
            out.push_str(&"-".repeat(*width));
            out.push_str("-+-");
        }
        out.push('\n');
    }

    for row in doc.rows() {
        for (field, width) in row.fields().iter().zip(&widths) {
            push_cell(&mut out, &field.to_str_lossy(), *width);
        }
        out.push('\n');
    }

    out
}

/// Summary of a document's shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    pub rows: usize,
    pub columns: usize,
    pub has_header: bool,
}

impl DocumentInfo {
    pub fn of(doc: &Document) -> Self {
        Self {
            rows: doc.row_count(),
            columns: doc.column_count(),
            has_header: doc.has_header(),
        }
    }
}

/// Render the framed info report
pub fn format_info(doc: &Document) -> String {
    let info = DocumentInfo::of(doc);
    format!(
        "--- CSV Info ---\nRows:    {}\nColumns: {}\nHeader:  {}\n----------------\n",
        info.rows,
        info.columns,
        if info.has_header { "Yes" } else { "No" }
    )
}

fn render_or_notice(doc: Option<&Document>, render: fn(&Document) -> String) -> String {
    match doc {
        Some(doc) => render(doc),
        None => format!("{}\n", NULL_DOCUMENT),
    }
}

/// Print the table to stdout, or a notice when there is no document
pub fn show(doc: Option<&Document>) {
    print!("{}", render_or_notice(doc, format_table));
}

/// Print the info report to stdout, or a notice when there is no document
pub fn info(doc: Option<&Document>) {
    print!("{}", render_or_notice(doc, format_info));
}
