//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::path::PathBuf;

use csview::Document;
use tempfile::TempDir;

/// Write `content` to `name` inside a fresh temp dir
///
/// Keep the returned `TempDir` alive for as long as the file is needed.
pub fn temp_csv(name: &str, content: &[u8]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write temp csv");
    (dir, path)
}

/// Header fields as owned strings
pub fn header_text(doc: &Document) -> Option<Vec<String>> {
    doc.header().map(|fields| {
        fields
            .iter()
            .map(|f| f.to_str_lossy().into_owned())
            .collect()
    })
}

/// Every row's fields as owned strings
pub fn rows_text(doc: &Document) -> Vec<Vec<String>> {
    doc.rows()
        .iter()
        .map(|row| {
            row.fields()
                .iter()
                .map(|f| f.to_str_lossy().into_owned())
                .collect()
        })
        .collect()
}
