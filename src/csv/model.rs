//! CSV data model types
//!
//! A [`Document`] owns its optional header and its rows, and every [`Row`] owns
//! its fields. Dropping the document releases the whole tree once.

use std::borrow::Cow;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// One field's raw bytes, without surrounding quotes
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Field {
    bytes: Box<[u8]>,
}

impl Field {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Field text, with invalid UTF-8 replaced
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_str_lossy())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str_lossy())
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<&[u8]> for Field {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl PartialEq<str> for Field {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Field {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

/// A parsed data line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<Field>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, col: usize) -> Option<&Field> {
        self.fields.get(col)
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }
}

impl<'a, T: Into<Field> + Copy> From<&'a [T]> for Row {
    fn from(values: &'a [T]) -> Self {
        Self::from_fields(values.iter().map(|&v| v.into()).collect())
    }
}

/// An in-memory CSV file: optional header plus rows in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    header: Option<Vec<Field>>,
    rows: Vec<Row>,
    num_cols: usize,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from already-split rows
    ///
    /// `num_cols` follows the same rule as reading: the header's width when it
    /// has fields, otherwise the first row's width.
    pub fn from_parts(header: Option<Vec<Field>>, rows: Vec<Row>) -> Self {
        let mut doc = Self {
            header: None,
            rows: Vec::new(),
            num_cols: 0,
        };
        if let Some(header) = header {
            doc.set_header(header);
        }
        for row in rows {
            doc.push_row(row);
        }
        doc
    }

    pub(crate) fn set_header(&mut self, header: Vec<Field>) {
        if self.num_cols == 0 {
            self.num_cols = header.len();
        }
        self.header = Some(header);
    }

    pub(crate) fn push_row(&mut self, row: Row) {
        if self.num_cols == 0 {
            self.num_cols = row.num_fields();
        }
        self.rows.push(row);
    }

    /// Number of data rows (the header is not counted)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Reference column count, from the header or the first data row
    pub fn column_count(&self) -> usize {
        self.num_cols
    }

    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    pub fn header(&self) -> Option<&[Field]> {
        self.header.as_deref()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Field at (row, col), `None` when either index is out of range
    pub fn field(&self, row: usize, col: usize) -> Option<&Field> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Number of rows whose width differs from `column_count`
    pub fn ragged_row_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.num_fields() != self.num_cols)
            .count()
    }
}

/// Release a document and clear the caller's handle
///
/// Safe to call repeatedly; an empty handle is left alone.
pub fn free(handle: &mut Option<Document>) {
    let Some(doc) = handle.take() else {
        return;
    };

    let Document { header, rows, .. } = doc;
    let header_fields = header.as_ref().map_or(0, Vec::len);
    let row_count = rows.len();

    drop(header);
    for row in rows {
        drop(row.into_fields());
    }

    tracing::trace!(header_fields, row_count, "freed csv document");
}

/// Scope guard that frees its document exactly once when dropped
#[derive(Debug, Default)]
pub struct ScopedDocument {
    handle: Option<Document>,
}

impl ScopedDocument {
    pub fn new(handle: Option<Document>) -> Self {
        Self { handle }
    }

    /// Mutable access to the guarded handle, e.g. to [`free`] it early
    pub fn handle_mut(&mut self) -> &mut Option<Document> {
        &mut self.handle
    }
}

impl From<Document> for ScopedDocument {
    fn from(doc: Document) -> Self {
        Self::new(Some(doc))
    }
}

impl Deref for ScopedDocument {
    type Target = Option<Document>;

    fn deref(&self) -> &Self::Target {
        &self.handle
    }
}

impl DerefMut for ScopedDocument {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.handle
    }
}

impl Drop for ScopedDocument {
    fn drop(&mut self) {
        free(&mut self.handle);
    }
}
