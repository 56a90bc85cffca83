//! Reading a whole file into a [`Document`]

use std::path::Path;

use super::error::{CsvError, Result};
use super::line_reader::{LineReader, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_LINE_LEN};
use super::model::Document;
use super::parser::tokenize;
use crate::io::{ByteSource, LocalFs, Storage};

/// Options for [`read_from`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Treat the first line as the header
    pub has_header: bool,
    /// Refill buffer size of the line reader
    pub buffer_size: usize,
    /// Longest line returned in one piece
    pub max_line_len: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }
}

impl ReadOptions {
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }
}

/// Read a CSV file from the local filesystem
///
/// An `Err` means no document was built; nothing is returned half-read.
pub fn read(path: impl AsRef<Path>, has_header: bool) -> Result<Document> {
    let options = ReadOptions::default().with_header(has_header);
    read_from(&LocalFs, path.as_ref(), options)
}

/// Read a CSV document from any [`Storage`]
pub fn read_from<S: Storage>(storage: &S, path: &Path, options: ReadOptions) -> Result<Document> {
    let source = storage.open_read(path).map_err(|source| {
        tracing::error!("Failed to open {} for reading: {}", path.display(), source);
        CsvError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        }
    })?;
    tracing::debug!(path = %path.display(), has_header = options.has_header, "reading csv");

    let mut lines = LineReader::with_capacity(source, options.buffer_size, options.max_line_len);
    let doc = read_lines(&mut lines, options.has_header).map_err(|source| {
        tracing::error!(
            "Read failed in {} after line {}: {}",
            path.display(),
            lines.line_number(),
            source
        );
        CsvError::Read {
            path: path.to_path_buf(),
            line: lines.line_number(),
            source,
        }
    })?;

    if let Err(e) = lines.into_inner().close() {
        tracing::warn!("Failed to close {}: {}", path.display(), e);
    }

    let ragged = doc.ragged_row_count();
    if ragged > 0 {
        tracing::warn!(
            "{} of {} rows in {} do not have {} fields",
            ragged,
            doc.row_count(),
            path.display(),
            doc.column_count()
        );
    }
    tracing::debug!(
        path = %path.display(),
        rows = doc.row_count(),
        cols = doc.column_count(),
        "finished reading csv"
    );

    Ok(doc)
}

fn read_lines<S: ByteSource>(lines: &mut LineReader<S>, has_header: bool) -> std::io::Result<Document> {
    let mut doc = Document::new();

    if has_header {
        if let Some(line) = lines.next_line()? {
            doc.set_header(tokenize(line).into_fields());
        }
    }

    while let Some(line) = lines.next_line()? {
        if line.is_empty() {
            tracing::trace!(line = lines.line_number(), "skipping blank line");
            continue;
        }
        let row = tokenize(line);
        doc.push_row(row);
    }

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::model::Field;
    use crate::io::MemoryStorage;

    fn read_mem(content: &str, has_header: bool) -> Document {
        let storage = MemoryStorage::new();
        storage.insert("in.csv", content);
        read_from(
            &storage,
            Path::new("in.csv"),
            ReadOptions::default().with_header(has_header),
        )
        .unwrap()
    }

    #[test]
    fn test_read_with_header() {
        let doc = read_mem("id,name\n1,Alice\n2,Bob\n", true);
        assert_eq!(doc.column_count(), 2);
        assert_eq!(doc.header().unwrap(), &[Field::from("id"), Field::from("name")][..]);
        assert_eq!(doc.row_count(), 2);
        assert_eq!(doc.field(1, 1).unwrap(), "Bob");
    }

    #[test]
    fn test_read_without_header() {
        let doc = read_mem("id,name\n1,Alice\n", false);
        assert!(!doc.has_header());
        assert_eq!(doc.row_count(), 2);
        assert_eq!(doc.column_count(), 2);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let doc = read_mem("a,b\n\n\r\nc,d\n\n", false);
        assert_eq!(doc.row_count(), 2);
        assert_eq!(doc.field(1, 0).unwrap(), "c");
    }

    #[test]
    fn test_empty_first_line_becomes_empty_header() {
        let doc = read_mem("\na,b,c\n", true);
        assert_eq!(doc.header().unwrap().len(), 0);
        assert_eq!(doc.column_count(), 3);
        assert_eq!(doc.row_count(), 1);
    }

    #[test]
    fn test_header_only() {
        let doc = read_mem("x,y,z\n", true);
        assert_eq!(doc.column_count(), 3);
        assert_eq!(doc.row_count(), 0);
    }

    #[test]
    fn test_empty_file() {
        let doc = read_mem("", true);
        assert!(!doc.has_header());
        assert_eq!(doc.row_count(), 0);
        assert_eq!(doc.column_count(), 0);
    }

    #[test]
    fn test_ragged_rows_are_stored_as_is() {
        let doc = read_mem("a,b\n1\n1,2,3\n", true);
        assert_eq!(doc.column_count(), 2);
        assert_eq!(doc.row(0).unwrap().num_fields(), 1);
        assert_eq!(doc.row(1).unwrap().num_fields(), 3);
    }

    #[test]
    fn test_num_cols_is_set_once() {
        let doc = read_mem("a\nb,c,d\n", false);
        assert_eq!(doc.column_count(), 1);
    }

    #[test]
    fn test_chunked_source_gives_same_document() {
        let content = "id,name\r\n1,\"Smith, J\"\n\n2,Bob";
        let whole = read_mem(content, true);

        let storage = MemoryStorage::new().with_chunk_size(1);
        storage.insert("in.csv", content);
        let chunked = read_from(&storage, Path::new("in.csv"), ReadOptions::default()).unwrap();

        assert_eq!(whole, chunked);
        assert_eq!(chunked.field(0, 1).unwrap(), "Smith, J");
    }

    #[test]
    fn test_missing_source() {
        let storage = MemoryStorage::new();
        let err = read_from(&storage, Path::new("missing.csv"), ReadOptions::default()).unwrap_err();
        assert!(matches!(err, CsvError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_crlf_line_one_short_of_default_limit() {
        let content = format!("{}\r\nnext\r\n", "x".repeat(DEFAULT_MAX_LINE_LEN - 1));
        let doc = read_mem(&content, false);
        assert_eq!(doc.row_count(), 2);
        assert_eq!(doc.field(0, 0).unwrap().len(), DEFAULT_MAX_LINE_LEN - 1);
        assert_eq!(doc.field(1, 0).unwrap(), "next");
    }

    #[test]
    fn test_long_line_continues_as_next_row() {
        let storage = MemoryStorage::new();
        storage.insert("in.csv", "abcdef\n");
        let options = ReadOptions {
            has_header: false,
            buffer_size: 4,
            max_line_len: 4,
        };
        let doc = read_from(&storage, Path::new("in.csv"), options).unwrap();
        assert_eq!(doc.row_count(), 2);
        assert_eq!(doc.field(0, 0).unwrap(), "abcd");
        assert_eq!(doc.field(1, 0).unwrap(), "ef");
    }
}
