//! Serializing a [`Document`] back to comma-separated text
//!
//! Fields are written verbatim. A field that itself contains `,`, `"` or a
//! newline is not re-quoted, so such documents do not survive a round trip.

use std::path::Path;

use super::error::{CsvError, Result};
use super::model::{Document, Field};
use super::parser::DELIMITER;
use crate::io::{ByteSink, LocalFs, Storage};

/// Write `doc` to a file on the local filesystem, truncating it
pub fn write(doc: &Document, path: impl AsRef<Path>) -> Result<()> {
    write_to(&LocalFs, doc, path.as_ref())
}

/// Write `doc` to any [`Storage`]
pub fn write_to<S: Storage>(storage: &S, doc: &Document, path: &Path) -> Result<()> {
    let mut sink = storage.open_write(path).map_err(|source| {
        tracing::error!("Failed to open {} for writing: {}", path.display(), source);
        CsvError::SinkUnavailable {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let write_error = |source: std::io::Error| {
        tracing::error!("Write failed for {}: {}", path.display(), source);
        CsvError::Write {
            path: path.to_path_buf(),
            source,
        }
    };

    let mut line = Vec::new();
    if let Some(header) = doc.header() {
        encode_line(header, &mut line);
        sink.write_all(&line).map_err(write_error)?;
    }
    for row in doc.rows() {
        encode_line(row.fields(), &mut line);
        sink.write_all(&line).map_err(write_error)?;
    }

    sink.close().map_err(write_error)?;
    tracing::debug!(
        path = %path.display(),
        rows = doc.row_count(),
        header = doc.has_header(),
        "wrote csv"
    );
    Ok(())
}

/// Fields joined by the delimiter, terminated by `\n`
fn encode_line(fields: &[Field], out: &mut Vec<u8>) {
    out.clear();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        out.extend_from_slice(field.as_bytes());
    }
    out.push(b'\n');
}
