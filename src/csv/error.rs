//! Error type for reading and writing documents

use std::io;
use std::path::PathBuf;

/// Failure while reading or writing a CSV document
///
/// Malformed lines are never errors; only I/O is.
#[derive(Debug)]
pub enum CsvError {
    /// Path could not be opened for reading
    SourceUnavailable { path: PathBuf, source: io::Error },
    /// Path could not be opened for writing
    SinkUnavailable { path: PathBuf, source: io::Error },
    /// The source failed after `line` lines were read
    Read {
        path: PathBuf,
        line: usize,
        source: io::Error,
    },
    /// The sink failed while writing or closing
    Write { path: PathBuf, source: io::Error },
}

impl CsvError {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::SourceUnavailable { path, .. }
            | Self::SinkUnavailable { path, .. }
            | Self::Read { path, .. }
            | Self::Write { path, .. } => path,
        }
    }

    pub fn io_error(&self) -> &io::Error {
        match self {
            Self::SourceUnavailable { source, .. }
            | Self::SinkUnavailable { source, .. }
            | Self::Read { source, .. }
            | Self::Write { source, .. } => source,
        }
    }
}

impl std::fmt::Display for CsvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceUnavailable { path, source } => {
                write!(f, "cannot open {} for reading: {}", path.display(), source)
            }
            Self::SinkUnavailable { path, source } => {
                write!(f, "cannot open {} for writing: {}", path.display(), source)
            }
            Self::Read { path, line, source } => write!(
                f,
                "read error in {} after line {}: {}",
                path.display(),
                line,
                source
            ),
            Self::Write { path, source } => {
                write!(f, "write error in {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for CsvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.io_error())
    }
}

pub type Result<T> = std::result::Result<T, CsvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CsvError::SourceUnavailable {
            path: PathBuf::from("data.csv"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "cannot open data.csv for reading: not found");

        let err = CsvError::Read {
            path: PathBuf::from("data.csv"),
            line: 3,
            source: io::Error::new(io::ErrorKind::Other, "boom"),
        };
        assert_eq!(err.to_string(), "read error in data.csv after line 3: boom");
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;

        let err = CsvError::Write {
            path: PathBuf::from("out.csv"),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        };
        assert_eq!(err.source().unwrap().to_string(), "disk full");
        assert_eq!(err.path(), &PathBuf::from("out.csv"));
    }
}
