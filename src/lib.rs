//! csview - read, write and display simple CSV documents
//!
//! The whole file is parsed into a [`Document`]: an optional header plus rows
//! of raw-byte fields. File access goes through the [`io::Storage`]
//! capability so the parser can be driven from memory in tests.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod csv;
pub mod io;
pub mod tracing;

// Re-export commonly used types
pub use config::CsviewConfig;
pub use csv::{free, read, write, CsvError, Document, Field, Row, ScopedDocument};
