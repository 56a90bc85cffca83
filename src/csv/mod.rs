//! CSV documents
//!
//! Reads a comma-separated file into memory, writes it back, and renders it
//! as a console table.
//!
//! # Architecture
//!
//! ```text
//! ByteSource ──▶ LineReader ──▶ tokenize ──▶ Document ──▶ write ──▶ ByteSink
//!                                              │
//!                                              └──▶ render (table / info)
//! ```
//!
//! Each logical line becomes one [`Row`]. Quoted fields cannot span lines.

mod error;
pub mod line_reader;
mod model;
mod parser;
mod reader;
pub mod render;
mod writer;

pub use error::{CsvError, Result};
pub use line_reader::LineReader;
pub use model::{free, Document, Field, Row, ScopedDocument};
pub use parser::{tokenize, DELIMITER, QUOTE};
pub use reader::{read, read_from, ReadOptions};
pub use render::{format_info, format_table, DocumentInfo};
pub use writer::{write, write_to};
