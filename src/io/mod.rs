//! Byte source/sink capability
//!
//! The CSV core never touches `std::fs` directly. It asks a [`Storage`] to open
//! a path and then talks to the returned [`ByteSource`] or [`ByteSink`]:
//!
//! - [`LocalFs`] is the portable implementation backed by the host filesystem
//! - [`MemorySource`] hands out an in-memory buffer in fixed-size chunks, which
//!   makes read-boundary behavior reproducible in tests and benchmarks
//!
//! A failed open is reported as `Err`; there is no half-open handle.

mod memory;

pub use memory::{MemorySource, MemoryStorage};

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

/// Something bytes can be pulled from
pub trait ByteSource {
    /// Read up to `buf.len()` bytes. `Ok(0)` means end of input.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Release the handle. Dropping the source releases it too.
    fn close(self) -> io::Result<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// Something bytes can be pushed into
pub trait ByteSink {
    /// Write all of `bytes` or fail.
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Flush and release the handle.
    fn close(self) -> io::Result<()>
    where
        Self: Sized;
}

/// Opens paths for reading or truncating writing
pub trait Storage {
    type Source: ByteSource;
    type Sink: ByteSink;

    fn open_read(&self, path: &Path) -> io::Result<Self::Source>;

    fn open_write(&self, path: &Path) -> io::Result<Self::Sink>;
}

/// Host filesystem storage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl Storage for LocalFs {
    type Source = FileSource;
    type Sink = FileSink;

    fn open_read(&self, path: &Path) -> io::Result<FileSource> {
        let file = File::open(path)?;
        Ok(FileSource { file })
    }

    fn open_write(&self, path: &Path) -> io::Result<FileSink> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Ok(FileSink {
            writer: BufWriter::new(file),
        })
    }
}

/// Read handle on a local file
#[derive(Debug)]
pub struct FileSource {
    file: File,
}

impl ByteSource for FileSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

/// Buffered write handle on a local file
#[derive(Debug)]
pub struct FileSink {
    writer: BufWriter<File>,
}

impl ByteSink for FileSink {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes)
    }

    fn close(self) -> io::Result<()> {
        let file = self.writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()
    }
}
