//! In-memory storage with controllable read chunking

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::{ByteSink, ByteSource, Storage};

/// Serves a byte buffer at most `chunk_size` bytes per read.
///
/// Optionally fails with an I/O error once `fail_at` bytes have been served.
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Rc<[u8]>,
    pos: usize,
    chunk_size: usize,
    fail_at: Option<usize>,
}

impl MemorySource {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        let data: Vec<u8> = data.into();
        Self {
            data: data.into(),
            pos: 0,
            chunk_size: usize::MAX,
            fail_at: None,
        }
    }

    /// Limit every read to `chunk_size` bytes (minimum 1)
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Fail the first read that starts at or after `offset`
    pub fn failing_at(mut self, offset: usize) -> Self {
        self.fail_at = Some(offset);
        self
    }

    /// Bytes served so far
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl ByteSource for MemorySource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(offset) = self.fail_at {
            if self.pos >= offset {
                return Err(io::Error::new(io::ErrorKind::Other, "simulated read failure"));
            }
        }

        let remaining = &self.data[self.pos..];
        let mut n = remaining.len().min(buf.len()).min(self.chunk_size);
        if let Some(offset) = self.fail_at {
            n = n.min(offset - self.pos);
        }
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Ok(n)
    }
}

type Files = Rc<RefCell<HashMap<PathBuf, Vec<u8>>>>;

/// Path-keyed in-memory files
///
/// Cloning shares the same file table.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: Files,
    chunk_size: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve reads in chunks of `chunk_size` bytes
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    pub fn insert(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        self.files.borrow_mut().insert(path.into(), data.into());
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.borrow().get(path.as_ref()).cloned()
    }
}

impl Storage for MemoryStorage {
    type Source = MemorySource;
    type Sink = MemorySink;

    fn open_read(&self, path: &Path) -> io::Result<MemorySource> {
        let files = self.files.borrow();
        let data = files
            .get(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such in-memory file"))?;
        let source = MemorySource::new(data.clone());
        Ok(match self.chunk_size {
            Some(size) => source.with_chunk_size(size),
            None => source,
        })
    }

    fn open_write(&self, path: &Path) -> io::Result<MemorySink> {
        self.files.borrow_mut().insert(path.to_path_buf(), Vec::new());
        Ok(MemorySink {
            files: Rc::clone(&self.files),
            path: path.to_path_buf(),
            buffer: Vec::new(),
        })
    }
}

/// Collects writes and publishes them to the owning [`MemoryStorage`] on close
#[derive(Debug)]
pub struct MemorySink {
    files: Files,
    path: PathBuf,
    buffer: Vec<u8>,
}

impl ByteSink for MemorySink {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    fn close(self) -> io::Result<()> {
        self.files.borrow_mut().insert(self.path, self.buffer);
        Ok(())
    }
}
