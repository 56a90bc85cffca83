//! Buffered logical-line reader over a [`ByteSource`]
//!
//! Hides the source's read chunking from the tokenizer. Memory use is fixed:
//! one refill buffer plus one line buffer, whatever the input size.

use std::io;

use crate::io::ByteSource;

/// Default refill buffer size in bytes
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

/// Default maximum number of content bytes per returned line
pub const DEFAULT_MAX_LINE_LEN: usize = 1023;

/// Yields lines terminated by `\n`, with a trailing `\r` removed
///
/// A physical line longer than `max_line_len` is split: the first call returns
/// the first `max_line_len` bytes and the following call(s) continue where it
/// stopped.
pub struct LineReader<S> {
    source: S,
    buf: Box<[u8]>,
    pos: usize,
    filled: usize,
    eof: bool,
    line: Vec<u8>,
    max_line_len: usize,
    line_number: usize,
}

impl<S: ByteSource> LineReader<S> {
    pub fn new(source: S) -> Self {
        Self::with_capacity(source, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_LINE_LEN)
    }

    /// Create a reader with explicit buffer and line capacities (each at least 1)
    pub fn with_capacity(source: S, buffer_size: usize, max_line_len: usize) -> Self {
        let max_line_len = max_line_len.max(1);
        Self {
            source,
            buf: vec![0u8; buffer_size.max(1)].into_boxed_slice(),
            pos: 0,
            filled: 0,
            eof: false,
            line: Vec::with_capacity(max_line_len),
            max_line_len,
            line_number: 0,
        }
    }

    /// Next logical line, or `None` once the source is exhausted
    pub fn next_line(&mut self) -> io::Result<Option<&[u8]>> {
        self.line.clear();
        let mut terminated = false;

        loop {
            if self.pos == self.filled {
                if self.eof || !self.refill()? {
                    break;
                }
            }

            let room = self.max_line_len - self.line.len();
            let available = &self.buf[self.pos..self.filled];
            let window = &available[..available.len().min(room)];

            if let Some(i) = window.iter().position(|&b| b == b'\n') {
                self.line.extend_from_slice(&window[..i]);
                self.pos += i + 1;
                terminated = true;
                break;
            }

            self.line.extend_from_slice(window);
            self.pos += window.len();
            if self.line.len() == self.max_line_len {
                // a full line ending in `\r` may still be a complete CRLF line
                if self.line.last() == Some(&b'\r') && self.next_byte_is_newline()? {
                    self.pos += 1;
                    terminated = true;
                }
                break;
            }
        }

        if !terminated && self.line.is_empty() {
            return Ok(None);
        }

        let truncated = !terminated && !self.eof;
        if !truncated && self.line.last() == Some(&b'\r') {
            self.line.pop();
        }

        self.line_number += 1;
        Ok(Some(self.line.as_slice()))
    }

    /// Number of lines returned so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Give back the underlying source, dropping any buffered bytes
    pub fn into_inner(self) -> S {
        self.source
    }

    /// Peek at the byte under the cursor, refilling if the buffer is spent
    fn next_byte_is_newline(&mut self) -> io::Result<bool> {
        if self.pos == self.filled && (self.eof || !self.refill()?) {
            return Ok(false);
        }
        Ok(self.buf[self.pos] == b'\n')
    }

    /// Returns false when the source has no more bytes
    fn refill(&mut self) -> io::Result<bool> {
        loop {
            match self.source.read(&mut self.buf) {
                Ok(0) => {
                    self.eof = true;
                    self.pos = 0;
                    self.filled = 0;
                    return Ok(false);
                }
                Ok(n) => {
                    self.pos = 0;
                    self.filled = n;
                    return Ok(true);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemorySource;

    fn collect_lines<S: ByteSource>(mut reader: LineReader<S>) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = reader.next_line().unwrap() {
            lines.push(String::from_utf8_lossy(line).into_owned());
        }
        lines
    }

    #[test]
    fn test_lf_lines() {
        let reader = LineReader::new(MemorySource::new("a,b\nc,d\n"));
        assert_eq!(collect_lines(reader), vec!["a,b", "c,d"]);
    }

    #[test]
    fn test_crlf_lines() {
        let reader = LineReader::new(MemorySource::new("a,b\r\nc,d\r\n"));
        assert_eq!(collect_lines(reader), vec!["a,b", "c,d"]);
    }

    #[test]
    fn test_inner_carriage_return_is_kept() {
        let reader = LineReader::new(MemorySource::new("a\rb\n"));
        assert_eq!(collect_lines(reader), vec!["a\rb"]);
    }

    #[test]
    fn test_unterminated_trailing_line() {
        let reader = LineReader::new(MemorySource::new("a\nlast"));
        assert_eq!(collect_lines(reader), vec!["a", "last"]);
    }

    #[test]
    fn test_unterminated_trailing_line_with_cr() {
        let reader = LineReader::new(MemorySource::new("a\nlast\r"));
        assert_eq!(collect_lines(reader), vec!["a", "last"]);
    }

    #[test]
    fn test_blank_lines_are_returned_empty() {
        let reader = LineReader::new(MemorySource::new("a\n\n\r\nb\n"));
        assert_eq!(collect_lines(reader), vec!["a", "", "", "b"]);
    }

    #[test]
    fn test_empty_input() {
        let mut reader = LineReader::new(MemorySource::new(""));
        assert!(reader.next_line().unwrap().is_none());
        assert!(reader.next_line().unwrap().is_none());
        assert_eq!(reader.line_number(), 0);
    }

    #[test]
    fn test_single_byte_chunks() {
        let source = MemorySource::new("id,name\r\n1,Alice\n2,Bob").with_chunk_size(1);
        let reader = LineReader::new(source);
        assert_eq!(collect_lines(reader), vec!["id,name", "1,Alice", "2,Bob"]);
    }

    #[test]
    fn test_crlf_split_across_refills() {
        // "ab\r" fills the first buffer, "\n" arrives with the next refill
        let source = MemorySource::new("ab\r\ncd\n");
        let reader = LineReader::with_capacity(source, 3, 64);
        assert_eq!(collect_lines(reader), vec!["ab", "cd"]);
    }

    #[test]
    fn test_long_line_is_split_at_capacity() {
        let source = MemorySource::new("abcdefgh\nxy\n");
        let reader = LineReader::with_capacity(source, 4, 3);
        assert_eq!(collect_lines(reader), vec!["abc", "def", "gh", "xy"]);
    }

    #[test]
    fn test_crlf_line_filling_capacity_is_not_split() {
        let source = MemorySource::new("ab\r\ncd\r\n");
        let reader = LineReader::with_capacity(source, 16, 3);
        assert_eq!(collect_lines(reader), vec!["ab", "cd"]);
    }

    #[test]
    fn test_crlf_at_capacity_across_refill() {
        // the `\n` after a full line only arrives with the next refill
        let source = MemorySource::new("ab\r\ncd\r\n");
        let reader = LineReader::with_capacity(source, 3, 3);
        assert_eq!(collect_lines(reader), vec!["ab", "cd"]);
    }

    #[test]
    fn test_cr_at_capacity_before_eof_is_stripped() {
        let reader = LineReader::with_capacity(MemorySource::new("ab\r"), 16, 3);
        assert_eq!(collect_lines(reader), vec!["ab"]);
    }

    #[test]
    fn test_cr_at_capacity_without_newline_stays() {
        let reader = LineReader::with_capacity(MemorySource::new("ab\rcd\n"), 16, 3);
        assert_eq!(collect_lines(reader), vec!["ab\r", "cd"]);
    }

    #[test]
    fn test_line_of_exact_capacity_yields_empty_remainder() {
        let source = MemorySource::new("abc\nd\n");
        let reader = LineReader::with_capacity(source, 16, 3);
        assert_eq!(collect_lines(reader), vec!["abc", "", "d"]);
    }

    #[test]
    fn test_does_not_read_past_next_line() {
        let source = MemorySource::new("a\nb\nc\n");
        let mut reader = LineReader::with_capacity(source, 64, 16);
        assert_eq!(reader.next_line().unwrap(), Some(&b"a"[..]));
        assert_eq!(reader.line_number(), 1);
        assert_eq!(reader.next_line().unwrap(), Some(&b"b"[..]));
        assert_eq!(reader.line_number(), 2);
    }

    #[test]
    fn test_read_error_surfaces() {
        let source = MemorySource::new("a\nbbbbbbbb\n").failing_at(4);
        let mut reader = LineReader::with_capacity(source, 64, 64);
        assert_eq!(reader.next_line().unwrap(), Some(&b"a"[..]));
        assert!(reader.next_line().is_err());
    }

    #[test]
    fn test_large_input_keeps_fixed_buffers() {
        let input = "0123456789,abcdefghij\n".repeat(10_000);
        let source = MemorySource::new(input).with_chunk_size(777);
        let mut reader = LineReader::with_capacity(source, 128, 64);
        let line_capacity = reader.line.capacity();
        let mut count = 0;
        while let Some(line) = reader.next_line().unwrap() {
            assert_eq!(line, b"0123456789,abcdefghij");
            count += 1;
        }
        assert_eq!(count, 10_000);
        assert_eq!(reader.line.capacity(), line_capacity);
    }
}
