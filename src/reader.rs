//! Streaming NSV reader.
//!
//! Decoding is a two-buffer state machine driven one line at a time:
//!
//! - a **line buffer** accumulates characters up to the next `\n`
//! - a **row buffer** holds the cells decoded so far for the current row
//!
//! A non-empty line is unescaped and appended to the row. An empty line
//! terminates the row, which is handed to the consumer (possibly empty) and
//! forgotten. Every empty line terminates exactly one row, so `"\n\n\n\n"`
//! decodes to four empty rows.
//!
//! ## End of input
//!
//! If the input stops before the last row's blank line, whatever is pending
//! (a non-empty row buffer, or a non-empty line buffer) is surfaced as a final
//! row. [`decode`], [`decode_reader`] and [`Reader`] all finish through
//! [`RowDecoder::finish`], so they agree on every input.
//!
//! ## Examples
//!
//! ```rust
//! use nsv::{decode, Reader};
//!
//! let input = "a\nb\n\nc\nd\n\n";
//! assert_eq!(decode(input), vec![vec!["a", "b"], vec!["c", "d"]]);
//!
//! let mut reader = Reader::new(input.as_bytes());
//! assert_eq!(reader.next().unwrap().unwrap(), vec!["a", "b"]);
//! assert_eq!(reader.next().unwrap().unwrap(), vec!["c", "d"]);
//! assert!(reader.next().is_none());
//! ```

use crate::codec::{Codec, DefaultCodec};
use crate::{Error, Result, Row, Table};
use std::io::{self, BufRead};
use std::iter::FusedIterator;
use std::mem;

/// Push-based decoding state machine.
///
/// Feed it text in chunks of any size; chunk boundaries may fall anywhere,
/// including between the two newlines of a row terminator. Completed rows are
/// passed to the `emit` callback as soon as their terminator is seen.
///
/// # Examples
///
/// ```rust
/// use nsv::RowDecoder;
///
/// let mut decoder = RowDecoder::new();
/// let mut rows = Vec::new();
/// decoder.feed("a\nb", |row| rows.push(row));
/// decoder.feed("\n\n", |row| rows.push(row));
/// assert_eq!(rows, vec![vec!["a", "b"]]);
/// assert_eq!(decoder.finish(), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RowDecoder<C = DefaultCodec> {
    codec: C,
    line: String,
    row: Row,
}

impl RowDecoder {
    pub fn new() -> Self {
        RowDecoder::with_codec(DefaultCodec::default())
    }
}

impl<C: Codec> RowDecoder<C> {
    /// Creates a decoder with an explicit codec backend.
    pub fn with_codec(codec: C) -> Self {
        RowDecoder {
            codec,
            line: String::new(),
            row: Vec::new(),
        }
    }

    /// Consumes a chunk of text, emitting every row it completes.
    pub fn feed<F>(&mut self, chunk: &str, mut emit: F)
    where
        F: FnMut(Row),
    {
        let mut rest = chunk;
        while let Some(pos) = rest.find('\n') {
            let head = &rest[..pos];
            if self.line.is_empty() {
                self.complete_line(head, &mut emit);
            } else {
                self.line.push_str(head);
                let line = mem::take(&mut self.line);
                self.complete_line(&line, &mut emit);
                self.line = line;
                self.line.clear();
            }
            rest = &rest[pos + 1..];
        }
        self.line.push_str(rest);
    }

    /// Flushes state at end of input.
    ///
    /// Returns the pending partial row, if any, and resets the decoder.
    pub fn finish(&mut self) -> Option<Row> {
        if !self.line.is_empty() {
            let line = mem::take(&mut self.line);
            self.push_cell(&line);
        }
        if self.row.is_empty() {
            None
        } else {
            tracing::debug!(cells = self.row.len(), "surfacing unterminated final row");
            Some(mem::take(&mut self.row))
        }
    }

    /// Returns `true` when no partial line or row is buffered.
    pub fn is_idle(&self) -> bool {
        self.line.is_empty() && self.row.is_empty()
    }

    fn complete_line<F>(&mut self, line: &str, emit: &mut F)
    where
        F: FnMut(Row),
    {
        if line.is_empty() {
            let row = mem::take(&mut self.row);
            tracing::trace!(cells = row.len(), "row complete");
            emit(row);
        } else {
            self.push_cell(line);
        }
    }

    fn push_cell(&mut self, line: &str) {
        let mut cell = String::with_capacity(line.len());
        self.codec.unescape_into(line, &mut cell);
        self.row.push(cell);
    }
}

/// Pull-based row iterator over a [`BufRead`] stream.
///
/// Reads one line per step and yields each row as soon as its terminator has
/// been read. Dropping the reader early discards the buffered partial state.
/// A read error or a line that is not UTF-8 ends iteration after being
/// yielded once.
#[derive(Debug)]
pub struct Reader<R, C = DefaultCodec> {
    inner: R,
    decoder: RowDecoder<C>,
    buf: Vec<u8>,
    lines: usize,
    done: bool,
}

impl<R: BufRead> Reader<R> {
    /// Creates a reader using the default codec.
    pub fn new(inner: R) -> Self {
        Reader::with_codec(inner, DefaultCodec::default())
    }
}

impl<R: BufRead, C: Codec> Reader<R, C> {
    /// Creates a reader with an explicit codec backend.
    pub fn with_codec(inner: R, codec: C) -> Self {
        Reader {
            inner,
            decoder: RowDecoder::with_codec(codec),
            buf: Vec::with_capacity(256),
            lines: 0,
            done: false,
        }
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.lines
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn read_row(&mut self) -> Result<Option<Row>> {
        loop {
            self.buf.clear();
            if self.inner.read_until(b'\n', &mut self.buf)? == 0 {
                return Ok(self.decoder.finish());
            }
            self.lines += 1;
            let text = std::str::from_utf8(&self.buf)
                .map_err(|_| Error::InvalidUtf8 { line: self.lines })?;

            let mut completed = None;
            self.decoder.feed(text, |row| completed = Some(row));
            if completed.is_some() {
                return Ok(completed);
            }
        }
    }
}

impl<R: BufRead, C: Codec> Iterator for Reader<R, C> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_row() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                tracing::debug!(error = %err, line = self.lines, "nsv reader stopped");
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<R: BufRead, C: Codec> FusedIterator for Reader<R, C> {}

/// Decodes a whole string into a table. Never fails.
///
/// # Examples
///
/// ```rust
/// use nsv::decode;
///
/// assert!(decode("").is_empty());
/// assert_eq!(decode("\n"), vec![Vec::<String>::new()]);
/// assert_eq!(decode("\\\ng\n\\\n\n"), vec![vec!["", "g", ""]]);
/// ```
#[must_use]
pub fn decode(input: &str) -> Table {
    decode_with(input, DefaultCodec::default())
}

/// Decodes a whole string with an explicit codec.
#[must_use]
pub fn decode_with<C: Codec>(input: &str, codec: C) -> Table {
    let mut decoder = RowDecoder::with_codec(codec);
    let mut table = Vec::new();
    decoder.feed(input, |row| table.push(row));
    table.extend(decoder.finish());
    table
}

/// Reads an entire stream into a table.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, or [`Error::InvalidUtf8`] if the
/// stream is not UTF-8.
pub fn decode_reader<R: io::Read>(reader: R) -> Result<Table> {
    Reader::new(io::BufReader::new(reader)).collect()
}
