//! Streaming NSV writer.
//!
//! Each cell is written as its escaped line followed by `\n`; each row ends
//! with one extra `\n`. Nothing beyond the current row is buffered, so the
//! writer can feed an unbounded sink.
//!
//! ## Examples
//!
//! ```rust
//! use nsv::Writer;
//!
//! let mut writer = Writer::new(Vec::new());
//! writer.write_row(["a", "b"]).unwrap();
//! writer.write_row(["c", "d"]).unwrap();
//!
//! let out = String::from_utf8(writer.into_inner()).unwrap();
//! assert_eq!(out, "a\nb\n\nc\nd\n\n");
//! ```

use crate::codec::{Codec, DefaultCodec};
use crate::Result;
use std::io;

/// Writes rows of cells to an [`io::Write`] sink.
///
/// The sink is owned by the writer until [`Writer::into_inner`]; pass
/// `&mut sink` to keep ownership on the caller's side.
#[derive(Debug)]
pub struct Writer<W, C = DefaultCodec> {
    sink: W,
    codec: C,
    buf: String,
}

impl<W: io::Write> Writer<W> {
    /// Creates a writer using the default codec.
    pub fn new(sink: W) -> Self {
        Writer::with_codec(sink, DefaultCodec::default())
    }
}

impl<W: io::Write, C: Codec> Writer<W, C> {
    /// Creates a writer with an explicit codec backend.
    pub fn with_codec(sink: W, codec: C) -> Self {
        Writer {
            sink,
            codec,
            buf: String::with_capacity(256),
        }
    }

    /// Writes one row followed by its blank-line terminator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the sink fails.
    pub fn write_row<I>(&mut self, cells: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.buf.clear();
        for cell in cells {
            self.codec.escape_into(cell.as_ref(), &mut self.buf);
            self.buf.push('\n');
        }
        self.buf.push('\n');
        self.sink.write_all(self.buf.as_bytes())?;
        Ok(())
    }

    /// Writes every row in order, in one forward pass.
    ///
    /// # Errors
    ///
    /// Stops at the first sink failure and returns it.
    pub fn write_rows<I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: IntoIterator,
        <I::Item as IntoIterator>::Item: AsRef<str>,
    {
        let mut count = 0usize;
        for row in rows {
            self.write_row(row)?;
            count += 1;
        }
        tracing::trace!(rows = count, "wrote nsv rows");
        Ok(())
    }

    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// Encodes a whole table to a string.
///
/// # Examples
///
/// ```rust
/// use nsv::encode;
///
/// assert_eq!(encode([["a", "b"], ["c", "d"]]), "a\nb\n\nc\nd\n\n");
/// assert_eq!(encode([Vec::<String>::new()]), "\n");
/// assert_eq!(encode(Vec::<Vec<String>>::new()), "");
/// ```
#[must_use]
pub fn encode<I>(rows: I) -> String
where
    I: IntoIterator,
    I::Item: IntoIterator,
    <I::Item as IntoIterator>::Item: AsRef<str>,
{
    encode_with(rows, DefaultCodec::default())
}

/// Encodes a whole table to a string with an explicit codec.
#[must_use]
pub fn encode_with<I, C>(rows: I, codec: C) -> String
where
    I: IntoIterator,
    I::Item: IntoIterator,
    <I::Item as IntoIterator>::Item: AsRef<str>,
    C: Codec,
{
    let mut out = String::new();
    for row in rows {
        for cell in row {
            codec.escape_into(cell.as_ref(), &mut out);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Encodes rows straight into a writer.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) if the writer fails.
pub fn encode_to_writer<W, I>(writer: W, rows: I) -> Result<()>
where
    W: io::Write,
    I: IntoIterator,
    I::Item: IntoIterator,
    <I::Item as IntoIterator>::Item: AsRef<str>,
{
    let mut writer = Writer::new(writer);
    writer.write_rows(rows)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ReferenceCodec;

    fn written(rows: &[Vec<&str>]) -> String {
        let mut writer = Writer::new(Vec::new());
        writer.write_rows(rows).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_write_single_row() {
        assert_eq!(written(&[vec!["a", "b", "c"]]), "a\nb\nc\n\n");
    }

    #[test]
    fn test_write_empty_row() {
        assert_eq!(written(&[vec![]]), "\n");
    }

    #[test]
    fn test_write_empty_cells() {
        assert_eq!(written(&[vec!["", "g", ""]]), "\\\ng\n\\\n\n");
    }

    #[test]
    fn test_write_escaped_content() {
        assert_eq!(
            written(&[vec!["normal", "", "line1\nline2", "back\\slash"]]),
            "normal\n\\\nline1\\nline2\nback\\\\slash\n\n"
        );
    }

    #[test]
    fn test_incremental_writing() {
        let mut writer = Writer::new(Vec::new());
        writer.write_row(["first", "row"]).unwrap();
        assert_eq!(writer.get_ref().as_slice(), b"first\nrow\n\n");
        writer.write_row(["second", "row"]).unwrap();
        assert_eq!(
            writer.get_ref().as_slice(),
            b"first\nrow\n\nsecond\nrow\n\n"
        );
    }

    #[test]
    fn test_encode_matches_writer() {
        let rows = vec![vec!["a", ""], vec![], vec!["x\ny", "z\\"]];
        assert_eq!(encode(&rows), written(&rows));
    }

    #[test]
    fn test_encode_with_reference_codec() {
        let rows = vec![vec!["a\nb".to_string()]];
        assert_eq!(encode_with(&rows, ReferenceCodec), "a\\nb\n\n");
    }

    #[test]
    fn test_writer_borrows_sink() {
        let mut sink = Vec::new();
        encode_to_writer(&mut sink, [["x"]]).unwrap();
        assert_eq!(sink, b"x\n\n");
    }
}
