//! Single-cell escape codec.
//!
//! NSV needs exactly two escapes to keep a cell on one line:
//!
//! | Cell text | Escaped line |
//! |-----------|--------------|
//! | `\` | `\\` |
//! | newline | `\n` |
//! | empty cell | `\` |
//!
//! The empty cell needs its own marker because a genuinely empty line is the
//! row terminator. Everything else passes through unchanged, so escaping is a
//! prefix code and a single forward scan decodes it.
//!
//! ## Backends
//!
//! Two interchangeable implementations sit behind the [`Codec`] trait:
//!
//! - [`ReferenceCodec`]: a char-at-a-time state machine, easy to audit
//! - [`FastCodec`]: scans bytes and copies unescaped spans in bulk
//!
//! Both produce identical output for every input. The backend is picked once,
//! at construction time, through a type parameter that defaults to
//! [`DefaultCodec`].
//!
//! ## Examples
//!
//! ```rust
//! use nsv::{escape, unescape};
//!
//! assert_eq!(escape(""), "\\");
//! assert_eq!(escape("a\\b"), "a\\\\b");
//! assert_eq!(escape("a\nb"), "a\\nb");
//! assert_eq!(unescape("line1\\nline2"), "line1\nline2");
//! ```

/// The marker line for an empty cell.
pub const EMPTY_CELL: &str = "\\";

/// Escape/unescape of a single cell.
///
/// Implementations must be total: `unescape` accepts any line that contains
/// no raw newline, and `unescape(escape(s)) == s` for every `s`.
pub trait Codec {
    /// Appends the escaped form of `cell` to `out`.
    fn escape_into(&self, cell: &str, out: &mut String);

    /// Appends the decoded form of `line` to `out`.
    fn unescape_into(&self, line: &str, out: &mut String);

    /// Returns the escaped form of `cell`.
    fn escape(&self, cell: &str) -> String {
        let mut out = String::with_capacity(cell.len() + 1);
        self.escape_into(cell, &mut out);
        out
    }

    /// Returns the decoded form of `line`.
    fn unescape(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        self.unescape_into(line, &mut out);
        out
    }
}

/// Char-at-a-time codec.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReferenceCodec;

impl Codec for ReferenceCodec {
    fn escape_into(&self, cell: &str, out: &mut String) {
        if cell.is_empty() {
            out.push_str(EMPTY_CELL);
            return;
        }
        for ch in cell.chars() {
            match ch {
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                _ => out.push(ch),
            }
        }
    }

    fn unescape_into(&self, line: &str, out: &mut String) {
        if line == EMPTY_CELL {
            return;
        }
        let mut chars = line.chars();
        while let Some(ch) = chars.next() {
            if ch != '\\' {
                out.push(ch);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('\\') => out.push('\\'),
                // Unknown escapes are kept verbatim
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        }
    }
}

/// Span-copying codec.
///
/// `\` and newline are single ASCII bytes and never occur inside a multi-byte
/// UTF-8 sequence, so every position found by the byte scan is a char boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FastCodec;

impl Codec for FastCodec {
    fn escape_into(&self, cell: &str, out: &mut String) {
        if cell.is_empty() {
            out.push_str(EMPTY_CELL);
            return;
        }
        let bytes = cell.as_bytes();
        let mut start = 0;
        for (i, &b) in bytes.iter().enumerate() {
            let replacement = match b {
                b'\\' => "\\\\",
                b'\n' => "\\n",
                _ => continue,
            };
            out.push_str(&cell[start..i]);
            out.push_str(replacement);
            start = i + 1;
        }
        out.push_str(&cell[start..]);
    }

    fn unescape_into(&self, line: &str, out: &mut String) {
        if line == EMPTY_CELL {
            return;
        }
        let bytes = line.as_bytes();
        let mut start = 0;
        while let Some(offset) = bytes[start..].iter().position(|&b| b == b'\\') {
            let at = start + offset;
            out.push_str(&line[start..at]);
            match bytes.get(at + 1) {
                Some(b'n') => {
                    out.push('\n');
                    start = at + 2;
                }
                Some(b'\\') => {
                    out.push('\\');
                    start = at + 2;
                }
                // Keep the backslash; the following char is copied with the next span
                Some(_) | None => {
                    out.push('\\');
                    start = at + 1;
                }
            }
        }
        out.push_str(&line[start..]);
    }
}

/// The backend used by the free functions and default constructors.
pub type DefaultCodec = FastCodec;

/// Escapes one cell with [`DefaultCodec`].
///
/// # Examples
///
/// ```rust
/// use nsv::escape;
///
/// assert_eq!(escape("hello"), "hello");
/// assert_eq!(escape("\\n"), "\\\\n");
/// ```
#[must_use]
pub fn escape(cell: &str) -> String {
    DefaultCodec::default().escape(cell)
}

/// Unescapes one line with [`DefaultCodec`]. Never fails.
///
/// # Examples
///
/// ```rust
/// use nsv::unescape;
///
/// assert_eq!(unescape("\\"), "");
/// assert_eq!(unescape("back\\\\slash"), "back\\slash");
/// ```
#[must_use]
pub fn unescape(line: &str) -> String {
    DefaultCodec::default().unescape(line)
}
