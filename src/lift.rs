//! The lift/unlift transform.
//!
//! `lift` encodes a flat sequence of cells as a single-row table, producing a
//! string that can itself be stored as one cell. `unlift` is its exact inverse
//! and insists that its input decodes to exactly one row.
//!
//! ```text
//! lift(["a", "b", "c"])  ==  "a\nb\nc\n\n"
//! ```
//!
//! Each application shifts nesting depth by exactly one level: lifting an
//! already lifted value doubles its backslashes and escapes its newlines once
//! more, and adds a single terminator. Repeated application is done by an
//! outer layer (see [`Value::fold`](crate::Value::fold)), never by `lift`
//! itself.
//!
//! ## Examples
//!
//! ```rust
//! use nsv::{lift, unlift};
//!
//! let row = lift(["a", "", "c"]);
//! assert_eq!(row, "a\n\\\nc\n\n");
//! assert_eq!(unlift(&row).unwrap(), vec!["a", "", "c"]);
//!
//! // One cell up: the lifted row is just another cell
//! let outer = lift([row.as_str(), "d"]);
//! let inner = unlift(&outer).unwrap();
//! assert_eq!(inner[0], row);
//! ```

use crate::codec::{Codec, DefaultCodec};
use crate::reader::decode_with;
use crate::{Error, Result, Table};

/// Encodes `cells` as one terminated row.
#[must_use]
pub fn lift<I>(cells: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    lift_with(cells, DefaultCodec::default())
}

/// [`lift`] with an explicit codec.
#[must_use]
pub fn lift_with<I, C>(cells: I, codec: C) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    C: Codec,
{
    let mut out = String::new();
    for cell in cells {
        codec.escape_into(cell.as_ref(), &mut out);
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Decodes a lifted row back into its cells.
///
/// # Errors
///
/// Returns [`Error::Shape`] if `row` decodes to zero rows or to more than one.
///
/// ```rust
/// use nsv::{unlift, Error};
///
/// assert_eq!(unlift("a\nb\nc\n\n").unwrap(), vec!["a", "b", "c"]);
/// assert_eq!(unlift("\n").unwrap(), Vec::<String>::new());
/// assert_eq!(unlift(""), Err(Error::Shape { rows: 0 }));
/// assert_eq!(unlift("a\n\nb\n\n"), Err(Error::Shape { rows: 2 }));
/// ```
pub fn unlift(row: &str) -> Result<Vec<String>> {
    unlift_with(row, DefaultCodec::default())
}

/// [`unlift`] with an explicit codec.
pub fn unlift_with<C: Codec>(row: &str, codec: C) -> Result<Vec<String>> {
    let mut table = decode_with(row, codec);
    if table.len() != 1 {
        tracing::debug!(rows = table.len(), "unlift input is not a single row");
        return Err(Error::shape(table.len()));
    }
    Ok(table.pop().unwrap_or_default())
}

/// Collapses one dimension by appending `marker` after every inner sequence.
///
/// Purely structural: nothing is escaped, so `marker` must not occur inside
/// the data for [`unspill`] to recover it. Encoding a table is two spills over
/// its escaped cells, first with `""` between rows, then with `'\n'` between
/// characters:
///
/// ```rust
/// use nsv::{encode, escape_seqseq, spill};
///
/// let table = vec![vec!["a", ""], vec!["x\ny"]];
/// let lines = spill(escape_seqseq(&table), String::new());
/// let text: String = spill(lines.iter().map(|line| line.chars()), '\n')
///     .into_iter()
///     .collect();
/// assert_eq!(text, encode(&table));
/// ```
pub fn spill<I, T>(seqseq: I, marker: T) -> Vec<T>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = T>,
    T: Clone,
{
    let mut seq = Vec::new();
    for inner in seqseq {
        seq.extend(inner);
        seq.push(marker.clone());
    }
    seq
}

/// Recovers one dimension by splitting `seq` after every `marker`.
///
/// Strict: items after the last marker form no complete group and are
/// dropped.
///
/// ```rust
/// use nsv::unspill;
///
/// assert_eq!(unspill("ab\n\nc".chars(), &'\n'), vec![vec!['a', 'b'], vec![]]);
/// ```
pub fn unspill<I, T>(seq: I, marker: &T) -> Vec<Vec<T>>
where
    I: IntoIterator<Item = T>,
    T: PartialEq,
{
    let mut seqseq = Vec::new();
    let mut current = Vec::new();
    for item in seq {
        if item == *marker {
            seqseq.push(std::mem::take(&mut current));
        } else {
            current.push(item);
        }
    }
    if !current.is_empty() {
        tracing::trace!(items = current.len(), "unspill dropped incomplete group");
    }
    seqseq
}

/// Escapes every cell of a table, keeping its shape.
#[must_use]
pub fn escape_seqseq<I>(rows: I) -> Table
where
    I: IntoIterator,
    I::Item: IntoIterator,
    <I::Item as IntoIterator>::Item: AsRef<str>,
{
    let codec = DefaultCodec::default();
    rows.into_iter()
        .map(|row| row.into_iter().map(|cell| codec.escape(cell.as_ref())).collect())
        .collect()
}

/// Unescapes every cell of a table, keeping its shape.
#[must_use]
pub fn unescape_seqseq<I>(rows: I) -> Table
where
    I: IntoIterator,
    I::Item: IntoIterator,
    <I::Item as IntoIterator>::Item: AsRef<str>,
{
    let codec = DefaultCodec::default();
    rows.into_iter()
        .map(|row| row.into_iter().map(|cell| codec.unescape(cell.as_ref())).collect())
        .collect()
}
