//! # nsv
//!
//! Encoder, decoder and serde integration for NSV (Newline-Separated Values).
//!
//! ## What is NSV?
//!
//! NSV stores a table (rows of string cells) as plain text with newline as the
//! only delimiter: one cell per line, one blank line after each row. Cells are
//! kept on one line by backslash escaping, never by quoting:
//!
//! ```text
//! a          <- cell "a"
//! b          <- cell "b"
//!            <- end of row 1
//! \          <- empty cell
//! line\nbreak <- cell "line<newline>break"
//!            <- end of row 2
//! ```
//!
//! ## Key Features
//!
//! - **Total decoding**: every string is a valid table, decoding never fails
//! - **Streaming**: [`Reader`] and [`Writer`] hold one row at a time
//! - **Any dimension**: [`lift`] turns a row into a cell, so tables of tables
//!   (3-D, 4-D, ...) nest without any new syntax
//! - **Serde Compatible**: `#[derive(Serialize, Deserialize)]` types map onto
//!   rows, fields onto cells, nested collections onto lifted cells
//!
//! ## Quick Start
//!
//! ```rust
//! use nsv::{decode, encode};
//!
//! let table = vec![vec!["a", "b"], vec!["c", "d"]];
//! let text = encode(&table);
//! assert_eq!(text, "a\nb\n\nc\nd\n\n");
//! assert_eq!(decode(&text), table);
//! ```
//!
//! ### Serde
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use nsv::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     tags: Vec<String>,
//! }
//!
//! let users = vec![User { id: 1, name: "Alice".to_string(), tags: vec!["admin".to_string()] }];
//! let text = to_string(&users).unwrap();
//! assert_eq!(text, "1\nAlice\nadmin\\n\\n\n\n");
//!
//! let back: Vec<User> = from_str(&text).unwrap();
//! assert_eq!(back, users);
//! ```
//!
//! ### Lift
//!
//! ```rust
//! use nsv::{lift, unlift};
//!
//! let row = lift(["a", "b", "c"]);
//! assert_eq!(row, "a\nb\nc\n\n");
//! assert_eq!(unlift(&row).unwrap(), vec!["a", "b", "c"]);
//! assert!(unlift("a\n\nb\n\n").is_err());
//! ```
//!
//! ## Codec backends
//!
//! Escaping runs through the [`Codec`] trait. [`FastCodec`] is the default;
//! [`ReferenceCodec`] is a straightforward char-by-char version with identical
//! output. Choose one explicitly with `Reader::with_codec`,
//! `Writer::with_codec`, `RowDecoder::with_codec` or the `*_with` functions.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Decoding a `&str` cannot fail; only I/O, `unlift` shape checks and serde
//!   type conversions return errors
//! - No panics in public API

pub mod codec;
pub mod de;
pub mod error;
pub mod lift;
pub mod macros;
pub mod reader;
pub mod ser;
pub mod value;
pub mod writer;

pub use codec::{escape, unescape, Codec, DefaultCodec, FastCodec, ReferenceCodec};
pub use de::Deserializer;
pub use error::{Error, Result};
pub use lift::{
    escape_seqseq, lift, lift_with, spill, unescape_seqseq, unlift, unlift_with, unspill,
};
pub use reader::{decode, decode_reader, decode_with, Reader, RowDecoder};
pub use ser::Serializer;
pub use value::Value;
pub use writer::{encode, encode_to_writer, encode_with, Writer};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// A cell: any string, including the empty string.
pub type Cell = String;

/// A row: an ordered sequence of cells, possibly empty.
pub type Row = Vec<Cell>;

/// A table: an ordered sequence of rows, possibly empty.
pub type Table = Vec<Row>;

/// Convert any `T: Serialize` to a nested [`Value`].
///
/// # Examples
///
/// ```rust
/// use nsv::{nsv, to_value};
///
/// let value = to_value(&vec![("a", 1), ("b", 2)]).unwrap();
/// assert_eq!(value, nsv!([["a", "1"], ["b", "2"]]));
/// ```
///
/// # Errors
///
/// Returns an error if a `Serialize` impl reports one.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(Serializer)
}

/// Serialize any `T: Serialize` to an NSV string.
///
/// The value must serialize as a sequence of rows, each a sequence of cells
/// (for example `Vec<Struct>` or `Vec<Vec<String>>`). Anything nested deeper
/// is lifted into single cells.
///
/// # Examples
///
/// ```rust
/// use nsv::to_string;
///
/// let rows = vec![vec!["a", "b"], vec!["c", "d"]];
/// assert_eq!(to_string(&rows).unwrap(), "a\nb\n\nc\nd\n\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedShape`] if the value is not a sequence of
/// sequences.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(encode(to_value(value)?.to_table()?))
}

/// Serialize any `T: Serialize` to a writer in NSV format.
///
/// # Examples
///
/// ```rust
/// use nsv::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &vec![(1, true)]).unwrap();
/// assert_eq!(buffer, b"1\ntrue\n\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value has the wrong shape or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let table = to_value(value)?.to_table()?;
    encode_to_writer(writer, table)
}

/// Deserialize an instance of type `T` from a [`Value`].
///
/// # Errors
///
/// Returns an error if the value's shape or cell text does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::from_value(value))
}

/// Deserialize an instance of type `T` from a string of NSV text.
///
/// # Examples
///
/// ```rust
/// use nsv::from_str;
///
/// let rows: Vec<(u8, Option<String>)> = from_str("1\n\\n\n\n2\nx\\n\\n\n\n").unwrap();
/// assert_eq!(rows, vec![(1, None), (2, Some("x".to_string()))]);
/// ```
///
/// # Errors
///
/// Returns an error if the decoded table cannot be converted to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::from_str(s))
}

/// Deserialize an instance of type `T` from bytes of NSV text.
///
/// # Errors
///
/// Returns [`Error::InvalidUtf8`] if the bytes are not UTF-8, or an error if
/// the table cannot be converted to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| {
        let line = v[..e.valid_up_to()].iter().filter(|&&b| b == b'\n').count() + 1;
        Error::InvalidUtf8 { line }
    })?;
    from_str(s)
}

/// Deserialize an instance of type `T` from an I/O stream of NSV.
///
/// # Examples
///
/// ```rust
/// use nsv::from_reader;
/// use std::io::Cursor;
///
/// let rows: Vec<Vec<u32>> = from_reader(Cursor::new(b"1\n2\n\n3\n\n")).unwrap();
/// assert_eq!(rows, vec![vec![1, 2], vec![3]]);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the stream is not UTF-8, or the table
/// cannot be converted to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    from_value(Value::from(decode_reader(reader)?))
}
