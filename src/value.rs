//! Nested values of arbitrary depth.
//!
//! A table is two levels deep: rows of cells. [`Value`] generalizes this to
//! any depth and maps it onto a plain table by applying [`lift`] recursively:
//!
//! 1. every sequence below row level is folded into one cell, innermost first
//! 2. the top two levels stay as the table's rows and cells
//!
//! Unfolding runs the same steps in mirror order with [`unlift`]. Because a
//! cell does not record how many times it was lifted, the caller supplies the
//! depth (or, through serde, the target type does).
//!
//! ## Examples
//!
//! ```rust
//! use nsv::{nsv, Value};
//!
//! // Two 2x2 matrices: a 3-D value
//! let cube = nsv!([[["a", "b"], ["c", "d"]], [["e", "f"], ["g", "h"]]]);
//! assert_eq!(cube.depth(), 3);
//!
//! let table = cube.to_table().unwrap();
//! assert_eq!(table.len(), 2);
//! assert_eq!(table[0], vec!["a\nb\n\n", "c\nd\n\n"]);
//!
//! assert_eq!(Value::from_table(table, 3).unwrap(), cube);
//! ```

use crate::lift::{lift, unlift};
use crate::{Error, Result, Row, Table};
use std::fmt;

/// A cell, or a sequence of nested values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Cell(String),
    Seq(Vec<Value>),
}

impl Default for Value {
    fn default() -> Self {
        Value::Seq(Vec::new())
    }
}

impl Value {
    /// Returns `true` if this is a single cell.
    #[inline]
    #[must_use]
    pub const fn is_cell(&self) -> bool {
        matches!(self, Value::Cell(_))
    }

    /// Returns `true` if this is a sequence.
    #[inline]
    #[must_use]
    pub const fn is_seq(&self) -> bool {
        matches!(self, Value::Seq(_))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Cell(s) => Some(s.as_str()),
            Value::Seq(_) => None,
        }
    }

    #[must_use]
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items.as_slice()),
            Value::Cell(_) => None,
        }
    }

    /// Nesting depth: 0 for a cell, one more than the deepest child for a
    /// sequence. An empty sequence has depth 1.
    ///
    /// ```rust
    /// use nsv::nsv;
    ///
    /// assert_eq!(nsv!("x").depth(), 0);
    /// assert_eq!(nsv!([]).depth(), 1);
    /// assert_eq!(nsv!([["a"], []]).depth(), 2);
    /// ```
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Value::Cell(_) => 0,
            Value::Seq(items) => 1 + items.iter().map(Value::depth).max().unwrap_or(0),
        }
    }

    /// Collapses the whole value into a single cell.
    ///
    /// A cell folds to itself; a sequence folds to the [`lift`] of its folded
    /// children.
    ///
    /// ```rust
    /// use nsv::nsv;
    ///
    /// assert_eq!(nsv!(["a", "b", "c"]).fold(), "a\nb\nc\n\n");
    /// assert_eq!(nsv!([["a"], ["b"]]).fold(), "a\\n\\n\nb\\n\\n\n\n");
    /// ```
    #[must_use]
    pub fn fold(&self) -> String {
        match self {
            Value::Cell(s) => s.clone(),
            Value::Seq(items) => lift(items.iter().map(Value::fold)),
        }
    }

    /// Rebuilds a value of uniform `depth` from a folded cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] if some level does not unlift to one row.
    pub fn unfold(cell: &str, depth: usize) -> Result<Value> {
        if depth == 0 {
            return Ok(Value::Cell(cell.to_string()));
        }
        unlift(cell)?
            .iter()
            .map(|child| Value::unfold(child, depth - 1))
            .collect::<Result<Vec<_>>>()
            .map(Value::Seq)
    }

    /// Lays the value out as a table.
    ///
    /// The value must be a sequence of sequences; everything below that is
    /// folded into cells.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedShape`] if the value or one of its rows is
    /// a bare cell.
    pub fn to_table(&self) -> Result<Table> {
        let rows = self
            .as_seq()
            .ok_or_else(|| Error::unsupported_shape("a table must be a sequence of rows"))?;
        rows.iter()
            .enumerate()
            .map(|(i, row)| match row {
                Value::Seq(cells) => Ok(cells.iter().map(Value::fold).collect::<Row>()),
                Value::Cell(_) => Err(Error::unsupported_shape(&format!(
                    "row {} is a cell, not a sequence",
                    i
                ))),
            })
            .collect()
    }

    /// Rebuilds a value of uniform `depth` from a decoded table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedShape`] if `depth < 2`, or [`Error::Shape`]
    /// if a cell does not unfold to the requested depth.
    pub fn from_table(table: Table, depth: usize) -> Result<Value> {
        if depth < 2 {
            return Err(Error::unsupported_shape(
                "a table has at least two levels: rows and cells",
            ));
        }
        table
            .into_iter()
            .map(|row| {
                row.iter()
                    .map(|cell| Value::unfold(cell, depth - 2))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Seq)
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::Seq)
    }
}

impl From<Table> for Value {
    /// A plain table: rows of cells, depth 2.
    fn from(table: Table) -> Self {
        Value::Seq(
            table
                .into_iter()
                .map(|row| Value::Seq(row.into_iter().map(Value::Cell).collect()))
                .collect(),
        )
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Cell(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Cell(s.to_string())
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Seq(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Value {
    /// Shows the folded form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fold())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(items: &[&str]) -> Value {
        items.iter().copied().collect()
    }

    #[test]
    fn test_fold_unfold_two_levels() {
        let matrix = Value::Seq(vec![
            cells(&["a", "b", "c"]),
            cells(&["d", "e", "f"]),
            cells(&["", "g", ""]),
        ]);
        let folded = matrix.fold();
        assert_eq!(Value::unfold(&folded, 2).unwrap(), matrix);
    }

    #[test]
    fn test_table_roundtrip() {
        let table: Table = vec![vec!["a".into(), "".into()], vec![]];
        let value = Value::from(table.clone());
        assert_eq!(value.to_table().unwrap(), table);
        assert_eq!(Value::from_table(table, 2).unwrap(), value);
    }

    #[test]
    fn test_four_dimensions() {
        let block = Value::Seq(vec![
            Value::Seq(vec![cells(&["1", "2"]), cells(&[])]),
            Value::Seq(vec![cells(&["\\", "\n"])]),
        ]);
        let single = Value::Seq(vec![Value::Seq(vec![cells(&["x"])])]);
        let hyper = Value::Seq(vec![block, single]);
        assert_eq!(hyper.depth(), 4);

        let table = hyper.to_table().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].len(), 2);
        assert_eq!(table[1].len(), 1);
        assert_eq!(Value::from_table(table, 4).unwrap(), hyper);
    }

    #[test]
    fn test_to_table_rejects_cells() {
        assert!(matches!(
            Value::from("x").to_table(),
            Err(Error::UnsupportedShape(_))
        ));
        assert!(matches!(
            Value::Seq(vec![Value::from("x")]).to_table(),
            Err(Error::UnsupportedShape(_))
        ));
    }

    #[test]
    fn test_from_table_needs_two_levels() {
        assert!(Value::from_table(Vec::new(), 1).is_err());
    }

    #[test]
    fn test_unfold_too_deep_is_shape_error() {
        // "a\n\nb\n\n" is two rows, not a lifted sequence
        assert_eq!(
            Value::unfold("a\n\nb\n\n", 1),
            Err(Error::Shape { rows: 2 })
        );
    }

    #[test]
    fn test_empty_sequence_survives_nesting() {
        let value = Value::Seq(vec![Value::Seq(vec![Value::Seq(vec![])])]);
        let folded = value.fold();
        assert_eq!(Value::unfold(&folded, 3).unwrap(), value);
    }
}
