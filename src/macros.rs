/// Builds a [`Value`](crate::Value) from nested brackets.
///
/// Brackets become [`Value::Seq`](crate::Value::Seq); anything else is passed
/// to `Value::from` and becomes a cell.
///
/// ```rust
/// use nsv::{nsv, Value};
///
/// let value = nsv!([["a", "b"], [], [""]]);
/// assert_eq!(value.depth(), 2);
/// assert_eq!(nsv!("x"), Value::Cell("x".to_string()));
/// ```
#[macro_export]
macro_rules! nsv {
    // Empty sequence
    ([]) => {
        $crate::Value::Seq(::std::vec::Vec::new())
    };

    // Non-empty sequence
    ([ $($elem:tt),+ $(,)? ]) => {
        $crate::Value::Seq(::std::vec![$($crate::nsv!($elem)),+])
    };

    // Anything convertible into a cell
    ($cell:expr) => {
        $crate::Value::from($cell)
    };
}

#[cfg(test)]
mod tests {
    use crate::Value;

    #[test]
    fn test_nsv_macro_cells() {
        assert_eq!(nsv!("hello"), Value::Cell("hello".to_string()));
        assert_eq!(nsv!(String::from("x")), Value::Cell("x".to_string()));
        assert_eq!(nsv!(""), Value::Cell(String::new()));
    }

    #[test]
    fn test_nsv_macro_sequences() {
        assert_eq!(nsv!([]), Value::Seq(vec![]));

        let row = nsv!(["a", "b", "c",]);
        match row {
            Value::Seq(items) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[0], Value::Cell("a".to_string()));
                assert_eq!(items[2], Value::Cell("c".to_string()));
            }
            _ => panic!("Expected sequence"),
        }
    }

    #[test]
    fn test_nsv_macro_nesting() {
        let cube = nsv!([[["a"], []], [["b", "c"]]]);
        assert_eq!(cube.depth(), 3);
        assert_eq!(
            cube,
            Value::Seq(vec![
                Value::Seq(vec![
                    Value::Seq(vec![Value::from("a")]),
                    Value::Seq(vec![]),
                ]),
                Value::Seq(vec![Value::Seq(vec![Value::from("b"), Value::from("c")])]),
            ])
        );
    }
}
