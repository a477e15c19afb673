use nsv::{encode, nsv, Value};

#[test]
fn test_nsv_macro_cells() {
    assert_eq!(nsv!("hello world"), Value::Cell("hello world".to_string()));
    assert_eq!(nsv!(""), Value::Cell(String::new()));

    let owned = String::from("owned");
    assert_eq!(nsv!(owned), Value::Cell("owned".to_string()));
}

#[test]
fn test_nsv_macro_expressions() {
    let n = 7;
    assert_eq!(nsv!(n.to_string()), Value::from("7"));
    assert_eq!(nsv!(format!("{}-{}", "a", "b")), Value::from("a-b"));
}

#[test]
fn test_nsv_macro_rows() {
    assert_eq!(nsv!([]), Value::Seq(vec![]));
    assert_eq!(
        nsv!(["a", "", "c"]),
        Value::Seq(vec![Value::from("a"), Value::from(""), Value::from("c")])
    );
}

#[test]
fn test_nsv_macro_trailing_comma() {
    assert_eq!(nsv!([["a", "b",], ["c"],]), nsv!([["a", "b"], ["c"]]));
}

#[test]
fn test_nsv_macro_table() {
    let table = nsv!([["id", "name"], ["1", "Alice"], []]);
    assert_eq!(table.depth(), 2);
    assert_eq!(
        encode(table.to_table().unwrap()),
        "id\nname\n\n1\nAlice\n\n\n"
    );
}

#[test]
fn test_nsv_macro_mixed_depths() {
    let value = nsv!(["cell", ["nested", ["deeper"]], []]);
    assert_eq!(value.depth(), 3);
    assert!(value.as_seq().unwrap()[0].is_cell());
    assert!(value.as_seq().unwrap()[1].is_seq());
}
