//! Building nested values with the `nsv!` macro and mapping them to tables.
//!
//! Run with: cargo run --example nested_values

use nsv::{decode, encode, from_str, nsv, to_string, Value};
use serde::{Deserialize, Serialize};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
enum Shape {
    Point,
    Circle(f64),
    Polygon { corners: Vec<(i32, i32)> },
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Layer {
    name: String,
    hidden: Option<bool>,
    shapes: Vec<Shape>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Two 2x2 matrices
    let cube = nsv!([[["a", "b"], ["c", "d"]], [["e", "f"], ["g", "h"]]]);
    println!("depth {}: {:?}", cube.depth(), cube);

    let text = encode(cube.to_table()?);
    println!("as NSV: {:?}", text);

    let back = Value::from_table(decode(&text), 3)?;
    assert_eq!(back, cube);
    println!("✓ Value round-trip successful\n");

    // Serde picks the depth from the target type
    let layers = vec![
        Layer {
            name: "background".to_string(),
            hidden: None,
            shapes: vec![Shape::Point, Shape::Circle(1.5)],
        },
        Layer {
            name: "outline".to_string(),
            hidden: Some(true),
            shapes: vec![Shape::Polygon {
                corners: vec![(0, 0), (4, 0), (2, 3)],
            }],
        },
    ];

    let nsv = to_string(&layers)?;
    println!("layers as NSV:\n{}", nsv);

    let layers_back: Vec<Layer> = from_str(&nsv)?;
    assert_eq!(layers_back, layers);
    println!("✓ Serde round-trip successful");

    Ok(())
}
