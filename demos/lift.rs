//! Lift and unlift: turning rows into cells to nest tables.
//!
//! Run with: cargo run --example lift

use nsv::{decode, encode, lift, unlift};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let original = vec![vec!["a", "b", "c"], vec!["d", "e", "f"], vec!["", "g", ""]];

    println!("Step 0: 2-D table");
    println!("{:?}\n", encode(&original));

    // First lift: every row becomes one cell
    let rows_as_cells: Vec<String> = original.iter().map(lift).collect();
    println!("Step 1: one row of lifted cells");
    for (i, cell) in rows_as_cells.iter().enumerate() {
        println!("  cell {}: {:?}", i, cell);
    }
    println!("{:?}\n", encode([&rows_as_cells]));

    // Second lift: the whole table is a single cell
    let whole = lift(&rows_as_cells);
    println!("Step 2: a single cell");
    println!("{:?}\n", encode([[&whole]]));

    // Unlift twice to get back where we started
    let back: Vec<Vec<String>> = unlift(&whole)?
        .iter()
        .map(|cell| unlift(cell))
        .collect::<Result<_, _>>()?;
    assert_eq!(back, original);
    println!("✓ Unlifted back to the original table");

    // 3-D: two 2x2 matrices stored as a 2-D table of lifted rows
    let cube = vec![
        vec![vec!["1", "2"], vec!["3", "4"]],
        vec![vec!["5", "6"], vec!["7", "8"]],
    ];
    let table: Vec<Vec<String>> = cube
        .iter()
        .map(|matrix| matrix.iter().map(lift).collect())
        .collect();
    let text = encode(&table);
    println!("\n3-D data as NSV: {:?}", text);

    let cube_back: Vec<Vec<Vec<String>>> = decode(&text)
        .iter()
        .map(|row| row.iter().map(|cell| unlift(cell)).collect::<Result<Vec<_>, _>>())
        .collect::<Result<_, _>>()?;
    assert_eq!(cube_back, cube);
    println!("✓ 3-D round-trip successful");

    Ok(())
}
