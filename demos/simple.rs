//! Basic NSV serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use nsv::{decode, encode, from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
    bio: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Plain tables of strings
    let table = vec![vec!["a", "b"], vec!["", "multi\nline"], vec![]];
    let text = encode(&table);
    println!("Table as NSV: {:?}", text);
    assert_eq!(decode(&text), table);

    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            bio: "Likes C:\\ paths\nand blank lines".to_string(),
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            bio: String::new(),
        },
    ];

    // Serialize to NSV, one row per user
    let nsv = to_string(&users)?;
    println!("NSV output:\n{}", nsv);

    // Deserialize back to struct
    let users_back: Vec<User> = from_str(&nsv)?;
    assert_eq!(users, users_back);
    println!("✓ Round-trip successful");

    Ok(())
}
