//! Writing and reading NSV one row at a time.
//!
//! Run with: cargo run --example streaming

use nsv::{Reader, RowDecoder, Writer};
use std::error::Error;
use std::fs::{self, File};
use std::io::BufReader;

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::temp_dir().join("nsv-streaming-demo.nsv");

    // Each row hits the file as soon as it is written
    {
        let mut writer = Writer::new(File::create(&path)?);
        writer.write_row(["timestamp", "level", "message"])?;
        for i in 0..5 {
            let message = format!("event {}\nwith detail", i);
            writer.write_row([i.to_string().as_str(), "info", message.as_str()])?;
        }
        writer.flush()?;
    }
    println!("Wrote {}", path.display());

    // Rows come back lazily, holding only one row in memory
    let reader = Reader::new(BufReader::new(File::open(&path)?));
    for (i, row) in reader.enumerate() {
        println!("row {}: {:?}", i, row?);
    }

    // Push-based decoding for data that arrives in arbitrary chunks
    let mut decoder = RowDecoder::new();
    for chunk in ["na", "me\nva", "lue\\", "n2\n", "\n"] {
        decoder.feed(chunk, |row| println!("decoded {:?}", row));
    }
    if let Some(row) = decoder.finish() {
        println!("trailing {:?}", row);
    }

    fs::remove_file(&path)?;
    Ok(())
}
