//! Compress and decompress a buffer at a few levels.
//!
//! Run with: cargo run --example compression_basics

use zipflate::{deflate, inflate, DeflateOptions, InflateOptions};

fn main() -> zipflate::Result<()> {
    let data = include_bytes!("compression_basics.rs").repeat(20);
    println!("input: {} bytes", data.len());

    for level in [0u8, 1, 6, 9] {
        let compressed = deflate(&data, &DeflateOptions::level(level))?;
        let back = inflate(
            &compressed,
            &InflateOptions {
                size_hint: Some(data.len()),
                ..Default::default()
            },
        )?;
        assert_eq!(back, data);
        println!(
            "level {}: {} bytes ({:.1}%)",
            level,
            compressed.len(),
            100.0 * compressed.len() as f64 / data.len() as f64
        );
    }
    Ok(())
}
