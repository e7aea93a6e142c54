//! Frame the same payload as raw DEFLATE, zlib, and gzip.
//!
//! Run with: cargo run --example gzip_zlib

use zipflate::{deflate, gunzip, gzip, unzlib, zlib, DeflateOptions, GzipOptions, InflateOptions};

fn main() -> zipflate::Result<()> {
    let data = b"framing comparison payload ".repeat(100);

    let raw = deflate(&data, &DeflateOptions::default())?;
    let zl = zlib(&data, &DeflateOptions::default())?;
    let gz = gzip(
        &data,
        &GzipOptions {
            mtime: 1_715_000_000,
            filename: Some("payload.txt"),
            ..Default::default()
        },
    )?;

    println!("deflate: {} bytes", raw.len());
    println!("zlib:    {} bytes (+{} framing)", zl.len(), zl.len() - raw.len());
    println!("gzip:    {} bytes (+{} framing)", gz.len(), gz.len() - raw.len());

    assert_eq!(unzlib(&zl, &InflateOptions::default())?, data);
    assert_eq!(gunzip(&gz, &InflateOptions::default())?, data);
    println!("both framed streams round-trip");
    Ok(())
}
