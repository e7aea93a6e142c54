//! Build a small archive from a nested tree, then list it back.
//!
//! Run with: cargo run --example zip_tree

use zipflate::{unzip, zip, EntryOptions, UnzipOptions, ZipDateTime, ZipOptions, ZipTree};

fn main() -> zipflate::Result<()> {
    let mut docs = ZipTree::root();
    docs.insert("readme.txt", ZipTree::file(*b"hello from zipflate\n"));
    docs.insert(
        "notes/today.md",
        ZipTree::file(*b"- write demo\n- ship it\n").with_options(EntryOptions {
            mtime: Some(ZipDateTime::new(2024, 5, 17, 9, 30, 0)),
            comment: Some("daily notes".into()),
            ..Default::default()
        }),
    );
    let mut root = ZipTree::root();
    root.insert("docs", docs);

    let archive = zip(
        &root,
        &ZipOptions {
            comment: Some("zipflate demo archive".into()),
            ..Default::default()
        },
    )?;
    println!("archive: {} bytes", archive.len());

    for file in unzip(&archive, UnzipOptions::default())? {
        println!(
            "{:30} {:>6} -> {:>6} bytes  crc32 {:08x}",
            file.name, file.compressed_size, file.uncompressed_size, file.crc32
        );
    }
    Ok(())
}
