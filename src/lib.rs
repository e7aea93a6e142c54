//! In-memory ZIP archives and raw DEFLATE/zlib/gzip codecs.
//!
//! Everything operates on byte buffers: hand the writer a [`ZipTree`]
//! and get back a complete archive; hand the reader an archive and walk
//! its entries, decompressing payloads on demand. The DEFLATE engine
//! underneath is this crate's own (RFC 1951), with zlib (RFC 1950) and
//! gzip (RFC 1952) framing on top.
//!
//! ```
//! use zipflate::{zip, unzip, UnzipOptions, ZipOptions, ZipTree};
//!
//! let mut root = ZipTree::root();
//! root.insert("hello.txt", ZipTree::file(*b"hello world"));
//! let archive = zip(&root, &ZipOptions::default())?;
//!
//! let files = unzip(&archive, UnzipOptions::default())?;
//! assert_eq!(files[0].name, "hello.txt");
//! assert_eq!(files[0].data, b"hello world");
//! # Ok::<(), zipflate::ZipError>(())
//! ```

pub mod adler32;
pub mod api;
pub mod batch;
pub mod bits;
pub mod common;
pub mod compress;
pub mod crc32;
pub mod decompress;
pub mod error;
pub mod stream;
pub mod tables;
pub mod zip;

pub use adler32::{adler32, Adler32};
pub use api::{
    deflate, gunzip, gzip, inflate, unzlib, zlib, DeflateOptions, GzipOptions, InflateOptions,
};
pub use batch::{BatchCompressor, BatchDecompressor};
pub use compress::Compressor;
pub use crc32::{crc32, Crc32};
pub use decompress::Decompressor;
pub use error::{Result, ZipError};
pub use stream::DeflateEncoder;
pub use zip::{
    unzip, zip, Compression, CompressionMethod, EntryOptions, UnzipOptions, UnzippedFile,
    ZipArchive, ZipDateTime, ZipEntry, ZipOptions, ZipTree,
};
