//! One-shot convenience functions and their option structs.

use crate::compress::Compressor;
use crate::decompress::Decompressor;
use crate::error::{Result, ZipError};

/// Options for [`deflate`] and [`zlib`].
#[derive(Debug, Clone, Copy)]
pub struct DeflateOptions<'a> {
    /// Compression level, 0 (store) to 9 (best). Defaults to 6.
    pub level: u8,
    /// Memory level 0..=12 sizing the hash table; picked from the
    /// input length when unset.
    pub mem: Option<u8>,
    /// Preset dictionary; only its last 32 KiB are used.
    pub dictionary: Option<&'a [u8]>,
}

impl Default for DeflateOptions<'_> {
    fn default() -> Self {
        Self {
            level: 6,
            mem: None,
            dictionary: None,
        }
    }
}

impl<'a> DeflateOptions<'a> {
    pub fn level(level: u8) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }
}

/// Options for [`inflate`], [`unzlib`], and [`gunzip`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InflateOptions<'a> {
    /// Expected output size; the buffer still grows if exceeded.
    pub size_hint: Option<usize>,
    /// Preset dictionary matching the one used for encoding.
    pub dictionary: Option<&'a [u8]>,
}

/// Options for [`gzip`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GzipOptions<'a> {
    pub deflate: DeflateOptions<'a>,
    /// Modification time in unix seconds; 0 leaves the field unset.
    pub mtime: u32,
    /// Original file name, stored NUL-terminated in the member header.
    pub filename: Option<&'a str>,
}

fn compressor(opts: &DeflateOptions) -> Result<Compressor> {
    let mut c = Compressor::new(opts.level)?;
    if let Some(m) = opts.mem {
        c = c.with_mem(m)?;
    }
    if let Some(d) = opts.dictionary {
        c = c.with_dictionary(d);
    }
    Ok(c)
}

fn decompressor(opts: &InflateOptions) -> Decompressor {
    match opts.dictionary {
        Some(d) => Decompressor::new().with_dictionary(d),
        None => Decompressor::new(),
    }
}

/// Compress to a raw DEFLATE stream (RFC 1951).
pub fn deflate(data: &[u8], opts: &DeflateOptions) -> Result<Vec<u8>> {
    Ok(compressor(opts)?.compress(data))
}

/// Decompress a raw DEFLATE stream.
pub fn inflate(data: &[u8], opts: &InflateOptions) -> Result<Vec<u8>> {
    decompressor(opts).decompress(data, opts.size_hint)
}

/// Compress to a zlib stream (RFC 1950).
pub fn zlib(data: &[u8], opts: &DeflateOptions) -> Result<Vec<u8>> {
    Ok(compressor(opts)?.compress_zlib(data))
}

/// Decompress a zlib stream, validating its header.
pub fn unzlib(data: &[u8], opts: &InflateOptions) -> Result<Vec<u8>> {
    decompressor(opts).decompress_zlib(data, opts.size_hint)
}

/// Compress to a gzip member (RFC 1952).
pub fn gzip(data: &[u8], opts: &GzipOptions) -> Result<Vec<u8>> {
    if opts.deflate.dictionary.is_some() {
        return Err(ZipError::InvalidParam("gzip takes no preset dictionary"));
    }
    let c = compressor(&opts.deflate)?;
    Ok(c.compress_gzip(data, opts.mtime, opts.filename.map(str::as_bytes)))
}

/// Decompress a gzip member, sizing the output from its trailer.
pub fn gunzip(data: &[u8], _opts: &InflateOptions) -> Result<Vec<u8>> {
    Decompressor::new().decompress_gzip(data)
}
