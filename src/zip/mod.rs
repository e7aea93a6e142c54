//! In-memory ZIP archive writing and reading (PKWARE APPNOTE layout).

pub mod read;
pub mod time;
pub mod tree;
pub mod write;

pub use read::{unzip, Entries, UnzipOptions, UnzippedFile, ZipArchive, ZipEntry};
pub use time::ZipDateTime;
pub use tree::{EntryOptions, ZipTree};
pub use write::{zip, ZipOptions};

use crate::common::*;

/// Compression method recorded in archive headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Store,
    Deflate,
    /// Any method this crate does not decode.
    Other(u16),
}

impl CompressionMethod {
    pub fn from_u16(raw: u16) -> Self {
        match raw {
            ZIP_METHOD_STORE => CompressionMethod::Store,
            ZIP_METHOD_DEFLATE => CompressionMethod::Deflate,
            m => CompressionMethod::Other(m),
        }
    }

    pub fn as_u16(self) -> u16 {
        match self {
            CompressionMethod::Store => ZIP_METHOD_STORE,
            CompressionMethod::Deflate => ZIP_METHOD_DEFLATE,
            CompressionMethod::Other(m) => m,
        }
    }
}

/// How the writer encodes an entry's payload. `Custom` registers an
/// out-of-tree method: the raw id that lands in the headers and the
/// function producing the payload from `(data, level)`.
#[derive(Debug, Clone, Copy)]
pub enum Compression {
    Store,
    Deflate,
    Custom {
        method: u16,
        compress: fn(&[u8], u8) -> Vec<u8>,
    },
}
