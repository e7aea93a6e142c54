//! Error taxonomy shared by the codec and archive layers.
//!
//! Every variant carries the context of the failing item and maps to a
//! stable integer code via [`ZipError::code`], so callers can match on
//! codes across versions.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ZipError>;

/// Error type for compression, decompression, and archive operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ZipError {
    /// The bit cursor crossed the end of the input mid-symbol.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A DEFLATE block declared the reserved block type 3.
    #[error("invalid deflate block type")]
    InvalidBlockType,

    /// A literal/length code resolved to an unused table entry.
    #[error("invalid length/literal code")]
    InvalidLengthLiteral,

    /// A distance code was unused or pointed before the start of output.
    #[error("invalid distance")]
    InvalidDistance,

    /// A zlib or gzip header failed validation.
    #[error("invalid {format} header")]
    InvalidHeader {
        /// Which framing format rejected its header.
        format: &'static str,
    },

    /// A per-entry extra field payload exceeded 65 535 bytes.
    #[error("extra field {id:#06x} is {len} bytes, over the 65535 limit")]
    ExtraFieldTooLong {
        /// Extra field id.
        id: u16,
        /// Offending payload length.
        len: usize,
    },

    /// An entry mtime fell outside the DOS-representable 1980..=2099 range.
    #[error("mtime year {year} outside 1980..=2099")]
    InvalidDate {
        /// Year of the rejected timestamp.
        year: i32,
    },

    /// An encoded file name exceeded 65 535 bytes.
    #[error("file name of {len} bytes is over the 65535 limit")]
    FilenameTooLong {
        /// Offending encoded length.
        len: usize,
    },

    /// No end-of-central-directory record was found in the scan window,
    /// or the central directory is structurally broken.
    #[error("invalid zip data")]
    InvalidZipData,

    /// The reader was asked to extract an entry stored with a method
    /// other than store or deflate.
    #[error("unknown compression method {method}")]
    UnknownCompressionMethod {
        /// Raw method id from the central directory.
        method: u16,
    },

    /// Two files in the input tree flattened to the same archive path.
    #[error("duplicate path {path:?} in archive input")]
    DuplicatePath {
        /// The colliding path.
        path: String,
    },

    /// An option value was out of range.
    #[error("invalid parameter: {0}")]
    InvalidParam(&'static str),
}

impl ZipError {
    /// Stable integer code for this error kind.
    pub fn code(&self) -> u8 {
        match self {
            ZipError::UnexpectedEof => 0,
            ZipError::InvalidBlockType => 1,
            ZipError::InvalidLengthLiteral => 2,
            ZipError::InvalidDistance => 3,
            ZipError::InvalidHeader { .. } => 4,
            ZipError::ExtraFieldTooLong { .. } => 5,
            ZipError::InvalidDate { .. } => 6,
            ZipError::FilenameTooLong { .. } => 7,
            ZipError::InvalidZipData => 8,
            ZipError::UnknownCompressionMethod { .. } => 9,
            ZipError::DuplicatePath { .. } => 10,
            ZipError::InvalidParam(_) => 11,
        }
    }
}
