pub const DEFLATE_MIN_MATCH_LEN: usize = 3;
pub const DEFLATE_MAX_MATCH_LEN: usize = 258;

pub const DEFLATE_MAX_MATCH_DIST: usize = 32768;
pub const DEFLATE_WINDOW_MASK: usize = DEFLATE_MAX_MATCH_DIST - 1;

pub const NUM_LITLEN_SYMS: usize = 288;
pub const NUM_DIST_SYMS: usize = 30;
pub const NUM_PRECODE_SYMS: usize = 19;

pub const END_OF_BLOCK: usize = 256;

pub const MAX_CODEWORD_LEN: usize = 15;
pub const MAX_PRECODE_LEN: usize = 7;

// Block accumulation limits. A block is closed once it holds more than
// MAX_BLOCK_MATCHES length/distance pairs or more than MAX_BLOCK_SYMS
// symbols, unless fewer than FINAL_TAIL_RESERVE input bytes remain and
// the stream is ending.
pub const SYM_BUFFER_CAP: usize = 25000;
pub const MAX_BLOCK_SYMS: usize = 24333;
pub const MAX_BLOCK_MATCHES: usize = 7000;
pub const FINAL_TAIL_RESERVE: usize = 423;

pub const STORED_BLOCK_MAX: usize = 65535;

// A length/distance pair is packed into one symbol word with bit 28 set;
// literals occupy the low byte only.
pub const SYM_MATCH_FLAG: u32 = 1 << 28;

pub const MIN_HASH_BITS: u32 = 12;
pub const MAX_HASH_BITS: u32 = 24;
pub const DEFAULT_STREAM_HASH_BITS: u32 = 20;

pub const ZLIB_MIN_HEADER_SIZE: usize = 2;
pub const ZLIB_FOOTER_SIZE: usize = 4;
pub const ZLIB_MIN_OVERHEAD: usize = ZLIB_MIN_HEADER_SIZE + ZLIB_FOOTER_SIZE;

pub const ZLIB_CM_DEFLATE: u8 = 8;
pub const ZLIB_CINFO_32K_WINDOW: u8 = 7;

pub const GZIP_MIN_HEADER_SIZE: usize = 10;
pub const GZIP_FOOTER_SIZE: usize = 8;
pub const GZIP_MIN_OVERHEAD: usize = GZIP_MIN_HEADER_SIZE + GZIP_FOOTER_SIZE;

pub const GZIP_ID1: u8 = 0x1F;
pub const GZIP_ID2: u8 = 0x8B;
pub const GZIP_CM_DEFLATE: u8 = 8;

pub const GZIP_FHCRC: u8 = 0x02;
pub const GZIP_FEXTRA: u8 = 0x04;
pub const GZIP_FNAME: u8 = 0x08;
pub const GZIP_FCOMMENT: u8 = 0x10;

pub const GZIP_XFL_SLOWEST_COMPRESSION: u8 = 0x02;
pub const GZIP_XFL_FASTEST_COMPRESSION: u8 = 0x04;
pub const GZIP_OS_UNIX: u8 = 3;

pub const LOCAL_FILE_HEADER_SIG: u32 = 0x0403_4B50;
pub const CENTRAL_DIR_HEADER_SIG: u32 = 0x0201_4B50;
pub const EOCD_SIG: u32 = 0x0605_4B50;
pub const ZIP64_EOCD_SIG: u32 = 0x0606_4B50;
pub const ZIP64_LOCATOR_SIG: u32 = 0x0706_4B50;

pub const LOCAL_FILE_HEADER_SIZE: usize = 30;
pub const CENTRAL_DIR_HEADER_SIZE: usize = 46;
pub const EOCD_SIZE: usize = 22;
pub const ZIP64_EOCD_SIZE: usize = 56;
pub const ZIP64_LOCATOR_SIZE: usize = 20;

// EOCD record size plus the maximum archive comment length.
pub const EOCD_SCAN_LIMIT: usize = EOCD_SIZE + 65535;

pub const ZIP64_EXTRA_ID: u16 = 0x0001;

pub const ZIP_VERSION_DEFLATE: u16 = 20;
pub const ZIP_VERSION_ZIP64: u16 = 45;

pub const ZIP_FLAG_UTF8: u16 = 1 << 11;

pub const ZIP_METHOD_STORE: u16 = 0;
pub const ZIP_METHOD_DEFLATE: u16 = 8;

pub const MAX_NAME_LEN: usize = 65535;
pub const MAX_EXTRA_LEN: usize = 65535;
