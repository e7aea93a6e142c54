//! Resumable DEFLATE encoding.
//!
//! [`DeflateEncoder`] owns the hash chains and the partial output byte
//! between calls, so input can be handed over in pieces while the
//! result remains one valid DEFLATE stream. Block boundaries fall at
//! feed boundaries; back-references reach across them through the
//! retained window.

use crate::api::DeflateOptions;
use crate::bits::bits_to_bytes;
use crate::common::*;
use crate::compress::matchfinder::MatchFinder;
use crate::compress::{deflate_chunk, stored_chunk, Compressor, EncoderState};
use crate::error::{Result, ZipError};

/// Incremental DEFLATE encoder.
///
/// ```
/// use zipflate::{DeflateOptions, DeflateEncoder, Decompressor};
///
/// let mut enc = DeflateEncoder::new(&DeflateOptions::default())?;
/// let mut compressed = enc.feed(b"hello ", false)?;
/// compressed.extend(enc.feed(b"world", false)?);
/// compressed.extend(enc.finish()?);
/// let back = Decompressor::new().decompress(&compressed, None)?;
/// assert_eq!(back, b"hello world");
/// # Ok::<(), zipflate::ZipError>(())
/// ```
pub struct DeflateEncoder {
    level: u8,
    buf: Vec<u8>,
    dict_len: usize,
    mf: Option<MatchFinder>,
    st: EncoderState,
    residual_bits: u32,
    residual_byte: u8,
    finished: bool,
}

impl DeflateEncoder {
    pub fn new(opts: &DeflateOptions) -> Result<Self> {
        if opts.level > 9 {
            return Err(ZipError::InvalidParam("compression level must be 0..=9"));
        }
        let hash_bits = match opts.mem {
            Some(m) if m > 12 => {
                return Err(ZipError::InvalidParam("memory level must be 0..=12"))
            }
            Some(m) => MIN_HASH_BITS + m as u32,
            None => DEFAULT_STREAM_HASH_BITS,
        };
        let mut buf = Vec::new();
        let mut mf = if opts.level > 0 {
            Some(MatchFinder::new(opts.level, hash_bits))
        } else {
            None
        };
        let mut st = EncoderState::default();
        if let (Some(dict), Some(mf)) = (opts.dictionary, mf.as_mut()) {
            let tail = &dict[dict.len().saturating_sub(DEFLATE_MAX_MATCH_DIST)..];
            buf.extend_from_slice(tail);
            for j in 0..buf.len().saturating_sub(2) {
                mf.insert(&buf, j);
            }
            st.i = buf.len();
            st.wait = buf.len();
        }
        Ok(Self {
            level: opts.level,
            dict_len: buf.len(),
            buf,
            mf,
            st,
            residual_bits: 0,
            residual_byte: 0,
            finished: false,
        })
    }

    /// Compress `chunk`, returning the whole bytes produced so far.
    /// Bits belonging to a partially filled byte are retained and
    /// prepended to the next call's output. Passing `last` seals the
    /// stream; no further calls are accepted after that.
    pub fn feed(&mut self, chunk: &[u8], last: bool) -> Result<Vec<u8>> {
        if self.finished {
            return Err(ZipError::InvalidParam("encoder already finished"));
        }
        self.buf.extend_from_slice(chunk);
        let mut out = vec![0u8; Compressor::deflate_bound(chunk.len()) + 1];
        out[0] = self.residual_byte;
        let pos = self.residual_bits as usize;
        let pos = match self.mf.as_mut() {
            Some(mf) => deflate_chunk(&self.buf, mf, &mut self.st, last, &mut out, pos),
            None => stored_chunk(&self.buf, &mut self.st, last, &mut out, pos),
        };
        if last {
            self.finished = true;
            self.residual_bits = 0;
            self.residual_byte = 0;
            out.truncate(bits_to_bytes(pos));
        } else {
            let whole = pos >> 3;
            self.residual_bits = (pos & 7) as u32;
            self.residual_byte = if self.residual_bits > 0 { out[whole] } else { 0 };
            out.truncate(whole);
        }
        Ok(out)
    }

    /// Seal the stream, emitting the final block and any buffered bits.
    pub fn finish(&mut self) -> Result<Vec<u8>> {
        self.feed(&[], true)
    }

    /// Total input bytes accepted so far (dictionary excluded).
    pub fn total_in(&self) -> usize {
        self.buf.len() - self.dict_len
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}
