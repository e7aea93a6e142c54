//! DEFLATE encoder: greedy LZ77 tokenization into a bounded symbol
//! buffer, then per-block selection of the cheapest of stored, fixed
//! Huffman, and dynamic Huffman encodings by exact bit cost.

pub(crate) mod huffman;
pub(crate) mod matchfinder;

use self::huffman::{
    assign_lengths, cl_extra, cl_extra_bits, cl_sym, codes_from_lens, rle_code_lengths,
};
use self::matchfinder::{auto_hash_bits, MatchFinder};
use crate::adler32::adler32;
use crate::bits::{bits_to_bytes, write_bits, write_bits_wide, write_bytes_le};
use crate::common::*;
use crate::crc32::crc32;
use crate::error::{Result, ZipError};
use crate::tables::*;
use std::sync::OnceLock;

struct FixedCodes {
    litlen: [u16; NUM_LITLEN_SYMS],
    dist: [u16; NUM_DIST_SYMS],
}

fn fixed_codes() -> &'static FixedCodes {
    static CODES: OnceLock<FixedCodes> = OnceLock::new();
    CODES.get_or_init(|| {
        let mut litlen = [0u16; NUM_LITLEN_SYMS];
        codes_from_lens(&FIXED_LITLEN_LENS, 9, &mut litlen);
        let mut dist = [0u16; NUM_DIST_SYMS];
        codes_from_lens(&FIXED_DIST_LENS, 5, &mut dist);
        FixedCodes { litlen, dist }
    })
}

/// Position bookkeeping carried between resumable encoder calls.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct EncoderState {
    /// Next byte the tokenizer will visit.
    pub i: usize,
    /// First byte not yet covered by an emitted symbol.
    pub wait: usize,
}

/// In-memory DEFLATE compressor.
///
/// One [`compress`](Compressor::compress) call owns all of its working
/// state; a `Compressor` value only carries the configuration, so it is
/// cheap to clone and reuse.
#[derive(Debug, Clone)]
pub struct Compressor {
    level: u8,
    mem: Option<u8>,
    dictionary: Option<Vec<u8>>,
}

impl Compressor {
    /// `level` 0 stores, 1 is fastest, 9 compresses hardest.
    pub fn new(level: u8) -> Result<Self> {
        if level > 9 {
            return Err(ZipError::InvalidParam("compression level must be 0..=9"));
        }
        Ok(Self {
            level,
            mem: None,
            dictionary: None,
        })
    }

    /// Fix the hash-table memory level (0..=12) instead of sizing it
    /// from the input length.
    pub fn with_mem(mut self, mem: u8) -> Result<Self> {
        if mem > 12 {
            return Err(ZipError::InvalidParam("memory level must be 0..=12"));
        }
        self.mem = Some(mem);
        Ok(self)
    }

    /// Use the last 32 KiB of `dict` as preset history for
    /// back-references. The dictionary bytes are not part of the output.
    pub fn with_dictionary(mut self, dict: &[u8]) -> Self {
        let tail = &dict[dict.len().saturating_sub(DEFLATE_MAX_MATCH_DIST)..];
        self.dictionary = Some(tail.to_vec());
        self
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub(crate) fn hash_bits(&self, len: usize) -> u32 {
        match self.mem {
            Some(m) => MIN_HASH_BITS + m as u32,
            None => auto_hash_bits(len),
        }
    }

    /// Worst-case raw DEFLATE output size for `len` input bytes.
    pub fn deflate_bound(len: usize) -> usize {
        len.saturating_add(5 * (len / 7000 + 1) + 16)
    }

    pub fn zlib_bound(len: usize) -> usize {
        Self::deflate_bound(len).saturating_add(ZLIB_MIN_OVERHEAD + 4)
    }

    pub fn gzip_bound(len: usize) -> usize {
        Self::deflate_bound(len).saturating_add(GZIP_MIN_OVERHEAD)
    }

    /// Raw DEFLATE stream (RFC 1951).
    pub fn compress(&self, input: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; Self::deflate_bound(input.len())];
        let pos = self.compress_into(input, &mut out, 0);
        out.truncate(bits_to_bytes(pos));
        out
    }

    fn compress_into(&self, input: &[u8], out: &mut [u8], pos: usize) -> usize {
        let mut st = EncoderState::default();
        if self.level == 0 {
            return stored_chunk(input, &mut st, true, out, pos);
        }
        match self.dictionary.as_deref().filter(|d| !d.is_empty()) {
            Some(dict) => {
                let mut data = Vec::with_capacity(dict.len() + input.len());
                data.extend_from_slice(dict);
                data.extend_from_slice(input);
                let mut mf = MatchFinder::new(self.level, self.hash_bits(input.len()));
                for j in 0..dict.len() {
                    if j + 2 < data.len() {
                        mf.insert(&data, j);
                    }
                }
                st.i = dict.len();
                st.wait = dict.len();
                deflate_chunk(&data, &mut mf, &mut st, true, out, pos)
            }
            None => {
                let mut mf = MatchFinder::new(self.level, self.hash_bits(input.len()));
                deflate_chunk(input, &mut mf, &mut st, true, out, pos)
            }
        }
    }

    /// zlib stream (RFC 1950): 2-byte header, optional dictionary id,
    /// DEFLATE payload, big-endian Adler-32 trailer.
    pub fn compress_zlib(&self, input: &[u8]) -> Vec<u8> {
        let dict = self.dictionary.as_deref().filter(|d| !d.is_empty());
        let hdr = if dict.is_some() {
            ZLIB_MIN_HEADER_SIZE + 4
        } else {
            ZLIB_MIN_HEADER_SIZE
        };
        let mut out = vec![0u8; hdr + Self::deflate_bound(input.len()) + ZLIB_FOOTER_SIZE];
        out[0] = (ZLIB_CINFO_32K_WINDOW << 4) | ZLIB_CM_DEFLATE;
        let flevel: u8 = match self.level {
            0 => 0,
            1..=5 => 1,
            9 => 3,
            _ => 2,
        };
        let mut b1 = (flevel << 6) | if dict.is_some() { 0x20 } else { 0 };
        b1 |= (31 - (((out[0] as u32) << 8 | b1 as u32) % 31)) as u8;
        out[1] = b1;
        if let Some(d) = dict {
            out[2..6].copy_from_slice(&adler32(d).to_be_bytes());
        }
        let pos = self.compress_into(input, &mut out, hdr * 8);
        let end = bits_to_bytes(pos);
        out[end..end + 4].copy_from_slice(&adler32(input).to_be_bytes());
        out.truncate(end + 4);
        out
    }

    /// gzip member (RFC 1952). `mtime` is unix seconds (0 leaves the
    /// field unset); `filename` is stored NUL-terminated when present.
    pub fn compress_gzip(&self, input: &[u8], mtime: u32, filename: Option<&[u8]>) -> Vec<u8> {
        let fname_len = filename.map(|f| f.len() + 1).unwrap_or(0);
        let hdr = GZIP_MIN_HEADER_SIZE + fname_len;
        let mut out = vec![0u8; hdr + Self::deflate_bound(input.len()) + GZIP_FOOTER_SIZE];
        out[0] = GZIP_ID1;
        out[1] = GZIP_ID2;
        out[2] = GZIP_CM_DEFLATE;
        if filename.is_some() {
            out[3] = GZIP_FNAME;
        }
        write_bytes_le(&mut out, 4, mtime as u64);
        out[8] = if self.level < 2 {
            GZIP_XFL_FASTEST_COMPRESSION
        } else if self.level == 9 {
            GZIP_XFL_SLOWEST_COMPRESSION
        } else {
            0
        };
        out[9] = GZIP_OS_UNIX;
        if let Some(f) = filename {
            out[10..10 + f.len()].copy_from_slice(f);
        }
        let pos = self.compress_into(input, &mut out, hdr * 8);
        let end = bits_to_bytes(pos);
        out[end..end + 4].copy_from_slice(&crc32(input).to_le_bytes());
        out[end + 4..end + 8].copy_from_slice(&(input.len() as u32).to_le_bytes());
        out.truncate(end + 8);
        out
    }
}

/// Tokenize and emit `data[st.i..]`, appending blocks at bit `pos`.
/// Bytes before `st.wait` are window context only. The output buffer
/// must be zero-filled and sized by [`Compressor::deflate_bound`] over
/// the new bytes.
pub(crate) fn deflate_chunk(
    data: &[u8],
    mf: &mut MatchFinder,
    st: &mut EncoderState,
    last: bool,
    out: &mut [u8],
    mut pos: usize,
) -> usize {
    let s = data.len();
    let mut syms: Vec<u32> = Vec::with_capacity(SYM_BUFFER_CAP);
    let mut lf = [0u32; NUM_LITLEN_SYMS];
    let mut df = [0u32; NUM_DIST_SYMS];
    let mut eb: usize = 0;
    let mut matches: usize = 0;
    let mut wi = st.wait;
    let mut bs = st.i.max(wi);
    let mut i = st.i;

    while i + 2 < s {
        let (hv, imod, pimod) = mf.insert(data, i);
        if wi <= i {
            let rem = s - i;
            if (matches > MAX_BLOCK_MATCHES || syms.len() > MAX_BLOCK_SYMS)
                && (rem > FINAL_TAIL_RESERVE || !last)
            {
                pos = write_block(data, out, false, &syms, &mut lf, &mut df, eb, bs, i - bs, pos);
                syms.clear();
                lf.fill(0);
                df.fill(0);
                eb = 0;
                matches = 0;
                bs = i;
            }
            let (len, dist) = mf.best_match(data, i, hv, imod, pimod, rem);
            if dist != 0 {
                let sym = pack_match(len, dist);
                syms.push(sym);
                let lslot = ((sym >> 18) & 31) as usize;
                let dslot = (sym & 31) as usize;
                eb += LENGTH_EXTRA[lslot] as usize + DIST_EXTRA[dslot] as usize;
                lf[257 + lslot] += 1;
                df[dslot] += 1;
                wi = i + len;
                matches += 1;
            } else {
                syms.push(data[i] as u32);
                lf[data[i] as usize] += 1;
            }
        }
        i += 1;
    }
    i = i.max(wi);
    while i < s {
        syms.push(data[i] as u32);
        lf[data[i] as usize] += 1;
        i += 1;
    }
    pos = write_block(data, out, last, &syms, &mut lf, &mut df, eb, bs, i - bs, pos);
    st.i = s;
    st.wait = s;
    pos
}

/// Level-0 path: raw stored blocks of at most 65 535 bytes each.
pub(crate) fn stored_chunk(
    data: &[u8],
    st: &mut EncoderState,
    last: bool,
    out: &mut [u8],
    mut pos: usize,
) -> usize {
    let s = data.len();
    let mut i = st.i;
    while i < s + last as usize {
        let mut e = i + STORED_BLOCK_MAX;
        if e > s {
            out[pos >> 3] |= last as u8;
            e = s;
        }
        pos = write_stored(out, pos + 1, &data[i..e]);
        i += STORED_BLOCK_MAX;
    }
    st.i = s;
    st.wait = s;
    pos
}

fn clen(freqs: &[u32], lens: &[u8]) -> usize {
    freqs
        .iter()
        .zip(lens)
        .map(|(&f, &l)| f as usize * l as usize)
        .sum()
}

/// Write one block, choosing the cheapest of stored, fixed, and dynamic
/// encodings. `bs..bs + bl` is the span of input bytes the buffered
/// symbols cover. Returns the new bit position.
#[allow(clippy::too_many_arguments)]
fn write_block(
    data: &[u8],
    out: &mut [u8],
    last: bool,
    syms: &[u32],
    lf: &mut [u32; NUM_LITLEN_SYMS],
    df: &mut [u32; NUM_DIST_SYMS],
    eb: usize,
    bs: usize,
    bl: usize,
    mut pos: usize,
) -> usize {
    write_bits(out, pos, last as u32);
    pos += 1;
    lf[END_OF_BLOCK] += 1;

    let mut dlt = [0u8; NUM_LITLEN_SYMS];
    let mut ddt = [0u8; NUM_DIST_SYMS];
    assign_lengths(&lf[..], MAX_CODEWORD_LEN, &mut dlt);
    assign_lengths(&df[..], MAX_CODEWORD_LEN, &mut ddt);
    let (lclt, nlc) = rle_code_lengths(&dlt);
    let (lcdt, ndc) = rle_code_lengths(&ddt);

    let mut clf = [0u32; NUM_PRECODE_SYMS];
    for &p in lclt.iter().chain(lcdt.iter()) {
        clf[cl_sym(p)] += 1;
    }
    let mut lct = [0u8; NUM_PRECODE_SYMS];
    assign_lengths(&clf, MAX_PRECODE_LEN, &mut lct);
    let mut nlcc = NUM_PRECODE_SYMS;
    while nlcc > 4 && lct[CODE_LENGTH_ORDER[nlcc - 1]] == 0 {
        nlcc -= 1;
    }

    let flen = (bl + 5) << 3;
    let ftlen = clen(&lf[..], &FIXED_LITLEN_LENS) + clen(&df[..], &FIXED_DIST_LENS) + eb;
    let dtlen = clen(&lf[..], &dlt)
        + clen(&df[..], &ddt)
        + eb
        + 14
        + 3 * nlcc
        + clen(&clf, &lct)
        + 2 * clf[16] as usize
        + 3 * clf[17] as usize
        + 7 * clf[18] as usize;

    if bl <= STORED_BLOCK_MAX && flen <= ftlen && flen <= dtlen {
        return write_stored(out, pos, &data[bs..bs + bl]);
    }

    let dynamic = dtlen < ftlen;
    write_bits(out, pos, 1 + dynamic as u32);
    pos += 2;

    let mut lcodes = [0u16; NUM_LITLEN_SYMS];
    let mut dcodes = [0u16; NUM_DIST_SYMS];
    let (lm, ll, dm, dl): (&[u16], &[u8], &[u16], &[u8]) = if dynamic {
        codes_from_lens(&dlt, MAX_CODEWORD_LEN, &mut lcodes);
        codes_from_lens(&ddt, MAX_CODEWORD_LEN, &mut dcodes);
        let mut clcodes = [0u16; NUM_PRECODE_SYMS];
        codes_from_lens(&lct, MAX_PRECODE_LEN, &mut clcodes);

        write_bits(out, pos, (nlc - 257) as u32);
        write_bits(out, pos + 5, (ndc - 1) as u32);
        write_bits(out, pos + 10, (nlcc - 4) as u32);
        pos += 14;
        for (k, &ord) in CODE_LENGTH_ORDER.iter().enumerate().take(nlcc) {
            write_bits(out, pos + 3 * k, lct[ord] as u32);
        }
        pos += 3 * nlcc;
        for &p in lclt.iter().chain(lcdt.iter()) {
            let sym = cl_sym(p);
            write_bits(out, pos, clcodes[sym] as u32);
            pos += lct[sym] as usize;
            if sym > 15 {
                write_bits(out, pos, cl_extra(p));
                pos += cl_extra_bits(p);
            }
        }
        (&lcodes, &dlt, &dcodes, &ddt)
    } else {
        let fc = fixed_codes();
        (&fc.litlen, &FIXED_LITLEN_LENS, &fc.dist, &FIXED_DIST_LENS)
    };

    for &sym in syms {
        if sym > 255 {
            let lslot = ((sym >> 18) & 31) as usize;
            write_bits_wide(out, pos, lm[257 + lslot] as u32);
            pos += ll[257 + lslot] as usize;
            if lslot > 7 {
                write_bits(out, pos, (sym >> 23) & 31);
                pos += LENGTH_EXTRA[lslot] as usize;
            }
            let dslot = (sym & 31) as usize;
            write_bits_wide(out, pos, dm[dslot] as u32);
            pos += dl[dslot] as usize;
            if dslot > 3 {
                write_bits_wide(out, pos, (sym >> 5) & 8191);
                pos += DIST_EXTRA[dslot] as usize;
            }
        } else {
            write_bits_wide(out, pos, lm[sym as usize] as u32);
            pos += ll[sym as usize] as usize;
        }
    }
    write_bits_wide(out, pos, lm[END_OF_BLOCK] as u32);
    pos + ll[END_OF_BLOCK] as usize
}

fn write_stored(out: &mut [u8], pos: usize, data: &[u8]) -> usize {
    let s = data.len();
    debug_assert!(s <= STORED_BLOCK_MAX);
    let o = bits_to_bytes(pos + 2);
    out[o] = (s & 255) as u8;
    out[o + 1] = (s >> 8) as u8;
    out[o + 2] = out[o] ^ 255;
    out[o + 3] = out[o + 1] ^ 255;
    out[o + 4..o + 4 + s].copy_from_slice(data);
    (o + 4 + s) * 8
}
