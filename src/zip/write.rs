//! ZIP archive assembly: local headers and data, central directory,
//! end-of-central-directory record, and the ZIP64 records when any
//! field outgrows its 16/32-bit slot. The total size is computed
//! up front so the buffer is allocated exactly once.

use crate::common::*;
use crate::compress::Compressor;
use crate::crc32::crc32;
use crate::error::{Result, ZipError};
use crate::zip::tree::{flatten, ZipTree};
use crate::zip::{Compression, EntryOptions};
use std::borrow::Cow;

/// Archive-wide writer options.
#[derive(Debug, Clone, Default)]
pub struct ZipOptions {
    /// Archive comment stored after the end-of-central-directory record.
    pub comment: Option<String>,
    /// Defaults merged under every entry's own options.
    pub defaults: EntryOptions,
}

const U32_SENTINEL: u64 = 0xFFFF_FFFF;
const U16_SENTINEL: u64 = 0xFFFF;

fn w16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn w32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn w64(out: &mut Vec<u8>, v: u64) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn clamp32(v: u64) -> u32 {
    v.min(U32_SENTINEL) as u32
}

fn clamp16(v: u64) -> u16 {
    v.min(U16_SENTINEL) as u16
}

struct Prepared<'a> {
    name: Vec<u8>,
    flag: u16,
    method: u16,
    dos_time: u32,
    crc: u32,
    data: Cow<'a, [u8]>,
    orig_size: u64,
    extra: Vec<u8>,
    comment: Vec<u8>,
    os: u8,
    attrs: u32,
    offset: u64,
    zip64_sizes: bool,
}

impl Prepared<'_> {
    fn local_extra_len(&self) -> usize {
        self.extra.len() + if self.zip64_sizes { 20 } else { 0 }
    }

    // (uncompressed, compressed, offset) needing 64-bit storage.
    fn central_zip64_fields(&self) -> (bool, bool, bool) {
        (
            self.orig_size >= U32_SENTINEL,
            self.data.len() as u64 >= U32_SENTINEL,
            self.offset >= U32_SENTINEL,
        )
    }

    fn central_zip64_len(&self) -> usize {
        let (a, b, c) = self.central_zip64_fields();
        let n = a as usize + b as usize + c as usize;
        if n == 0 {
            0
        } else {
            4 + 8 * n
        }
    }

    fn version(&self) -> u16 {
        if self.zip64_sizes || self.offset >= U32_SENTINEL {
            ZIP_VERSION_ZIP64
        } else {
            ZIP_VERSION_DEFLATE
        }
    }
}

/// Build a complete archive from `tree`.
pub fn zip(tree: &ZipTree, opts: &ZipOptions) -> Result<Vec<u8>> {
    let entries = flatten(tree, &opts.defaults)?;
    let archive_comment = opts.comment.as_deref().unwrap_or("").as_bytes();
    if archive_comment.len() > U16_SENTINEL as usize {
        return Err(ZipError::InvalidParam("archive comment exceeds 65535 bytes"));
    }

    let mut prepared: Vec<Prepared> = Vec::with_capacity(entries.len());
    for e in &entries {
        let name = e.path.clone().into_bytes();
        if name.len() > MAX_NAME_LEN {
            return Err(ZipError::FilenameTooLong { len: name.len() });
        }
        let level = e.opts.level.unwrap_or(6);
        let choice = if e.is_dir {
            Compression::Store
        } else {
            e.opts.compression.unwrap_or(if level == 0 {
                Compression::Store
            } else {
                Compression::Deflate
            })
        };
        let crc = crc32(e.data);
        let (method, data): (u16, Cow<[u8]>) = match choice {
            Compression::Store => (ZIP_METHOD_STORE, Cow::Borrowed(e.data)),
            Compression::Deflate => {
                let mut c = Compressor::new(level)?;
                if let Some(m) = e.opts.mem {
                    c = c.with_mem(m)?;
                }
                (ZIP_METHOD_DEFLATE, Cow::Owned(c.compress(e.data)))
            }
            Compression::Custom { method, compress } => (method, Cow::Owned(compress(e.data, level))),
        };
        let dos_time = e.opts.mtime.unwrap_or_default().to_dos()?;

        let mut extra = Vec::new();
        for (&id, payload) in &e.opts.extra {
            if payload.len() > MAX_EXTRA_LEN {
                return Err(ZipError::ExtraFieldTooLong {
                    id,
                    len: payload.len(),
                });
            }
            w16(&mut extra, id);
            w16(&mut extra, payload.len() as u16);
            extra.extend_from_slice(payload);
        }

        let comment = e.opts.comment.clone().unwrap_or_default().into_bytes();
        if comment.len() > U16_SENTINEL as usize {
            return Err(ZipError::InvalidParam("entry comment exceeds 65535 bytes"));
        }

        let zip64_sizes =
            data.len() as u64 >= U32_SENTINEL || e.data.len() as u64 >= U32_SENTINEL;
        // 28 bytes is the largest ZIP64 extended-information field that
        // may still join the user extras in either header.
        if extra.len() + 28 > MAX_EXTRA_LEN {
            return Err(ZipError::InvalidParam("extra fields exceed 65535 bytes total"));
        }

        let speed_hint: u16 = if method == ZIP_METHOD_DEFLATE {
            match level {
                1 => 3,
                2..=5 => 2,
                9 => 1,
                _ => 0,
            }
        } else {
            0
        };
        let flag = (speed_hint << 1) | if name.iter().any(|&b| b >= 0x80) { ZIP_FLAG_UTF8 } else { 0 };

        prepared.push(Prepared {
            name,
            flag,
            method,
            dos_time,
            crc,
            orig_size: e.data.len() as u64,
            data,
            extra,
            comment,
            os: e.opts.os.unwrap_or(0),
            attrs: e.opts.attrs.unwrap_or(0),
            offset: 0,
            zip64_sizes,
        });
    }

    // Layout pass: local-header offsets, then exact totals.
    let mut offset: u64 = 0;
    for p in &mut prepared {
        p.offset = offset;
        offset += (LOCAL_FILE_HEADER_SIZE + p.name.len() + p.local_extra_len()) as u64
            + p.data.len() as u64;
    }
    let cd_offset = offset;
    let mut cd_size: u64 = 0;
    let mut any_zip64_entry = false;
    for p in &prepared {
        let z64 = p.central_zip64_len();
        if z64 > 0 || p.zip64_sizes {
            any_zip64_entry = true;
        }
        cd_size +=
            (CENTRAL_DIR_HEADER_SIZE + p.name.len() + p.extra.len() + z64 + p.comment.len()) as u64;
    }
    let zip64_eocd = any_zip64_entry
        || prepared.len() as u64 >= U16_SENTINEL
        || cd_size >= U32_SENTINEL
        || cd_offset >= U32_SENTINEL;
    let total = cd_offset
        + cd_size
        + if zip64_eocd {
            (ZIP64_EOCD_SIZE + ZIP64_LOCATOR_SIZE) as u64
        } else {
            0
        }
        + EOCD_SIZE as u64
        + archive_comment.len() as u64;
    let total_usize = usize::try_from(total)
        .map_err(|_| ZipError::InvalidParam("archive exceeds addressable memory"))?;

    let mut out: Vec<u8> = Vec::with_capacity(total_usize);

    for p in &prepared {
        w32(&mut out, LOCAL_FILE_HEADER_SIG);
        w16(&mut out, p.version());
        w16(&mut out, p.flag);
        w16(&mut out, p.method);
        w32(&mut out, p.dos_time);
        w32(&mut out, p.crc);
        w32(&mut out, clamp32(p.data.len() as u64));
        w32(&mut out, clamp32(p.orig_size));
        w16(&mut out, p.name.len() as u16);
        w16(&mut out, p.local_extra_len() as u16);
        out.extend_from_slice(&p.name);
        out.extend_from_slice(&p.extra);
        if p.zip64_sizes {
            w16(&mut out, ZIP64_EXTRA_ID);
            w16(&mut out, 16);
            w64(&mut out, p.orig_size);
            w64(&mut out, p.data.len() as u64);
        }
        out.extend_from_slice(&p.data);
    }

    for p in &prepared {
        let (z_orig, z_comp, z_off) = p.central_zip64_fields();
        w32(&mut out, CENTRAL_DIR_HEADER_SIG);
        w16(&mut out, p.version() | ((p.os as u16) << 8));
        w16(&mut out, p.version());
        w16(&mut out, p.flag);
        w16(&mut out, p.method);
        w32(&mut out, p.dos_time);
        w32(&mut out, p.crc);
        w32(&mut out, clamp32(p.data.len() as u64));
        w32(&mut out, clamp32(p.orig_size));
        w16(&mut out, p.name.len() as u16);
        w16(&mut out, (p.extra.len() + p.central_zip64_len()) as u16);
        w16(&mut out, p.comment.len() as u16);
        w16(&mut out, 0); // disk number start
        w16(&mut out, 0); // internal attributes
        w32(&mut out, p.attrs);
        w32(&mut out, clamp32(p.offset));
        out.extend_from_slice(&p.name);
        out.extend_from_slice(&p.extra);
        if p.central_zip64_len() > 0 {
            w16(&mut out, ZIP64_EXTRA_ID);
            w16(&mut out, (p.central_zip64_len() - 4) as u16);
            if z_orig {
                w64(&mut out, p.orig_size);
            }
            if z_comp {
                w64(&mut out, p.data.len() as u64);
            }
            if z_off {
                w64(&mut out, p.offset);
            }
        }
        out.extend_from_slice(&p.comment);
    }

    if zip64_eocd {
        w32(&mut out, ZIP64_EOCD_SIG);
        w64(&mut out, (ZIP64_EOCD_SIZE - 12) as u64);
        w16(&mut out, ZIP_VERSION_ZIP64);
        w16(&mut out, ZIP_VERSION_ZIP64);
        w32(&mut out, 0); // this disk
        w32(&mut out, 0); // disk with the central directory
        w64(&mut out, prepared.len() as u64);
        w64(&mut out, prepared.len() as u64);
        w64(&mut out, cd_size);
        w64(&mut out, cd_offset);
        w32(&mut out, ZIP64_LOCATOR_SIG);
        w32(&mut out, 0);
        w64(&mut out, cd_offset + cd_size);
        w32(&mut out, 1);
    }

    w32(&mut out, EOCD_SIG);
    w16(&mut out, 0); // this disk
    w16(&mut out, 0); // disk with the central directory
    w16(&mut out, clamp16(prepared.len() as u64));
    w16(&mut out, clamp16(prepared.len() as u64));
    w32(&mut out, clamp32(cd_size));
    w32(&mut out, clamp32(cd_offset));
    w16(&mut out, archive_comment.len() as u16);
    out.extend_from_slice(archive_comment);

    debug_assert_eq!(out.len() as u64, total);
    Ok(out)
}
