//! ZIP archive reading: locate the end-of-central-directory record,
//! walk the central directory lazily, and decompress entry payloads on
//! demand through their local headers.

use crate::bits::{read_u16_le, read_u32_le, read_u64_le};
use crate::common::*;
use crate::decompress::Decompressor;
use crate::error::{Result, ZipError};
use crate::zip::time::ZipDateTime;
use crate::zip::CompressionMethod;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

fn truncated(_: std::io::Error) -> ZipError {
    ZipError::InvalidZipData
}

/// A parsed archive borrowing the input buffer. Entry payloads are not
/// touched until [`ZipEntry::decompress`] is called.
#[derive(Debug, Clone)]
pub struct ZipArchive<'a> {
    data: &'a [u8],
    entry_count: u64,
    cd_offset: u64,
    comment: &'a [u8],
}

impl<'a> ZipArchive<'a> {
    /// Locate the end-of-central-directory record (scanning backwards
    /// over at most a maximum-length comment) and, when its fields are
    /// saturated, the ZIP64 records.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        if data.len() < EOCD_SIZE {
            return Err(ZipError::InvalidZipData);
        }
        let mut e = data.len() - EOCD_SIZE;
        loop {
            if read_u32_le(data, e) == EOCD_SIG {
                break;
            }
            if e == 0 || data.len() - e > EOCD_SCAN_LIMIT {
                return Err(ZipError::InvalidZipData);
            }
            e -= 1;
        }
        let mut entry_count = read_u16_le(data, e + 10) as u64;
        let mut cd_offset = read_u32_le(data, e + 16) as u64;
        let comment_len = read_u16_le(data, e + 20) as usize;
        let comment_end = (e + EOCD_SIZE + comment_len).min(data.len());
        let comment = &data[e + EOCD_SIZE..comment_end];

        if entry_count == 0xFFFF || cd_offset == 0xFFFF_FFFF {
            // The locator's 8-byte record offset sits 12 bytes before
            // the EOCD.
            if e < ZIP64_LOCATOR_SIZE {
                return Err(ZipError::InvalidZipData);
            }
            let z = read_u64_le(data, e - 12);
            if z.saturating_add(ZIP64_EOCD_SIZE as u64) > data.len() as u64 {
                return Err(ZipError::InvalidZipData);
            }
            let z = z as usize;
            if read_u32_le(data, z) != ZIP64_EOCD_SIG {
                return Err(ZipError::InvalidZipData);
            }
            entry_count = read_u64_le(data, z + 32);
            cd_offset = read_u64_le(data, z + 48);
        }
        Ok(Self {
            data,
            entry_count,
            cd_offset,
            comment,
        })
    }

    pub fn len(&self) -> u64 {
        self.entry_count
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    /// Raw archive comment bytes.
    pub fn comment(&self) -> &'a [u8] {
        self.comment
    }

    /// Iterate over central-directory entries in archive order.
    pub fn entries(&self) -> Entries<'a> {
        Entries {
            data: self.data,
            offset: self.cd_offset,
            remaining: self.entry_count,
        }
    }
}

/// Iterator over [`ZipEntry`] records. Parsing stops at the first
/// structural error.
pub struct Entries<'a> {
    data: &'a [u8],
    offset: u64,
    remaining: u64,
}

impl<'a> Iterator for Entries<'a> {
    type Item = Result<ZipEntry<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        match parse_entry(self.data, self.offset) {
            Ok((entry, next)) => {
                self.offset = next;
                Some(Ok(entry))
            }
            Err(err) => {
                self.remaining = 0;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

fn parse_entry(data: &[u8], offset: u64) -> Result<(ZipEntry<'_>, u64)> {
    let mut cur = Cursor::new(data);
    cur.set_position(offset);
    let mut sig = [0u8; 4];
    cur.read_exact(&mut sig).map_err(truncated)?;
    if u32::from_le_bytes(sig) != CENTRAL_DIR_HEADER_SIG {
        return Err(ZipError::InvalidZipData);
    }
    let _version_made_by = cur.read_u16::<LittleEndian>().map_err(truncated)?;
    let _version_needed = cur.read_u16::<LittleEndian>().map_err(truncated)?;
    let flags = cur.read_u16::<LittleEndian>().map_err(truncated)?;
    let method = cur.read_u16::<LittleEndian>().map_err(truncated)?;
    let dos_time = cur.read_u32::<LittleEndian>().map_err(truncated)?;
    let crc = cur.read_u32::<LittleEndian>().map_err(truncated)?;
    let mut compressed_size = cur.read_u32::<LittleEndian>().map_err(truncated)? as u64;
    let mut uncompressed_size = cur.read_u32::<LittleEndian>().map_err(truncated)? as u64;
    let name_len = cur.read_u16::<LittleEndian>().map_err(truncated)? as usize;
    let extra_len = cur.read_u16::<LittleEndian>().map_err(truncated)? as usize;
    let comment_len = cur.read_u16::<LittleEndian>().map_err(truncated)? as usize;
    let _disk_start = cur.read_u16::<LittleEndian>().map_err(truncated)?;
    let _internal_attrs = cur.read_u16::<LittleEndian>().map_err(truncated)?;
    let external_attrs = cur.read_u32::<LittleEndian>().map_err(truncated)?;
    let mut local_offset = cur.read_u32::<LittleEndian>().map_err(truncated)? as u64;

    let name_start = cur.position() as usize;
    let extra_start = name_start + name_len;
    let comment_start = extra_start + extra_len;
    let end = comment_start + comment_len;
    if end > data.len() {
        return Err(ZipError::InvalidZipData);
    }
    let name_raw = &data[name_start..extra_start];
    let extra = &data[extra_start..comment_start];
    let comment = &data[comment_start..end];

    if compressed_size == 0xFFFF_FFFF
        || uncompressed_size == 0xFFFF_FFFF
        || local_offset == 0xFFFF_FFFF
    {
        // Saturated fields take their real values from the ZIP64
        // extended-information extra field, in fixed order, each
        // present only when its 32-bit counterpart is saturated.
        let mut p = 0;
        while p + 4 <= extra.len() {
            let id = read_u16_le(extra, p);
            let size = read_u16_le(extra, p + 2) as usize;
            let body_end = (p + 4 + size).min(extra.len());
            if id == ZIP64_EXTRA_ID {
                let mut q = p + 4;
                if uncompressed_size == 0xFFFF_FFFF && q + 8 <= body_end {
                    uncompressed_size = read_u64_le(extra, q);
                    q += 8;
                }
                if compressed_size == 0xFFFF_FFFF && q + 8 <= body_end {
                    compressed_size = read_u64_le(extra, q);
                    q += 8;
                }
                if local_offset == 0xFFFF_FFFF && q + 8 <= body_end {
                    local_offset = read_u64_le(extra, q);
                }
                break;
            }
            p += 4 + size;
        }
    }

    let name = if flags & ZIP_FLAG_UTF8 != 0 {
        String::from_utf8_lossy(name_raw).into_owned()
    } else {
        // Latin-1: each byte maps to the code point of the same value.
        name_raw.iter().map(|&b| b as char).collect()
    };

    Ok((
        ZipEntry {
            data,
            name,
            name_raw,
            comment,
            flags,
            method,
            dos_time,
            crc,
            compressed_size,
            uncompressed_size,
            local_offset,
        },
        end as u64,
    ))
}

/// One central-directory entry. Holds offsets into the archive buffer;
/// the payload is only decompressed on request.
#[derive(Debug, Clone)]
pub struct ZipEntry<'a> {
    data: &'a [u8],
    name: String,
    name_raw: &'a [u8],
    comment: &'a [u8],
    flags: u16,
    method: u16,
    dos_time: u32,
    crc: u32,
    compressed_size: u64,
    uncompressed_size: u64,
    local_offset: u64,
}

impl<'a> ZipEntry<'a> {
    /// Entry name, decoded as UTF-8 when general-purpose flag bit 11 is
    /// set and as Latin-1 otherwise.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Undecoded name bytes.
    pub fn name_raw(&self) -> &'a [u8] {
        self.name_raw
    }

    pub fn comment(&self) -> &'a [u8] {
        self.comment
    }

    pub fn is_dir(&self) -> bool {
        self.name.ends_with('/')
    }

    pub fn compression_method(&self) -> CompressionMethod {
        CompressionMethod::from_u16(self.method)
    }

    pub fn crc32(&self) -> u32 {
        self.crc
    }

    pub fn compressed_size(&self) -> u64 {
        self.compressed_size
    }

    pub fn uncompressed_size(&self) -> u64 {
        self.uncompressed_size
    }

    pub fn mtime(&self) -> ZipDateTime {
        ZipDateTime::from_dos(self.dos_time)
    }

    pub fn local_header_offset(&self) -> u64 {
        self.local_offset
    }

    /// The entry's compressed byte span, resolved through the local
    /// header (whose name/extra lengths may differ from the central
    /// directory's).
    pub fn compressed_data(&self) -> Result<&'a [u8]> {
        let off = usize::try_from(self.local_offset).map_err(|_| ZipError::InvalidZipData)?;
        if off + LOCAL_FILE_HEADER_SIZE > self.data.len()
            || read_u32_le(self.data, off) != LOCAL_FILE_HEADER_SIG
        {
            return Err(ZipError::InvalidZipData);
        }
        let name_len = read_u16_le(self.data, off + 26) as usize;
        let extra_len = read_u16_le(self.data, off + 28) as usize;
        let start = off + LOCAL_FILE_HEADER_SIZE + name_len + extra_len;
        let len = usize::try_from(self.compressed_size).map_err(|_| ZipError::InvalidZipData)?;
        if start + len > self.data.len() {
            return Err(ZipError::InvalidZipData);
        }
        Ok(&self.data[start..start + len])
    }

    /// Decompress the payload (store and deflate only).
    pub fn decompress(&self) -> Result<Vec<u8>> {
        let raw = self.compressed_data()?;
        match self.method {
            ZIP_METHOD_STORE => Ok(raw.to_vec()),
            ZIP_METHOD_DEFLATE => {
                let hint =
                    usize::try_from(self.uncompressed_size).map_err(|_| ZipError::InvalidZipData)?;
                let out = Decompressor::new().decompress(raw, Some(hint))?;
                if out.len() as u64 != self.uncompressed_size {
                    return Err(ZipError::InvalidZipData);
                }
                Ok(out)
            }
            m => Err(ZipError::UnknownCompressionMethod { method: m }),
        }
    }
}

/// Options for [`unzip`].
#[derive(Default)]
pub struct UnzipOptions<'a> {
    /// Entries failing the predicate are skipped without touching
    /// their payloads.
    pub filter: Option<&'a dyn Fn(&ZipEntry) -> bool>,
}

/// One extracted entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnzippedFile {
    pub name: String,
    pub data: Vec<u8>,
    pub compression_method: CompressionMethod,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
    pub crc32: u32,
}

/// Extract every entry (directories yield empty payloads), in archive
/// order, honoring the filter hook.
pub fn unzip(data: &[u8], opts: UnzipOptions) -> Result<Vec<UnzippedFile>> {
    let archive = ZipArchive::new(data)?;
    let mut files = Vec::new();
    for entry in archive.entries() {
        let entry = entry?;
        if let Some(filter) = opts.filter {
            if !filter(&entry) {
                continue;
            }
        }
        let payload = if entry.is_dir() {
            Vec::new()
        } else {
            entry.decompress()?
        };
        files.push(UnzippedFile {
            name: entry.name().to_string(),
            compression_method: entry.compression_method(),
            compressed_size: entry.compressed_size(),
            uncompressed_size: entry.uncompressed_size(),
            crc32: entry.crc32(),
            data: payload,
        });
    }
    Ok(files)
}
