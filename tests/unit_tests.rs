use zipflate::{adler32, crc32, Adler32, Compressor, Crc32, Decompressor};

#[test]
fn test_crc32_vectors() {
    assert_eq!(crc32(b""), 0);
    assert_eq!(crc32(b"a"), 0xE8B7BE43);
    assert_eq!(crc32(b"abc"), 0x352441C2);
    assert_eq!(crc32(b"123456789"), 0xCBF43926);
    assert_eq!(crc32(b"HELLO"), 0x9A1F4D00);
}

#[test]
fn test_adler32_vectors() {
    assert_eq!(adler32(b""), 1);
    assert_eq!(adler32(b"abc"), 0x024D0127);
    assert_eq!(adler32(b"Wikipedia"), 0x11E60398);
}

#[test]
fn test_streaming_checksums() {
    let data: Vec<u8> = (0..50_000u32).map(|i| (i % 251) as u8).collect();
    let mut c = Crc32::new();
    let mut a = Adler32::new();
    for chunk in data.chunks(1234) {
        c.update(chunk);
        a.update(chunk);
    }
    assert_eq!(c.finalize(), crc32(&data));
    assert_eq!(a.finalize(), adler32(&data));
}

#[test]
fn test_compress_decompress_deflate() {
    let compressor = Compressor::new(6).unwrap();
    let decompressor = Decompressor::new();
    let data = b"Hello world! This is a test string for deflate compression.";

    let compressed = compressor.compress(data);
    let decompressed = decompressor.decompress(&compressed, None).unwrap();
    assert_eq!(data.to_vec(), decompressed);
}

#[test]
fn test_compress_decompress_zlib() {
    let compressor = Compressor::new(6).unwrap();
    let decompressor = Decompressor::new();
    let data = b"Hello world! This is a test string for zlib compression.";

    let compressed = compressor.compress_zlib(data);
    assert_eq!(compressed[0], 0x78);
    assert_eq!(((compressed[0] as u32) << 8 | compressed[1] as u32) % 31, 0);
    let decompressed = decompressor.decompress_zlib(&compressed, None).unwrap();
    assert_eq!(data.to_vec(), decompressed);
    // Big-endian Adler-32 of the payload sits at the tail.
    let tail = &compressed[compressed.len() - 4..];
    assert_eq!(u32::from_be_bytes(tail.try_into().unwrap()), adler32(data));
}

#[test]
fn test_compress_decompress_gzip() {
    let compressor = Compressor::new(6).unwrap();
    let decompressor = Decompressor::new();
    let data = b"Hello world! This is a test string for gzip compression.";

    let compressed = compressor.compress_gzip(data, 0, None);
    assert_eq!(&compressed[..3], &[0x1F, 0x8B, 8]);
    let decompressed = decompressor.decompress_gzip(&compressed).unwrap();
    assert_eq!(data.to_vec(), decompressed);
    // Trailer: CRC-32 then the length, both little-endian.
    let n = compressed.len();
    let tail_crc = u32::from_le_bytes(compressed[n - 8..n - 4].try_into().unwrap());
    let tail_len = u32::from_le_bytes(compressed[n - 4..].try_into().unwrap());
    assert_eq!(tail_crc, crc32(data));
    assert_eq!(tail_len, data.len() as u32);
}

#[test]
fn test_gzip_filename_roundtrip() {
    let compressor = Compressor::new(6).unwrap();
    let compressed = compressor.compress_gzip(b"payload", 1_700_000_000, Some(b"orig.txt"));
    assert_eq!(compressed[3], 0x08); // FNAME
    assert_eq!(
        u32::from_le_bytes(compressed[4..8].try_into().unwrap()),
        1_700_000_000
    );
    assert_eq!(&compressed[10..19], b"orig.txt\0");
    let decompressed = Decompressor::new().decompress_gzip(&compressed).unwrap();
    assert_eq!(decompressed, b"payload");
}

#[test]
fn test_compress_levels() {
    let data = vec![b'a'; 10000];
    let comp0 = Compressor::new(0).unwrap().compress(&data);
    assert!(comp0.len() > data.len());

    let comp1 = Compressor::new(1).unwrap().compress(&data);
    assert!(comp1.len() < comp0.len());

    let comp9 = Compressor::new(9).unwrap().compress(&data);
    assert!(comp9.len() <= comp1.len());

    let d = Decompressor::new();
    for comp in [&comp0, &comp1, &comp9] {
        assert_eq!(d.decompress(comp, Some(data.len())).unwrap(), data);
    }
}

#[test]
fn test_invalid_level_rejected() {
    assert!(Compressor::new(10).is_err());
    assert!(Compressor::new(9).unwrap().with_mem(13).is_err());
}

#[test]
fn test_decompress_errors() {
    let d = Decompressor::new();
    let bad_data = [7u8, 1, 2, 3];
    assert!(d.decompress(&bad_data, None).is_err());
    assert!(d.decompress_zlib(&bad_data, None).is_err());
    assert!(d.decompress_gzip(&bad_data).is_err());
}

#[test]
fn test_compress_bound_overflow_check() {
    let size = usize::MAX - 100;
    assert!(Compressor::deflate_bound(size) >= size);
    assert!(Compressor::zlib_bound(size) >= size);
    assert!(Compressor::gzip_bound(size) >= size);
}
