//! Compatibility with the flate2 (miniz/zlib) implementations: streams
//! we produce must decode there, and theirs must decode here.

use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
use std::io::{Read, Write};
use zipflate::{DeflateOptions, GzipOptions, InflateOptions};

fn corpus() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"interoperability corpus: ".repeat(300).as_slice());
    data.extend_from_slice(&[0u8; 5000]);
    let mut state = 1u32;
    data.extend((0..5000).map(|_| {
        state = state.wrapping_mul(1664525).wrapping_add(1013904223);
        (state >> 24) as u8
    }));
    data
}

#[test]
fn flate2_decodes_our_deflate() {
    let data = corpus();
    for level in [0, 1, 6, 9] {
        let compressed = zipflate::deflate(&data, &DeflateOptions::level(level)).unwrap();
        let mut decoder = DeflateDecoder::new(compressed.as_slice());
        let mut back = Vec::new();
        decoder.read_to_end(&mut back).unwrap();
        assert_eq!(back, data, "level {level}");
    }
}

#[test]
fn we_decode_flate2_deflate() {
    let data = corpus();
    let mut encoder = DeflateEncoder::new(Vec::new(), flate2::Compression::best());
    encoder.write_all(&data).unwrap();
    let compressed = encoder.finish().unwrap();
    let back = zipflate::inflate(&compressed, &InflateOptions::default()).unwrap();
    assert_eq!(back, data);
}

#[test]
fn flate2_decodes_our_zlib() {
    let data = corpus();
    let compressed = zipflate::zlib(&data, &DeflateOptions::default()).unwrap();
    let mut decoder = ZlibDecoder::new(compressed.as_slice());
    let mut back = Vec::new();
    decoder.read_to_end(&mut back).unwrap();
    assert_eq!(back, data);
}

#[test]
fn we_decode_flate2_zlib() {
    let data = corpus();
    let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&data).unwrap();
    let compressed = encoder.finish().unwrap();
    let back = zipflate::unzlib(&compressed, &InflateOptions::default()).unwrap();
    assert_eq!(back, data);
}

#[test]
fn flate2_decodes_our_gzip() {
    let data = corpus();
    let compressed = zipflate::gzip(
        &data,
        &GzipOptions {
            mtime: 1_600_000_000,
            filename: Some("corpus.bin"),
            ..Default::default()
        },
    )
    .unwrap();
    let mut decoder = GzDecoder::new(compressed.as_slice());
    let mut back = Vec::new();
    decoder.read_to_end(&mut back).unwrap();
    assert_eq!(back, data);
}

#[test]
fn we_decode_flate2_gzip() {
    let data = corpus();
    let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&data).unwrap();
    let compressed = encoder.finish().unwrap();
    let back = zipflate::gunzip(&compressed, &InflateOptions::default()).unwrap();
    assert_eq!(back, data);
}

#[test]
fn streamed_output_decodes_in_flate2() {
    let data = corpus();
    let mut enc = zipflate::DeflateEncoder::new(&DeflateOptions::default()).unwrap();
    let mut compressed = Vec::new();
    for chunk in data.chunks(777) {
        compressed.extend(enc.feed(chunk, false).unwrap());
    }
    compressed.extend(enc.finish().unwrap());
    let mut decoder = DeflateDecoder::new(compressed.as_slice());
    let mut back = Vec::new();
    decoder.read_to_end(&mut back).unwrap();
    assert_eq!(back, data);
}
