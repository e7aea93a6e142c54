use zipflate::{inflate, unzlib, InflateOptions, ZipError};

fn inflate_err(data: &[u8]) -> ZipError {
    inflate(data, &InflateOptions::default()).unwrap_err()
}

#[test]
fn reserved_block_type() {
    // BFINAL=1, BTYPE=11.
    assert_eq!(inflate_err(&[0x07]), ZipError::InvalidBlockType);
    assert_eq!(inflate_err(&[0x07]).code(), 1);
}

#[test]
fn truncated_streams() {
    // Stored block announcing more bytes than the buffer holds.
    assert_eq!(inflate_err(&[0x01, 0x10, 0x00, 0xEF, 0xFF, 0xAA]), ZipError::UnexpectedEof);
    // A block cut off mid-symbol either trips the EOF check or decodes
    // to something other than the original, never silently succeeds.
    let original = b"some reasonably sized payload to cut in half";
    let whole = zipflate::deflate(original, &zipflate::DeflateOptions::default()).unwrap();
    match inflate(&whole[..whole.len() / 2], &InflateOptions::default()) {
        Err(err) => assert_eq!(err, ZipError::UnexpectedEof),
        Ok(bytes) => assert_ne!(bytes, original),
    }
    assert_eq!(ZipError::UnexpectedEof.code(), 0);
}

#[test]
fn distance_before_start_of_output() {
    // A dynamic encoding is not needed: compress data that starts with
    // a back-reference only when a dictionary was used, then inflate
    // without one.
    let opts = zipflate::DeflateOptions {
        dictionary: Some(b"abcdefgh"),
        ..Default::default()
    };
    let compressed = zipflate::deflate(b"abcdefgh and the rest", &opts).unwrap();
    let err = inflate_err(&compressed);
    assert_eq!(err, ZipError::InvalidDistance);
    assert_eq!(err.code(), 3);
}

#[test]
fn zlib_header_validation() {
    // Bad method nibble.
    assert_eq!(
        unzlib(&[0x77, 0x01, 0, 0, 0, 0], &InflateOptions::default()).unwrap_err(),
        ZipError::InvalidHeader { format: "zlib" }
    );
    // Failing the mod-31 check.
    assert_eq!(
        unzlib(&[0x78, 0x00, 0, 0, 0, 0], &InflateOptions::default()).unwrap_err(),
        ZipError::InvalidHeader { format: "zlib" }
    );
    // Valid header but dictionary demanded and none supplied.
    let with_dict = zipflate::zlib(
        b"payload",
        &zipflate::DeflateOptions {
            dictionary: Some(b"payload"),
            ..Default::default()
        },
    )
    .unwrap();
    let err = unzlib(&with_dict, &InflateOptions::default()).unwrap_err();
    assert_eq!(err.code(), 4);
}

#[test]
fn error_codes_are_distinct_and_dense() {
    let errs = [
        ZipError::UnexpectedEof,
        ZipError::InvalidBlockType,
        ZipError::InvalidLengthLiteral,
        ZipError::InvalidDistance,
        ZipError::InvalidHeader { format: "zlib" },
        ZipError::ExtraFieldTooLong { id: 1, len: 70000 },
        ZipError::InvalidDate { year: 1979 },
        ZipError::FilenameTooLong { len: 70000 },
        ZipError::InvalidZipData,
        ZipError::UnknownCompressionMethod { method: 12 },
        ZipError::DuplicatePath { path: "p".into() },
        ZipError::InvalidParam("x"),
    ];
    let codes: Vec<u8> = errs.iter().map(|e| e.code()).collect();
    assert_eq!(codes, (0..12).collect::<Vec<u8>>());
}
