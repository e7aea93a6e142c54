use proptest::prelude::*;
use zipflate::{
    adler32, crc32, deflate, inflate, unzip, unzlib, zip, zlib, DeflateOptions, InflateOptions,
    UnzipOptions, ZipOptions, ZipTree,
};

proptest! {
    #[test]
    fn deflate_roundtrips(data in prop::collection::vec(any::<u8>(), 0..4096), level in 0u8..=9) {
        let compressed = deflate(&data, &DeflateOptions::level(level)).unwrap();
        let back = inflate(&compressed, &InflateOptions {
            size_hint: Some(data.len()),
            ..Default::default()
        }).unwrap();
        prop_assert_eq!(back, data);
    }

    #[test]
    fn zlib_roundtrips(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        let compressed = zlib(&data, &DeflateOptions::default()).unwrap();
        let back = unzlib(&compressed, &InflateOptions::default()).unwrap();
        prop_assert_eq!(back, data);
    }

    #[test]
    fn dictionary_roundtrips(
        dict in prop::collection::vec(any::<u8>(), 1..512),
        data in prop::collection::vec(any::<u8>(), 0..1024),
    ) {
        let opts = DeflateOptions { dictionary: Some(&dict), ..Default::default() };
        let compressed = deflate(&data, &opts).unwrap();
        let back = inflate(&compressed, &InflateOptions {
            dictionary: Some(&dict),
            size_hint: Some(data.len()),
        }).unwrap();
        prop_assert_eq!(back, data);
    }

    #[test]
    fn checksums_split_anywhere(data in prop::collection::vec(any::<u8>(), 0..2048), split in 0usize..2048) {
        let split = split.min(data.len());
        let (a, b) = data.split_at(split);
        let mut c = zipflate::Crc32::new();
        c.update(a);
        c.update(b);
        prop_assert_eq!(c.finalize(), crc32(&data));
        let mut s = zipflate::Adler32::new();
        s.update(a);
        s.update(b);
        prop_assert_eq!(s.finalize(), adler32(&data));
    }

    #[test]
    fn zip_roundtrips_filenames_and_bytes(
        names in prop::collection::hash_set("[a-zA-Z0-9_.]{1,24}", 1..16),
        seed in any::<u64>(),
    ) {
        let mut state = seed | 1;
        let mut root = ZipTree::root();
        let mut expected = Vec::new();
        for name in &names {
            let len = (state % 512) as usize;
            let body: Vec<u8> = (0..len).map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                (state >> 48) as u8
            }).collect();
            root.insert(name.clone(), ZipTree::file(body.clone()));
            expected.push((name.clone(), body));
        }
        let archive = zip(&root, &ZipOptions::default()).unwrap();
        let files = unzip(&archive, UnzipOptions::default()).unwrap();
        prop_assert_eq!(files.len(), expected.len());
        for (file, (name, body)) in files.iter().zip(&expected) {
            prop_assert_eq!(&file.name, name);
            prop_assert_eq!(&file.data, body);
        }
    }
}
