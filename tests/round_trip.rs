use std::fs;
use std::io::Cursor;

use huff_compressor::{
    compress_bytes, compress_file, decompress_bytes, decompress_file, header, EncodingTree,
    FrequencyTable, HuffmanError, Symbol,
};
use proptest::prelude::*;
use tempfile::tempdir;

proptest! {
    #[test]
    fn decompress_inverts_compress(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let packed = compress_bytes(&data).unwrap();
        prop_assert_eq!(decompress_bytes(&packed).unwrap(), data);
    }

    #[test]
    fn skewed_alphabets_round_trip(data in proptest::collection::vec(prop_oneof![
        8 => Just(b'e'),
        3 => Just(b't'),
        1 => any::<u8>(),
    ], 0..4096)) {
        let packed = compress_bytes(&data).unwrap();
        prop_assert_eq!(decompress_bytes(&packed).unwrap(), data);
    }

    #[test]
    fn compression_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        prop_assert_eq!(compress_bytes(&data).unwrap(), compress_bytes(&data).unwrap());
    }

    #[test]
    fn header_round_trip(
        counts in proptest::collection::btree_map(any::<u8>(), 1u64..1_000_000, 0..64),
    ) {
        let mut table = FrequencyTable::new();
        for (&byte, &count) in &counts {
            table.insert(Symbol::Literal(byte), count);
        }
        table.insert(Symbol::EndOfStream, 1);

        let mut bytes = Vec::new();
        header::write(&table, &mut bytes).unwrap();
        prop_assert_eq!(header::read(&mut Cursor::new(bytes)).unwrap(), table);
    }

    #[test]
    fn codes_are_prefix_free(data in proptest::collection::vec(any::<u8>(), 0..1024)) {
        let book = EncodingTree::build(&FrequencyTable::from_bytes(&data)).unwrap().code_book();
        let codes: Vec<_> = book.iter().collect();
        for (i, (a_sym, a)) in codes.iter().enumerate() {
            for (b_sym, b) in codes.iter().skip(i + 1) {
                prop_assert!(!a.is_prefix_of(b), "{} is a prefix of {}", a_sym, b_sym);
                prop_assert!(!b.is_prefix_of(a), "{} is a prefix of {}", b_sym, a_sym);
            }
        }
    }

    #[test]
    fn dropping_trailing_bytes_is_an_error(
        data in proptest::collection::vec(any::<u8>(), 1..256),
        cut in 1usize..4,
    ) {
        // The last byte always holds the tail of the end-of-stream code.
        let packed = compress_bytes(&data).unwrap();
        prop_assert!(decompress_bytes(&packed[..packed.len() - cut]).is_err());
    }
}

#[test]
fn aaab_scenario() {
    let table = FrequencyTable::from_bytes(b"AAAB");
    assert_eq!(table.get(Symbol::Literal(b'A')), Some(3));
    assert_eq!(table.get(Symbol::Literal(b'B')), Some(1));
    assert_eq!(table.get(Symbol::EndOfStream), Some(1));

    let book = EncodingTree::build(&table).unwrap().code_book();
    let a = book.code(Symbol::Literal(b'A')).unwrap().len();
    assert_eq!(a, 1);
    assert!(book.code(Symbol::Literal(b'B')).unwrap().len() > a);
    assert!(book.code(Symbol::EndOfStream).unwrap().len() > a);

    assert_eq!(decompress_bytes(&compress_bytes(b"AAAB").unwrap()).unwrap(), b"AAAB");
}

#[test]
fn every_byte_value_round_trips() {
    let data: Vec<u8> = (0..=255u8).cycle().take(256 * 7 + 13).collect();
    assert_eq!(decompress_bytes(&compress_bytes(&data).unwrap()).unwrap(), data);
}

#[test]
fn payload_without_end_of_stream_code_fails() {
    // Codes for AAAB are A=1 B=00 EOF=01. "1 1 1 00" plus zero padding
    // decodes AAAB, a stray B, then runs out inside the next code.
    let err = decompress_bytes(b"2 A3 B1 \xE0").unwrap_err();
    assert!(matches!(err, HuffmanError::TruncatedPayload { .. }));
}

#[test]
fn file_round_trip() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("input.txt");
    let packed = dir.path().join("input.huff");
    let restored = dir.path().join("restored.txt");

    let text = "The quick brown fox jumps over the lazy dog.\n".repeat(200);
    fs::write(&src, &text).unwrap();

    let report = compress_file(&src, &packed).unwrap();
    assert_eq!(report.input_bytes, text.len() as u64);
    assert_eq!(report.output_bytes(), fs::metadata(&packed).unwrap().len());
    assert!(report.ratio() < 1.0);

    let written = decompress_file(&packed, &restored).unwrap();
    assert_eq!(written, text.len() as u64);
    assert_eq!(fs::read_to_string(&restored).unwrap(), text);
}

#[test]
fn empty_file_round_trip() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("empty");
    let packed = dir.path().join("empty.huff");
    let restored = dir.path().join("empty.out");
    fs::write(&src, b"").unwrap();

    compress_file(&src, &packed).unwrap();
    assert_eq!(fs::read(&packed).unwrap(), b"0 ");
    assert_eq!(decompress_file(&packed, &restored).unwrap(), 0);
    assert!(fs::read(&restored).unwrap().is_empty());
}

#[test]
fn missing_input_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = compress_file(&dir.path().join("nope"), &dir.path().join("out")).unwrap_err();
    assert!(matches!(err, HuffmanError::Io(_)));
}
