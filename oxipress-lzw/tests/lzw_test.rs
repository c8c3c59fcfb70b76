//! Comprehensive LZW integration tests.

use oxipress_core::SliceSource;
use oxipress_lzw::{
    LzwConfig, LzwDecoder, LzwEncoder, LzwError, compress, compress_with, decompress,
};

/// Deterministic pseudo-random bytes.
fn pseudo_random(size: usize, mut seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 33) as u8);
    }
    data
}

#[test]
fn test_lzw_roundtrip_simple() {
    let original = b"TOBEORNOTTOBEORTOBEORNOT";
    let compressed = compress(original).expect("compression failed");
    let decompressed = decompress(&compressed).expect("decompression failed");

    assert_eq!(decompressed, original);
}

#[test]
fn test_lzw_empty_input() {
    let compressed = compress(b"").expect("compression failed");
    assert_eq!(compressed, vec![0x1F, 0x9D, 0x90]);

    let decompressed = decompress(&compressed).expect("decompression failed");
    assert!(decompressed.is_empty());
}

#[test]
fn test_lzw_single_byte() {
    let compressed = compress(&[0x41]).expect("compression failed");
    assert_eq!(compressed, vec![0x1F, 0x9D, 0x90, 0x41, 0x00]);

    let decompressed = decompress(&compressed).expect("decompression failed");
    assert_eq!(decompressed, vec![0x41]);
}

#[test]
fn test_lzw_repeating_run() {
    let original = b"AAAAAAAAAA";
    let mut encoder = LzwEncoder::default();
    let mut compressed = Vec::new();
    let stats = encoder
        .encode_stream(SliceSource::new(original), &mut compressed)
        .expect("compression failed");

    assert!(
        stats.codes_emitted < original.len() as u64,
        "{} codes for {} bytes",
        stats.codes_emitted,
        original.len()
    );

    let decompressed = decompress(&compressed).expect("decompression failed");
    assert_eq!(decompressed, original);
}

#[test]
fn test_lzw_all_same_byte() {
    let original = vec![b'X'; 100_000];
    let compressed = compress(&original).expect("compression failed");

    assert!(
        compressed.len() < original.len() / 50,
        "Repeated byte should compress to under 2% of original"
    );

    let decompressed = decompress(&compressed).expect("decompression failed");
    assert_eq!(decompressed, original);
}

#[test]
fn test_lzw_alternating_pattern() {
    let original = b"ABABABABABABABABABABABABABABABABABABAB";
    let compressed = compress(original).expect("compression failed");
    let decompressed = decompress(&compressed).expect("decompression failed");

    assert_eq!(decompressed, original);
}

#[test]
fn test_lzw_all_byte_values() {
    let original: Vec<u8> = (0..=255).cycle().take(256 * 40).collect();
    let compressed = compress(&original).expect("compression failed");
    let decompressed = decompress(&compressed).expect("decompression failed");

    assert_eq!(decompressed, original);
}

#[test]
fn test_lzw_multiple_sizes() {
    // Sizes around the points where codes cross 9/10/11 bits.
    for size in [1, 2, 3, 255, 256, 257, 511, 512, 513, 1023, 1024, 1025, 4095, 4096, 4097] {
        let original = pseudo_random(size, size as u64);
        let compressed = compress(&original).expect("compression failed");
        let decompressed = decompress(&compressed).expect("decompression failed");

        assert_eq!(
            decompressed.len(),
            original.len(),
            "Size mismatch for input size {}",
            size
        );
        assert_eq!(decompressed, original, "Data mismatch for size {}", size);
    }
}

#[test]
fn test_lzw_crosses_nine_to_ten_bits() {
    let original = pseudo_random(4000, 7);
    let mut encoder = LzwEncoder::default();
    let mut compressed = Vec::new();
    let stats = encoder
        .encode_stream(SliceSource::new(&original), &mut compressed)
        .expect("compression failed");

    assert!(
        stats.width_changes.iter().any(|c| c.bits == 10),
        "input should be long enough to reach 10-bit codes"
    );

    let decompressed = decompress(&compressed).expect("decompression failed");
    assert_eq!(decompressed, original);
}

#[test]
fn test_lzw_width_growth_law() {
    let original = b"It was the best of times, it was the worst of times. ".repeat(2000);
    let mut encoder = LzwEncoder::default();
    let mut compressed = Vec::new();
    let stats = encoder
        .encode_stream(SliceSource::new(&original), &mut compressed)
        .expect("compression failed");

    let mut bits = 9;
    let mut last_index = 0;
    for change in &stats.width_changes {
        assert_eq!(change.bits, bits + 1, "width must grow one bit at a time");
        assert!(change.code_index > last_index, "changes must be ordered");
        assert!(change.code_index <= stats.codes_emitted);
        bits = change.bits;
        last_index = change.code_index;
    }
    assert!(bits <= 16);
    assert_eq!(stats.final_bits, bits);

    let decompressed = decompress(&compressed).expect("decompression failed");
    assert_eq!(decompressed, original);
}

#[test]
fn test_lzw_dictionary_full() {
    // Pseudo-random bytes keep the encoder learning until the table is full.
    let original = pseudo_random(400_000, 0xC0FFEE);
    let mut encoder = LzwEncoder::new(LzwConfig::DEFAULT).expect("valid config");
    let mut compressed = Vec::new();
    let stats = encoder
        .encode_stream(SliceSource::new(&original), &mut compressed)
        .expect("compression failed");

    assert!(stats.dictionary_full);
    assert_eq!(stats.codes_assigned, 1 << 16);
    assert_eq!(stats.final_bits, 16);

    let mut decoder = LzwDecoder::new();
    let mut decompressed = Vec::new();
    let dec = decoder
        .decode_stream(SliceSource::new(&compressed), &mut decompressed)
        .expect("decompression failed");

    assert_eq!(decompressed, original);
    assert_eq!(dec.codes_assigned, 1 << 16);
}

#[test]
fn test_lzw_full_dictionary_keeps_matching() {
    // Fill the table with noise, then feed text: the frozen dictionary still
    // round-trips and never grows past its limit.
    let mut original = pseudo_random(300_000, 99);
    original.extend(b"after the table is frozen ".repeat(5000));

    let mut encoder = LzwEncoder::default();
    let mut compressed = Vec::new();
    let stats = encoder
        .encode_stream(SliceSource::new(&original), &mut compressed)
        .expect("compression failed");
    assert!(stats.codes_assigned <= 1 << 16);

    let decompressed = decompress(&compressed).expect("decompression failed");
    assert_eq!(decompressed, original);
}

#[test]
fn test_lzw_wide_config() {
    let original = pseudo_random(200_000, 3);
    let compressed = compress_with(&original, LzwConfig::WIDE).expect("compression failed");
    assert_eq!(compressed[2], 0x80 | 32);

    let decompressed = decompress(&compressed).expect("decompression failed");
    assert_eq!(decompressed, original);
}

#[test]
fn test_lzw_truncated_body_decodes_prefix() {
    let original = b"The quick brown fox jumps over the lazy dog. ".repeat(50);
    let compressed = compress(&original).expect("compression failed");

    for cut in [4, 10, compressed.len() / 2, compressed.len() - 1] {
        let decompressed = decompress(&compressed[..cut]).expect("decompression failed");
        assert!(
            original.starts_with(&decompressed),
            "cut at {} must decode to a prefix",
            cut
        );
    }
}

#[test]
fn test_lzw_corrupt_code_is_fatal() {
    // 0xFF 0xFF as the first code is 511: never valid as a first code.
    let data = [0x1F, 0x9D, 0x90, 0xFF, 0xFF];
    let err = decompress(&data).unwrap_err();
    assert!(err.is_corrupt_input());
    assert!(matches!(err, LzwError::InvalidCode { code: 511, .. }));
}

#[test]
fn test_compression_effectiveness() {
    let test_cases = vec![
        (b"AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA".to_vec(), "all same"),
        (b"ABABABABABABABABABABABABABABABABABABABAB".to_vec(), "alternating"),
        (
            b"This is a test. This is a test. This is a test. This is a test.".to_vec(),
            "repeated phrase",
        ),
    ];

    for (data, description) in test_cases {
        let compressed = compress(&data).expect("compression failed");

        assert!(
            compressed.len() < data.len(),
            "{} should compress: {} -> {}",
            description,
            data.len(),
            compressed.len()
        );

        let decompressed = decompress(&compressed).expect("decompression failed");
        assert_eq!(decompressed, data);
    }
}
