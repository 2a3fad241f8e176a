//! Integration tests for huffpress

use huffpress::error::CodecError;
use huffpress::*;

#[test]
fn test_full_lifecycle() {
    let codec = Codec::with_defaults();
    let data = b"the quick brown fox jumps over the lazy dog".repeat(50);
    let compressed = codec.compress(&data, Method::Auto).unwrap();
    assert!(compressed.compressed_size > 0);
    let decompressed = codec.decompress(&compressed).unwrap();
    assert_eq!(decompressed, data);
}

#[test]
fn test_all_methods_roundtrip() {
    let codec = Codec::with_defaults();
    let data = b"test data for all coding methods roundtrip";

    for method in [Method::Huffman, Method::RunLength, Method::Lz77] {
        let compressed = codec.compress(data, method).unwrap();
        let decompressed = codec.decompress(&compressed).unwrap();
        assert_eq!(decompressed, data, "roundtrip failed for {:?}", method);
    }
}

#[test]
fn test_roundtrip_random_buffers() {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x1234_5678);

    for len in [0usize, 1, 2, 7, 8, 63, 64, 1000, 4096] {
        let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        let compressed = huffman::compress(&data).unwrap();
        let decompressed = huffman::decompress(&compressed).unwrap();
        assert_eq!(decompressed, data, "roundtrip failed for len {len}");
    }
}

#[test]
fn test_roundtrip_skewed_alphabet() {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);

    // heavily skewed distribution over a small alphabet
    let data: Vec<u8> = (0..10_000)
        .map(|_| {
            let roll: f64 = rng.gen();
            if roll < 0.7 {
                b'a'
            } else if roll < 0.9 {
                b'b'
            } else {
                b'c' + rng.gen_range(0..4)
            }
        })
        .collect();
    let compressed = huffman::compress(&data).unwrap();
    assert!(compressed.len() < data.len(), "skewed data should compress");
    assert_eq!(huffman::decompress(&compressed).unwrap(), data);
}

#[test]
fn test_compress_is_deterministic() {
    let data = b"determinism check with tied frequencies abcd abcd".repeat(3);
    let first = huffman::compress(&data).unwrap();
    let second = huffman::compress(&data).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_single_symbol_input() {
    let compressed = huffman::compress(b"zzzz").unwrap();
    assert_eq!(huffman::decompress(&compressed).unwrap(), b"zzzz");
}

#[test]
fn test_corruption_is_detected_not_decoded() {
    let data = b"a valid message that will be damaged in transit";
    let valid = huffman::compress(data).unwrap();

    let mut truncated = valid.clone();
    truncated.truncate(truncated.len() - 1);
    assert!(matches!(
        huffman::decompress(&truncated),
        Err(CodecError::TruncatedStream { .. })
    ));

    let mut bad_padding = valid.clone();
    bad_padding[0] = 9;
    assert!(matches!(
        huffman::decompress(&bad_padding),
        Err(CodecError::MalformedContainer { .. })
    ));
}

#[test]
fn test_large_uniform_data() {
    let codec = Codec::with_defaults();
    let data = vec![0xABu8; 100_000];
    let compressed = codec.compress(&data, Method::Auto).unwrap();
    assert!(
        compressed.ratio < 0.5,
        "large uniform data should compress well"
    );
    let decompressed = codec.decompress(&compressed).unwrap();
    assert_eq!(decompressed, data);
}

#[test]
fn test_binary_data() {
    let codec = Codec::with_defaults();
    let data: Vec<u8> = (0..=255).cycle().take(2000).collect();
    let compressed = codec.compress(&data, Method::Huffman).unwrap();
    let decompressed = codec.decompress(&compressed).unwrap();
    assert_eq!(decompressed, data);
}

#[test]
fn test_codec_config() {
    use huffpress::config::CodecConfig;
    let config = CodecConfig {
        max_input_size: 1024,
        ..CodecConfig::default()
    };
    let codec = Codec::new(config);
    let data = b"config test data within the size limit";
    let result = codec.compress(data, Method::Huffman).unwrap();
    assert!(result.compressed_size > 0);
    assert!(matches!(
        codec.compress(&vec![0u8; 2048], Method::Huffman),
        Err(CodecError::InputTooLarge { .. })
    ));
}

#[test]
fn test_stats_populated() {
    let codec = Codec::with_defaults();
    let compressed = codec
        .compress(b"metadata test data here", Method::Huffman)
        .unwrap();
    assert!(compressed.stats.entropy_bits > 0.0);
    assert!(compressed.stats.distinct_symbols >= 2);
}
