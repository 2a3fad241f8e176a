//! huffpress: self-describing Huffman entropy coder.
//!
//! The core engine compresses a whole in-memory buffer into a container
//! that embeds its own frequency table, so decompression needs no
//! out-of-band tree:
//! - frequency counting and Shannon entropy measurement
//! - deterministic min-heap tree construction with a pinned tie-break
//! - MSB-first bit packing with explicit padding accounting
//! - a big-endian envelope carrying padding, metadata and payload
//!
//! Run-length and LZ77 sliding-window coders are available for inputs
//! where per-symbol entropy coding is not the right tool: long runs for
//! the former, repeated substrings for the latter.

pub mod bitio;
pub mod config;
pub mod container;
pub mod error;
pub mod freq;
pub mod huffman;
pub mod lz77;
pub mod rle;
pub mod tree;

use crate::config::CodecConfig;
use crate::error::CodecError;
use tracing::debug;

/// Coding method selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Method {
    Huffman,
    RunLength,
    Lz77,
    Auto,
}

/// Compressed output container
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Encoded {
    pub method: Method,
    pub original_size: usize,
    pub compressed_size: usize,
    pub data: Vec<u8>,
    pub ratio: f64,
    pub stats: CodecStats,
}

/// Measurements taken during compression
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CodecStats {
    pub entropy_bits: f64,
    pub distinct_symbols: usize,
}

/// The main codec engine
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(CodecConfig::default())
    }

    /// Compress data using the given method. Empty input is not an error;
    /// it produces the empty container.
    pub fn compress(&self, data: &[u8], method: Method) -> Result<Encoded, CodecError> {
        if data.len() > self.config.max_input_size {
            return Err(CodecError::InputTooLarge {
                size: data.len(),
                limit: self.config.max_input_size,
            });
        }

        let method = if method == Method::Auto {
            self.select_method(data)
        } else {
            method
        };
        debug!(?method, input_len = data.len(), "codec compress");

        let compressed = match method {
            Method::Huffman => huffman::compress(data)?,
            Method::RunLength => rle::compress(data)?,
            Method::Lz77 => {
                lz77::compress(data, self.config.lz77_window, self.config.lz77_lookahead)?
            }
            Method::Auto => unreachable!(),
        };

        let ratio = if data.is_empty() {
            1.0
        } else {
            compressed.len() as f64 / data.len() as f64
        };

        Ok(Encoded {
            method,
            original_size: data.len(),
            compressed_size: compressed.len(),
            data: compressed,
            ratio,
            stats: CodecStats {
                entropy_bits: freq::shannon_entropy(data),
                distinct_symbols: freq::FrequencyTable::from_bytes(data).distinct(),
            },
        })
    }

    /// Decompress a previously encoded buffer.
    pub fn decompress(&self, encoded: &Encoded) -> Result<Vec<u8>, CodecError> {
        match encoded.method {
            Method::Huffman => huffman::decompress(&encoded.data),
            Method::RunLength => rle::decompress(&encoded.data),
            Method::Lz77 => lz77::decompress(&encoded.data),
            Method::Auto => Err(CodecError::InvalidMethod),
        }
    }

    /// Prefer run-length coding when the entropy is low enough that long
    /// runs dominate; Huffman carries table overhead that a near-constant
    /// buffer never recovers.
    fn select_method(&self, data: &[u8]) -> Method {
        let entropy = freq::shannon_entropy(data);
        if entropy < self.config.auto_rle_entropy_threshold {
            Method::RunLength
        } else {
            Method::Huffman
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_huffman() {
        let codec = Codec::with_defaults();
        let data = b"hello world hello world hello world";
        let result = codec.compress(data, Method::Huffman).unwrap();
        assert!(result.compressed_size > 0);
        assert_eq!(result.original_size, data.len());
        assert_eq!(result.method, Method::Huffman);
    }

    #[test]
    fn test_compress_empty_is_not_an_error() {
        let codec = Codec::with_defaults();
        let result = codec.compress(b"", Method::Huffman).unwrap();
        assert_eq!(result.original_size, 0);
        let decompressed = codec.decompress(&result).unwrap();
        assert!(decompressed.is_empty());
    }

    #[test]
    fn test_roundtrip_huffman() {
        let codec = Codec::with_defaults();
        let data = b"the quick brown fox jumps over the lazy dog";
        let compressed = codec.compress(data, Method::Huffman).unwrap();
        let decompressed = codec.decompress(&compressed).unwrap();
        assert_eq!(decompressed, data);
    }

    #[test]
    fn test_roundtrip_rle() {
        let codec = Codec::with_defaults();
        let data = b"aaaaaabbbbbbcccccc";
        let compressed = codec.compress(data, Method::RunLength).unwrap();
        let decompressed = codec.decompress(&compressed).unwrap();
        assert_eq!(decompressed, data);
    }

    #[test]
    fn test_roundtrip_lz77() {
        let codec = Codec::with_defaults();
        let data = b"repeated phrase, repeated phrase, repeated phrase";
        let compressed = codec.compress(data, Method::Lz77).unwrap();
        let decompressed = codec.decompress(&compressed).unwrap();
        assert_eq!(decompressed, data);
    }

    #[test]
    fn test_auto_selects_rle_for_constant_data() {
        let codec = Codec::with_defaults();
        let low_entropy = vec![0u8; 1000];
        let result = codec.compress(&low_entropy, Method::Auto).unwrap();
        assert_eq!(result.method, Method::RunLength);
    }

    #[test]
    fn test_auto_selects_huffman_for_mixed_data() {
        let codec = Codec::with_defaults();
        let data = b"mixed text with many distinct symbols 0123456789";
        let result = codec.compress(data, Method::Auto).unwrap();
        assert_eq!(result.method, Method::Huffman);
    }

    #[test]
    fn test_input_size_limit_enforced() {
        let config = CodecConfig {
            max_input_size: 8,
            ..CodecConfig::default()
        };
        let codec = Codec::new(config);
        let result = codec.compress(b"nine bytes!", Method::Huffman);
        assert!(matches!(result, Err(CodecError::InputTooLarge { .. })));
    }

    #[test]
    fn test_stats_populated() {
        let codec = Codec::with_defaults();
        let result = codec.compress(b"statistics probe", Method::Huffman).unwrap();
        assert!(result.stats.entropy_bits > 0.0);
        assert!(result.stats.distinct_symbols > 1);
    }

    #[test]
    fn test_compression_ratio_on_repetitive_data() {
        let codec = Codec::with_defaults();
        let data = "aaaaaaaaaa".repeat(100);
        let result = codec.compress(data.as_bytes(), Method::Huffman).unwrap();
        assert!(result.ratio < 1.0, "repetitive data should compress well");
    }

    #[test]
    fn test_decompress_auto_is_invalid() {
        let codec = Codec::with_defaults();
        let mut encoded = codec.compress(b"abc", Method::Huffman).unwrap();
        encoded.method = Method::Auto;
        assert!(matches!(
            codec.decompress(&encoded),
            Err(CodecError::InvalidMethod)
        ));
    }
}
