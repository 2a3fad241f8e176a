//! Configuration for huffpress

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Upper bound on input buffer size; whole-buffer coding holds the
    /// input, the packed payload and the metadata in memory at once.
    pub max_input_size: usize,
    /// Shannon-entropy threshold (bits per byte) below which `Method::Auto`
    /// prefers run-length coding over Huffman.
    pub auto_rle_entropy_threshold: f64,
    /// LZ77 sliding-window size (search buffer), capped at the u16 offset
    /// field's range.
    pub lz77_window: usize,
    /// LZ77 maximum match length, capped at 255.
    pub lz77_lookahead: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_input_size: 256 * 1024 * 1024, // 256 MB
            auto_rle_entropy_threshold: 1.0,
            lz77_window: 4096,
            lz77_lookahead: 18,
        }
    }
}
