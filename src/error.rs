//! Error types for huffpress

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("empty input")]
    EmptyInput,

    #[error("input of {size} bytes exceeds configured limit of {limit}")]
    InputTooLarge { size: usize, limit: usize },

    #[error("malformed container at byte {offset}: {detail}")]
    MalformedContainer { offset: usize, detail: String },

    #[error("truncated bitstream: payload carries {actual_bits} bits, at least {expected_bits} required")]
    TruncatedStream { expected_bits: u64, actual_bits: u64 },

    #[error("corrupt run-length stream at byte {offset}: {detail}")]
    CorruptRunLength { offset: usize, detail: String },

    #[error("corrupt lz77 token stream at byte {offset}: {detail}")]
    CorruptLz77 { offset: usize, detail: String },

    #[error("symbol {0:#04x} has no assigned code")]
    MissingCode(u8),

    #[error("invalid codec method for this operation")]
    InvalidMethod,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    pub(crate) fn malformed(offset: usize, detail: impl Into<String>) -> Self {
        CodecError::MalformedContainer {
            offset,
            detail: detail.into(),
        }
    }
}
