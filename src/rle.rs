//! Run-length coding for long-run inputs
//!
//! Emits `(run length, byte)` pairs with runs capped at 255; runs longer
//! than that split into consecutive pairs. The stream is self-describing:
//! an even pair count and non-zero run lengths are the only structure, and
//! the empty input is the empty stream.

use crate::error::CodecError;
use tracing::debug;

/// Compress a buffer into run-length pairs.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut output = Vec::new();
    let mut i = 0;
    while i < data.len() {
        let byte = data[i];
        let mut run = 1usize;
        while i + run < data.len() && data[i + run] == byte && run < 255 {
            run += 1;
        }
        output.push(run as u8);
        output.push(byte);
        i += run;
    }
    debug!(input_len = data.len(), pairs = output.len() / 2, "rle compress");
    Ok(output)
}

/// Expand run-length pairs back into the original buffer.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    if data.len() % 2 != 0 {
        return Err(CodecError::CorruptRunLength {
            offset: data.len() - 1,
            detail: "dangling half pair".into(),
        });
    }
    let mut output = Vec::with_capacity(data.len());
    let mut i = 0;
    while i < data.len() {
        let run = data[i] as usize;
        let byte = data[i + 1];
        if run == 0 {
            return Err(CodecError::CorruptRunLength {
                offset: i,
                detail: "zero-length run".into(),
            });
        }
        output.resize(output.len() + run, byte);
        i += 2;
    }
    Ok(output)
}
