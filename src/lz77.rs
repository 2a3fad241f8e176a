//! LZ77 sliding-window coding
//!
//! Naive backward search, O(n * window). The token stream is
//! self-describing: a `0x00` flag introduces a literal byte, a `0x01` flag
//! a back-reference of `(offset: u16 BE, length: u8)` into the already
//! decoded output. Matches shorter than three bytes cost more than the
//! literals they replace and are never emitted.

use crate::error::CodecError;
use tracing::debug;

const FLAG_LITERAL: u8 = 0x00;
const FLAG_MATCH: u8 = 0x01;
const MIN_MATCH: usize = 3;

/// Compress a buffer into a literal/back-reference token stream. `window`
/// bounds how far back matches may reach (capped at the u16 offset field),
/// `lookahead` bounds match length (capped at 255 for the length byte).
pub fn compress(data: &[u8], window: usize, lookahead: usize) -> Result<Vec<u8>, CodecError> {
    let window = window.min(u16::MAX as usize);
    let lookahead = lookahead.min(255);

    let mut output = Vec::new();
    let n = data.len();
    let mut i = 0;

    while i < n {
        let mut best_len = 0usize;
        let mut best_offset = 0usize;

        let start = i.saturating_sub(window);
        for j in start..i {
            let mut k = 0;
            while k < lookahead && i + k < n && data[j + k] == data[i + k] {
                k += 1;
            }
            if k > best_len {
                best_len = k;
                best_offset = i - j;
                if best_len == lookahead {
                    break; // can't do better
                }
            }
        }

        if best_len >= MIN_MATCH {
            output.push(FLAG_MATCH);
            output.extend_from_slice(&(best_offset as u16).to_be_bytes());
            output.push(best_len as u8);
            i += best_len;
        } else {
            output.push(FLAG_LITERAL);
            output.push(data[i]);
            i += 1;
        }
    }

    debug!(input_len = n, token_bytes = output.len(), "lz77 compress");
    Ok(output)
}

/// Expand a token stream back into the original buffer.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut output = Vec::new();
    let n = data.len();
    let mut i = 0;

    while i < n {
        let at = i;
        let flag = data[i];
        i += 1;
        match flag {
            FLAG_LITERAL => {
                if i >= n {
                    return Err(CodecError::CorruptLz77 {
                        offset: at,
                        detail: "truncated literal token".into(),
                    });
                }
                output.push(data[i]);
                i += 1;
            }
            FLAG_MATCH => {
                if i + 3 > n {
                    return Err(CodecError::CorruptLz77 {
                        offset: at,
                        detail: "truncated match token".into(),
                    });
                }
                let offset = u16::from_be_bytes([data[i], data[i + 1]]) as usize;
                let len = data[i + 2] as usize;
                i += 3;
                if len == 0 {
                    return Err(CodecError::CorruptLz77 {
                        offset: at,
                        detail: "zero-length match".into(),
                    });
                }
                if offset == 0 || offset > output.len() {
                    return Err(CodecError::CorruptLz77 {
                        offset: at,
                        detail: format!(
                            "match offset {offset} outside {} decoded bytes",
                            output.len()
                        ),
                    });
                }
                // byte-by-byte copy: a match may overlap its own output
                let start = output.len() - offset;
                for k in 0..len {
                    let byte = output[start + k];
                    output.push(byte);
                }
            }
            other => {
                return Err(CodecError::CorruptLz77 {
                    offset: at,
                    detail: format!("unknown token flag {other:#04x}"),
                });
            }
        }
    }

    Ok(output)
}
