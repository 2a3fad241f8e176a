//! Self-describing container envelope
//!
//! Layout, all multi-byte integers big-endian:
//!
//! ```text
//! [ padding: u8 ]                       0-7 trailing pad bits in last payload byte
//! [ distinct symbol count: u32 ]
//! [ (symbol: u8, frequency: u64) ... ]  ascending symbol order
//! [ payload bytes ... ]
//! ```
//!
//! Frequencies are fixed-width 8-byte integers rather than varints; the
//! metadata block tops out at 256 * 9 bytes and stays trivially seekable.
//! The empty input is a container with padding 0, symbol count 0 and no
//! payload bytes.

use crate::bitio::PackedPayload;
use crate::error::CodecError;
use crate::freq::FrequencyTable;

const PADDING_OFFSET: usize = 0;
const COUNT_OFFSET: usize = 1;
const PAIRS_OFFSET: usize = 5;
const PAIR_WIDTH: usize = 9;

/// One compressed artifact: constructed once per compression run, consumed
/// once per decompression run.
#[derive(Debug, Clone)]
pub struct Container {
    pub padding: u8,
    pub frequencies: FrequencyTable,
    pub payload: Vec<u8>,
}

impl Container {
    pub fn new(frequencies: FrequencyTable, payload: PackedPayload) -> Self {
        Self {
            padding: payload.padding,
            frequencies,
            payload: payload.bytes,
        }
    }

    /// The empty-input container: no metadata, no payload.
    pub fn empty() -> Self {
        Self {
            padding: 0,
            frequencies: FrequencyTable::new(),
            payload: Vec::new(),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let distinct = self.frequencies.distinct();
        let mut out =
            Vec::with_capacity(PAIRS_OFFSET + distinct * PAIR_WIDTH + self.payload.len());
        out.push(self.padding);
        out.extend_from_slice(&(distinct as u32).to_be_bytes());
        for (symbol, count) in self.frequencies.iter() {
            out.push(symbol);
            out.extend_from_slice(&count.to_be_bytes());
        }
        out.extend_from_slice(&self.payload);
        out
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, CodecError> {
        if data.len() < PAIRS_OFFSET {
            return Err(CodecError::malformed(
                data.len(),
                format!("header needs {PAIRS_OFFSET} bytes, buffer has {}", data.len()),
            ));
        }

        let padding = data[PADDING_OFFSET];
        if padding > 7 {
            return Err(CodecError::malformed(
                PADDING_OFFSET,
                format!("padding count {padding} outside 0-7"),
            ));
        }

        let count = u32::from_be_bytes([
            data[COUNT_OFFSET],
            data[COUNT_OFFSET + 1],
            data[COUNT_OFFSET + 2],
            data[COUNT_OFFSET + 3],
        ]) as usize;
        if count > 256 {
            return Err(CodecError::malformed(
                COUNT_OFFSET,
                format!("symbol count {count} exceeds byte alphabet"),
            ));
        }

        let payload_offset = PAIRS_OFFSET + count * PAIR_WIDTH;
        if data.len() < payload_offset {
            return Err(CodecError::malformed(
                data.len(),
                format!(
                    "metadata declares {count} symbols ({payload_offset} header bytes), buffer has {}",
                    data.len()
                ),
            ));
        }

        let mut frequencies = FrequencyTable::new();
        let mut prev_symbol: Option<u8> = None;
        for i in 0..count {
            let at = PAIRS_OFFSET + i * PAIR_WIDTH;
            let symbol = data[at];
            if let Some(prev) = prev_symbol {
                if symbol <= prev {
                    return Err(CodecError::malformed(
                        at,
                        format!("symbol {symbol:#04x} out of order after {prev:#04x}"),
                    ));
                }
            }
            prev_symbol = Some(symbol);

            let mut freq_bytes = [0u8; 8];
            freq_bytes.copy_from_slice(&data[at + 1..at + PAIR_WIDTH]);
            let freq = u64::from_be_bytes(freq_bytes);
            if freq == 0 {
                return Err(CodecError::malformed(
                    at + 1,
                    format!("zero frequency for symbol {symbol:#04x}"),
                ));
            }
            frequencies.insert(symbol, freq)?;
        }

        let payload = data[payload_offset..].to_vec();
        if payload.is_empty() && padding != 0 {
            return Err(CodecError::malformed(
                PADDING_OFFSET,
                format!("padding count {padding} with no payload bytes"),
            ));
        }
        if count == 0 && !payload.is_empty() {
            return Err(CodecError::malformed(
                payload_offset,
                format!("{} payload bytes without symbol metadata", payload.len()),
            ));
        }

        Ok(Container {
            padding,
            frequencies,
            payload,
        })
    }
}
