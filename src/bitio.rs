//! Bit-level packing of variable-length codes
//!
//! Codes are concatenated MSB-first within each byte. The final byte is
//! zero-padded to a byte boundary and the padding count travels in the
//! container header; all-zero trailing bits can be a real code, so the
//! count is never inferred from the payload.

use crate::error::CodecError;
use crate::tree::CodeTable;
use bitstream_io::{BigEndian, BitWrite, BitWriter};

/// Packed bit-stream plus the number of padding bits (0-7) in its last byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedPayload {
    pub bytes: Vec<u8>,
    pub padding: u8,
}

/// Concatenate each input symbol's code in input order and pack the result
/// into bytes.
pub fn pack(data: &[u8], table: &CodeTable) -> Result<PackedPayload, CodecError> {
    let mut writer = BitWriter::endian(Vec::new(), BigEndian);
    let mut total_bits: u64 = 0;

    for &symbol in data {
        let code = table
            .code(symbol)
            .ok_or(CodecError::MissingCode(symbol))?;
        for &bit in code {
            writer.write_bit(bit)?;
        }
        total_bits += code.len() as u64;
    }

    let padding = ((8 - total_bits % 8) % 8) as u8;
    writer.byte_align()?;
    Ok(PackedPayload {
        bytes: writer.into_writer(),
        padding,
    })
}

impl PackedPayload {
    /// Number of meaningful bits in the payload.
    pub fn bit_len(&self) -> u64 {
        (self.bytes.len() as u64) * 8 - self.padding as u64
    }
}
