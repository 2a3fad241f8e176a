//! Huffman compression and decompression
//!
//! `compress` accepts any byte buffer, including the empty one, and emits a
//! self-describing container; `decompress` needs nothing beyond the
//! container bytes. Both sides build the code tree from the same frequency
//! table with the same tie-break rule, so the shapes are identical.

use crate::bitio;
use crate::container::Container;
use crate::error::CodecError;
use crate::freq::FrequencyTable;
use crate::tree::{HuffmanTree, Node};
use bitstream_io::{BigEndian, BitRead, BitReader};
use std::io::Cursor;
use tracing::debug;

/// Compress a whole buffer into container bytes. Never fails on well-formed
/// input; the empty buffer produces the empty container.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    if data.is_empty() {
        debug!("compressing empty input, emitting empty container");
        return Ok(Container::empty().to_bytes());
    }

    let frequencies = FrequencyTable::from_bytes(data);
    let tree = HuffmanTree::from_frequencies(&frequencies)?;
    let table = tree.code_table();
    let payload = bitio::pack(data, &table)?;

    debug!(
        input_len = data.len(),
        distinct = frequencies.distinct(),
        payload_len = payload.bytes.len(),
        padding = payload.padding,
        "huffman compress"
    );
    Ok(Container::new(frequencies, payload).to_bytes())
}

/// Decompress container bytes back into the original buffer.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let container = Container::from_bytes(data)?;
    if container.frequencies.is_empty() {
        return Ok(Vec::new());
    }

    let tree = HuffmanTree::from_frequencies(&container.frequencies)?;
    let table = tree.code_table();

    // The frequency table fixes the exact payload bit count, so a truncated
    // or padded-out payload is detectable before the walk.
    let expected_bits = table.encoded_bits(&container.frequencies)?;
    let actual_bits = (container.payload.len() as u64) * 8 - container.padding as u64;
    if actual_bits < expected_bits {
        return Err(CodecError::TruncatedStream {
            expected_bits,
            actual_bits,
        });
    }
    if actual_bits > expected_bits {
        return Err(CodecError::malformed(
            0,
            format!("payload carries {actual_bits} bits, metadata requires {expected_bits}"),
        ));
    }

    debug!(
        payload_len = container.payload.len(),
        padding = container.padding,
        expected_bits,
        "huffman decompress"
    );
    walk_bits(&tree, &container, expected_bits)
}

/// Cursor walk: 0 descends left, 1 descends right, a leaf emits its symbol
/// and resets the cursor. A lone-leaf root consumes one bit per symbol, the
/// mirror of its 1-bit code.
fn walk_bits(
    tree: &HuffmanTree,
    container: &Container,
    payload_bits: u64,
) -> Result<Vec<u8>, CodecError> {
    let total = container.frequencies.total() as usize;
    let mut output = Vec::with_capacity(total);
    let mut reader = BitReader::endian(Cursor::new(&container.payload), BigEndian);

    let mut cursor = tree.root();
    let mut at_root = true;
    for _ in 0..payload_bits {
        let bit = reader.read_bit()?;
        match cursor {
            Node::Leaf { symbol, .. } => {
                // lone-leaf root, one bit per symbol
                output.push(*symbol);
            }
            Node::Internal { left, right, .. } => {
                cursor = if bit { right.as_ref() } else { left.as_ref() };
                if let Node::Leaf { symbol, .. } = cursor {
                    output.push(*symbol);
                    cursor = tree.root();
                    at_root = true;
                } else {
                    at_root = false;
                }
            }
        }
    }

    if !at_root {
        // a complete final code needs at least one more bit
        return Err(CodecError::TruncatedStream {
            expected_bits: payload_bits + 1,
            actual_bits: payload_bits,
        });
    }
    if output.len() != total {
        return Err(CodecError::malformed(
            0,
            format!("payload decodes to {} symbols, metadata declares {total}", output.len()),
        ));
    }
    Ok(output)
}
