//! Huffman tree construction and code table derivation
//!
//! Tree shape must be identical on the encode and decode sides, so ties in
//! the min-heap are broken by insertion sequence: leaves enter in ascending
//! symbol order with sequence numbers 0..N, and each merged node takes the
//! next number. Equal-weight nodes therefore always extract in the order
//! they were pushed, regardless of how the heap sifts internally.

use crate::error::CodecError;
use crate::freq::FrequencyTable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A strictly-owned prefix-code tree node. Leaves hold exactly one symbol;
/// internal nodes hold exactly two children and the sum of their weights.
#[derive(Debug, Clone)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

struct HeapEntry {
    weight: u64,
    seq: u64,
    node: Node,
}

impl Eq for HeapEntry {}
impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}
impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // min-heap on (weight, insertion sequence)
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree by greedy min-weight merging. A table with a single
    /// distinct symbol produces a lone leaf root; the code generator and the
    /// decoder both special-case it.
    pub fn from_frequencies(table: &FrequencyTable) -> Result<Self, CodecError> {
        if table.is_empty() {
            return Err(CodecError::EmptyInput);
        }

        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;
        for (symbol, weight) in table.iter() {
            heap.push(HeapEntry {
                weight,
                seq,
                node: Node::Leaf { symbol, weight },
            });
            seq += 1;
        }

        while heap.len() > 1 {
            // first extracted becomes the left child (the 0 branch)
            let left = heap.pop().map(|e| e.node).ok_or(CodecError::EmptyInput)?;
            let right = heap.pop().map(|e| e.node).ok_or(CodecError::EmptyInput)?;
            let weight = left
                .weight()
                .checked_add(right.weight())
                .ok_or_else(|| CodecError::malformed(0, "merged node weight overflow"))?;
            heap.push(HeapEntry {
                weight,
                seq,
                node: Node::Internal {
                    weight,
                    left: Box::new(left),
                    right: Box::new(right),
                },
            });
            seq += 1;
        }

        let root = heap.pop().map(|e| e.node).ok_or(CodecError::EmptyInput)?;
        Ok(HuffmanTree { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Derive the code table: depth-first, 0 on left descent, 1 on right,
    /// left before right. The lone-leaf root gets the 1-bit code `0`.
    pub fn code_table(&self) -> CodeTable {
        let mut table = CodeTable::new();
        let mut path = Vec::new();
        assign_codes(&self.root, &mut path, &mut table);
        table
    }
}

fn assign_codes(node: &Node, path: &mut Vec<bool>, table: &mut CodeTable) {
    match node {
        Node::Leaf { symbol, .. } => {
            let code = if path.is_empty() {
                vec![false]
            } else {
                path.clone()
            };
            table.set(*symbol, code);
        }
        Node::Internal { left, right, .. } => {
            path.push(false);
            assign_codes(left, path, table);
            path.pop();
            path.push(true);
            assign_codes(right, path, table);
            path.pop();
        }
    }
}

/// Per-symbol bit-string codes, prefix-free by construction since only
/// leaves receive codes.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<Vec<bool>>>,
}

impl CodeTable {
    fn new() -> Self {
        Self {
            codes: vec![None; 256],
        }
    }

    fn set(&mut self, symbol: u8, code: Vec<bool>) {
        self.codes[symbol as usize] = Some(code);
    }

    pub fn code(&self, symbol: u8) -> Option<&[bool]> {
        self.codes[symbol as usize].as_deref()
    }

    /// Assigned (symbol, code) pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[bool])> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_deref().map(|code| (i as u8, code)))
    }

    /// Total bit length of the input under this table. Counts come from
    /// untrusted container metadata, so the products and their sum are
    /// checked rather than trusted to fit.
    pub fn encoded_bits(&self, table: &FrequencyTable) -> Result<u64, CodecError> {
        let mut total = 0u64;
        for (sym, count) in table.iter() {
            let len = self.code(sym).map(|c| c.len()).unwrap_or(0) as u64;
            let bits = len.checked_mul(count).ok_or_else(|| {
                CodecError::malformed(0, format!("bit count overflow for symbol {sym:#04x}"))
            })?;
            total = total.checked_add(bits).ok_or_else(|| {
                CodecError::malformed(0, "total encoded bit count overflow")
            })?;
        }
        Ok(total)
    }
}
