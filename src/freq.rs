//! Symbol frequency counting and entropy measurement
//!
//! The frequency table is the only metadata the container carries; both the
//! encoder and the decoder derive the code tree from it, so its iteration
//! order must be reproducible. Backing the table with a 256-slot array gives
//! ascending-symbol iteration for free.

use crate::error::CodecError;

/// Occurrence counts for every byte value, plus the cached total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
    total: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self {
            counts: [0u64; 256],
            total: 0,
        }
    }

    /// Tabulate symbol occurrences in one pass. Pure; an empty input yields
    /// an empty table.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &b in data {
            table.counts[b as usize] += 1;
        }
        table.total = data.len() as u64;
        table
    }

    /// Record a (symbol, count) pair recovered from container metadata.
    /// Rejects zero counts and duplicate symbols, both of which indicate a
    /// malformed metadata block.
    pub fn insert(&mut self, symbol: u8, count: u64) -> Result<(), CodecError> {
        if count == 0 {
            return Err(CodecError::malformed(
                0,
                format!("zero frequency for symbol {symbol:#04x}"),
            ));
        }
        if self.counts[symbol as usize] != 0 {
            return Err(CodecError::malformed(
                0,
                format!("duplicate symbol {symbol:#04x} in metadata"),
            ));
        }
        let total = self.total.checked_add(count).ok_or_else(|| {
            CodecError::malformed(
                0,
                format!("frequency total overflows adding {count} for symbol {symbol:#04x}"),
            )
        })?;
        self.counts[symbol as usize] = count;
        self.total = total;
        Ok(())
    }

    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Total of all counts, which equals the input length.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of byte values with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Present symbols with their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(i, &c)| (i as u8, c))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Shannon entropy of the data in bits per byte.
pub fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let table = FrequencyTable::from_bytes(data);
    let len = data.len() as f64;
    let mut entropy = 0.0;
    for (_, count) in table.iter() {
        let p = count as f64 / len;
        entropy -= p * p.log2();
    }
    entropy
}
