use std::collections::BTreeMap;
use std::io::{self, Read};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::symbol::Symbol;

/// Occurrence counts per symbol.
///
/// Backed by an ordered map so iteration is always literals ascending,
/// then the end-of-stream marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    counts: BTreeMap<Symbol, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable {
            counts: BTreeMap::new(),
        }
    }

    /// Counts every byte of `reader` until it is exhausted, then pins the
    /// end-of-stream count to 1. The reader is left at its end.
    pub fn compute<R: Read>(reader: &mut R) -> Result<Self> {
        let mut literal_counts = [0u64; 256];
        let mut buffer = [0u8; 8192];
        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            for &byte in &buffer[..n] {
                literal_counts[byte as usize] += 1;
            }
        }
        Ok(Self::from_counts(&literal_counts))
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut literal_counts = [0u64; 256];
        for &byte in bytes {
            literal_counts[byte as usize] += 1;
        }
        Self::from_counts(&literal_counts)
    }

    fn from_counts(literal_counts: &[u64; 256]) -> Self {
        let mut table = FrequencyTable::new();
        for (byte, &count) in literal_counts.iter().enumerate() {
            if count > 0 {
                table.insert(Symbol::Literal(byte as u8), count);
            }
        }
        table.insert(Symbol::EndOfStream, 1);
        table
    }

    /// Sets the count for `symbol`, returning the previous count.
    pub fn insert(&mut self, symbol: Symbol, count: u64) -> Option<u64> {
        self.counts.insert(symbol, count)
    }

    pub fn get(&self, symbol: Symbol) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.counts.contains_key(&symbol)
    }

    pub fn has_end_of_stream(&self) -> bool {
        self.contains(Symbol::EndOfStream)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }

    /// Literal entries only, in ascending byte order.
    pub fn literals(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.iter()
            .filter_map(|(symbol, count)| symbol.literal().map(|byte| (byte, count)))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct literal bytes (excludes the end-of-stream marker).
    pub fn literal_count(&self) -> usize {
        self.len() - usize::from(self.has_end_of_stream())
    }

    /// Sum of all literal counts, i.e. the length of the scanned input.
    pub fn total(&self) -> u64 {
        self.literals().map(|(_, count)| count).sum()
    }
}
