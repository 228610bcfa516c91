use crate::error::Result;
use crate::tools::chunker::symbols;
use crate::tools::options::Backend;
use crate::tools::symbol_map::{SymbolMap, SymbolStore};

/// Symbol occurrence counts for one compression session.
#[derive(Debug, Clone)]
pub struct FreqTable {
    width: usize,
    counts: SymbolStore<u64>,
    total: u64,
}

impl FreqTable {
    pub fn new(width: usize, backend: Backend) -> Result<Self> {
        Ok(Self {
            width,
            counts: SymbolStore::new(width, backend)?,
            total: 0,
        })
    }

    pub fn increment(&mut self, symbol: &[u8]) {
        match self.counts.get_mut(symbol) {
            Some(count) => *count += 1,
            None => self.counts.put(symbol, 1),
        }
        self.total += 1;
    }

    /// Count every symbol of a chunk, zero padding a partial tail.
    pub fn count_bytes(&mut self, data: &[u8]) {
        symbols(data, self.width).for_each(|sym| self.increment(&sym));
    }

    /// Count for the symbol (zero if never seen).
    pub fn get(&self, symbol: &[u8]) -> u64 {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    /// Symbols with a non-zero count, in ascending byte order.
    pub fn symbols(&self) -> Vec<Vec<u8>> {
        self.counts.keys()
    }

    /// (symbol, count) pairs in ascending symbol order.
    pub fn weights(&self) -> Vec<(Vec<u8>, u64)> {
        self.symbols()
            .into_iter()
            .map(|sym| {
                let count = self.get(&sym);
                (sym, count)
            })
            .collect()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> u64 {
        self.total
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn count_test() {
        let mut freqs = FreqTable::new(1, Backend::Auto).unwrap();
        freqs.count_bytes(&[0x41, 0x42, 0x41, 0x41]);
        assert_eq!(freqs.get(&[0x41]), 3);
        assert_eq!(freqs.get(&[0x42]), 1);
        assert_eq!(freqs.get(&[0x43]), 0);
        assert_eq!(freqs.symbols(), vec![vec![0x41], vec![0x42]]);
        assert_eq!(freqs.total(), 4);
    }

    #[test]
    fn padded_count_test() {
        let mut freqs = FreqTable::new(2, Backend::Sparse).unwrap();
        freqs.count_bytes(&[0x01, 0x02, 0x03]);
        assert_eq!(freqs.weights(), vec![(vec![0x01, 0x02], 1), (vec![0x03, 0x00], 1)]);
    }

    #[test]
    fn backends_agree_test() {
        let data = b"the quick brown fox jumps over the lazy dog, twice: the quick brown fox";
        let mut dense = FreqTable::new(2, Backend::Dense).unwrap();
        let mut sparse = FreqTable::new(2, Backend::Sparse).unwrap();
        dense.count_bytes(data);
        sparse.count_bytes(data);
        assert_eq!(dense.weights(), sparse.weights());
        assert_eq!(dense.len(), sparse.len());
    }
}
