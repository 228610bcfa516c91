//! Splits a run of bytes into fixed-width symbols.
//!
//! Every full symbol is lent out of the source slice. If the length of the run is not a
//! multiple of the width, the trailing bytes are copied into one last symbol and padded
//! on the right with zeros.
//!
//! The frequency pass and the encode pass must chunk exactly the same byte ranges, otherwise
//! the padded tail of one pass will not exist in the table built by the other.

use std::borrow::Cow;

/// Iterator over the symbols of a byte run. Clone it (or call `symbols` again) to restart.
#[derive(Debug, Clone)]
pub struct SymbolChunks<'a> {
    data: &'a [u8],
    width: usize,
    cursor: usize,
}

impl<'a> SymbolChunks<'a> {
    /// Width must be at least one. (Options validation guarantees this before we get here.)
    pub fn new(data: &'a [u8], width: usize) -> Self {
        debug_assert!(width > 0, "symbol width must be positive");
        Self {
            data,
            width: width.max(1),
            cursor: 0,
        }
    }
}

impl<'a> Iterator for SymbolChunks<'a> {
    type Item = Cow<'a, [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        let left = self.data.len() - self.cursor;
        if left == 0 {
            return None;
        }
        let start = self.cursor;
        if left >= self.width {
            self.cursor += self.width;
            return Some(Cow::Borrowed(&self.data[start..self.cursor]));
        }
        // Partial tail: zero pad the missing positions.
        let mut tail = vec![0_u8; self.width];
        tail[..left].copy_from_slice(&self.data[start..]);
        self.cursor = self.data.len();
        Some(Cow::Owned(tail))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = symbol_count(self.data.len() - self.cursor, self.width);
        (n, Some(n))
    }
}

impl ExactSizeIterator for SymbolChunks<'_> {}

/// Convenience constructor.
pub fn symbols(data: &[u8], width: usize) -> SymbolChunks<'_> {
    SymbolChunks::new(data, width)
}

/// Number of symbols (including a padded tail) for a run of `len` bytes.
pub fn symbol_count(len: usize, width: usize) -> usize {
    (len + width - 1) / width
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn full_symbols_test() {
        let data = [1_u8, 2, 3, 4, 5, 6];
        let syms: Vec<Vec<u8>> = symbols(&data, 2).map(|s| s.into_owned()).collect();
        assert_eq!(syms, vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
    }

    #[test]
    fn padded_tail_test() {
        let data = [0x01_u8, 0x02, 0x03];
        let syms: Vec<Vec<u8>> = symbols(&data, 2).map(|s| s.into_owned()).collect();
        assert_eq!(syms, vec![vec![0x01, 0x02], vec![0x03, 0x00]]);
    }

    #[test]
    fn borrowed_until_tail_test() {
        let data = [9_u8; 7];
        let mut chunks = symbols(&data, 3);
        assert!(matches!(chunks.next(), Some(Cow::Borrowed(_))));
        assert!(matches!(chunks.next(), Some(Cow::Borrowed(_))));
        assert!(matches!(chunks.next(), Some(Cow::Owned(_))));
        assert!(chunks.next().is_none());
    }

    #[test]
    fn empty_and_restart_test() {
        assert_eq!(symbols(&[], 4).count(), 0);
        let data = b"abcde";
        let chunks = symbols(data, 4);
        assert_eq!(chunks.len(), 2);
        let again = chunks.clone();
        assert_eq!(chunks.collect::<Vec<_>>(), again.collect::<Vec<_>>());
    }

    #[test]
    fn symbol_count_test() {
        assert_eq!(symbol_count(0, 3), 0);
        assert_eq!(symbol_count(3, 3), 1);
        assert_eq!(symbol_count(4, 3), 2);
        assert_eq!(symbol_count(5, 1), 5);
    }
}
