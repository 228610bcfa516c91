//! BitReader: reads a block payload one bit at a time, most significant bit first.
//!
//! Blocks are framed with their byte length, so the payload is always fully in memory before
//! we start on it. The reader simply walks the slice.

const BIT_MASK: u8 = 0xff;

/// Reads bits from a packed byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    bit_index: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            bit_index: 0,
        }
    }

    /// Return bit as Option<u64> (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> Option<u64> {
        let byte = *self.buffer.get(self.cursor)?;
        let bit = (byte & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        Some(bit as u64)
    }

    /// Bits not yet read.
    pub fn bits_left(&self) -> usize {
        (self.buffer.len() - self.cursor) * 8 - self.bit_index
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

#[cfg(test)]
mod test {
    use super::BitReader;

    #[test]
    fn basic_test() {
        let x = [0b10000001_u8];
        let mut br = BitReader::new(&x);
        assert_eq!(br.bit(), Some(1));
        for _ in 0..6 {
            assert_eq!(br.bit(), Some(0));
        }
        assert_eq!(br.bit(), Some(1));
        assert_eq!(br.bit(), None);
    }

    #[test]
    fn loc_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x);
        for _ in 0..41 {
            br.bit();
        }
        assert_eq!(br.loc(), "[5.1]");
        assert_eq!(br.bits_left(), 13 * 8 - 41);
    }

    #[test]
    fn empty_test() {
        let mut br = BitReader::new(&[]);
        assert_eq!(br.bits_left(), 0);
        assert_eq!(br.bit(), None);
    }
}
