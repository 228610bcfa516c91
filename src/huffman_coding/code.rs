//! A single huffman code and its packed 64 bit form.
//!
//! The packed word keeps the code length in the top byte and the code bits left-justified in
//! the low 56 bits. A code of length 3 with bits `101` packs as
//! `0x03_A0000000000000`. Two codes that share a prefix therefore compare equal on that
//! prefix, and a decoder can check "is what I have read so far a code of length k" with one
//! lookup of the packed word.

use std::fmt::{Display, Formatter};

use crate::error::{HcError, Result};

/// Longest code a packed word can hold.
pub const MAX_CODE_LEN: u8 = 56;
/// Mask for the bit field of a packed word.
pub const CODE_MASK: u64 = (1 << MAX_CODE_LEN) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    len: u8,
    /// Left-justified in the 56 bit field.
    bits: u64,
}

impl Code {
    /// Build a code from its `len` low order bits in `raw` (right-justified).
    pub fn from_raw(raw: u64, len: u8) -> Result<Self> {
        if len == 0 || len > MAX_CODE_LEN {
            return Err(HcError::Capacity(format!(
                "code length {} is outside 1..={}",
                len, MAX_CODE_LEN
            )));
        }
        debug_assert!(raw >> len == 0, "code bits {:#x} wider than {} bits", raw, len);
        let raw = raw & (CODE_MASK >> (MAX_CODE_LEN - len));
        Ok(Self {
            len,
            bits: raw << (MAX_CODE_LEN - len),
        })
    }

    /// Unpack a stored code word, rejecting anything a valid encoder could not have written.
    pub fn from_packed(word: u64) -> Result<Self> {
        let len = (word >> MAX_CODE_LEN) as u8;
        let bits = word & CODE_MASK;
        if len == 0 || len > MAX_CODE_LEN {
            return Err(HcError::Format(format!(
                "packed code {:#018x} has length {}",
                word, len
            )));
        }
        if bits & (CODE_MASK >> len) != 0 {
            return Err(HcError::Format(format!(
                "packed code {:#018x} has bits past its length",
                word
            )));
        }
        Ok(Self { len, bits })
    }

    pub fn packed(&self) -> u64 {
        (self.len as u64) << MAX_CODE_LEN | self.bits
    }

    pub fn len(&self) -> u8 {
        self.len
    }

    /// Right-justified bits, ready to be shifted onto a bit queue.
    pub fn raw(&self) -> u64 {
        self.bits >> (MAX_CODE_LEN - self.len)
    }

    /// True if `self` is a proper or equal bit prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && other.raw() >> (other.len - self.len) == self.raw()
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:0width$b}", self.raw(), width = self.len as usize)
    }
}
