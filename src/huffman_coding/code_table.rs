//! The two way symbol <-> code mapping shared by the encoder, the decoder and the header.
//!
//! The encode side is a symbol map (dense or sparse, same as the frequency table). The decode
//! side is keyed by code: a flat array indexed by `(1 << len) | bits` while every code is short
//! enough, otherwise a hash map keyed by the packed code word.

use log::{debug, log_enabled, trace, Level};
use rustc_hash::FxHashMap;

use super::code::{Code, MAX_CODE_LEN};
use super::huffman::Node;
use crate::error::{HcError, Result};
use crate::tools::freq_count::FreqTable;
use crate::tools::options::Backend;
use crate::tools::symbol_map::{SymbolMap, SymbolStore};

/// Longest code the dense decode index will hold (2^17 slots).
pub const DENSE_CODE_LEN: u8 = 16;
const EMPTY: u32 = u32::MAX;

/// Code -> entry number.
#[derive(Debug, Clone)]
enum CodeIndex {
    Dense(Vec<u32>),
    Sparse(FxHashMap<u64, u32>),
}

impl CodeIndex {
    fn new(max_len: u8, backend: Backend) -> Self {
        if backend != Backend::Sparse && max_len <= DENSE_CODE_LEN {
            CodeIndex::Dense(vec![EMPTY; 2 << max_len])
        } else {
            CodeIndex::Sparse(FxHashMap::default())
        }
    }

    /// Insert, returning false if the code was already taken.
    fn insert(&mut self, code: &Code, entry: u32) -> bool {
        match self {
            CodeIndex::Dense(slots) => {
                let slot = &mut slots[(1_usize << code.len()) | code.raw() as usize];
                let fresh = *slot == EMPTY;
                *slot = entry;
                fresh
            }
            CodeIndex::Sparse(map) => map.insert(code.packed(), entry).is_none(),
        }
    }

    fn get(&self, len: u8, raw: u64) -> Option<usize> {
        match self {
            CodeIndex::Dense(slots) => {
                let idx = (1_usize << len) | raw as usize;
                match slots.get(idx) {
                    Some(&entry) if entry != EMPTY => Some(entry as usize),
                    _ => None,
                }
            }
            CodeIndex::Sparse(map) => {
                let packed = (len as u64) << MAX_CODE_LEN | raw << (MAX_CODE_LEN - len);
                map.get(&packed).map(|&entry| entry as usize)
            }
        }
    }
}

/// Bidirectional symbol/code table for one session.
#[derive(Debug, Clone)]
pub struct CodeTable {
    width: usize,
    encode: SymbolStore<Code>,
    /// Entry number -> (code, symbol), in ascending symbol order.
    entries: Vec<(Code, Vec<u8>)>,
    index: CodeIndex,
    max_len: u8,
}

impl CodeTable {
    /// Walk the tree handing out codes: left appends a 0, right appends a 1.
    /// A lone leaf gets the one bit code `0`.
    pub fn from_tree(root: &Node, width: usize, backend: Backend) -> Result<Self> {
        let mut entries = Vec::new();
        match root {
            Node::Leaf { symbol, .. } => entries.push((Code::from_raw(0, 1)?, symbol.clone())),
            Node::Internal { .. } => assign_codes(root, 0, 0, &mut entries)?,
        }
        Self::from_entries(width, backend, entries)
    }

    /// Build the table from a list of codes, as read from a header. Rejects anything that
    /// would make decoding ambiguous.
    pub fn from_entries(
        width: usize,
        backend: Backend,
        mut entries: Vec<(Code, Vec<u8>)>,
    ) -> Result<Self> {
        entries.sort_unstable_by(|a, b| a.1.cmp(&b.1));
        let max_len = entries.iter().map(|(code, _)| code.len()).max().unwrap_or(0);
        let mut encode = SymbolStore::new(width, backend)?;
        let mut index = CodeIndex::new(max_len, backend);

        for (n, (code, symbol)) in entries.iter().enumerate() {
            if symbol.len() != width {
                return Err(HcError::Format(format!(
                    "symbol of {} bytes in a table of width {}",
                    symbol.len(),
                    width
                )));
            }
            if encode.contains(symbol) {
                return Err(HcError::Format(format!("symbol {:02x?} listed twice", symbol)));
            }
            if !index.insert(code, n as u32) {
                return Err(HcError::Format(format!("code {} listed twice", code)));
            }
            encode.put(symbol, *code);
        }

        // No code may be the prefix of another.
        for (code, _) in entries.iter() {
            for len in 1..code.len() {
                if index.get(len, code.raw() >> (code.len() - len)).is_some() {
                    return Err(HcError::Format(format!(
                        "code {} has another code as its prefix",
                        code
                    )));
                }
            }
        }

        debug!(
            "Code table: {} symbols of width {}, longest code {} bits, {} decode index.",
            entries.len(),
            width,
            max_len,
            match index {
                CodeIndex::Dense(_) => "dense",
                CodeIndex::Sparse(_) => "sparse",
            }
        );

        Ok(Self {
            width,
            encode,
            entries,
            index,
            max_len,
        })
    }

    /// Code for a symbol. A miss means the encode pass saw bytes the frequency pass did not.
    pub fn encode(&self, symbol: &[u8]) -> Result<Code> {
        self.encode
            .get(symbol)
            .copied()
            .ok_or_else(|| HcError::LookupMiss(format!("{:02x?}", symbol)))
    }

    /// Symbol whose code is the `len` low bits of `raw`, if there is one.
    pub fn decode(&self, len: u8, raw: u64) -> Option<&[u8]> {
        self.index
            .get(len, raw)
            .map(|entry| self.entries[entry].1.as_slice())
    }

    /// All (code, symbol) pairs in ascending symbol order.
    pub fn entries(&self) -> &[(Code, Vec<u8>)] {
        &self.entries
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length of the longest code (0 for an empty table).
    pub fn max_len(&self) -> u8 {
        self.max_len
    }

    /// Total coded bits for the counted input: sum of count * code length.
    pub fn weighted_length(&self, freqs: &FreqTable) -> u64 {
        self.entries
            .iter()
            .map(|(code, symbol)| freqs.get(symbol) * code.len() as u64)
            .sum()
    }

    /// Trace every code in the table.
    pub fn dump(&self) {
        if !log_enabled!(Level::Trace) {
            return;
        }
        for (code, symbol) in &self.entries {
            trace!("{:02x?} -> {:>2} {} ({:#018x})", symbol, code.len(), code, code.packed());
        }
    }
}

/// Recursively walk the tree. Depth is the code length; anything past 56 bits cannot be packed.
fn assign_codes(node: &Node, raw: u64, depth: u8, out: &mut Vec<(Code, Vec<u8>)>) -> Result<()> {
    match node {
        Node::Leaf { symbol, .. } => {
            out.push((Code::from_raw(raw, depth)?, symbol.clone()));
        }
        Node::Internal { left, right, .. } => {
            if depth >= MAX_CODE_LEN {
                return Err(HcError::Capacity(format!(
                    "huffman tree is deeper than {} bits",
                    MAX_CODE_LEN
                )));
            }
            assign_codes(left, raw << 1, depth + 1, out)?;
            assign_codes(right, raw << 1 | 1, depth + 1, out)?;
        }
    }
    Ok(())
}
