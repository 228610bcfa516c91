//! Symbol keyed maps used by the frequency table and the encode side of the code table.
//!
//! Two backends sit behind one interface. The dense backend is a flat array indexed by the
//! symbol bytes read as a big-endian number, so it only exists for widths up to
//! `DENSE_MAX_WIDTH`. The sparse backend hashes the symbol bytes and works for any width.
//! The choice changes memory use and speed, never output.

use log::debug;
use rustc_hash::FxHashMap;

use crate::error::{HcError, Result};
use crate::tools::options::Backend;

/// Widest symbol the dense backend will index (2^16 slots).
pub const DENSE_MAX_WIDTH: usize = 2;

/// Shared capability of both backends.
pub trait SymbolMap<V> {
    fn get(&self, symbol: &[u8]) -> Option<&V>;
    fn get_mut(&mut self, symbol: &[u8]) -> Option<&mut V>;
    fn put(&mut self, symbol: &[u8], value: V);
    /// All present symbols in ascending byte order.
    fn keys(&self) -> Vec<Vec<u8>>;
    fn len(&self) -> usize;

    fn contains(&self, symbol: &[u8]) -> bool {
        self.get(symbol).is_some()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Flat array backend.
#[derive(Debug, Clone)]
pub struct DenseMap<V> {
    width: usize,
    slots: Vec<Option<V>>,
    used: usize,
}

impl<V> DenseMap<V> {
    pub fn new(width: usize) -> Result<Self> {
        if width == 0 || width > DENSE_MAX_WIDTH {
            return Err(HcError::Config(format!(
                "dense backend supports widths 1..={}, not {}",
                DENSE_MAX_WIDTH, width
            )));
        }
        let mut slots = Vec::new();
        slots.resize_with(1 << (8 * width), || None);
        Ok(Self {
            width,
            slots,
            used: 0,
        })
    }

    /// Big-endian index of the symbol, or None if it is the wrong width.
    fn index(&self, symbol: &[u8]) -> Option<usize> {
        if symbol.len() != self.width {
            return None;
        }
        Some(symbol.iter().fold(0_usize, |acc, &b| acc << 8 | b as usize))
    }

    fn symbol_at(&self, mut idx: usize) -> Vec<u8> {
        let mut sym = vec![0_u8; self.width];
        for byte in sym.iter_mut().rev() {
            *byte = idx as u8;
            idx >>= 8;
        }
        sym
    }
}

impl<V> SymbolMap<V> for DenseMap<V> {
    fn get(&self, symbol: &[u8]) -> Option<&V> {
        self.index(symbol).and_then(|i| self.slots[i].as_ref())
    }

    fn get_mut(&mut self, symbol: &[u8]) -> Option<&mut V> {
        match self.index(symbol) {
            Some(i) => self.slots[i].as_mut(),
            None => None,
        }
    }

    fn put(&mut self, symbol: &[u8], value: V) {
        debug_assert_eq!(symbol.len(), self.width, "symbol width mismatch");
        if let Some(i) = self.index(symbol) {
            if self.slots[i].replace(value).is_none() {
                self.used += 1;
            }
        }
    }

    fn keys(&self) -> Vec<Vec<u8>> {
        // Index order is already byte order for a fixed width.
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| self.symbol_at(i))
            .collect()
    }

    fn len(&self) -> usize {
        self.used
    }
}

/// Hashed backend.
#[derive(Debug, Clone, Default)]
pub struct SparseMap<V> {
    map: FxHashMap<Box<[u8]>, V>,
}

impl<V> SparseMap<V> {
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }
}

impl<V> SymbolMap<V> for SparseMap<V> {
    fn get(&self, symbol: &[u8]) -> Option<&V> {
        self.map.get(symbol)
    }

    fn get_mut(&mut self, symbol: &[u8]) -> Option<&mut V> {
        self.map.get_mut(symbol)
    }

    fn put(&mut self, symbol: &[u8], value: V) {
        self.map.insert(symbol.into(), value);
    }

    fn keys(&self) -> Vec<Vec<u8>> {
        let mut keys: Vec<Vec<u8>> = self.map.keys().map(|k| k.to_vec()).collect();
        keys.sort_unstable();
        keys
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

/// The backend picked for a session.
#[derive(Debug, Clone)]
pub enum SymbolStore<V> {
    Dense(DenseMap<V>),
    Sparse(SparseMap<V>),
}

impl<V> SymbolStore<V> {
    /// Pick a backend for this width. `Auto` takes the dense array whenever it fits.
    pub fn new(width: usize, backend: Backend) -> Result<Self> {
        let store = match backend {
            Backend::Dense => SymbolStore::Dense(DenseMap::new(width)?),
            Backend::Sparse => SymbolStore::Sparse(SparseMap::new()),
            Backend::Auto if width <= DENSE_MAX_WIDTH => SymbolStore::Dense(DenseMap::new(width)?),
            Backend::Auto => SymbolStore::Sparse(SparseMap::new()),
        };
        debug!(
            "Using {} symbol map for width {}.",
            if store.is_dense() { "dense" } else { "sparse" },
            width
        );
        Ok(store)
    }

    pub fn is_dense(&self) -> bool {
        matches!(self, SymbolStore::Dense(_))
    }
}

impl<V> SymbolMap<V> for SymbolStore<V> {
    fn get(&self, symbol: &[u8]) -> Option<&V> {
        match self {
            SymbolStore::Dense(m) => m.get(symbol),
            SymbolStore::Sparse(m) => m.get(symbol),
        }
    }

    fn get_mut(&mut self, symbol: &[u8]) -> Option<&mut V> {
        match self {
            SymbolStore::Dense(m) => m.get_mut(symbol),
            SymbolStore::Sparse(m) => m.get_mut(symbol),
        }
    }

    fn put(&mut self, symbol: &[u8], value: V) {
        match self {
            SymbolStore::Dense(m) => m.put(symbol, value),
            SymbolStore::Sparse(m) => m.put(symbol, value),
        }
    }

    fn keys(&self) -> Vec<Vec<u8>> {
        match self {
            SymbolStore::Dense(m) => m.keys(),
            SymbolStore::Sparse(m) => m.keys(),
        }
    }

    fn len(&self) -> usize {
        match self {
            SymbolStore::Dense(m) => m.len(),
            SymbolStore::Sparse(m) => m.len(),
        }
    }
}
