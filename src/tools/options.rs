/// Codec options - structs and impls used by the library and filled in by the cli.
use std::{fmt::Display, fmt::Formatter};

use crate::error::{HcError, Result};

/// Widest symbol accepted for compression.
pub const MAX_WIDTH: usize = 255;
/// Default read size for each block (128k).
pub const DEFAULT_CHUNK_SIZE: usize = 1 << 17;
/// Largest chunk we will frame. Keeps both u32 block length fields in range even when every
/// input byte costs seven output bytes.
pub const MAX_CHUNK_SIZE: usize = 64 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ArgEnum)]
/// Which symbol map backend to use
pub enum Backend {
    /// Dense for widths up to 2, sparse above
    Auto,
    /// Flat array indexed by the symbol bytes
    Dense,
    /// Hash map keyed by the symbol bytes
    Sparse,
}
impl Display for Backend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Matches the cli value names.
        let name = match self {
            Backend::Auto => "auto",
            Backend::Dense => "dense",
            Backend::Sparse => "sparse",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone)]
/// Defines all settings of one compression session
pub struct CodecOpts {
    /// Symbol width N in bytes
    pub width: usize,
    /// Bytes read (and framed) per block
    pub chunk_size: usize,
    /// Symbol map backend
    pub backend: Backend,
}

impl CodecOpts {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            chunk_size: DEFAULT_CHUNK_SIZE,
            backend: Backend::Auto,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Check the options and return the chunk size actually used: rounded down to a multiple
    /// of the width so that only the final chunk of the input can hold a padded symbol.
    pub fn validate(&self) -> Result<usize> {
        if self.width == 0 || self.width > MAX_WIDTH {
            return Err(HcError::Config(format!(
                "symbol width must be 1..={}, got {}",
                MAX_WIDTH, self.width
            )));
        }
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(HcError::Config(format!(
                "chunk size must be 1..={}, got {}",
                MAX_CHUNK_SIZE, self.chunk_size
            )));
        }
        if self.backend == Backend::Dense && self.width > crate::tools::symbol_map::DENSE_MAX_WIDTH
        {
            return Err(HcError::Config(format!(
                "dense backend cannot index {} byte symbols",
                self.width
            )));
        }
        Ok((self.chunk_size / self.width).max(1) * self.width)
    }
}

impl Default for CodecOpts {
    fn default() -> Self {
        Self::new(1)
    }
}
