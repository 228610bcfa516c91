use std::io;

use thiserror::Error;

/// Errors returned by the compressor and decompressor.
#[derive(Debug, Error)]
pub enum HcError {
    /// A derived code is longer than the 56 bits a packed code word can carry.
    #[error("capacity exceeded: {0}")]
    Capacity(String),
    /// Truncated or self-inconsistent header or block framing.
    #[error("invalid compressed data: {0}")]
    Format(String),
    /// A symbol seen while encoding has no code. The frequency pass and the
    /// encode pass did not see the same bytes.
    #[error("no code for symbol: {0}")]
    LookupMiss(String),
    /// Options that cannot describe a valid session.
    #[error("invalid options: {0}")]
    Config(String),
    /// Source or sink failure, passed through unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, HcError>;
