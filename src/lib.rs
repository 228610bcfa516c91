//! Static huffman coding over fixed-width symbols.
//!
//! Version 0.1.0
//!
//! A symbol is a run of N bytes (N chosen per compression, recorded in the output). The whole
//! input is counted once, one huffman table is built, and the input is then coded chunk by
//! chunk into self-describing blocks. Wider symbols can capture structure a byte oriented coder
//! misses, at the price of a larger table in the header.
//!
//! Basic usage from code:
//!
//! ```
//! use symhuff::{compress_bytes, decompress_bytes, CodecOpts};
//!
//! let data = b"abababababababab-abababab";
//! let packed = compress_bytes(data, &CodecOpts::new(2)).unwrap();
//! assert_eq!(decompress_bytes(&packed).unwrap(), data);
//! ```
//!
//! And from the command line:
//!
//! `$> hc -z test.txt -n 2`
//!
//! This will compress the file and create the file test.txt.2.hc.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

#[cfg(test)]
mod tests;

pub use compression::compress::{compress, compress_bytes, CompressStats};
pub use compression::decompress::{decompress, decompress_bytes, decompress_with, DecompressStats};
pub use error::{HcError, Result};
pub use tools::options::{Backend, CodecOpts};
