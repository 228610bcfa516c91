//! The compression module drives both directions of the codec.
//!
//! Compression happens in the following steps:
//! - Frequency count: split the input into fixed-width symbols and count each one.
//! - Huffman tree: merge the lightest nodes until one root remains.
//! - Code table: walk the tree to give every symbol a prefix free code.
//! - Header: write the code table so the decoder never needs the counts.
//! - Blocks: read the input again, chunk by chunk, and pack each chunk's codes into a block that
//!   carries its own compressed and original byte lengths.
//!
//! Decompression reads the header back into a code table, then decodes block after block until
//! the input runs out, trimming each block to its original length.
//!
//! Both directions are single threaded and stream: memory follows the chunk size, not the
//! input size.

pub mod block;
pub mod compress;
pub mod compress_block;
pub mod decompress;
pub mod decompress_block;
pub mod header;
