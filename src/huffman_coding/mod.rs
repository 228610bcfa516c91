//! The huffman module turns symbol counts into codes.
//!
//! Classic two pass static coding: one table for the whole input, built once from the counts
//! and carried in the header. Codes are limited to 56 bits so that a code and its length pack
//! into one u64. An input whose tree would go deeper is refused, never truncated.

pub mod code;
pub mod code_table;
pub mod huffman;
