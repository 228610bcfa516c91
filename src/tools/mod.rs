//! The tools module provides the helpers around the codec.
//!
//! The tools are:
//! - chunker: Split bytes into fixed-width symbols, zero padding the tail.
//! - cli: Command line interface for the hc binary.
//! - data_in: Fill a chunk buffer from any reader.
//! - freq_count: Symbol frequency table.
//! - options: Codec options and limits.
//! - symbol_map: Dense and sparse symbol keyed maps.
//!
pub mod chunker;
pub mod cli;
pub mod data_in;
pub mod freq_count;
pub mod options;
pub mod symbol_map;
