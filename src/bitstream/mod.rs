//! The bitstream module is the bit level I/O for block payloads.
//!
//! The packer appends codes most significant bit first and pads the last byte with zeros. The
//! reader hands those bits back one at a time. Neither knows where a block's real data stops;
//! the block's original length decides that.
pub mod bitpacker;
pub mod bitreader;
