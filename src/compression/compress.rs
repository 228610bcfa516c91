use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use log::{debug, info};

use crate::error::{HcError, Result};
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::huffman::build_tree;
use crate::tools::data_in::read_chunk;
use crate::tools::freq_count::FreqTable;
use crate::tools::options::CodecOpts;

use super::block::write_block;
use super::compress_block::compress_block;
use super::header::write_header;

/// What one compression call did. Ratio and timing reports are built from this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressStats {
    pub width: usize,
    pub original_bytes: u64,
    pub header_bytes: u64,
    /// Everything written, header and block frames included.
    pub compressed_bytes: u64,
    pub blocks: usize,
    pub distinct_symbols: usize,
    pub longest_code: u8,
}

impl CompressStats {
    /// Compressed size over original size (0 for empty input).
    pub fn ratio(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        self.compressed_bytes as f64 / self.original_bytes as f64
    }
}

/*
    Compression takes two passes over the source.

    The first counts symbols chunk by chunk, then builds the tree and the code table. The
    header goes out before any block, so a tree too deep to pack fails here with nothing but
    (at most) a partial header written.

    The second pass rewinds the source and reads the same chunks again, coding each one into
    a framed block. Both passes use read_chunk, so chunk edges (and the one padded symbol at
    the very end) line up.
*/

/// Compress everything from the current position of `source` to its end into `sink`.
pub fn compress<R, W>(source: &mut R, sink: &mut W, opts: &CodecOpts) -> Result<CompressStats>
where
    R: Read + Seek,
    W: Write,
{
    let chunk_size = opts.validate()?;
    let width = opts.width;
    let start = source.stream_position()?;
    let mut buf = vec![0_u8; chunk_size];

    //----- Pass one: frequencies
    let mut freqs = FreqTable::new(width, opts.backend)?;
    let mut original_bytes = 0_u64;
    loop {
        let n = read_chunk(source, &mut buf)?;
        if n == 0 {
            break;
        }
        freqs.count_bytes(&buf[..n]);
        original_bytes += n as u64;
    }
    info!(
        "Counted {} bytes: {} symbols of width {}, {} distinct.",
        original_bytes,
        freqs.total(),
        width,
        freqs.len()
    );

    //----- Tree and code table
    let table = match build_tree(freqs.weights()) {
        Some(root) => CodeTable::from_tree(&root, width, opts.backend)?,
        None => CodeTable::from_entries(width, opts.backend, Vec::new())?,
    };
    table.dump();
    debug!(
        "Coded size will be {} bits over {} symbols.",
        table.weighted_length(&freqs),
        freqs.total()
    );
    // Only the code table crosses into the second pass.
    drop(freqs);

    let header_bytes = write_header(sink, &table, original_bytes)? as u64;

    //----- Pass two: blocks
    source.seek(SeekFrom::Start(start))?;
    let mut compressed_bytes = header_bytes;
    let mut seen = 0_u64;
    let mut blocks = 0;
    loop {
        let n = read_chunk(source, &mut buf)?;
        if n == 0 {
            break;
        }
        seen += n as u64;
        if seen > original_bytes {
            break;
        }
        blocks += 1;
        let payload = compress_block(&table, &buf[..n], blocks)?;
        compressed_bytes += write_block(sink, &payload, n)? as u64;
    }
    if seen != original_bytes {
        return Err(HcError::LookupMiss(format!(
            "source gave {} bytes on the second pass, {} on the first",
            seen, original_bytes
        )));
    }
    sink.flush()?;

    let stats = CompressStats {
        width,
        original_bytes,
        header_bytes,
        compressed_bytes,
        blocks,
        distinct_symbols: table.len(),
        longest_code: table.max_len(),
    };
    info!(
        "Compressed {} bytes into {} ({} blocks, ratio {:.4}).",
        stats.original_bytes,
        stats.compressed_bytes,
        stats.blocks,
        stats.ratio()
    );
    Ok(stats)
}

/// Compress a byte slice held in memory.
pub fn compress_bytes(data: &[u8], opts: &CodecOpts) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    compress(&mut Cursor::new(data), &mut out, opts)?;
    Ok(out)
}
