//! The container header. Big-endian throughout:
//!
//! ```text
//! u32 header length in bytes, counting these four
//! u32 symbol width N
//! u64 declared original size (informational)
//! repeated to the end of the header:
//!     u64 packed code word
//!     u8[N] symbol
//! ```
//!
//! The header alone rebuilds the decode table. Entries are written in ascending symbol order.

use std::io::{self, Read, Write};

use log::{debug, error};

use crate::error::{HcError, Result};
use crate::huffman_coding::code::Code;
use crate::huffman_coding::code_table::CodeTable;
use crate::tools::options::Backend;

/// Length of the fixed part of the header.
pub const HEADER_FIXED_LEN: usize = 16;

/// A parsed header.
#[derive(Debug, Clone)]
pub struct Header {
    pub table: CodeTable,
    pub declared_size: u64,
    /// Bytes taken on the stream.
    pub byte_len: usize,
}

/// Serialize the code table (only the codes in use) into a header.
pub fn serialize_header(table: &CodeTable, declared_size: u64) -> Result<Vec<u8>> {
    let width = table.width();
    let total = HEADER_FIXED_LEN + table.len() * (8 + width);
    let header_len = u32::try_from(total)
        .map_err(|_| HcError::Capacity(format!("header of {} bytes does not fit a u32", total)))?;
    let width_field = u32::try_from(width)
        .map_err(|_| HcError::Capacity(format!("symbol width {} does not fit a u32", width)))?;

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&header_len.to_be_bytes());
    out.extend_from_slice(&width_field.to_be_bytes());
    out.extend_from_slice(&declared_size.to_be_bytes());
    for (code, symbol) in table.entries() {
        out.extend_from_slice(&code.packed().to_be_bytes());
        out.extend_from_slice(symbol);
    }
    debug!(
        "Header is {} bytes: width {}, {} codes, declared size {}.",
        out.len(),
        width,
        table.len(),
        declared_size
    );
    Ok(out)
}

/// Parse a complete header held in memory.
pub fn parse_header(bytes: &[u8], backend: Backend) -> Result<Header> {
    if bytes.len() < HEADER_FIXED_LEN {
        return Err(format_error(format!(
            "header is {} bytes, needs at least {}",
            bytes.len(),
            HEADER_FIXED_LEN
        )));
    }
    let header_len = be_u32(&bytes[0..4]) as usize;
    if header_len != bytes.len() {
        return Err(format_error(format!(
            "header claims {} bytes but {} were given",
            header_len,
            bytes.len()
        )));
    }
    let width = be_u32(&bytes[4..8]) as usize;
    if width == 0 {
        return Err(format_error("header has a symbol width of zero".to_string()));
    }
    let declared_size = be_u64(&bytes[8..16]);

    let body = &bytes[HEADER_FIXED_LEN..];
    let entry_len = 8 + width;
    if body.len() % entry_len != 0 {
        return Err(format_error(format!(
            "{} header bytes do not divide into {} byte entries",
            body.len(),
            entry_len
        )));
    }
    let entries = body
        .chunks_exact(entry_len)
        .map(|entry| -> Result<(Code, Vec<u8>)> {
            Ok((Code::from_packed(be_u64(&entry[..8]))?, entry[8..].to_vec()))
        })
        .collect::<Result<Vec<_>>>()?;

    let table = CodeTable::from_entries(width, backend, entries)?;
    debug!(
        "Read header: width {}, {} codes, declared size {}.",
        width,
        table.len(),
        declared_size
    );
    Ok(Header {
        table,
        declared_size,
        byte_len: header_len,
    })
}

/// Read and parse the header from the front of a stream.
pub fn read_header<R: Read>(source: &mut R, backend: Backend) -> Result<Header> {
    let mut len_field = [0_u8; 4];
    read_exact_or_format(source, &mut len_field, "header length")?;
    let header_len = u32::from_be_bytes(len_field) as usize;
    if header_len < HEADER_FIXED_LEN {
        return Err(format_error(format!(
            "header length {} is shorter than {}",
            header_len, HEADER_FIXED_LEN
        )));
    }
    // Never allocate on the word of a length field; read what is really there.
    let mut bytes = len_field.to_vec();
    source
        .by_ref()
        .take((header_len - 4) as u64)
        .read_to_end(&mut bytes)?;
    if bytes.len() != header_len {
        return Err(format_error(format!(
            "header truncated: {} of {} bytes",
            bytes.len(),
            header_len
        )));
    }
    parse_header(&bytes, backend)
}

/// read_exact, with a short read reported as a format error.
pub(crate) fn read_exact_or_format<R: Read + ?Sized>(
    source: &mut R,
    buf: &mut [u8],
    what: &str,
) -> Result<()> {
    match source.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            Err(format_error(format!("unexpected end of input reading {}", what)))
        }
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn format_error(msg: String) -> HcError {
    error!("Fatal error: {}", msg);
    HcError::Format(msg)
}

fn be_u32(b: &[u8]) -> u32 {
    u32::from_be_bytes([b[0], b[1], b[2], b[3]])
}

fn be_u64(b: &[u8]) -> u64 {
    u64::from_be_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]])
}

/// Write the header for a table.
pub fn write_header<W: Write + ?Sized>(
    sink: &mut W,
    table: &CodeTable,
    declared_size: u64,
) -> Result<usize> {
    let bytes = serialize_header(table, declared_size)?;
    sink.write_all(&bytes)?;
    Ok(bytes.len())
}
