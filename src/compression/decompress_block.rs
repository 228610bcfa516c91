use log::{debug, trace};

use crate::bitstream::bitreader::BitReader;
use crate::error::Result;
use crate::huffman_coding::code_table::CodeTable;

use super::header::format_error;

/// Decode one block payload back to exactly `original_len` bytes.
///
/// Bits are read one at a time into a candidate code. After each bit the candidate is looked
/// up; since the codes are prefix free a hit is the only possible symbol. Bytes of the last
/// symbol past `original_len` are its zero padding and are dropped, as are any bits left
/// over after that.
pub fn decompress_block(
    table: &CodeTable,
    payload: &[u8],
    original_len: usize,
    seq: usize,
) -> Result<Vec<u8>> {
    if original_len == 0 {
        return Ok(Vec::new());
    }
    // Every code is at least one bit and yields one symbol.
    let most = payload.len().saturating_mul(8).saturating_mul(table.width());
    if original_len > most {
        return Err(format_error(format!(
            "block {} claims {} bytes but {} payload bytes can hold at most {}",
            seq,
            original_len,
            payload.len(),
            most
        )));
    }
    let mut out = Vec::with_capacity(original_len);
    if table.is_empty() {
        return Err(format_error(format!(
            "block {} holds {} bytes but the header has no codes",
            seq, original_len
        )));
    }

    let max_len = table.max_len();
    let mut br = BitReader::new(payload);
    // Candidate code: `len` bits, right-justified in `raw`.
    let mut len: u8 = 0;
    let mut raw: u64 = 0;

    while out.len() < original_len {
        let bit = match br.bit() {
            Some(bit) => bit,
            None => {
                return Err(format_error(format!(
                    "block {} ran out of bits after {} of {} bytes",
                    seq,
                    out.len(),
                    original_len
                )))
            }
        };
        raw = raw << 1 | bit;
        len += 1;

        if let Some(symbol) = table.decode(len, raw) {
            let keep = symbol.len().min(original_len - out.len());
            out.extend_from_slice(&symbol[..keep]);
            len = 0;
            raw = 0;
        } else if len >= max_len {
            return Err(format_error(format!(
                "block {} has no code matching {} bits at {}",
                seq,
                len,
                br.loc()
            )));
        }
    }

    trace!("Block {} decoded, {} bits unused.", seq, br.bits_left());
    debug!(
        "Block {}: {} bytes in, {} bytes out.",
        seq,
        payload.len(),
        out.len()
    );
    Ok(out)
}
