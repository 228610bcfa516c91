use log::{debug, trace};

use crate::bitstream::bitpacker::BitPacker;
use crate::error::Result;
use crate::huffman_coding::code_table::CodeTable;
use crate::tools::chunker::symbols;

/// Called by compress, this codes one chunk of input and returns the packed payload.
/// The final byte is flushed as is; its spare low bits are zero and mean nothing.
pub fn compress_block(table: &CodeTable, data: &[u8], seq: usize) -> Result<Vec<u8>> {
    let mut bw = BitPacker::new(data.len());
    for symbol in symbols(data, table.width()) {
        let code = table.encode(&symbol)?;
        bw.out_code(&code);
    }
    trace!("Block {} coded, bit stream at {}.", seq, bw.loc());
    bw.flush();
    debug!(
        "Block {}: {} bytes in, {} bytes out ({} bits in the last byte).",
        seq,
        data.len(),
        bw.output.len(),
        if bw.last_bits == 0 { 8 } else { bw.last_bits }
    );
    Ok(bw.output)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::HcError;
    use crate::huffman_coding::code::Code;
    use crate::tools::options::Backend;

    fn table(entries: &[(u64, u8, &[u8])], width: usize) -> CodeTable {
        let entries = entries
            .iter()
            .map(|&(raw, len, sym)| (Code::from_raw(raw, len).unwrap(), sym.to_vec()))
            .collect();
        CodeTable::from_entries(width, Backend::Auto, entries).unwrap()
    }

    #[test]
    fn scenario_a_test() {
        // A = 1, B = 0: ABAA -> 1011 then padding
        let t = table(&[(1, 1, &b"A"[..]), (0, 1, &b"B"[..])], 1);
        assert_eq!(compress_block(&t, b"ABAA", 1).unwrap(), [0b1011_0000]);
    }

    #[test]
    fn padded_symbol_test() {
        let t = table(&[(0, 1, &[0x01, 0x02][..]), (1, 1, &[0x03, 0x00][..])], 2);
        assert_eq!(compress_block(&t, &[0x01, 0x02, 0x03], 1).unwrap(), [0b0100_0000]);
    }

    #[test]
    fn empty_block_test() {
        let t = table(&[(0, 1, &b"A"[..])], 1);
        assert!(compress_block(&t, b"", 1).unwrap().is_empty());
    }

    #[test]
    fn lookup_miss_test() {
        let t = table(&[(0, 1, &b"A"[..])], 1);
        assert!(matches!(compress_block(&t, b"AAB", 1), Err(HcError::LookupMiss(_))));
    }
}
