use std::io::{Read, Write};

use log::{info, warn};

use crate::error::Result;
use crate::tools::options::Backend;

use super::block::read_block;
use super::decompress_block::decompress_block;
use super::header::read_header;

/// What one decompression call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompressStats {
    pub width: usize,
    /// Original size recorded in the header. Informational only.
    pub declared_bytes: u64,
    pub decoded_bytes: u64,
    pub blocks: usize,
}

/// Decompress a stream written by `compress` into `sink`.
pub fn decompress<R: Read, W: Write>(source: &mut R, sink: &mut W) -> Result<DecompressStats> {
    decompress_with(source, sink, Backend::Auto)
}

/// As `decompress`, choosing the decode side symbol map backend.
pub fn decompress_with<R: Read, W: Write>(
    source: &mut R,
    sink: &mut W,
    backend: Backend,
) -> Result<DecompressStats> {
    // The header is the whole code table; no counting or tree building on this side.
    let header = read_header(source, backend)?;
    let table = header.table;
    info!(
        "Found a valid header: width {}, {} codes, {} bytes declared.",
        table.width(),
        table.len(),
        header.declared_size
    );

    let mut decoded_bytes = 0_u64;
    let mut blocks = 0;
    while let Some((frame, payload)) = read_block(source)? {
        blocks += 1;
        let out = decompress_block(&table, &payload, frame.original_len as usize, blocks)?;
        sink.write_all(&out)?;
        decoded_bytes += out.len() as u64;
    }
    sink.flush()?;

    if decoded_bytes != header.declared_size {
        warn!(
            "Header declared {} bytes but {} were decoded.",
            header.declared_size, decoded_bytes
        );
    }
    info!("Decoded {} bytes from {} blocks.", decoded_bytes, blocks);

    Ok(DecompressStats {
        width: table.width(),
        declared_bytes: header.declared_size,
        decoded_bytes,
        blocks,
    })
}

/// Decompress a byte slice held in memory.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decompress(&mut &data[..], &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::HcError;

    const SCENARIO_A: [u8; 43] = [
        0, 0, 0, 34, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 4, //
        0x01, 0x80, 0, 0, 0, 0, 0, 0, 0x41, //
        0x01, 0x00, 0, 0, 0, 0, 0, 0, 0x42, //
        0, 0, 0, 1, 0, 0, 0, 4, 0b1011_0000,
    ];

    #[test]
    fn scenario_a_test() {
        let mut out = Vec::new();
        let stats = decompress(&mut &SCENARIO_A[..], &mut out).unwrap();
        assert_eq!(out, [0x41, 0x42, 0x41, 0x41]);
        assert_eq!(
            stats,
            DecompressStats {
                width: 1,
                declared_bytes: 4,
                decoded_bytes: 4,
                blocks: 1
            }
        );
    }

    #[test]
    fn declared_size_is_informational_test() {
        let mut data = SCENARIO_A;
        data[15] = 99;
        assert_eq!(decompress_bytes(&data).unwrap(), [0x41, 0x42, 0x41, 0x41]);
    }

    #[test]
    fn truncated_stream_test() {
        // Cut inside the final payload, inside the frame, and inside the header.
        for cut in [42, 38, 20] {
            assert!(matches!(
                decompress_bytes(&SCENARIO_A[..cut]),
                Err(HcError::Format(_))
            ));
        }
        assert!(decompress_bytes(&[]).is_err());
    }

    #[test]
    fn oversized_block_length_test() {
        let mut data = SCENARIO_A[..34].to_vec();
        data.extend_from_slice(&[0, 0, 0, 1, 0xff, 0xff, 0xff, 0xff, 0]);
        assert!(matches!(decompress_bytes(&data), Err(HcError::Format(_))));
    }

    #[test]
    fn header_only_test() {
        assert!(decompress_bytes(&SCENARIO_A[..34]).unwrap().is_empty());
    }
}
