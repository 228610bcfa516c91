use std::io::{Read, Write};

use crate::error::{HcError, Result};
use crate::tools::data_in::read_chunk;

use super::header::format_error;

/// Bytes in front of every block: compressed length, then original length (both u32 BE).
pub const BLOCK_FRAME_LEN: usize = 8;

/// Length fields framing one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockFrame {
    pub compressed_len: u32,
    pub original_len: u32,
}

impl BlockFrame {
    pub fn new(compressed_len: usize, original_len: usize) -> Result<Self> {
        let to_u32 = |n: usize, what: &str| {
            u32::try_from(n).map_err(|_| {
                HcError::Capacity(format!("{} of {} bytes does not fit a u32", what, n))
            })
        };
        Ok(Self {
            compressed_len: to_u32(compressed_len, "compressed block")?,
            original_len: to_u32(original_len, "block")?,
        })
    }

    pub fn to_bytes(self) -> [u8; BLOCK_FRAME_LEN] {
        let mut out = [0_u8; BLOCK_FRAME_LEN];
        out[..4].copy_from_slice(&self.compressed_len.to_be_bytes());
        out[4..].copy_from_slice(&self.original_len.to_be_bytes());
        out
    }

    pub fn from_bytes(b: [u8; BLOCK_FRAME_LEN]) -> Self {
        Self {
            compressed_len: u32::from_be_bytes([b[0], b[1], b[2], b[3]]),
            original_len: u32::from_be_bytes([b[4], b[5], b[6], b[7]]),
        }
    }
}

/// Write one framed block.
pub fn write_block<W: Write + ?Sized>(
    sink: &mut W,
    payload: &[u8],
    original_len: usize,
) -> Result<usize> {
    let frame = BlockFrame::new(payload.len(), original_len)?;
    sink.write_all(&frame.to_bytes())?;
    sink.write_all(payload)?;
    Ok(BLOCK_FRAME_LEN + payload.len())
}

/// Read the next block. None at a clean end of input (no bytes before the next frame).
pub fn read_block<R: Read>(source: &mut R) -> Result<Option<(BlockFrame, Vec<u8>)>> {
    let mut frame_bytes = [0_u8; BLOCK_FRAME_LEN];
    match read_chunk(source, &mut frame_bytes)? {
        0 => return Ok(None),
        BLOCK_FRAME_LEN => {}
        n => {
            return Err(format_error(format!(
                "block frame truncated: {} of {} bytes",
                n, BLOCK_FRAME_LEN
            )))
        }
    }
    let frame = BlockFrame::from_bytes(frame_bytes);

    let mut payload = Vec::new();
    source
        .by_ref()
        .take(frame.compressed_len as u64)
        .read_to_end(&mut payload)?;
    if payload.len() != frame.compressed_len as usize {
        return Err(format_error(format!(
            "block payload truncated: {} of {} bytes",
            payload.len(),
            frame.compressed_len
        )));
    }
    Ok(Some((frame, payload)))
}
