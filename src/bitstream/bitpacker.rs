use log::error;

use crate::huffman_coding::code::{Code, CODE_MASK, MAX_CODE_LEN};

/// Packs variable length codes into a byte buffer, most significant bit first.
pub struct BitPacker {
    pub output: Vec<u8>,
    pub last_bits: u8,
    queue: u64,
    q_bits: u8,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of size specified. Suggest the
    /// size be set to the chunk size. Call flush() to flush the bit queue to the buffer
    /// before taking the output.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            last_bits: 0,
            queue: 0,
            q_bits: 0,
        }
    }

    /// Move every full byte in the queue to the output.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /*
    NOTE: out56 takes a packed code word. The 8 most significant bits of the word say how
    many bits to write. Those bits sit left-justified in the low 56 bits.
    Eg 0x03_A0000000000000 writes out 101.
    The queue never holds more than 7 bits between calls, so 56 more always fit.
    */
    /// Writes 1-56 bits encoded with the number of bits to write in the most
    /// significant byte of a 64 bit word.
    pub fn out56(&mut self, word: u64) {
        let depth = (word >> MAX_CODE_LEN) as u8; //get bit length from the top byte
        let data = (word & CODE_MASK) >> (MAX_CODE_LEN - depth); //right-justify the bits
        self.queue <<= depth; //shift queue by bit length
        self.queue |= data; //add data portion to queue
        self.q_bits += depth; //update depth of queue bits
        self.write_stream();
    }

    /// Put one code on the stream.
    pub fn out_code(&mut self, code: &Code) {
        self.out56(code.packed());
    }

    /// Flushes the remaining bits (1-7) from the buffer, padding with 0s in the least
    /// signficant bits
    pub fn flush(&mut self) {
        self.last_bits = self.q_bits % 8;
        if self.q_bits > 0 {
            self.queue <<= 8 - self.q_bits; //pad the queue with zeros
            self.q_bits += 8 - self.q_bits;
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
    }

    /// Number of bits written so far, including any still in the queue.
    pub fn bit_len(&self) -> usize {
        self.output.len() * 8 + self.q_bits as usize
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format! {"[{}.{}]", self.bit_len() / 8, self.bit_len() % 8}
    }
}
