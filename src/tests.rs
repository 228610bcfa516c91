use std::io::Cursor;

use crate::error::HcError;
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::huffman::build_tree;
use crate::tools::freq_count::FreqTable;
use crate::{compress, compress_bytes, decompress_bytes, decompress_with, Backend, CodecOpts};

const SHORT_DATA: &[u8] = b"Hello, World!";
const REPEATING_DATA: &[u8] =
    b"a baba da babble da dabble babble doo bee babble dabble dooble dee boo dooble daddle boo";
const EMPTY_DATA: &[u8] = &[];

/// Small xorshift64 so test data is repeatable without a seed file.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Bytes with a skewed distribution: mostly a handful of values, some noise.
    fn skewed(&mut self, len: usize) -> Vec<u8> {
        (0..len)
            .map(|_| {
                let r = self.next();
                if r % 4 == 0 {
                    (r >> 8) as u8
                } else {
                    b"etaoin"[(r >> 16) as usize % 6]
                }
            })
            .collect()
    }
}

fn test_cases() -> Vec<(Vec<u8>, &'static str)> {
    let mut rng = XorShift(0xdead_cafe);
    vec![
        (REPEATING_DATA.to_vec(), "repeating data"),
        (SHORT_DATA.to_vec(), "short data"),
        (EMPTY_DATA.to_vec(), "empty data"),
        (vec![0x5a], "single byte"),
        (rng.skewed(5000), "skewed data"),
        ((0..=255).collect(), "every byte"),
    ]
}

fn table_for(data: &[u8], width: usize, backend: Backend) -> (FreqTable, CodeTable) {
    let mut freqs = FreqTable::new(width, backend).unwrap();
    freqs.count_bytes(data);
    let root = build_tree(freqs.weights()).unwrap();
    let table = CodeTable::from_tree(&root, width, backend).unwrap();
    (freqs, table)
}

#[test]
fn roundtrip_test() {
    for (data, name) in test_cases() {
        for width in 1..=8 {
            let packed = compress_bytes(&data, &CodecOpts::new(width)).unwrap();
            let back = decompress_bytes(&packed).unwrap();
            assert_eq!(back, data, "{} failed at width {}", name, width);
        }
    }
}

#[test]
fn backends_agree_test() {
    for (data, name) in test_cases() {
        for width in 1..=2 {
            let dense = CodecOpts::new(width).with_backend(Backend::Dense);
            let sparse = CodecOpts::new(width).with_backend(Backend::Sparse);
            let a = compress_bytes(&data, &dense).unwrap();
            let b = compress_bytes(&data, &sparse).unwrap();
            assert_eq!(a, b, "{} differs between backends at width {}", name, width);

            let mut out = Vec::new();
            decompress_with(&mut &b[..], &mut out, Backend::Sparse).unwrap();
            assert_eq!(out, data);
        }
    }
}

#[test]
fn chunk_size_independence_test() {
    let data = XorShift(42).skewed(3001);
    for width in [1, 3, 5] {
        let baseline = compress_bytes(&data, &CodecOpts::new(width)).unwrap();
        let header_len = u32::from_be_bytes([baseline[0], baseline[1], baseline[2], baseline[3]]);
        for chunk_size in [1, 7, 64, 1000] {
            let opts = CodecOpts::new(width).with_chunk_size(chunk_size);
            let packed = compress_bytes(&data, &opts).unwrap();
            // Same counts, same table, same header.
            assert_eq!(
                &packed[..header_len as usize],
                &baseline[..header_len as usize]
            );
            assert_eq!(decompress_bytes(&packed).unwrap(), data);
        }
    }
}

#[test]
fn deterministic_test() {
    let data = XorShift(7).skewed(2000);
    let opts = CodecOpts::new(2);
    assert_eq!(
        compress_bytes(&data, &opts).unwrap(),
        compress_bytes(&data, &opts).unwrap()
    );
}

#[test]
fn degenerate_alphabet_test() {
    let data = vec![0xee_u8; 10_000];
    let mut out = Vec::new();
    let stats = compress(&mut Cursor::new(&data), &mut out, &CodecOpts::new(1)).unwrap();
    assert_eq!(stats.distinct_symbols, 1);
    assert_eq!(stats.longest_code, 1);
    // One bit per symbol.
    assert_eq!(stats.compressed_bytes, stats.header_bytes + 8 + 10_000 / 8);
    assert_eq!(decompress_bytes(&out).unwrap(), data);
}

#[test]
fn scenario_a_test() {
    let data = [0x41, 0x42, 0x41, 0x41];
    let (_, table) = table_for(&data, 1, Backend::Auto);
    assert_eq!(table.len(), 2);
    assert_eq!(table.encode(b"A").unwrap().len(), 1);
    assert_eq!(table.encode(b"B").unwrap().len(), 1);
    assert_eq!(
        decompress_bytes(&compress_bytes(&data, &CodecOpts::new(1)).unwrap()).unwrap(),
        data
    );
}

#[test]
fn scenario_b_test() {
    let data = [0x01, 0x02, 0x03];
    let (freqs, table) = table_for(&data, 2, Backend::Auto);
    assert_eq!(freqs.symbols(), vec![vec![0x01, 0x02], vec![0x03, 0x00]]);
    assert_eq!(table.len(), 2);

    let packed = compress_bytes(&data, &CodecOpts::new(2)).unwrap();
    let back = decompress_bytes(&packed).unwrap();
    assert_eq!(back, data);
}

#[test]
fn prefix_free_test() {
    let data = XorShift(99).skewed(4000);
    for width in [1, 2, 3] {
        let (_, table) = table_for(&data, width, Backend::Auto);
        let entries = table.entries();
        for (i, (a, _)) in entries.iter().enumerate() {
            for (j, (b, _)) in entries.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b), "{} is a prefix of {}", a, b);
                }
            }
        }
    }
}

#[test]
fn optimality_test() {
    let data = XorShift(1234).skewed(6000);
    for width in [1, 2] {
        let (freqs, table) = table_for(&data, width, Backend::Auto);

        // A full binary tree: Kraft sum is exactly one.
        let max = table.max_len();
        let kraft: u64 = table
            .entries()
            .iter()
            .map(|(code, _)| 1_u64 << (max - code.len()))
            .sum();
        assert_eq!(kraft, 1_u64 << max);

        // Never worse than a fixed length code over the same alphabet.
        let fixed_len = 64 - (table.len() as u64 - 1).leading_zeros() as u64;
        let coded = table.weighted_length(&freqs);
        assert!(coded <= freqs.total() * fixed_len);

        // Never better than the entropy.
        let total = freqs.total() as f64;
        let entropy: f64 = freqs
            .weights()
            .iter()
            .map(|(_, w)| *w as f64 * (total / *w as f64).log2())
            .sum();
        assert!(coded as f64 + 1e-6 >= entropy);
        assert!((coded as f64) < entropy + total);
    }
}

#[test]
fn deep_tree_test() {
    // Fibonacci weights give a chain: k symbols need a code of k - 1 bits.
    let fib = |k: usize| {
        let mut w = vec![1_u64, 1];
        while w.len() < k {
            w.push(w[w.len() - 1] + w[w.len() - 2]);
        }
        w.into_iter()
            .enumerate()
            .map(|(i, w)| (vec![i as u8], w))
            .collect::<Vec<_>>()
    };

    let root = build_tree(fib(57)).unwrap();
    let table = CodeTable::from_tree(&root, 1, Backend::Auto).unwrap();
    assert_eq!(table.max_len(), 56);

    let root = build_tree(fib(58)).unwrap();
    assert!(matches!(
        CodeTable::from_tree(&root, 1, Backend::Auto),
        Err(HcError::Capacity(_))
    ));
}

#[test]
fn corrupt_stream_test() {
    let data = XorShift(5).skewed(500);
    let packed = compress_bytes(&data, &CodecOpts::new(2)).unwrap();
    // Every strict prefix past the header is short at least one block byte.
    for cut in (packed.len() - 20)..packed.len() {
        assert!(decompress_bytes(&packed[..cut]).is_err());
    }
    let mut bad = packed.clone();
    bad[0] = 0xff;
    assert!(matches!(decompress_bytes(&bad), Err(HcError::Format(_))));
}
