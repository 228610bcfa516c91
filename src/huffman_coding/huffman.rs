use log::{debug, trace};

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A huffman tree node. The tree only lives long enough to hand out codes.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Node {
    Leaf { symbol: Vec<u8>, weight: u64 },
    Internal { left: Box<Node>, right: Box<Node>, weight: u64 },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    /// Join two nodes. `left` gets bit 0.
    pub fn merge(left: Node, right: Node) -> Node {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Depth of the deepest leaf below this node.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// A node waiting in the merge queue. `seq` fixes the order among equal weights: leaves are
/// numbered in the order given, merged nodes after them in the order they are made.
#[derive(Debug)]
struct Queued {
    weight: u64,
    seq: usize,
    node: Node,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}
impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    /// Reversed so the std max-heap pops the lightest (then oldest) node first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Build a huffman tree from (symbol, weight) pairs. Zero weights are skipped.
///
/// Ties are broken by position: pass the pairs in ascending symbol order (as the frequency
/// table hands them out) and the tree, and so the header, is the same on every run.
/// Returns None when there is nothing to code.
pub fn build_tree(weights: Vec<(Vec<u8>, u64)>) -> Option<Node> {
    let mut heap: BinaryHeap<Queued> = weights
        .into_iter()
        .filter(|(_, weight)| *weight > 0)
        .enumerate()
        .map(|(seq, (symbol, weight))| Queued {
            weight,
            seq,
            node: Node::Leaf { symbol, weight },
        })
        .collect();
    let leaves = heap.len();
    let mut seq = leaves;

    // Pull off the two lightest nodes and push back their parent until one remains.
    while heap.len() > 1 {
        let left = heap.pop()?.node;
        let right = heap.pop()?.node;
        let node = Node::merge(left, right);
        trace!("Merged node {} with weight {}.", seq, node.weight());
        heap.push(Queued {
            weight: node.weight(),
            seq,
            node,
        });
        seq += 1;
    }

    let root = heap.pop()?.node;
    debug!(
        "Built huffman tree over {} symbols, weight {}, depth {}.",
        leaves,
        root.weight(),
        root.depth()
    );
    Some(root)
}
