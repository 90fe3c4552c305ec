use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};
use std::fmt;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;

/// Index of a node inside an [`EncodingTree`].
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    Internal {
        weight: u64,
        zero: NodeId,
        one: NodeId,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

// Pending node in the build queue. Ordered reversed so `BinaryHeap` pops
// the lightest node first, earliest-queued among equal weights.
#[derive(Debug, PartialEq, Eq)]
struct QueueEntry {
    weight: u64,
    seq: usize,
    node: NodeId,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Huffman encoding tree stored as a node arena.
///
/// Children are referenced by index, so dropping the tree frees one flat
/// allocation no matter how deep it is.
#[derive(Debug, Clone)]
pub struct EncodingTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl EncodingTree {
    /// Builds the tree by repeatedly merging the two lightest nodes.
    ///
    /// Leaves are queued in table order (literals ascending, end-of-stream
    /// last) and each merged node is queued after everything before it, so
    /// equal weights are resolved by queue order. The first node extracted
    /// becomes the zero branch.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        if table.is_empty() {
            return Err(HuffmanError::malformed("cannot build a tree from an empty table"));
        }

        let mut nodes = Vec::with_capacity(table.len() * 2 - 1);
        let mut queue = BinaryHeap::with_capacity(table.len());
        for (symbol, weight) in table.iter() {
            let id = nodes.len();
            nodes.push(Node::Leaf { symbol, weight });
            queue.push(QueueEntry {
                weight,
                seq: id,
                node: id,
            });
        }

        loop {
            let zero = match queue.pop() {
                Some(entry) => entry,
                None => return Err(HuffmanError::malformed("build queue drained unexpectedly")),
            };
            let one = match queue.pop() {
                Some(entry) => entry,
                None => {
                    let tree = EncodingTree {
                        nodes,
                        root: zero.node,
                    };
                    debug!(
                        "built encoding tree: {} leaves, depth {}",
                        tree.leaf_count(),
                        tree.depth()
                    );
                    return Ok(tree);
                }
            };

            let weight = zero
                .weight
                .checked_add(one.weight)
                .ok_or_else(|| HuffmanError::malformed("total frequency overflows u64"))?;
            let id = nodes.len();
            trace!("merge #{} + #{} -> #{} (weight {})", zero.node, one.node, id, weight);
            nodes.push(Node::Internal {
                weight,
                zero: zero.node,
                one: one.node,
            });
            queue.push(QueueEntry {
                weight,
                seq: id,
                node: id,
            });
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Follows one edge from `id`. Returns `None` when `id` is a leaf.
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.nodes[id] {
            Node::Internal { zero, one, .. } => Some(if bit { one } else { zero }),
            Node::Leaf { .. } => None,
        }
    }

    /// Total weight, equal to the sum of all leaf frequencies.
    pub fn weight(&self) -> u64 {
        self.nodes[self.root].weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.nodes.iter().any(|n| n.symbol() == Some(symbol))
    }

    /// Length of the longest code.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { .. } => max = max.max(depth),
                Node::Internal { zero, one, .. } => {
                    stack.push((one, depth + 1));
                    stack.push((zero, depth + 1));
                }
            }
        }
        max
    }

    /// Derives every leaf's root-to-leaf path in a single traversal.
    ///
    /// A single-leaf tree yields one empty code.
    pub fn code_book(&self) -> CodeBook {
        let mut codes = BTreeMap::new();
        let mut stack = vec![(self.root, Code::new())];
        while let Some((id, code)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { symbol, .. } => {
                    codes.insert(symbol, code);
                }
                Node::Internal { zero, one, .. } => {
                    let mut one_code = code.clone();
                    one_code.push(true);
                    stack.push((one, one_code));
                    let mut zero_code = code;
                    zero_code.push(false);
                    stack.push((zero, zero_code));
                }
            }
        }
        CodeBook { codes }
    }
}

/// Root-to-leaf path: `false` takes the zero branch, `true` the one branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new() -> Self {
        Code { bits: Vec::new() }
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl From<&[bool]> for Code {
    fn from(bits: &[bool]) -> Self {
        Code {
            bits: bits.to_vec(),
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code lookup for one tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBook {
    codes: BTreeMap<Symbol, Code>,
}

impl CodeBook {
    pub fn code(&self, symbol: Symbol) -> Result<&Code> {
        self.codes
            .get(&symbol)
            .ok_or(HuffmanError::SymbolNotFound { symbol })
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn to_bincode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bincode(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
