//! Linear-probing hash table mapping handle signatures to trie nodes.

use super::{node_key, Node};
use crate::bit_vector::BitVector;

const INITIAL_LENGTH: usize = 64;

/// A linear-probing hash table that compares keys using signatures.
///
/// Keys are the 64-bit signatures of the handles of the associated nodes.
/// Distinct handles may share a signature, so every slot carries a `dup` flag
/// set as soon as a second copy of its signature lands on its probe path:
/// lookups may then trust a signature match on un-flagged slots and reserve
/// the expensive prefix comparison for flagged ones.
pub(crate) struct HandleMap {
    /// The signatures of the handles of the stored nodes.
    sig: Vec<u64>,
    /// The node stored in each slot, or [`None`] if the slot is free.
    node: Vec<Option<usize>>,
    /// Whether more copies of the slot's signature lie on its probe path.
    dup: Vec<bool>,
    /// The mask to transform a signature into a position in the table.
    mask: usize,
    /// The number of nodes in the table.
    size: usize,
}

impl HandleMap {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::with_length(INITIAL_LENGTH)
    }

    /// Creates an empty table dimensioned for `size` nodes.
    pub fn with_capacity(size: usize) -> Self {
        Self::with_length((1 + size * 4 / 3).next_power_of_two().max(4))
    }

    fn with_length(length: usize) -> Self {
        debug_assert!(length.is_power_of_two());
        Self {
            sig: vec![0; length],
            node: vec![None; length],
            dup: vec![false; length],
            mask: length - 1,
            size: 0,
        }
    }

    /// Returns the number of nodes stored.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Probes for `signature` in fast mode: a slot matches on signature alone
    /// unless it is flagged as a duplicate, in which case the node's handle is
    /// verified against `v[0..prefix_len]`. May return a false positive with
    /// probability around 2⁻⁶⁴ per slot.
    fn find_pos(&self, nodes: &[Node], v: &BitVector, prefix_len: usize, signature: u64) -> usize {
        let mut pos = (signature as usize) & self.mask;
        while let Some(candidate) = self.node[pos] {
            if self.sig[pos] == signature
                && (!self.dup[pos]
                    || (prefix_len == nodes[candidate].handle_length()
                        && v.lcp(node_key(nodes, candidate)) >= prefix_len))
            {
                break;
            }
            pos = (pos + 1) & self.mask;
        }
        pos
    }

    /// Probes for `signature`, always verifying the node's handle against
    /// `v[0..prefix_len]`.
    fn find_exact_pos(
        &self,
        nodes: &[Node],
        v: &BitVector,
        prefix_len: usize,
        signature: u64,
    ) -> usize {
        let mut pos = (signature as usize) & self.mask;
        while let Some(candidate) = self.node[pos] {
            if self.sig[pos] == signature
                && prefix_len == nodes[candidate].handle_length()
                && v.lcp(node_key(nodes, candidate)) >= prefix_len
            {
                break;
            }
            pos = (pos + 1) & self.mask;
        }
        pos
    }

    /// Probes for a free slot, flagging every occupied slot with the same
    /// signature met along the way.
    fn find_free_pos(&mut self, signature: u64) -> usize {
        let mut pos = (signature as usize) & self.mask;
        while self.node[pos].is_some() {
            if self.sig[pos] == signature {
                self.dup[pos] = true;
            }
            pos = (pos + 1) & self.mask;
        }
        pos
    }

    /// Returns the node whose handle has signature `signature` and, in exact
    /// mode or on flagged slots, prefix-matches `v[0..prefix_len]`;
    /// [`None`] if there is no such node.
    pub fn get(
        &self,
        nodes: &[Node],
        signature: u64,
        v: &BitVector,
        prefix_len: usize,
        exact: bool,
    ) -> Option<usize> {
        let pos = if exact {
            self.find_exact_pos(nodes, v, prefix_len, signature)
        } else {
            self.find_pos(nodes, v, prefix_len, signature)
        };
        self.node[pos]
    }

    /// Inserts a node under the signature of its handle, doubling the table
    /// when it becomes too loaded.
    pub fn add_new(&mut self, signature: u64, node: usize) {
        let pos = self.find_free_pos(signature);
        debug_assert!(self.node[pos].is_none());

        self.size += 1;
        self.sig[pos] = signature;
        self.node[pos] = Some(node);

        if self.size * 4 / 3 > self.node.len() {
            let new_length = self.node.len() * 2;
            let new_mask = new_length - 1;
            let mut new_sig = vec![0; new_length];
            let mut new_node = vec![None; new_length];
            let mut new_dup = vec![false; new_length];

            for i in (0..self.node.len()).rev() {
                if self.node[i].is_some() {
                    let signature = self.sig[i];
                    let mut pos = (signature as usize) & new_mask;
                    while new_node[pos].is_some() {
                        if new_sig[pos] == signature {
                            new_dup[pos] = true;
                        }
                        pos = (pos + 1) & new_mask;
                    }
                    new_sig[pos] = signature;
                    new_node[pos] = self.node[i];
                }
            }

            self.sig = new_sig;
            self.node = new_node;
            self.dup = new_dup;
            self.mask = new_mask;
        }
    }
}
