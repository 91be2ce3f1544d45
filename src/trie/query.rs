// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query operations over the LOUDS-encoded trie.
//!
//! Nodes are numbered 0..n in BFS order; node i corresponds to the
//! (i+1)-th set bit of the `louds` vector, and its child run sits between
//! the (i+1)-th and (i+2)-th clear bits. Children of one node are therefore
//! consecutive node numbers, sorted by the first code point of their edge,
//! which is what makes the per-step binary search work.
//!
//! Every operation is O(|key|) amortized: one or two rank/select calls per
//! character plus a binary search over the node's degree (typically ≤ 4).
//! A link edge carries a tail-trie word id instead of a code point; the
//! tail string is reconstructed on demand via the nested trie's
//! `key_of_id`.

use crate::trie::bits::RankSelect;

/// A loaded, immutable trie. Built by [`crate::trie::builder`] or parsed
/// from bytes by [`crate::trie::format`]; both establish the structural
/// invariants the navigation below relies on.
#[derive(Debug, Clone, PartialEq)]
pub struct Trie {
    pub(crate) louds: RankSelect,
    pub(crate) terminal: RankSelect,
    pub(crate) link: RankSelect,
    /// Edge labels in BFS order: code point, or tail word id for link edges.
    pub(crate) labels: Vec<u32>,
    pub(crate) tail: Option<Box<Trie>>,
    pub(crate) node_count: u32,
    pub(crate) word_count: u32,
}

/// Where a prefix walk landed.
enum Descent {
    /// Exactly on a node.
    Node(u32),
    /// Inside a link edge: the target node, plus the unconsumed remainder
    /// of the edge's tail string.
    InTail { node: u32, rest: Vec<char> },
}

impl Trie {
    pub fn word_count(&self) -> u32 {
        self.word_count
    }

    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    /// Membership: true iff `key` is exactly in the indexed set.
    pub fn contains(&self, key: &str) -> bool {
        self.word_id(key).is_some()
    }

    /// Dense id of `key`, or `None` when absent.
    pub fn word_id(&self, key: &str) -> Option<u32> {
        match self.descend(key)? {
            Descent::Node(node) if self.terminal.get(node) => {
                Some(self.terminal.rank1(node) - 1)
            }
            _ => None,
        }
    }

    /// Key owning word id `id`: walk from its terminal node up to the root,
    /// then reverse the collected edge strings.
    pub fn key_of_id(&self, id: u32) -> Option<String> {
        if id >= self.word_count {
            return None;
        }
        let mut node = self.terminal.select1(id + 1)?;
        let mut parts: Vec<String> = Vec::new();
        while node != 0 {
            parts.push(self.edge_string(node)?);
            node = self.parent(node);
        }
        parts.reverse();
        Some(parts.concat())
    }

    /// All keys extending `prefix`, in lexicographic order, at most `limit`.
    pub fn enumerate_prefix(&self, prefix: &str, limit: usize) -> Vec<String> {
        let mut out = Vec::new();
        if limit == 0 {
            return out;
        }
        let (node, acc) = match self.descend(prefix) {
            Some(Descent::Node(node)) => (node, prefix.to_string()),
            Some(Descent::InTail { node, rest }) => {
                let mut acc = prefix.to_string();
                acc.extend(rest);
                (node, acc)
            }
            None => return out,
        };
        self.dfs(node, acc, limit, &mut out);
        out
    }

    /// Sorted first code points of the edges leaving the prefix position.
    pub fn next_letters(&self, prefix: &str) -> Vec<char> {
        match self.descend(prefix) {
            Some(Descent::Node(node)) => {
                let (first, degree) = self.children_range(node);
                (first..first + degree)
                    .filter_map(|c| self.edge_first_char(c))
                    .collect()
            }
            Some(Descent::InTail { rest, .. }) => rest.first().copied().into_iter().collect(),
            None => Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // LOUDS navigation
    // ------------------------------------------------------------------

    /// First child node number and degree. Degree 0 means a leaf.
    fn children_range(&self, node: u32) -> (u32, u32) {
        let run_end = self
            .louds
            .select0(node + 2)
            .expect("louds has node_count + 1 zeros");
        let run_start = self
            .louds
            .select0(node + 1)
            .expect("louds has node_count + 1 zeros")
            + 1;
        let degree = run_end - run_start;
        if degree == 0 {
            return (0, 0);
        }
        (self.louds.rank1(run_start) - 1, degree)
    }

    fn parent(&self, node: u32) -> u32 {
        let pos = self
            .louds
            .select1(node + 1)
            .expect("louds has one set bit per node");
        self.louds.rank0(pos) - 1
    }

    fn label(&self, node: u32) -> u32 {
        self.labels[(node - 1) as usize]
    }

    fn is_link(&self, node: u32) -> bool {
        self.link.get(node)
    }

    /// Full string carried by the edge into `node`.
    fn edge_string(&self, node: u32) -> Option<String> {
        if self.is_link(node) {
            self.tail.as_ref()?.key_of_id(self.label(node))
        } else {
            char::from_u32(self.label(node)).map(String::from)
        }
    }

    /// First code point of the edge into `node`; a link edge is expanded
    /// only as far as its first code point.
    fn edge_first_char(&self, node: u32) -> Option<char> {
        if self.is_link(node) {
            self.edge_string(node)?.chars().next()
        } else {
            char::from_u32(self.label(node))
        }
    }

    // ------------------------------------------------------------------
    // Walks
    // ------------------------------------------------------------------

    /// Walk `key` from the root. `None` means no such path exists.
    fn descend(&self, key: &str) -> Option<Descent> {
        let kchars: Vec<char> = key.chars().collect();
        let mut node = 0u32;
        let mut i = 0usize;
        while i < kchars.len() {
            let child = self.find_child(node, kchars[i])?;
            if self.is_link(child) {
                let schars: Vec<char> = self.edge_string(child)?.chars().collect();
                let remaining = kchars.len() - i;
                if remaining < schars.len() {
                    if schars[..remaining] == kchars[i..] {
                        return Some(Descent::InTail {
                            node: child,
                            rest: schars[remaining..].to_vec(),
                        });
                    }
                    return None;
                }
                if kchars[i..i + schars.len()] != schars[..] {
                    return None;
                }
                i += schars.len();
            } else {
                i += 1;
            }
            node = child;
        }
        Some(Descent::Node(node))
    }

    /// Binary search the child run of `node` for an edge starting with `c`.
    fn find_child(&self, node: u32, c: char) -> Option<u32> {
        let (first, degree) = self.children_range(node);
        let (mut lo, mut hi) = (0u32, degree);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let child = first + mid;
            match self.edge_first_char(child)?.cmp(&c) {
                std::cmp::Ordering::Less => lo = mid + 1,
                std::cmp::Ordering::Greater => hi = mid,
                std::cmp::Ordering::Equal => return Some(child),
            }
        }
        None
    }

    /// Emit terminal descendants in lexicographic order. Terminal-at-node
    /// precedes descendants, and sibling edges are label-sorted, so plain
    /// pre-order DFS is already lexicographic.
    fn dfs(&self, node: u32, acc: String, limit: usize, out: &mut Vec<String>) {
        if out.len() >= limit {
            return;
        }
        if self.terminal.get(node) {
            out.push(acc.clone());
            if out.len() >= limit {
                return;
            }
        }
        let (first, degree) = self.children_range(node);
        for child in first..first + degree {
            if out.len() >= limit {
                return;
            }
            if let Some(edge) = self.edge_string(child) {
                let mut next = acc.clone();
                next.push_str(&edge);
                self.dfs(child, next, limit, out);
            }
        }
    }
}
