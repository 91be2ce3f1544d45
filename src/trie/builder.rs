// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! From sorted keys to a serialized-ready [`Trie`].
//!
//! The pipeline: canonicalize keys (sort, dedup, reject empties), minimize
//! into a DAWG, then breadth-first encode. The BFS re-expands DAWG sharing
//! into distinct tree nodes: the registry bounds peak build memory, but
//! each key must end at its own terminal so word-ids stay a dense
//! bijection. During the walk, runs of single-child non-terminal nodes
//! collapse into tail strings; the unique tails then go through the same
//! builder recursively (`depth` levels, the innermost level encoding
//! plainly), and each link edge's label becomes the tail's word id in that
//! nested trie.
//!
//! Cancellation is checked every 64 Ki nodes. Every level ends with a
//! structural audit; a failure there is a bug, not bad input.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::trie::bits::{BitVec, RankSelect};
use crate::trie::dawg::{Dawg, DawgBuilder};
use crate::trie::query::Trie;

/// Node interval between cancellation checks.
const CANCEL_INTERVAL: u32 = 64 * 1024;

/// Builder configuration.
pub struct BuildOptions {
    /// Tail-trie nesting depth. 1 captures essentially all the compression
    /// for natural-language key sets; deeper is a knob, not a default.
    pub depth: u32,
    /// Cooperative cancellation, checked at node batches.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            depth: 1,
            cancel: None,
        }
    }
}

impl Trie {
    /// Build a trie over `keys`. Input is canonicalized (sorted,
    /// deduplicated); empty keys are rejected with [`Error::Format`].
    pub fn build(mut keys: Vec<String>, opts: &BuildOptions) -> Result<Trie> {
        if keys.iter().any(String::is_empty) {
            return Err(Error::Format("wordlist contains an empty key".to_string()));
        }
        keys.sort_unstable();
        keys.dedup();
        build_level(&keys, opts.depth, opts.cancel.as_deref())
    }
}

fn check_cancel(cancel: Option<&AtomicBool>) -> Result<()> {
    if cancel.is_some_and(|t| t.load(Ordering::Relaxed)) {
        return Err(Error::Cancelled);
    }
    Ok(())
}

fn build_level(keys: &[String], depth: u32, cancel: Option<&AtomicBool>) -> Result<Trie> {
    let mut builder = DawgBuilder::new();
    for (i, key) in keys.iter().enumerate() {
        if i as u32 % CANCEL_INTERVAL == 0 {
            check_cancel(cancel)?;
        }
        builder.insert(key);
    }
    let dawg = builder.finish();
    let trie = encode(&dawg, depth, cancel)?;
    audit(&trie, keys.len() as u32)?;
    Ok(trie)
}

/// One BFS edge label before tail-index resolution.
enum Slot {
    Char(char),
    Tail(u32),
}

fn encode(dawg: &Dawg, depth: u32, cancel: Option<&AtomicBool>) -> Result<Trie> {
    let compress = depth > 0;

    let mut louds = BitVec::new();
    louds.push(true);
    louds.push(false);
    let mut terminal = BitVec::new();
    let mut link = BitVec::new();
    let mut slots: Vec<Slot> = Vec::new();

    let mut tails: Vec<String> = Vec::new();
    let mut tail_ids: HashMap<String, u32> = HashMap::new();

    let root = &dawg.nodes[dawg.root as usize];
    terminal.push(root.terminal);
    link.push(false);
    let mut node_count: u32 = 1;

    let mut queue: VecDeque<u32> = VecDeque::new();
    queue.push_back(dawg.root);
    while let Some(d) = queue.pop_front() {
        for &(ch, child) in &dawg.nodes[d as usize].children {
            // Collapse the single-child non-terminal chain below this edge.
            let mut edge = String::from(ch);
            let mut target = child;
            if compress {
                loop {
                    let node = &dawg.nodes[target as usize];
                    if node.terminal || node.children.len() != 1 {
                        break;
                    }
                    let (next_ch, next) = node.children[0];
                    edge.push(next_ch);
                    target = next;
                }
            }

            louds.push(true);
            terminal.push(dawg.nodes[target as usize].terminal);
            if edge.chars().count() >= 2 {
                link.push(true);
                let next_id = tails.len() as u32;
                let id = *tail_ids.entry(edge.clone()).or_insert_with(|| {
                    tails.push(edge);
                    next_id
                });
                slots.push(Slot::Tail(id));
            } else {
                link.push(false);
                slots.push(Slot::Char(ch));
            }
            queue.push_back(target);

            node_count += 1;
            if node_count % CANCEL_INTERVAL == 0 {
                check_cancel(cancel)?;
            }
        }
        louds.push(false);
    }

    // The tail set recurses through the builder; a link label is the
    // tail's word id in the nested trie.
    let (tail_trie, tail_words) = if tails.is_empty() {
        (None, Vec::new())
    } else {
        let mut sorted = tails.clone();
        sorted.sort_unstable();
        let sub = build_level(&sorted, depth.saturating_sub(1), cancel)?;
        let ids = tails
            .iter()
            .map(|t| {
                sub.word_id(t).ok_or_else(|| {
                    Error::Integrity(format!("tail string {:?} missing from tail trie", t))
                })
            })
            .collect::<Result<Vec<u32>>>()?;
        (Some(Box::new(sub)), ids)
    };

    let labels: Vec<u32> = slots
        .into_iter()
        .map(|slot| match slot {
            Slot::Char(c) => c as u32,
            Slot::Tail(i) => tail_words[i as usize],
        })
        .collect();

    let terminal = RankSelect::build(terminal);
    let word_count = terminal.count_ones();
    Ok(Trie {
        louds: RankSelect::build(louds),
        terminal,
        link: RankSelect::build(link),
        labels,
        tail: tail_trie,
        node_count,
        word_count,
    })
}

/// Structural invariants every built level must satisfy.
fn audit(trie: &Trie, expected_words: u32) -> Result<()> {
    let n = trie.node_count;
    if trie.louds.len() != 2 * n + 1 {
        return Err(Error::Integrity(format!(
            "louds length {} for {} nodes",
            trie.louds.len(),
            n
        )));
    }
    if trie.terminal.len() != n || trie.link.len() != n {
        return Err(Error::Integrity(
            "terminal/link bitvector length disagrees with node count".to_string(),
        ));
    }
    if trie.labels.len() as u32 != n - 1 {
        return Err(Error::Integrity(format!(
            "{} labels for {} edges",
            trie.labels.len(),
            n - 1
        )));
    }
    if trie.word_count != expected_words {
        return Err(Error::Integrity(format!(
            "trie indexed {} words, expected {}",
            trie.word_count, expected_words
        )));
    }
    Ok(())
}
