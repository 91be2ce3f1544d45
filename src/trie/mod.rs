// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The succinct wordlist index: a MARISA-style LOUDS trie.
//!
//! A base trie over the keys, with single-child chains replaced by
//! variable-length tail strings, and the tails themselves indexed by a
//! nested trie (depth 1 by default). The serialized form is a few MiB for
//! a million-key English wordlist and loads by building rank/select
//! directories only; nothing is ever decompressed into a mutable
//! structure.
//!
//! | Module    | Contents                                         |
//! |-----------|--------------------------------------------------|
//! | `bits`    | bit packing, rank/select, varints                |
//! | `dawg`    | sorted-input suffix-sharing minimization         |
//! | `builder` | BFS LOUDS encoding, tails, integrity audit       |
//! | `format`  | OWTRIE v7/v8 serialization                       |
//! | `query`   | `contains` / `word_id` / `key_of_id` / prefixes  |

pub mod bits;
pub mod builder;
mod dawg;
pub mod format;
pub mod query;

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

pub use builder::BuildOptions;
pub use format::TrieFormat;
pub use query::Trie;

use crate::error::{Error, Result};

/// Read a wordlist (one key per line, UTF-8), build, and serialize.
/// The output file appears atomically via a temp-file rename.
pub fn run_build_trie(
    wordlist: &Path,
    output: &Path,
    format: TrieFormat,
    opts: &BuildOptions,
) -> Result<()> {
    let keys = read_wordlist(wordlist)?;
    eprintln!("building trie over {} keys...", keys.len());
    let trie = Trie::build(keys, opts)?;
    let bytes = trie.to_bytes(format)?;
    eprintln!(
        "trie: {} words, {} nodes, {} bytes",
        trie.word_count(),
        trie.node_count(),
        bytes.len()
    );

    let mut tmp_name = output.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = output.with_file_name(tmp_name);
    fs::write(&tmp_path, &bytes)?;
    fs::rename(&tmp_path, output)?;
    Ok(())
}

/// Load keys, rejecting empty lines per the wordlist contract.
fn read_wordlist(path: &Path) -> Result<Vec<String>> {
    let reader = BufReader::with_capacity(256 * 1024, File::open(path)?);
    let mut keys = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            return Err(Error::Format(format!("empty key at line {}", i + 1)));
        }
        keys.push(line);
    }
    Ok(keys)
}
