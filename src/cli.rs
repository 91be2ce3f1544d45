// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the owlex command-line interface.
//!
//! Two subcommands, both non-interactive: `scan` converts a compressed
//! dump into JSONL entries, `build-trie` converts a sorted wordlist into a
//! serialized trie. Exit codes: 0 on success, 1 on I/O errors, 2 on format
//! errors. No environment variables alter behavior.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "owlex",
    about = "Openword Lexicon dump scanner and trie builder",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a Wiktionary XML dump (.xml.bz2 or .xml) into JSONL entries
    Scan {
        /// Input dump path
        dump: PathBuf,

        /// Output JSONL path (written atomically)
        output: PathBuf,

        /// Stop after this many written entries
        #[arg(long)]
        limit: Option<u64>,

        /// Accept pages whose </text> is missing (truncated dumps)
        #[arg(long)]
        diagnostic: bool,
    },

    /// Build a serialized trie from a sorted wordlist
    BuildTrie {
        /// Input wordlist: one NFKC-normalized key per line
        wordlist: PathBuf,

        /// Output trie path (written atomically)
        output: PathBuf,

        /// Serialization format: v7 (uncompressed) or v8 (brotli)
        #[arg(long, value_enum, default_value = "v7")]
        format: FormatArg,

        /// Tail-trie recursion depth
        #[arg(long, default_value_t = 1)]
        depth: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    V7,
    V8,
}
