// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! owlex CLI: scan dumps, build tries.
//!
//! ```bash
//! # Compressed dump → JSONL entries
//! owlex scan enwiktionary-latest-pages-articles.xml.bz2 entries.jsonl
//!
//! # Sorted wordlist → serialized trie
//! owlex build-trie wordlist.txt words.trie --format v8
//! ```
//!
//! On failure, one diagnostic line goes to stderr (including the stream
//! position for scan errors) and the exit code distinguishes I/O failures
//! (1) from format failures (2). Output files appear atomically, so an
//! aborted run never leaves a partial file behind.

use clap::Parser;

use owlex::trie::{run_build_trie, BuildOptions, TrieFormat};
use owlex::{run_scan, Error, ScanOptions};

mod cli;
use cli::{Cli, Commands, FormatArg};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan {
            dump,
            output,
            limit,
            diagnostic,
        } => {
            let opts = ScanOptions {
                limit,
                diagnostic,
                ..ScanOptions::default()
            };
            run_scan(&dump, &output, &opts).map(|_| ())
        }
        Commands::BuildTrie {
            wordlist,
            output,
            format,
            depth,
        } => {
            let format = match format {
                FormatArg::V7 => TrieFormat::V7,
                FormatArg::V8 => TrieFormat::V8,
            };
            let opts = BuildOptions {
                depth,
                ..BuildOptions::default()
            };
            run_build_trie(&wordlist, &output, format, &opts)
        }
    };

    if let Err(e) = result {
        report_failure(&e);
    }
}

fn report_failure(e: &Error) -> ! {
    eprintln!("owlex: {}", e);
    std::process::exit(e.exit_code());
}
