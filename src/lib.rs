//! Core of the Openword Lexicon: dump scanning and succinct indexing.
//!
//! Two loosely coupled subsystems composed as a one-way pipeline plus an
//! orthogonal index build:
//!
//! ```text
//!      .xml.bz2             JSONL                     wordlist.txt            .trie (v7/v8)
//! dump ───────► scan ─────────► (external join) ──────────► trie build ─────────────► query
//!               stream → scanner → filter → extract                       Trie::from_bytes
//! ```
//!
//! The scanner side streams a multi-gigabyte compressed dump in bounded
//! memory, gates pages through namespace/redirect/language/script checks,
//! and runs a fixed set of wikitext rules to produce one JSON entry per
//! line. The trie side turns a sorted wordlist into a LOUDS-encoded
//! MARISA-style index supporting membership, word ids, reverse lookup, and
//! prefix enumeration from a few MiB of immutable bytes.
//!
//! # Usage
//!
//! ```no_run
//! use owlex::{run_scan, ScanOptions};
//! use owlex::trie::{BuildOptions, Trie, TrieFormat};
//!
//! # fn main() -> owlex::Result<()> {
//! // Dump → JSONL
//! let stats = run_scan(
//!     "enwiktionary-latest-pages-articles.xml.bz2".as_ref(),
//!     "entries.jsonl".as_ref(),
//!     &ScanOptions::default(),
//! )?;
//! eprintln!("{} entries", stats.entries);
//!
//! // Wordlist → trie → query
//! let trie = Trie::build(vec!["ant".into(), "bee".into()], &BuildOptions::default())?;
//! let bytes = trie.to_bytes(TrieFormat::V7)?;
//! let loaded = Trie::from_bytes(&bytes)?;
//! assert_eq!(loaded.word_id("bee"), Some(1));
//! # Ok(())
//! # }
//! ```

// Module declarations
pub mod entry;
pub mod error;
pub mod extract;
pub mod filter;
pub mod scan;
pub mod scanner;
pub mod stats;
pub mod stream;
pub mod trie;

// Re-exports for the public API
pub use entry::{Entry, Labels, Morphology};
pub use error::{Error, Result};
pub use extract::{Extractor, ExtractorCounters};
pub use filter::{EntryFilter, RejectReason};
pub use scan::{run_scan, ScanOptions};
pub use scanner::{Page, PageScanner};
pub use stats::ScanStats;
pub use trie::{run_build_trie, BuildOptions, Trie, TrieFormat};
