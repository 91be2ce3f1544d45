// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The crate-wide error taxonomy.
//!
//! Every failure mode the scanner or the trie can surface is one of these
//! variants, and the set is stable across configurations. Filter rejections
//! and extractor anomalies are deliberately NOT here: they are counters in
//! [`crate::stats::ScanStats`], recovered locally and summarized at the end
//! of a run (a skipped page is an outcome, not a failure).
//!
//! | Variant      | Meaning                                         | Exit |
//! |--------------|-------------------------------------------------|------|
//! | `Io`         | A host I/O call failed                          | 1    |
//! | `Decompress` | The bzip2 stream is malformed                   | 1    |
//! | `Parse`      | Page-wrapper XML structure unexpectedly broken  | 2    |
//! | `Format`     | Trie header or payload invalid                  | 2    |
//! | `Integrity`  | Post-build/load invariants failed (a bug)       | 2    |
//! | `Cancelled`  | Cooperative cancellation was requested          | 1    |

use std::fmt;
use std::io;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All recoverable-by-the-caller failures of the scanner and the trie.
#[derive(Debug)]
pub enum Error {
    /// A host I/O call failed; carries the underlying error.
    Io(io::Error),
    /// The bzip2 stream is malformed. `offset` is the decompressed byte
    /// position reached before the decoder gave up.
    Decompress { offset: u64, message: String },
    /// The page-wrapper XML structure is malformed. `offset` is the
    /// decompressed byte position of the offending region.
    Parse { offset: u64, message: String },
    /// A trie binary header or payload is invalid, or builder input
    /// violates the wordlist contract.
    Format(String),
    /// Post-build or post-load invariants failed, e.g. rank/select
    /// directories disagree with their bitvector.
    Integrity(String),
    /// A cancellation token was observed at a checkpoint. No partial
    /// output is left behind.
    Cancelled,
}

impl Error {
    /// Process exit code mandated for this error kind: 1 for I/O-class
    /// failures, 2 for format-class failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Io(_) | Error::Decompress { .. } | Error::Cancelled => 1,
            Error::Parse { .. } | Error::Format(_) | Error::Integrity(_) => 2,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "i/o error: {}", e),
            Error::Decompress { offset, message } => {
                write!(f, "bzip2 stream error at byte {}: {}", offset, message)
            }
            Error::Parse { offset, message } => {
                write!(f, "malformed page structure at byte {}: {}", offset, message)
            }
            Error::Format(message) => write!(f, "invalid trie format: {}", message),
            Error::Integrity(message) => write!(f, "integrity violation: {}", message),
            Error::Cancelled => write!(f, "run cancelled"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
