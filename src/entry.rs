// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The lexical entry record and its JSONL layout.
//!
//! One `Entry` per accepted page, immutable after emission, merged
//! downstream by `word`. Serialization rules: `word` is always present,
//! every other field omits its key when empty or false, so a minimal entry
//! is a one-field object and readers treat absent and empty as equivalent.
//!
//! Invariants worth keeping in mind:
//!
//! - `word` equals the NFKC normalization of the page title, casing intact.
//! - `pos` draws from the closed vocabulary in [`crate::extract::pos`],
//!   lowercased, de-duplicated, in observation order.
//! - `syllables` is only ever set from an authoritative hyphenation source,
//!   never estimated.

use serde::{Deserialize, Serialize};

/// Label tags grouped by category. Each list is ordered by first
/// observation and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub register: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub region: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub temporal: Vec<String>,
}

impl Labels {
    pub fn is_empty(&self) -> bool {
        self.register.is_empty()
            && self.domain.is_empty()
            && self.region.is_empty()
            && self.temporal.is_empty()
    }
}

/// Word-formation analysis from the Etymology section.
///
/// Affix spelling convention: prefixes carry a trailing `-`, suffixes a
/// leading `-`, interfixes both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Morphology {
    Prefixed {
        prefixes: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base: Option<String>,
    },
    Suffixed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base: Option<String>,
        suffixes: Vec<String>,
    },
    Circumfixed {
        prefixes: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base: Option<String>,
        suffixes: Vec<String>,
    },
    Affixed {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        components: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        prefixes: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        suffixes: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        interfixes: Vec<String>,
    },
    Compound {
        components: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        interfixes: Vec<String>,
    },
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// The output record per accepted page. See module docs for field rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub word: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pos: Vec<String>,
    #[serde(default, skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syllables: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morphology: Option<Morphology>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_phrase: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_proper_noun: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_vulgar: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_archaic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_rare: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_informal: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_technical: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_regional: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_dated: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_inflected: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_abbreviation: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

impl Entry {
    /// Fresh entry for a normalized word, attributed to this scanner.
    pub fn new(word: String) -> Self {
        Entry {
            word,
            sources: vec!["wikt".to_string()],
            ..Entry::default()
        }
    }

    /// Push a tag once, preserving first-observation order.
    pub(crate) fn push_unique(list: &mut Vec<String>, tag: String) {
        if !list.contains(&tag) {
            list.push(tag);
        }
    }
}
