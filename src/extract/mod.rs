// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Rule-based feature extraction over an accepted language section.
//!
//! Each rule family recognizes one template or heading shape and fills one
//! part of the [`Entry`]; rules are independent, side-effect-free over each
//! other, and composed by union, so their relative order is irrelevant. A
//! rule hitting malformed input drops its contribution and bumps a counter;
//! nothing in here can abort an entry.
//!
//! | Family                 | Recognizes                                   | Emits        |
//! |------------------------|----------------------------------------------|--------------|
//! | [`pos`]                | level-3+ headings, head templates            | `pos` tags   |
//! | [`labels`]             | `{{lb|…}}` and friends                       | `labels`     |
//! | [`syllables`]          | hyphenation / rhymes / syllable categories   | `syllables`  |
//! | [`morphology`]         | affix templates in the Etymology subsection  | `morphology` |
//! | [`flags`]              | inflection/abbreviation markers, label state | `is_*` flags |
//!
//! Patterns that embed the target language are compiled once in
//! [`Extractor::new`]; the structural patterns are process-wide statics.

pub mod flags;
pub mod labels;
pub mod morphology;
pub mod pos;
pub mod syllables;

use unicode_normalization::UnicodeNormalization;

use crate::entry::Entry;

/// Per-rule anomaly counters. These are warnings, not errors: the entry is
/// still produced without the offending rule's contribution.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractorCounters {
    /// Label tags absent from the classification table.
    pub unknown_labels: u64,
    /// Hyphenation templates rejected as incomplete.
    pub incomplete_hyphenation: u64,
    /// Morphology templates with no usable arguments.
    pub malformed_morphology: u64,
}

impl ExtractorCounters {
    pub fn merge(&mut self, other: &ExtractorCounters) {
        self.unknown_labels += other.unknown_labels;
        self.incomplete_hyphenation += other.incomplete_hyphenation;
        self.malformed_morphology += other.malformed_morphology;
    }
}

/// The composed rule set for one target language.
pub struct Extractor {
    pos: pos::PosRules,
    labels: labels::LabelRules,
    syllables: syllables::SyllableRules,
    morphology: morphology::MorphologyRules,
    flags: flags::FlagRules,
}

impl Extractor {
    /// Compile the rule set for `(language, code)`, e.g. `("English", "en")`.
    pub fn new(language: &str, code: &str) -> Extractor {
        Extractor {
            pos: pos::PosRules::new(code),
            labels: labels::LabelRules::new(code),
            syllables: syllables::SyllableRules::new(language, code),
            morphology: morphology::MorphologyRules::new(code),
            flags: flags::FlagRules::new(language, code),
        }
    }

    /// Pure function from (title, language section) to (entry, counters).
    pub fn extract(&self, title: &str, section: &str) -> (Entry, ExtractorCounters) {
        let word: String = title.trim().nfkc().collect();
        let mut entry = Entry::new(word);
        let mut counters = ExtractorCounters::default();

        self.pos.apply(section, &mut entry);
        self.labels.apply(section, &mut entry, &mut counters);
        entry.syllables = self.syllables.apply(section, &mut counters);
        entry.morphology = self.morphology.apply(section, &mut counters);
        self.flags.apply(section, &mut entry);

        (entry, counters)
    }
}

/// NFKC-normalize and trim one extracted value.
pub(crate) fn clean(value: &str) -> String {
    value.trim().nfkc().collect()
}
