// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Boolean predicates derived from the other rules' output and from
//! inflection/abbreviation markers in the section.
//!
//! Category-based detection matches the literal `[[Category:` prefix and
//! nothing else. Substring matching would also hit category names quoted in
//! link text or discussion, which is exactly the false-positive class the
//! abbreviation detector is known for; the strict prefix is mandatory.

use crate::entry::Entry;

/// Template families that mark an inflected form.
const INFLECTION_TEMPLATES: &[&str] = &[
    "past of",
    "past participle of",
    "present participle of",
    "comparative of",
    "superlative of",
    "plural of",
    "inflection of",
];

/// Category suffixes that mark an inflected form.
const INFLECTION_CATEGORIES: &[&str] = &[
    "verb forms",
    "noun forms",
    "adjective forms",
    "adverb forms",
    "plurals",
];

/// Category suffixes that mark an abbreviation.
const ABBREVIATION_CATEGORIES: &[&str] = &["abbreviations", "acronyms", "initialisms"];

pub(crate) struct FlagRules {
    inflection_templates: Vec<String>,
    inflection_categories: Vec<String>,
    abbreviation_categories: Vec<String>,
}

impl FlagRules {
    pub(crate) fn new(language: &str, code: &str) -> Self {
        FlagRules {
            inflection_templates: INFLECTION_TEMPLATES
                .iter()
                .map(|t| format!("{{{{{}|{}", t, code))
                .collect(),
            inflection_categories: INFLECTION_CATEGORIES
                .iter()
                .map(|c| format!("[[Category:{} {}", language, c))
                .collect(),
            abbreviation_categories: ABBREVIATION_CATEGORIES
                .iter()
                .map(|c| format!("[[Category:{} {}", language, c))
                .collect(),
        }
    }

    pub(crate) fn apply(&self, section: &str, entry: &mut Entry) {
        entry.is_phrase = entry.word.contains(char::is_whitespace);
        entry.is_proper_noun = entry.pos.iter().any(|p| p == "proper noun");

        let register = &entry.labels.register;
        let temporal = &entry.labels.temporal;
        entry.is_vulgar = contains_any(register, &["vulgar", "offensive"]);
        entry.is_archaic = contains_any(temporal, &["archaic", "obsolete"]);
        entry.is_rare = contains_any(temporal, &["rare"]);
        entry.is_dated = contains_any(temporal, &["dated"]);
        entry.is_informal = contains_any(register, &["informal", "colloquial"]);
        entry.is_technical = !entry.labels.domain.is_empty();
        entry.is_regional = !entry.labels.region.is_empty();

        entry.is_inflected = self.inflection_templates.iter().any(|t| section.contains(t))
            || self
                .inflection_categories
                .iter()
                .any(|c| section.contains(c));
        entry.is_abbreviation = self
            .abbreviation_categories
            .iter()
            .any(|c| section.contains(c));
    }
}

fn contains_any(list: &[String], tags: &[&str]) -> bool {
    list.iter().any(|t| tags.contains(&t.as_str()))
}
