// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Syllable counts from authoritative markers only. Never estimated.
//!
//! Three sources tried in order, first non-null wins:
//!
//! 1. `{{hyphenation|<lang>|s₁|s₂|…}}`: count the segments.
//! 2. `{{rhymes|<lang>|…|s=N}}`: the explicit count parameter.
//! 3. `[[Category:<Lang> N-syllable words]]`: the category assignment.
//!
//! The language code in source 1 is consumed by the `|<lang>|` anchor, so
//! captured segments are NEVER filtered against language codes: a word
//! whose first syllable happens to spell "en" keeps that syllable. A lone
//! segment longer than three characters is an unhyphenated word dropped
//! into the template, not a monosyllable; it is rejected and counted.

use regex::Regex;

use super::ExtractorCounters;

pub(crate) struct SyllableRules {
    hyph_re: Regex,
    rhymes_re: Regex,
    category_re: Regex,
}

impl SyllableRules {
    pub(crate) fn new(language: &str, code: &str) -> Self {
        let language = regex::escape(language);
        let code = regex::escape(code);
        SyllableRules {
            hyph_re: Regex::new(&format!(
                r"(?i)\{{\{{hyph(?:enation)?\|{}\|([^}}]*)\}}\}}",
                code
            ))
            .expect("hyphenation pattern"),
            rhymes_re: Regex::new(&format!(r"(?i)\{{\{{rhymes\|{}\|[^}}]*?s=(\d+)", code))
                .expect("rhymes pattern"),
            // Literal [[Category: prefix so category links in running text
            // do not match.
            category_re: Regex::new(&format!(
                r"\[\[Category:{} (\d+)-syllable words",
                language
            ))
            .expect("syllable category pattern"),
        }
    }

    pub(crate) fn apply(&self, section: &str, counters: &mut ExtractorCounters) -> Option<u32> {
        if let Some(n) = self.from_hyphenation(section, counters) {
            return Some(n);
        }
        if let Some(n) = self.from_rhymes(section) {
            return Some(n);
        }
        self.from_category(section)
    }

    fn from_hyphenation(&self, section: &str, counters: &mut ExtractorCounters) -> Option<u32> {
        let cap = self.hyph_re.captures(section)?;
        let segments: Vec<&str> = cap[1]
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.contains('='))
            .collect();
        match segments.len() {
            0 => None,
            1 if segments[0].chars().count() > 3 => {
                counters.incomplete_hyphenation += 1;
                None
            }
            n => Some(n as u32),
        }
    }

    fn from_rhymes(&self, section: &str) -> Option<u32> {
        self.rhymes_re
            .captures(section)
            .and_then(|c| c[1].parse().ok())
    }

    fn from_category(&self, section: &str) -> Option<u32> {
        self.category_re
            .captures(section)
            .and_then(|c| c[1].parse().ok())
    }
}
