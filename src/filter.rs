// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Load-shedding gates in front of the feature extractor.
//!
//! Ordering is contractual: cheap structural checks run before anything that
//! scans the body, and the body is sliced to the target-language section
//! exactly once. Each rejection maps to one [`RejectReason`] counter and the
//! page is never modified.
//!
//! The script gate is an explicit code-point window plus a literal
//! punctuation allow-list. Unicode category predicates are deliberately not
//! used: their tables move between releases and an invisible table update
//! must not move this gate.

use lazy_static::lazy_static;
use phf::{phf_set, Set};
use regex::Regex;

use crate::scanner::Page;

/// Title prefixes that mark non-content pages when `<ns>` is absent.
static NON_CONTENT_PREFIXES: Set<&'static str> = phf_set! {
    "Wiktionary",
    "Appendix",
    "Help",
    "Category",
    "Template",
    "Thesaurus",
    "Rhymes",
    "MediaWiki",
    "Module",
    "Reconstruction",
    "Citations",
    "Concordance",
    "Index",
    "Sign gloss",
    "Summary",
    "Transwiki",
};

/// Markers whose presence means the section carries no dictionary entry.
const NON_ENTRY_MARKERS: &[&str] = &["{{no entry|", "{{only in|"];

/// Punctuation accepted inside otherwise-Latin titles.
const ALLOWED_PUNCT: &[char] = &['\'', '\u{2019}', '\u{2018}', '-', '\u{2013}', '.', '/'];

/// Characters that disqualify a title outright (markup and entity residue).
const FORBIDDEN: &[char] = &['&', ';', '<', '>'];

lazy_static! {
    // Level-2 headings only: [^=] forbids the extra = of deeper levels.
    static ref LEVEL2_RE: Regex = Regex::new(r"(?m)^==\s*([^=]+?)\s*==$").unwrap();
}

/// Why a page was rejected, in gate order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Namespace,
    Redirect,
    Language,
    Script,
    DictOnly,
}

/// The five ordered gates, parameterized by target language.
pub struct EntryFilter {
    target_re: Regex,
}

impl EntryFilter {
    pub fn new(language: &str) -> Self {
        let target_re = Regex::new(&format!(r"(?m)^==\s*{}\s*==$", regex::escape(language)))
            .expect("escaped language name always forms a valid pattern");
        EntryFilter { target_re }
    }

    /// Run the gates in order, short-circuiting on the first rejection.
    /// On acceptance, returns the target-language section slice.
    pub fn evaluate<'a>(&self, page: &'a Page) -> std::result::Result<&'a str, RejectReason> {
        // 1. Namespace gate.
        match page.ns {
            Some(0) => {}
            Some(_) => return Err(RejectReason::Namespace),
            None => {
                if let Some((prefix, _)) = page.title.split_once(':') {
                    if NON_CONTENT_PREFIXES.contains(prefix) {
                        return Err(RejectReason::Namespace);
                    }
                }
            }
        }

        // 2. Redirect gate.
        let lead = page.body.trim_start();
        if lead
            .get(.."#REDIRECT".len())
            .is_some_and(|s| s.eq_ignore_ascii_case("#REDIRECT"))
        {
            return Err(RejectReason::Redirect);
        }

        // 3. Target-language gate: slice from the heading to the next
        //    level-2 heading or end of body.
        let heading = self
            .target_re
            .find(&page.body)
            .ok_or(RejectReason::Language)?;
        let rest = &page.body[heading.end()..];
        let section = match LEVEL2_RE.find(rest) {
            Some(next) => &rest[..next.start()],
            None => rest,
        };

        // 4. Script gate on the title.
        if !is_latin_title(&page.title) {
            return Err(RejectReason::Script);
        }

        // 5. Dictionary-only gate.
        if NON_ENTRY_MARKERS.iter().any(|m| section.contains(m)) {
            return Err(RejectReason::DictOnly);
        }

        Ok(section)
    }
}

/// Accept titles within the Latin-extended window U+0000..=U+024F, with the
/// literal punctuation allow-list, requiring at least one Latin letter.
fn is_latin_title(title: &str) -> bool {
    if title.trim().is_empty() {
        return false;
    }
    let mut saw_letter = false;
    for ch in title.chars() {
        if ch == ' ' {
            continue;
        }
        if ch.is_whitespace() {
            // Only the ordinary space joins multi-word entries.
            return false;
        }
        if FORBIDDEN.contains(&ch) {
            return false;
        }
        if ch.is_ascii_alphabetic() {
            saw_letter = true;
        } else if ch.is_ascii_digit() || ALLOWED_PUNCT.contains(&ch) {
            // fine as-is
        } else if ('\u{00C0}'..='\u{024F}').contains(&ch) {
            saw_letter = true;
        } else {
            return false;
        }
    }
    saw_letter
}
