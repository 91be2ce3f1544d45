// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Part-of-speech tags from section headings and head templates.
//!
//! Headings are the authoritative source; the template families
//! `{{head|<lang>|<pos>}}` and `{{<lang>-<pos>}}` are a fallback consulted
//! only when no heading produced a tag. Both sources normalize into the
//! same closed vocabulary; anything outside it is ignored.

use lazy_static::lazy_static;
use phf::phf_map;
use regex::Regex;

use crate::entry::Entry;

lazy_static! {
    // Level-3 or deeper headings. [^=] keeps the capture from eating the
    // closing run of =.
    static ref POS_HEADING_RE: Regex =
        Regex::new(r"(?m)^===+\s*([^=].*?)\s*===+\s*$").unwrap();
}

/// The closed POS vocabulary: canonical lowercase tag per heading form.
static POS_HEADINGS: phf::Map<&'static str, &'static str> = phf_map! {
    "noun" => "noun",
    "proper noun" => "proper noun",
    "verb" => "verb",
    "adjective" => "adjective",
    "adverb" => "adverb",
    "pronoun" => "pronoun",
    "preposition" => "preposition",
    "postposition" => "postposition",
    "conjunction" => "conjunction",
    "interjection" => "interjection",
    "determiner" => "determiner",
    "numeral" => "numeral",
    "particle" => "particle",
    "article" => "article",
};

/// Template POS names, including the abbreviated `{{en-adj}}`-style forms.
static HEAD_POS: phf::Map<&'static str, &'static str> = phf_map! {
    "noun" => "noun",
    "proper noun" => "proper noun",
    "prop" => "proper noun",
    "verb" => "verb",
    "adjective" => "adjective",
    "adj" => "adjective",
    "adverb" => "adverb",
    "adv" => "adverb",
    "pronoun" => "pronoun",
    "pron" => "pronoun",
    "preposition" => "preposition",
    "prep" => "preposition",
    "postposition" => "postposition",
    "postp" => "postposition",
    "conjunction" => "conjunction",
    "conj" => "conjunction",
    "interjection" => "interjection",
    "interj" => "interjection",
    "intj" => "interjection",
    "determiner" => "determiner",
    "det" => "determiner",
    "numeral" => "numeral",
    "num" => "numeral",
    "particle" => "particle",
    "part" => "particle",
    "article" => "article",
    "art" => "article",
};

pub(crate) struct PosRules {
    head_re: Regex,
    lang_re: Regex,
}

impl PosRules {
    pub(crate) fn new(code: &str) -> Self {
        let code = regex::escape(code);
        PosRules {
            head_re: Regex::new(&format!(r"(?i)\{{\{{head\|{}\|([^}}|]+)", code))
                .expect("head template pattern"),
            lang_re: Regex::new(&format!(r"(?i)\{{\{{{}-([a-z][a-z ]*)", code))
                .expect("language pos template pattern"),
        }
    }

    pub(crate) fn apply(&self, section: &str, entry: &mut Entry) {
        for cap in POS_HEADING_RE.captures_iter(section) {
            if let Some(tag) = POS_HEADINGS.get(normalize_heading(&cap[1]).as_str()) {
                Entry::push_unique(&mut entry.pos, (*tag).to_string());
            }
        }
        if !entry.pos.is_empty() {
            return;
        }
        for cap in self.head_re.captures_iter(section) {
            if let Some(tag) = HEAD_POS.get(normalize_heading(&cap[1]).as_str()) {
                Entry::push_unique(&mut entry.pos, (*tag).to_string());
            }
        }
        for cap in self.lang_re.captures_iter(section) {
            if let Some(tag) = HEAD_POS.get(normalize_heading(&cap[1]).as_str()) {
                Entry::push_unique(&mut entry.pos, (*tag).to_string());
            }
        }
    }
}

/// Lowercase and collapse internal whitespace so "Proper  Noun" still maps.
fn normalize_heading(heading: &str) -> String {
    heading
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
