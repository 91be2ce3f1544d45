// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word-formation templates in the Etymology subsection.
//!
//! The subsection runs from an `===Etymology…===` heading to the next
//! heading at the same or a higher level; deeper headings stay inside it.
//! Within that slice the first recognized template of the family
//! {`suffix`, `prefix`, `affix`/`af`, `compound`, `confix`/`con`,
//! `circumfix`, `surface analysis`/`surf`} produces the entry's tagged
//! morphology record. Parameter-style `key=value` arguments are noise and
//! are stripped before interpretation.
//!
//! Affix spelling is canonicalized on the way out: prefixes get their
//! trailing `-`, suffixes their leading `-`, interfixes both (`-o-`).

use lazy_static::lazy_static;
use regex::Regex;

use super::{clean, ExtractorCounters};
use crate::entry::Morphology;

lazy_static! {
    static ref ETYMOLOGY_HEAD_RE: Regex =
        Regex::new(r"(?m)^===\s*Etymology[^=]*===\s*$").unwrap();
    // Next level-2 or level-3 heading; ====… stays inside the subsection.
    static ref NEXT_HEAD_RE: Regex = Regex::new(r"(?m)^(?:==|===)[^=]").unwrap();
}

pub(crate) struct MorphologyRules {
    template_re: Regex,
}

impl MorphologyRules {
    pub(crate) fn new(code: &str) -> Self {
        let code = regex::escape(code);
        MorphologyRules {
            template_re: Regex::new(&format!(
                r"(?i)\{{\{{(suffix|prefix|affix|af|compound|confix|con|circumfix|surface analysis|surf)\|{}\|([^}}]*)\}}\}}",
                code
            ))
            .expect("morphology template pattern"),
        }
    }

    pub(crate) fn apply(
        &self,
        section: &str,
        counters: &mut ExtractorCounters,
    ) -> Option<Morphology> {
        let etymology = etymology_slice(section)?;
        let cap = self.template_re.captures(etymology)?;
        let name = cap[1].to_lowercase();
        let parts: Vec<String> = cap[2]
            .split('|')
            .map(clean)
            .filter(|s| !s.is_empty() && s != "-" && !s.contains('='))
            .collect();
        if parts.is_empty() {
            counters.malformed_morphology += 1;
            return None;
        }
        let record = match name.as_str() {
            "prefix" => from_prefix(parts),
            "suffix" => from_suffix(parts),
            "confix" | "con" | "circumfix" => from_circumfix(parts, counters)?,
            "compound" => from_compound(parts),
            // affix, af, surface analysis, surf
            _ => from_affix(parts),
        };
        Some(record)
    }
}

/// The Etymology subsection slice, or `None` when the section has none.
fn etymology_slice(section: &str) -> Option<&str> {
    let head = ETYMOLOGY_HEAD_RE.find(section)?;
    let rest = &section[head.end()..];
    match NEXT_HEAD_RE.find(rest) {
        Some(next) => Some(&rest[..next.start()]),
        None => Some(rest),
    }
}

/// `{{prefix|l|p₁|…|base}}`: everything before the last argument prefixes it.
fn from_prefix(mut parts: Vec<String>) -> Morphology {
    let base = if parts.len() > 1 { parts.pop() } else { None };
    Morphology::Prefixed {
        prefixes: parts.into_iter().map(mark_prefix).collect(),
        base,
    }
}

/// `{{suffix|l|base|s₁|…}}`: the first argument is the base.
fn from_suffix(parts: Vec<String>) -> Morphology {
    let mut iter = parts.into_iter();
    let first = iter.next().unwrap_or_default();
    let suffixes: Vec<String> = iter.map(mark_suffix).collect();
    if suffixes.is_empty() {
        Morphology::Suffixed {
            base: None,
            suffixes: vec![mark_suffix(first)],
        }
    } else {
        Morphology::Suffixed {
            base: Some(first),
            suffixes,
        }
    }
}

/// `{{confix|l|pre|suf}}` or `{{confix|l|pre|base|suf}}`.
fn from_circumfix(
    mut parts: Vec<String>,
    counters: &mut ExtractorCounters,
) -> Option<Morphology> {
    if parts.len() < 2 {
        counters.malformed_morphology += 1;
        return None;
    }
    let suffix = mark_suffix(parts.pop().expect("len checked above"));
    let prefix = mark_prefix(parts.remove(0));
    let base = parts.into_iter().next();
    Some(Morphology::Circumfixed {
        prefixes: vec![prefix],
        base,
        suffixes: vec![suffix],
    })
}

fn from_compound(parts: Vec<String>) -> Morphology {
    let (interfixes, components): (Vec<String>, Vec<String>) =
        parts.into_iter().partition(|p| is_interfix(p));
    Morphology::Compound {
        components,
        interfixes,
    }
}

/// General affixation: classify each argument by its dash shape.
fn from_affix(parts: Vec<String>) -> Morphology {
    let mut components = Vec::new();
    let mut prefixes = Vec::new();
    let mut suffixes = Vec::new();
    let mut interfixes = Vec::new();
    for part in parts {
        if is_interfix(&part) {
            interfixes.push(part);
        } else if part.ends_with('-') {
            prefixes.push(part);
        } else if part.starts_with('-') {
            suffixes.push(part);
        } else {
            components.push(part);
        }
    }
    Morphology::Affixed {
        components,
        prefixes,
        suffixes,
        interfixes,
    }
}

fn is_interfix(part: &str) -> bool {
    part.chars().count() >= 2 && part.starts_with('-') && part.ends_with('-')
}

fn mark_prefix(mut p: String) -> String {
    if !p.ends_with('-') {
        p.push('-');
    }
    p
}

fn mark_suffix(s: String) -> String {
    if s.starts_with('-') {
        s
    } else {
        format!("-{}", s)
    }
}
