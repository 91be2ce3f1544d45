// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Usage labels from `{{lb|…}}`, `{{label|…}}`, and `{{term-label|…}}`.
//!
//! Classification lives in a static table maintained as data: each known
//! tag maps to one of four categories and a canonical spelling (region tags
//! normalize to locale codes, everything else keeps its own lowercase
//! form). Unknown tags are dropped and counted; the accumulated lists keep
//! observation order and drop duplicates.

use phf::phf_map;
use regex::Regex;

use super::ExtractorCounters;
use crate::entry::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LabelCategory {
    Register,
    Temporal,
    Domain,
    Region,
}

use LabelCategory::{Domain, Region, Register, Temporal};

/// Tag → (category, canonical form). Extend here, not in code paths.
static LABEL_TABLE: phf::Map<&'static str, (LabelCategory, &'static str)> = phf_map! {
    // register
    "vulgar" => (Register, "vulgar"),
    "offensive" => (Register, "offensive"),
    "derogatory" => (Register, "derogatory"),
    "pejorative" => (Register, "derogatory"),
    "informal" => (Register, "informal"),
    "colloquial" => (Register, "colloquial"),
    "slang" => (Register, "slang"),
    "formal" => (Register, "formal"),
    "euphemistic" => (Register, "euphemistic"),
    "humorous" => (Register, "humorous"),
    "jocular" => (Register, "humorous"),
    "literary" => (Register, "literary"),
    "poetic" => (Register, "poetic"),
    // temporal
    "archaic" => (Temporal, "archaic"),
    "obsolete" => (Temporal, "obsolete"),
    "dated" => (Temporal, "dated"),
    "rare" => (Temporal, "rare"),
    "historical" => (Temporal, "historical"),
    // domain
    "medicine" => (Domain, "medicine"),
    "anatomy" => (Domain, "anatomy"),
    "pathology" => (Domain, "pathology"),
    "pharmacology" => (Domain, "pharmacology"),
    "law" => (Domain, "law"),
    "computing" => (Domain, "computing"),
    "mathematics" => (Domain, "mathematics"),
    "geometry" => (Domain, "geometry"),
    "physics" => (Domain, "physics"),
    "chemistry" => (Domain, "chemistry"),
    "biology" => (Domain, "biology"),
    "botany" => (Domain, "botany"),
    "zoology" => (Domain, "zoology"),
    "ornithology" => (Domain, "ornithology"),
    "linguistics" => (Domain, "linguistics"),
    "grammar" => (Domain, "grammar"),
    "music" => (Domain, "music"),
    "military" => (Domain, "military"),
    "nautical" => (Domain, "nautical"),
    "aviation" => (Domain, "aviation"),
    "astronomy" => (Domain, "astronomy"),
    "geology" => (Domain, "geology"),
    "finance" => (Domain, "finance"),
    "economics" => (Domain, "economics"),
    "religion" => (Domain, "religion"),
    "philosophy" => (Domain, "philosophy"),
    "psychology" => (Domain, "psychology"),
    "engineering" => (Domain, "engineering"),
    "electronics" => (Domain, "electronics"),
    "architecture" => (Domain, "architecture"),
    "heraldry" => (Domain, "heraldry"),
    "printing" => (Domain, "printing"),
    "photography" => (Domain, "photography"),
    "cooking" => (Domain, "cooking"),
    "sports" => (Domain, "sports"),
    "cricket" => (Domain, "cricket"),
    "baseball" => (Domain, "baseball"),
    "golf" => (Domain, "golf"),
    "chess" => (Domain, "chess"),
    "poker" => (Domain, "poker"),
    // region
    "british" => (Region, "en-gb"),
    "uk" => (Region, "en-gb"),
    "us" => (Region, "en-us"),
    "american" => (Region, "en-us"),
    "canada" => (Region, "en-ca"),
    "canadian" => (Region, "en-ca"),
    "australia" => (Region, "en-au"),
    "australian" => (Region, "en-au"),
    "new zealand" => (Region, "en-nz"),
    "nz" => (Region, "en-nz"),
    "ireland" => (Region, "en-ie"),
    "irish" => (Region, "en-ie"),
    "india" => (Region, "en-in"),
    "indian" => (Region, "en-in"),
    "south africa" => (Region, "en-za"),
};

pub(crate) struct LabelRules {
    lb_re: Regex,
}

impl LabelRules {
    pub(crate) fn new(code: &str) -> Self {
        let code = regex::escape(code);
        LabelRules {
            lb_re: Regex::new(&format!(
                r"(?i)\{{\{{(?:lb|label|term-label)\|{}\|([^}}]*)\}}\}}",
                code
            ))
            .expect("label template pattern"),
        }
    }

    pub(crate) fn apply(
        &self,
        section: &str,
        entry: &mut Entry,
        counters: &mut ExtractorCounters,
    ) {
        for cap in self.lb_re.captures_iter(section) {
            for raw in cap[1].split('|') {
                let tag = raw.trim().to_lowercase();
                if tag.is_empty() || tag.contains('=') {
                    continue;
                }
                match LABEL_TABLE.get(tag.as_str()) {
                    Some(&(category, canonical)) => {
                        let list = match category {
                            Register => &mut entry.labels.register,
                            Temporal => &mut entry.labels.temporal,
                            Domain => &mut entry.labels.domain,
                            Region => &mut entry.labels.region,
                        };
                        Entry::push_unique(list, canonical.to_string());
                    }
                    None => counters.unknown_labels += 1,
                }
            }
        }
    }
}
