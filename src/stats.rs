// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Run counters. Rejections and extractor anomalies are outcomes, not
//! errors; they accumulate here and are summarized once at the end of a
//! run. The pipeline thread owns this struct exclusively: parallel workers
//! report per-page deltas that the writer folds in, so no atomics are
//! needed and runs stay deterministic.

use std::time::Duration;

use crate::extract::ExtractorCounters;
use crate::filter::RejectReason;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    /// Pages seen in the dump.
    pub pages: u64,
    /// Entries written to the output.
    pub entries: u64,
    /// Pages dropped by the scanner for missing wrapper fields.
    pub malformed_pages: u64,
    pub reject_namespace: u64,
    pub reject_redirect: u64,
    pub reject_language: u64,
    pub reject_script: u64,
    pub reject_dict_only: u64,
    pub warnings: ExtractorCounters,
}

impl ScanStats {
    pub fn record_reject(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::Namespace => self.reject_namespace += 1,
            RejectReason::Redirect => self.reject_redirect += 1,
            RejectReason::Language => self.reject_language += 1,
            RejectReason::Script => self.reject_script += 1,
            RejectReason::DictOnly => self.reject_dict_only += 1,
        }
    }

    pub fn rejected(&self) -> u64 {
        self.reject_namespace
            + self.reject_redirect
            + self.reject_language
            + self.reject_script
            + self.reject_dict_only
    }

    /// Human-readable end-of-run summary for stderr.
    pub fn summary(&self, elapsed: Duration) -> String {
        let secs = elapsed.as_secs_f64().max(f64::EPSILON);
        format!(
            "pages {} | entries {} | rejected {} \
             (ns {}, redirect {}, language {}, script {}, dict-only {}) | \
             malformed {} | warnings (labels {}, hyphenation {}, morphology {}) | \
             {:.1}s, {:.0} pages/s",
            self.pages,
            self.entries,
            self.rejected(),
            self.reject_namespace,
            self.reject_redirect,
            self.reject_language,
            self.reject_script,
            self.reject_dict_only,
            self.malformed_pages,
            self.warnings.unknown_labels,
            self.warnings.incomplete_hyphenation,
            self.warnings.malformed_morphology,
            elapsed.as_secs_f64(),
            self.pages as f64 / secs,
        )
    }
}
