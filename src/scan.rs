// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The scan pipeline: dump stream → pages → gates → extractor → JSONL.
//!
//! Single-threaded by default; one cooperative thread owns the I/O and
//! drives decompression, page extraction, filtering, and extraction in
//! sequence. With `parallelism > 1` (and the `parallel` feature), pages are
//! gathered into fixed batches and extracted with rayon; `par_iter`
//! preserves item order on collect, so output stays in page order and runs
//! stay byte-deterministic either way.
//!
//! The output file appears atomically: everything is written to a `.tmp`
//! sibling which is renamed into place only after a successful run, so a
//! failed or cancelled scan leaves nothing behind.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::extract::{Extractor, ExtractorCounters};
use crate::filter::{EntryFilter, RejectReason};
use crate::scanner::{Page, PageScanner};
use crate::stats::ScanStats;
use crate::stream::{DumpReader, TextChunks};

/// Pages handed to the worker pool per batch in the parallel
/// configuration; also the reorder window, since batches are written whole.
const BATCH_SIZE: usize = 256;

/// Library-level configuration for one scan run. The CLI only exposes
/// `limit` and `diagnostic`; the rest is for embedders and tests.
pub struct ScanOptions {
    /// Level-2 heading that selects the target language section.
    pub language: String,
    /// Language code used inside templates, e.g. `en`.
    pub code: String,
    /// Stop after this many written entries.
    pub limit: Option<u64>,
    /// Accept bodies whose `</text>` is missing (truncated dumps).
    pub diagnostic: bool,
    /// Page-level batch extraction on the rayon pool when > 1;
    /// 0 or 1 means single-threaded.
    pub parallelism: usize,
    /// Cooperative cancellation, checked at page boundaries.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            language: "English".to_string(),
            code: "en".to_string(),
            limit: None,
            diagnostic: false,
            parallelism: 1,
            cancel: None,
        }
    }
}

enum PageOutcome {
    Entry(String),
    Reject(RejectReason),
}

/// Run the full scanner pipeline from `input` to `output`.
pub fn run_scan(input: &Path, output: &Path, opts: &ScanOptions) -> Result<ScanStats> {
    let started = Instant::now();
    let reader = DumpReader::open(input)?;
    let mut scanner = PageScanner::new(TextChunks::new(reader), opts.diagnostic);

    let tmp_path = tmp_sibling(output);
    let result = scan_into(&mut scanner, &tmp_path, opts);

    match result {
        Ok(mut stats) => {
            stats.malformed_pages = scanner.malformed_pages;
            fs::rename(&tmp_path, output)?;
            eprintln!("{}", stats.summary(started.elapsed()));
            Ok(stats)
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            Err(e)
        }
    }
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn scan_into(
    scanner: &mut PageScanner<DumpReader>,
    tmp_path: &Path,
    opts: &ScanOptions,
) -> Result<ScanStats> {
    let filter = EntryFilter::new(&opts.language);
    let extractor = Extractor::new(&opts.language, &opts.code);
    let mut writer = BufWriter::with_capacity(256 * 1024, File::create(tmp_path)?);
    let mut stats = ScanStats::default();

    let progress = spinner();

    #[cfg(feature = "parallel")]
    let parallel = opts.parallelism > 1;
    #[cfg(not(feature = "parallel"))]
    let parallel = false;

    let mut batch: Vec<Page> = Vec::new();
    let mut done = false;
    while !done {
        check_cancel(opts)?;
        match scanner.next_page()? {
            Some(page) => {
                stats.pages += 1;
                tick(&progress, &stats);
                if parallel {
                    batch.push(page);
                    if batch.len() >= BATCH_SIZE {
                        done = drain_batch(&mut batch, &filter, &extractor, opts, &mut writer, &mut stats)?;
                    }
                } else {
                    let (outcome, counters) = process_page(&page, &filter, &extractor);
                    done = record(outcome, &counters, &mut writer, &mut stats, opts)?;
                }
            }
            None => break,
        }
    }
    if !done && !batch.is_empty() {
        drain_batch(&mut batch, &filter, &extractor, opts, &mut writer, &mut stats)?;
    }

    finish_progress(progress);
    writer.flush()?;
    Ok(stats)
}

/// Classify one page and, when accepted, produce its serialized entry line.
fn process_page(
    page: &Page,
    filter: &EntryFilter,
    extractor: &Extractor,
) -> (PageOutcome, ExtractorCounters) {
    match filter.evaluate(page) {
        Ok(section) => {
            let (entry, counters) = extractor.extract(&page.title, section);
            let line = serde_json::to_string(&entry)
                .expect("entry serialization has no fallible fields");
            (PageOutcome::Entry(line), counters)
        }
        Err(reason) => (PageOutcome::Reject(reason), ExtractorCounters::default()),
    }
}

/// Fold one outcome into the output; returns true when the limit is reached.
fn record(
    outcome: PageOutcome,
    counters: &ExtractorCounters,
    writer: &mut BufWriter<File>,
    stats: &mut ScanStats,
    opts: &ScanOptions,
) -> Result<bool> {
    stats.warnings.merge(counters);
    match outcome {
        PageOutcome::Entry(line) => {
            writeln!(writer, "{}", line)?;
            stats.entries += 1;
            Ok(opts.limit.is_some_and(|l| stats.entries >= l))
        }
        PageOutcome::Reject(reason) => {
            stats.record_reject(reason);
            Ok(false)
        }
    }
}

#[cfg(feature = "parallel")]
fn drain_batch(
    batch: &mut Vec<Page>,
    filter: &EntryFilter,
    extractor: &Extractor,
    opts: &ScanOptions,
    writer: &mut BufWriter<File>,
    stats: &mut ScanStats,
) -> Result<bool> {
    let outcomes: Vec<(PageOutcome, ExtractorCounters)> = batch
        .par_iter()
        .map(|page| process_page(page, filter, extractor))
        .collect();
    batch.clear();
    for (outcome, counters) in outcomes {
        if record(outcome, &counters, writer, stats, opts)? {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(not(feature = "parallel"))]
fn drain_batch(
    batch: &mut Vec<Page>,
    filter: &EntryFilter,
    extractor: &Extractor,
    opts: &ScanOptions,
    writer: &mut BufWriter<File>,
    stats: &mut ScanStats,
) -> Result<bool> {
    for page in batch.drain(..) {
        let (outcome, counters) = process_page(&page, filter, extractor);
        if record(outcome, &counters, writer, stats, opts)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn check_cancel(opts: &ScanOptions) -> Result<()> {
    if let Some(token) = &opts.cancel {
        if token.load(Ordering::Relaxed) {
            return Err(Error::Cancelled);
        }
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .expect("static spinner template"),
    );
    pb
}

#[cfg(feature = "parallel")]
fn tick(pb: &ProgressBar, stats: &ScanStats) {
    if stats.pages % 1000 == 0 {
        pb.set_message(format!(
            "pages {} | entries {} | rejected {}",
            stats.pages,
            stats.entries,
            stats.rejected()
        ));
        pb.tick();
    }
}

#[cfg(feature = "parallel")]
fn finish_progress(pb: ProgressBar) {
    pb.finish_and_clear();
}

#[cfg(not(feature = "parallel"))]
fn spinner() {}

#[cfg(not(feature = "parallel"))]
fn tick(_: &(), _: &ScanStats) {}

#[cfg(not(feature = "parallel"))]
fn finish_progress(_: ()) {}
