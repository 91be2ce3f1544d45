// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Page extraction from the decompressed XML stream.
//!
//! No DOM, no XML parser: the dump's wrapper structure is rigid enough that
//! a forward scan over a rolling buffer finds `<page>…</page>` regions and
//! three anchored regexes pull out title, namespace, and body. Everything
//! between the wrapper tags is opaque wikitext as far as this module is
//! concerned; content-level oddities never raise.
//!
//! Failure policy per the wrapper level: a page without a `<title>` is
//! counted and skipped, a stream whose prefix never produces page structure
//! within the buffer bound is a [`Error::Parse`], and a truncated final page
//! is only accepted when diagnostic mode is on.

use std::io::Read;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};
use crate::stream::TextChunks;

/// Upper bound on a single `<page>` region. The largest real entries are a
/// few hundred KiB of wikitext; anything past this is a broken stream.
const MAX_PAGE_BYTES: usize = 8 * 1024 * 1024;

/// How far we scan for the first `<page>` before declaring the prefix
/// malformed. The siteinfo preamble is a few KiB.
const MAX_PREFIX_BYTES: u64 = 4 * 1024 * 1024;

lazy_static! {
    static ref TITLE_RE: Regex = Regex::new(r"<title>([^<]*)</title>").unwrap();
    static ref NS_RE: Regex = Regex::new(r"<ns>(\d+)</ns>").unwrap();
    // Production path: body requires the closing tag.
    static ref TEXT_RE: Regex = Regex::new(r"(?s)<text[^>]*>(.*?)</text>").unwrap();
    // Diagnostic path: accept an open-ended body.
    static ref TEXT_OPEN_RE: Regex = Regex::new(r"(?s)<text[^>]*>(.*)").unwrap();
}

/// One record extracted from the dump. Ephemeral: owned strings, dropped
/// after feature extraction.
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    /// Namespace identifier; `None` when the dump omitted `<ns>` (readers
    /// treat that as main, the filter applies its title-prefix fallback).
    pub ns: Option<i32>,
    pub body: String,
}

/// Forward-scanning page state machine over a rolling buffer.
pub struct PageScanner<R: Read> {
    chunks: TextChunks<R>,
    buf: String,
    /// Decompressed bytes drained from the front of `buf`.
    consumed: u64,
    eof: bool,
    diagnostic: bool,
    seen_page: bool,
    /// Pages dropped for missing wrapper fields.
    pub malformed_pages: u64,
}

impl<R: Read> PageScanner<R> {
    pub fn new(chunks: TextChunks<R>, diagnostic: bool) -> Self {
        PageScanner {
            chunks,
            buf: String::new(),
            consumed: 0,
            eof: false,
            diagnostic,
            seen_page: false,
            malformed_pages: 0,
        }
    }

    /// Next page record, or `None` at end of stream. Malformed pages are
    /// skipped internally; only wrapper-structure failures return `Err`.
    pub fn next_page(&mut self) -> Result<Option<Page>> {
        loop {
            if let Some(start) = self.buf.find("<page>") {
                self.seen_page = true;
                if let Some(rel) = self.buf[start..].find("</page>") {
                    let end = start + rel + "</page>".len();
                    let page = parse_page(&self.buf[start..end], self.diagnostic);
                    self.drain(end);
                    match page {
                        Some(p) => return Ok(Some(p)),
                        None => {
                            self.malformed_pages += 1;
                            continue;
                        }
                    }
                }
                if self.eof {
                    // Truncated final page region.
                    if self.diagnostic {
                        let page = parse_page(&self.buf[start..], true);
                        self.buf.clear();
                        if let Some(p) = page {
                            return Ok(Some(p));
                        }
                        self.malformed_pages += 1;
                    } else {
                        self.malformed_pages += 1;
                        self.buf.clear();
                    }
                    return Ok(None);
                }
                if start > 0 {
                    self.drain(start);
                }
                if self.buf.len() > MAX_PAGE_BYTES {
                    return Err(Error::Parse {
                        offset: self.consumed,
                        message: format!(
                            "unterminated <page> region exceeds {} bytes",
                            MAX_PAGE_BYTES
                        ),
                    });
                }
            } else {
                if self.eof {
                    return Ok(None);
                }
                if !self.seen_page && self.consumed > MAX_PREFIX_BYTES {
                    return Err(Error::Parse {
                        offset: self.consumed,
                        message: "no <page> element in stream prefix".to_string(),
                    });
                }
                // Keep a tag-sized tail so "<pag" split across a seam survives.
                let keep = self.buf.len().saturating_sub("<page>".len() - 1);
                let keep = floor_char_boundary(&self.buf, keep);
                if keep > 0 {
                    self.drain(keep);
                }
            }
            match self.chunks.next_chunk()? {
                Some(chunk) => self.buf.push_str(&chunk),
                None => self.eof = true,
            }
        }
    }

    fn drain(&mut self, upto: usize) {
        self.consumed += upto as u64;
        self.buf.drain(..upto);
    }
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Pull title, namespace, and body out of one `<page>` region. `None` means
/// the page is malformed (missing title or body) and should be counted.
fn parse_page(region: &str, diagnostic: bool) -> Option<Page> {
    let title = TITLE_RE.captures(region)?.get(1)?.as_str().to_string();
    if title.is_empty() {
        return None;
    }
    let ns = NS_RE
        .captures(region)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<i32>().ok());
    let body = match TEXT_RE.captures(region) {
        Some(c) => c.get(1)?.as_str().to_string(),
        None if diagnostic => {
            let c = TEXT_OPEN_RE.captures(region)?;
            let raw = c.get(1)?.as_str();
            // Body runs to </page> (or end of region for a truncated tail).
            raw.strip_suffix("</page>").unwrap_or(raw).to_string()
        }
        None => return None,
    };
    Some(Page {
        title,
        ns,
        body,
    })
}
