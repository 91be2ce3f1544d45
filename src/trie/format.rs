// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The OWTRIE on-disk format, versions 7 and 8. Little-endian throughout.
//!
//! Header, 24 bytes:
//!
//! | Offset | Size | Field                      |
//! |--------|------|----------------------------|
//! | 0      | 6    | Magic `OWTRIE`             |
//! | 6      | 2    | Version: 7 or 8            |
//! | 8      | 4    | Word count                 |
//! | 12     | 4    | Node count                 |
//! | 16     | 4    | Flags                      |
//! | 20     | 4    | Tail buffer size (bytes)   |
//!
//! Flags: bit 3 (0x08) RECURSIVE is always set; bit 5 (0x20) BROTLI marks a
//! v8 payload. All other bits are reserved and must be zero. A v8 file
//! carries a 4-byte compressed length right after the header, then the
//! brotli stream; decompressing yields the identical v7 payload.
//!
//! Payload: the three bitvectors (length + packed words + rank directory
//! tables), the label varints, then the tail size and the
//! recursively-serialized tail trie. Readers reject unknown versions,
//! unknown flag bits, and truncation with [`Error::Format`]; stored rank
//! directories are cross-checked against recomputation and a mismatch is
//! an [`Error::Integrity`].

use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::trie::bits::{decode_varint, encode_varint, RankSelect};
use crate::trie::query::Trie;

pub const MAGIC: &[u8; 6] = b"OWTRIE";
pub const VERSION_UNCOMPRESSED: u16 = 7;
pub const VERSION_BROTLI: u16 = 8;
pub const FLAG_RECURSIVE: u32 = 0x08;
pub const FLAG_BROTLI: u32 = 0x20;
const KNOWN_FLAGS: u32 = FLAG_RECURSIVE | FLAG_BROTLI;
pub const HEADER_SIZE: usize = 24;

/// Guard against adversarial nesting; real files use depth 1, maybe 2.
const MAX_TAIL_DEPTH: u32 = 8;

/// Brotli parameters matching the size targets: quality 11, 4 MiB window.
const BROTLI_BUFFER: usize = 4096;
const BROTLI_QUALITY: u32 = 11;
const BROTLI_WINDOW: u32 = 22;

/// Serialization flavor selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrieFormat {
    /// Version 7: uncompressed payload.
    V7,
    /// Version 8: brotli-compressed payload.
    V8,
}

impl Trie {
    /// Serialize to the requested format.
    pub fn to_bytes(&self, format: TrieFormat) -> Result<Vec<u8>> {
        let tail_bytes = match &self.tail {
            Some(tail) => tail.to_bytes(TrieFormat::V7)?,
            None => Vec::new(),
        };

        let mut payload = Vec::new();
        write_bitvec(&self.louds, &mut payload);
        write_bitvec(&self.terminal, &mut payload);
        write_bitvec(&self.link, &mut payload);
        payload.extend_from_slice(&(self.labels.len() as u32).to_le_bytes());
        for &label in &self.labels {
            encode_varint(label, &mut payload);
        }
        payload.extend_from_slice(&(tail_bytes.len() as u32).to_le_bytes());
        payload.extend_from_slice(&tail_bytes);

        let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
        let (version, flags) = match format {
            TrieFormat::V7 => (VERSION_UNCOMPRESSED, FLAG_RECURSIVE),
            TrieFormat::V8 => (VERSION_BROTLI, FLAG_RECURSIVE | FLAG_BROTLI),
        };
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&version.to_le_bytes());
        out.extend_from_slice(&self.word_count.to_le_bytes());
        out.extend_from_slice(&self.node_count.to_le_bytes());
        out.extend_from_slice(&flags.to_le_bytes());
        out.extend_from_slice(&(tail_bytes.len() as u32).to_le_bytes());

        match format {
            TrieFormat::V7 => out.extend_from_slice(&payload),
            TrieFormat::V8 => {
                let compressed = brotli_compress(&payload)?;
                out.extend_from_slice(&(compressed.len() as u32).to_le_bytes());
                out.extend_from_slice(&compressed);
            }
        }
        Ok(out)
    }

    /// Parse a serialized trie, verifying structure and directories.
    pub fn from_bytes(bytes: &[u8]) -> Result<Trie> {
        parse(bytes, 0)
    }
}

fn parse(bytes: &[u8], depth: u32) -> Result<Trie> {
    if depth > MAX_TAIL_DEPTH {
        return Err(Error::Format("tail recursion exceeds supported depth".to_string()));
    }
    if bytes.len() < HEADER_SIZE {
        return Err(Error::Format("truncated header".to_string()));
    }
    if &bytes[..6] != MAGIC {
        return Err(Error::Format("bad magic".to_string()));
    }
    let version = u16::from_le_bytes([bytes[6], bytes[7]]);
    let word_count = read_u32(bytes, 8);
    let node_count = read_u32(bytes, 12);
    let flags = read_u32(bytes, 16);
    let tail_size = read_u32(bytes, 20);

    if flags & !KNOWN_FLAGS != 0 {
        return Err(Error::Format(format!("unknown flag bits 0x{:08x}", flags)));
    }
    if flags & FLAG_RECURSIVE == 0 {
        return Err(Error::Format("RECURSIVE flag missing".to_string()));
    }
    let brotli_flag = flags & FLAG_BROTLI != 0;

    let payload_owned: Vec<u8>;
    let payload: &[u8] = match version {
        VERSION_UNCOMPRESSED => {
            if brotli_flag {
                return Err(Error::Format("BROTLI flag set on a v7 file".to_string()));
            }
            &bytes[HEADER_SIZE..]
        }
        VERSION_BROTLI => {
            if !brotli_flag {
                return Err(Error::Format("BROTLI flag missing on a v8 file".to_string()));
            }
            if depth > 0 {
                return Err(Error::Format("nested tail trie must be uncompressed".to_string()));
            }
            if bytes.len() < HEADER_SIZE + 4 {
                return Err(Error::Format("truncated compressed length".to_string()));
            }
            let clen = read_u32(bytes, HEADER_SIZE) as usize;
            let stream = bytes
                .get(HEADER_SIZE + 4..HEADER_SIZE + 4 + clen)
                .ok_or_else(|| Error::Format("truncated brotli stream".to_string()))?;
            if bytes.len() != HEADER_SIZE + 4 + clen {
                return Err(Error::Format("trailing bytes after brotli stream".to_string()));
            }
            payload_owned = brotli_decompress(stream)?;
            &payload_owned
        }
        other => return Err(Error::Format(format!("unsupported version {}", other))),
    };

    let mut reader = PayloadReader { bytes: payload, pos: 0 };
    let louds = read_bitvec(&mut reader)?;
    let terminal = read_bitvec(&mut reader)?;
    let link = read_bitvec(&mut reader)?;
    let label_count = reader.u32()? as usize;
    let mut labels = Vec::with_capacity(label_count.min(payload.len()));
    for _ in 0..label_count {
        labels.push(reader.varint()?);
    }
    let payload_tail_size = reader.u32()?;
    if payload_tail_size != tail_size {
        return Err(Error::Format(
            "header tail size disagrees with payload".to_string(),
        ));
    }
    let tail = if tail_size > 0 {
        let tail_bytes = reader.take(tail_size as usize)?;
        Some(Box::new(parse(tail_bytes, depth + 1)?))
    } else {
        None
    };
    if reader.pos != payload.len() {
        return Err(Error::Format("trailing bytes after payload".to_string()));
    }

    let trie = Trie {
        louds,
        terminal,
        link,
        labels,
        tail,
        node_count,
        word_count,
    };
    validate(&trie)?;
    Ok(trie)
}

/// Structural validation establishing the navigation invariants.
fn validate(trie: &Trie) -> Result<()> {
    let n = trie.node_count;
    if n == 0 {
        return Err(Error::Format("node count must be at least 1".to_string()));
    }
    if trie.louds.len() != 2 * n + 1 || trie.louds.count_ones() != n {
        return Err(Error::Format("louds shape disagrees with node count".to_string()));
    }
    if trie.terminal.len() != n || trie.link.len() != n {
        return Err(Error::Format(
            "terminal/link length disagrees with node count".to_string(),
        ));
    }
    if trie.labels.len() as u32 != n - 1 {
        return Err(Error::Format("label count disagrees with edge count".to_string()));
    }
    if trie.terminal.count_ones() != trie.word_count {
        return Err(Error::Format(
            "terminal popcount disagrees with word count".to_string(),
        ));
    }
    if n > 0 && trie.link.get(0) {
        return Err(Error::Format("root cannot carry a link edge".to_string()));
    }
    let tail_words = trie.tail.as_ref().map_or(0, |t| t.word_count);
    for node in 1..n {
        let label = trie.labels[(node - 1) as usize];
        if trie.link.get(node) {
            if label >= tail_words {
                return Err(Error::Format(format!(
                    "link label {} outside tail trie ({} words)",
                    label, tail_words
                )));
            }
        } else if char::from_u32(label).is_none() {
            return Err(Error::Format(format!("label {} is not a code point", label)));
        }
    }
    Ok(())
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn write_bitvec(rs: &RankSelect, out: &mut Vec<u8>) {
    out.extend_from_slice(&rs.len().to_le_bytes());
    for &word in rs.words() {
        out.extend_from_slice(&word.to_le_bytes());
    }
    for &sb in rs.superblocks() {
        out.extend_from_slice(&sb.to_le_bytes());
    }
    out.extend_from_slice(rs.blocks());
}

struct PayloadReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> PayloadReader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&e| e <= self.bytes.len())
            .ok_or_else(|| Error::Format("truncated payload".to_string()))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn varint(&mut self) -> Result<u32> {
        let (value, used) = decode_varint(&self.bytes[self.pos..])?;
        self.pos += used;
        Ok(value)
    }
}

fn read_bitvec(reader: &mut PayloadReader) -> Result<RankSelect> {
    let len = reader.u32()?;
    let n_words = (len as usize).div_ceil(32);
    let n_super = (len as usize).div_ceil(256);
    let mut words = Vec::with_capacity(n_words);
    for chunk in reader.take(n_words * 4)?.chunks_exact(4) {
        words.push(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    let mut superblocks = Vec::with_capacity(n_super);
    for chunk in reader.take(n_super * 4)?.chunks_exact(4) {
        superblocks.push(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    let blocks = reader.take(n_words)?.to_vec();
    // Bits past `len` in the last word must be clear, or rank math lies.
    if len % 32 != 0 {
        if let Some(&last) = words.last() {
            if last & !(!0u32 >> (32 - len % 32)) != 0 {
                return Err(Error::Format("set bits beyond bitvector length".to_string()));
            }
        }
    }
    RankSelect::from_parts(words, len, superblocks, blocks)
}

fn brotli_compress(payload: &[u8]) -> Result<Vec<u8>> {
    let mut encoder =
        brotli::CompressorWriter::new(Vec::new(), BROTLI_BUFFER, BROTLI_QUALITY, BROTLI_WINDOW);
    encoder.write_all(payload)?;
    Ok(encoder.into_inner())
}

fn brotli_decompress(stream: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut decoder = brotli::Decompressor::new(stream, BROTLI_BUFFER);
    decoder
        .read_to_end(&mut out)
        .map_err(|e| Error::Format(format!("brotli payload: {}", e)))?;
    Ok(out)
}
