// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounded-memory decompression of the dump into UTF-8 text chunks.
//!
//! A multi-gigabyte `.xml.bz2` dump never touches memory as a whole: bytes
//! flow through a 256 KiB buffered reader into fixed-size chunks, and each
//! chunk is converted to a `String` with U+FFFD replacement for malformed
//! bytes. The only subtlety is the chunk seam: a UTF-8 sequence split across
//! two reads must not be replaced, so up to three trailing bytes of an
//! incomplete sequence are carried over into the next chunk.
//!
//! bzip2 decoder failures arrive as `io::Error` with an invalid-data kind;
//! those are reported as [`Error::Decompress`] with the decompressed byte
//! position, everything else stays [`Error::Io`].

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use bzip2::read::BzDecoder;

use crate::error::{Error, Result};

/// Buffer in front of the decompressor. The scanner's working set is this
/// buffer plus one page body.
const READ_BUFFER: usize = 256 * 1024;

/// Bytes pulled from the reader per chunk.
const CHUNK_SIZE: usize = 64 * 1024;

/// Byte stream over a dump file. Compressed when the path ends in `.bz2`,
/// raw otherwise (fixtures and diagnostics).
pub enum DumpReader {
    Bz(BufReader<BzDecoder<File>>),
    Plain(BufReader<File>),
}

impl DumpReader {
    /// Open a dump for sequential reading. No seeking is ever performed.
    pub fn open(path: &Path) -> Result<DumpReader> {
        let file = File::open(path)?;
        if path.extension().is_some_and(|e| e == "bz2") {
            Ok(DumpReader::Bz(BufReader::with_capacity(
                READ_BUFFER,
                BzDecoder::new(file),
            )))
        } else {
            Ok(DumpReader::Plain(BufReader::with_capacity(READ_BUFFER, file)))
        }
    }

    fn is_compressed(&self) -> bool {
        matches!(self, DumpReader::Bz(_))
    }
}

impl Read for DumpReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            DumpReader::Bz(r) => r.read(buf),
            DumpReader::Plain(r) => r.read(buf),
        }
    }
}

/// Sequential UTF-8 view of a byte stream.
///
/// Yields `String` chunks in stream order. Malformed bytes become U+FFFD;
/// multi-byte sequences split at a chunk seam are stitched back together.
pub struct TextChunks<R: Read> {
    inner: R,
    compressed: bool,
    carry: Vec<u8>,
    /// Decompressed bytes handed out so far; used in error positions.
    offset: u64,
    done: bool,
}

impl TextChunks<DumpReader> {
    pub fn new(reader: DumpReader) -> Self {
        let compressed = reader.is_compressed();
        TextChunks {
            inner: reader,
            compressed,
            carry: Vec::new(),
            offset: 0,
            done: false,
        }
    }
}

impl<R: Read> TextChunks<R> {
    /// Wrap an arbitrary reader, treating decode errors as plain I/O.
    pub fn from_reader(inner: R) -> Self {
        TextChunks {
            inner,
            compressed: false,
            carry: Vec::new(),
            offset: 0,
            done: false,
        }
    }

    /// Decompressed byte position after the last chunk returned.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Next chunk of text, or `None` at end of stream.
    pub fn next_chunk(&mut self) -> Result<Option<String>> {
        if self.done {
            return Ok(None);
        }
        let mut buf = std::mem::take(&mut self.carry);
        let start = buf.len();
        buf.resize(start + CHUNK_SIZE, 0);
        let n = match self.inner.read(&mut buf[start..]) {
            Ok(n) => n,
            Err(e) => return Err(self.classify(e)),
        };
        buf.truncate(start + n);
        if n == 0 {
            self.done = true;
            if buf.is_empty() {
                return Ok(None);
            }
            // Whatever is left is a truncated sequence; replace it.
            self.offset += buf.len() as u64;
            return Ok(Some(String::from_utf8_lossy(&buf).into_owned()));
        }
        let keep = incomplete_suffix_len(&buf);
        self.carry = buf.split_off(buf.len() - keep);
        self.offset += buf.len() as u64;
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    fn classify(&self, e: std::io::Error) -> Error {
        if self.compressed
            && matches!(e.kind(), ErrorKind::InvalidData | ErrorKind::InvalidInput)
        {
            Error::Decompress {
                offset: self.offset,
                message: e.to_string(),
            }
        } else {
            Error::Io(e)
        }
    }
}

/// Length of a trailing incomplete UTF-8 sequence, 0..=3 bytes.
fn incomplete_suffix_len(buf: &[u8]) -> usize {
    // Walk back over continuation bytes to the last leading byte.
    let mut back = 0;
    for &b in buf.iter().rev().take(4) {
        back += 1;
        if b & 0b1100_0000 != 0b1000_0000 {
            // b is a leading byte (or ASCII, or stray continuation start).
            let expect = match b {
                0x00..=0x7F => 1,
                0xC0..=0xDF => 2,
                0xE0..=0xEF => 3,
                0xF0..=0xF7 => 4,
                _ => 1, // invalid lead, let the lossy conversion handle it
            };
            if expect > back {
                return back;
            }
            return 0;
        }
    }
    0
}
