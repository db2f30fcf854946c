// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Decodes a stream of consecutive headers, each preceded by its magic preamble.

use std::collections::HashMap;
use std::io::{self, Read};
use std::iter::FusedIterator;

use super::error::{HeaderError, HeaderResult};
use super::{Header, Tag, TagEntry, TagType, TagValue};

const MAGIC: [u8; 4] = [0x8e, 0xad, 0xe8, 0x01];
const PREAMBLE_LEN: usize = 8;
const INDEX_ENTRY_LEN: u64 = 16;
const MAX_INDEX_ENTRIES: u32 = 0x00ff_ffff;
const MAX_DATA_SIZE: u32 = 0x0fff_ffff;

/// Reads headers one at a time from a byte stream.
///
/// Each call consumes exactly one header and leaves the stream at the start of the next one.
/// The iterator ends at a clean end of stream, or after the first error that leaves the
/// stream position unknown (see [`HeaderError::is_recoverable`]).
pub struct HeaderReader<R> {
    inner: R,
    offset: u64,
    finished: bool,
}

impl<R: Read> HeaderReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            offset: 0,
            finished: false,
        }
    }

    /// Number of bytes consumed from the stream so far.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read the next header.
    ///
    /// Returns `Ok(None)` when the stream ends before a new preamble starts.
    ///
    /// # Errors
    /// Returns an error if the stream cannot be read or the header is malformed.
    pub fn read_header(&mut self) -> HeaderResult<Option<Header>> {
        let start = self.offset;
        let mut preamble = [0u8; PREAMBLE_LEN];
        if !self.fill_or_eof(&mut preamble)? {
            return Ok(None);
        }
        if preamble[..4] != MAGIC {
            return Err(HeaderError::BadMagic {
                offset: start,
                found: [preamble[0], preamble[1], preamble[2], preamble[3]],
            });
        }

        let mut sizes = [0u8; 8];
        if !self.fill_or_eof(&mut sizes)? {
            return Err(HeaderError::Truncated {
                offset: self.offset,
                expected: sizes.len() as u64,
            });
        }
        let index_count = u32::from_be_bytes([sizes[0], sizes[1], sizes[2], sizes[3]]);
        let data_size = u32::from_be_bytes([sizes[4], sizes[5], sizes[6], sizes[7]]);
        if index_count > MAX_INDEX_ENTRIES {
            return Err(HeaderError::TooManyEntries {
                offset: start,
                count: index_count,
            });
        }
        if data_size > MAX_DATA_SIZE {
            return Err(HeaderError::DataTooLarge {
                offset: start,
                size: data_size,
            });
        }

        let index = self.read_block(u64::from(index_count) * INDEX_ENTRY_LEN)?;
        let store = self.read_block(u64::from(data_size))?;
        decode(&index, &store).map(Some)
    }

    /// Fill `buf` completely. Returns `false` if the stream was already at its end.
    fn fill_or_eof(&mut self, buf: &mut [u8]) -> HeaderResult<bool> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => {
                    filled += n;
                    self.offset += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    return Err(HeaderError::Io {
                        offset: self.offset,
                        source: e,
                    })
                }
            }
        }
        match filled {
            0 => Ok(false),
            n if n == buf.len() => Ok(true),
            n => Err(HeaderError::Truncated {
                offset: self.offset,
                expected: (buf.len() - n) as u64,
            }),
        }
    }

    fn read_block(&mut self, len: u64) -> HeaderResult<Vec<u8>> {
        let mut block = Vec::new();
        self.inner
            .by_ref()
            .take(len)
            .read_to_end(&mut block)
            .map_err(|e| HeaderError::Io {
                offset: self.offset,
                source: e,
            })?;
        self.offset += block.len() as u64;
        if (block.len() as u64) < len {
            return Err(HeaderError::Truncated {
                offset: self.offset,
                expected: len - block.len() as u64,
            });
        }
        Ok(block)
    }
}

impl<R: Read> Iterator for HeaderReader<R> {
    type Item = HeaderResult<Header>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_header() {
            Ok(Some(header)) => Some(Ok(header)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                if !e.is_recoverable() {
                    self.finished = true;
                }
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> FusedIterator for HeaderReader<R> {}

fn decode(index: &[u8], store: &[u8]) -> HeaderResult<Header> {
    let mut entries = HashMap::new();
    for raw in index.chunks_exact(INDEX_ENTRY_LEN as usize) {
        let tag = Tag(be_u32(&raw[0..4]));
        let raw_kind = be_u32(&raw[4..8]);
        let offset = be_u32(&raw[8..12]);
        let count = be_u32(&raw[12..16]);

        let kind = TagType::from_raw(raw_kind).ok_or(HeaderError::UnknownType {
            tag,
            kind: raw_kind,
        })?;
        let value = decode_value(store, tag, kind, offset, count)?;
        entries.insert(tag, TagEntry::new(kind, count, value));
    }
    Ok(Header::new(entries))
}

fn decode_value(
    store: &[u8],
    tag: Tag,
    kind: TagType,
    offset: u32,
    count: u32,
) -> HeaderResult<TagValue> {
    let count = count as usize;
    let value = match kind {
        TagType::Null => TagValue::Null,
        TagType::Char => TagValue::Char(bytes(store, tag, offset, count, 1)?.to_vec()),
        TagType::Int8 => TagValue::Int8(bytes(store, tag, offset, count, 1)?.to_vec()),
        TagType::Bin => TagValue::Bin(bytes(store, tag, offset, count, 1)?.to_vec()),
        TagType::Int16 => TagValue::Int16(
            bytes(store, tag, offset, count, 2)?
                .chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .collect(),
        ),
        TagType::Int32 => TagValue::Int32(
            bytes(store, tag, offset, count, 4)?
                .chunks_exact(4)
                .map(be_u32)
                .collect(),
        ),
        TagType::Int64 => TagValue::Int64(
            bytes(store, tag, offset, count, 8)?
                .chunks_exact(8)
                .map(|c| u64::from_be_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
                .collect(),
        ),
        // A STRING entry always holds exactly one value, whatever its count says.
        TagType::String => {
            let mut strings = strings(store, tag, offset, 1)?;
            TagValue::String(strings.pop().unwrap_or_default())
        }
        TagType::StringArray => TagValue::StringArray(strings(store, tag, offset, count)?),
        TagType::I18nString => TagValue::I18nString(strings(store, tag, offset, count)?),
    };
    Ok(value)
}

fn be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn bytes(store: &[u8], tag: Tag, offset: u32, count: usize, width: usize) -> HeaderResult<&[u8]> {
    let start = offset as usize;
    count
        .checked_mul(width)
        .and_then(|len| start.checked_add(len))
        .and_then(|end| store.get(start..end))
        .ok_or(HeaderError::EntryOutOfBounds { tag, offset })
}

fn strings(store: &[u8], tag: Tag, offset: u32, count: usize) -> HeaderResult<Vec<String>> {
    let mut position = offset as usize;
    if position > store.len() {
        return Err(HeaderError::EntryOutOfBounds { tag, offset });
    }
    // Every string takes at least its terminator, so the store bounds any honest count.
    let mut values = Vec::with_capacity(count.min(store.len() - position));
    for _ in 0..count {
        let rest = store
            .get(position..)
            .ok_or(HeaderError::EntryOutOfBounds { tag, offset })?;
        let len = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(HeaderError::UnterminatedString { tag, offset })?;
        values.push(String::from_utf8_lossy(&rest[..len]).into_owned());
        position += len + 1;
    }
    Ok(values)
}
