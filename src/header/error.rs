// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Defines error types for header decoding.

use std::io;
use thiserror::Error;

use super::Tag;

/// Result type for header operations.
pub type HeaderResult<T> = std::result::Result<T, HeaderError>;

/// Errors that can occur while decoding a header stream.
#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("Failed to read header at offset {offset}")]
    Io {
        offset: u64,
        #[source]
        source: io::Error,
    },
    #[error("Bad header magic at offset {offset}: {found:02x?}")]
    BadMagic { offset: u64, found: [u8; 4] },
    #[error("Truncated header at offset {offset}: expected {expected} more bytes")]
    Truncated { offset: u64, expected: u64 },
    #[error("Header at offset {offset} declares too many index entries: {count}")]
    TooManyEntries { offset: u64, count: u32 },
    #[error("Header at offset {offset} declares an oversized data store: {size} bytes")]
    DataTooLarge { offset: u64, size: u32 },
    #[error("Tag {tag}: value at offset {offset} lies outside the data store")]
    EntryOutOfBounds { tag: Tag, offset: u32 },
    #[error("Tag {tag}: unknown type {kind}")]
    UnknownType { tag: Tag, kind: u32 },
    #[error("Tag {tag}: string at offset {offset} is not NUL-terminated")]
    UnterminatedString { tag: Tag, offset: u32 },
}

impl HeaderError {
    /// Whether the stream is still positioned at the start of the next header.
    ///
    /// Content errors only affect the header they were found in. Framing errors leave the
    /// reader without a reliable position, so the stream cannot continue.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::EntryOutOfBounds { .. } | Self::UnknownType { .. } | Self::UnterminatedString { .. }
        )
    }
}
