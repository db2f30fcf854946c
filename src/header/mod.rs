// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Read-only codec for tagged-record package headers. Provides typed access to header fields.

mod error;
mod input;
mod reader;
#[cfg(test)]
pub(crate) mod testing;

use std::collections::HashMap;
use std::fmt;

pub use error::{HeaderError, HeaderResult};
pub use input::{Input, InputError, STDIN_ARG};
pub use reader::HeaderReader;

/// Numeric identifier of a header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(pub u32);

impl Tag {
    pub const NAME: Tag = Tag(1000);
    pub const OLD_FILENAMES: Tag = Tag(1027);
    pub const FILEMODES: Tag = Tag(1030);
    pub const DIRINDEXES: Tag = Tag(1116);
    pub const BASENAMES: Tag = Tag(1117);
    pub const DIRNAMES: Tag = Tag(1118);
    pub const FILENAMES: Tag = Tag(5000);

    fn name(self) -> Option<&'static str> {
        match self {
            Self::NAME => Some("NAME"),
            Self::OLD_FILENAMES => Some("OLDFILENAMES"),
            Self::FILEMODES => Some("FILEMODES"),
            Self::DIRINDEXES => Some("DIRINDEXES"),
            Self::BASENAMES => Some("BASENAMES"),
            Self::DIRNAMES => Some("DIRNAMES"),
            Self::FILENAMES => Some("FILENAMES"),
            _ => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}({})", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Declared storage type of a header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagType {
    Null,
    Char,
    Int8,
    Int16,
    Int32,
    Int64,
    String,
    Bin,
    StringArray,
    I18nString,
}

impl TagType {
    #[must_use]
    pub fn from_raw(raw: u32) -> Option<Self> {
        let kind = match raw {
            0 => Self::Null,
            1 => Self::Char,
            2 => Self::Int8,
            3 => Self::Int16,
            4 => Self::Int32,
            5 => Self::Int64,
            6 => Self::String,
            7 => Self::Bin,
            8 => Self::StringArray,
            9 => Self::I18nString,
            _ => return None,
        };
        Some(kind)
    }
}

/// Decoded value of a header field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    Null,
    Char(Vec<u8>),
    Int8(Vec<u8>),
    Int16(Vec<u16>),
    Int32(Vec<u32>),
    Int64(Vec<u64>),
    String(String),
    Bin(Vec<u8>),
    StringArray(Vec<String>),
    I18nString(Vec<String>),
}

/// A header field as stored: declared type, element count and decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    kind: TagType,
    count: u32,
    value: TagValue,
}

impl TagEntry {
    pub(crate) fn new(kind: TagType, count: u32, value: TagValue) -> Self {
        Self { kind, count, value }
    }

    #[must_use]
    pub fn kind(&self) -> TagType {
        self.kind
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[must_use]
    pub fn value(&self) -> &TagValue {
        &self.value
    }
}

/// One decoded package header.
#[derive(Debug, Clone, Default)]
pub struct Header {
    entries: HashMap<Tag, TagEntry>,
}

impl Header {
    pub(crate) fn new(entries: HashMap<Tag, TagEntry>) -> Self {
        Self { entries }
    }

    /// Get a field by tag.
    #[must_use]
    pub fn entry(&self, tag: Tag) -> Option<&TagEntry> {
        self.entries.get(&tag)
    }

    /// Get a single-string field. Returns `None` if the tag is absent or not a string.
    #[must_use]
    pub fn string(&self, tag: Tag) -> Option<&str> {
        match self.entry(tag)?.value() {
            TagValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Get a string array field (`STRING_ARRAY` or `I18NSTRING`).
    #[must_use]
    pub fn string_array(&self, tag: Tag) -> Option<&[String]> {
        match self.entry(tag)?.value() {
            TagValue::StringArray(values) | TagValue::I18nString(values) => Some(values),
            _ => None,
        }
    }

    /// Get an `INT16` array field.
    #[must_use]
    pub fn u16_array(&self, tag: Tag) -> Option<&[u16]> {
        match self.entry(tag)?.value() {
            TagValue::Int16(values) => Some(values),
            _ => None,
        }
    }

    /// Get an `INT32` array field.
    #[must_use]
    pub fn u32_array(&self, tag: Tag) -> Option<&[u32]> {
        match self.entry(tag)?.value() {
            TagValue::Int32(values) => Some(values),
            _ => None,
        }
    }

    /// Number of fields in the header.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
