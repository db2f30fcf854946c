// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Encodes headers in the on-disk format for tests.

use super::Tag;

const MAGIC: [u8; 8] = [0x8e, 0xad, 0xe8, 0x01, 0, 0, 0, 0];

struct RawEntry {
    tag: u32,
    kind: u32,
    count: u32,
    // `None` places the value at the current end of the data store.
    offset: Option<u32>,
    data: Vec<u8>,
    align: usize,
}

#[derive(Default)]
pub(crate) struct HeaderBuilder {
    entries: Vec<RawEntry>,
}

impl HeaderBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(mut self, tag: Tag, kind: u32, count: u32, data: Vec<u8>, align: usize) -> Self {
        self.entries.push(RawEntry {
            tag: tag.0,
            kind,
            count,
            offset: None,
            data,
            align,
        });
        self
    }

    pub(crate) fn string(self, tag: Tag, value: &str) -> Self {
        let mut data = value.as_bytes().to_vec();
        data.push(0);
        self.push(tag, 6, 1, data, 1)
    }

    pub(crate) fn string_array(self, tag: Tag, values: &[&str]) -> Self {
        let mut data = Vec::new();
        for value in values {
            data.extend_from_slice(value.as_bytes());
            data.push(0);
        }
        self.push(tag, 8, values.len() as u32, data, 1)
    }

    pub(crate) fn u16_array(self, tag: Tag, values: &[u16]) -> Self {
        let data = values.iter().flat_map(|v| v.to_be_bytes()).collect();
        self.push(tag, 3, values.len() as u32, data, 2)
    }

    pub(crate) fn u32_array(self, tag: Tag, values: &[u32]) -> Self {
        let data = values.iter().flat_map(|v| v.to_be_bytes()).collect();
        self.push(tag, 4, values.len() as u32, data, 4)
    }

    /// Add an index entry with arbitrary type and offset and no backing data.
    pub(crate) fn raw_entry(mut self, tag: Tag, kind: u32, offset: u32, count: u32) -> Self {
        self.entries.push(RawEntry {
            tag: tag.0,
            kind,
            count,
            offset: Some(offset),
            data: Vec::new(),
            align: 1,
        });
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut index = Vec::new();
        let mut store: Vec<u8> = Vec::new();
        for entry in &self.entries {
            let offset = match entry.offset {
                Some(offset) => offset,
                None => {
                    while store.len() % entry.align != 0 {
                        store.push(0);
                    }
                    let offset = store.len() as u32;
                    store.extend_from_slice(&entry.data);
                    offset
                }
            };
            index.extend_from_slice(&entry.tag.to_be_bytes());
            index.extend_from_slice(&entry.kind.to_be_bytes());
            index.extend_from_slice(&offset.to_be_bytes());
            index.extend_from_slice(&entry.count.to_be_bytes());
        }

        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&(self.entries.len() as u32).to_be_bytes());
        bytes.extend_from_slice(&(store.len() as u32).to_be_bytes());
        bytes.extend_from_slice(&index);
        bytes.extend_from_slice(&store);
        bytes
    }
}
