// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Shared helpers: encodes header lists and writes them to temporary files.
#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

pub const NAME: u32 = 1000;
pub const OLD_FILENAMES: u32 = 1027;
pub const FILEMODES: u32 = 1030;
pub const DIRINDEXES: u32 = 1116;
pub const BASENAMES: u32 = 1117;
pub const DIRNAMES: u32 = 1118;

pub enum Value<'a> {
    String(&'a str),
    StringArray(&'a [&'a str]),
    Int16(&'a [u16]),
    Int32(&'a [u32]),
}

/// Encode one header, magic preamble included.
pub fn encode_header(entries: &[(u32, Value)]) -> Vec<u8> {
    let mut index = Vec::new();
    let mut store = Vec::new();
    for (tag, value) in entries {
        let (kind, count, data): (u32, usize, Vec<u8>) = match value {
            Value::String(s) => (6, 1, [s.as_bytes(), &b"\0"[..]].concat()),
            Value::StringArray(values) => (
                8,
                values.len(),
                values.iter().flat_map(|s| [s.as_bytes(), &b"\0"[..]].concat()).collect(),
            ),
            Value::Int16(values) => (
                3,
                values.len(),
                values.iter().flat_map(|v| v.to_be_bytes()).collect(),
            ),
            Value::Int32(values) => (
                4,
                values.len(),
                values.iter().flat_map(|v| v.to_be_bytes()).collect(),
            ),
        };
        let offset = store.len() as u32;
        store.extend_from_slice(&data);
        for field in [*tag, kind, offset, count as u32] {
            index.extend_from_slice(&field.to_be_bytes());
        }
    }

    let mut bytes = vec![0x8e, 0xad, 0xe8, 0x01, 0, 0, 0, 0];
    bytes.extend_from_slice(&(entries.len() as u32).to_be_bytes());
    bytes.extend_from_slice(&(store.len() as u32).to_be_bytes());
    bytes.extend_from_slice(&index);
    bytes.extend_from_slice(&store);
    bytes
}

pub fn flat_header(name: &str, files: &[(&str, u16)]) -> Vec<u8> {
    let paths: Vec<&str> = files.iter().map(|(path, _)| *path).collect();
    let modes: Vec<u16> = files.iter().map(|(_, mode)| *mode).collect();
    encode_header(&[
        (NAME, Value::String(name)),
        (FILEMODES, Value::Int16(&modes)),
        (OLD_FILENAMES, Value::StringArray(&paths)),
    ])
}

pub fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}
