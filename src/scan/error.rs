// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Defines errors for headers that cannot be scanned. Each one skips a single header.

use thiserror::Error;

use crate::header::Tag;

/// Result type for scan operations.
pub type ScanResult<T> = std::result::Result<T, ScanError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("Missing required tag {tag}")]
    MissingTag { tag: Tag },
    #[error("Missing file paths: neither OLDFILENAMES/FILENAMES nor BASENAMES is present")]
    MissingPaths,
    #[error("Tag {tag} has {found} entries, expected {expected}")]
    CountMismatch {
        tag: Tag,
        expected: usize,
        found: usize,
    },
    #[error("File {file}: directory index {index} out of range ({dirs} directories)")]
    DirIndexOutOfRange { file: usize, index: u32, dirs: usize },
}
