// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! A tool for finding executables installed into `bin` directories by package header lists.
//!
//! This crate provides functionality to:
//! - Decode streams of tagged-record package headers (plain or gzip-compressed)
//! - Reconstruct installed file paths from flat or directory-table path encodings
//! - Select executables in `bin` directories, filtered by allow and deny lists of program names
//! - Report matching executables per package

pub mod header;
pub mod scan;

// Re-export key types for convenience
pub use header::{Header, HeaderReader, Input, Tag};
pub use scan::{NameSet, OutputFormat, PackageMatches, ProgramFilter, Scanner};
