// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Running totals over all scanned archives.

use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ScanTotals {
    pub archives: usize,
    /// Headers read, including skipped ones.
    pub headers: usize,
    pub skipped: usize,
    /// Headers that list no files at all.
    pub without_files: usize,
    /// Packages with at least one matching executable.
    pub packages: usize,
    pub executables: usize,
}
