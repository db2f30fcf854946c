// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Writes package matches and prints the scan summary.

use comfy_table::{Cell, Table};
use std::io::{self, Write};

use super::executables::PackageMatches;
use super::totals::ScanTotals;

/// Output format for matching packages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `NAME path1 path2...`, one line per package.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Write one package record. Packages without matches produce no output.
///
/// # Errors
/// Returns an error if writing fails.
pub fn write_matches<W: Write>(
    out: &mut W,
    matches: &PackageMatches,
    format: OutputFormat,
) -> io::Result<()> {
    if matches.is_empty() {
        return Ok(());
    }
    match format {
        OutputFormat::Text => {
            write!(out, "{}", matches.name())?;
            for path in matches.paths() {
                write!(out, " {path}")?;
            }
        }
        OutputFormat::Json => serde_json::to_writer(&mut *out, matches)?,
    }
    writeln!(out)
}

/// Print the scan totals to standard error.
pub fn summarize_totals(totals: &ScanTotals) {
    eprintln!("{}", totals_table(totals));
}

fn totals_table(totals: &ScanTotals) -> Table {
    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::UTF8_FULL_CONDENSED)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(comfy_table::ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Scan").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Count").add_attribute(comfy_table::Attribute::Bold),
        ])
        .add_row(vec![Cell::new("Archives"), Cell::new(totals.archives)])
        .add_row(vec![Cell::new("Headers"), Cell::new(totals.headers)])
        .add_row(vec![Cell::new("Skipped headers"), Cell::new(totals.skipped)])
        .add_row(vec![
            Cell::new("Packages without files"),
            Cell::new(totals.without_files),
        ])
        .add_row(vec![
            Cell::new("Packages with executables"),
            Cell::new(totals.packages),
        ])
        .add_row(vec![
            Cell::new("Executables").add_attribute(comfy_table::Attribute::Bold),
            Cell::new(totals.executables).add_attribute(comfy_table::Attribute::Bold),
        ]);
    table
}
