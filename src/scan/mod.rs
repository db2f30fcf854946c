// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Scans header streams for executables in `bin` directories and reports them per package.

mod console;
mod error;
mod executables;
mod names;
mod totals;

pub use console::{summarize_totals, write_matches, OutputFormat};
pub use error::{ScanError, ScanResult};
pub use executables::{is_executable_mode, BinFile, PackageMatches, PathEncoding};
pub use names::{NameSet, ProgramFilter};
pub use totals::ScanTotals;

use log::{debug, info, warn};
use std::io::{self, Read, Write};

use crate::header::HeaderReader;

/// Runs the extraction over archives one at a time and keeps totals across them.
pub struct Scanner<'a> {
    filter: &'a ProgramFilter,
    format: OutputFormat,
    totals: ScanTotals,
}

impl<'a> Scanner<'a> {
    #[must_use]
    pub fn new(filter: &'a ProgramFilter, format: OutputFormat) -> Self {
        Self {
            filter,
            format,
            totals: ScanTotals::default(),
        }
    }

    /// Scan every header of one archive and write a record per matching package.
    ///
    /// Headers that cannot be decoded or lack required tags are skipped with a warning. A
    /// stream that cannot be read any further ends the archive early; this is not an error.
    ///
    /// # Errors
    /// Returns an error only if writing to `out` fails.
    pub fn scan_archive<R: Read, W: Write>(
        &mut self,
        archive: &str,
        headers: HeaderReader<R>,
        out: &mut W,
    ) -> io::Result<()> {
        info!("Scanning archive: archive={archive}");
        self.totals.archives += 1;

        for (position, header) in headers.enumerate() {
            let header = match header {
                Ok(header) => header,
                Err(e) if e.is_recoverable() => {
                    warn!(
                        "Skipping undecodable header: archive={archive}, header={position}: {e}"
                    );
                    self.totals.headers += 1;
                    self.totals.skipped += 1;
                    continue;
                }
                Err(e) => {
                    warn!(
                        "Stopped reading archive: archive={archive}, header={position}: {:#}",
                        anyhow::Error::new(e)
                    );
                    break;
                }
            };
            self.totals.headers += 1;

            match PackageMatches::from_header(&header, self.filter) {
                Ok(matches) if !matches.has_files() => {
                    self.totals.without_files += 1;
                }
                Ok(matches) if matches.is_empty() => {
                    debug!("No executables: package={}", matches.name());
                }
                Ok(matches) => {
                    self.totals.packages += 1;
                    self.totals.executables += matches.paths().len();
                    write_matches(out, &matches, self.format)?;
                }
                Err(e) => {
                    warn!("Skipping header: archive={archive}, header={position}: {e}");
                    self.totals.skipped += 1;
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn totals(&self) -> &ScanTotals {
        &self.totals
    }
}
