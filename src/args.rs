// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hdlist_bins")]
#[command(version)]
#[command(about = "Lists executables installed into bin directories by the packages of header lists")]
pub(crate) struct Args {
    /// File of program names to report. Reports every program if the file cannot be read.
    pub allow: PathBuf,

    /// File of program names to leave out. Leaves out nothing if the file cannot be read.
    pub deny: PathBuf,

    #[arg(
        required = true,
        long_help = "Header list files to scan, in order.\n\
                Use - to read from standard input. Gzip-compressed lists are detected automatically."
    )]
    pub archives: Vec<PathBuf>,

    /// Write one JSON object per package instead of plain text lines.
    #[arg(long)]
    pub json: bool,

    /// Print scan totals to standard error when done.
    #[arg(long)]
    pub summary: bool,

    /// Log progress and skipped packages in detail.
    #[arg(short, long)]
    pub verbose: bool,
}
