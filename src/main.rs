// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.
mod args;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

use args::Args;
use hdlist_bins::header::{HeaderReader, Input};
use hdlist_bins::scan::{summarize_totals, NameSet, OutputFormat, ProgramFilter, Scanner};

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::init_from_env(
        Env::default().filter_or("RUST_LOG", if args.verbose { "debug" } else { "warn" }),
    );

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e:#}", program_name());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let filter = ProgramFilter::new(
        NameSet::load_optional(&args.allow),
        NameSet::load_optional(&args.deny),
    );
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let mut scanner = Scanner::new(&filter, format);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for archive in &args.archives {
        // An unopenable archive stops the whole run.
        let input = Input::open(archive)?;
        let name = input.name().to_string();
        scanner
            .scan_archive(&name, HeaderReader::new(input), &mut out)
            .with_context(|| "Failed to write output")?;
    }
    out.flush().with_context(|| "Failed to write output")?;

    if args.summary {
        summarize_totals(scanner.totals());
    }
    Ok(())
}

fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map_or_else(
            || "hdlist_bins".to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
}
