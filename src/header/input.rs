// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Opens header list inputs: files, standard input, and gzip-compressed lists.

use libflate::gzip::MultiDecoder;
use log::debug;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Command-line argument selecting standard input.
pub const STDIN_ARG: &str = "-";

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Errors that can occur when opening an input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot open file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read from {name}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },
}

/// A readable header list. Dropping it closes the underlying file.
pub struct Input {
    name: String,
    reader: Box<dyn BufRead>,
}

impl Input {
    /// Open a file path, or standard input for [`STDIN_ARG`].
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or its first bytes cannot be read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, InputError> {
        let path = path.as_ref();
        if path == Path::new(STDIN_ARG) {
            return Self::from_reader("<stdin>", io::stdin().lock());
        }
        let file = File::open(path).map_err(|e| InputError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_reader(&path.display().to_string(), file)
    }

    /// Wrap an arbitrary reader, decompressing it if it starts with the gzip magic.
    ///
    /// # Errors
    /// Returns an error if the first bytes cannot be read or the gzip header is invalid.
    pub fn from_reader<R: Read + 'static>(name: &str, reader: R) -> Result<Self, InputError> {
        let read_error = |e: io::Error| InputError::Read {
            name: name.to_string(),
            source: e,
        };
        let mut reader = BufReader::new(reader);
        let compressed = reader.fill_buf().map_err(read_error)?.starts_with(&GZIP_MAGIC);
        let reader: Box<dyn BufRead> = if compressed {
            debug!("Decompressing gzip input: input={name}");
            Box::new(BufReader::new(MultiDecoder::new(reader).map_err(read_error)?))
        } else {
            Box::new(reader)
        };
        Ok(Self {
            name: name.to_string(),
            reader,
        })
    }

    /// Name of the input as given on the command line.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Read for Input {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}
