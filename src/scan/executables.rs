// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Finds executables installed into `bin` directories by a package header.
//!
//! A header lists its files either as full paths ([`Tag::OLD_FILENAMES`]) or as a directory
//! table plus per-file directory index and base name. Both forms yield a full path and the
//! program name that the allow/deny lists are checked against. The two forms use different
//! `bin` directory checks:
//! - full paths: the three characters before the last `/` must be `bin` (`/usr/sbin/x`,
//!   `/home/robin/x` and `/usr/bin/x` all qualify).
//! - directory table: the directory must end in `bin/`.

use log::{debug, trace};
use serde::Serialize;

use super::error::{ScanError, ScanResult};
use super::names::ProgramFilter;
use crate::header::{Header, Tag};

/// Directory type bit plus the owner, group and other execute bits.
const EXECUTABLE_MASK: u16 = 0o40111;
const EXECUTE_BITS: u16 = 0o111;

/// Check a file mode: no directory bit, and all three execute bits set.
#[must_use]
pub fn is_executable_mode(mode: u16) -> bool {
    mode & EXECUTABLE_MASK == EXECUTE_BITS
}

/// File path encoding used by a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEncoding<'h> {
    /// One full path per file.
    Flat(&'h [String]),
    /// Deduplicated directory table, and per file a table index and a base name.
    /// Every index is known to be in range.
    Normalized {
        dirs: &'h [String],
        dir_indexes: &'h [u32],
        bases: &'h [String],
    },
}

/// A file in a `bin` directory, split into its directory prefix and program name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinFile<'h> {
    dir: &'h str,
    name: &'h str,
}

impl BinFile<'_> {
    #[must_use]
    pub fn name(&self) -> &str {
        self.name
    }

    /// Full path of the file.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}{}", self.dir, self.name)
    }
}

impl<'h> PathEncoding<'h> {
    /// Select the path encoding of a header.
    ///
    /// Full paths win when present and non-empty. Returns `Ok(None)` if the header lists no
    /// paths at all.
    ///
    /// # Errors
    /// Returns an error if the directory table form is incomplete or inconsistent.
    pub fn from_header(header: &'h Header) -> ScanResult<Option<Self>> {
        let flat = [Tag::OLD_FILENAMES, Tag::FILENAMES]
            .into_iter()
            .find_map(|tag| header.string_array(tag).filter(|paths| !paths.is_empty()));
        if let Some(paths) = flat {
            return Ok(Some(Self::Flat(paths)));
        }

        let Some(bases) = header
            .string_array(Tag::BASENAMES)
            .filter(|bases| !bases.is_empty())
        else {
            return Ok(None);
        };
        let dir_indexes = header
            .u32_array(Tag::DIRINDEXES)
            .ok_or(ScanError::MissingTag {
                tag: Tag::DIRINDEXES,
            })?;
        let dirs = header
            .string_array(Tag::DIRNAMES)
            .ok_or(ScanError::MissingTag { tag: Tag::DIRNAMES })?;

        if dir_indexes.len() != bases.len() {
            return Err(ScanError::CountMismatch {
                tag: Tag::DIRINDEXES,
                expected: bases.len(),
                found: dir_indexes.len(),
            });
        }
        if let Some((file, &index)) = dir_indexes
            .iter()
            .enumerate()
            .find(|&(_, &index)| index as usize >= dirs.len())
        {
            return Err(ScanError::DirIndexOutOfRange {
                file,
                index,
                dirs: dirs.len(),
            });
        }

        Ok(Some(Self::Normalized {
            dirs,
            dir_indexes,
            bases,
        }))
    }

    /// Number of files described.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(paths) => paths.len(),
            Self::Normalized { bases, .. } => bases.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get file `index` if it lies in a `bin` directory.
    ///
    /// # Panics
    /// Panics if `index` is not below [`Self::len`].
    #[must_use]
    pub fn bin_file(&self, index: usize) -> Option<BinFile<'h>> {
        match *self {
            Self::Flat(paths) => split_flat_bin_path(&paths[index]),
            Self::Normalized {
                dirs,
                dir_indexes,
                bases,
            } => {
                let dir = dirs[dir_indexes[index] as usize].as_str();
                is_normalized_bin_dir(dir).then_some(BinFile {
                    dir,
                    name: bases[index].as_str(),
                })
            }
        }
    }
}

/// Split a full path whose parent directory name ends in `bin`.
fn split_flat_bin_path(path: &str) -> Option<BinFile<'_>> {
    let slash = path.rfind('/')?;
    (slash >= 3 && &path.as_bytes()[slash - 3..slash] == b"bin").then(|| BinFile {
        dir: &path[..=slash],
        name: &path[slash + 1..],
    })
}

fn is_normalized_bin_dir(dir: &str) -> bool {
    dir.ends_with("bin/")
}

/// Executables of one package that pass the program filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMatches {
    name: String,
    paths: Vec<String>,
    #[serde(skip)]
    has_files: bool,
}

impl PackageMatches {
    #[must_use]
    pub fn new(name: String, paths: Vec<String>) -> Self {
        Self {
            name,
            paths,
            has_files: true,
        }
    }

    /// Result for a header that lists no files at all.
    #[must_use]
    pub fn without_files(name: String) -> Self {
        Self {
            name,
            paths: Vec::new(),
            has_files: false,
        }
    }

    /// Collect the matching executables of a header, in file order.
    ///
    /// A header without any file tags describes a package without files and has no matches.
    ///
    /// # Errors
    /// Returns an error if the name, the file modes or the file paths are missing, or if the
    /// per-file arrays disagree in length.
    pub fn from_header(header: &Header, filter: &ProgramFilter) -> ScanResult<Self> {
        let name = header
            .string(Tag::NAME)
            .ok_or(ScanError::MissingTag { tag: Tag::NAME })?
            .to_string();

        let modes = header.u16_array(Tag::FILEMODES);
        let (modes, encoding) = match (modes, PathEncoding::from_header(header)?) {
            (Some(modes), Some(encoding)) => (modes, encoding),
            (None, None) => {
                debug!("No file tags, treating as a package without files: package={name}");
                return Ok(Self::without_files(name));
            }
            (Some(modes), None) if modes.is_empty() => {
                debug!("Empty FILEMODES, treating as a package without files: package={name}");
                return Ok(Self::without_files(name));
            }
            (Some(_), None) => return Err(ScanError::MissingPaths),
            (None, Some(_)) => {
                return Err(ScanError::MissingTag {
                    tag: Tag::FILEMODES,
                })
            }
        };
        if modes.len() != encoding.len() {
            return Err(ScanError::CountMismatch {
                tag: Tag::FILEMODES,
                expected: encoding.len(),
                found: modes.len(),
            });
        }

        let paths = modes
            .iter()
            .enumerate()
            .filter(|&(_, &mode)| is_executable_mode(mode))
            .filter_map(|(index, _)| encoding.bin_file(index))
            .filter(|file| {
                let permitted = filter.permits(file.name());
                if !permitted {
                    trace!("Filtered out: package={name}, program={}", file.name());
                }
                permitted
            })
            .map(|file| file.path())
            .collect();
        Ok(Self::new(name, paths))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Whether the header listed any files, matching or not.
    #[must_use]
    pub fn has_files(&self) -> bool {
        self.has_files
    }
}
