// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Loads program name sets and combines them into the allow/deny filter.

use anyhow::{Context, Result};
use log::info;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Set of program basenames read from a list file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NameSet {
    names: HashSet<String>,
}

impl NameSet {
    /// Create a `NameSet` from a file of whitespace-separated program names.
    ///
    /// Names may be separated by any whitespace, including newlines. Duplicates collapse.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read(path.as_ref())
            .with_context(|| format!("Failed to read name list: {}", path.as_ref().display()))?;
        Ok(String::from_utf8_lossy(&content)
            .split_whitespace()
            .collect())
    }

    /// Load a name set, or `None` if the file cannot be read.
    ///
    /// An unreadable list disables the filter it would have configured.
    #[must_use]
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Option<Self> {
        match Self::from_file(path.as_ref()) {
            Ok(names) => {
                info!(
                    "Loaded name list: file={}, names={}",
                    path.as_ref().display(),
                    names.len()
                );
                Some(names)
            }
            Err(e) => {
                info!("Name list disabled: {e:#}");
                None
            }
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for NameSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(str::to_string).collect(),
        }
    }
}

/// Allow/deny filter over program basenames.
///
/// An absent allow list admits every name; an absent deny list excludes none. A name present
/// in both lists is rejected.
#[derive(Debug, Default, Clone)]
pub struct ProgramFilter {
    allow: Option<NameSet>,
    deny: Option<NameSet>,
}

impl ProgramFilter {
    #[must_use]
    pub fn new(allow: Option<NameSet>, deny: Option<NameSet>) -> Self {
        Self { allow, deny }
    }

    /// Check whether a program name passes both lists.
    #[must_use]
    pub fn permits(&self, name: &str) -> bool {
        self.allow.as_ref().is_none_or(|allow| allow.contains(name))
            && self.deny.as_ref().is_none_or(|deny| !deny.contains(name))
    }
}
