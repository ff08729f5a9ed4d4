//! Domain types for the binary installer.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// The file name of a binary in the source directory (e.g. `istio-cni`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BinaryName(pub String);

impl BinaryName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BinaryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl PartialEq<&str> for BinaryName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl From<String> for BinaryName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BinaryName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Sync request
// ---------------------------------------------------------------------------

/// Everything one synchronizer run needs.
///
/// `source_dir` is only ever read. `target_dirs` are processed in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    pub source_dir: PathBuf,
    pub target_dirs: Vec<PathBuf>,
    /// Overwrite binaries that already exist in a target directory.
    pub update_binaries: bool,
    /// Source file names that are never installed.
    pub skip_binaries: HashSet<BinaryName>,
    /// Prepended to every destination file name.
    pub binaries_prefix: String,
}

impl SyncRequest {
    /// A request with no skips, no prefix and updates disabled.
    pub fn new(source_dir: impl Into<PathBuf>, target_dirs: Vec<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            target_dirs,
            update_binaries: false,
            skip_binaries: HashSet::new(),
            binaries_prefix: String::new(),
        }
    }

    pub fn with_update(mut self, update_binaries: bool) -> Self {
        self.update_binaries = update_binaries;
        self
    }

    pub fn with_skip<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<BinaryName>,
    {
        self.skip_binaries.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.binaries_prefix = prefix.into();
        self
    }

    /// Whether `name` is in the skip set. Names that are not valid UTF-8
    /// can never be listed, so they are never skipped.
    pub fn skips(&self, name: &OsStr) -> bool {
        name.to_str()
            .is_some_and(|name| self.skip_binaries.contains(&BinaryName::from(name)))
    }

    /// Destination file name for a source file: `prefix + name`.
    pub fn target_name(&self, name: &OsStr) -> OsString {
        let mut target = OsString::from(&self.binaries_prefix);
        target.push(name);
        target
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
