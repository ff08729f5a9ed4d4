//! Filesystem primitives used by the synchronizer.
//!
//! ## `atomic_copy` protocol
//!
//! 1. Open the source and read its permissions.
//! 2. Create a fresh sibling `<dest_name>.tmp.<unique>` in the target directory.
//! 3. Stream the source into it, set the source permissions, flush to disk.
//! 4. Rename over `<dest_dir>/<dest_name>` (atomic on POSIX).
//!
//! Any failure after step 2 removes the temp file before returning. A crash
//! between 2 and 4 leaves only the `.tmp.` file, which [`find_stale_temp_files`]
//! picks up on the next run.

use std::ffi::{OsStr, OsString};
use std::fs::{self, File, OpenOptions, Permissions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{io_err, SyncError};

/// Probe file written by [`is_dir_writable`].
pub const WRITE_PROBE: &str = ".touch";

/// Separator between a destination name and its temp suffix.
pub const TEMP_MARKER: &str = ".tmp.";

static NEXT_TEMP_ID: AtomicU64 = AtomicU64::new(0);

// ---------------------------------------------------------------------------
// Probes
// ---------------------------------------------------------------------------

/// Whether a file can be created in `dir`.
///
/// Writes and removes an empty probe file. Missing directories, read-only
/// mounts and permission errors all report `false`.
pub fn is_dir_writable(dir: &Path) -> bool {
    let probe = dir.join(WRITE_PROBE);
    if fs::write(&probe, b"").is_err() {
        return false;
    }
    fs::remove_file(&probe).is_ok()
}

/// Whether `path` resolves to an existing entry. Dangling symlinks count as absent.
pub fn exists(path: &Path) -> bool {
    fs::metadata(path).is_ok()
}

// ---------------------------------------------------------------------------
// Source listing
// ---------------------------------------------------------------------------

/// A non-directory entry directly under the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: OsString,
    pub path: PathBuf,
}

/// List the files directly under `dir`, sorted by name.
///
/// Directories (and symlinks resolving to directories) are dropped, not
/// recursed into. A symlink that cannot be followed is kept; copying it is
/// what fails, and only if it is not skipped.
pub fn list_source_files(dir: &Path) -> Result<Vec<SourceFile>, SyncError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| io_err(&path, e))?;
        let is_dir = if file_type.is_symlink() {
            fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false)
        } else {
            file_type.is_dir()
        };
        if is_dir {
            continue;
        }
        files.push(SourceFile {
            name: entry.file_name(),
            path,
        });
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

// ---------------------------------------------------------------------------
// Stale temp files
// ---------------------------------------------------------------------------

/// Entries of `dir` named `<target_name>.tmp.<anything>`, sorted.
///
/// Plain prefix match on the encoded name, so glob metacharacters in
/// `target_name` are taken literally.
pub fn find_stale_temp_files(dir: &Path, target_name: &OsStr) -> io::Result<Vec<PathBuf>> {
    let mut pattern = target_name.as_encoded_bytes().to_vec();
    pattern.extend_from_slice(TEMP_MARKER.as_bytes());

    let mut matches = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().as_encoded_bytes().starts_with(&pattern) {
            matches.push(entry.path());
        }
    }
    matches.sort();
    Ok(matches)
}

// ---------------------------------------------------------------------------
// atomic_copy
// ---------------------------------------------------------------------------

/// Atomically install `src` as `<dest_dir>/<dest_name>`.
///
/// Readers of the destination see either the previous file or the complete
/// new one. The destination takes the source file's permissions.
pub fn atomic_copy(src: &Path, dest_dir: &Path, dest_name: &OsStr) -> Result<(), SyncError> {
    let mut input = File::open(src).map_err(|e| io_err(src, e))?;
    let perms = input.metadata().map_err(|e| io_err(src, e))?.permissions();

    let (tmp, output) = create_temp(dest_dir, dest_name)?;
    if let Err(e) = fill_temp(&mut input, output, perms, &tmp) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    let dest = dest_dir.join(dest_name);
    if let Err(e) = fs::rename(&tmp, &dest) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(dest, e));
    }
    Ok(())
}

/// Temp file path for `dest_name` with a given unique suffix.
pub fn temp_path(dest_dir: &Path, dest_name: &OsStr, unique: u64) -> PathBuf {
    let mut name = dest_name.to_os_string();
    name.push(format!("{TEMP_MARKER}{}-{unique}", std::process::id()));
    dest_dir.join(name)
}

fn create_temp(dest_dir: &Path, dest_name: &OsStr) -> Result<(PathBuf, File), SyncError> {
    loop {
        let unique = NEXT_TEMP_ID.fetch_add(1, Ordering::Relaxed);
        let tmp = temp_path(dest_dir, dest_name, unique);
        match OpenOptions::new().write(true).create_new(true).open(&tmp) {
            Ok(file) => return Ok((tmp, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(io_err(tmp, e)),
        }
    }
}

fn fill_temp(
    input: &mut File,
    mut output: File,
    perms: Permissions,
    tmp: &Path,
) -> Result<(), SyncError> {
    io::copy(input, &mut output).map_err(|e| io_err(tmp, e))?;
    output.set_permissions(perms).map_err(|e| io_err(tmp, e))?;
    output.sync_all().map_err(|e| io_err(tmp, e))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
