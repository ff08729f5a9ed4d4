//! Binary synchronizer.
//!
//! For every target directory, in order:
//!
//! 1. Skip the directory (not an error) if it is not writable.
//! 2. List the source directory. Failure aborts the run.
//! 3. Per source file: apply the skip set, build `prefix + name`, leave an
//!    existing destination alone unless updates are enabled, remove stale
//!    `<name>.tmp.*` leftovers, then atomically copy. A copy failure aborts
//!    the run.

use std::ffi::OsStr;
use std::path::Path;

use cni_install_core::SyncRequest;

use crate::error::SyncError;
use crate::fs_ops::{self, SourceFile};
use crate::log::InstallLog;

/// Install the binaries described by `request`.
///
/// Returns `Ok(())` both when files were copied and when nothing needed
/// copying; the log lines are the only record of which happened.
pub fn copy_binaries(request: &SyncRequest, log: &dyn InstallLog) -> Result<(), SyncError> {
    for target_dir in &request.target_dirs {
        if !fs_ops::is_dir_writable(target_dir) {
            log.info(&format!(
                "Directory {} is not writable, skipping.",
                target_dir.display()
            ));
            continue;
        }

        let files = fs_ops::list_source_files(&request.source_dir)?;
        for file in &files {
            install_one(request, target_dir, file, log)?;
        }
    }
    Ok(())
}

fn install_one(
    request: &SyncRequest,
    target_dir: &Path,
    file: &SourceFile,
    log: &dyn InstallLog,
) -> Result<(), SyncError> {
    let name = file.name.to_string_lossy();
    if request.skips(&file.name) {
        log.info(&format!("{name} is in SKIP_CNI_BINARIES, skipping."));
        return Ok(());
    }

    let target_name = request.target_name(&file.name);
    let target_path = target_dir.join(&target_name);
    if fs_ops::exists(&target_path) && !request.update_binaries {
        log.info(&format!(
            "{} is already here and UPDATE_CNI_BINARIES isn't true, skipping",
            target_path.display()
        ));
        return Ok(());
    }

    remove_stale_temp_files(target_dir, &target_name, log);

    fs_ops::atomic_copy(&file.path, target_dir, &target_name)?;
    log.info(&format!("Copied {name} to {}.", target_path.display()));
    Ok(())
}

/// Best-effort removal of `<target_name>.tmp.*` left by an interrupted run.
fn remove_stale_temp_files(target_dir: &Path, target_name: &OsStr, log: &dyn InstallLog) {
    let display_name = target_name.to_string_lossy();
    let matches = match fs_ops::find_stale_temp_files(target_dir, target_name) {
        Ok(matches) => matches,
        Err(e) => {
            log.warn(&format!(
                "Failed to search {} for temporary {display_name} files: {e}",
                target_dir.display()
            ));
            return;
        }
    };
    if matches.is_empty() {
        return;
    }

    log.info(&format!(
        "Target folder {} contains one or more temporary files with a {display_name} name. \
         The temp files will be deleted.",
        target_dir.display()
    ));
    for tmp in matches {
        if let Err(e) = std::fs::remove_file(&tmp) {
            log.warn(&format!(
                "Failed to delete tmp file {} from previous run: {e}",
                tmp.display()
            ));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
