//! Atomic write primitives
//!
//! Uses temp→rename so readers never observe a partially written file.

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use std::fs;
use std::path::{Path, PathBuf};

fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

/// Atomically replace a set of files
///
/// Every temp file is written before the first rename. A failure while
/// writing removes the temp files and leaves all targets untouched. A failed
/// rename removes the temp files not yet renamed; targets renamed before it
/// keep their new content.
pub fn atomic_write_all(files: &[(PathBuf, Vec<u8>)]) -> Result<()> {
    for (target, _) in files {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error("create_artifact_dir", e))?;
        }
    }

    let mut written: Vec<(PathBuf, &Path)> = Vec::with_capacity(files.len());
    for (target, content) in files {
        let temp = temp_path_for(target);
        if let Err(e) = fs::write(&temp, content) {
            let _ = fs::remove_file(&temp);
            for (t, _) in &written {
                let _ = fs::remove_file(t);
            }
            return Err(io_error("write_artifact_temp", e));
        }
        written.push((temp, target.as_path()));
    }

    for (i, (temp, target)) in written.iter().enumerate() {
        if let Err(e) = fs::rename(temp, target) {
            for (t, _) in &written[i..] {
                let _ = fs::remove_file(t);
            }
            return Err(io_error("rename_artifact_temp", e));
        }
    }

    Ok(())
}
