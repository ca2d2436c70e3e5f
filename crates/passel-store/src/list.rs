//! Local listing of store entries.
//!
//! `pass ls` is not delegated to the external tool. The store layout is a
//! plain directory tree of encrypted files, so entry names are
//! reconstructed by walking it directly: one filesystem read, no
//! subprocess.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, StoreError};

/// Encrypted entry file suffix.
const ENTRY_SUFFIX: &str = ".gpg";

/// Version-control metadata directory, excluded from listings entirely.
const VCS_DIR: &str = ".git";

/// Walk the store and return entry names relative to `store_dir`.
///
/// Descends into nested directories (but not through symbolic links),
/// never enters `.git`, keeps regular files carrying the `.gpg` suffix,
/// strips the suffix, and joins path components with `/` regardless of
/// platform. The result is sorted lexicographically so output does not
/// depend on filesystem enumeration order.
///
/// An empty target directory yields an empty vec. A target that cannot be
/// read yields [`StoreError::Io`].
pub fn walk_store(store_dir: &Path, subfolder: Option<&str>) -> Result<Vec<String>> {
    let (target, prefix) = match subfolder {
        Some(sub) if !sub.is_empty() => {
            let sub = sub.trim_end_matches('/');
            (store_dir.join(sub), format!("{sub}/"))
        }
        _ => (store_dir.to_path_buf(), String::new()),
    };

    let mut entries = Vec::new();
    collect(&target, &prefix, &mut entries)?;
    entries.sort();

    debug!(store = %store_dir.display(), entries = entries.len(), "listed store");
    Ok(entries)
}

/// Recurse into `dir`, accumulating entry names under `prefix`.
fn collect(dir: &Path, prefix: &str, out: &mut Vec<String>) -> Result<()> {
    let reader = fs::read_dir(dir).map_err(|source| StoreError::io(dir, source))?;

    for entry in reader {
        let entry = entry.map_err(|source| StoreError::io(dir, source))?;
        let file_type = entry
            .file_type()
            .map_err(|source| StoreError::io(entry.path(), source))?;

        let name = entry.file_name();
        // Non-UTF-8 names cannot be addressed as pass entries.
        let Some(name) = name.to_str() else { continue };

        if file_type.is_dir() {
            if name == VCS_DIR {
                continue;
            }
            collect(&entry.path(), &format!("{prefix}{name}/"), out)?;
        } else if file_type.is_file() {
            if let Some(stem) = name.strip_suffix(ENTRY_SUFFIX) {
                if !stem.is_empty() {
                    out.push(format!("{prefix}{stem}"));
                }
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
