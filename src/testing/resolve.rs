//! Testcase name resolution

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::common::{Error, Result};

/// Resolve a testcase name to its source file
///
/// `search_dirs` is ordered from lowest to highest priority: every directory
/// is tried with the bare name and with `.<source_ext>` appended, and the last
/// existing candidate wins. A directory match stands for the file named after
/// it inside it, e.g. `tests/loop` resolves to `tests/loop/loop.mx`.
pub fn resolve(name: &str, search_dirs: &[PathBuf], source_ext: &str) -> Result<PathBuf> {
    let mut found = None;
    for dir in search_dirs {
        let candidates = [dir.join(name), dir.join(format!("{}.{}", name, source_ext))];
        for candidate in candidates {
            if candidate.exists() {
                tracing::trace!(candidate = %candidate.display(), "Resolution candidate");
                found = Some(candidate);
            }
        }
    }

    let mut path = found.ok_or_else(|| Error::NotFound(name.to_string()))?;
    if path.is_dir() {
        path = file_in_dir(&path, source_ext).ok_or_else(|| Error::NotFound(name.to_string()))?;
    }

    if path.extension() != Some(OsStr::new(source_ext)) {
        return Err(Error::invalid_extension(path, source_ext));
    }
    tracing::debug!(name, path = %path.display(), "Resolved testcase");
    Ok(path)
}

fn file_in_dir(dir: &Path, source_ext: &str) -> Option<PathBuf> {
    let stem = dir.file_name()?.to_str()?;
    let file = dir.join(format!("{}.{}", stem, source_ext));
    file.is_file().then_some(file)
}
