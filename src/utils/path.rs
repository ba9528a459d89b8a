//! Path utilities and markup discovery.
//!
//! - `clean_path` - lexical normalization (no filesystem access)
//! - `split_reference` - split an as-written reference into prefix and bare name
//! - `collect_markup_files` - recursive walk for `.html` / `.htm` files

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use jwalk::WalkDir;

use crate::debug;

const MARKUP_EXTENSIONS: &[&str] = &["html", "htm"];

/// Lexically clean a path: drop `.` segments, fold `..` into the preceding
/// normal segment, collapse repeated separators.
///
/// Never touches the filesystem, so symlinks are not resolved. Leading `..`
/// segments of a relative path are kept. An empty result becomes `.`.
///
/// # Example
/// ```ignore
/// assert_eq!(clean_path(Path::new("site/./assets/../cool.js")), PathBuf::from("site/cool.js"));
/// ```
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Split a reference as written in markup into `(directory prefix, bare name)`.
///
/// The prefix keeps its trailing `/` so `prefix + name` reproduces the input.
#[inline]
pub fn split_reference(reference: &str) -> (&str, &str) {
    match reference.rfind('/') {
        Some(idx) => reference.split_at(idx + 1),
        None => ("", reference),
    }
}

/// Check whether the final dot-extension is exactly `html` or `htm`.
#[inline]
pub fn is_markup_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKUP_EXTENSIONS.contains(&ext))
}

/// Recursively collect markup files under `root`, sorted by path.
///
/// Returned paths are cleaned, so a root of `./` yields `index.html` rather
/// than `./index.html`. Symlinks to files are included; symlinked
/// directories are not descended into.
///
/// Fails only when `root` itself cannot be enumerated. Unreadable
/// subdirectories are skipped.
pub fn collect_markup_files(root: &Path) -> Result<Vec<PathBuf>> {
    std::fs::read_dir(root)
        .with_context(|| format!("failed to read directory `{}`", root.display()))?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort(true) {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                let file_type = entry.file_type();
                let is_file = file_type.is_file() || (file_type.is_symlink() && path.is_file());
                if is_file && is_markup_file(&path) {
                    files.push(clean_path(&path));
                }
            }
            Err(e) => debug!("scan"; "skipping unreadable entry: {}", e),
        }
    }
    Ok(files)
}
