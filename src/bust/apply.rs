//! Batch application of collected jobs.
//!
//! Two ordered phases:
//!
//! 1. **rename** - jobs are grouped by cleaned source path and each group
//!    renames its asset exactly once.
//! 2. **rewrite** - every job, not every group, rewrites its tag in its
//!    markup file, so each occurrence across all files is updated.
//!
//! Phase 1 completes before phase 2 starts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};

use super::{BustError, ChangeLog, RenameJob};
use crate::debug;
use crate::utils::bytes;

/// Counters for the final log line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApplyStats {
    /// Physical renames performed.
    pub renamed: usize,
    /// Markup files written.
    pub written: usize,
}

/// One physical rename shared by every job with the same source.
#[derive(Debug)]
struct RenameGroup<'a> {
    /// Index of the first job in the group.
    first: usize,
    /// Distinct markup files referencing the asset.
    owners: Vec<&'a Path>,
}

/// Apply all jobs: rename assets, then rewrite markup.
pub fn apply_jobs(jobs: &[RenameJob], changes: &mut ChangeLog) -> ApplyStats {
    let mut stats = ApplyStats::default();

    let failed = rename_assets(jobs, changes, &mut stats);

    for job in jobs {
        if job.is_noop() {
            debug!("bust"; "{} unchanged", job.source.display());
            continue;
        }
        if failed.contains(job.source.as_path()) {
            continue;
        }

        match rewrite_markup(job) {
            Ok(written) => {
                stats.written += usize::from(written);
                changes.add_edit(&job.markup, &job.old_name, &job.new_name);
            }
            Err(e) => changes.add_error(&job.markup, e),
        }
    }

    stats
}

/// Phase 1. Returns the sources whose rename failed.
fn rename_assets<'a>(
    jobs: &'a [RenameJob],
    changes: &mut ChangeLog,
    stats: &mut ApplyStats,
) -> FxHashSet<&'a Path> {
    let mut failed = FxHashSet::default();

    for group in group_by_source(jobs) {
        let job = &jobs[group.first];
        if job.is_noop() {
            continue;
        }

        let target = job.target();
        match fs::rename(&job.source, &target) {
            Ok(()) => {
                debug!("bust"; "{} -> {}", job.source.display(), target.display());
                stats.renamed += 1;
            }
            Err(source) => {
                for owner in &group.owners {
                    changes.add_error(owner, rename_error(&job.source, &target, &source));
                }
                failed.insert(job.source.as_path());
            }
        }
    }

    failed
}

/// Group jobs by source path, preserving first-seen order.
fn group_by_source(jobs: &[RenameJob]) -> Vec<RenameGroup<'_>> {
    let mut index: FxHashMap<&Path, usize> = FxHashMap::default();
    let mut groups: Vec<RenameGroup<'_>> = Vec::new();

    for (i, job) in jobs.iter().enumerate() {
        let slot = *index.entry(job.source.as_path()).or_insert_with(|| {
            groups.push(RenameGroup {
                first: i,
                owners: Vec::new(),
            });
            groups.len() - 1
        });

        let owners = &mut groups[slot].owners;
        if !owners.contains(&job.markup.as_path()) {
            owners.push(job.markup.as_path());
        }
    }

    groups
}

fn rename_error(from: &Path, to: &Path, source: &io::Error) -> BustError {
    BustError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source: io::Error::new(source.kind(), source.to_string()),
    }
}

/// Phase 2 for one job. Returns whether the file was written.
///
/// Every textual copy of the recorded tag is replaced, so a later job for an
/// identical tag finds nothing left to do.
fn rewrite_markup(job: &RenameJob) -> Result<bool, BustError> {
    let content = fs::read(&job.markup).map_err(|source| BustError::MarkupRead {
        path: job.markup.clone(),
        source,
    })?;

    if !bytes::contains(&content, &job.tag) {
        return Ok(false);
    }

    let updated = bytes::replace_all(&content, &job.tag, &job.rewritten_tag());
    write_markup(&job.markup, &updated)?;
    Ok(true)
}

fn write_markup(path: &Path, content: &[u8]) -> Result<(), BustError> {
    fs::write(path, content).map_err(|source| BustError::MarkupWrite {
        path: path.to_path_buf(),
        source,
    })
}
