//! Cache busting pipeline.
//!
//! ```text
//! collect_markup_files → JobCollector → apply_jobs → ChangeLog
//! ```
//!
//! Every markup file is scanned before anything on disk changes.

mod apply;
mod changes;
mod error;
mod job;
pub mod name;

use std::path::Path;

use anyhow::Result;

use crate::log;
use crate::utils::path::collect_markup_files;
use crate::utils::plural_count;

pub use apply::apply_jobs;
pub use changes::ChangeLog;
pub use error::BustError;
pub use job::{JobCollector, RenameJob};

/// Bust every js/css reference in the markup under `root`.
///
/// Only a root that cannot be enumerated is fatal. Everything else is
/// recorded in the returned log.
pub fn bust_site(root: &Path) -> Result<ChangeLog> {
    let markup_files = collect_markup_files(root)?;
    log!("scan"; "found {}", plural_count(markup_files.len(), "markup file"));

    let mut changes = ChangeLog::new();
    let mut collector = JobCollector::new();
    for file in &markup_files {
        collector.collect_file(file, &mut changes);
    }
    log!("scan"; "collected {}", plural_count(collector.len(), "reference"));

    let jobs = collector.into_jobs();
    let stats = apply_jobs(&jobs, &mut changes);
    log!(
        "bust";
        "renamed {}, updated {}",
        plural_count(stats.renamed, "asset"),
        plural_count(stats.written, "markup file")
    );

    Ok(changes)
}
