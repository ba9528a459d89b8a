//! Job collection: one pending rename + rewrite per accepted reference.

use std::fs;
use std::path::{Path, PathBuf};

use super::name::compute_renamed_name;
use super::{BustError, ChangeLog};
use crate::debug;
use crate::markup::{Reference, extract_reference, scan_tags};
use crate::utils::bytes::replace_all;
use crate::utils::path::{clean_path, split_reference};

/// A pending rename of one asset plus the rewrite of one referencing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameJob {
    /// Cleaned asset path. Jobs sharing it share one physical rename.
    pub source: PathBuf,
    /// Asset base name as written in the tag.
    pub old_name: String,
    /// Content-derived base name.
    pub new_name: String,
    /// Directory portion of the reference as written, with trailing `/`.
    pub prefix: String,
    /// Markup file owning the tag.
    pub markup: PathBuf,
    /// Full original tag bytes.
    pub tag: Vec<u8>,
}

impl RenameJob {
    /// Where the asset ends up: same directory, new name.
    pub fn target(&self) -> PathBuf {
        match self.source.parent() {
            Some(dir) => dir.join(&self.new_name),
            None => PathBuf::from(&self.new_name),
        }
    }

    /// Content unchanged since the last run.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.old_name == self.new_name
    }

    /// The tag with only its asset path swapped for the new name.
    pub fn rewritten_tag(&self) -> Vec<u8> {
        let old = format!("{}{}", self.prefix, self.old_name);
        let new = format!("{}{}", self.prefix, self.new_name);
        replace_all(&self.tag, old.as_bytes(), new.as_bytes())
    }
}

/// Accumulates jobs across every markup file of a run.
///
/// Must see every markup file before any job is applied, otherwise an asset
/// could be renamed while other files still reference it by its old name.
#[derive(Debug, Default)]
pub struct JobCollector {
    jobs: Vec<RenameJob>,
}

impl JobCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read one markup file and collect its jobs.
    pub fn collect_file(&mut self, markup: &Path, changes: &mut ChangeLog) {
        match fs::read(markup) {
            Ok(content) => self.collect(markup, &content, changes),
            Err(source) => changes.add_error(
                markup,
                BustError::MarkupRead {
                    path: markup.to_path_buf(),
                    source,
                },
            ),
        }
    }

    /// Collect jobs from already-read markup `content`.
    ///
    /// Skipped references only show up in verbose output. Unreadable assets
    /// are recorded against `markup` and do not stop the scan.
    pub fn collect(&mut self, markup: &Path, content: &[u8], changes: &mut ChangeLog) {
        let dir = markup.parent().unwrap_or(Path::new(""));

        for tag in scan_tags(content) {
            let reference = match extract_reference(&tag) {
                Some(Ok(reference)) => reference,
                Some(Err(reason)) => {
                    debug!("skip"; "{} at {}: {}", markup.display(), tag.start, reason);
                    continue;
                }
                None => continue,
            };

            debug!(
                "scan";
                "{} at {}: {}=\"{}\"",
                markup.display(),
                tag.start,
                reference.kind.attribute(),
                reference.path
            );
            match build_job(markup, dir, &reference) {
                Ok(job) => self.jobs.push(job),
                Err(e) => changes.add_error(markup, e),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn into_jobs(self) -> Vec<RenameJob> {
        self.jobs
    }
}

/// Resolve a reference against the markup directory, hash the asset, build the job.
fn build_job(markup: &Path, dir: &Path, reference: &Reference<'_>) -> Result<RenameJob, BustError> {
    // `/a.js` resolves like `a.js`: relative to the markup file.
    let relative = reference.path.trim_start_matches('/');
    let source = clean_path(&dir.join(relative));

    let bytes = fs::read(&source).map_err(|source_err| BustError::AssetRead {
        path: source.clone(),
        source: source_err,
    })?;

    let (prefix, old_name) = split_reference(reference.path);
    let new_name = compute_renamed_name(&bytes, old_name);

    Ok(RenameJob {
        source,
        old_name: old_name.to_string(),
        new_name,
        prefix: prefix.to_string(),
        markup: markup.to_path_buf(),
        tag: reference.tag.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bust::name::content_marker;
    use tempfile::TempDir;

    #[test]
    fn test_rewritten_tag_keeps_other_attributes() {
        let job = RenameJob {
            source: PathBuf::from("site/assets/big.js"),
            old_name: "big.js".into(),
            new_name: "big-cc42.js".into(),
            prefix: "./assets/".into(),
            markup: PathBuf::from("site/index.html"),
            tag: br#"<script defer data-x="big.js" src="./assets/big.js">"#.to_vec(),
        };
        assert_eq!(
            job.rewritten_tag(),
            br#"<script defer data-x="big.js" src="./assets/big-cc42.js">"#
        );
        assert_eq!(job.target(), PathBuf::from("site/assets/big-cc42.js"));
        assert!(!job.is_noop());
    }

    #[test]
    fn test_collect_resolves_relative_to_markup() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("assets")).unwrap();
        fs::write(root.join("lame.js"), "lame").unwrap();
        fs::write(root.join("assets/pretty.css"), "pretty").unwrap();

        let markup = root.join("assets/markup.html");
        let html = br#"<script src="../lame.js"></script><link rel="stylesheet" href="./pretty.css">"#;

        let mut collector = JobCollector::new();
        let mut changes = ChangeLog::new();
        collector.collect(&markup, html, &mut changes);
        assert!(changes.is_empty());

        let jobs = collector.into_jobs();
        assert_eq!(jobs.len(), 2);

        assert_eq!(jobs[0].source, root.join("lame.js"));
        assert_eq!(jobs[0].prefix, "../");
        assert_eq!(jobs[0].old_name, "lame.js");
        assert_eq!(jobs[0].new_name, format!("lame-{}.js", content_marker(b"lame")));
        assert_eq!(jobs[0].tag, br#"<script src="../lame.js">"#);
        assert_eq!(jobs[0].markup, markup);

        assert_eq!(jobs[1].source, root.join("assets/pretty.css"));
        assert_eq!(jobs[1].prefix, "./");
    }

    #[test]
    fn test_collect_skips_without_errors() {
        let dir = TempDir::new().unwrap();
        let markup = dir.path().join("index.html");
        let html = br#"
            <script src="https://code.jquery.com/jquery-3.5.1.min.js"></script>
            <script>console.log("x")</script>
            <link rel="icon" href="favicon.ico">
            <script src="app.php"></script>
        "#;

        let mut collector = JobCollector::new();
        let mut changes = ChangeLog::new();
        collector.collect(&markup, html, &mut changes);

        assert_eq!(collector.len(), 0);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_missing_asset_is_recorded_and_scan_continues() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ok.js"), "ok").unwrap();
        let markup = dir.path().join("index.html");
        let html = br#"<script src="gone.js"></script><script src="ok.js"></script>"#;

        let mut collector = JobCollector::new();
        let mut changes = ChangeLog::new();
        collector.collect(&markup, html, &mut changes);

        assert_eq!(collector.len(), 1);
        assert_eq!(changes.error_count(), 1);
        let errors = &changes.get(&markup).unwrap().errors;
        assert!(matches!(errors[0], BustError::AssetRead { .. }));
    }

    #[test]
    fn test_unreadable_markup_is_recorded() {
        let dir = TempDir::new().unwrap();
        let markup = dir.path().join("missing.html");

        let mut collector = JobCollector::new();
        let mut changes = ChangeLog::new();
        collector.collect_file(&markup, &mut changes);

        assert_eq!(collector.len(), 0);
        let errors = &changes.get(&markup).unwrap().errors;
        assert!(matches!(errors[0], BustError::MarkupRead { .. }));
    }

    #[test]
    fn test_leading_slash_resolves_like_relative() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("js")).unwrap();
        fs::write(dir.path().join("js/app.js"), "app").unwrap();
        let markup = dir.path().join("index.html");

        let mut collector = JobCollector::new();
        let mut changes = ChangeLog::new();
        collector.collect(&markup, br#"<script src="/js/app.js">"#, &mut changes);

        let jobs = collector.into_jobs();
        assert_eq!(jobs[0].source, dir.path().join("js/app.js"));
        assert_eq!(jobs[0].prefix, "/js/");
    }

    #[test]
    fn test_collect_from_non_utf8_markup() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("cool.js"), "cool").unwrap();
        let markup = dir.path().join("latin1.html");
        let html = b"<p>caf\xe9</p><script src=\"cool.js\"></script>";
        fs::write(&markup, html).unwrap();

        let mut collector = JobCollector::new();
        let mut changes = ChangeLog::new();
        collector.collect_file(&markup, &mut changes);

        assert!(changes.is_empty());
        let jobs = collector.into_jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].tag, b"<script src=\"cool.js\">");
    }
}
