//! Change log: successes and errors grouped by markup file.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;

use super::BustError;
use crate::utils::plural_s;

/// A rewritten reference: asset base name before and after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub from: String,
    pub to: String,
}

/// Everything recorded against one markup file, in insertion order.
#[derive(Debug, Default)]
pub struct FileChanges {
    pub edits: Vec<Edit>,
    pub errors: Vec<BustError>,
}

/// One report line before formatting.
enum Record<'a> {
    Edit(&'a Path, &'a Edit),
    Error(&'a Path, &'a BustError),
}

/// Result of a run, owned by the caller.
///
/// Markup files are kept in path order so reports are stable across runs.
#[derive(Debug, Default)]
pub struct ChangeLog {
    files: BTreeMap<PathBuf, FileChanges>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful rename + rewrite.
    pub fn add_edit(&mut self, markup: &Path, from: impl Into<String>, to: impl Into<String>) {
        self.entry(markup).edits.push(Edit {
            from: from.into(),
            to: to.into(),
        });
    }

    /// Record a per-item failure.
    pub fn add_error(&mut self, markup: &Path, error: BustError) {
        self.entry(markup).errors.push(error);
    }

    fn entry(&mut self, markup: &Path) -> &mut FileChanges {
        self.files.entry(markup.to_path_buf()).or_default()
    }

    #[cfg(test)]
    pub fn get(&self, markup: &Path) -> Option<&FileChanges> {
        self.files.get(markup)
    }

    /// Edits then errors of each file, files in path order.
    fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.files.iter().flat_map(|(path, changes)| {
            let edits = changes.edits.iter().map(move |e| Record::Edit(path, e));
            let errors = changes.errors.iter().map(move |e| Record::Error(path, e));
            edits.chain(errors)
        })
    }

    pub fn edit_count(&self) -> usize {
        self.files.values().map(|f| f.edits.len()).sum()
    }

    pub fn error_count(&self) -> usize {
        self.files.values().map(|f| f.errors.len()).sum()
    }

    /// No edits and no errors anywhere.
    pub fn is_empty(&self) -> bool {
        self.edit_count() == 0 && self.error_count() == 0
    }

    /// Uncolored report lines, one per edit or error.
    #[cfg(test)]
    pub fn lines(&self) -> Vec<String> {
        if self.is_empty() {
            return vec!["No changes.".to_string()];
        }

        self.records()
            .map(|record| match record {
                Record::Edit(path, edit) => {
                    format!("[{}] {} => {}", path.display(), edit.from, edit.to)
                }
                Record::Error(path, err) => format!("[{}] ERROR: {}", path.display(), err),
            })
            .collect()
    }

    /// Print the colored report. Edits go to stdout, errors to stderr.
    pub fn print(&self) {
        if self.is_empty() {
            println!("{}", "No changes.".dimmed());
            return;
        }
        for record in self.records() {
            match record {
                Record::Edit(path, edit) => println!(
                    "{} {} {} {}",
                    file_label(path),
                    edit.from,
                    "=>".dimmed(),
                    edit.to.green()
                ),
                Record::Error(path, err) => {
                    eprintln!("{} {} {err}", file_label(path), "ERROR:".red().bold())
                }
            }
        }
    }
}

fn file_label(path: &Path) -> String {
    format!("{}{}{}", "[".dimmed(), path.display().cyan(), "]".dimmed())
}

impl fmt::Display for ChangeLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edits = self.edit_count();
        let errors = self.error_count();

        if edits == 0 && errors == 0 {
            return write!(f, "{}", "no changes".green());
        }
        write!(
            f,
            "{} {} {} {}",
            edits.to_string().green().bold(),
            format!("edit{},", plural_s(edits)).dimmed(),
            errors.to_string().red().bold(),
            format!("error{}", plural_s(errors)).dimmed()
        )
    }
}
