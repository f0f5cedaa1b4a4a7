use crate::cancel::CancelSignal;
use crate::errors::{CopyError, Result};
use crate::ignore::IgnorePatterns;
use crate::utils::join_relative;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// A file accepted by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    /// Root-relative path, always `/`-separated.
    pub relative_path: String,
}

pub struct WalkConfig {
    pub root: PathBuf,
    pub recursive: bool,
    /// Names of the root's immediate subdirectories that may be descended
    /// into. `None` allows all of them.
    pub allowed_top_subdirs: Option<HashSet<String>>,
    pub ignore: IgnorePatterns,
}

impl WalkConfig {
    pub fn new(root: impl Into<PathBuf>, recursive: bool, ignore: IgnorePatterns) -> Self {
        WalkConfig {
            root: root.into(),
            recursive,
            allowed_top_subdirs: None,
            ignore,
        }
    }

    pub fn with_allowed_top_subdirs(mut self, allowed: Option<HashSet<String>>) -> Self {
        self.allowed_top_subdirs = allowed;
        self
    }

    fn is_ignored(&self, relative_path: &str, name: &str) -> bool {
        self.ignore.is_match(relative_path) || self.ignore.is_match(name)
    }

    /// Decides whether the walk keeps an entry; rejected directories are
    /// never descended into.
    fn keeps(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        let relative_path = relative_to(&self.root, entry.path());
        if self.is_ignored(&relative_path, &name) {
            trace!("Ignoring {}", relative_path);
            return false;
        }
        if entry.depth() == 1 && entry.file_type().is_dir() {
            if let Some(allowed) = &self.allowed_top_subdirs {
                if !allowed.contains(&*name) {
                    trace!("Skipping unselected subdirectory {}", name);
                    return false;
                }
            }
        }
        true
    }
}

/// `path` relative to `root`, joined with `/`.
fn relative_to(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .fold(String::new(), |prefix, component| {
            join_relative(&prefix, &component.as_os_str().to_string_lossy())
        })
}

fn read_error(err: walkdir::Error) -> CopyError {
    CopyError::DirectoryReadError(err.to_string())
}

/// Enumerates the files under `config.root` depth-first, in directory-listing
/// order. Links are not followed, so only regular files are emitted.
///
/// Cancellation is not an error: the records emitted so far are returned.
pub fn walk(config: &WalkConfig, cancel: &dyn CancelSignal) -> Result<Vec<FileRecord>> {
    let mut records = Vec::new();

    if cancel.is_cancelled() {
        return Ok(records);
    }
    debug!("Walking {:?} (recursive: {})", config.root, config.recursive);

    let max_depth = if config.recursive { usize::MAX } else { 1 };
    let entries = WalkDir::new(&config.root)
        .min_depth(1)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(|entry| config.keeps(entry));

    for entry in entries {
        if cancel.is_cancelled() {
            debug!("Walk cancelled after {} files", records.len());
            break;
        }
        let entry = entry.map_err(read_error)?;

        if entry.file_type().is_file() {
            let relative_path = relative_to(&config.root, entry.path());
            trace!("Found {}", relative_path);
            records.push(FileRecord {
                path: entry.into_path(),
                relative_path,
            });
        } else if !entry.file_type().is_dir() {
            trace!("Skipping {:?} (neither file nor directory)", entry.path());
        }
    }

    debug!("Walk emitted {} files", records.len());
    Ok(records)
}

/// Names of the root's immediate subdirectories the ignore rules leave in,
/// in listing order.
pub fn list_top_subdirs(root: &Path, ignore: &IgnorePatterns) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry.map_err(read_error)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().is_dir() && !ignore.is_match(&name) {
            names.push(name);
        }
    }

    Ok(names)
}
