use crate::assembler::assemble;
use crate::cancel::CancelSignal;
use crate::config::CopySettings;
use crate::delivery::{
    default_export_file_name, deliver, ClipboardSink, DeliveryOutcome, FileSink, OutputSink,
};
use crate::errors::{CopyError, Result};
use crate::ignore::IgnorePatterns;
use crate::prompt::{Destination, Prompter};
use crate::reporting::print_size_report;
use crate::walker::{list_top_subdirs, walk, WalkConfig};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    Recursive,
    TopLevel,
}

/// Everything a copy run needs besides the prompter and the cancel signal.
#[derive(Debug, Clone)]
pub struct CopyRequest {
    pub target: PathBuf,
    pub mode: CopyMode,
    pub settings: CopySettings,
    /// Skip the subdirectory picker and descend into every subdirectory.
    pub all_subdirs: bool,
    /// Accept oversized output without asking.
    pub assume_yes: bool,
    pub destination: Option<Destination>,
    pub output: Option<PathBuf>,
    pub stats: bool,
}

impl CopyRequest {
    pub fn new(target: impl Into<PathBuf>, mode: CopyMode, settings: CopySettings) -> Self {
        CopyRequest {
            target: target.into(),
            mode,
            settings,
            all_subdirs: false,
            assume_yes: false,
            destination: None,
            output: None,
            stats: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Delivered { bytes: u64, files: usize },
    Declined,
    NothingToCopy,
}

#[async_trait]
pub trait FolderCopier {
    async fn copy_folder(
        &self,
        request: &CopyRequest,
        cancel: &dyn CancelSignal,
    ) -> Result<CopyOutcome>;
}

pub struct BasicFolderCopier<P: Prompter> {
    prompter: P,
}

impl<P: Prompter + Send + Sync> BasicFolderCopier<P> {
    pub fn new(prompter: P) -> Self {
        BasicFolderCopier { prompter }
    }

    fn resolve_sink(&self, request: &CopyRequest, root: &Path) -> Result<Box<dyn OutputSink>> {
        if let Some(path) = &request.output {
            return Ok(Box::new(FileSink::new(path)));
        }
        let destination = match request.destination {
            Some(destination) => destination,
            None => self.prompter.choose_destination()?,
        };
        match destination {
            Destination::Clipboard => Ok(Box::new(ClipboardSink)),
            Destination::File => {
                let now = chrono::Local::now().naive_local();
                let default = default_export_file_name(root, now);
                let path = self.prompter.export_path(&default)?;
                Ok(Box::new(FileSink::new(path)))
            }
        }
    }
}

#[async_trait]
impl<P: Prompter + Send + Sync> FolderCopier for BasicFolderCopier<P> {
    async fn copy_folder(
        &self,
        request: &CopyRequest,
        cancel: &dyn CancelSignal,
    ) -> Result<CopyOutcome> {
        let root = validate_target(&request.target).await?;
        let settings = &request.settings;
        let ignore = IgnorePatterns::new(&settings.ignore_names);
        let recursive = request.mode == CopyMode::Recursive;

        let mut allowed_top_subdirs = None;
        if recursive && !request.all_subdirs {
            let candidates = list_top_subdirs(&root, &ignore)?;
            if !candidates.is_empty() {
                allowed_top_subdirs = self.prompter.select_subdirs(&candidates)?;
            }
        }
        debug!("Allowed top-level subdirectories: {:?}", allowed_top_subdirs);

        let config =
            WalkConfig::new(root, recursive, ignore).with_allowed_top_subdirs(allowed_top_subdirs);
        let records = walk(&config, cancel)?;
        info!("Found {} files", records.len());

        let document = assemble(&records, settings, cancel, |message| info!("{}", message)).await?;
        if document.cancelled {
            warn!(
                "Cancelled; continuing with the {} files assembled so far",
                document.files_included
            );
        }
        if document.is_empty() {
            info!("Nothing to copy.");
            return Ok(CopyOutcome::NothingToCopy);
        }
        if request.stats {
            print_size_report(&document.block_sizes);
        }

        let outcome = deliver(
            &document.text,
            settings.max_output_bytes,
            |total, max| {
                if request.assume_yes {
                    Ok(true)
                } else {
                    self.prompter.confirm_oversize(total, max)
                }
            },
            || self.resolve_sink(request, &config.root),
        )
        .await?;

        Ok(match outcome {
            DeliveryOutcome::Delivered => CopyOutcome::Delivered {
                bytes: document.total_bytes,
                files: document.files_included,
            },
            DeliveryOutcome::Declined => CopyOutcome::Declined,
        })
    }
}

async fn validate_target(target: &Path) -> Result<PathBuf> {
    let metadata = tokio::fs::metadata(target)
        .await
        .map_err(|e| CopyError::InvalidTarget(format!("{}: {}", target.display(), e)))?;
    if !metadata.is_dir() {
        return Err(CopyError::InvalidTarget(format!(
            "{} is not a directory",
            target.display()
        )));
    }
    tokio::fs::canonicalize(target)
        .await
        .map_err(|e| CopyError::InvalidTarget(format!("{}: {}", target.display(), e)))
}

pub async fn copy_folder_contents<P: Prompter + Send + Sync>(
    request: &CopyRequest,
    prompter: P,
    cancel: &dyn CancelSignal,
) -> Result<CopyOutcome> {
    let copier = BasicFolderCopier::new(prompter);
    copier.copy_folder(request, cancel).await
}
