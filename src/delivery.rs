use crate::errors::{CopyError, Result};
use arboard::Clipboard;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[async_trait]
pub trait OutputSink: Send + Sync {
    async fn deliver(&self, document: &str) -> Result<()>;

    fn describe(&self) -> String;
}

pub struct ClipboardSink;

#[async_trait]
impl OutputSink for ClipboardSink {
    async fn deliver(&self, document: &str) -> Result<()> {
        debug!("Initializing clipboard");
        let mut clipboard =
            Clipboard::new().map_err(|e| CopyError::ClipboardInitError(e.to_string()))?;
        clipboard
            .set_text(document.to_owned())
            .map_err(|e| CopyError::ClipboardWriteError(e.to_string()))?;
        Ok(())
    }

    fn describe(&self) -> String {
        "clipboard".to_owned()
    }
}

pub struct FileSink {
    pub path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSink { path: path.into() }
    }
}

#[async_trait]
impl OutputSink for FileSink {
    async fn deliver(&self, document: &str) -> Result<()> {
        tokio::fs::write(&self.path, document.as_bytes())
            .await
            .map_err(|e| CopyError::FileWriteError(format!("{}: {}", self.path.display(), e)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Declined,
}

pub fn requires_confirmation(total_bytes: u64, max_output_bytes: u64) -> bool {
    total_bytes > max_output_bytes
}

/// Hands `document` to the sink produced by `choose_sink`, asking `confirm`
/// first when it is larger than `max_output_bytes`. A declined confirmation
/// returns before any sink is chosen or written.
pub async fn deliver<C, S>(
    document: &str,
    max_output_bytes: u64,
    confirm: C,
    choose_sink: S,
) -> Result<DeliveryOutcome>
where
    C: FnOnce(u64, u64) -> Result<bool>,
    S: FnOnce() -> Result<Box<dyn OutputSink>>,
{
    let total_bytes = document.len() as u64;
    if requires_confirmation(total_bytes, max_output_bytes) {
        warn!(
            "Output is {} bytes, above the {} byte limit",
            total_bytes, max_output_bytes
        );
        if !confirm(total_bytes, max_output_bytes)? {
            info!("Copy declined; nothing was written.");
            return Ok(DeliveryOutcome::Declined);
        }
    }

    let sink = choose_sink()?;
    sink.deliver(document).await?;
    info!("Copied {} bytes to {}", total_bytes, sink.describe());
    Ok(DeliveryOutcome::Delivered)
}

/// `<root-folder-name>-<YYYYMMDD-HHMM>-structured.md`
pub fn default_export_file_name(root: &Path, now: NaiveDateTime) -> String {
    let folder = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_owned());
    format!("{}-{}-structured.md", folder, now.format("%Y%m%d-%H%M"))
}
