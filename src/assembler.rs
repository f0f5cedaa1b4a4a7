use crate::binary::looks_binary;
use crate::cancel::CancelSignal;
use crate::config::CopySettings;
use crate::errors::{CopyError, Result};
use crate::utils::{format_block, language_tag};
use crate::walker::FileRecord;
use std::io::ErrorKind;
use tracing::{debug, trace};

/// How many records pass between progress messages.
pub const PROGRESS_INTERVAL: usize = 25;

/// The structured output of one run.
#[derive(Debug, Default, Clone)]
pub struct AssembledDocument {
    pub text: String,
    /// UTF-8 size of `text`, summed block by block.
    pub total_bytes: u64,
    pub files_included: usize,
    pub binary_skipped: usize,
    /// True when assembly stopped early on cancellation.
    pub cancelled: bool,
    /// Block size per included file, in document order.
    pub block_sizes: Vec<(String, usize)>,
}

impl AssembledDocument {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Reads each record in order and concatenates the formatted blocks.
pub async fn assemble(
    records: &[FileRecord],
    settings: &CopySettings,
    cancel: &dyn CancelSignal,
    mut progress: impl FnMut(&str),
) -> Result<AssembledDocument> {
    let mut document = AssembledDocument::default();
    let total = records.len();

    for (index, record) in records.iter().enumerate() {
        if cancel.is_cancelled() {
            debug!("Assembly cancelled at {}/{}", index, total);
            document.cancelled = true;
            break;
        }
        if index > 0 && index % PROGRESS_INTERVAL == 0 {
            progress(&format!("processed {}/{}", index, total));
        }

        if settings.skip_likely_binary && looks_binary(&record.path).await? {
            debug!("Skipping likely binary file {}", record.relative_path);
            document.binary_skipped += 1;
            continue;
        }

        let content = tokio::fs::read_to_string(&record.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidData => {
                    CopyError::DecodeError(format!("{}: {}", record.relative_path, e))
                }
                _ => CopyError::FileReadError(format!("{}: {}", record.relative_path, e)),
            })?;

        let block = format_block(
            &record.relative_path,
            language_tag(&record.path),
            &content,
        );
        trace!("{} -> {} bytes", record.relative_path, block.len());

        document.total_bytes += block.len() as u64;
        document
            .block_sizes
            .push((record.relative_path.clone(), block.len()));
        document.text.push_str(&block);
        document.files_included += 1;
    }

    if !document.cancelled {
        progress(&format!("processed {}/{}", total, total));
    }
    debug!(
        "Assembled {} files, {} bytes ({} binary skipped)",
        document.files_included, document.total_bytes, document.binary_skipped
    );
    Ok(document)
}
