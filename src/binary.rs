use crate::errors::{CopyError, Result};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::trace;

/// Number of leading bytes inspected when sniffing for binary content.
pub const SNIFF_LEN: u64 = 1024;

/// Reports whether the first [`SNIFF_LEN`] bytes of a file contain a NUL byte.
pub async fn looks_binary(path: &Path) -> Result<bool> {
    let file = File::open(path)
        .await
        .map_err(|e| CopyError::FileReadError(format!("{}: {}", path.display(), e)))?;

    let mut prefix = Vec::with_capacity(SNIFF_LEN as usize);
    file.take(SNIFF_LEN)
        .read_to_end(&mut prefix)
        .await
        .map_err(|e| CopyError::FileReadError(format!("{}: {}", path.display(), e)))?;

    let binary = prefix.iter().any(|&b| b == 0);
    trace!("Sniffed {} bytes of {:?}, binary: {}", prefix.len(), path, binary);
    Ok(binary)
}
