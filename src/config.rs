use crate::errors::{CopyError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_MAX_OUTPUT_BYTES: u64 = 1_000_000;

pub const DEFAULT_IGNORE_NAMES: &[&str] = &[
    "node_modules",
    ".git",
    ".svn",
    ".hg",
    "target",
    "dist",
    "build",
    "out",
    ".next",
    ".venv",
    "__pycache__",
    ".idea",
    ".vscode",
    ".DS_Store",
    "*.lock",
    "package-lock.json",
    "*.pyc",
    "*.class",
    "*.min.js",
];

/// User settings that shape a single copy run.
///
/// Deserialized from a JSON settings file with camelCase keys; any key left
/// out takes its default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CopySettings {
    pub ignore_names: Vec<String>,
    pub max_output_bytes: u64,
    pub skip_likely_binary: bool,
}

impl Default for CopySettings {
    fn default() -> Self {
        CopySettings {
            ignore_names: DEFAULT_IGNORE_NAMES.iter().map(|s| s.to_string()).collect(),
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            skip_likely_binary: true,
        }
    }
}

impl CopySettings {
    pub fn from_json(content: &str) -> Result<Self> {
        let settings: CopySettings = serde_json::from_str(content)?;
        debug!("Parsed settings: {:?}", settings);
        Ok(settings)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        debug!("Loading settings from {:?}", path);
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            CopyError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Appends extra patterns after the configured ones, dropping duplicates.
    pub fn with_extra_ignores(mut self, extra: &[String]) -> Self {
        for pattern in extra {
            if !self.ignore_names.contains(pattern) {
                self.ignore_names.push(pattern.clone());
            }
        }
        self
    }
}
