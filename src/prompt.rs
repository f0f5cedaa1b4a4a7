use crate::errors::Result;
use inquire::{Confirm, InquireError, MultiSelect, Select, Text};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Clipboard,
    File,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Clipboard => write!(f, "Copy to clipboard"),
            Destination::File => write!(f, "Export to file"),
        }
    }
}

/// The interactive questions a copy run may ask.
pub trait Prompter {
    /// Returns the chosen subset of `candidates`, or `None` to keep all.
    fn select_subdirs(&self, candidates: &[String]) -> Result<Option<HashSet<String>>>;

    fn confirm_oversize(&self, total_bytes: u64, max_output_bytes: u64) -> Result<bool>;

    fn choose_destination(&self) -> Result<Destination>;

    fn export_path(&self, default: &str) -> Result<PathBuf>;
}

impl<P: Prompter + ?Sized> Prompter for &P {
    fn select_subdirs(&self, candidates: &[String]) -> Result<Option<HashSet<String>>> {
        (**self).select_subdirs(candidates)
    }

    fn confirm_oversize(&self, total_bytes: u64, max_output_bytes: u64) -> Result<bool> {
        (**self).confirm_oversize(total_bytes, max_output_bytes)
    }

    fn choose_destination(&self) -> Result<Destination> {
        (**self).choose_destination()
    }

    fn export_path(&self, default: &str) -> Result<PathBuf> {
        (**self).export_path(default)
    }
}

pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn select_subdirs(&self, candidates: &[String]) -> Result<Option<HashSet<String>>> {
        let selection = MultiSelect::new(
            "Subdirectories to include (space to toggle, enter to confirm):",
            candidates.to_vec(),
        )
        .with_all_selected_by_default()
        .prompt_skippable()?;
        Ok(selection.map(|names| names.into_iter().collect()))
    }

    fn confirm_oversize(&self, total_bytes: u64, max_output_bytes: u64) -> Result<bool> {
        let answer = Confirm::new(&format!(
            "Output is {} bytes (limit {}). Continue?",
            total_bytes, max_output_bytes
        ))
        .with_default(false)
        .prompt();
        match answer {
            Ok(yes) => Ok(yes),
            Err(InquireError::OperationCanceled) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn choose_destination(&self) -> Result<Destination> {
        let choice = Select::new(
            "Where should the output go?",
            vec![Destination::Clipboard, Destination::File],
        )
        .prompt()?;
        Ok(choice)
    }

    fn export_path(&self, default: &str) -> Result<PathBuf> {
        let path = Text::new("Save to:").with_default(default).prompt()?;
        Ok(PathBuf::from(path))
    }
}
