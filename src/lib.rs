pub mod assembler;
pub mod binary;
pub mod cancel;
pub mod config;
pub mod copy;
pub mod delivery;
pub mod errors;
pub mod ignore;
pub mod logger;
pub mod prompt;
pub mod reporting;
pub mod trie;
pub mod utils;
pub mod walker;

pub use copy::{copy_folder_contents, CopyMode, CopyOutcome, CopyRequest};
pub use errors::CopyError;
pub use ignore::IgnorePatterns;
