use thiserror::Error;

#[derive(Error, Debug)]
pub enum CopyError {
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Directory read failed: {0}")]
    DirectoryReadError(String),

    #[error("File read failed: {0}")]
    FileReadError(String),

    #[error("File is not valid UTF-8 text: {0}")]
    DecodeError(String),

    #[error("Clipboard initialization failed: {0}")]
    ClipboardInitError(String),

    #[error("Clipboard write failed: {0}")]
    ClipboardWriteError(String),

    #[error("File write failed: {0}")]
    FileWriteError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Prompt failed: {0}")]
    PromptError(String),

    #[error("IO Error: {0}")]
    IoError(String),
}

pub type Result<T> = std::result::Result<T, CopyError>;

impl From<std::io::Error> for CopyError {
    fn from(err: std::io::Error) -> Self {
        CopyError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for CopyError {
    fn from(err: serde_json::Error) -> Self {
        CopyError::ConfigError(err.to_string())
    }
}

impl From<inquire::InquireError> for CopyError {
    fn from(err: inquire::InquireError) -> Self {
        CopyError::PromptError(err.to_string())
    }
}
