use crate::error_handler::ErrorCategory;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CastError {
    #[error(
        "Unknown {category} '{label}' - add it to the supported or unsupported table and re-run"
    )]
    ConfigurationGap { category: String, label: String },

    #[error("External tool not found: {tool} (is it installed and in PATH?)")]
    ToolUnavailable { tool: String },

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Invalid path {}: {reason}", path.display())]
    InvalidPath { path: PathBuf, reason: String },

    #[error("Probe failed for {}: {message}", path.display())]
    ProbeFailed { path: PathBuf, message: String },

    #[error("Conversion failed for {}: {reason}", path.display())]
    ConversionFailure { path: PathBuf, reason: String },

    #[error("Ledger I/O failed at {}: {source}", path.display())]
    Ledger {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Interrupted by user")]
    Interrupted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CastError {
    /// Fatal errors abort the whole run; everything else only costs the current file.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CastError::ConfigurationGap { .. }
            | CastError::ToolUnavailable { .. }
            | CastError::Ledger { .. }
            | CastError::Config(_)
            | CastError::Interrupted => ErrorCategory::Fatal,

            CastError::FileNotFound { .. }
            | CastError::InvalidPath { .. }
            | CastError::ProbeFailed { .. }
            | CastError::ConversionFailure { .. }
            | CastError::Io(_) => ErrorCategory::Recoverable,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.category() == ErrorCategory::Fatal
    }
}

pub type Result<T> = std::result::Result<T, CastError>;
