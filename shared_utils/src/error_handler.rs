//! Unified Error Handler Module
//!
//! ## Error categories
//! - Recoverable: the current file is abandoned, the batch continues
//! - Fatal: the batch stops and the error reaches `main`
//! - Optional: a side task failed, logged and ignored
//!
//! `report_error()` prints the full cause chain to stderr and the log.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Recoverable,
    Fatal,
    Optional,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Recoverable => write!(f, "RECOVERABLE"),
            ErrorCategory::Fatal => write!(f, "FATAL"),
            ErrorCategory::Optional => write!(f, "OPTIONAL"),
        }
    }
}

#[derive(Debug)]
pub enum ErrorAction {
    Continue,
    Abort,
}

/// Log `error` according to its category and tell the caller whether to keep going.
pub fn handle_error<E: std::error::Error + ?Sized>(
    category: ErrorCategory,
    context: &str,
    error: &E,
) -> ErrorAction {
    match category {
        ErrorCategory::Recoverable => {
            tracing::warn!(category = %category, "⚠️ {}: {}", context, error);
            ErrorAction::Continue
        }
        ErrorCategory::Fatal => {
            tracing::error!(category = %category, "❌ {}: {}", context, error);
            ErrorAction::Abort
        }
        ErrorCategory::Optional => {
            tracing::info!(category = %category, "ℹ️ {}: {}", context, error);
            ErrorAction::Continue
        }
    }
}

pub fn report_error<E: std::error::Error + ?Sized>(error: &E) {
    eprintln!("🔥 ERROR: {}", error);

    let mut source = error.source();
    let mut level = 1;
    while let Some(err) = source {
        eprintln!("   {}. Caused by: {}", level, err);
        source = err.source();
        level += 1;
    }

    tracing::error!("Error occurred: {}", error);

    let mut source = error.source();
    let mut level = 1;
    while let Some(err) = source {
        tracing::error!("  Caused by (level {}): {}", level, err);
        source = err.source();
        level += 1;
    }
}
