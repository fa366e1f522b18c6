use crate::batch::BatchResult;
use crate::error_handler::{handle_error, ErrorAction};
use crate::errors::{CastError, Result};
use crate::interrupt::InterruptFlag;
use crate::report::print_summary_report;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Compatible,
    Converted,
    Skipped,
    Failed,
}

pub trait CliProcessingResult {
    fn kind(&self) -> OutcomeKind;
    fn message(&self) -> String;
}

/// One unit of work handed to the per-file closure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkItem<C> {
    /// A regular file plus whatever settings were active when it was named
    File { path: PathBuf, context: C },
    /// A command-line path that does not exist
    Missing(PathBuf),
    /// A command-line path that exists but cannot be processed
    Invalid { path: PathBuf, reason: String },
}

pub struct CliRunnerConfig {
    pub label: String,
    pub print_report: bool,
}

/// Process `items` strictly in order, one at a time.
///
/// Recoverable errors are tallied as failures and the batch moves on. The first
/// fatal error stops the batch and is returned after the summary is printed.
/// A raised `interrupt` flag stops the batch after the current file.
pub fn run_batch<C, I, F, R>(
    config: &CliRunnerConfig,
    items: I,
    interrupt: &InterruptFlag,
    mut converter: F,
) -> Result<BatchResult>
where
    I: IntoIterator<Item = WorkItem<C>>,
    F: FnMut(&Path, &C) -> Result<R>,
    R: CliProcessingResult,
{
    let start_time = Instant::now();
    let mut batch_result = BatchResult::new();
    let mut fatal: Option<CastError> = None;

    for item in items {
        match item {
            WorkItem::Missing(path) => {
                let err = CastError::FileNotFound { path: path.clone() };
                handle_error(err.category(), "Skipping argument", &err);
                batch_result.skip();
            }
            WorkItem::Invalid { path, reason } => {
                let err = CastError::InvalidPath { path, reason };
                handle_error(err.category(), "Skipping argument", &err);
                batch_result.skip();
            }
            WorkItem::File { path, context } => match converter(&path, &context) {
                Ok(result) => record_outcome(&mut batch_result, &path, &result),
                Err(e) => match handle_error(e.category(), &display_name(&path), &e) {
                    ErrorAction::Continue => batch_result.fail(path, e.to_string()),
                    ErrorAction::Abort => {
                        fatal = Some(e);
                        break;
                    }
                },
            },
        }

        if interrupt.is_raised() {
            fatal = Some(CastError::Interrupted);
            break;
        }
    }

    if config.print_report {
        print_summary_report(&batch_result, start_time.elapsed(), &config.label);
    }

    match fatal {
        Some(e) => Err(e),
        None => Ok(batch_result),
    }
}

fn record_outcome<R: CliProcessingResult>(batch: &mut BatchResult, path: &Path, result: &R) {
    let name = display_name(path);
    match result.kind() {
        OutcomeKind::Compatible => {
            info!("✅ {} → OK ({})", name, result.message());
            batch.compatible();
        }
        OutcomeKind::Converted => {
            info!("✅ {} → {}", name, result.message());
            batch.converted();
        }
        OutcomeKind::Skipped => {
            info!("⏭️ {} → SKIP ({})", name, result.message());
            batch.skip();
        }
        OutcomeKind::Failed => {
            info!("❌ {} → FAILED ({})", name, result.message());
            batch.fail(path.to_path_buf(), result.message());
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .to_string()
}
