//! Shared Utilities for vid-cast
//!
//! Ambient plumbing kept apart from the compatibility logic:
//! - Processed-file ledger (idempotent re-runs)
//! - Batch collection and the sequential batch runner
//! - Summary reporting
//! - External tool discovery
//! - Logging setup and error categories
//! - Ctrl-C tracking

pub mod batch;
pub mod cli_runner;
pub mod common_utils;
pub mod error_handler;
pub mod errors;
pub mod interrupt;
pub mod ledger;
pub mod logging;
pub mod report;
pub mod tools;

pub use batch::{collect_files, BatchResult};
pub use cli_runner::{run_batch, CliProcessingResult, CliRunnerConfig, OutcomeKind, WorkItem};
pub use error_handler::{report_error, ErrorCategory};
pub use errors::{CastError, Result};
pub use interrupt::InterruptFlag;
pub use ledger::ProcessedLedger;
pub use tools::{require_any, require_tool, ToolPath};
