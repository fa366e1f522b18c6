//! Conversion Orchestrator
//!
//! Runs the transcoder for one file and does the bookkeeping around it:
//! - success: output recorded in the ledger, original renamed to a backup
//! - failure: partial output removed, original untouched and unrecorded
//! - unrecorded output already present: leftover of an unfinished run,
//!   removed before converting again

use crate::classification::ConversionPlan;
use shared_utils::tools::{require_any, ToolPath};
use shared_utils::{CastError, ProcessedLedger, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscodeStatus {
    Success,
    Failed { reason: String },
}

pub trait Transcoder {
    /// Write `output` from `input` according to `plan`. Must not touch `input`.
    fn transcode(&self, input: &Path, output: &Path, plan: &ConversionPlan) -> TranscodeStatus;
}

/// ffmpeg (or avconv, which takes the same arguments).
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    tool: ToolPath,
}

impl FfmpegTranscoder {
    pub fn new(tool: ToolPath) -> Self {
        Self { tool }
    }

    pub fn locate() -> Result<Self> {
        Ok(Self::new(require_any(&["ffmpeg", "avconv"])?))
    }

    pub fn tool(&self) -> &ToolPath {
        &self.tool
    }

    /// All streams are mapped; subtitles are always copied. `-n` refuses to
    /// overwrite anything already at `output`.
    pub fn build_args(input: &Path, output: &Path, plan: &ConversionPlan) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-loglevel", "error", "-stats", "-n", "-i"]
            .iter()
            .map(OsString::from)
            .collect();
        args.push(input.as_os_str().to_os_string());
        args.extend(
            [
                "-map",
                "0",
                "-scodec",
                "copy",
                "-vcodec",
                plan.video_codec.as_str(),
                "-acodec",
                plan.audio_codec.as_str(),
            ]
            .iter()
            .map(OsString::from),
        );
        args.push(output.as_os_str().to_os_string());
        args
    }
}

impl Transcoder for FfmpegTranscoder {
    fn transcode(&self, input: &Path, output: &Path, plan: &ConversionPlan) -> TranscodeStatus {
        let args = Self::build_args(input, output, plan);
        tracing::debug!(tool = %self.tool.path.display(), args = ?args, "Executing transcoder");

        // stdin closed so the tool can never stop to ask a question
        let status = Command::new(&self.tool.path)
            .args(&args)
            .stdin(Stdio::null())
            .status();

        match status {
            Ok(status) if status.success() => TranscodeStatus::Success,
            Ok(status) => TranscodeStatus::Failed {
                reason: format!("{} {}", self.tool.name, describe_exit(status)),
            },
            Err(e) => TranscodeStatus::Failed {
                reason: format!("failed to start {}: {}", self.tool.name, e),
            },
        }
    }
}

fn describe_exit(status: ExitStatus) -> String {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return format!("was interrupted by signal {}", signal);
        }
    }
    match status.code() {
        Some(code) => format!("exited with code {}", code),
        None => "terminated without exit code".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Converted { output: PathBuf, backup: PathBuf },
    /// Output already recorded in the ledger; left alone
    OutputExists { output: PathBuf },
    Failed { reason: String },
}

/// `<input>.<container>`, e.g. `movie.avi` → `movie.avi.mkv`.
pub fn output_path_for(input: &Path, container: &str) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".");
    name.push(container);
    PathBuf::from(name)
}

/// `<input>.bak`, or the first free `<input>.bak.N`.
pub fn backup_path_for(input: &Path) -> PathBuf {
    let first = output_path_for(input, "bak");
    if !first.exists() {
        return first;
    }
    (1u32..)
        .map(|n| output_path_for(input, &format!("bak.{}", n)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

/// Output must exist and be non-empty before the original is moved aside.
pub fn verify_output_integrity(output: &Path) -> std::result::Result<(), String> {
    let metadata =
        fs::metadata(output).map_err(|e| format!("output not readable: {}", e))?;
    if !metadata.is_file() {
        return Err("output is not a regular file".to_string());
    }
    if metadata.len() == 0 {
        return Err("output is empty (0 bytes)".to_string());
    }
    Ok(())
}

/// Convert `input` (a canonical path) according to `plan`.
pub fn convert<T: Transcoder + ?Sized>(
    transcoder: &T,
    ledger: &mut ProcessedLedger,
    input: &Path,
    plan: &ConversionPlan,
) -> Result<ConversionOutcome> {
    let output = output_path_for(input, &plan.container);

    if output.exists() {
        if ledger.contains(&ledger_key(&output)) {
            warn!(output = %output.display(), "⏭️ Output already recorded, not converting");
            return Ok(ConversionOutcome::OutputExists { output });
        }

        warn!(output = %output.display(), "🧹 Removing unrecorded output left by an unfinished run");
        if let Err(e) = fs::remove_file(&output) {
            return Ok(ConversionOutcome::Failed {
                reason: format!("stale output {} could not be removed: {}", output.display(), e),
            });
        }
    }

    info!(
        "🔄 {} → {} (video: {}, audio: {})",
        input.display(),
        output.display(),
        plan.video_codec,
        plan.audio_codec
    );

    let status = match transcoder.transcode(input, &output, plan) {
        TranscodeStatus::Success => match verify_output_integrity(&output) {
            Ok(()) => TranscodeStatus::Success,
            Err(reason) => TranscodeStatus::Failed { reason },
        },
        failed => failed,
    };

    match status {
        TranscodeStatus::Success => {
            let recorded = ledger_key(&output);
            ledger.record(&recorded)?;

            let backup = backup_path_for(input);
            fs::rename(input, &backup).map_err(|e| CastError::ConversionFailure {
                path: input.to_path_buf(),
                reason: format!(
                    "converted to {} but could not rename original to {}: {}",
                    output.display(),
                    backup.display(),
                    e
                ),
            })?;

            Ok(ConversionOutcome::Converted {
                output: recorded,
                backup,
            })
        }
        TranscodeStatus::Failed { reason } => {
            if output.exists() {
                if let Err(e) = fs::remove_file(&output) {
                    warn!(
                        output = %output.display(),
                        error = %e,
                        "⚠️ Could not remove partial output"
                    );
                }
            }
            Ok(ConversionOutcome::Failed { reason })
        }
    }
}

/// Outputs are recorded under their resolved path.
fn ledger_key(output: &Path) -> PathBuf {
    output.canonicalize().unwrap_or_else(|_| output.to_path_buf())
}
