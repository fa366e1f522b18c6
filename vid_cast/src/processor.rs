//! Per-file pipeline: extension gate → ledger gate → probe → decide, then
//! either record the file as good or hand it to the conversion orchestrator.

use crate::capability::CapabilityRegistry;
use crate::classification::{classify_file, Classification, ContainerOverride, Verdict};
use crate::conversion_api::{convert, ConversionOutcome, Transcoder};
use crate::probe::MediaProbe;
use shared_utils::error_handler::handle_error;
use shared_utils::{CliProcessingResult, ErrorCategory, OutcomeKind, ProcessedLedger, Result};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    NotVideo,
    AlreadyProcessed,
    /// Plays as-is; recorded in the ledger
    AlreadyCompatible { summary: String },
    Converted { output: PathBuf, backup: PathBuf },
    OutputExists { output: PathBuf },
    ConversionFailed { reason: String },
}

impl CliProcessingResult for FileOutcome {
    fn kind(&self) -> OutcomeKind {
        match self {
            FileOutcome::NotVideo
            | FileOutcome::AlreadyProcessed
            | FileOutcome::OutputExists { .. } => OutcomeKind::Skipped,
            FileOutcome::AlreadyCompatible { .. } => OutcomeKind::Compatible,
            FileOutcome::Converted { .. } => OutcomeKind::Converted,
            FileOutcome::ConversionFailed { .. } => OutcomeKind::Failed,
        }
    }

    fn message(&self) -> String {
        match self {
            FileOutcome::NotVideo => "not a video file".to_string(),
            FileOutcome::AlreadyProcessed => "already processed".to_string(),
            FileOutcome::AlreadyCompatible { summary } => summary.clone(),
            FileOutcome::Converted { output, backup } => {
                format!("{} (original kept as {})", output.display(), backup.display())
            }
            FileOutcome::OutputExists { output } => format!("output exists: {}", output.display()),
            FileOutcome::ConversionFailed { reason } => reason.clone(),
        }
    }
}

pub struct Processor<'a> {
    registry: CapabilityRegistry,
    ledger: ProcessedLedger,
    probe: &'a dyn MediaProbe,
    transcoder: &'a dyn Transcoder,
}

impl<'a> Processor<'a> {
    pub fn new(
        registry: CapabilityRegistry,
        ledger: ProcessedLedger,
        probe: &'a dyn MediaProbe,
        transcoder: &'a dyn Transcoder,
    ) -> Self {
        Self {
            registry,
            ledger,
            probe,
            transcoder,
        }
    }

    pub fn ledger(&self) -> &ProcessedLedger {
        &self.ledger
    }

    pub fn process_file(
        &mut self,
        path: &Path,
        container_override: Option<ContainerOverride>,
    ) -> Result<FileOutcome> {
        let classification = classify_file(
            path,
            &self.ledger,
            self.probe,
            container_override,
            &self.registry,
        )?;

        let (canonical, decision) = match classification {
            Classification::NotVideo => return Ok(FileOutcome::NotVideo),
            Classification::AlreadyProcessed { .. } => return Ok(FileOutcome::AlreadyProcessed),
            Classification::Decided {
                canonical,
                decision,
            } => (canonical, decision),
        };

        match decision.verdict() {
            Verdict::AlreadyCompatible => {
                self.ledger.record(&canonical)?;
                Ok(FileOutcome::AlreadyCompatible {
                    summary: format!(
                        "{} / {} / {}",
                        decision.input_container,
                        decision.input_video_codec,
                        decision.input_audio_codec
                    ),
                })
            }
            Verdict::NeedsConversion(plan) => {
                match self.probe.duration(&canonical) {
                    Ok(Some(duration)) => info!(
                        "⏱️ {}: {:.1}s to transcode",
                        canonical.display(),
                        duration.as_secs_f64()
                    ),
                    Ok(None) => {}
                    Err(e) => {
                        handle_error(ErrorCategory::Optional, "Duration query", &e);
                    }
                }

                let outcome = convert(self.transcoder, &mut self.ledger, &canonical, &plan)?;
                Ok(match outcome {
                    ConversionOutcome::Converted { output, backup } => {
                        FileOutcome::Converted { output, backup }
                    }
                    ConversionOutcome::OutputExists { output } => {
                        FileOutcome::OutputExists { output }
                    }
                    ConversionOutcome::Failed { reason } => {
                        FileOutcome::ConversionFailed { reason }
                    }
                })
            }
        }
    }
}
