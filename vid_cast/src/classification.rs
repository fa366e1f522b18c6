//! Classification Engine
//!
//! Decides per file whether it already plays on a Chromecast or what it must
//! become. Pure with respect to its inputs: the probe result, the active
//! container override and the capability registry are all passed in.

use crate::capability::{CapabilityRegistry, Category};
use crate::probe::{MediaProbe, ProbeResult};
use shared_utils::common_utils::{get_extension, has_extension};
use shared_utils::{CastError, ProcessedLedger, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Extensions worth probing at all (compared case-insensitively).
pub const SUPPORTED_VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "avi", "mp4", "3gp", "mov", "mpg", "mpeg", "qt", "wmv", "m2ts", "flv",
];

/// Forced output container, set by `--mp4` / `--mkv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerOverride {
    Mp4,
    Mkv,
}

impl ContainerOverride {
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "--mp4" => Some(ContainerOverride::Mp4),
            "--mkv" => Some(ContainerOverride::Mkv),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerOverride::Mp4 => "mp4",
            ContainerOverride::Mkv => "mkv",
        }
    }

    pub fn matches_extension(&self, extension: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(extension)
    }
}

impl fmt::Display for ContainerOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamTarget {
    /// Reuse the stream as-is
    Copy,
    /// Re-encode with the named encoder
    Encode(String),
}

impl StreamTarget {
    pub fn is_copy(&self) -> bool {
        matches!(self, StreamTarget::Copy)
    }

    /// Value for the transcoder's codec argument.
    pub fn as_arg(&self) -> &str {
        match self {
            StreamTarget::Copy => "copy",
            StreamTarget::Encode(encoder) => encoder,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerTarget {
    /// No remux needed
    Keep,
    Convert(String),
}

impl ContainerTarget {
    pub fn as_str(&self) -> &str {
        match self {
            ContainerTarget::Keep => "ok",
            ContainerTarget::Convert(container) => container,
        }
    }
}

/// Per-file decision; computed fresh every run, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDecision {
    /// Extension as it appears on disk
    pub extension: String,
    pub input_container: String,
    pub output_container: ContainerTarget,
    pub input_video_codec: String,
    pub output_video_codec: StreamTarget,
    pub input_audio_codec: String,
    pub output_audio_codec: StreamTarget,
}

/// Concrete transcoder arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPlan {
    pub video_codec: String,
    pub audio_codec: String,
    pub container: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    AlreadyCompatible,
    NeedsConversion(ConversionPlan),
}

impl FileDecision {
    pub fn is_passthrough(&self) -> bool {
        self.output_container == ContainerTarget::Keep
            && self.output_video_codec.is_copy()
            && self.output_audio_codec.is_copy()
    }

    /// A conversion always writes a concrete container, so `Keep` becomes the
    /// file's own extension here.
    pub fn verdict(&self) -> Verdict {
        if self.is_passthrough() {
            return Verdict::AlreadyCompatible;
        }

        let container = match &self.output_container {
            ContainerTarget::Keep => self.extension.clone(),
            ContainerTarget::Convert(container) => container.clone(),
        };

        Verdict::NeedsConversion(ConversionPlan {
            video_codec: self.output_video_codec.as_arg().to_string(),
            audio_codec: self.output_audio_codec.as_arg().to_string(),
            container,
        })
    }
}

/// Decide container and stream targets for one probed file.
///
/// Any label the registry does not know aborts with `ConfigurationGap`.
pub fn decide(
    extension: &str,
    probe: &ProbeResult,
    container_override: Option<ContainerOverride>,
    registry: &CapabilityRegistry,
) -> Result<FileDecision> {
    let defaults = registry.defaults();

    let container_ok = registry.require(Category::Container, &probe.container)?;
    let output_container = match container_override {
        Some(ov) if ov.matches_extension(extension) => ContainerTarget::Keep,
        Some(ov) => ContainerTarget::Convert(ov.as_str().to_string()),
        None if container_ok => ContainerTarget::Keep,
        None => ContainerTarget::Convert(defaults.container.clone()),
    };

    let output_video_codec = if registry.require(Category::VideoCodec, &probe.video_codec)? {
        StreamTarget::Copy
    } else {
        StreamTarget::Encode(defaults.video_encoder.clone())
    };

    let output_audio_codec = if registry.require(Category::AudioCodec, &probe.audio_codec)? {
        StreamTarget::Copy
    } else {
        StreamTarget::Encode(defaults.audio_encoder.clone())
    };

    Ok(FileDecision {
        extension: extension.to_string(),
        input_container: probe.container.clone(),
        output_container,
        input_video_codec: probe.video_codec.clone(),
        output_video_codec,
        input_audio_codec: probe.audio_codec.clone(),
        output_audio_codec,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Extension outside the supported set; never probed
    NotVideo,
    /// Canonical path already in the ledger
    AlreadyProcessed { canonical: PathBuf },
    Decided {
        canonical: PathBuf,
        decision: FileDecision,
    },
}

/// Full per-file classification: extension gate, ledger gate, probe, decide.
pub fn classify_file<P: MediaProbe + ?Sized>(
    path: &Path,
    ledger: &ProcessedLedger,
    probe: &P,
    container_override: Option<ContainerOverride>,
    registry: &CapabilityRegistry,
) -> Result<Classification> {
    if !has_extension(path, SUPPORTED_VIDEO_EXTENSIONS) {
        return Ok(Classification::NotVideo);
    }

    let canonical = path.canonicalize().map_err(|e| CastError::InvalidPath {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if canonical.to_string_lossy().contains('\n') {
        return Err(CastError::InvalidPath {
            path: path.to_path_buf(),
            reason: "newline in path; it could not be recorded in the ledger".to_string(),
        });
    }

    if ledger.contains(&canonical) {
        return Ok(Classification::AlreadyProcessed { canonical });
    }

    let probed = probe.probe(&canonical)?;
    let decision = decide(&get_extension(path), &probed, container_override, registry)?;

    let container = format!(
        "{} → {}",
        decision.input_container,
        decision.output_container.as_str()
    );
    let video = format!(
        "{} → {}",
        decision.input_video_codec,
        decision.output_video_codec.as_arg()
    );
    let audio = format!(
        "{} → {}",
        decision.input_audio_codec,
        decision.output_audio_codec.as_arg()
    );
    tracing::debug!(
        path = %canonical.display(),
        container = %container,
        video = %video,
        audio = %audio,
        "Decision"
    );

    Ok(Classification::Decided {
        canonical,
        decision,
    })
}
