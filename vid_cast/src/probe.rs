//! Media Probe Adapter
//!
//! Reads container format, video codec, audio codec (and, on demand, duration)
//! for one file. Each value is the first line MediaInfo prints for the query;
//! an absent stream comes back as an empty label and is left for the
//! capability registry to reject.

use shared_utils::common_utils::{execute_command_with_logging, first_line};
use shared_utils::tools::{require_tool, ToolPath};
use shared_utils::{CastError, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResult {
    pub container: String,
    pub video_codec: String,
    pub audio_codec: String,
}

pub trait MediaProbe {
    /// Container, video codec and audio codec labels.
    fn probe(&self, path: &Path) -> Result<ProbeResult>;

    /// Playback length, `None` when the tool reports nothing usable.
    fn duration(&self, path: &Path) -> Result<Option<Duration>>;
}

const INFORM_CONTAINER: &str = "General;%Format%\\n";
const INFORM_VIDEO: &str = "Video;%Format%\\n";
const INFORM_AUDIO: &str = "Audio;%Format%\\n";
const INFORM_DURATION: &str = "General;%Duration%\\n";

/// `mediainfo --Inform=...` backed probe.
#[derive(Debug, Clone)]
pub struct MediaInfoProbe {
    tool: ToolPath,
}

impl MediaInfoProbe {
    pub fn new(tool: ToolPath) -> Self {
        Self { tool }
    }

    /// Find `mediainfo` on `PATH`; `ToolUnavailable` otherwise.
    pub fn locate() -> Result<Self> {
        Ok(Self::new(require_tool("mediainfo")?))
    }

    pub fn tool(&self) -> &ToolPath {
        &self.tool
    }

    fn query(&self, path: &Path, inform: &str) -> Result<String> {
        let mut cmd = Command::new(&self.tool.path);
        cmd.arg(format!("--Inform={}", inform))
            .arg(path)
            .stdin(Stdio::null());

        let output = execute_command_with_logging(&mut cmd).map_err(|e| CastError::ProbeFailed {
            path: path.to_path_buf(),
            message: format!("{:#}", e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CastError::ProbeFailed {
                path: path.to_path_buf(),
                message: format!(
                    "{} exited with {:?}: {}",
                    self.tool.name,
                    output.status.code(),
                    first_line(&stderr)
                ),
            });
        }

        Ok(first_line(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl MediaProbe for MediaInfoProbe {
    fn probe(&self, path: &Path) -> Result<ProbeResult> {
        let result = ProbeResult {
            container: self.query(path, INFORM_CONTAINER)?,
            video_codec: self.query(path, INFORM_VIDEO)?,
            audio_codec: self.query(path, INFORM_AUDIO)?,
        };

        tracing::debug!(
            path = %path.display(),
            container = %result.container,
            video = %result.video_codec,
            audio = %result.audio_codec,
            "Probed"
        );
        Ok(result)
    }

    fn duration(&self, path: &Path) -> Result<Option<Duration>> {
        Ok(parse_duration_ms(&self.query(path, INFORM_DURATION)?))
    }
}

/// MediaInfo reports duration in milliseconds, sometimes with a fraction.
pub fn parse_duration_ms(value: &str) -> Option<Duration> {
    let ms = value.trim().parse::<f64>().ok()?;
    if ms.is_finite() && ms >= 0.0 {
        Some(Duration::from_nanos((ms * 1_000_000.0).round() as u64))
    } else {
        None
    }
}
