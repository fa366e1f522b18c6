//! Capability Registry
//!
//! Which container formats and codecs a Chromecast plays natively. Labels are
//! the strings MediaInfo reports (e.g. "AVC", "Matroska") and are compared
//! case-sensitively.
//!
//! A label missing from both lists is `Unknown`. The engine treats that as a
//! configuration gap and halts instead of guessing.

use serde::Deserialize;
use shared_utils::{CastError, Result};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Container,
    VideoCodec,
    AudioCodec,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Container,
        Category::VideoCodec,
        Category::AudioCodec,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Container => "container format",
            Category::VideoCodec => "video codec",
            Category::AudioCodec => "audio codec",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    Supported,
    Unsupported,
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CapabilityTable {
    #[serde(default)]
    pub supported: Vec<String>,
    #[serde(default)]
    pub unsupported: Vec<String>,
}

impl CapabilityTable {
    fn new(supported: &[&str], unsupported: &[&str]) -> Self {
        Self {
            supported: supported.iter().map(|s| s.to_string()).collect(),
            unsupported: unsupported.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Supported list wins if a label somehow sits in both.
    pub fn classify(&self, label: &str) -> Support {
        if self.supported.iter().any(|s| s == label) {
            Support::Supported
        } else if self.unsupported.iter().any(|s| s == label) {
            Support::Unsupported
        } else {
            Support::Unknown
        }
    }

    fn merge(&mut self, other: CapabilityTable) {
        self.supported.extend(other.supported);
        self.unsupported.extend(other.unsupported);
    }
}

/// What to ask the transcoder for when a stream or container must change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeDefaults {
    pub video_encoder: String,
    pub audio_encoder: String,
    pub container: String,
}

impl Default for TranscodeDefaults {
    fn default() -> Self {
        Self {
            video_encoder: "h264".to_string(),
            audio_encoder: "libvorbis".to_string(),
            container: "mkv".to_string(),
        }
    }
}

/// Additive extension read from `capabilities.json`.
///
/// ```json
/// { "audio_codec": { "supported": ["FLAC"], "unsupported": ["TrueHD"] } }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CapabilityExtension {
    #[serde(default)]
    pub container: CapabilityTable,
    #[serde(default)]
    pub video_codec: CapabilityTable,
    #[serde(default)]
    pub audio_codec: CapabilityTable,
}

impl CapabilityExtension {
    /// `Ok(None)` when the file does not exist; a malformed file is a fatal
    /// configuration error.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            CastError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let extension = serde_json::from_str(&text).map_err(|e| {
            CastError::Config(format!("invalid capability file {}: {}", path.display(), e))
        })?;
        Ok(Some(extension))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityRegistry {
    container: CapabilityTable,
    video_codec: CapabilityTable,
    audio_codec: CapabilityTable,
    defaults: TranscodeDefaults,
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self {
            container: CapabilityTable::new(
                &["MPEG-4", "Matroska"],
                &["BDAV", "AVI", "Flash Video"],
            ),
            video_codec: CapabilityTable::new(
                &["AVC"],
                &["MPEG-4 Visual", "xvid", "MPEG Video", "HEVC"],
            ),
            audio_codec: CapabilityTable::new(
                &["AAC", "MPEG Audio", "Vorbis", "Ogg", "Opus"],
                &["AC-3", "DTS", "PCM"],
            ),
            defaults: TranscodeDefaults::default(),
        }
    }
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables with no entries at all; every label is `Unknown`.
    pub fn empty() -> Self {
        Self {
            container: CapabilityTable::default(),
            video_codec: CapabilityTable::default(),
            audio_codec: CapabilityTable::default(),
            defaults: TranscodeDefaults::default(),
        }
    }

    pub fn classify(&self, category: Category, label: &str) -> Support {
        self.table(category).classify(label)
    }

    /// `Ok(true)` for supported, `Ok(false)` for unsupported, and
    /// `ConfigurationGap` for anything the tables do not mention.
    pub fn require(&self, category: Category, label: &str) -> Result<bool> {
        match self.classify(category, label) {
            Support::Supported => Ok(true),
            Support::Unsupported => Ok(false),
            Support::Unknown => Err(CastError::ConfigurationGap {
                category: category.to_string(),
                label: label.to_string(),
            }),
        }
    }

    pub fn add_supported(&mut self, category: Category, label: impl Into<String>) -> &mut Self {
        self.table_mut(category).supported.push(label.into());
        self
    }

    pub fn add_unsupported(&mut self, category: Category, label: impl Into<String>) -> &mut Self {
        self.table_mut(category).unsupported.push(label.into());
        self
    }

    pub fn extend(&mut self, extension: CapabilityExtension) {
        self.container.merge(extension.container);
        self.video_codec.merge(extension.video_codec);
        self.audio_codec.merge(extension.audio_codec);
    }

    pub fn defaults(&self) -> &TranscodeDefaults {
        &self.defaults
    }

    pub fn table(&self, category: Category) -> &CapabilityTable {
        match category {
            Category::Container => &self.container,
            Category::VideoCodec => &self.video_codec,
            Category::AudioCodec => &self.audio_codec,
        }
    }

    fn table_mut(&mut self, category: Category) -> &mut CapabilityTable {
        match category {
            Category::Container => &mut self.container,
            Category::VideoCodec => &mut self.video_codec,
            Category::AudioCodec => &mut self.audio_codec,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_tables() {
        let registry = CapabilityRegistry::default();

        assert_eq!(registry.classify(Category::Container, "Matroska"), Support::Supported);
        assert_eq!(registry.classify(Category::Container, "MPEG-4"), Support::Supported);
        assert_eq!(registry.classify(Category::Container, "AVI"), Support::Unsupported);
        assert_eq!(registry.classify(Category::Container, "Flash Video"), Support::Unsupported);

        assert_eq!(registry.classify(Category::VideoCodec, "AVC"), Support::Supported);
        assert_eq!(registry.classify(Category::VideoCodec, "HEVC"), Support::Unsupported);
        assert_eq!(registry.classify(Category::VideoCodec, "xvid"), Support::Unsupported);

        assert_eq!(registry.classify(Category::AudioCodec, "Opus"), Support::Supported);
        assert_eq!(registry.classify(Category::AudioCodec, "DTS"), Support::Unsupported);
    }

    #[test]
    fn test_labels_are_scoped_to_their_category() {
        let registry = CapabilityRegistry::default();
        // "MPEG-4" is a container label, not a video codec label
        assert_eq!(registry.classify(Category::VideoCodec, "MPEG-4"), Support::Unknown);
        assert_eq!(registry.classify(Category::Container, "AVC"), Support::Unknown);
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        let registry = CapabilityRegistry::default();
        assert_eq!(registry.classify(Category::VideoCodec, "avc"), Support::Unknown);
        assert_eq!(registry.classify(Category::AudioCodec, "aac"), Support::Unknown);
    }

    #[test]
    fn test_require_unknown_is_configuration_gap() {
        let registry = CapabilityRegistry::default();

        assert!(registry.require(Category::AudioCodec, "AAC").unwrap());
        assert!(!registry.require(Category::AudioCodec, "AC-3").unwrap());

        let err = registry.require(Category::AudioCodec, "TrueHD").unwrap_err();
        match err {
            CastError::ConfigurationGap { category, label } => {
                assert_eq!(category, "audio codec");
                assert_eq!(label, "TrueHD");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_label_is_unknown() {
        let registry = CapabilityRegistry::default();
        assert!(registry.require(Category::AudioCodec, "").is_err());
    }

    #[test]
    fn test_supported_checked_before_unsupported() {
        let mut registry = CapabilityRegistry::empty();
        registry
            .add_unsupported(Category::VideoCodec, "VP9")
            .add_supported(Category::VideoCodec, "VP9");
        assert_eq!(registry.classify(Category::VideoCodec, "VP9"), Support::Supported);
    }

    #[test]
    fn test_default_transcode_targets() {
        let defaults = TranscodeDefaults::default();
        assert_eq!(defaults.video_encoder, "h264");
        assert_eq!(defaults.audio_encoder, "libvorbis");
        assert_eq!(defaults.container, "mkv");
    }

    #[test]
    fn test_extension_file_is_additive() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("capabilities.json");
        std::fs::write(
            &path,
            r#"{"audio_codec": {"supported": ["FLAC"], "unsupported": ["TrueHD"]}}"#,
        )
        .unwrap();

        let mut registry = CapabilityRegistry::default();
        registry.extend(CapabilityExtension::load(&path).unwrap().unwrap());

        assert_eq!(registry.classify(Category::AudioCodec, "FLAC"), Support::Supported);
        assert_eq!(registry.classify(Category::AudioCodec, "TrueHD"), Support::Unsupported);
        assert_eq!(registry.classify(Category::AudioCodec, "AAC"), Support::Supported);
        assert_eq!(registry.classify(Category::Container, "Matroska"), Support::Supported);
    }

    #[test]
    fn test_missing_extension_file_is_none() {
        let temp = TempDir::new().unwrap();
        let loaded = CapabilityExtension::load(&temp.path().join("capabilities.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_malformed_extension_file_is_fatal() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("capabilities.json");
        std::fs::write(&path, r#"{"subtitle": {"supported": ["SRT"]}}"#).unwrap();

        let err = CapabilityExtension::load(&path).unwrap_err();
        assert!(matches!(err, CastError::Config(_)));
        assert!(err.is_fatal());
    }
}
