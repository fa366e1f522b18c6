//! vid-cast - Chromecast Compatibility Checker and Converter
//!
//! Probes each video's container, video codec and audio codec, then:
//! - records files that already play on a Chromecast
//! - remuxes/transcodes the rest, keeping the original as a backup
//!
//! Every good file and every produced output goes into a processed-file
//! ledger, so re-running over the same tree only touches new files.
//!
//! ```rust,ignore
//! use vid_cast::{CapabilityRegistry, MediaInfoProbe, FfmpegTranscoder, Processor};
//! use shared_utils::ProcessedLedger;
//! use std::path::Path;
//!
//! let probe = MediaInfoProbe::locate()?;
//! let transcoder = FfmpegTranscoder::locate()?;
//! let ledger = ProcessedLedger::open(Path::new("/tmp/processed_files"))?;
//! let mut processor = Processor::new(CapabilityRegistry::new(), ledger, &probe, &transcoder);
//! processor.process_file(Path::new("movie.avi"), None)?;
//! ```

pub mod capability;
pub mod classification;
pub mod config;
pub mod conversion_api;
pub mod dispatcher;
pub mod probe;
pub mod processor;

pub use capability::{CapabilityExtension, CapabilityRegistry, Category, Support, TranscodeDefaults};
pub use classification::{
    classify_file, decide, Classification, ContainerOverride, ConversionPlan, FileDecision, Verdict,
};
pub use config::CastConfig;
pub use conversion_api::{convert, ConversionOutcome, FfmpegTranscoder, TranscodeStatus, Transcoder};
pub use dispatcher::expand_args;
pub use probe::{MediaInfoProbe, MediaProbe, ProbeResult};
pub use processor::{FileOutcome, Processor};

pub use shared_utils::errors::{CastError, Result};
