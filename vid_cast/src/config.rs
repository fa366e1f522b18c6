//! Run configuration, resolved once from the environment in `main`.

use crate::capability::{CapabilityExtension, CapabilityRegistry};
use shared_utils::logging::LogConfig;
use shared_utils::{CastError, ProcessedLedger, Result};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::info;

/// Overrides `$HOME/.vid-cast`.
pub const HOME_ENV: &str = "VID_CAST_HOME";
/// Overrides the log directory (system temp dir otherwise).
pub const LOG_DIR_ENV: &str = "VID_CAST_LOG_DIR";

const DEFAULT_DIR_NAME: &str = ".vid-cast";
const LEDGER_FILE: &str = "processed_files";
const CAPABILITIES_FILE: &str = "capabilities.json";

#[derive(Debug, Clone)]
pub struct CastConfig {
    pub config_dir: PathBuf,
    pub ledger_path: PathBuf,
    pub capabilities_path: PathBuf,
    pub log: LogConfig,
}

impl CastConfig {
    pub fn from_env() -> Result<Self> {
        Self::resolve(
            std::env::var_os("HOME"),
            std::env::var_os(HOME_ENV),
            std::env::var_os(LOG_DIR_ENV),
        )
    }

    /// Empty variables count as unset.
    pub fn resolve(
        home: Option<OsString>,
        cast_home: Option<OsString>,
        log_dir: Option<OsString>,
    ) -> Result<Self> {
        let config_dir = match (non_empty(cast_home), non_empty(home)) {
            (Some(dir), _) => PathBuf::from(dir),
            (None, Some(home)) => PathBuf::from(home).join(DEFAULT_DIR_NAME),
            (None, None) => {
                return Err(CastError::Config(format!(
                    "cannot locate configuration directory: neither {} nor HOME is set",
                    HOME_ENV
                )))
            }
        };

        let mut config = Self::with_config_dir(config_dir);
        if let Some(dir) = non_empty(log_dir) {
            config.log = config.log.with_log_dir(PathBuf::from(dir));
        }
        Ok(config)
    }

    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self {
            ledger_path: config_dir.join(LEDGER_FILE),
            capabilities_path: config_dir.join(CAPABILITIES_FILE),
            config_dir,
            log: LogConfig::default(),
        }
    }

    /// Built-in tables plus whatever `capabilities.json` adds.
    pub fn load_registry(&self) -> Result<CapabilityRegistry> {
        let mut registry = CapabilityRegistry::new();
        if let Some(extension) = CapabilityExtension::load(&self.capabilities_path)? {
            info!("📋 Capability extension loaded from {}", self.capabilities_path.display());
            registry.extend(extension);
        }
        Ok(registry)
    }

    pub fn open_ledger(&self) -> Result<ProcessedLedger> {
        ProcessedLedger::open(&self.ledger_path)
    }
}

fn non_empty(value: Option<OsString>) -> Option<OsString> {
    value.filter(|v| !v.is_empty())
}
