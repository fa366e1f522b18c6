//! Processed-File Ledger
//!
//! Plain-text record of files that never need touching again:
//! - sources already confirmed playable as-is
//! - outputs produced by a previous conversion
//!
//! One absolute path per line, append-only. Lookups are exact byte matches on
//! the path as the OS spells it (no lossy UTF-8 conversion), served from an
//! in-memory set loaded at open time.
//!
//! # Usage
//! ```no_run
//! use shared_utils::ledger::ProcessedLedger;
//! use std::path::Path;
//!
//! fn main() -> shared_utils::Result<()> {
//!     let mut ledger = ProcessedLedger::open(Path::new("/home/me/.vid-cast/processed_files"))?;
//!     let file = Path::new("/media/show/episode01.mkv");
//!
//!     if !ledger.contains(file) {
//!         // ... probe, classify, convert ...
//!         ledger.record(file)?;
//!     }
//!     Ok(())
//! }
//! ```

use crate::errors::{CastError, Result};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

pub struct ProcessedLedger {
    /// Backing file
    path: PathBuf,
    /// Every line ever appended, deduplicated in memory only
    entries: HashSet<Vec<u8>>,
}

impl ProcessedLedger {
    /// Open the ledger at `path`, creating it (and its directory) if missing.
    pub fn open(path: &Path) -> Result<Self> {
        Self::ensure_exists(path)?;
        let entries = Self::load(path)?;

        tracing::debug!(
            ledger = %path.display(),
            entries = entries.len(),
            "Ledger loaded"
        );

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Create the backing file with an empty body unless it already exists.
    pub fn ensure_exists(path: &Path) -> Result<()> {
        if path.exists() {
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| CastError::Ledger {
                path: path.to_path_buf(),
                source,
            })?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| CastError::Ledger {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(ledger = %path.display(), "📒 Created processed-files ledger");
        Ok(())
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains(&Self::key(path))
    }

    /// Append `path`. No dedup on disk: a repeated line is harmless for lookups.
    pub fn record(&mut self, path: &Path) -> Result<()> {
        let mut key = Self::key(path);
        if key.contains(&b'\n') {
            return Err(CastError::InvalidPath {
                path: path.to_path_buf(),
                reason: "a path containing a newline cannot be recorded".to_string(),
            });
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        key.push(b'\n');
        file.write_all(&key).map_err(|source| self.io_error(source))?;
        key.pop();

        tracing::debug!(
            ledger = %self.path.display(),
            entry = %path.display(),
            "Ledger entry appended"
        );
        self.entries.insert(key);
        Ok(())
    }

    /// Number of distinct entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    #[cfg(unix)]
    fn key(path: &Path) -> Vec<u8> {
        use std::os::unix::ffi::OsStrExt;
        path.as_os_str().as_bytes().to_vec()
    }

    #[cfg(not(unix))]
    fn key(path: &Path) -> Vec<u8> {
        path.as_os_str().as_encoded_bytes().to_vec()
    }

    fn io_error(&self, source: std::io::Error) -> CastError {
        CastError::Ledger {
            path: self.path.clone(),
            source,
        }
    }

    fn load(path: &Path) -> Result<HashSet<Vec<u8>>> {
        let file = File::open(path).map_err(|source| CastError::Ledger {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let mut entries = HashSet::new();

        for line in reader.split(b'\n') {
            let line = line.map_err(|source| CastError::Ledger {
                path: path.to_path_buf(),
                source,
            })?;
            if !line.is_empty() {
                entries.insert(line);
            }
        }

        Ok(entries)
    }
}

// ============================================================================
// Tests
// ============================================================================
