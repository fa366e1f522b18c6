//! Common Utilities Module
//!
//! Small helpers used by more than one layer:
//! - extension handling
//! - first-line extraction from tool output
//! - logged external command execution

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Output};
use std::time::Instant;
use tracing::{debug, error};

// ═══════════════════════════════════════════════════════════════
// File Operations
// ═══════════════════════════════════════════════════════════════

/// File extension as written on disk, without the dot; empty if none.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use shared_utils::common_utils::get_extension;
///
/// assert_eq!(get_extension(Path::new("Movie.MKV")), "MKV");
/// assert_eq!(get_extension(Path::new("noext")), "");
/// ```
pub fn get_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(String::from)
        .unwrap_or_default()
}

/// Lowercase file extension; empty if none.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use shared_utils::common_utils::get_extension_lowercase;
///
/// assert_eq!(get_extension_lowercase(Path::new("test.AVI")), "avi");
/// assert_eq!(get_extension_lowercase(Path::new("noext")), "");
/// ```
pub fn get_extension_lowercase(path: &Path) -> String {
    get_extension(path).to_lowercase()
}

/// Case-insensitive extension membership test.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use shared_utils::common_utils::has_extension;
///
/// let extensions = &["mkv", "mp4"];
/// assert!(has_extension(Path::new("clip.MP4"), extensions));
/// assert!(!has_extension(Path::new("notes.txt"), extensions));
/// ```
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    let ext = get_extension_lowercase(path);
    extensions.contains(&ext.as_str())
}

// ═══════════════════════════════════════════════════════════════
// String Processing
// ═══════════════════════════════════════════════════════════════

/// First line of `output` with trailing whitespace (including `\r`) removed.
/// Empty output yields an empty string.
///
/// # Examples
/// ```
/// use shared_utils::common_utils::first_line;
///
/// assert_eq!(first_line("AVC\r\nAVC\n"), "AVC");
/// assert_eq!(first_line(""), "");
/// ```
pub fn first_line(output: &str) -> String {
    output
        .lines()
        .next()
        .map(|l| l.trim_end().to_string())
        .unwrap_or_default()
}

// ═══════════════════════════════════════════════════════════════
// Command Execution
// ═══════════════════════════════════════════════════════════════

/// Run `cmd` to completion, capturing output, and log the outcome.
///
/// Only spawn failures become `Err`; a non-zero exit is returned in `Output`
/// for the caller to judge.
pub fn execute_command_with_logging(cmd: &mut Command) -> Result<Output> {
    let command_str = format!("{:?}", cmd);
    debug!(command = %command_str, "Executing external command");

    let start = Instant::now();
    let output = cmd
        .output()
        .with_context(|| format!("Failed to execute command: {}", command_str))?;
    let elapsed = start.elapsed();

    if output.status.success() {
        debug!(
            command = %command_str,
            exit_code = output.status.code(),
            duration_secs = elapsed.as_secs_f64(),
            "Command completed successfully"
        );
    } else {
        error!(
            command = %command_str,
            exit_code = output.status.code(),
            duration_secs = elapsed.as_secs_f64(),
            stderr = %String::from_utf8_lossy(&output.stderr),
            "Command failed"
        );
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_keeps_case() {
        assert_eq!(get_extension(Path::new("/a/b/Clip.Mp4")), "Mp4");
        assert_eq!(get_extension(Path::new("/a/b/archive.tar.gz")), "gz");
        assert_eq!(get_extension(Path::new("/a/b/.hidden")), "");
    }

    #[test]
    fn test_has_extension_is_case_insensitive() {
        let exts = &["avi", "m2ts"];
        assert!(has_extension(Path::new("x.AVI"), exts));
        assert!(has_extension(Path::new("x.M2TS"), exts));
        assert!(!has_extension(Path::new("x.avi.bak"), exts));
        assert!(!has_extension(Path::new("avi"), exts));
    }

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("MPEG-4\n"), "MPEG-4");
        assert_eq!(first_line("AAC\nAC-3\n"), "AAC");
        assert_eq!(first_line("\nAAC\n"), "");
        assert_eq!(first_line("Matroska  \r\n"), "Matroska");
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_command_with_logging_reports_exit_status() {
        let ok = execute_command_with_logging(Command::new("sh").args(["-c", "echo hi"])).unwrap();
        assert!(ok.status.success());
        assert_eq!(first_line(&String::from_utf8_lossy(&ok.stdout)), "hi");

        let failed =
            execute_command_with_logging(Command::new("sh").args(["-c", "exit 3"])).unwrap();
        assert_eq!(failed.status.code(), Some(3));
    }

    #[test]
    fn test_execute_command_with_logging_missing_binary() {
        let result = execute_command_with_logging(&mut Command::new("nonexistent_command_xyz"));
        assert!(result.is_err());
    }
}
