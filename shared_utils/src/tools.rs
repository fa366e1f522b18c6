//! External tool discovery.
//!
//! Tools are located once, before any file is touched; a missing tool is a
//! fatal `ToolUnavailable`.

use crate::errors::{CastError, Result};
use std::path::PathBuf;

/// A located executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPath {
    /// Name it was found under (e.g. "ffmpeg")
    pub name: String,
    pub path: PathBuf,
}

/// Locate `name` on `PATH`.
pub fn require_tool(name: &str) -> Result<ToolPath> {
    require_any(&[name])
}

/// Locate the first of `candidates` present on `PATH`, in order.
pub fn require_any(candidates: &[&str]) -> Result<ToolPath> {
    for &name in candidates {
        if let Ok(path) = which::which(name) {
            tracing::debug!(tool = name, path = %path.display(), "Tool located");
            return Ok(ToolPath {
                name: name.to_string(),
                path,
            });
        }
    }

    Err(CastError::ToolUnavailable {
        tool: candidates.join(" or "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_is_unavailable() {
        let err = require_tool("definitely_not_a_real_tool_xyz").unwrap_err();
        assert!(matches!(
            err,
            CastError::ToolUnavailable { ref tool } if tool == "definitely_not_a_real_tool_xyz"
        ));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_require_any_names_all_candidates() {
        let err = require_any(&["no_such_tool_a", "no_such_tool_b"]).unwrap_err();
        assert!(err.to_string().contains("no_such_tool_a or no_such_tool_b"));
    }

    #[cfg(unix)]
    #[test]
    fn test_require_any_falls_through_to_present_tool() {
        let found = require_any(&["no_such_tool_a", "sh"]).unwrap();
        assert_eq!(found.name, "sh");
        assert!(found.path.is_absolute());
    }
}
