//! Batch Processing Module
//!
//! Collects regular files below a directory and tallies per-file outcomes.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Every regular file below `dir`, recursively, in traversal order.
///
/// Entries are visited sorted by file name within each directory so repeated
/// runs see the same order. Symlinks are not followed. Unreadable entries are
/// logged and skipped.
pub fn collect_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::warn!(dir = %dir.display(), error = %err, "⚠️ Skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub total: usize,
    /// Already playable, recorded without conversion
    pub compatible: usize,
    pub converted: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: Vec<(PathBuf, String)>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compatible(&mut self) {
        self.total += 1;
        self.compatible += 1;
    }

    pub fn converted(&mut self) {
        self.total += 1;
        self.converted += 1;
    }

    pub fn fail(&mut self, path: PathBuf, error: String) {
        self.total += 1;
        self.failed += 1;
        self.errors.push((path, error));
    }

    pub fn skip(&mut self) {
        self.total += 1;
        self.skipped += 1;
    }

    pub fn success_rate(&self) -> f64 {
        let attempted = self.total - self.skipped;
        if attempted == 0 {
            100.0
        } else {
            ((self.compatible + self.converted) as f64 / attempted as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_files_recurses_in_name_order() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("season1")).unwrap();
        fs::write(root.join("b.mkv"), b"b").unwrap();
        fs::write(root.join("a.avi"), b"a").unwrap();
        fs::write(root.join("season1").join("e01.mp4"), b"e").unwrap();
        fs::write(root.join("notes.txt"), b"n").unwrap();

        let files = collect_files(root);
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            names,
            vec![
                PathBuf::from("a.avi"),
                PathBuf::from("b.mkv"),
                PathBuf::from("notes.txt"),
                PathBuf::from("season1/e01.mp4"),
            ]
        );
    }

    #[test]
    fn test_collect_files_empty_dir() {
        let temp = TempDir::new().unwrap();
        assert!(collect_files(temp.path()).is_empty());
    }

    #[test]
    fn test_batch_result_tally() {
        let mut result = BatchResult::new();
        result.compatible();
        result.converted();
        result.skip();
        result.fail(PathBuf::from("/x.avi"), "boom".to_string());

        assert_eq!(result.total, 4);
        assert_eq!(result.failed, 1);
        assert_eq!(result.errors.len(), 1);
        let rate = result.success_rate();
        assert!((rate - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_success_rate_with_only_skips() {
        let mut result = BatchResult::new();
        result.skip();
        assert_eq!(result.success_rate(), 100.0);
    }
}
