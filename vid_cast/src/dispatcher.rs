//! File Walker / Dispatcher
//!
//! Turns the raw argument list into work items, preserving argument order:
//! - `--mp4` / `--mkv` set the override for every later path
//! - a regular file is one item
//! - a directory is one item per regular file below it, in traversal order
//! - a nonexistent path is reported as missing
//! - anything else that exists (FIFO, socket, device) is reported as invalid

use crate::classification::ContainerOverride;
use shared_utils::{collect_files, WorkItem};
use std::path::PathBuf;
use tracing::info;

pub type Dispatch = WorkItem<Option<ContainerOverride>>;

pub fn expand_args<S: AsRef<str>>(args: &[S]) -> Vec<Dispatch> {
    let mut active: Option<ContainerOverride> = None;
    let mut items = Vec::new();

    for arg in args {
        let arg = arg.as_ref();

        if let Some(ov) = ContainerOverride::from_flag(arg) {
            info!("📦 Output container forced to {} for following paths", ov);
            active = Some(ov);
            continue;
        }

        let path = PathBuf::from(arg);
        if path.is_dir() {
            let files = collect_files(&path);
            info!("📂 {}: {} files", path.display(), files.len());
            items.extend(files.into_iter().map(|path| WorkItem::File {
                path,
                context: active,
            }));
        } else if path.is_file() {
            items.push(WorkItem::File {
                path,
                context: active,
            });
        } else if path.exists() {
            items.push(WorkItem::Invalid {
                path,
                reason: "not a regular file or directory".to_string(),
            });
        } else {
            items.push(WorkItem::Missing(path));
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn arg(path: &std::path::Path) -> String {
        path.display().to_string()
    }

    #[test]
    fn test_override_applies_to_later_paths_only() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.avi");
        let b = temp.path().join("b.avi");
        let c = temp.path().join("c.avi");
        for f in [&a, &b, &c] {
            fs::write(f, b"x").unwrap();
        }

        let items = expand_args(&[
            arg(&a),
            "--mkv".to_string(),
            arg(&b),
            "--mp4".to_string(),
            arg(&c),
        ]);

        assert_eq!(
            items,
            vec![
                WorkItem::File {
                    path: a,
                    context: None
                },
                WorkItem::File {
                    path: b,
                    context: Some(ContainerOverride::Mkv)
                },
                WorkItem::File {
                    path: c,
                    context: Some(ContainerOverride::Mp4)
                },
            ]
        );
    }

    #[test]
    fn test_directory_expands_recursively_in_place() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("shows");
        fs::create_dir_all(dir.join("s01")).unwrap();
        fs::write(dir.join("s01").join("e01.mkv"), b"x").unwrap();
        fs::write(dir.join("s01").join("e02.mkv"), b"x").unwrap();
        let single = temp.path().join("movie.mp4");
        fs::write(&single, b"x").unwrap();

        let items = expand_args(&["--mp4".to_string(), arg(&dir), arg(&single)]);

        assert_eq!(
            items,
            vec![
                WorkItem::File {
                    path: dir.join("s01").join("e01.mkv"),
                    context: Some(ContainerOverride::Mp4)
                },
                WorkItem::File {
                    path: dir.join("s01").join("e02.mkv"),
                    context: Some(ContainerOverride::Mp4)
                },
                WorkItem::File {
                    path: single,
                    context: Some(ContainerOverride::Mp4)
                },
            ]
        );
    }

    #[test]
    fn test_missing_path_is_reported_not_dropped() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.mkv");

        let items = expand_args(&[arg(&missing)]);

        assert_eq!(items, vec![WorkItem::Missing(missing)]);
    }

    #[cfg(unix)]
    #[test]
    fn test_special_file_is_invalid_not_missing() {
        let temp = TempDir::new().unwrap();
        let socket = temp.path().join("player.sock");
        let _listener = std::os::unix::net::UnixListener::bind(&socket).unwrap();

        let items = expand_args(&[arg(&socket)]);

        assert_eq!(
            items,
            vec![WorkItem::Invalid {
                path: socket,
                reason: "not a regular file or directory".to_string(),
            }]
        );
    }

    #[test]
    fn test_unknown_flag_is_treated_as_path() {
        let items = expand_args(&["--avi"]);
        assert_eq!(items, vec![WorkItem::Missing(PathBuf::from("--avi"))]);
    }

    #[test]
    fn test_flags_only_yields_nothing() {
        assert!(expand_args(&["--mkv", "--mp4"]).is_empty());
    }
}
