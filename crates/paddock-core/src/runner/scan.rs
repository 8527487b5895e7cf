//! Source tree discovery.
//!
//! Directories are only walked, never classified: each media file inside a
//! release directory is handed to the classifier on its own.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Media container extensions picked up from the source tree.
pub const MEDIA_EXTENSIONS: &[&str] = &["mkv", "mp4"];

/// Returns `true` for files the scanner should hand to the classifier.
pub fn is_media_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    // macOS resource forks share the media extension but hold no video.
    if name.starts_with("._") {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| MEDIA_EXTENSIONS.iter().any(|m| m.eq_ignore_ascii_case(ext)))
}

fn modified_since(entry: &DirEntry, since: SystemTime) -> bool {
    match entry.metadata().map(|m| m.modified()) {
        Ok(Ok(modified)) => modified >= since,
        Ok(Err(e)) => {
            warn!("no modification time for {}: {e}", entry.path().display());
            false
        }
        Err(e) => {
            warn!("cannot stat {}: {e}", entry.path().display());
            false
        }
    }
}

/// Walks `root` and returns media files in path order.
///
/// With `since`, only files modified at or after that instant are returned;
/// this is the bounded lookback of the steady poll. Unreadable entries are
/// logged and skipped.
pub fn discover(root: &Path, since: Option<SystemTime>) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("error walking {}: {e}", root.display());
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_media_file(entry.path()))
        .filter(|entry| since.is_none_or(|since| modified_since(entry, since)))
        .map(DirEntry::into_path)
        .collect();

    files.sort();
    debug!(count = files.len(), "discovered media under {}", root.display());
    files
}
