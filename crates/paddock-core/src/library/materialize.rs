//! # Materializer
//!
//! Places a source file at its library destination exactly once: an existing
//! destination is left alone, otherwise a hardlink is tried and a byte copy
//! is the fallback. The source is never moved, modified or deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PaddockError, Result};

/// What the materializer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Materialized {
    Linked,
    Copied,
    /// The destination was already present and was not touched.
    AlreadyExists,
}

/// Materializes `source` at `destination`.
///
/// # Errors
///
/// Returns `PaddockError::Materialize` if the destination directory cannot be
/// created or both the hardlink and the copy fail.
pub fn materialize(source: &Path, destination: &Path) -> Result<Materialized> {
    materialize_with(|s, d| fs::hard_link(s, d), source, destination)
}

/// [`materialize`] with the link step supplied by the caller.
pub(crate) fn materialize_with(
    link: impl Fn(&Path, &Path) -> io::Result<()>,
    source: &Path,
    destination: &Path,
) -> Result<Materialized> {
    if fs::symlink_metadata(destination).is_ok() {
        debug!("destination exists: {}", destination.display());
        return Ok(Materialized::AlreadyExists);
    }

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|source| PaddockError::Materialize {
            destination: destination.to_path_buf(),
            source,
        })?;
    }

    match link(source, destination) {
        Ok(()) => {
            debug!("linked {} -> {}", source.display(), destination.display());
            return Ok(Materialized::Linked);
        }
        // Lost a race with another writer; same outcome as the check above.
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(Materialized::AlreadyExists),
        Err(e) => debug!("hardlink failed ({e}), falling back to copy"),
    }

    match copy_new(source, destination) {
        Ok(()) => {
            debug!("copied {} -> {}", source.display(), destination.display());
            Ok(Materialized::Copied)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(Materialized::AlreadyExists),
        Err(source) => Err(PaddockError::Materialize {
            destination: destination.to_path_buf(),
            source,
        }),
    }
}

/// Copies into a destination that must not exist yet. A partially written
/// destination is removed so a later run does not skip a truncated file.
pub(crate) fn copy_new(source: &Path, destination: &Path) -> io::Result<()> {
    let mut reader = File::open(source)?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(destination)?;

    let copied = io::copy(&mut reader, &mut writer).and_then(|_| writer.sync_all());
    if let Err(e) = copied {
        drop(writer);
        let _ = fs::remove_file(destination);
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source").join("Formula1.2024.Round01.Bahrain.Race.mkv");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, b"race footage").unwrap();
        (dir, source)
    }

    #[test]
    fn links_then_skips() {
        let (dir, source) = setup();
        let destination = dir
            .path()
            .join("library/Formula 1 2024/Round01 Bahrain/Formula 1 2024 - S01E10 - Race.mkv");

        assert_eq!(materialize(&source, &destination).unwrap(), Materialized::Linked);
        assert_eq!(fs::read(&destination).unwrap(), b"race footage");
        assert!(source.exists());

        assert_eq!(
            materialize(&source, &destination).unwrap(),
            Materialized::AlreadyExists
        );
    }

    #[test]
    fn existing_destination_is_never_overwritten() {
        let (dir, source) = setup();
        let destination = dir.path().join("library/existing.mkv");
        fs::create_dir_all(destination.parent().unwrap()).unwrap();
        fs::write(&destination, b"older copy").unwrap();

        assert_eq!(
            materialize(&source, &destination).unwrap(),
            Materialized::AlreadyExists
        );
        assert_eq!(fs::read(&destination).unwrap(), b"older copy");
    }

    #[test]
    fn copy_fallback_writes_new_file() {
        let (dir, source) = setup();
        let destination = dir.path().join("copy.mkv");
        copy_new(&source, &destination).unwrap();
        assert_eq!(fs::read(&destination).unwrap(), b"race footage");

        let err = copy_new(&source, &destination).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }

    #[test]
    fn failed_link_falls_back_to_copy() {
        let (dir, source) = setup();
        let destination = dir.path().join("library/Formula 1 2024/Round01 Bahrain/race.mkv");
        let cross_device = |_: &Path, _: &Path| -> io::Result<()> {
            Err(io::Error::new(ErrorKind::Unsupported, "cross-device link"))
        };

        assert_eq!(
            materialize_with(cross_device, &source, &destination).unwrap(),
            Materialized::Copied
        );
        assert_eq!(fs::read(&destination).unwrap(), b"race footage");
        assert_eq!(fs::read(&source).unwrap(), b"race footage");

        // A second pass still never overwrites.
        assert_eq!(
            materialize_with(cross_device, &source, &destination).unwrap(),
            Materialized::AlreadyExists
        );
    }

    #[test]
    fn missing_source_fails_without_leaving_a_destination() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("gone.mkv");
        let destination = dir.path().join("library/gone.mkv");

        let err = materialize(&source, &destination).unwrap_err();
        assert!(matches!(err, PaddockError::Materialize { .. }));
        assert!(!destination.exists());
    }
}
