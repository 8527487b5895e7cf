//! Run configuration, consumed once at startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::error::{PaddockError, Result};

/// Slack added to the poll interval when looking back for modified files.
pub const LOOKBACK_SLACK: Duration = Duration::from_secs(60);

/// Configuration for the run loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    /// Tree scanned for new releases.
    pub source_root: PathBuf,
    /// Library root that destinations are built under.
    pub destination_root: PathBuf,
    /// Sleep between steady-state polls.
    pub poll_interval: Duration,
    /// Whether outcomes and summaries go to the notifier.
    pub notifications: bool,
    /// Classify and report without touching the library.
    pub dry_run: bool,
}

impl WatchConfig {
    /// Configuration with a one minute poll, notifications off, real writes.
    pub fn new(source_root: impl Into<PathBuf>, destination_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            destination_root: destination_root.into(),
            poll_interval: Duration::from_secs(60),
            notifications: false,
            dry_run: false,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notifications = enabled;
        self
    }

    pub fn with_dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Width of the steady-poll modification window: one interval plus a
    /// minute of slack.
    pub fn lookback(&self) -> Duration {
        self.poll_interval + LOOKBACK_SLACK
    }

    /// Checks the roots before any scanning starts.
    ///
    /// # Errors
    ///
    /// Returns `PaddockError::InvalidConfig` if the source root is not a
    /// directory, the destination root is not a writable directory, or the
    /// poll interval is zero.
    pub fn validate(&self) -> Result<()> {
        require_dir(&self.source_root, "source")?;
        require_dir(&self.destination_root, "destination")?;

        tempfile::Builder::new()
            .prefix(".paddock-probe")
            .tempfile_in(&self.destination_root)
            .map_err(|e| {
                PaddockError::InvalidConfig(format!(
                    "destination {} is not writable: {e}",
                    self.destination_root.display()
                ))
            })?;

        if self.poll_interval.is_zero() {
            return Err(PaddockError::InvalidConfig(
                "poll interval must be greater than zero".into(),
            ));
        }

        debug!(config = ?self, "configuration validated");
        Ok(())
    }
}

fn require_dir(path: &Path, role: &str) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(PaddockError::InvalidConfig(format!(
            "{role} {} is not an existing directory",
            path.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn builder_defaults() {
        let config = WatchConfig::new("/downloads", "/library")
            .with_poll_interval(Duration::from_secs(300))
            .with_notifications(true);
        assert_eq!(config.poll_interval, Duration::from_secs(300));
        assert!(config.notifications);
        assert!(!config.dry_run);
        assert_eq!(config.lookback(), Duration::from_secs(360));
    }

    #[test]
    fn validates_existing_roots() {
        let source = TempDir::new().unwrap();
        let destination = TempDir::new().unwrap();
        let config = WatchConfig::new(source.path(), destination.path());
        config.validate().unwrap();
        // The probe file is cleaned up.
        assert_eq!(std::fs::read_dir(destination.path()).unwrap().count(), 0);
    }

    #[test]
    fn rejects_missing_roots_and_zero_interval() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        let err = WatchConfig::new(&missing, dir.path()).validate().unwrap_err();
        assert!(err.to_string().contains("source"));

        let err = WatchConfig::new(dir.path(), &missing).validate().unwrap_err();
        assert!(err.to_string().contains("destination"));

        let err = WatchConfig::new(dir.path(), dir.path())
            .with_poll_interval(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert!(matches!(err, PaddockError::InvalidConfig(_)));
    }
}
