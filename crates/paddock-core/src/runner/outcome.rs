//! Per-file outcomes and the run statistics they accumulate into.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::PaddockError;

/// How a processed file reached the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkMethod {
    Hardlink,
    Copy,
    /// Dry run: the destination was computed but nothing was written.
    DryRun,
}

impl fmt::Display for LinkMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hardlink => "hardlinked",
            Self::Copy => "copied",
            Self::DryRun => "dry run",
        })
    }
}

/// Why a file was skipped. Skips are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    Sample,
    DestinationExists,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sample => "sample",
            Self::DestinationExists => "destination exists",
        })
    }
}

/// Terminal result of handling one source file.
#[derive(Debug)]
pub enum Outcome {
    Processed {
        source: PathBuf,
        destination: PathBuf,
        method: LinkMethod,
    },
    Skipped {
        source: PathBuf,
        reason: SkipReason,
    },
    Failed {
        source: PathBuf,
        error: PaddockError,
    },
}

impl Outcome {
    pub fn source(&self) -> &PathBuf {
        match self {
            Self::Processed { source, .. }
            | Self::Skipped { source, .. }
            | Self::Failed { source, .. } => source,
        }
    }

    /// `(html_message, title)` for the notifier.
    pub fn notification(&self) -> (String, String) {
        let name = self
            .source()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match self {
            Self::Processed {
                destination,
                method,
                ..
            } => (
                format!(
                    "<b>{name}</b> {method} to <i>{}</i>",
                    destination.display()
                ),
                "Processed".to_string(),
            ),
            Self::Skipped { reason, .. } => {
                (format!("<b>{name}</b> skipped: {reason}"), "Skipped".to_string())
            }
            Self::Failed { error, .. } => (format!("<b>{name}</b> failed: {error}"), "Error".to_string()),
        }
    }
}

/// Run counters. Owned by the run loop and reset between summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub processed: u64,
    pub skipped: u64,
    pub errors: u64,
}

impl RunStats {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Processed { .. } => self.processed += 1,
            Outcome::Skipped { .. } => self.skipped += 1,
            Outcome::Failed { .. } => self.errors += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.processed + self.skipped + self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// `(html_message, title)` summary for the notifier.
    pub fn summary(&self, title: &str) -> (String, String) {
        (
            format!(
                "Processed: <b>{}</b><br>Skipped: <b>{}</b><br>Errors: <b>{}</b>",
                self.processed, self.skipped, self.errors
            ),
            title.to_string(),
        )
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed={} skipped={} errors={}",
            self.processed, self.skipped, self.errors
        )
    }
}
