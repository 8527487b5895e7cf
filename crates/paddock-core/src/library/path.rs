//! # Path Builder
//!
//! Pure mapping from a canonical address to its place in the library. No I/O:
//! the same address and extension always give the same relative path, which is
//! what makes skip-if-exists a correct idempotence check.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::CanonicalAddress;

/// Library-relative destination of a release.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DestinationPath {
    /// Directory relative to the destination root.
    pub directory: PathBuf,
    pub filename: String,
}

impl DestinationPath {
    /// Builds the destination for `address`.
    ///
    /// Motorsport and tournaments:
    /// `Formula 1 2024/Round01 Bahrain/Formula 1 2024 - S01E03 - Free Practice.mkv`
    ///
    /// Numbered events:
    /// `UFC/Season 309/UFC - S309E03 - Main Card.mkv`
    pub fn for_address(address: &CanonicalAddress, extension: &str) -> Self {
        let sport = &address.sport_label;
        let session = &address.session;
        let extension = extension.trim_start_matches('.').to_lowercase();

        let (directory, stem) = if address.family.is_event_numbered() {
            let directory = PathBuf::from(sanitize_component(sport))
                .join(sanitize_component(&format!("Season {}", address.season)));
            let stem = format!(
                "{sport} - S{}E{:02} - {}",
                address.season, session.episode, session.title
            );
            (directory, stem)
        } else {
            let round_dir = match &address.location {
                Some(location) => format!("{} {location}", address.round.label()),
                None => address.round.label(),
            };
            let directory = PathBuf::from(sanitize_component(&format!("{sport} {}", address.season)))
                .join(sanitize_component(&round_dir));
            let stem = format!(
                "{sport} {} - S{}E{:02} - {}",
                address.season, address.round, session.episode, session.title
            );
            (directory, stem)
        };

        let filename = if extension.is_empty() {
            sanitize_component(&stem)
        } else {
            sanitize_component(&format!("{stem}.{extension}"))
        };

        Self { directory, filename }
    }

    /// Relative path: directory plus file name.
    pub fn relative(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }

    /// Absolute path under the destination root.
    pub fn under(&self, root: impl AsRef<Path>) -> PathBuf {
        root.as_ref().join(self.relative())
    }
}

fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ' | '(' | ')' | '[' | ']')
}

/// Makes a single path component safe: unsafe characters (path separators
/// included) become `_`, runs of `_` collapse, and an empty or dot-only
/// result becomes `untitled`.
pub fn sanitize_component(component: &str) -> String {
    let mut cleaned = String::with_capacity(component.len());
    for c in component.trim().chars() {
        let c = if is_safe(c) { c } else { '_' };
        if c == '_' && cleaned.ends_with('_') {
            continue;
        }
        cleaned.push(c);
    }

    let cleaned = cleaned.trim_matches('_');
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        "untitled".to_string()
    } else {
        cleaned.to_string()
    }
}
