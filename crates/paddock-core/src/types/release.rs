use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::family::Family;
use crate::error::{PaddockError, Result};

/// A media file as found on disk. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseName {
    /// Full path of the source file.
    pub path: PathBuf,
    /// File name without the extension.
    pub basename: String,
    /// Lowercased extension without the leading dot (may be empty).
    pub extension: String,
    /// Name of the release directory the file was found in, if it was not
    /// directly under the scanned root.
    pub container: Option<String>,
}

impl ReleaseName {
    /// Builds a release from a path, treating its parent directory (if any)
    /// as the containing release directory.
    ///
    /// # Errors
    ///
    /// Returns `PaddockError::EmptyInput` if the path has no usable file name.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let container = path
            .parent()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned());
        Self::build(path, container)
    }

    /// Builds a release with no containing directory, for names that did not
    /// come from a scan.
    ///
    /// # Errors
    ///
    /// Returns `PaddockError::EmptyInput` if the path has no usable file name.
    pub fn standalone(path: impl AsRef<Path>) -> Result<Self> {
        Self::build(path.as_ref(), None)
    }

    /// Builds a release discovered while walking `root`. Files directly under
    /// the root have no container.
    ///
    /// # Errors
    ///
    /// Returns `PaddockError::EmptyInput` if the path has no usable file name.
    pub fn discovered(path: impl AsRef<Path>, root: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let container = match path.parent() {
            Some(parent) if parent != root.as_ref() => parent
                .file_name()
                .map(|n| n.to_string_lossy().into_owned()),
            _ => None,
        };
        Self::build(path, container)
    }

    fn build(path: &Path, container: Option<String>) -> Result<Self> {
        let basename = path
            .file_stem()
            .map(|s| s.to_string_lossy().trim().to_string())
            .unwrap_or_default();
        if basename.is_empty() {
            return Err(PaddockError::EmptyInput);
        }
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            basename,
            extension,
            container,
        })
    }

    /// File name including the extension.
    #[must_use]
    pub fn file_name(&self) -> String {
        if self.extension.is_empty() {
            self.basename.clone()
        } else {
            format!("{}.{}", self.basename, self.extension)
        }
    }

    /// Returns `true` if the file lives inside a release directory.
    #[must_use]
    pub fn origin_is_directory(&self) -> bool {
        self.container.is_some()
    }
}

/// Round identity inside a season.
///
/// Most families number their rounds. The newer Moto naming scheme can lose the
/// round number entirely, in which case the uppercased location stands in as a
/// pseudo-round so old and new releases still share one address space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundKey {
    Number(u32),
    Pseudo(String),
}

impl RoundKey {
    /// The numeric round, if known.
    #[must_use]
    pub fn number(&self) -> Option<u32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Pseudo(_) => None,
        }
    }

    /// Directory label: `Round07` or the pseudo key verbatim.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Number(n) => format!("Round{n:02}"),
            Self::Pseudo(key) => key.clone(),
        }
    }
}

impl fmt::Display for RoundKey {
    /// Season code used in `S..E..` markers: `07` or the pseudo key.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n:02}"),
            Self::Pseudo(key) => f.write_str(key),
        }
    }
}

/// Output of a family parser: identity recovered from the filename, before
/// session resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRelease {
    /// Which sport/series the release belongs to.
    pub family: Family,

    /// Year for motorsport and tournaments, event number for UFC.
    pub season: u32,

    /// Round inside the season.
    pub round: RoundKey,

    /// Venue, event name or host country; `None` when the layout carries none.
    pub location: Option<String>,

    /// Tokens describing the session, in filename order.
    pub raw_session_tokens: Vec<String>,

    /// Whether the file came from inside a release directory.
    pub origin_is_directory: bool,
}
