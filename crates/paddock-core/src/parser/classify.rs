//! # Classifier
//!
//! Single entry point from a release on disk to its canonical address:
//! tokenize, dispatch to a family parser, resolve the session.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PaddockError, Result};
use crate::parser::dispatch::Dispatcher;
use crate::parser::tokenizer::Tokenizer;
use crate::session;
use crate::types::{CanonicalAddress, ParsedRelease, ReleaseName};

/// A fully classified release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub parsed: ParsedRelease,
    pub address: CanonicalAddress,
}

/// Tokenizer plus dispatcher, compiled once and reused for every file.
pub struct Classifier {
    tokenizer: Tokenizer,
    dispatcher: Dispatcher,
}

impl Classifier {
    /// # Errors
    ///
    /// Returns `PaddockError::RegexError` if any built-in pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            tokenizer: Tokenizer::new()?,
            dispatcher: Dispatcher::new()?,
        })
    }

    /// Classifies a release found on disk.
    ///
    /// # Errors
    ///
    /// - `PaddockError::UnknownFamily` if no family claims the basename
    /// - `PaddockError::ParseFailed` if the family parser misses a mandatory field
    /// - `PaddockError::UnresolvedSession` if the session tokens map to no slot
    pub fn classify(&self, release: &ReleaseName) -> Result<Classification> {
        let tokens = self.tokenizer.tokenize(&release.basename);
        let parsed = self.dispatcher.parse(release, &tokens)?;
        let session = session::resolve(&parsed);

        if !session.is_resolved() {
            return Err(PaddockError::UnresolvedSession {
                input: release.basename.clone(),
                tokens: parsed.raw_session_tokens,
            });
        }

        let address = CanonicalAddress::new(&parsed, session);
        debug!(%address, "classified {:?}", release.basename);
        Ok(Classification { parsed, address })
    }

    /// Classifies a bare file name or path string. Parent directories are
    /// not treated as a release container; use [`ReleaseName::discovered`]
    /// with [`Classifier::classify`] for files found under a scan root.
    ///
    /// # Errors
    ///
    /// `PaddockError::EmptyInput` for an empty name, otherwise as [`Classifier::classify`].
    pub fn classify_name(&self, name: &str) -> Result<Classification> {
        self.classify(&ReleaseName::standalone(name.trim())?)
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
