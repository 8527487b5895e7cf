//! # Family Dispatcher
//!
//! Ordered bank of anchored patterns over the basename. The first pattern that
//! matches selects the family parser; there is no backtracking into later
//! families when that parser fails.

use regex::Regex;
use tracing::debug;

use super::families::{
    FamilyParser, FormulaParser, IndyCarParser, IsleOfManParser, MotoParser, SuperbikeParser,
    UfcParser, WomensEuroParser,
};
use super::tokenizer::ReleaseTokens;
use crate::error::{PaddockError, Result};
use crate::types::{ParsedRelease, ReleaseName};

struct Route {
    pattern: Regex,
    parser: Box<dyn FamilyParser>,
}

impl Route {
    fn new(pattern: &str, parser: impl FamilyParser + 'static) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            parser: Box::new(parser),
        })
    }
}

/// Routes basenames to family parsers.
pub struct Dispatcher {
    routes: Vec<Route>,
}

impl Dispatcher {
    /// Builds the bank. Order is part of the contract: literal multi-word
    /// prefixes first, single-word sport prefixes after.
    ///
    /// # Errors
    ///
    /// Returns `PaddockError::RegexError` if any pattern fails to compile.
    pub fn new() -> Result<Self> {
        let routes = vec![
            Route::new(r"(?i)^(?:uefa[. ])?women'?s[. ]euro[. ]", WomensEuroParser::new()?)?,
            Route::new(r"(?i)^isle[. ]of[. ]man[. ]tt[. ]", IsleOfManParser::new()?)?,
            Route::new(r"(?i)^ufc[. ]\d+[. ]", UfcParser::new()?)?,
            Route::new(r"(?i)^indycar[. ]", IndyCarParser::new()?)?,
            Route::new(r"(?i)^(?:wsbk|wssp300|wssp)[. ]", SuperbikeParser::new()?)?,
            Route::new(r"(?i)^moto(?:gp|2|3)[. ]", MotoParser::new()?)?,
            Route::new(
                r"(?i)^(?:formula[. ]?[123]|f[123](?:carreras)?)[. ]",
                FormulaParser::new()?,
            )?,
        ];

        Ok(Self { routes })
    }

    /// Parser names in evaluation order.
    pub fn order(&self) -> Vec<&'static str> {
        self.routes.iter().map(|r| r.parser.name()).collect()
    }

    /// The first parser whose pattern matches `basename`.
    pub fn route(&self, basename: &str) -> Option<&dyn FamilyParser> {
        self.routes
            .iter()
            .find(|r| r.pattern.is_match(basename))
            .map(|r| r.parser.as_ref())
    }

    /// Routes and parses a release.
    ///
    /// # Errors
    ///
    /// `PaddockError::UnknownFamily` when no pattern matches, otherwise
    /// whatever the selected family parser reports.
    pub fn parse(&self, release: &ReleaseName, tokens: &ReleaseTokens) -> Result<ParsedRelease> {
        let parser = self
            .route(&release.basename)
            .ok_or_else(|| PaddockError::UnknownFamily {
                input: release.basename.clone(),
            })?;
        debug!(parser = parser.name(), "dispatching {:?}", release.basename);
        parser.parse(release, tokens)
    }
}
