use regex::Regex;

use super::{require, words, FamilyParser};
use crate::error::Result;
use crate::parser::tokenizer::ReleaseTokens;
use crate::session::womens_euro;
use crate::types::{Family, ParsedRelease, ReleaseName, RoundKey};

/// `UEFA.Womens.Euro.2025.2025.07.02.Iceland.vs.Finland.1080p`
///
/// The whole tournament is one round; matches are told apart by episode,
/// which the session resolver derives from the fixture schedule.
pub struct WomensEuroParser {
    re_release: Regex,
}

impl WomensEuroParser {
    /// # Errors
    ///
    /// Returns `PaddockError::RegexError` if the release pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_release: Regex::new(r"(?i)^(?:uefa )?women'?s euro (\d{4}) (.+)$")?,
        })
    }
}

impl FamilyParser for WomensEuroParser {
    fn name(&self) -> &'static str {
        "womens_euro"
    }

    fn parse(&self, release: &ReleaseName, tokens: &ReleaseTokens) -> Result<ParsedRelease> {
        let joined = tokens.joined();
        let caps = require(
            self.re_release.captures(&joined),
            release,
            "expected Womens Euro <year> <match>",
        )?;
        let season = require(caps[1].parse().ok(), release, "bad year")?;

        Ok(ParsedRelease {
            family: Family::WomensEuro,
            season,
            round: RoundKey::Number(1),
            location: womens_euro::host(season).map(str::to_string),
            raw_session_tokens: words(&caps[2]),
            origin_is_directory: release.origin_is_directory(),
        })
    }
}
