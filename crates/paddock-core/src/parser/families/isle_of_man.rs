use regex::Regex;

use super::{require, words, FamilyParser};
use crate::error::Result;
use crate::parser::tokenizer::ReleaseTokens;
use crate::types::{Family, ParsedRelease, ReleaseName, RoundKey};

/// The TT is a single-event season, so every release lands in round 1.
const LOCATION: &str = "Isle of Man";

/// `Isle.of.Man.TT.2024.Supersport.Race.1`
pub struct IsleOfManParser {
    re_release: Regex,
}

impl IsleOfManParser {
    /// # Errors
    ///
    /// Returns `PaddockError::RegexError` if the release pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_release: Regex::new(r"(?i)^isle of man tt (\d{4}) (.+)$")?,
        })
    }
}

impl FamilyParser for IsleOfManParser {
    fn name(&self) -> &'static str {
        "isle_of_man_tt"
    }

    fn parse(&self, release: &ReleaseName, tokens: &ReleaseTokens) -> Result<ParsedRelease> {
        let joined = tokens.joined();
        let caps = require(
            self.re_release.captures(&joined),
            release,
            "expected Isle of Man TT <year> <session>",
        )?;
        let season = require(caps[1].parse().ok(), release, "bad year")?;

        Ok(ParsedRelease {
            family: Family::IsleOfManTT,
            season,
            round: RoundKey::Number(1),
            location: Some(LOCATION.to_string()),
            raw_session_tokens: words(&caps[2]),
            origin_is_directory: release.origin_is_directory(),
        })
    }
}
