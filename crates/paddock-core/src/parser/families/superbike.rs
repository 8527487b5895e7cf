use regex::Regex;

use super::{require, words, FamilyParser};
use crate::error::Result;
use crate::parser::tokenizer::ReleaseTokens;
use crate::types::{Family, ParsedRelease, ReleaseName, RoundKey};

/// World Superbike family: WSBK, WSSP and WSSP300 share one layout,
/// `WSBK.2024.Round01.Australia.Race.1`, with the championship in the prefix.
pub struct SuperbikeParser {
    re_release: Regex,
}

impl SuperbikeParser {
    /// # Errors
    ///
    /// Returns `PaddockError::RegexError` if the release pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_release: Regex::new(
                r"(?i)^(wssp300|wssp|wsbk) (\d{4}) round(\d{2}) (.+?) ((?:free practice|fp\d|practice|superpole|race|warm ?up|highlights)\b.*)$",
            )?,
        })
    }
}

impl FamilyParser for SuperbikeParser {
    fn name(&self) -> &'static str {
        "superbike"
    }

    fn parse(&self, release: &ReleaseName, tokens: &ReleaseTokens) -> Result<ParsedRelease> {
        let joined = tokens.joined();
        let caps = require(
            self.re_release.captures(&joined),
            release,
            "expected <championship> <year> RoundNN <location> <session>",
        )?;
        let family = match caps[1].to_ascii_lowercase().as_str() {
            "wssp300" => Family::Wssp300,
            "wssp" => Family::Wssp,
            _ => Family::Wsbk,
        };
        let season = require(caps[2].parse().ok(), release, "bad year")?;
        let round = require(caps[3].parse().ok(), release, "bad round")?;

        Ok(ParsedRelease {
            family,
            season,
            round: RoundKey::Number(round),
            location: Some(caps[4].to_string()),
            raw_session_tokens: words(&caps[5]),
            origin_is_directory: release.origin_is_directory(),
        })
    }
}
