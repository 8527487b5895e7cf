//! MotoGP / Moto2 / Moto3.
//!
//! Legacy releases carry the round: `MotoGP.2023.Round01.Portugal.Race`.
//! Newer ones do not: `motogp.2025.qatar.race.1080p`. For those the round is
//! read from the release directory name (`MotoGP 2025 Round04`), and failing
//! that the uppercased location becomes a pseudo-round.

use regex::Regex;
use tracing::debug;

use super::{
    join_location, parse_round_tag, parse_year, require, split_at_keyword, title_case,
    FamilyParser,
};
use crate::error::{PaddockError, Result};
use crate::parser::tokenizer::{normalize, ReleaseTokens};
use crate::types::{Family, ParsedRelease, ReleaseName, RoundKey};

const SESSION_KEYWORDS: &[&str] = &[
    "practice",
    "fp1",
    "fp2",
    "free",
    "qualifying",
    "quali",
    "q1",
    "q2",
    "sprint",
    "warm",
    "warmup",
    "race",
];

pub struct MotoParser {
    re_container_round: Regex,
}

impl MotoParser {
    /// # Errors
    ///
    /// Returns `PaddockError::RegexError` if the container pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_container_round: Regex::new(r"(?i)\bround\s*(\d{1,2})\b")?,
        })
    }

    fn container_round(&self, release: &ReleaseName) -> Option<u32> {
        let container = release.container.as_deref()?;
        self.re_container_round
            .captures(container)
            .and_then(|c| c[1].parse().ok())
    }
}

impl FamilyParser for MotoParser {
    fn name(&self) -> &'static str {
        "moto"
    }

    fn parse(&self, release: &ReleaseName, tokens: &ReleaseTokens) -> Result<ParsedRelease> {
        let family = require(
            tokens.get(0).and_then(|t| class(&normalize(t))),
            release,
            "unknown moto class",
        )?;
        let season = require(tokens.get(1).and_then(parse_year), release, "missing year")?;
        let rest = tokens.tokens.get(2..).unwrap_or_default();

        let (round, location, session) = match rest.first().and_then(|t| parse_round_tag(t)) {
            Some(round) => {
                let (location, session) = split_at_keyword(&rest[1..], SESSION_KEYWORDS);
                (RoundKey::Number(round), join_location(location), session)
            }
            None => {
                let (location, session) = split_at_keyword(rest, SESSION_KEYWORDS);
                let location = require(
                    join_location(location).map(|l| title_case(&l)),
                    release,
                    "missing location",
                )?;
                let round = match self.container_round(release) {
                    Some(n) => RoundKey::Number(n),
                    None => RoundKey::Pseudo(location.to_uppercase()),
                };
                debug!(?round, "moto round recovered for {:?}", release.basename);
                (round, Some(location), session)
            }
        };

        if session.is_empty() {
            return Err(PaddockError::parse_failed(&release.basename, "missing session"));
        }

        Ok(ParsedRelease {
            family,
            season,
            round,
            location,
            raw_session_tokens: session.to_vec(),
            origin_is_directory: release.origin_is_directory(),
        })
    }
}

fn class(prefix: &str) -> Option<Family> {
    match prefix {
        "motogp" => Some(Family::MotoGP),
        "moto2" => Some(Family::Moto2),
        "moto3" => Some(Family::Moto3),
        _ => None,
    }
}
