//! Formula 1/2/3 releases.
//!
//! Five layouts have been seen in the wild:
//!
//! | layout   | example                                             |
//! |----------|-----------------------------------------------------|
//! | dot      | `Formula1.2024.Round01.Bahrain.Practice.Session.1`  |
//! | space    | `Formula1 2025 Round14 Hungary Qualifying`          |
//! | carreras | `F1Carreras.S2024E05.China.Carrera`                 |
//! | verum    | `formula1.2025.belgian.grand.prix.qualifying`       |
//! | legacy   | `F1.2019.R05.Spain.Race`                            |

use regex::Regex;
use tracing::debug;

use super::{
    join_location, parse_round_tag, parse_year, require, split_at_keyword, FamilyParser,
};
use crate::error::{PaddockError, Result};
use crate::parser::tokenizer::{normalize, Delimiter, ReleaseTokens};
use crate::session::clean_tokens;
use crate::types::{Family, ParsedRelease, ReleaseName, RoundKey};

/// Tokens that start the session part of a Formula filename.
const SESSION_KEYWORDS: &[&str] = &[
    "practice",
    "fp1",
    "fp2",
    "fp3",
    "free",
    "qualifying",
    "quali",
    "q1",
    "q2",
    "q3",
    "sprint",
    "shootout",
    "race",
    "pre",
    "post",
    "drivers",
    "driver",
    "press",
    "weekend",
    "warm",
    "warmup",
    "feature",
    "libres",
    "clasificacion",
    "carrera",
    // `Bahrain.Grand.Prix.Race`: the race name is not part of the location.
    "grand",
];

/// Grand prix adjective -> (round, location), per season.
///
/// Adjectives are renamed to the location names the other layouts use, so
/// `belgian` lands in the same `Belgium` directory as `Round13.Belgium`.
const VERUM_CALENDARS: &[(u32, &[(&str, u32, &str)])] = &[(
    2025,
    &[
        ("australian", 1, "Australia"),
        ("chinese", 2, "China"),
        ("japanese", 3, "Japan"),
        ("bahrain", 4, "Bahrain"),
        ("saudi arabian", 5, "Saudi Arabia"),
        ("miami", 6, "Miami"),
        ("emilia romagna", 7, "Emilia Romagna"),
        ("monaco", 8, "Monaco"),
        ("spanish", 9, "Spain"),
        ("canadian", 10, "Canada"),
        ("austrian", 11, "Austria"),
        ("british", 12, "Great Britain"),
        ("belgian", 13, "Belgium"),
        ("hungarian", 14, "Hungary"),
        ("dutch", 15, "Netherlands"),
        ("italian", 16, "Italy"),
        ("azerbaijan", 17, "Azerbaijan"),
        ("singapore", 18, "Singapore"),
        ("united states", 19, "United States"),
        ("mexico city", 20, "Mexico"),
        ("sao paulo", 21, "Brazil"),
        ("las vegas", 22, "Las Vegas"),
        ("qatar", 23, "Qatar"),
        ("abu dhabi", 24, "Abu Dhabi"),
    ],
)];

/// Which historical layout a Formula filename uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaLayout {
    Dot,
    Space,
    Carreras,
    Verum,
    Legacy,
}

/// Parser for the Formula family.
pub struct FormulaParser {
    re_carreras: Regex,
    re_legacy_round: Regex,
    re_year: Regex,
}

impl FormulaParser {
    /// Constructs a new `FormulaParser` with pre-compiled regex patterns.
    ///
    /// # Errors
    ///
    /// Returns `PaddockError::RegexError` if any pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_carreras: Regex::new(r"(?i)^S(20\d{2})E(\d{1,2})$")?,
            re_legacy_round: Regex::new(r"(?i)^R(\d{1,2})$")?,
            re_year: Regex::new(r"\b(?:19|20)\d{2}\b")?,
        })
    }

    /// Sub-dispatch on token shape. Order matters: the embedded `S20NNE`
    /// marker is checked first, and the `grand prix` pair only selects VERUM
    /// when no round marker follows the year.
    pub fn layout(&self, basename: &str, tokens: &ReleaseTokens) -> FormulaLayout {
        if tokens.tokens.iter().any(|t| self.re_carreras.is_match(t)) {
            return FormulaLayout::Carreras;
        }
        let rest = series(&tokens.tokens).map_or(&tokens.tokens[..], |(_, n)| &tokens.tokens[n..]);
        let round_tag = rest.get(1).and_then(|t| parse_round_tag(t)).is_some();
        let legacy_round = rest.get(1).is_some_and(|t| self.re_legacy_round.is_match(t));

        if !round_tag && !legacy_round && tokens.contains("grand") && tokens.contains("prix") {
            return FormulaLayout::Verum;
        }
        if tokens.delimiter == Delimiter::Space && self.space_before_year(basename) {
            return FormulaLayout::Space;
        }
        if round_tag {
            FormulaLayout::Dot
        } else {
            FormulaLayout::Legacy
        }
    }

    fn space_before_year(&self, basename: &str) -> bool {
        self.re_year
            .find(basename)
            .is_some_and(|m| basename[..m.start()].contains(' '))
    }

    /// `Formula1.2024.Round01.Bahrain.Race` and its space-delimited twin.
    fn parse_positional(
        &self,
        family: Family,
        rest: &[String],
        release: &ReleaseName,
    ) -> Result<ParsedRelease> {
        let season = require(rest.first().and_then(|t| parse_year(t)), release, "missing year")?;
        let round = require(
            rest.get(1).and_then(|t| parse_round_tag(t)),
            release,
            "missing RoundNN marker",
        )?;
        let tail = rest.get(2..).unwrap_or_default();
        build(family, season, round, tail, release)
    }

    /// `F1Carreras.S2024E05.China.Carrera`: the `S{year}E{round}` token
    /// carries both numbers.
    fn parse_carreras(
        &self,
        family: Family,
        tokens: &[String],
        release: &ReleaseName,
    ) -> Result<ParsedRelease> {
        let (index, caps) = require(
            tokens
                .iter()
                .enumerate()
                .find_map(|(i, t)| self.re_carreras.captures(t).map(|c| (i, c))),
            release,
            "missing S{year}E{round} marker",
        )?;
        let season = require(caps[1].parse().ok(), release, "bad year")?;
        let round = require(caps[2].parse().ok(), release, "bad round")?;
        build(family, season, round, &tokens[index + 1..], release)
    }

    /// `formula1.2025.belgian.grand.prix[.session]`.
    fn parse_verum(
        &self,
        family: Family,
        rest: &[String],
        release: &ReleaseName,
    ) -> Result<ParsedRelease> {
        let season = require(rest.first().and_then(|t| parse_year(t)), release, "missing year")?;
        let grand = require(
            rest.iter()
                .position(|t| t.eq_ignore_ascii_case("grand"))
                .filter(|&i| rest.get(i + 1).is_some_and(|t| t.eq_ignore_ascii_case("prix"))),
            release,
            "missing grand prix",
        )?;
        let adjective = rest[1..grand]
            .iter()
            .map(|t| normalize(t))
            .collect::<Vec<_>>()
            .join(" ");
        let (round, location) = require(
            verum_round(season, &adjective),
            release,
            "grand prix not in the season calendar",
        )?;

        let mut session: Vec<String> = rest[grand + 2..].to_vec();
        if clean_tokens(&session).is_empty() {
            // A bare grand prix release is the race itself.
            session = vec!["Race".to_string()];
        }

        Ok(ParsedRelease {
            family,
            season,
            round: RoundKey::Number(round),
            location: Some(location.to_string()),
            raw_session_tokens: session,
            origin_is_directory: release.origin_is_directory(),
        })
    }

    /// `F1.2019.R05.Spain.Race`.
    fn parse_legacy(
        &self,
        family: Family,
        rest: &[String],
        release: &ReleaseName,
    ) -> Result<ParsedRelease> {
        let season = require(rest.first().and_then(|t| parse_year(t)), release, "missing year")?;
        let round = require(
            rest.get(1)
                .and_then(|t| self.re_legacy_round.captures(t))
                .and_then(|c| c[1].parse().ok()),
            release,
            "missing round marker",
        )?;
        let tail = rest.get(2..).unwrap_or_default();
        build(family, season, round, tail, release)
    }
}

impl FamilyParser for FormulaParser {
    fn name(&self) -> &'static str {
        "formula"
    }

    fn parse(&self, release: &ReleaseName, tokens: &ReleaseTokens) -> Result<ParsedRelease> {
        let (family, consumed) = require(series(&tokens.tokens), release, "unknown formula series")?;
        let rest = &tokens.tokens[consumed..];
        let layout = self.layout(&release.basename, tokens);
        debug!(?layout, %family, "formula layout for {:?}", release.basename);

        match layout {
            FormulaLayout::Dot | FormulaLayout::Space => self.parse_positional(family, rest, release),
            FormulaLayout::Carreras => self.parse_carreras(family, rest, release),
            FormulaLayout::Verum => self.parse_verum(family, rest, release),
            FormulaLayout::Legacy => self.parse_legacy(family, rest, release),
        }
    }
}

/// Series prefix and how many tokens it spans (`Formula.1` spans two).
fn series(tokens: &[String]) -> Option<(Family, usize)> {
    let by_digit = |digit: &str| match digit {
        "1" => Some(Family::Formula1),
        "2" => Some(Family::Formula2),
        "3" => Some(Family::Formula3),
        _ => None,
    };

    let first = normalize(tokens.first()?);
    if first == "f1carreras" {
        return Some((Family::Formula1, 1));
    }
    if let Some(digit) = first.strip_prefix("formula") {
        if digit.is_empty() {
            let next = normalize(tokens.get(1)?);
            return by_digit(&next).map(|f| (f, 2));
        }
        return by_digit(digit).map(|f| (f, 1));
    }
    first
        .strip_prefix('f')
        .and_then(by_digit)
        .map(|f| (f, 1))
}

fn verum_round(season: u32, adjective: &str) -> Option<(u32, &'static str)> {
    VERUM_CALENDARS
        .iter()
        .find(|(year, _)| *year == season)
        .and_then(|(_, calendar)| calendar.iter().find(|(adj, _, _)| *adj == adjective))
        .map(|&(_, round, location)| (round, location))
}

fn build(
    family: Family,
    season: u32,
    round: u32,
    tail: &[String],
    release: &ReleaseName,
) -> Result<ParsedRelease> {
    let (location, session) = split_at_keyword(tail, SESSION_KEYWORDS);
    if session.is_empty() {
        return Err(PaddockError::parse_failed(&release.basename, "missing session"));
    }
    Ok(ParsedRelease {
        family,
        season,
        round: RoundKey::Number(round),
        location: join_location(location),
        raw_session_tokens: session.to_vec(),
        origin_is_directory: release.origin_is_directory(),
    })
}
