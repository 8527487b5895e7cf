use regex::Regex;

use super::{require, words, FamilyParser};
use crate::error::Result;
use crate::parser::tokenizer::ReleaseTokens;
use crate::types::{Family, ParsedRelease, ReleaseName, RoundKey};

/// `IndyCar.Series.2024.Round06.Indianapolis.500.Qualifying.Day.1`
pub struct IndyCarParser {
    re_release: Regex,
}

impl IndyCarParser {
    /// # Errors
    ///
    /// Returns `PaddockError::RegexError` if the release pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            // Location is everything between the round and the first session keyword.
            re_release: Regex::new(
                r"(?i)^indycar(?: series)? (\d{4}) round(\d{2}) (.+?) ((?:practice|qualifying|quali|warm ?up|carb day|pre race|post race|race)\b.*)$",
            )?,
        })
    }
}

impl FamilyParser for IndyCarParser {
    fn name(&self) -> &'static str {
        "indycar"
    }

    fn parse(&self, release: &ReleaseName, tokens: &ReleaseTokens) -> Result<ParsedRelease> {
        let joined = tokens.joined();
        let caps = require(
            self.re_release.captures(&joined),
            release,
            "expected IndyCar <year> RoundNN <location> <session>",
        )?;
        let season = require(caps[1].parse().ok(), release, "bad year")?;
        let round = require(caps[2].parse().ok(), release, "bad round")?;

        Ok(ParsedRelease {
            family: Family::IndyCar,
            season,
            round: RoundKey::Number(round),
            location: Some(caps[3].to_string()),
            raw_session_tokens: words(&caps[4]),
            origin_is_directory: release.origin_is_directory(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenizer::Tokenizer;

    fn parse(name: &str) -> Result<ParsedRelease> {
        let release = ReleaseName::from_path(format!("{name}.mkv")).unwrap();
        let tokens = Tokenizer::new().unwrap().tokenize(&release.basename);
        IndyCarParser::new().unwrap().parse(&release, &tokens)
    }

    #[test]
    fn location_stops_at_first_session_keyword() {
        let r = parse("IndyCar.Series.2024.Round06.Indianapolis.500.Qualifying.Day.1.1080p").unwrap();
        assert_eq!(r.season, 2024);
        assert_eq!(r.round, RoundKey::Number(6));
        assert_eq!(r.location.as_deref(), Some("Indianapolis 500"));
        assert_eq!(r.raw_session_tokens, vec!["Qualifying", "Day", "1", "1080p"]);
    }

    #[test]
    fn carb_day_and_pre_race() {
        let r = parse("IndyCar.2024.Round06.Indianapolis.500.Carb.Day").unwrap();
        assert_eq!(r.raw_session_tokens, vec!["Carb", "Day"]);

        let r = parse("IndyCar.2024.Round06.Indianapolis.500.Pre.Race.Show").unwrap();
        assert_eq!(r.location.as_deref(), Some("Indianapolis 500"));
        assert_eq!(r.raw_session_tokens, vec!["Pre", "Race", "Show"]);
    }

    #[test]
    fn regular_round() {
        let r = parse("IndyCar.Series.2024.Round01.St.Petersburg.Race").unwrap();
        assert_eq!(r.round, RoundKey::Number(1));
        assert_eq!(r.location.as_deref(), Some("St Petersburg"));
    }

    #[test]
    fn missing_round_or_session_fails() {
        assert!(parse("IndyCar.Series.2024.St.Petersburg.Race").is_err());
        assert!(parse("IndyCar.Series.2024.Round01.St.Petersburg").is_err());
    }
}
