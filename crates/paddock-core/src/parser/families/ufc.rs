use regex::Regex;

use super::{require, words, FamilyParser};
use crate::error::Result;
use crate::parser::tokenizer::ReleaseTokens;
use crate::types::{Family, ParsedRelease, ReleaseName, RoundKey};

/// `ufc.309.jones.vs.miocic.ppv.1080p`: numbered event, event name, and one
/// of three card markers. The event number doubles as the season.
pub struct UfcParser {
    re_release: Regex,
}

impl UfcParser {
    /// # Errors
    ///
    /// Returns `PaddockError::RegexError` if the release pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_release: Regex::new(r"(?i)^ufc (\d+) (.+?) (early prelims|prelims|ppv)\b")?,
        })
    }
}

impl FamilyParser for UfcParser {
    fn name(&self) -> &'static str {
        "ufc"
    }

    fn parse(&self, release: &ReleaseName, tokens: &ReleaseTokens) -> Result<ParsedRelease> {
        let joined = tokens.joined();
        let caps = require(
            self.re_release.captures(&joined),
            release,
            "expected ufc <event> <name> early.prelims|prelims|ppv",
        )?;
        let event: u32 = require(caps[1].parse().ok(), release, "bad event number")?;

        Ok(ParsedRelease {
            family: Family::Ufc,
            season: event,
            round: RoundKey::Number(event),
            location: Some(caps[2].to_string()),
            raw_session_tokens: words(&caps[3]),
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
        UfcParser::new().unwrap().parse(&release, &tokens)
    }

    #[test]
    fn main_card() {
        let r = parse("ufc.309.jones.vs.miocic.ppv.1080p").unwrap();
        assert_eq!(r.season, 309);
        assert_eq!(r.location.as_deref(), Some("jones vs miocic"));
        assert_eq!(r.raw_session_tokens, vec!["ppv"]);
    }

    #[test]
    fn early_prelims_win_over_prelims() {
        let r = parse("ufc.309.jones.vs.miocic.early.prelims.720p").unwrap();
        assert_eq!(r.location.as_deref(), Some("jones vs miocic"));
        assert_eq!(r.raw_session_tokens, vec!["early", "prelims"]);

        let r = parse("UFC 310 Pantoja vs Asakura Prelims").unwrap();
        assert_eq!(r.season, 310);
        assert_eq!(r.location.as_deref(), Some("Pantoja vs Asakura"));
        assert_eq!(r.raw_session_tokens, vec!["Prelims"]);
    }

    #[test]
    fn missing_card_marker_fails() {
        assert!(parse("ufc.309.jones.vs.miocic.1080p").is_err());
        assert!(parse("ufc.fight.night.ppv").is_err());
    }
}
