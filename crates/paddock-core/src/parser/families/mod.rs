//! Family parsers: one per sport family, each resolving year, round,
//! location and raw session tokens from the layouts that family has used.

pub mod formula;
pub mod indycar;
pub mod isle_of_man;
pub mod moto;
pub mod superbike;
pub mod ufc;
pub mod womens_euro;

pub use formula::FormulaParser;
pub use indycar::IndyCarParser;
pub use isle_of_man::IsleOfManParser;
pub use moto::MotoParser;
pub use superbike::SuperbikeParser;
pub use ufc::UfcParser;
pub use womens_euro::WomensEuroParser;

use crate::error::{PaddockError, Result};
use crate::parser::tokenizer::{normalize, ReleaseTokens};
use crate::types::{ParsedRelease, ReleaseName};

/// Common contract of every family parser.
pub trait FamilyParser: Send + Sync {
    /// Short name used in logs and dispatcher ordering tests.
    fn name(&self) -> &'static str;

    /// Recovers the release identity, or explains which mandatory field is
    /// missing.
    fn parse(&self, release: &ReleaseName, tokens: &ReleaseTokens) -> Result<ParsedRelease>;
}

/// Parses a plausible four digit year.
pub(crate) fn parse_year(token: &str) -> Option<u32> {
    if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok().filter(|y| (1900..=2099).contains(y))
}

/// Parses a `RoundNN` token.
pub(crate) fn parse_round_tag(token: &str) -> Option<u32> {
    let lower = token.to_ascii_lowercase();
    let digits = lower.strip_prefix("round")?;
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Splits tokens at the first one that opens a session description.
pub(crate) fn split_at_keyword<'a>(
    tokens: &'a [String],
    keywords: &[&str],
) -> (&'a [String], &'a [String]) {
    let at = tokens
        .iter()
        .position(|t| keywords.contains(&normalize(t).as_str()))
        .unwrap_or(tokens.len());
    tokens.split_at(at)
}

/// Joins location tokens; `None` when there are none.
pub(crate) fn join_location(tokens: &[String]) -> Option<String> {
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

/// `san marino` -> `San Marino`.
pub(crate) fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Splits a captured span into owned session tokens.
pub(crate) fn words(span: &str) -> Vec<String> {
    span.split_whitespace().map(str::to_string).collect()
}

pub(crate) fn require<T>(value: Option<T>, release: &ReleaseName, reason: &str) -> Result<T> {
    value.ok_or_else(|| PaddockError::parse_failed(&release.basename, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_parsing() {
        assert_eq!(parse_year("2024"), Some(2024));
        assert_eq!(parse_year("1080"), None);
        assert_eq!(parse_year("20245"), None);
        assert_eq!(parse_year("Round01"), None);
    }

    #[test]
    fn round_tag_parsing() {
        assert_eq!(parse_round_tag("Round01"), Some(1));
        assert_eq!(parse_round_tag("ROUND14"), Some(14));
        assert_eq!(parse_round_tag("Round"), None);
        assert_eq!(parse_round_tag("Round123"), None);
        assert_eq!(parse_round_tag("Bahrain"), None);
    }

    #[test]
    fn keyword_split() {
        let tokens: Vec<String> = ["Saudi", "Arabia", "Qualifying", "F1TV"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let (location, session) = split_at_keyword(&tokens, &["qualifying"]);
        assert_eq!(join_location(location).as_deref(), Some("Saudi Arabia"));
        assert_eq!(session, &tokens[2..]);
    }

    #[test]
    fn title_casing() {
        assert_eq!(title_case("san marino"), "San Marino");
        assert_eq!(title_case("QATAR"), "Qatar");
        assert_eq!(title_case(""), "");
    }
}
