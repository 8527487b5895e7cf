//! # Token Extractor
//!
//! Splits release basenames into ordered tokens. Dot-delimited names are the
//! default; a leading `<Sport><digits><space>` word switches to space
//! splitting.

use regex::Regex;
use tracing::debug;

use crate::error::Result;

/// Which character separates the tokens of a basename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Dot,
    Space,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Self::Dot => '.',
            Self::Space => ' ',
        }
    }
}

/// Tokens of one basename, original casing preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTokens {
    pub delimiter: Delimiter,
    pub tokens: Vec<String>,
}

impl ReleaseTokens {
    /// Token at `index`, if present. Parsers index through this instead of
    /// slicing so malformed names degrade into parse failures.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens joined with single spaces, whatever the original delimiter.
    pub fn joined(&self) -> String {
        self.tokens.join(" ")
    }

    /// Returns `true` if any token equals `needle`, ignoring ASCII case.
    pub fn contains(&self, needle: &str) -> bool {
        self.tokens.iter().any(|t| t.eq_ignore_ascii_case(needle))
    }
}

/// Tokenizer for release basenames.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    re_space_layout: Regex,
}

impl Tokenizer {
    /// Create a new tokenizer instance.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_space_layout: Regex::new(r"^[A-Za-z]+\d* ")?,
        })
    }

    /// Picks the delimiter for a basename.
    pub fn delimiter(&self, basename: &str) -> Delimiter {
        if self.re_space_layout.is_match(basename) {
            Delimiter::Space
        } else {
            Delimiter::Dot
        }
    }

    /// Tokenize a basename (no extension) into ordered tokens.
    ///
    /// Never fails: empty segments are dropped and whatever remains is
    /// returned, possibly empty.
    ///
    /// # Examples
    /// ```
    /// use paddock_core::parser::tokenizer::{Delimiter, Tokenizer};
    ///
    /// let tokenizer = Tokenizer::new().unwrap();
    /// let tokens = tokenizer.tokenize("Formula1 2025 Round14 Hungary Qualifying");
    /// assert_eq!(tokens.delimiter, Delimiter::Space);
    /// assert_eq!(tokens.get(2), Some("Round14"));
    /// ```
    pub fn tokenize(&self, basename: &str) -> ReleaseTokens {
        let delimiter = self.delimiter(basename);
        let tokens: Vec<String> = basename
            .split(delimiter.as_char())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        debug!(?delimiter, count = tokens.len(), "tokenized {basename:?}");
        ReleaseTokens { delimiter, tokens }
    }
}

/// Returns `true` for sample clips, which are skipped before parsing.
pub fn is_sample(file_name: &str) -> bool {
    file_name.to_lowercase().contains("sample")
}

/// Lowercases a token and strips everything that is not alphanumeric.
pub fn normalize(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer() -> Tokenizer {
        Tokenizer::new().unwrap()
    }

    #[test]
    fn dot_layout() {
        let tokens = tokenizer().tokenize("Formula1.2024.Round01.Bahrain.Practice.Session.1");
        assert_eq!(tokens.delimiter, Delimiter::Dot);
        assert_eq!(
            tokens.tokens,
            vec!["Formula1", "2024", "Round01", "Bahrain", "Practice", "Session", "1"]
        );
    }

    #[test]
    fn space_layout_probe() {
        let t = tokenizer();
        assert_eq!(t.delimiter("Formula1 2025 Round14 Hungary Qualifying"), Delimiter::Space);
        assert_eq!(t.delimiter("MotoGP 2025 Round04 Qatar Race"), Delimiter::Space);
        assert_eq!(t.delimiter("Formula1.2024.Round01.Bahrain.Race"), Delimiter::Dot);
        // A space later in the name does not switch layouts.
        assert_eq!(t.delimiter("Formula1.2024.Round01.Bahrain.Race (1)"), Delimiter::Dot);
    }

    #[test]
    fn empty_segments_are_dropped() {
        let tokens = tokenizer().tokenize("ufc..309...ppv.");
        assert_eq!(tokens.tokens, vec!["ufc", "309", "ppv"]);
    }

    #[test]
    fn malformed_input_yields_best_effort_tokens() {
        let t = tokenizer();
        assert!(t.tokenize("").is_empty());
        assert!(t.tokenize("....").is_empty());
        assert_eq!(t.tokenize("Formula1").len(), 1);
        assert_eq!(t.tokenize("Formula1").get(3), None);
    }

    #[test]
    fn sample_detection() {
        assert!(is_sample("Formula1.2024.Round01.Bahrain.Race.SAMPLE.mkv"));
        assert!(is_sample("sample-ufc.309.mkv"));
        assert!(!is_sample("Formula1.2024.Round01.Bahrain.Race.mkv"));
    }

    #[test]
    fn normalize_strips_punctuation() {
        assert_eq!(normalize("Pre-Race"), "prerace");
        assert_eq!(normalize("FP1"), "fp1");
        assert_eq!(normalize("(1)"), "1");
    }

    #[test]
    fn joined_and_contains() {
        let tokens = tokenizer().tokenize("Formula1.2024.Round05.China.Sprint");
        assert_eq!(tokens.joined(), "Formula1 2024 Round05 China Sprint");
        assert!(tokens.contains("sprint"));
        assert!(!tokens.contains("race"));
    }
}
