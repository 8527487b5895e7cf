use std::fmt;

use serde::{Deserialize, Serialize};

use super::family::Family;
use super::release::{ParsedRelease, RoundKey};

/// A canonical session slot: display title plus episode number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Session {
    pub title: String,
    pub episode: u32,
}

impl Session {
    pub const UNKNOWN_TITLE: &'static str = "Unknown";

    #[must_use]
    pub fn new(title: impl Into<String>, episode: u32) -> Self {
        Self {
            title: title.into(),
            episode,
        }
    }

    /// The `("Unknown", 0)` sentinel for tokens no rule recognised.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(Self::UNKNOWN_TITLE, 0)
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.episode > 0
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:02} {}", self.episode, self.title)
    }
}

/// Stable library identity of a release.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalAddress {
    pub family: Family,
    pub sport_label: String,
    /// Year, or event number for UFC.
    pub season: u32,
    pub round: RoundKey,
    pub location: Option<String>,
    pub session: Session,
}

impl CanonicalAddress {
    /// Combines a parsed release with its resolved session.
    #[must_use]
    pub fn new(parsed: &ParsedRelease, session: Session) -> Self {
        Self {
            family: parsed.family,
            sport_label: parsed.family.sport_label().to_string(),
            season: parsed.season,
            round: parsed.round.clone(),
            location: parsed.location.clone(),
            session,
        }
    }
}

impl fmt::Display for CanonicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} S{}E{:02} {}",
            self.sport_label, self.season, self.round, self.session.episode, self.session.title
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_session_is_unresolved() {
        let unknown = Session::unknown();
        assert_eq!(unknown.title, "Unknown");
        assert_eq!(unknown.episode, 0);
        assert!(!unknown.is_resolved());
        assert!(Session::new("Race", 10).is_resolved());
    }

    #[test]
    fn address_display() {
        let parsed = ParsedRelease {
            family: Family::Formula1,
            season: 2024,
            round: RoundKey::Number(1),
            location: Some("Bahrain".into()),
            raw_session_tokens: vec!["Race".into()],
            origin_is_directory: false,
        };
        let address = CanonicalAddress::new(&parsed, Session::new("Race", 10));
        assert_eq!(address.sport_label, "Formula 1");
        assert_eq!(address.to_string(), "Formula 1 2024 S01E10 Race");
    }

    #[test]
    fn address_serialization_roundtrip() {
        let parsed = ParsedRelease {
            family: Family::MotoGP,
            season: 2025,
            round: RoundKey::Pseudo("QATAR".into()),
            location: Some("Qatar".into()),
            raw_session_tokens: vec!["sprint".into()],
            origin_is_directory: true,
        };
        let address = CanonicalAddress::new(&parsed, Session::new("Sprint", 5));

        let json = serde_json::to_string(&address).unwrap();
        let back: CanonicalAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(address, back);
    }
}
