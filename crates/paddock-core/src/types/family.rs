use std::fmt;

use serde::{Deserialize, Serialize};

/// Every sport/series the classifier knows how to address.
///
/// Each variant has exactly one sport label, which becomes the top-level
/// directory name in the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    Formula1,
    Formula2,
    Formula3,
    MotoGP,
    Moto2,
    Moto3,
    IndyCar,
    /// World Superbike.
    Wsbk,
    /// World Supersport.
    Wssp,
    /// World Supersport 300.
    Wssp300,
    Ufc,
    IsleOfManTT,
    WomensEuro,
}

impl Family {
    /// All families, in declaration order.
    pub const ALL: [Family; 13] = [
        Self::Formula1,
        Self::Formula2,
        Self::Formula3,
        Self::MotoGP,
        Self::Moto2,
        Self::Moto3,
        Self::IndyCar,
        Self::Wsbk,
        Self::Wssp,
        Self::Wssp300,
        Self::Ufc,
        Self::IsleOfManTT,
        Self::WomensEuro,
    ];

    /// Label used for library directories and filenames.
    #[must_use]
    pub fn sport_label(self) -> &'static str {
        match self {
            Self::Formula1 => "Formula 1",
            Self::Formula2 => "Formula 2",
            Self::Formula3 => "Formula 3",
            Self::MotoGP => "MotoGP",
            Self::Moto2 => "Moto2",
            Self::Moto3 => "Moto3",
            Self::IndyCar => "IndyCar",
            Self::Wsbk => "WSBK",
            Self::Wssp => "WSSP",
            Self::Wssp300 => "WSSP300",
            Self::Ufc => "UFC",
            Self::IsleOfManTT => "Isle of Man TT",
            Self::WomensEuro => "UEFA Womens Euro",
        }
    }

    /// Returns `true` for event-numbered families whose season is not a year.
    #[must_use]
    pub fn is_event_numbered(self) -> bool {
        matches!(self, Self::Ufc)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sport_label())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn sport_labels_are_unique() {
        let labels: HashSet<_> = Family::ALL.iter().map(|f| f.sport_label()).collect();
        assert_eq!(labels.len(), Family::ALL.len());
    }

    #[test]
    fn display_uses_sport_label() {
        assert_eq!(Family::Formula1.to_string(), "Formula 1");
        assert_eq!(Family::Wssp300.to_string(), "WSSP300");
        assert_eq!(Family::IsleOfManTT.to_string(), "Isle of Man TT");
    }

    #[test]
    fn only_ufc_is_event_numbered() {
        let numbered: Vec<_> = Family::ALL
            .iter()
            .filter(|f| f.is_event_numbered())
            .collect();
        assert_eq!(numbered, vec![&Family::Ufc]);
    }
}
