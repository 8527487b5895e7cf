//! Session rule tables, one per family, most specific rule first.
//!
//! A rule matches when any of its patterns occurs as a contiguous run of
//! cleaned tokens. Tables are scanned top to bottom and the first hit wins,
//! so `sprint qualifying` has to sit above `sprint`, and `superpole race`
//! above `superpole`.
//!
//! The pattern word `#` stands for any number. Numbered variants of a session
//! a table has only one slot for are caught by an [`Slot::Unmapped`] guard so
//! they cannot share the slot of the unnumbered session.

use crate::types::Family;

/// Pattern word matching any all-digit token.
pub const ANY_NUMBER: &str = "#";

/// Gap a sprint weekend opens in the Formula 1 running order.
pub const SPRINT_OFFSET: u32 = 2;

/// How a rule's episode number depends on the weekend format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Same number on every weekend.
    Fixed(u32),
    /// Exists only on regular weekends.
    RegularOnly(u32),
    /// Exists only on sprint weekends.
    SprintOnly(u32),
    /// Regular-weekend number, moved by [`SPRINT_OFFSET`] on sprint weekends.
    Shifted(u32),
    /// Recognised, but has no slot in this table. Stops a later, more
    /// general rule from claiming the tokens.
    Unmapped,
}

impl Slot {
    /// Episode number for the given weekend format; `None` when the session
    /// does not exist on that format.
    pub fn episode(self, sprint_weekend: bool) -> Option<u32> {
        match (self, sprint_weekend) {
            (Self::Fixed(n), _) => Some(n),
            (Self::RegularOnly(n), false) | (Self::SprintOnly(n), true) => Some(n),
            (Self::RegularOnly(_), true) | (Self::SprintOnly(_), false) => None,
            (Self::Shifted(n), false) => Some(n),
            (Self::Shifted(n), true) => Some(n + SPRINT_OFFSET),
            (Self::Unmapped, _) => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub patterns: &'static [&'static [&'static str]],
    pub title: &'static str,
    pub slot: Slot,
}

impl Rule {
    const fn new(
        patterns: &'static [&'static [&'static str]],
        title: &'static str,
        slot: Slot,
    ) -> Self {
        Self {
            patterns,
            title,
            slot,
        }
    }

    const fn fixed(patterns: &'static [&'static [&'static str]], title: &'static str, n: u32) -> Self {
        Self::new(patterns, title, Slot::Fixed(n))
    }

    /// Returns `true` if any pattern occurs contiguously in `tokens`.
    pub fn matches(&self, tokens: &[String]) -> bool {
        self.patterns.iter().any(|pattern| {
            !pattern.is_empty()
                && tokens
                    .windows(pattern.len())
                    .any(|w| w.iter().zip(pattern.iter()).all(|(t, p)| word_matches(t, p)))
        })
    }
}

fn word_matches(token: &str, pattern: &str) -> bool {
    if pattern == ANY_NUMBER {
        !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
    } else {
        token == pattern
    }
}

/// Guard for `<session> <n>` when the table has no slot for that number.
const fn numbered(patterns: &'static [&'static [&'static str]]) -> Rule {
    Rule::new(patterns, "Numbered Session", Slot::Unmapped)
}

use Slot::{RegularOnly, Shifted, SprintOnly, Unmapped};

pub static FORMULA1: &[Rule] = &[
    Rule::fixed(&[&["press", "conference"], &["drivers", "press"]], "Drivers Press Conference", 1),
    Rule::fixed(&[&["warm", "up"]], "Weekend Warm Up", 2),
    Rule::new(
        &[
            &["sprint", "qualifying"],
            &["sprint", "shootout"],
            &["shootout"],
            &["clasificacion", "sprint"],
        ],
        "Sprint Qualifying",
        SprintOnly(4),
    ),
    Rule::new(&[&["pre", "sprint"], &["sprint", "pre"]], "Pre Sprint Show", SprintOnly(5)),
    Rule::new(&[&["post", "sprint"], &["sprint", "post"]], "Post Sprint Show", SprintOnly(7)),
    Rule::new(&[&["pre", "qualifying"], &["qualifying", "pre"]], "Pre Qualifying Show", Shifted(6)),
    Rule::new(&[&["post", "qualifying"], &["qualifying", "post"]], "Post Qualifying Show", Shifted(8)),
    Rule::new(&[&["sprint"]], "Sprint", SprintOnly(6)),
    Rule::new(&[&["pre", "race"], &["race", "pre"]], "Pre Race Show", Shifted(9)),
    Rule::new(&[&["post", "race"], &["race", "post"]], "Post Race Show", Shifted(11)),
    // All three practices share a title; the episode tells them apart.
    Rule::fixed(&[&["practice", "1"], &["libres", "1"]], "Free Practice", 3),
    Rule::new(&[&["practice", "2"], &["libres", "2"]], "Free Practice", RegularOnly(4)),
    Rule::new(&[&["practice", "3"], &["libres", "3"]], "Free Practice", RegularOnly(5)),
    numbered(&[&["practice", "#"], &["libres", "#"]]),
    Rule::fixed(&[&["practice"], &["libres"]], "Free Practice", 3),
    numbered(&[&["qualifying", "#"], &["clasificacion", "#"]]),
    Rule::new(&[&["qualifying"], &["clasificacion"]], "Qualifying", Shifted(7)),
    Rule::new(&[&["race"], &["carrera"], &["grand", "prix"]], "Race", Shifted(10)),
];

/// Formula 2 and Formula 3 share one running order.
pub static FEEDER_SERIES: &[Rule] = &[
    Rule::fixed(&[&["sprint"]], "Sprint Race", 3),
    Rule::fixed(&[&["feature"]], "Feature Race", 4),
    Rule::fixed(&[&["practice"]], "Practice", 1),
    Rule::fixed(&[&["qualifying"]], "Qualifying", 2),
];

pub static MOTOGP: &[Rule] = &[
    Rule::fixed(&[&["practice", "1"]], "Free Practice 1", 1),
    Rule::fixed(&[&["practice", "2"]], "Free Practice 2", 3),
    numbered(&[&["practice", "#"], &["qualifying", "#"]]),
    Rule::fixed(&[&["practice"]], "Practice", 2),
    Rule::fixed(&[&["qualifying"]], "Qualifying", 4),
    Rule::fixed(&[&["sprint"]], "Sprint", 5),
    Rule::fixed(&[&["warm", "up"]], "Warm Up", 6),
    Rule::fixed(&[&["race"]], "Race", 7),
];

/// Moto2 and Moto3.
pub static MOTO_LIGHTWEIGHT: &[Rule] = &[
    Rule::fixed(&[&["practice", "1"]], "Free Practice 1", 1),
    numbered(&[&["practice", "#"], &["qualifying", "#"]]),
    Rule::fixed(&[&["practice"]], "Practice", 2),
    Rule::fixed(&[&["qualifying"]], "Qualifying", 3),
    Rule::fixed(&[&["race"]], "Race", 4),
];

pub static INDYCAR: &[Rule] = &[
    Rule::new(&[&["pre", "race"], &["post", "race"]], "Race Show", Unmapped),
    Rule::fixed(&[&["practice", "1"]], "Practice", 1),
    numbered(&[&["practice", "#"], &["qualifying", "#"]]),
    Rule::fixed(&[&["practice"]], "Practice", 1),
    Rule::fixed(&[&["qualifying"]], "Qualifying", 2),
    Rule::fixed(&[&["warm", "up"]], "Warm Up", 3),
    Rule::fixed(&[&["race"]], "Race", 4),
];

/// Indianapolis 500 weekend.
static INDYCAR_INDY500: &[Rule] = &[
    Rule::fixed(&[&["carb", "day"]], "Carb Day", 7),
    Rule::fixed(
        &[&["qualifying", "day", "2"], &["qualifying", "2"]],
        "Qualifying Day 2",
        5,
    ),
    Rule::fixed(&[&["qualifying"]], "Qualifying Day 1", 4),
    Rule::fixed(&[&["practice", "4"]], "Practice 4", 6),
    Rule::fixed(&[&["practice", "3"]], "Practice 3", 3),
    Rule::fixed(&[&["practice", "2"]], "Practice 2", 2),
    Rule::fixed(&[&["practice", "1"]], "Practice 1", 1),
    numbered(&[&["practice", "#"]]),
    Rule::fixed(&[&["practice"]], "Practice 1", 1),
    Rule::fixed(&[&["pre", "race"]], "Pre Race Show", 8),
    Rule::fixed(&[&["post", "race"]], "Post Race Show", 10),
    Rule::fixed(&[&["race"]], "Race", 9),
];

/// Irregular IndyCar rounds, keyed by round number.
pub static INDYCAR_OVERRIDES: &[(u32, &[Rule])] = &[(6, INDYCAR_INDY500)];

pub static WSBK: &[Rule] = &[
    Rule::fixed(&[&["superpole", "race"]], "Superpole Race", 7),
    Rule::fixed(&[&["superpole"]], "Superpole", 4),
    Rule::fixed(&[&["practice", "1"]], "Free Practice 1", 1),
    Rule::fixed(&[&["practice", "2"]], "Free Practice 2", 2),
    Rule::fixed(&[&["practice", "3"]], "Free Practice 3", 3),
    Rule::fixed(&[&["race", "1"]], "Race 1", 5),
    Rule::fixed(&[&["warm", "up"]], "Warm Up", 6),
    Rule::fixed(&[&["race", "2"]], "Race 2", 8),
    Rule::fixed(&[&["highlights"]], "Highlights", 9),
];

/// WSSP and WSSP300.
pub static SUPERSPORT: &[Rule] = &[
    Rule::fixed(&[&["superpole"]], "Superpole", 3),
    Rule::fixed(&[&["practice", "1"]], "Free Practice 1", 1),
    Rule::fixed(&[&["practice", "2"]], "Free Practice 2", 2),
    Rule::fixed(&[&["race", "1"]], "Race 1", 4),
    Rule::fixed(&[&["warm", "up"]], "Warm Up", 5),
    Rule::fixed(&[&["race", "2"]], "Race 2", 6),
];

pub static UFC: &[Rule] = &[
    Rule::fixed(&[&["early", "prelims"]], "Early Prelims", 1),
    Rule::fixed(&[&["prelims"]], "Prelims", 2),
    Rule::fixed(&[&["ppv"], &["main", "card"]], "Main Card", 3),
];

pub static ISLE_OF_MAN_TT: &[Rule] = &[
    numbered(&[&["qualifying", "#"]]),
    Rule::fixed(&[&["qualifying"]], "Qualifying", 1),
    Rule::fixed(&[&["sidecar", "race", "1"]], "Sidecar Race 1", 3),
    Rule::fixed(&[&["sidecar", "race", "2"]], "Sidecar Race 2", 7),
    Rule::fixed(&[&["supersport", "race", "1"]], "Supersport Race 1", 4),
    Rule::fixed(&[&["supersport", "race", "2"]], "Supersport Race 2", 8),
    Rule::fixed(&[&["superstock", "race", "1"]], "Superstock Race 1", 5),
    Rule::fixed(&[&["superstock", "race", "2"]], "Superstock Race 2", 9),
    Rule::fixed(&[&["superbike"]], "Superbike Race", 2),
    Rule::fixed(&[&["supertwin"]], "Supertwin Race", 6),
    Rule::fixed(&[&["senior"]], "Senior TT", 10),
];

/// Rule table for a family and round. Women's Euro is schedule-driven and
/// has no table.
pub fn table(family: Family, round: Option<u32>) -> Option<&'static [Rule]> {
    let table = match family {
        Family::Formula1 => FORMULA1,
        Family::Formula2 | Family::Formula3 => FEEDER_SERIES,
        Family::MotoGP => MOTOGP,
        Family::Moto2 | Family::Moto3 => MOTO_LIGHTWEIGHT,
        Family::IndyCar => round
            .and_then(|r| {
                INDYCAR_OVERRIDES
                    .iter()
                    .find(|(n, _)| *n == r)
                    .map(|(_, rules)| *rules)
            })
            .unwrap_or(INDYCAR),
        Family::Wsbk => WSBK,
        Family::Wssp | Family::Wssp300 => SUPERSPORT,
        Family::Ufc => UFC,
        Family::IsleOfManTT => ISLE_OF_MAN_TT,
        Family::WomensEuro => return None,
    };
    Some(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn slot_episode_by_weekend_format() {
        assert_eq!(Slot::Fixed(3).episode(true), Some(3));
        assert_eq!(Slot::Shifted(10).episode(false), Some(10));
        assert_eq!(Slot::Shifted(10).episode(true), Some(12));
        assert_eq!(Slot::RegularOnly(4).episode(true), None);
        assert_eq!(Slot::SprintOnly(6).episode(false), None);
        assert_eq!(Slot::Unmapped.episode(false), None);
    }

    #[test]
    fn rule_matching_is_contiguous() {
        let rule = &WSBK[5];
        assert_eq!(rule.title, "Race 1");
        assert!(rule.matches(&toks(&["race", "1"])));
        assert!(!rule.matches(&toks(&["race", "2", "1"])));
    }

    /// Distinct sessions a table can produce: episode -> title. Panics if one
    /// episode is claimed by two different titles.
    fn sessions(table: &[Rule], sprint: bool) -> HashMap<u32, &'static str> {
        let mut seen = HashMap::new();
        for rule in table {
            if let Some(episode) = rule.slot.episode(sprint) {
                let title = *seen.entry(episode).or_insert(rule.title);
                assert_eq!(title, rule.title, "episode {episode} shared");
            }
        }
        seen
    }

    #[test]
    fn formula1_episodes_unique_per_weekend_format() {
        assert_eq!(sessions(FORMULA1, false).len(), 11);
        assert_eq!(sessions(FORMULA1, true).len(), 13);
    }

    #[test]
    fn fixed_tables_have_unique_episodes() {
        for table in [
            FEEDER_SERIES,
            MOTOGP,
            MOTO_LIGHTWEIGHT,
            INDYCAR,
            INDYCAR_INDY500,
            WSBK,
            SUPERSPORT,
            UFC,
            ISLE_OF_MAN_TT,
        ] {
            sessions(table, false);
        }
        assert_eq!(sessions(WSBK, false).len(), 9);
        assert_eq!(sessions(SUPERSPORT, false).len(), 6);
        assert_eq!(sessions(INDYCAR, false).len(), 4);
        assert_eq!(sessions(INDYCAR_INDY500, false).len(), 10);
        assert_eq!(sessions(MOTOGP, false).len(), 7);
    }

    #[test]
    fn number_wildcard() {
        let guard = numbered(&[&["qualifying", "#"]]);
        assert!(guard.matches(&toks(&["qualifying", "2"])));
        assert!(guard.matches(&toks(&["qualifying", "12"])));
        assert!(!guard.matches(&toks(&["qualifying"])));
        assert!(!guard.matches(&toks(&["qualifying", "day"])));
    }

    #[test]
    fn indycar_override_by_round() {
        let indy500 = table(Family::IndyCar, Some(6)).unwrap();
        assert!(std::ptr::eq(indy500, INDYCAR_INDY500));
        assert!(std::ptr::eq(table(Family::IndyCar, Some(1)).unwrap(), INDYCAR));
        assert!(std::ptr::eq(table(Family::IndyCar, None).unwrap(), INDYCAR));
        assert!(table(Family::WomensEuro, Some(1)).is_none());
    }
}
