//! Formula 1 sprint weekends by season.

use crate::parser::tokenizer::normalize;

static SPRINT_CALENDAR: &[(u32, &[&str])] = &[
    (2021, &["great britain", "italy", "brazil"]),
    (2022, &["emilia romagna", "austria", "brazil"]),
    (
        2023,
        &["azerbaijan", "austria", "belgium", "qatar", "united states", "brazil"],
    ),
    (
        2024,
        &["china", "miami", "austria", "united states", "brazil", "qatar"],
    ),
    (
        2025,
        &["china", "miami", "belgium", "united states", "brazil", "qatar"],
    ),
];

/// Venue and city names that release groups use in place of the country.
static ALIASES: &[(&str, &str)] = &[
    ("usa", "united states"),
    ("us", "united states"),
    ("austin", "united states"),
    ("cota", "united states"),
    ("sao paulo", "brazil"),
    ("interlagos", "brazil"),
    ("shanghai", "china"),
    ("spa", "belgium"),
    ("spa francorchamps", "belgium"),
    ("lusail", "qatar"),
    ("baku", "azerbaijan"),
    ("imola", "emilia romagna"),
    ("spielberg", "austria"),
    ("red bull ring", "austria"),
    ("silverstone", "great britain"),
    ("britain", "great britain"),
    ("monza", "italy"),
];

/// Lowercased, punctuation-free location with aliases applied.
pub fn canonical_location(location: &str) -> String {
    let key = location
        .split(|c: char| !c.is_alphanumeric())
        .map(normalize)
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map_or(key, |(_, name)| (*name).to_string())
}

/// Returns `true` if `location` hosted a sprint in `season`.
pub fn is_sprint_weekend(season: u32, location: &str) -> bool {
    let location = canonical_location(location);
    SPRINT_CALENDAR
        .iter()
        .find(|(year, _)| *year == season)
        .is_some_and(|(_, venues)| venues.contains(&location.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_membership() {
        assert!(is_sprint_weekend(2024, "China"));
        assert!(is_sprint_weekend(2024, "United States"));
        assert!(is_sprint_weekend(2023, "Belgium"));
        assert!(!is_sprint_weekend(2024, "Belgium"));
        assert!(!is_sprint_weekend(2025, "Hungary"));
        assert!(!is_sprint_weekend(2024, "Bahrain"));
        assert!(!is_sprint_weekend(2019, "Brazil"));
    }

    #[test]
    fn aliases_and_punctuation() {
        assert!(is_sprint_weekend(2024, "USA"));
        assert!(is_sprint_weekend(2025, "Sao Paulo"));
        assert!(is_sprint_weekend(2025, "Spa-Francorchamps"));
        assert!(is_sprint_weekend(2022, "Emilia-Romagna"));
        assert_eq!(canonical_location("Great  Britain"), "great britain");
    }
}
