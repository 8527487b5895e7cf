//! # Session Resolver
//!
//! Maps a family's raw session tokens to a canonical `(title, episode)` slot.
//! Resolution is pure: the same tokens and context always give the same
//! session, and tokens no rule recognises give the `("Unknown", 0)` sentinel.

pub mod calendar;
pub mod tables;
pub mod womens_euro;

use tracing::debug;

use crate::types::{Family, ParsedRelease, Session};

/// Release-group, broadcaster and encoding tokens that never describe a
/// session.
const NOISE: &[&str] = &[
    "f1tv", "f1live", "f1kids", "f1carreras", "sky", "skyf1", "intl", "international",
    "proper", "repack", "verum", "web", "webrip", "webdl", "dl", "hdtv", "h264", "x264",
    "h265", "x265", "hevc", "avc", "aac", "4k", "uhd", "hdr", "sdr", "multi", "english",
    "spanish", "eng", "esp", "session", "full", "live",
];

/// Audio tags whose channel layout (`DDP5.1`) leaves a stray digit token.
const AUDIO: &[&str] = &["ddp", "dd", "eac3", "ac3", "aac", "atmos"];

/// Lowercases, splits on punctuation, expands abbreviations and drops noise.
///
/// `FP1` becomes `practice 1`, `Q2` becomes `qualifying 2`, spelled numbers
/// become digits and `warmup` becomes `warm up`, so the rule tables only have
/// to know one spelling per session.
pub fn clean_tokens(raw: &[String]) -> Vec<String> {
    let words: Vec<String> = raw
        .iter()
        .flat_map(|token| {
            token
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| !w.is_empty())
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
        })
        .collect();

    let mut cleaned = Vec::with_capacity(words.len());
    let mut skip_channel_digit = false;
    for word in words {
        if std::mem::take(&mut skip_channel_digit) && word.len() == 1 && is_digits(&word) {
            continue;
        }
        if is_audio(&word) {
            skip_channel_digit = true;
            continue;
        }
        if NOISE.contains(&word.as_str()) || is_resolution(&word) || is_frame_rate(&word) {
            continue;
        }
        expand(&word, &mut cleaned);
    }
    cleaned
}

fn expand(word: &str, out: &mut Vec<String>) {
    let mut push = |parts: &[&str]| out.extend(parts.iter().map(|p| (*p).to_string()));
    match word {
        "one" => push(&["1"]),
        "two" => push(&["2"]),
        "three" => push(&["3"]),
        "four" => push(&["4"]),
        "quali" | "qualy" | "qualification" | "qualifying" => push(&["qualifying"]),
        "warmup" => push(&["warm", "up"]),
        "prerace" => push(&["pre", "race"]),
        "postrace" => push(&["post", "race"]),
        "presprint" => push(&["pre", "sprint"]),
        "postsprint" => push(&["post", "sprint"]),
        _ => {
            if let Some(n) = word.strip_prefix("fp").filter(|n| is_digits(n)) {
                push(&["practice", n]);
            } else if let Some(n) = word.strip_prefix('q').filter(|n| n.len() == 1 && is_digits(n)) {
                push(&["qualifying", n]);
            } else {
                push(&[word]);
            }
        }
    }
}

fn is_digits(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_digit())
}

fn is_resolution(word: &str) -> bool {
    word.strip_suffix('p')
        .or_else(|| word.strip_suffix('i'))
        .is_some_and(|n| n.len() >= 3 && is_digits(n))
}

fn is_frame_rate(word: &str) -> bool {
    word.strip_suffix("fps").is_some_and(is_digits)
}

fn is_audio(word: &str) -> bool {
    AUDIO.iter().any(|tag| {
        word.strip_prefix(tag)
            .is_some_and(|rest| rest.is_empty() || is_digits(rest))
    })
}

/// Everything about a release that selects a rule table or shifts episodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub family: Family,
    pub season: u32,
    /// Numeric round, used to pick IndyCar override tables.
    pub round: Option<u32>,
    /// Formula 1 weekend with the sprint format.
    pub sprint_weekend: bool,
}

impl SessionContext {
    /// Builds the context for a parsed release and its cleaned tokens.
    ///
    /// A weekend is a sprint weekend when a Formula 1 release names a sprint
    /// session, or when its location is on that season's sprint calendar.
    pub fn for_release(parsed: &ParsedRelease, tokens: &[String]) -> Self {
        let sprint_weekend = parsed.family == Family::Formula1
            && (tokens.iter().any(|t| t == "sprint" || t == "shootout")
                || parsed
                    .location
                    .as_deref()
                    .is_some_and(|l| calendar::is_sprint_weekend(parsed.season, l)));

        Self {
            family: parsed.family,
            season: parsed.season,
            round: parsed.round.number(),
            sprint_weekend,
        }
    }
}

/// Resolves the session of a parsed release.
pub fn resolve(parsed: &ParsedRelease) -> Session {
    let tokens = clean_tokens(&parsed.raw_session_tokens);
    let context = SessionContext::for_release(parsed, &tokens);
    resolve_tokens(&tokens, &context)
}

/// Resolves already cleaned tokens under an explicit context.
pub fn resolve_tokens(tokens: &[String], context: &SessionContext) -> Session {
    let Some(table) = tables::table(context.family, context.round) else {
        return womens_euro::resolve(context.season, tokens);
    };

    let session = table
        .iter()
        .find(|rule| rule.matches(tokens))
        .and_then(|rule| {
            rule.slot
                .episode(context.sprint_weekend)
                .map(|episode| Session::new(rule.title, episode))
        })
        .unwrap_or_else(Session::unknown);

    debug!(
        family = %context.family,
        sprint = context.sprint_weekend,
        ?tokens,
        "resolved session {session}"
    );
    session
}
