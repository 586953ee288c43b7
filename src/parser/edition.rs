use std::sync::LazyLock;

use regex::Regex;

use crate::metadata::Season;

/// Winter 2025 was No. 79; one issue per season since.
const REFERENCE_SEASON: Season = Season::Winter;
const REFERENCE_YEAR: i32 = 2025;
const REFERENCE_EDITION: i32 = 79;
const ISSUES_PER_YEAR: i32 = 4;

static SEASON_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(winter|spring|summer|fall|autumn)\s+(\d{4})\b").unwrap()
});
static YEAR_SEASON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{4})\s+(winter|spring|summer|fall|autumn)\b").unwrap()
});

/// Edition number for a season/year pair, counted in quarters from the reference issue.
/// Dates before Winter 2025 give smaller numbers, possibly below 1 for very old years.
pub fn infer(season: Season, year: i32) -> i32 {
    let offset =
        (year - REFERENCE_YEAR) * ISSUES_PER_YEAR + (season.index() - REFERENCE_SEASON.index());
    REFERENCE_EDITION + offset
}

/// Find "Winter 2025" in `text`.
pub fn parse_season_year(text: &str) -> Option<(Season, i32)> {
    let caps = SEASON_YEAR_RE.captures(text)?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
}

/// Find "2025 Winter" in `text`.
pub fn parse_year_season(text: &str) -> Option<(Season, i32)> {
    let caps = YEAR_SEASON_RE.captures(text)?;
    Some((caps[2].parse().ok()?, caps[1].parse().ok()?))
}

/// Either word order, "Season Year" tried first.
pub fn parse_any_order(text: &str) -> Option<(Season, i32)> {
    parse_season_year(text).or_else(|| parse_year_season(text))
}

// ── Tests ──
