use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

pub const PUBLICATION: &str = "The New Atlantis";

/// Quarterly issue label. Declaration order is publication order within a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub fn index(self) -> i32 {
        match self {
            Season::Winter => 0,
            Season::Spring => 1,
            Season::Summer => 2,
            Season::Fall => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown season: {0:?}")]
pub struct UnknownSeason(pub String);

impl FromStr for Season {
    type Err = UnknownSeason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "winter" => Ok(Season::Winter),
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" | "autumn" => Ok(Season::Fall),
            _ => Err(UnknownSeason(s.to_string())),
        }
    }
}

/// What a single extraction pass found. An empty `authors` means none found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialMetadata {
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub edition_number: Option<u32>,
    pub season: Option<Season>,
    pub year: Option<i32>,
}

impl PartialMetadata {
    pub fn is_empty(&self) -> bool {
        *self == PartialMetadata::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleMetadata {
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub publication: &'static str,
    pub edition_number: Option<u32>,
    pub season: Option<Season>,
    pub year: Option<i32>,
    pub creation_date: NaiveDate,
}

impl ArticleMetadata {
    /// Record with nothing extracted: only publication and creation date set.
    pub fn empty(creation_date: NaiveDate) -> Self {
        Self {
            title: None,
            authors: Vec::new(),
            publication: PUBLICATION,
            edition_number: None,
            season: None,
            year: None,
            creation_date,
        }
    }
}

/// Collapse whitespace runs to single spaces and trim. Empty input gives `None`.
pub fn clean_text(raw: &str) -> Option<String> {
    let cleaned = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

// ── Tests ──
