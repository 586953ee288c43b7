use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::metadata::{clean_text, ArticleMetadata, PartialMetadata, Season};
use crate::parser::edition;

/// Combine both passes field by field. Structured data wins; the markup pass fills gaps.
pub fn merge(
    structured: PartialMetadata,
    fallback: PartialMetadata,
    creation_date: NaiveDate,
) -> ArticleMetadata {
    let title = structured
        .title
        .as_deref()
        .and_then(clean_text)
        .or_else(|| fallback.title.as_deref().and_then(clean_text));

    let authors = match normalize_authors(&structured.authors) {
        a if !a.is_empty() => a,
        _ => normalize_authors(&fallback.authors),
    };

    if let (Some(s), Some(f)) = (structured.edition_number, fallback.edition_number) {
        if s != f {
            warn!(
                "Edition mismatch: structured data says No. {}, page text says No. {}; keeping No. {}",
                s, f, s
            );
        }
    }

    let season = structured.season.or(fallback.season);
    let year = structured.year.or(fallback.year);
    let edition_number = structured
        .edition_number
        .or(fallback.edition_number)
        .or_else(|| inferred_edition(season?, year?));

    ArticleMetadata {
        title,
        authors,
        edition_number,
        season,
        year,
        ..ArticleMetadata::empty(creation_date)
    }
}

fn inferred_edition(season: Season, year: i32) -> Option<u32> {
    let n = edition::infer(season, year);
    match u32::try_from(n) {
        Ok(n) if n >= 1 => {
            debug!("Inferred edition No. {} from {} {}", n, season, year);
            Some(n)
        }
        _ => {
            debug!("{} {} predates the first edition", season, year);
            None
        }
    }
}

/// Trim, collapse internal whitespace, drop empties. Order and duplicates are kept.
pub fn normalize_authors(raw: &[String]) -> Vec<String> {
    raw.iter().filter_map(|a| clean_text(a)).collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 19).unwrap()
    }

    fn titled(t: &str) -> PartialMetadata {
        PartialMetadata {
            title: Some(t.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn structured_title_wins() {
        let m = merge(titled("A"), titled("B"), date());
        assert_eq!(m.title.as_deref(), Some("A"));
    }

    #[test]
    fn fallback_fills_missing_title() {
        let m = merge(PartialMetadata::default(), titled("B"), date());
        assert_eq!(m.title.as_deref(), Some("B"));
    }

    #[test]
    fn blank_structured_title_counts_as_missing() {
        let m = merge(titled("   "), titled("B"), date());
        assert_eq!(m.title.as_deref(), Some("B"));
    }

    #[test]
    fn authors_normalized() {
        let structured = PartialMetadata {
            authors: vec!["  Jane   Doe ".into(), "".into(), "John\tSmith".into()],
            ..Default::default()
        };
        let m = merge(structured, PartialMetadata::default(), date());
        assert_eq!(m.authors, vec!["Jane Doe", "John Smith"]);
    }

    #[test]
    fn blank_structured_authors_fall_back() {
        let structured = PartialMetadata {
            authors: vec!["  ".into()],
            ..Default::default()
        };
        let fallback = PartialMetadata {
            authors: vec!["Jane Smith".into()],
            ..Default::default()
        };
        assert_eq!(merge(structured, fallback, date()).authors, vec!["Jane Smith"]);
    }

    #[test]
    fn duplicate_authors_kept_in_order() {
        let structured = PartialMetadata {
            authors: vec!["B".into(), "A".into(), "B".into()],
            ..Default::default()
        };
        let m = merge(structured, PartialMetadata::default(), date());
        assert_eq!(m.authors, vec!["B", "A", "B"]);
    }

    #[test]
    fn publication_is_constant() {
        let m = merge(titled("X"), titled("Y"), date());
        assert_eq!(m.publication, "The New Atlantis");
        assert_eq!(m.creation_date, date());
    }

    #[test]
    fn edition_inferred_from_season_and_year() {
        let fallback = PartialMetadata {
            season: Some(Season::Summer),
            year: Some(2025),
            ..Default::default()
        };
        let m = merge(PartialMetadata::default(), fallback, date());
        assert_eq!(m.edition_number, Some(81));
    }

    #[test]
    fn explicit_edition_not_overwritten() {
        let fallback = PartialMetadata {
            edition_number: Some(90),
            season: Some(Season::Summer),
            year: Some(2025),
            ..Default::default()
        };
        let m = merge(PartialMetadata::default(), fallback, date());
        assert_eq!(m.edition_number, Some(90));
    }

    #[test]
    fn no_inference_without_year() {
        let fallback = PartialMetadata {
            season: Some(Season::Winter),
            ..Default::default()
        };
        let m = merge(PartialMetadata::default(), fallback, date());
        assert_eq!(m.edition_number, None);
    }

    #[test]
    fn conflicting_editions_structured_wins() {
        let structured = PartialMetadata {
            edition_number: Some(81),
            ..Default::default()
        };
        let fallback = PartialMetadata {
            edition_number: Some(82),
            ..Default::default()
        };
        assert_eq!(merge(structured, fallback, date()).edition_number, Some(81));
    }

    #[test]
    fn season_and_year_mix_sources() {
        let structured = PartialMetadata {
            season: Some(Season::Fall),
            ..Default::default()
        };
        let fallback = PartialMetadata {
            season: Some(Season::Winter),
            year: Some(2024),
            ..Default::default()
        };
        let m = merge(structured, fallback, date());
        assert_eq!(m.season, Some(Season::Fall));
        assert_eq!(m.year, Some(2024));
        assert_eq!(m.edition_number, Some(78));
    }

    #[test]
    fn ancient_dates_not_inferred() {
        let fallback = PartialMetadata {
            season: Some(Season::Winter),
            year: Some(1990),
            ..Default::default()
        };
        assert_eq!(merge(PartialMetadata::default(), fallback, date()).edition_number, None);
    }

    #[test]
    fn empty_inputs() {
        let m = merge(PartialMetadata::default(), PartialMetadata::default(), date());
        assert_eq!(m, ArticleMetadata::empty(date()));
    }
}
