pub mod edition;
pub mod markup;
pub mod merge;
pub mod structured;

use chrono::NaiveDate;
use scraper::Html;
use tracing::debug;

use crate::metadata::ArticleMetadata;

/// Two-pass pipeline: JSON-LD → markup fallback → merged record.
pub fn extract_metadata(html: &str, creation_date: NaiveDate) -> ArticleMetadata {
    let document = Html::parse_document(html);

    let from_json_ld = structured::extract(&document);
    if from_json_ld.is_empty() {
        debug!("No usable JSON-LD article block");
    }
    let from_markup = markup::extract(&document);
    debug!(structured = ?from_json_ld, fallback = ?from_markup, "Extraction passes done");

    merge::merge(from_json_ld, from_markup, creation_date)
}

// ── Tests ──
