use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use crate::metadata::PartialMetadata;
use crate::parser::edition;

static JSON_LD_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());

const ARTICLE_TYPES: &[&str] = &[
    "Article",
    "NewsArticle",
    "ScholarlyArticle",
    "Report",
    "OpinionNewsArticle",
    "ReviewNewsArticle",
    "AnalysisNewsArticle",
    "BlogPosting",
    "TechArticle",
];

/// Read the first article node from the page's JSON-LD blocks.
/// Anything unparseable yields an empty record.
pub fn extract(document: &Html) -> PartialMetadata {
    for script in document.select(&JSON_LD_SEL) {
        let raw = script.text().collect::<String>();
        let raw = raw
            .trim()
            .trim_start_matches("<![CDATA[")
            .trim_end_matches("]]>")
            .trim();

        let parsed: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                debug!("Skipping malformed JSON-LD block: {}", e);
                continue;
            }
        };

        if let Some(article) = find_article(&parsed) {
            return from_article(article);
        }
        debug!("JSON-LD block has no article node");
    }

    PartialMetadata::default()
}

/// Locate an article node in a top-level object, array or `@graph`.
fn find_article(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.iter().find_map(find_article),
        Value::Object(obj) => {
            if is_article(value) {
                return Some(value);
            }
            obj.get("@graph")
                .and_then(|g| g.as_array())
                .and_then(|items| items.iter().find(|item| is_article(item)))
        }
        _ => None,
    }
}

fn is_article(node: &Value) -> bool {
    match node.get("@type") {
        Some(Value::String(t)) => ARTICLE_TYPES.contains(&t.as_str()),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(|t| t.as_str())
            .any(|t| ARTICLE_TYPES.contains(&t)),
        _ => false,
    }
}

fn from_article(article: &Value) -> PartialMetadata {
    let title = article
        .get("headline")
        .or_else(|| article.get("name"))
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let authors = article.get("author").map(author_names).unwrap_or_default();

    let mut edition_number = article.get("issueNumber").and_then(as_edition);
    let mut season_year = None;

    // isPartOf may nest: article → issue → volume → periodical
    let mut part = article.get("isPartOf");
    while let Some(node) = part {
        let node = match node {
            Value::Array(items) => match items.first() {
                Some(first) => first,
                None => break,
            },
            other => other,
        };
        if edition_number.is_none() {
            edition_number = node.get("issueNumber").and_then(as_edition);
        }
        if season_year.is_none() {
            season_year = ["name", "description"]
                .iter()
                .filter_map(|k| node.get(*k).and_then(|v| v.as_str()))
                .find_map(edition::parse_any_order);
        }
        part = node.get("isPartOf");
    }

    PartialMetadata {
        title,
        authors,
        edition_number,
        season: season_year.map(|(s, _)| s),
        year: season_year.map(|(_, y)| y),
    }
}

fn author_names(author: &Value) -> Vec<String> {
    match author {
        Value::Array(items) => items.iter().flat_map(author_names).collect(),
        Value::Object(obj) => obj
            .get("name")
            .and_then(|n| n.as_str())
            .map(|n| vec![n.to_string()])
            .unwrap_or_default(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn as_edition(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().trim_start_matches("No.").trim().parse().ok(),
        _ => None,
    }?;
    (n >= 1).then_some(n)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Season;

    fn extract_str(html: &str) -> PartialMetadata {
        extract(&Html::parse_document(html))
    }

    fn ld(json: &str) -> String {
        format!(
            r#"<html><head><script type="application/ld+json">{}</script></head><body></body></html>"#,
            json
        )
    }

    #[test]
    fn headline_and_author_list() {
        let m = extract_str(&ld(
            r#"{"@type": "Article", "headline": "The Tyranny of Now",
                "author": [{"name": "Nicholas  Carr"}], "datePublished": "2025-01-15"}"#,
        ));
        assert_eq!(m.title.as_deref(), Some("The Tyranny of Now"));
        // normalization happens at merge time
        assert_eq!(m.authors, vec!["Nicholas  Carr"]);
        assert_eq!(m.edition_number, None);
    }

    #[test]
    fn single_author_object() {
        let m = extract_str(&ld(
            r#"{"@type": "Article", "headline": "Test Article", "author": {"name": "John Doe"}}"#,
        ));
        assert_eq!(m.authors, vec!["John Doe"]);
    }

    #[test]
    fn string_author_and_nameless_skipped() {
        let m = extract_str(&ld(
            r#"{"@type": "Article", "headline": "X",
                "author": ["Ann Lee", {"@type": "Person"}, {"name": "Bo Kim"}]}"#,
        ));
        assert_eq!(m.authors, vec!["Ann Lee", "Bo Kim"]);
    }

    #[test]
    fn malformed_block_is_empty() {
        let m = extract_str(&ld(r#"{ "malformed": "json" // comment }"#));
        assert!(m.is_empty());
    }

    #[test]
    fn non_article_type_ignored() {
        let m = extract_str(&ld(r#"{"@type": "WebSite", "name": "The New Atlantis"}"#));
        assert!(m.is_empty());
    }

    #[test]
    fn no_block_is_empty() {
        assert!(extract_str("<html><body><h1>Hi</h1></body></html>").is_empty());
    }

    #[test]
    fn graph_and_type_array() {
        let m = extract_str(&ld(
            r#"{"@context": "https://schema.org", "@graph": [
                {"@type": "WebPage", "name": "Page"},
                {"@type": ["Article", "CreativeWork"], "headline": "From Graph"}
            ]}"#,
        ));
        assert_eq!(m.title.as_deref(), Some("From Graph"));
    }

    #[test]
    fn later_block_used_when_first_is_broken() {
        let html = r#"<html><head>
            <script type="application/ld+json">{ not json</script>
            <script type="application/ld+json">[{"@type": "NewsArticle", "headline": "Second"}]</script>
            </head></html>"#;
        assert_eq!(extract_str(html).title.as_deref(), Some("Second"));
    }

    #[test]
    fn issue_from_is_part_of() {
        let m = extract_str(&ld(
            r#"{"@type": "Article", "headline": "X",
                "isPartOf": {"@type": "PublicationIssue", "issueNumber": "81",
                             "name": "Summer 2025"}}"#,
        ));
        assert_eq!(m.edition_number, Some(81));
        assert_eq!(m.season, Some(Season::Summer));
        assert_eq!(m.year, Some(2025));
    }

    #[test]
    fn numeric_issue_on_article() {
        let m = extract_str(&ld(r#"{"@type": "Article", "headline": "X", "issueNumber": 79}"#));
        assert_eq!(m.edition_number, Some(79));
        assert_eq!(m.season, None);
    }

    #[test]
    fn zero_issue_rejected() {
        let m = extract_str(&ld(r#"{"@type": "Article", "issueNumber": 0}"#));
        assert_eq!(m.edition_number, None);
    }
}
