use std::sync::LazyLock;

use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

use crate::metadata::{clean_text, PartialMetadata, Season};
use crate::parser::edition;

static H1_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static OG_TITLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:title"]"#).unwrap());
static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static CLASSED_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[class]").unwrap());
static META_AUTHOR_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="author"]"#).unwrap());
static META_ISSUE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="citation_issue"]"#).unwrap());
static BODY_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

static BYLINE_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)author|byline").unwrap());
static BYLINE_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:by\b|authors?\b\s*:?)\s*").unwrap());
static AUTHOR_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*(?:,|&|\band\b)\s*").unwrap());
static ISSUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"No\.\s*(\d+)\s*\(([^)]+)\)").unwrap());

const SKIPPED_TEXT_PARENTS: &[&str] = &["script", "style", "noscript"];

/// Best-effort read of the visible page: heading, byline, issue caption.
pub fn extract(document: &Html) -> PartialMetadata {
    let title = find_title(document);
    let authors = find_authors(document);
    let texts = body_texts(document);

    let (edition_number, season_year) = match find_issue_meta(document) {
        Some(n) => (Some(n), find_season_year(&texts)),
        None => match find_issue_caption(&texts) {
            Some((n, sy)) => (Some(n), sy.or_else(|| find_season_year(&texts))),
            None => (None, find_season_year(&texts)),
        },
    };

    PartialMetadata {
        title,
        authors,
        edition_number,
        season: season_year.map(|(s, _)| s),
        year: season_year.map(|(_, y)| y),
    }
}

fn find_title(document: &Html) -> Option<String> {
    document
        .select(&H1_SEL)
        .find_map(|h| clean_text(&element_text(h)))
        .or_else(|| meta_content(document, &OG_TITLE_SEL))
        .or_else(|| {
            document
                .select(&TITLE_SEL)
                .find_map(|t| clean_text(&element_text(t)))
        })
}

fn find_authors(document: &Html) -> Vec<String> {
    let byline = document
        .select(&CLASSED_SEL)
        .filter(|el| el.value().classes().any(|c| BYLINE_CLASS_RE.is_match(c)))
        .find_map(|el| clean_text(&element_text(el)))
        .or_else(|| meta_content(document, &META_AUTHOR_SEL));

    byline.map(|text| split_byline(&text)).unwrap_or_default()
}

/// "By Jane Smith and John Doe" → ["Jane Smith", "John Doe"]
pub fn split_byline(text: &str) -> Vec<String> {
    let text = BYLINE_LABEL_RE.replace(text.trim(), "");
    AUTHOR_SPLIT_RE
        .split(&text)
        .filter_map(clean_text)
        .collect()
}

fn find_issue_meta(document: &Html) -> Option<u32> {
    meta_content(document, &META_ISSUE_SEL)?
        .parse::<u32>()
        .ok()
        .filter(|n| *n >= 1)
}

/// First "No. 81 (Summer 2025)" caption. The parenthesised part may not parse.
fn find_issue_caption(texts: &[String]) -> Option<(u32, Option<(Season, i32)>)> {
    texts.iter().find_map(|t| {
        let caps = ISSUE_RE.captures(t)?;
        let number = caps[1].parse::<u32>().ok().filter(|n| *n >= 1)?;
        Some((number, edition::parse_any_order(&caps[2])))
    })
}

/// "Season YYYY" anywhere in the body wins over "YYYY Season".
fn find_season_year(texts: &[String]) -> Option<(Season, i32)> {
    texts
        .iter()
        .find_map(|t| edition::parse_season_year(t))
        .or_else(|| texts.iter().find_map(|t| edition::parse_year_season(t)))
}

/// Text nodes under <body> in document order, minus script and style contents.
fn body_texts(document: &Html) -> Vec<String> {
    let Some(body) = document.select(&BODY_SEL).next() else {
        return Vec::new();
    };

    body.descendants()
        .filter_map(|node| {
            let Node::Text(text) = node.value() else {
                return None;
            };
            let parent = node.parent().and_then(|p| p.value().as_element().map(|e| e.name()));
            if parent.is_some_and(|name| SKIPPED_TEXT_PARENTS.contains(&name)) {
                return None;
            }
            clean_text(text)
        })
        .collect()
}

fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .find_map(|m| m.value().attr("content").and_then(clean_text))
}

fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>()
}

// ── Tests ──
