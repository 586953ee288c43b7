use crate::metadata::ArticleMetadata;

const FORMAT: &str = "journal article";

/// Front matter plus an empty "## Notes" heading. No trailing newline.
pub fn render(meta: &ArticleMetadata) -> String {
    let mut lines = vec!["---".to_string()];

    if let Some(title) = &meta.title {
        lines.push(format!("title: {}", yaml_scalar(title)));
    }

    if !meta.authors.is_empty() {
        lines.push("author:".to_string());
        for author in &meta.authors {
            lines.push(format!("  - {}", yaml_scalar(author)));
        }
    }

    lines.push(format!("format: {}", FORMAT));
    lines.push(format!("creation-date: {}", meta.creation_date.format("%Y-%m-%d")));
    lines.push(format!("publication: {}", meta.publication));

    if let Some(edition) = periodical_edition(meta) {
        lines.push(format!("periodical-edition: {}", edition));
    }

    lines.push("---".to_string());
    lines.push(String::new());
    lines.push("## Notes".to_string());

    lines.join("\n")
}

/// "No. 81 (Summer 2025)", only when all three parts are known.
fn periodical_edition(meta: &ArticleMetadata) -> Option<String> {
    let (edition, season, year) = (meta.edition_number?, meta.season?, meta.year?);
    Some(format!("No. {} ({} {})", edition, season, year))
}

/// Plain text passes through; anything a YAML parser would misread is double-quoted.
fn yaml_scalar(value: &str) -> String {
    if needs_quoting(value) {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{}\"", escaped)
    } else {
        value.to_string()
    }
}

fn needs_quoting(value: &str) -> bool {
    const LEADING: &[char] = &[
        '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%',
        '@', '`',
    ];
    value.starts_with(LEADING)
        || value.ends_with(':')
        || value.contains(": ")
        || value.contains(" #")
        || value.parse::<f64>().is_ok()
        || matches!(
            value.to_lowercase().as_str(),
            "true" | "false" | "yes" | "no" | "null" | "~" | "on" | "off"
        )
}

// ── Tests ──
