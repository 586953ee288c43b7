use chrono::{Local, NaiveDate};

use crate::error::ProcessError;
use crate::fetch::Fetch;
use crate::parser;
use crate::render;

/// Where the page markup comes from.
pub enum Input {
    Url(String),
    Markup(String),
}

/// Fetch (if needed), extract, merge and render one article.
pub fn process(
    input: &Input,
    creation_date: Option<&str>,
    fetcher: &dyn Fetch,
) -> Result<String, ProcessError> {
    let creation_date = resolve_creation_date(creation_date, Local::now().date_naive())?;

    let fetched;
    let markup = match input {
        Input::Url(url) => {
            fetched = fetcher.fetch(url)?;
            fetched.as_str()
        }
        Input::Markup(markup) => markup.as_str(),
    };

    let meta = parser::extract_metadata(markup, creation_date);
    Ok(render::render(&meta))
}

/// Explicit `YYYY-MM-DD`, else `today`.
pub fn resolve_creation_date(
    raw: Option<&str>,
    today: NaiveDate,
) -> Result<NaiveDate, ProcessError> {
    match raw {
        None => Ok(today),
        Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|source| {
            ProcessError::InvalidCreationDate {
                value: value.to_string(),
                source,
            }
        }),
    }
}

// ── Tests ──
