mod config;
mod error;
mod fetch;
mod metadata;
mod parser;
mod pipeline;
mod render;

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser};
use tracing::debug;

use config::Settings;
use fetch::HttpFetcher;
use pipeline::Input;

#[derive(Parser)]
#[command(
    name = "atlantis_notes",
    about = "Extract metadata from The New Atlantis articles for note-taking"
)]
#[command(group(ArgGroup::new("source").required(true).args(["url", "file"])))]
struct Cli {
    /// URL of The New Atlantis article
    url: Option<String>,
    /// Read article HTML from a saved file instead of fetching
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Override creation date (YYYY-MM-DD format)
    #[arg(long)]
    creation_date: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load settings")?;
    debug!(?settings, "Settings loaded");

    let input = match cli.file {
        Some(path) => {
            let markup = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {:?}", path))?;
            Input::Markup(markup)
        }
        None => {
            let url = cli.url.context("An article URL or --file is required")?;
            fetch::warn_if_unexpected_site(&url, &settings.expected_host);
            Input::Url(url)
        }
    };

    let fetcher = HttpFetcher::new(&settings)?;
    let header = pipeline::process(&input, cli.creation_date.as_deref(), &fetcher)?;
    println!("{}", header);
    Ok(())
}
