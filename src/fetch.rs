use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::Url;
use tracing::{info, warn};

use crate::config::Settings;
use crate::error::FetchError;

/// Source of raw page markup.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(settings.user_agent.clone());
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let request_err = |source: reqwest::Error| FetchError::Request {
            url: url.to_string(),
            source,
        };

        info!("Fetching article: {}", url);
        let start = Instant::now();
        let response = self.client.get(url).send().map_err(request_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(request_err)?;
        info!(
            "Fetched {} bytes in {}ms",
            body.len(),
            start.elapsed().as_millis()
        );
        Ok(body)
    }
}

/// Advisory only: true when `url` points at `expected_host` or one of its subdomains.
pub fn is_expected_site(url: &str, expected_host: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    match parsed.host_str() {
        Some(host) => host == expected_host || host.ends_with(&format!(".{}", expected_host)),
        None => false,
    }
}

pub fn warn_if_unexpected_site(url: &str, expected_host: &str) {
    if !is_expected_site(url, expected_host) {
        warn!("URL doesn't appear to be from {}: {}", expected_host, url);
    }
}

// ── Tests ──
