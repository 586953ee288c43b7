use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("error fetching article: {0}")]
    Fetch(#[from] FetchError),
    #[error("invalid creation date {value:?}, expected YYYY-MM-DD")]
    InvalidCreationDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
