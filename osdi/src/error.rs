use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum UpstreamError {
    #[error("no API token configured")]
    MissingToken,
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("page limit of {0} exceeded while paginating")]
    PageLimitExceeded(usize),
}
