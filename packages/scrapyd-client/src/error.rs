use thiserror::Error;

/// Errors returned by the Scrapyd client.
#[derive(Debug, Error)]
pub enum ScrapydError {
    /// Transport failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("Scrapyd API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Scrapyd answered but did not report `"status": "ok"`.
    #[error("Scrapyd rejected request: {0}")]
    Rejected(String),

    /// Response body was missing a key the protocol requires.
    #[error("malformed Scrapyd response: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, ScrapydError>;
