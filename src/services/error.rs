use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("invalid symbol '{0}'")]
    InvalidSymbol(String),

    #[error("unsupported interval '{0}'")]
    InvalidInterval(String),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed kline data: {0}")]
    Decode(String),
}

impl MarketDataError {
    /// Transient failures worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            MarketDataError::Http(e) => e.is_timeout() || e.is_connect(),
            MarketDataError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
