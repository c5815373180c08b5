use thiserror::Error;

#[derive(Debug, Error)]
pub enum LineError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LINE API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("webhook signature does not match the request body")]
    InvalidSignature,

    #[error("malformed webhook payload: {0}")]
    Payload(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LineError>;
