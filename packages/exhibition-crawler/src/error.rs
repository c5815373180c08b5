//! Typed errors for the crawler.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so that callers can
//! tell a per-entry failure apart from a run-level one.

use std::time::Duration;

use thiserror::Error;

/// Errors raised by a browser session.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Could not open a WebDriver session
    #[error("failed to start browser session: {0}")]
    Session(String),

    /// A WebDriver command failed
    #[error("browser command failed: {0}")]
    Command(String),

    /// A script returned something we could not interpret
    #[error("unexpected script result: {0}")]
    Script(String),

    /// The session was asked for a window that no longer exists
    #[error("no such window: {0}")]
    NoSuchWindow(String),
}

/// Errors that can occur while crawling.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// Browser operation failed
    #[error(transparent)]
    Browser(#[from] BrowserError),

    /// A bounded wait ran out
    #[error("timed out after {timeout:?} waiting for {what}")]
    Timeout { what: String, timeout: Duration },

    /// Clicking a card did not open a new window
    #[error("no new window appeared after activating the card")]
    NoNewWindow,

    /// Writing the output file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl CrawlError {
    pub fn timeout(what: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            what: what.into(),
            timeout,
        }
    }
}

/// Errors raised while reading an exported dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing column {0:?}")]
    MissingColumn(&'static str),
}

/// Result type alias for browser operations.
pub type BrowserResult<T> = std::result::Result<T, BrowserError>;

/// Result type alias for crawl operations.
pub type Result<T> = std::result::Result<T, CrawlError>;
