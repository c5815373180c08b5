use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dotenvy::dotenv;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub line_channel_access_token: String,
    pub line_channel_secret: String,
    pub dataset_path: PathBuf,
    /// Maximum exhibitions returned per query
    pub search_limit: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            line_channel_access_token: env::var("LINE_CHANNEL_ACCESS_TOKEN")
                .context("LINE_CHANNEL_ACCESS_TOKEN must be set")?,
            line_channel_secret: env::var("LINE_CHANNEL_SECRET")
                .context("LINE_CHANNEL_SECRET must be set")?,
            dataset_path: env::var("DATASET_PATH")
                .unwrap_or_else(|_| "tfam_exhibitions.csv".to_string())
                .into(),
            search_limit: env::var("SEARCH_LIMIT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("SEARCH_LIMIT must be a valid number")?,
        })
    }
}
