//! Museum Exhibition Crawler
//!
//! Rebuilds the exhibition dataset for a museum website whose listing is an
//! infinite-scroll page and whose detail views open in new browser windows.
//!
//! # Usage
//!
//! ```rust,ignore
//! use exhibition_crawler::{crawl_and_quit, CrawlConfig, WebDriverBrowser};
//!
//! let config = CrawlConfig::from_env()?;
//! let browser = WebDriverBrowser::connect(&config.webdriver_url, config.headless).await?;
//! let report = crawl_and_quit(&browser, &config).await?;
//! println!("{} exhibitions", report.collected);
//! ```
//!
//! # Modules
//!
//! - [`browser`] - Browser session trait and the WebDriver implementation
//! - [`extract`] - Ordered-fallback field extraction over parsed HTML
//! - [`fields`] - The site's selectors and field specs
//! - [`pagination`] - Infinite-scroll expansion of the listing
//! - [`navigator`] - Per-card detail navigation state machine
//! - [`collector`] - URL-deduplicated record collection
//! - [`site_info`] - Visitor information page
//! - [`export`] / [`dataset`] - CSV output and its reader
//! - [`testing`] - Scripted browser for tests

pub mod browser;
pub mod collector;
pub mod config;
pub mod crawl;
pub mod dataset;
pub mod error;
pub mod export;
pub mod extract;
pub mod fields;
pub mod navigator;
pub mod pagination;
pub mod site_info;
pub mod testing;
pub mod types;

pub use browser::{Browser, WindowId};
#[cfg(feature = "webdriver")]
pub use browser::WebDriverBrowser;
pub use collector::Collector;
pub use config::{CrawlConfig, DetailUrlPattern};
pub use crawl::{crawl_and_quit, run_crawl, CrawlReport};
pub use dataset::{load_dataset, read_dataset, DatasetRow, COLUMNS};
pub use error::{BrowserError, CrawlError, DatasetError};
pub use export::{export, write_dataset};
pub use navigator::{DetailNavigator, EntryOutcome, NavState, SkipReason};
pub use pagination::{expand, Expansion};
pub use types::{Dataset, ExhibitionRecord, SiteInfoRecord};
