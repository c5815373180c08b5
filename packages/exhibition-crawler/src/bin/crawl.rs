//! Crawl the exhibition listing and write the dataset file.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use exhibition_crawler::{crawl_and_quit, CrawlConfig, WebDriverBrowser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "crawl")]
#[command(about = "Rebuild the exhibition dataset from the museum website")]
struct Cli {
    /// Site root, e.g. https://www.tfam.museum
    #[arg(long)]
    base_url: Option<String>,

    /// Output CSV path
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// WebDriver endpoint (chromedriver / geckodriver)
    #[arg(long)]
    webdriver: Option<String>,

    /// Run the browser without a window
    #[arg(long)]
    headless: bool,

    /// Upper bound on listing scroll attempts
    #[arg(long)]
    max_scroll_steps: Option<usize>,

    /// Wait after each scroll, in milliseconds
    #[arg(long)]
    settle_delay_ms: Option<u64>,
}

impl Cli {
    fn apply(self, mut config: CrawlConfig) -> CrawlConfig {
        if let Some(base_url) = self.base_url {
            config = CrawlConfig {
                output_path: config.output_path.clone(),
                webdriver_url: config.webdriver_url.clone(),
                headless: config.headless,
                max_scroll_steps: config.max_scroll_steps,
                settle_delay: config.settle_delay,
                ..CrawlConfig::for_site(&base_url)
            };
        }
        if let Some(output) = self.output {
            config = config.with_output_path(output);
        }
        if let Some(url) = self.webdriver {
            config = config.with_webdriver_url(url);
        }
        if self.headless {
            config = config.with_headless(true);
        }
        if let Some(steps) = self.max_scroll_steps {
            config = config.with_max_scroll_steps(steps);
        }
        if let Some(ms) = self.settle_delay_ms {
            config = config.with_settle_delay(Duration::from_millis(ms));
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,exhibition_crawler=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli.apply(CrawlConfig::from_env().context("Failed to load configuration")?);
    tracing::info!(listing = %config.listing_url, webdriver = %config.webdriver_url, "Starting crawl");

    let browser = WebDriverBrowser::connect(&config.webdriver_url, config.headless)
        .await
        .context("Failed to connect to WebDriver")?;

    let report = crawl_and_quit(&browser, &config)
        .await
        .context("Crawl failed")?;

    println!(
        "Exported {} exhibitions to {}",
        report.collected,
        report.output_path.display()
    );
    Ok(())
}
