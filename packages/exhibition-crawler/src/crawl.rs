//! A full crawl: listing, detail pages, site info, export.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use scraper::Html;
use tracing::{debug, info, warn};

use crate::browser::{wait_for_any, Browser};
use crate::collector::Collector;
use crate::config::CrawlConfig;
use crate::error::Result;
use crate::export::export;
use crate::fields;
use crate::navigator::{DetailNavigator, EntryOutcome, SkipReason};
use crate::pagination::{expand, Expansion};
use crate::site_info::fetch_site_info;
use crate::types::Dataset;

/// Summary of a finished crawl.
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Cards found on the expanded listing
    pub cards: usize,
    pub collected: usize,
    pub duplicates: usize,
    pub not_detail: usize,
    pub failures: usize,
    pub expansion: Expansion,
    pub output_path: PathBuf,
}

impl CrawlReport {
    pub fn skipped(&self) -> usize {
        self.duplicates + self.not_detail + self.failures
    }
}

/// Run a crawl and shut the session down afterwards, whatever the outcome.
pub async fn crawl_and_quit<B: Browser + ?Sized>(
    browser: &B,
    config: &CrawlConfig,
) -> Result<CrawlReport> {
    let result = run_crawl(browser, config).await;
    if let Err(e) = browser.quit().await {
        warn!(error = %e, "Failed to quit browser session");
    }
    result
}

/// Crawl the listing, every detail page it links to, and the visitor
/// information page, then export the dataset.
///
/// Per-card problems are logged and counted. Only listing, info page and
/// export failures abort the run.
pub async fn run_crawl<B: Browser + ?Sized>(
    browser: &B,
    config: &CrawlConfig,
) -> Result<CrawlReport> {
    let started_at = Utc::now();

    browser.goto(&config.listing_url).await?;
    wait_for_any(browser, &["body"], config.page_load_timeout, config.poll_interval).await?;
    let listing_window = browser.current_window().await?;
    info!(url = %config.listing_url, window = %listing_window, "Opened listing");

    let site_info = fetch_site_info(browser, config, &listing_window).await?;

    let expansion = expand(browser, config.max_scroll_steps, config.settle_delay).await?;
    if !expansion.settled {
        warn!(
            steps = expansion.steps,
            height = expansion.final_height,
            "Listing still growing when the scroll budget ran out"
        );
    }

    let cards = browser.find_cards(&config.card_selector).await?;
    let mut labels = Vec::with_capacity(cards.len());
    for card in &cards {
        let label = match browser.card_label(card).await {
            Ok(label) => label.trim().to_string(),
            Err(e) => {
                debug!(error = %e, "Could not read card label");
                String::new()
            }
        };
        labels.push(label);
    }
    let places = places_for(&browser.source().await?, &labels);
    info!(cards = cards.len(), "Listing expanded");

    let navigator = DetailNavigator::new(browser, config, listing_window);
    let mut collector = Collector::new();
    let (mut duplicates, mut not_detail, mut failures) = (0, 0, 0);

    for (index, card) in cards.iter().enumerate() {
        let label = &labels[index];
        match navigator.visit(card, label, &places[index], &collector).await {
            EntryOutcome::Collected(record) => {
                let url = record.detail_url.clone();
                if collector.offer(record) {
                    info!(index, label = %label, url = %url, "Collected exhibition");
                } else {
                    duplicates += 1;
                    info!(index, label = %label, url = %url, "Skipped duplicate exhibition");
                }
            }
            EntryOutcome::Skipped(reason) => {
                match &reason {
                    SkipReason::Duplicate { .. } => duplicates += 1,
                    SkipReason::NotDetailPage { .. } => not_detail += 1,
                    SkipReason::Failed { .. } => failures += 1,
                }
                warn!(index, label = %label, reason = %reason, "Skipped card");
            }
        }
    }

    let dataset = Dataset {
        exhibitions: collector.into_records(),
        site_info,
    };
    let collected = export(&dataset, &config.output_path)?;

    let report = CrawlReport {
        started_at,
        finished_at: Utc::now(),
        cards: cards.len(),
        collected,
        duplicates,
        not_detail,
        failures,
        expansion,
        output_path: config.output_path.clone(),
    };
    info!(
        collected = report.collected,
        skipped = report.skipped(),
        elapsed_ms = (report.finished_at - report.started_at).num_milliseconds(),
        "Crawl finished"
    );
    Ok(report)
}

/// Look up each label's place in the expanded listing.
fn places_for(listing_html: &str, labels: &[String]) -> Vec<String> {
    let doc = Html::parse_document(listing_html);
    labels
        .iter()
        .map(|label| fields::place_for_card(&doc, label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_follow_label_order() {
        let listing = r#"
            <div class="row Exhibition_list"><a class="ExPage" title="甲">甲</a><p class="info-middle">1A</p></div>
            <div class="row Exhibition_list"><a class="ExPage" title="乙">乙</a><p class="info-middle">地下樓</p></div>
        "#;
        let labels = vec!["乙".to_string(), "丙".to_string(), "甲".to_string()];

        assert_eq!(places_for(listing, &labels), vec!["地下樓", "", "1A"]);
    }
}
