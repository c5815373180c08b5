//! Visitor information page.

use scraper::Html;
use tracing::{debug, info};

use crate::browser::{wait_for_any, Browser, WindowId};
use crate::config::CrawlConfig;
use crate::error::Result;
use crate::extract::extract;
use crate::fields;
use crate::types::SiteInfoRecord;

/// Read the visitor information page in a throwaway tab.
///
/// The tab is closed and `return_to` refocused on every path. A failure to
/// load the page is returned to the caller.
pub async fn fetch_site_info<B: Browser + ?Sized>(
    browser: &B,
    config: &CrawlConfig,
    return_to: &WindowId,
) -> Result<SiteInfoRecord> {
    let tab = browser.open_tab().await?;

    let loaded = load_info_page(browser, config, &tab).await;

    let closed = async {
        browser.switch_to(&tab).await?;
        browser.close_window().await?;
        browser.switch_to(return_to).await
    }
    .await;

    let html = loaded?;
    if let Err(e) = closed {
        debug!(error = %e, "Could not tidy up info tab");
        browser.switch_to(return_to).await?;
    }

    let site_info = read_site_info(&html);
    info!(
        address = %site_info.address,
        phone = %site_info.phone,
        "Read visitor information"
    );
    Ok(site_info)
}

async fn load_info_page<B: Browser + ?Sized>(
    browser: &B,
    config: &CrawlConfig,
    tab: &WindowId,
) -> Result<String> {
    browser.switch_to(tab).await?;
    browser.goto(&config.info_url).await?;
    wait_for_any(browser, &["body"], config.page_load_timeout, config.poll_interval).await?;
    Ok(browser.source().await?)
}

/// Extract the site info record from the visitor information page.
pub fn read_site_info(html: &str) -> SiteInfoRecord {
    let doc = Html::parse_document(html);
    SiteInfoRecord {
        address: extract(&doc, &fields::address()),
        phone: extract(&doc, &fields::phone()),
        fax: extract(&doc, &fields::fax()),
        email: extract(&doc, &fields::email()),
        opening_hours: fields::opening_hours(&doc),
    }
}
