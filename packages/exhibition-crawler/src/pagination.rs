//! Infinite-scroll expansion of the listing page.

use std::time::Duration;

use tracing::debug;

use crate::browser::Browser;
use crate::error::Result;

/// How an expansion ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expansion {
    /// Scroll attempts made
    pub steps: usize,
    /// True when the page stopped growing before the step budget ran out
    pub settled: bool,
    pub final_height: u64,
}

/// Scroll to the bottom until the page height stops changing or `max_steps`
/// scrolls have been made.
///
/// Only exact equality of consecutive heights counts as settled.
pub async fn expand<B: Browser + ?Sized>(
    browser: &B,
    max_steps: usize,
    settle_delay: Duration,
) -> Result<Expansion> {
    let mut last_height = browser.page_height().await?;

    for step in 1..=max_steps {
        browser.scroll_to_bottom().await?;
        tokio::time::sleep(settle_delay).await;

        let height = browser.page_height().await?;
        debug!(step, last_height, height, "Scrolled listing");
        if height == last_height {
            return Ok(Expansion {
                steps: step,
                settled: true,
                final_height: height,
            });
        }
        last_height = height;
    }

    Ok(Expansion {
        steps: max_steps,
        settled: false,
        final_height: last_height,
    })
}
