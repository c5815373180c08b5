//! Per-card detail navigation.
//!
//! Each card goes through
//! `Idle -> Opening -> WaitingReady -> Extracting -> Closed`, or ends in
//! `Errored` from any earlier state. Whatever happens, the detail window is
//! closed and focus is back on the listing window before [`DetailNavigator::visit`]
//! returns.

use std::collections::HashSet;
use std::fmt;

use scraper::Html;
use tracing::debug;

use crate::browser::{wait_for_any, wait_for_new_window, Browser, WindowId};
use crate::collector::Collector;
use crate::config::CrawlConfig;
use crate::error::{CrawlError, Result};
use crate::extract::extract;
use crate::fields;
use crate::types::ExhibitionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Idle,
    Opening,
    WaitingReady,
    Extracting,
    Closed,
    Errored,
}

impl NavState {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavState::Idle => "idle",
            NavState::Opening => "opening",
            NavState::WaitingReady => "waiting_ready",
            NavState::Extracting => "extracting",
            NavState::Closed => "closed",
            NavState::Errored => "errored",
        }
    }
}

impl fmt::Display for NavState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a card produced no record.
#[derive(Debug)]
pub enum SkipReason {
    /// The opened page is not an exhibition detail page
    NotDetailPage { url: String },
    /// The detail URL was already collected
    Duplicate { url: String },
    /// A step failed; `stage` is the state the card was in
    Failed { stage: NavState, error: CrawlError },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotDetailPage { url } => write!(f, "not a detail page: {}", url),
            SkipReason::Duplicate { url } => write!(f, "duplicate: {}", url),
            SkipReason::Failed { stage, error } => write!(f, "failed while {}: {}", stage, error),
        }
    }
}

#[derive(Debug)]
pub enum EntryOutcome {
    Collected(ExhibitionRecord),
    Skipped(SkipReason),
}

impl EntryOutcome {
    /// Terminal state of the card.
    pub fn final_state(&self) -> NavState {
        match self {
            EntryOutcome::Skipped(SkipReason::Failed { .. }) => NavState::Errored,
            _ => NavState::Closed,
        }
    }
}

/// Progress of one visit, kept outside the fallible part so cleanup can see it.
struct Visit {
    state: NavState,
    opened: Option<WindowId>,
}

pub struct DetailNavigator<'a, B: Browser + ?Sized> {
    browser: &'a B,
    config: &'a CrawlConfig,
    listing_window: WindowId,
}

impl<'a, B: Browser + ?Sized> DetailNavigator<'a, B> {
    pub fn new(browser: &'a B, config: &'a CrawlConfig, listing_window: WindowId) -> Self {
        Self {
            browser,
            config,
            listing_window,
        }
    }

    /// Open `card`'s detail view, read it, and come back to the listing.
    ///
    /// `label` and `place` were read from the listing beforehand. Never
    /// fails; every error becomes [`SkipReason::Failed`].
    pub async fn visit(
        &self,
        card: &B::Card,
        label: &str,
        place: &str,
        collected: &Collector,
    ) -> EntryOutcome {
        let mut visit = Visit {
            state: NavState::Idle,
            opened: None,
        };

        let outcome = match self.open_and_read(card, label, place, collected, &mut visit).await {
            Ok(outcome) => outcome,
            Err(error) => {
                self.recover(visit.opened.as_ref()).await;
                return EntryOutcome::Skipped(SkipReason::Failed {
                    stage: visit.state,
                    error,
                });
            }
        };

        match self.release(visit.opened.as_ref()).await {
            Ok(()) => outcome,
            Err(error) => {
                self.recover(visit.opened.as_ref()).await;
                EntryOutcome::Skipped(SkipReason::Failed {
                    stage: visit.state,
                    error,
                })
            }
        }
    }

    async fn open_and_read(
        &self,
        card: &B::Card,
        label: &str,
        place: &str,
        collected: &Collector,
        visit: &mut Visit,
    ) -> Result<EntryOutcome> {
        let poll = self.config.poll_interval;

        self.browser.scroll_into_view(card).await?;
        let before: HashSet<WindowId> = self.browser.windows().await?.into_iter().collect();
        self.browser.click(card).await?;
        visit.state = NavState::Opening;

        let window =
            wait_for_new_window(self.browser, &before, self.config.new_window_timeout, poll)
                .await?;
        visit.opened = Some(window.clone());
        self.browser.switch_to(&window).await?;
        visit.state = NavState::WaitingReady;

        let signal = wait_for_any(
            self.browser,
            &fields::READY_SIGNALS,
            self.config.ready_timeout,
            poll,
        )
        .await?;
        debug!(label, signal = fields::READY_SIGNALS[signal], "Detail view ready");

        let url = self.browser.current_url().await?;
        if !self.config.detail_url.matches(&url) {
            return Ok(EntryOutcome::Skipped(SkipReason::NotDetailPage { url }));
        }
        if collected.contains(&url) {
            return Ok(EntryOutcome::Skipped(SkipReason::Duplicate { url }));
        }
        visit.state = NavState::Extracting;

        let html = self.browser.source().await?;
        Ok(EntryOutcome::Collected(read_detail(&html, &url, label, place)))
    }

    /// Close the detail window (if one opened) and refocus the listing.
    async fn release(&self, opened: Option<&WindowId>) -> Result<()> {
        if let Some(window) = opened {
            self.browser.switch_to(window).await?;
            self.browser.close_window().await?;
        }
        self.browser.switch_to(&self.listing_window).await?;
        Ok(())
    }

    /// Best-effort version of [`Self::release`] for the error path.
    async fn recover(&self, opened: Option<&WindowId>) {
        if let Some(window) = opened {
            let still_open = match self.browser.windows().await {
                Ok(windows) => windows.contains(window),
                Err(_) => true,
            };
            if still_open {
                if let Err(e) = self.browser.switch_to(window).await {
                    debug!(window = %window, error = %e, "Ignoring failure to focus detail window");
                } else if let Err(e) = self.browser.close_window().await {
                    debug!(window = %window, error = %e, "Ignoring failure to close detail window");
                }
            }
        }
        if let Err(e) = self.browser.switch_to(&self.listing_window).await {
            debug!(error = %e, "Ignoring failure to refocus listing window");
        }
    }
}

/// Build a record from a rendered detail page.
pub fn read_detail(html: &str, url: &str, label: &str, place: &str) -> ExhibitionRecord {
    let doc = Html::parse_document(html);
    ExhibitionRecord::new(fields::name_or(&doc, label), url)
        .with_place(place)
        .with_date_range(extract(&doc, &fields::exhibition_date()))
        .with_description(extract(&doc, &fields::exhibition_description()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockBrowser, MockCard};
    use std::time::Duration;

    const DETAIL: &str = r#"
        <div class="exhibition-title"><span id="CPContent_lbExName">城市的肖像</span></div>
        <span id="CPContent_lbDate">2026/05/01 - 2026/08/30</span>
        <div class="info-content txt"><p>第一段。</p><p>第二段。</p></div>
    "#;
    const DETAIL_URL: &str = "https://www.tfam.museum/Exhibition/Exhibition_page.aspx?id=812";

    fn fast_config() -> CrawlConfig {
        CrawlConfig::default().with_timeouts(Duration::from_millis(30), Duration::from_millis(5))
    }

    fn listing() -> WindowId {
        WindowId::from("main")
    }

    #[tokio::test]
    async fn collects_record_and_returns_to_listing() {
        let browser = MockBrowser::new().with_page(DETAIL_URL, DETAIL);
        let config = fast_config();
        let navigator = DetailNavigator::new(&browser, &config, listing());
        let card = MockCard::opening("城市的肖像", DETAIL_URL);

        let outcome = navigator
            .visit(&card, "城市的肖像", "二樓 2A", &Collector::new())
            .await;

        let record = match outcome {
            EntryOutcome::Collected(record) => record,
            other => panic!("expected a record, got {:?}", other),
        };
        assert_eq!(record.name, "城市的肖像");
        assert_eq!(record.detail_url, DETAIL_URL);
        assert_eq!(record.place, "二樓 2A");
        assert_eq!(record.date_range, "2026/05/01 - 2026/08/30");
        assert_eq!(record.description, "第一段。第二段。");
        assert_eq!(browser.open_windows(), vec![listing()]);
        assert_eq!(browser.focused(), Some(listing()));
    }

    #[tokio::test]
    async fn ready_timeout_is_a_skip_and_cleans_up() {
        let url = "https://www.tfam.museum/Exhibition/Exhibition_page.aspx?id=9";
        let browser = MockBrowser::new().with_page(url, "<p>still loading</p>");
        let config = fast_config();
        let navigator = DetailNavigator::new(&browser, &config, listing());

        let outcome = navigator
            .visit(&MockCard::opening("慢", url), "慢", "", &Collector::new())
            .await;

        assert!(matches!(
            outcome,
            EntryOutcome::Skipped(SkipReason::Failed {
                stage: NavState::WaitingReady,
                error: CrawlError::Timeout { .. },
            })
        ));
        assert_eq!(outcome.final_state(), NavState::Errored);
        assert_eq!(browser.open_windows(), vec![listing()]);
        assert_eq!(browser.focused(), Some(listing()));
    }

    #[tokio::test]
    async fn no_new_window_is_a_skip() {
        let browser = MockBrowser::new();
        let config = fast_config();
        let navigator = DetailNavigator::new(&browser, &config, listing());

        let outcome = navigator
            .visit(&MockCard::inert("無"), "無", "", &Collector::new())
            .await;

        assert!(matches!(
            outcome,
            EntryOutcome::Skipped(SkipReason::Failed {
                stage: NavState::Opening,
                error: CrawlError::NoNewWindow,
            })
        ));
        assert_eq!(browser.open_windows(), vec![listing()]);
        assert_eq!(browser.closed_count(), 0);
    }

    #[tokio::test]
    async fn click_failure_stays_idle() {
        let browser = MockBrowser::new();
        let config = fast_config();
        let navigator = DetailNavigator::new(&browser, &config, listing());

        let outcome = navigator
            .visit(&MockCard::failing("壞"), "壞", "", &Collector::new())
            .await;

        assert!(matches!(
            outcome,
            EntryOutcome::Skipped(SkipReason::Failed {
                stage: NavState::Idle,
                error: CrawlError::Browser(_),
            })
        ));
        assert_eq!(browser.focused(), Some(listing()));
    }

    #[tokio::test]
    async fn non_detail_url_is_skipped() {
        let url = "https://www.tfam.museum/Event/Event_page.aspx?id=3";
        let browser = MockBrowser::new().with_page(url, "<h1>活動</h1>");
        let config = fast_config();
        let navigator = DetailNavigator::new(&browser, &config, listing());

        let outcome = navigator
            .visit(&MockCard::opening("活動", url), "活動", "", &Collector::new())
            .await;

        assert!(matches!(
            outcome,
            EntryOutcome::Skipped(SkipReason::NotDetailPage { .. })
        ));
        assert_eq!(outcome.final_state(), NavState::Closed);
        assert_eq!(browser.open_windows(), vec![listing()]);
    }

    #[tokio::test]
    async fn already_collected_url_is_skipped() {
        let browser = MockBrowser::new().with_page(DETAIL_URL, DETAIL);
        let config = fast_config();
        let navigator = DetailNavigator::new(&browser, &config, listing());
        let mut collected = Collector::new();
        collected.offer(ExhibitionRecord::new("城市的肖像", DETAIL_URL));

        let outcome = navigator
            .visit(&MockCard::opening("城市的肖像", DETAIL_URL), "城市的肖像", "", &collected)
            .await;

        assert!(matches!(
            outcome,
            EntryOutcome::Skipped(SkipReason::Duplicate { .. })
        ));
        assert_eq!(browser.open_windows(), vec![listing()]);
    }

    #[test]
    fn read_detail_uses_label_when_page_has_no_name() {
        let record = read_detail("<p class=\"date-middle\">x</p>", DETAIL_URL, "卡片標題", "");
        assert_eq!(record.name, "卡片標題");
        assert_eq!(record.date_range, "");
        assert_eq!(record.description, "");
    }
}
