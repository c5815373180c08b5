//! Browser session abstraction.
//!
//! The crawler only needs a handful of WebDriver capabilities. Keeping them
//! behind [`Browser`] lets the navigation logic run against the scripted
//! session in [`crate::testing`] as well as a real WebDriver.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{BrowserResult, CrawlError, Result};

#[cfg(feature = "webdriver")]
pub mod webdriver;

#[cfg(feature = "webdriver")]
pub use webdriver::WebDriverBrowser;

/// Opaque handle for a browser window or tab.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub String);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One live browser session with a single focused window at a time.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Handle to a clickable element on the current page
    type Card: Send + Sync;

    async fn goto(&self, url: &str) -> BrowserResult<()>;

    async fn current_url(&self) -> BrowserResult<String>;

    /// Serialized DOM of the focused window
    async fn source(&self) -> BrowserResult<String>;

    /// `document.body.scrollHeight` of the focused window
    async fn page_height(&self) -> BrowserResult<u64>;

    async fn scroll_to_bottom(&self) -> BrowserResult<()>;

    /// Whether at least one element matches `selector` right now
    async fn has_element(&self, selector: &str) -> BrowserResult<bool>;

    async fn find_cards(&self, selector: &str) -> BrowserResult<Vec<Self::Card>>;

    /// The card's `title` attribute, else its visible text
    async fn card_label(&self, card: &Self::Card) -> BrowserResult<String>;

    async fn scroll_into_view(&self, card: &Self::Card) -> BrowserResult<()>;

    async fn click(&self, card: &Self::Card) -> BrowserResult<()>;

    async fn windows(&self) -> BrowserResult<Vec<WindowId>>;

    async fn current_window(&self) -> BrowserResult<WindowId>;

    async fn switch_to(&self, window: &WindowId) -> BrowserResult<()>;

    /// Open a blank tab and return its handle. Focus does not move.
    async fn open_tab(&self) -> BrowserResult<WindowId>;

    /// Close the focused window. Focus is undefined until the next `switch_to`.
    async fn close_window(&self) -> BrowserResult<()>;

    /// End the session.
    async fn quit(&self) -> BrowserResult<()>;
}

/// Wait until any of `selectors` is present. First match wins.
///
/// Returns the index of the selector that matched.
pub async fn wait_for_any<B: Browser + ?Sized>(
    browser: &B,
    selectors: &[&str],
    timeout: Duration,
    poll: Duration,
) -> Result<usize> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        for (i, selector) in selectors.iter().enumerate() {
            if browser.has_element(selector).await? {
                return Ok(i);
            }
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(CrawlError::timeout(
                format!("any of [{}]", selectors.join(", ")),
                timeout,
            ));
        }
        tokio::time::sleep(poll).await;
    }
}

/// Wait for a window that is not in `before` to appear.
pub async fn wait_for_new_window<B: Browser + ?Sized>(
    browser: &B,
    before: &HashSet<WindowId>,
    timeout: Duration,
    poll: Duration,
) -> Result<WindowId> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        let now_open = browser.windows().await?;
        if let Some(window) = now_open.into_iter().find(|w| !before.contains(w)) {
            return Ok(window);
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(CrawlError::NoNewWindow);
        }
        tokio::time::sleep(poll).await;
    }
}
