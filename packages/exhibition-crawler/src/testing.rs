//! Testing utilities including a scripted browser.
//!
//! [`MockBrowser`] keeps windows, page sources and listing cards in memory so
//! the pagination and navigation logic can be exercised without a WebDriver.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::browser::{Browser, WindowId};
use crate::error::{BrowserError, BrowserResult};

/// What happens when a card is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickBehavior {
    /// A new tab opens on `url`
    OpenTab { url: String },
    /// Nothing visible happens
    Nothing,
    /// The click command itself fails
    Fail,
}

/// A listing card in the scripted browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCard {
    pub label: String,
    pub on_click: ClickBehavior,
}

impl MockCard {
    pub fn opening(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            on_click: ClickBehavior::OpenTab { url: url.into() },
        }
    }

    pub fn inert(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            on_click: ClickBehavior::Nothing,
        }
    }

    pub fn failing(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            on_click: ClickBehavior::Fail,
        }
    }
}

#[derive(Debug, Default)]
struct State {
    /// Open windows in creation order, with the URL each one shows
    windows: Vec<(WindowId, String)>,
    focused: Option<WindowId>,
    next_window: usize,
    scrolls: usize,
    clicks: usize,
    closed: usize,
    quit: bool,
}

/// Scripted in-memory browser.
///
/// Starts with a single focused window on `about:blank`. Unknown URLs render
/// as an empty page, which never satisfies a ready signal.
#[derive(Clone)]
pub struct MockBrowser {
    pages: Arc<RwLock<HashMap<String, String>>>,
    heights: Arc<RwLock<Vec<u64>>>,
    cards: Arc<RwLock<Vec<MockCard>>>,
    state: Arc<RwLock<State>>,
}

impl Default for MockBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBrowser {
    pub fn new() -> Self {
        let main = WindowId::from("main");
        let state = State {
            windows: vec![(main.clone(), "about:blank".to_string())],
            focused: Some(main),
            next_window: 1,
            ..Default::default()
        };
        Self {
            pages: Arc::new(RwLock::new(HashMap::new())),
            heights: Arc::new(RwLock::new(vec![1000])),
            cards: Arc::new(RwLock::new(Vec::new())),
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Serve `html` at `url`.
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(url.into(), html.into());
        self
    }

    /// Page heights reported after 0, 1, 2, ... scrolls. The last value repeats.
    pub fn with_heights(self, heights: Vec<u64>) -> Self {
        *self.heights.write().unwrap() = heights;
        self
    }

    pub fn with_card(self, card: MockCard) -> Self {
        self.cards.write().unwrap().push(card);
        self
    }

    pub fn scroll_count(&self) -> usize {
        self.state.read().unwrap().scrolls
    }

    pub fn click_count(&self) -> usize {
        self.state.read().unwrap().clicks
    }

    pub fn closed_count(&self) -> usize {
        self.state.read().unwrap().closed
    }

    pub fn open_windows(&self) -> Vec<WindowId> {
        self.state
            .read()
            .unwrap()
            .windows
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.state.read().unwrap().focused.clone()
    }

    pub fn was_quit(&self) -> bool {
        self.state.read().unwrap().quit
    }

    fn focused_url(&self) -> BrowserResult<String> {
        let state = self.state.read().unwrap();
        let focused = state
            .focused
            .as_ref()
            .ok_or_else(|| BrowserError::NoSuchWindow("<none>".to_string()))?;
        state
            .windows
            .iter()
            .find(|(id, _)| id == focused)
            .map(|(_, url)| url.clone())
            .ok_or_else(|| BrowserError::NoSuchWindow(focused.0.clone()))
    }

    fn page_html(&self, url: &str) -> String {
        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| "<html><body></body></html>".to_string())
    }
}

#[async_trait]
impl Browser for MockBrowser {
    type Card = MockCard;

    async fn goto(&self, url: &str) -> BrowserResult<()> {
        let mut state = self.state.write().unwrap();
        let focused = state
            .focused
            .clone()
            .ok_or_else(|| BrowserError::NoSuchWindow("<none>".to_string()))?;
        let window = state
            .windows
            .iter_mut()
            .find(|(id, _)| *id == focused)
            .ok_or_else(|| BrowserError::NoSuchWindow(focused.0.clone()))?;
        window.1 = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> BrowserResult<String> {
        self.focused_url()
    }

    async fn source(&self) -> BrowserResult<String> {
        let url = self.focused_url()?;
        Ok(self.page_html(&url))
    }

    async fn page_height(&self) -> BrowserResult<u64> {
        self.focused_url()?;
        let scrolls = self.state.read().unwrap().scrolls;
        let heights = self.heights.read().unwrap();
        Ok(heights
            .get(scrolls)
            .or_else(|| heights.last())
            .copied()
            .unwrap_or_default())
    }

    async fn scroll_to_bottom(&self) -> BrowserResult<()> {
        self.focused_url()?;
        self.state.write().unwrap().scrolls += 1;
        Ok(())
    }

    async fn has_element(&self, selector: &str) -> BrowserResult<bool> {
        let html = self.source().await?;
        let selector = Selector::parse(selector)
            .map_err(|e| BrowserError::Command(format!("invalid selector: {:?}", e)))?;
        Ok(Html::parse_document(&html).select(&selector).next().is_some())
    }

    async fn find_cards(&self, _selector: &str) -> BrowserResult<Vec<MockCard>> {
        self.focused_url()?;
        Ok(self.cards.read().unwrap().clone())
    }

    async fn card_label(&self, card: &MockCard) -> BrowserResult<String> {
        Ok(card.label.clone())
    }

    async fn scroll_into_view(&self, _card: &MockCard) -> BrowserResult<()> {
        self.focused_url()?;
        Ok(())
    }

    async fn click(&self, card: &MockCard) -> BrowserResult<()> {
        self.focused_url()?;
        let mut state = self.state.write().unwrap();
        state.clicks += 1;
        match &card.on_click {
            ClickBehavior::OpenTab { url } => {
                let id = WindowId(format!("tab-{}", state.next_window));
                state.next_window += 1;
                state.windows.push((id, url.clone()));
                Ok(())
            }
            ClickBehavior::Nothing => Ok(()),
            ClickBehavior::Fail => Err(BrowserError::Command(format!(
                "element click intercepted: {}",
                card.label
            ))),
        }
    }

    async fn windows(&self) -> BrowserResult<Vec<WindowId>> {
        Ok(self.open_windows())
    }

    async fn current_window(&self) -> BrowserResult<WindowId> {
        self.focused()
            .ok_or_else(|| BrowserError::NoSuchWindow("<none>".to_string()))
    }

    async fn switch_to(&self, window: &WindowId) -> BrowserResult<()> {
        let mut state = self.state.write().unwrap();
        if !state.windows.iter().any(|(id, _)| id == window) {
            return Err(BrowserError::NoSuchWindow(window.0.clone()));
        }
        state.focused = Some(window.clone());
        Ok(())
    }

    async fn open_tab(&self) -> BrowserResult<WindowId> {
        let mut state = self.state.write().unwrap();
        let id = WindowId(format!("tab-{}", state.next_window));
        state.next_window += 1;
        state.windows.push((id.clone(), "about:blank".to_string()));
        Ok(id)
    }

    async fn close_window(&self) -> BrowserResult<()> {
        let mut state = self.state.write().unwrap();
        let focused = state
            .focused
            .take()
            .ok_or_else(|| BrowserError::NoSuchWindow("<none>".to_string()))?;
        state.windows.retain(|(id, _)| *id != focused);
        state.closed += 1;
        Ok(())
    }

    async fn quit(&self) -> BrowserResult<()> {
        let mut state = self.state.write().unwrap();
        state.windows.clear();
        state.focused = None;
        state.quit = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn click_opens_unfocused_tab() {
        let browser = MockBrowser::new().with_page("https://x/detail", "<h1>Hi</h1>");
        let card = MockCard::opening("Hi", "https://x/detail");

        browser.click(&card).await.unwrap();

        assert_eq!(browser.open_windows().len(), 2);
        assert_eq!(browser.focused(), Some(WindowId::from("main")));
        assert_eq!(browser.current_url().await.unwrap(), "about:blank");
    }

    #[tokio::test]
    async fn has_element_reads_focused_page() {
        let browser = MockBrowser::new().with_page("https://x/a", "<p class=\"date-middle\">1</p>");
        browser.goto("https://x/a").await.unwrap();

        assert!(browser.has_element("p.date-middle").await.unwrap());
        assert!(!browser.has_element("h1").await.unwrap());
    }

    #[tokio::test]
    async fn closed_window_loses_focus() {
        let browser = MockBrowser::new();
        let tab = browser.open_tab().await.unwrap();
        browser.switch_to(&tab).await.unwrap();
        browser.close_window().await.unwrap();

        assert!(browser.current_url().await.is_err());
        assert!(browser.switch_to(&tab).await.is_err());
        browser.switch_to(&WindowId::from("main")).await.unwrap();
        assert_eq!(browser.closed_count(), 1);
    }

    #[tokio::test]
    async fn heights_follow_scrolls() {
        let browser = MockBrowser::new().with_heights(vec![100, 200]);
        assert_eq!(browser.page_height().await.unwrap(), 100);
        browser.scroll_to_bottom().await.unwrap();
        assert_eq!(browser.page_height().await.unwrap(), 200);
        browser.scroll_to_bottom().await.unwrap();
        assert_eq!(browser.page_height().await.unwrap(), 200);
    }
}
