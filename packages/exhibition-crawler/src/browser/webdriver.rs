//! WebDriver-backed [`Browser`] using fantoccini.
//!
//! Needs a running driver (chromedriver or geckodriver) at the configured URL.

use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::wd::{Capabilities, WindowHandle};
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{json, Value};
use tracing::{debug, info};

use super::{Browser, WindowId};
use crate::error::{BrowserError, BrowserResult};

impl From<CmdError> for BrowserError {
    fn from(e: CmdError) -> Self {
        BrowserError::Command(e.to_string())
    }
}

pub struct WebDriverBrowser {
    client: Client,
}

impl WebDriverBrowser {
    /// Open a new session against the WebDriver at `webdriver_url`.
    pub async fn connect(webdriver_url: &str, headless: bool) -> BrowserResult<Self> {
        info!(webdriver_url, headless, "Connecting to WebDriver");

        let mut caps = Capabilities::new();
        if headless {
            caps.insert(
                "goog:chromeOptions".to_string(),
                json!({ "args": ["--headless=new", "--window-size=1920,1080"] }),
            );
            caps.insert(
                "moz:firefoxOptions".to_string(),
                json!({ "args": ["-headless"] }),
            );
        }

        let mut builder = ClientBuilder::native();
        builder.capabilities(caps);
        let client = builder
            .connect(webdriver_url)
            .await
            .map_err(|e| BrowserError::Session(e.to_string()))?;

        if !headless {
            // Some listings render fewer cards in narrow windows
            if let Err(e) = client.maximize_window().await {
                debug!(error = %e, "Could not maximize window");
            }
        }

        Ok(Self { client })
    }

    fn handle(window: &WindowId) -> BrowserResult<WindowHandle> {
        WindowHandle::try_from(window.0.clone())
            .map_err(|_| BrowserError::NoSuchWindow(window.0.clone()))
    }

    async fn run_script(&self, script: &str, args: Vec<Value>) -> BrowserResult<Value> {
        Ok(self.client.execute(script, args).await?)
    }
}

#[async_trait]
impl Browser for WebDriverBrowser {
    type Card = Element;

    async fn goto(&self, url: &str) -> BrowserResult<()> {
        debug!(url, "Navigating");
        Ok(self.client.goto(url).await?)
    }

    async fn current_url(&self) -> BrowserResult<String> {
        Ok(self.client.current_url().await?.to_string())
    }

    async fn source(&self) -> BrowserResult<String> {
        Ok(self.client.source().await?)
    }

    async fn page_height(&self) -> BrowserResult<u64> {
        let value = self
            .run_script("return document.body.scrollHeight;", vec![])
            .await?;
        value
            .as_u64()
            .or_else(|| value.as_f64().map(|h| h as u64))
            .ok_or_else(|| BrowserError::Script(format!("scrollHeight was {}", value)))
    }

    async fn scroll_to_bottom(&self) -> BrowserResult<()> {
        self.run_script("window.scrollTo(0, document.body.scrollHeight);", vec![])
            .await?;
        Ok(())
    }

    async fn has_element(&self, selector: &str) -> BrowserResult<bool> {
        let found = self.client.find_all(Locator::Css(selector)).await?;
        Ok(!found.is_empty())
    }

    async fn find_cards(&self, selector: &str) -> BrowserResult<Vec<Element>> {
        Ok(self.client.find_all(Locator::Css(selector)).await?)
    }

    async fn card_label(&self, card: &Element) -> BrowserResult<String> {
        if let Some(title) = card.attr("title").await? {
            let title = title.trim();
            if !title.is_empty() {
                return Ok(title.to_string());
            }
        }
        Ok(card.text().await?.trim().to_string())
    }

    async fn scroll_into_view(&self, card: &Element) -> BrowserResult<()> {
        let arg = serde_json::to_value(card).map_err(|e| BrowserError::Script(e.to_string()))?;
        self.run_script("arguments[0].scrollIntoView({block:'center'});", vec![arg])
            .await?;
        Ok(())
    }

    async fn click(&self, card: &Element) -> BrowserResult<()> {
        Ok(card.click().await?)
    }

    async fn windows(&self) -> BrowserResult<Vec<WindowId>> {
        let handles = self.client.windows().await?;
        Ok(handles
            .into_iter()
            .map(|h| WindowId(String::from(h)))
            .collect())
    }

    async fn current_window(&self) -> BrowserResult<WindowId> {
        let handle = self.client.window().await?;
        Ok(WindowId(String::from(handle)))
    }

    async fn switch_to(&self, window: &WindowId) -> BrowserResult<()> {
        let handle = Self::handle(window)?;
        Ok(self.client.switch_to_window(handle).await?)
    }

    async fn open_tab(&self) -> BrowserResult<WindowId> {
        let created = self.client.new_window(true).await?;
        Ok(WindowId(String::from(created.handle)))
    }

    async fn close_window(&self) -> BrowserResult<()> {
        Ok(self.client.close_window().await?)
    }

    async fn quit(&self) -> BrowserResult<()> {
        info!("Closing WebDriver session");
        Ok(self.client.clone().close().await?)
    }
}
