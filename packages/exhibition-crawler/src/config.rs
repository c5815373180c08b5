use std::path::PathBuf;
use std::time::Duration;

use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.tfam.museum";
const LISTING_PATH: &str = "/Exhibition/Exhibition.aspx?ddlLang=zh-tw";
const INFO_PATH: &str = "/Common/editor.aspx?id=230&ddlLang=zh-tw";

/// Which URLs count as an exhibition detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailUrlPattern {
    pub path_fragment: String,
    pub query_fragment: String,
}

impl DetailUrlPattern {
    /// True when the path contains `path_fragment` and the query contains
    /// `query_fragment`. Unparseable URLs never match.
    pub fn matches(&self, url: &str) -> bool {
        let Ok(url) = Url::parse(url) else {
            return false;
        };
        url.path().contains(&self.path_fragment)
            && url
                .query()
                .is_some_and(|query| query.contains(&self.query_fragment))
    }
}

impl Default for DetailUrlPattern {
    fn default() -> Self {
        Self {
            path_fragment: "/Exhibition/".to_string(),
            query_fragment: "id=".to_string(),
        }
    }
}

/// Crawl configuration.
///
/// Defaults reproduce a full run against the museum's zh-tw site.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub listing_url: String,
    pub info_url: String,
    /// CSS selector for clickable listing cards
    pub card_selector: String,
    pub detail_url: DetailUrlPattern,
    pub output_path: PathBuf,
    pub webdriver_url: String,
    pub headless: bool,
    /// Scroll attempts before giving up on the listing settling
    pub max_scroll_steps: usize,
    /// Pause after each scroll before measuring the page again
    pub settle_delay: Duration,
    pub new_window_timeout: Duration,
    pub ready_timeout: Duration,
    pub page_load_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self::for_site(DEFAULT_BASE_URL)
    }
}

impl CrawlConfig {
    /// Default configuration rooted at another host (e.g. a local mirror).
    pub fn for_site(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            listing_url: format!("{}{}", base, LISTING_PATH),
            info_url: format!("{}{}", base, INFO_PATH),
            card_selector: "a.ExPage".to_string(),
            detail_url: DetailUrlPattern::default(),
            output_path: PathBuf::from("tfam_exhibitions.csv"),
            webdriver_url: "http://localhost:4444".to_string(),
            headless: false,
            max_scroll_steps: 15,
            settle_delay: Duration::from_secs(1),
            new_window_timeout: Duration::from_secs(6),
            ready_timeout: Duration::from_secs(8),
            page_load_timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(100),
        }
    }

    /// Load configuration from environment variables
    #[cfg(feature = "cli")]
    pub fn from_env() -> anyhow::Result<Self> {
        use anyhow::Context;
        use std::env;

        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        let base_url = env::var("CRAWL_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::for_site(&base_url);

        if let Ok(path) = env::var("CRAWL_OUTPUT") {
            config.output_path = PathBuf::from(path);
        }
        if let Ok(url) = env::var("WEBDRIVER_URL") {
            config.webdriver_url = url;
        }
        if let Ok(headless) = env::var("CRAWL_HEADLESS") {
            config.headless = matches!(headless.as_str(), "1" | "true" | "yes");
        }
        if let Ok(steps) = env::var("CRAWL_MAX_SCROLL_STEPS") {
            config.max_scroll_steps = steps
                .parse()
                .context("CRAWL_MAX_SCROLL_STEPS must be a valid number")?;
        }
        if let Ok(ms) = env::var("CRAWL_SETTLE_DELAY_MS") {
            let ms: u64 = ms
                .parse()
                .context("CRAWL_SETTLE_DELAY_MS must be a valid number")?;
            config.settle_delay = Duration::from_millis(ms);
        }

        Ok(config)
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.webdriver_url = url.into();
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_max_scroll_steps(mut self, steps: usize) -> Self {
        self.max_scroll_steps = steps;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Shrink every wait. Used by tests driving the scripted browser.
    pub fn with_timeouts(mut self, wait: Duration, poll: Duration) -> Self {
        self.new_window_timeout = wait;
        self.ready_timeout = wait;
        self.page_load_timeout = wait;
        self.poll_interval = poll;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_zh_tw_pages() {
        let config = CrawlConfig::default();
        assert_eq!(
            config.listing_url,
            "https://www.tfam.museum/Exhibition/Exhibition.aspx?ddlLang=zh-tw"
        );
        assert_eq!(
            config.info_url,
            "https://www.tfam.museum/Common/editor.aspx?id=230&ddlLang=zh-tw"
        );
        assert_eq!(config.max_scroll_steps, 15);
        assert_eq!(config.settle_delay, Duration::from_secs(1));
        assert_eq!(config.new_window_timeout, Duration::from_secs(6));
    }

    #[test]
    fn for_site_trims_trailing_slash() {
        let config = CrawlConfig::for_site("http://mirror.local/");
        assert!(config.listing_url.starts_with("http://mirror.local/Exhibition/"));
    }

    #[test]
    fn detail_pattern_requires_path_and_id() {
        let pattern = DetailUrlPattern::default();
        assert!(pattern.matches("https://www.tfam.museum/Exhibition/Exhibition_page.aspx?id=812&ddlLang=zh-tw"));
        assert!(!pattern.matches("https://www.tfam.museum/Exhibition/Exhibition.aspx?ddlLang=zh-tw"));
        assert!(!pattern.matches("https://www.tfam.museum/Event/Event_page.aspx?id=3"));
        assert!(!pattern.matches("https://www.tfam.museum/Event/page.aspx?next=/Exhibition/&id=3"));
        assert!(!pattern.matches("not a url"));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn from_env_rejects_bad_scroll_budget() {
        std::env::set_var("CRAWL_MAX_SCROLL_STEPS", "many");
        let result = CrawlConfig::from_env();
        std::env::remove_var("CRAWL_MAX_SCROLL_STEPS");

        let err = result.unwrap_err();
        assert!(err.to_string().contains("CRAWL_MAX_SCROLL_STEPS"));
    }
}
