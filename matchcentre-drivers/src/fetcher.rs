//! The acquisition seam between browser plumbing and extraction.

use std::time::Duration;

use async_trait::async_trait;
use matchcentre_common::config::MatchcentreConfig;
use matchcentre_common::Result;
use tracing::{info, warn};

use crate::session::MatchBrowser;

/// Anything that can turn an address into rendered document text.
///
/// The extraction crate only ever talks to this trait, which keeps the
/// WebDriver dependency out of its tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Return the rendered document text for `url`.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Concrete fetcher backed by a fantoccini WebDriver session.
///
/// Each call owns one session for its whole lifetime: acquire, navigate,
/// capture, and release — the release happens on every exit path, including
/// navigation and capture failures.
pub struct WebDriverFetcher {
    config: MatchcentreConfig,
}

impl WebDriverFetcher {
    pub fn new(config: MatchcentreConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl PageFetcher for WebDriverFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let browser = MatchBrowser::connect(&self.config).await?;

        // Capture first, then always release the session, then report.
        let captured = capture_rendered(&browser, url, self.config.page_settle_ms).await;
        if let Err(e) = browser.close().await {
            warn!(target: "driver.browser", error = %e, "browser session did not close cleanly");
        }

        if let Ok(html) = &captured {
            info!(
                target: "driver.browser",
                url = %url,
                bytes = html.len(),
                "captured rendered match page"
            );
        }
        captured
    }
}

async fn capture_rendered(browser: &MatchBrowser, url: &str, settle_ms: u64) -> Result<String> {
    browser.goto(url).await?;
    // TODO: replace the fixed settle delay with a wait for the embedded
    // args script to show up in the page source.
    tokio::time::sleep(Duration::from_millis(settle_ms)).await;
    browser.page_source().await
}
