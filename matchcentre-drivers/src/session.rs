//! Thin wrapper around a `fantoccini` WebDriver client.

use anyhow::anyhow;
use fantoccini::{Client, ClientBuilder};
use matchcentre_common::config::MatchcentreConfig;
use matchcentre_common::Result;
use serde_json::json;
use tracing::debug;
use webdriver::capabilities::Capabilities;

/// A live browser session.
///
/// Acquire with [`MatchBrowser::connect`], release with
/// [`MatchBrowser::close`]. Every driver-level failure surfaces as
/// [`Error::Session`], which callers may treat as retryable.
///
/// [`Error::Session`]: matchcentre_common::Error::Session
pub struct MatchBrowser {
    client: Client,
}

impl MatchBrowser {
    /// Connect to the configured WebDriver endpoint (Chromedriver by
    /// default) and open a fresh browser session.
    pub async fn connect(config: &MatchcentreConfig) -> Result<Self> {
        debug!(
            target: "driver.browser",
            endpoint = %config.webdriver_url,
            headless = config.headless,
            "opening browser session"
        );
        let client = ClientBuilder::native()
            .capabilities(chrome_capabilities(config.headless))
            .connect(&config.webdriver_url)
            .await
            .map_err(|e| anyhow!(e))?;
        Ok(Self { client })
    }

    /// Navigate the session to `url`.
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.client.goto(url).await.map_err(|e| anyhow!(e))?;
        Ok(())
    }

    /// Return the rendered page source.
    pub async fn page_source(&self) -> Result<String> {
        let source = self.client.source().await.map_err(|e| anyhow!(e))?;
        Ok(source)
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await.map_err(|e| anyhow!(e))?;
        Ok(())
    }
}

/// Chromedriver capabilities for a session. Headless runs also disable the
/// GPU, which chromedriver wants on most CI hosts.
pub fn chrome_capabilities(headless: bool) -> Capabilities {
    let mut args: Vec<&str> = Vec::new();
    if headless {
        args.push("--headless");
        args.push("--disable-gpu");
    }

    let mut caps = Capabilities::new();
    caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    caps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_capabilities_carry_the_switches() {
        let caps = chrome_capabilities(true);
        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(args.iter().any(|a| a == "--headless"));
        assert!(args.iter().any(|a| a == "--disable-gpu"));
    }

    #[test]
    fn headed_capabilities_are_plain() {
        let caps = chrome_capabilities(false);
        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(args.is_empty());
    }
}
