//! Layered runtime configuration: defaults, then an optional file, then
//! `MATCHCENTRE_`-prefixed environment variables.
//!
//! The file format is inferred from its suffix by the `config` crate, so
//! both `matchcentre.toml` and `matchcentre.yaml` work.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "MATCHCENTRE";

/// Runtime configuration for a match extraction run.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchcentreConfig {
    /// WebDriver endpoint the browser session connects to.
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
    /// Whether to run the browser without a visible window.
    #[serde(default)]
    pub headless: bool,
    /// How long to let the page settle after navigation before capturing
    /// its source, in milliseconds. The embedded match data is written by
    /// page scripts, so capturing too early yields a bare shell.
    #[serde(default = "default_page_settle_ms")]
    pub page_settle_ms: u64,
}

fn default_webdriver_url() -> String {
    "http://localhost:9515".into()
}

fn default_page_settle_ms() -> u64 {
    1500
}

impl Default for MatchcentreConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            headless: false,
            page_settle_ms: default_page_settle_ms(),
        }
    }
}

/// Builder hiding the `config` crate wiring (optional file + env overrides).
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Start with the environment overlay alone. Env vars win over file
    /// values, e.g. `MATCHCENTRE_WEBDRIVER_URL=http://localhost:4444`.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );
        Self { builder }
    }

    /// Attach a config file. Missing files are tolerated so headless
    /// deployments can rely purely on environment variables.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    pub fn load(self) -> Result<MatchcentreConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}
