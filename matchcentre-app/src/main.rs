use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use matchcentre_common::config::{ConfigLoader, MatchcentreConfig};
use matchcentre_common::observability::{init_logging, LogConfig};
use matchcentre_drivers::WebDriverFetcher;
use matchcentre_extract::{fetch_match_data, MatchData};
use polars::prelude::*;
use tracing::info;

/// Extract pass, shot and team-stat tables from a match centre page.
#[derive(Debug, Parser)]
#[command(name = "matchcentre", version)]
struct Cli {
    /// Live match centre address to scrape.
    address: Option<String>,

    /// Pre-fetched match document (JSON file) to reprocess offline.
    #[arg(long, value_name = "FILE", conflicts_with = "address")]
    input: Option<PathBuf>,

    /// Write passes.csv, shots.csv and team_stats.csv here instead of
    /// printing the tables.
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Run the browser without a visible window.
    #[arg(long)]
    headless: bool,

    /// WebDriver endpoint, e.g. http://localhost:9515.
    #[arg(long, env = "MATCHCENTRE_WEBDRIVER_URL")]
    webdriver_url: Option<String>,

    /// Optional config file (TOML or YAML).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Duplicate log output to stderr.
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LogConfig {
        emit_stderr: cli.verbose,
        ..LogConfig::default()
    })?;

    let config = load_config(&cli)?;
    let data = load_match(&cli, config).await?;

    let mut passes = data.passes()?;
    let mut shots = data.shots()?;
    let mut team_stats = data.team_stats()?;

    match &cli.out {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
            write_csv(&dir.join("passes.csv"), &mut passes)?;
            write_csv(&dir.join("shots.csv"), &mut shots)?;
            write_csv(&dir.join("team_stats.csv"), &mut team_stats)?;
            info!(out = %dir.display(), "wrote match tables");
        }
        None => {
            println!("passes\n{passes}\n");
            println!("shots\n{shots}\n");
            println!("team stats\n{team_stats}");
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<MatchcentreConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    let mut config = loader.load().context("loading configuration")?;

    // CLI switches win over file and environment.
    if let Some(url) = &cli.webdriver_url {
        config.webdriver_url = url.clone();
    }
    if cli.headless {
        config.headless = true;
    }
    Ok(config)
}

async fn load_match(cli: &Cli, config: MatchcentreConfig) -> Result<MatchData> {
    match (&cli.address, &cli.input) {
        (Some(address), None) => {
            let fetcher = WebDriverFetcher::new(config);
            Ok(fetch_match_data(address, &fetcher).await?)
        }
        (None, Some(path)) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let document = serde_json::from_str(&text)
                .with_context(|| format!("decoding {}", path.display()))?;
            Ok(MatchData::from_document(document)?)
        }
        _ => bail!("provide a match centre address or --input FILE"),
    }
}

fn write_csv(path: &Path, table: &mut DataFrame) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(file)
        .finish(table)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
