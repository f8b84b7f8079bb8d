//! Extraction of tabular match data from a match centre page.
//!
//! Pipeline: a rendered page (acquired through a
//! [`matchcentre_drivers::PageFetcher`]) → locate the embedded object
//! literal ([`source`]) → repair its bare keys into strict JSON
//! ([`repair`]) → decode into a typed document ([`parse`]) → project into
//! pass, shot and team-stat tables ([`passes`], [`shots`], [`stats`]).
//!
//! A caller holding a cached document can skip acquisition entirely via
//! [`MatchData::from_document`], and one [`MatchData`] serves all three
//! projections without re-fetching.

pub mod parse;
pub mod passes;
pub mod repair;
pub mod shots;
pub mod source;
pub mod stats;

use matchcentre_drivers::PageFetcher;
use serde_json::Value;
use tracing::info;

pub use matchcentre_common::{Error, Result};
pub use parse::{Label, MatchCentre, MatchData, RawEvent, TeamSide};

/// Key whose presence marks a document as carrying match data.
pub(crate) const MATCH_CENTRE_KEY: &str = "matchCentreData";

/// Zero-indexed position of the `Live` segment in a match centre address.
const LIVE_SEGMENT_INDEX: usize = 5;

pub(crate) mod util {
    use matchcentre_common::{Error, Result};
    use polars::prelude::*;

    pub(crate) fn into_frame(columns: Vec<Series>) -> Result<DataFrame> {
        DataFrame::new(columns).map_err(|e| Error::Tabular(e.to_string()))
    }
}

/// Either of the two accepted inputs: a live match centre address, or a
/// pre-parsed document from an earlier run.
#[derive(Debug, Clone)]
pub enum MatchInput {
    Address(String),
    Document(Value),
}

/// Check the address shape without touching the network: a match centre
/// address carries `Live` as its 6th `/`-delimited segment.
pub fn validate_match_address(address: &str) -> Result<()> {
    if address.split('/').nth(LIVE_SEGMENT_INDEX) != Some("Live") {
        return Err(Error::InputInvalid(format!(
            "not a live match centre address: {address}"
        )));
    }
    Ok(())
}

/// Fetch a match centre page and decode its embedded match document.
///
/// The address shape is validated first; a malformed address never causes
/// a fetch.
pub async fn fetch_match_data(address: &str, fetcher: &dyn PageFetcher) -> Result<MatchData> {
    validate_match_address(address)?;
    let html = fetcher.fetch(address).await?;
    let data = MatchData::from_page(&html)?;
    info!(
        target: "extract",
        address = %address,
        events = data.centre().events.len(),
        "parsed match document"
    );
    Ok(data)
}

/// Resolve either input kind into a reusable [`MatchData`].
pub async fn resolve_match_input(input: MatchInput, fetcher: &dyn PageFetcher) -> Result<MatchData> {
    match input {
        MatchInput::Address(address) => fetch_match_data(&address, fetcher).await,
        MatchInput::Document(document) => MatchData::from_document(document),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const LIVE_ADDRESS: &str =
        "https://example.com/Matches/1821372/Live/England-Premier-League-Arsenal-Liverpool";

    struct CountingFetcher {
        calls: AtomicUsize,
        body: String,
    }

    impl CountingFetcher {
        fn returning(body: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                body: body.to_string(),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageFetcher for CountingFetcher {
        async fn fetch(&self, _address: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }
    }

    #[test]
    fn live_segment_is_required_at_position_five() {
        assert!(validate_match_address(LIVE_ADDRESS).is_ok());
        assert!(validate_match_address("https://example.com/Matches/1821372/Show/x").is_err());
        assert!(validate_match_address("https://example.com/short").is_err());
        // `Live` elsewhere in the path does not qualify.
        assert!(validate_match_address("https://example.com/Live/a/b/c/d").is_err());
    }

    #[tokio::test]
    async fn invalid_address_fails_before_any_fetch() {
        let fetcher = CountingFetcher::returning("");
        let err = fetch_match_data("https://example.com/not/a/match", &fetcher)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InputInvalid(_)));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn valid_address_fetches_once_and_parses() {
        let page = r#"<script>require.config.params["args"] = {
            matchCentreData: {
                "events": [{"minute": 1, "type": {"displayName": "Pass"}}],
                "playerIdNameDictionary": {},
                "home": {"stats": {}},
                "away": {"stats": {}},
                "score": "0 : 0"
            }
        };</script>"#;
        let fetcher = CountingFetcher::returning(page);
        let data = fetch_match_data(LIVE_ADDRESS, &fetcher).await.unwrap();
        assert_eq!(fetcher.calls(), 1);
        assert_eq!(data.centre().events.len(), 1);
    }

    #[tokio::test]
    async fn page_without_marker_is_unavailable_not_partial() {
        let page = r#"<script>require.config.params["args"] = { other: 1 };</script>"#;
        let fetcher = CountingFetcher::returning(page);
        let err = fetch_match_data(LIVE_ADDRESS, &fetcher).await.unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn document_input_never_fetches() {
        let doc = serde_json::json!({
            "matchCentreData": {
                "events": [],
                "playerIdNameDictionary": {},
                "home": {"stats": {}},
                "away": {"stats": {}},
                "score": "0 : 0"
            }
        });
        let fetcher = CountingFetcher::returning("");
        let data = resolve_match_input(MatchInput::Document(doc), &fetcher)
            .await
            .unwrap();
        assert_eq!(fetcher.calls(), 0);
        assert!(data.centre().events.is_empty());
    }
}
