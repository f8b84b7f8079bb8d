//! Decoding the repaired literal into a typed match document.
//!
//! The schema is deliberately explicit about optionality: every event field
//! that may be absent is an `Option`, and the projectors own the defaults.
//! Loose `get`-chains over a raw tree hide which fields a given record kind
//! actually carries; the record types below are the single place that
//! knowledge lives.

use std::collections::HashMap;

use matchcentre_common::{Error, Result};
use polars::prelude::DataFrame;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{passes, repair, shots, source, stats, MATCH_CENTRE_KEY};

/// A labelled enum value as the page encodes it: `{value: 1, displayName: "Pass"}`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Label {
    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,
}

/// One timeline event. Pass events are recognised by
/// `type.displayName == "Pass"`; shot events by the *presence* of the
/// `isShot` key, whatever its value.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawEvent {
    #[serde(default)]
    pub minute: Option<i64>,
    #[serde(default)]
    pub second: Option<i64>,
    #[serde(default)]
    pub period: Option<Label>,
    #[serde(default, rename = "teamId")]
    pub team_id: Option<i64>,
    #[serde(default, rename = "playerId")]
    pub player_id: Option<i64>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default, rename = "endX")]
    pub end_x: Option<f64>,
    #[serde(default, rename = "endY")]
    pub end_y: Option<f64>,
    #[serde(default, rename = "outcomeType")]
    pub outcome_type: Option<Label>,
    #[serde(default, rename = "type")]
    pub kind: Option<Label>,
    #[serde(default, rename = "isTouch")]
    pub is_touch: Option<bool>,
    /// Key presence is the signal here, so `isShot: null` still counts.
    #[serde(default, rename = "isShot", deserialize_with = "present")]
    pub is_shot: Option<Value>,
    #[serde(default, rename = "blockedX")]
    pub blocked_x: Option<f64>,
    #[serde(default, rename = "blockedY")]
    pub blocked_y: Option<f64>,
    #[serde(default, rename = "goalMouthY")]
    pub goal_mouth_y: Option<f64>,
    #[serde(default, rename = "goalMouthZ")]
    pub goal_mouth_z: Option<f64>,
}

/// `Some` whenever the key was present at all, including `null`.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl RawEvent {
    pub fn is_pass(&self) -> bool {
        self.type_name() == Some("Pass")
    }

    pub fn is_shot_event(&self) -> bool {
        self.is_shot.is_some()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.kind.as_ref()?.display_name.as_deref()
    }

    pub fn period_name(&self) -> Option<&str> {
        self.period.as_ref()?.display_name.as_deref()
    }

    pub fn outcome_name(&self) -> Option<&str> {
        self.outcome_type.as_ref()?.display_name.as_deref()
    }
}

/// Per-team statistics block: statistic name → per-minute breakdown.
///
/// The breakdown values stay as raw JSON because excluded statistics
/// (ratings and the percentage-derived ones) are free to carry shapes the
/// aggregator never reads.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamSide {
    #[serde(default)]
    pub stats: serde_json::Map<String, Value>,
}

/// The `matchCentreData` subtree of the embedded document.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchCentre {
    pub events: Vec<RawEvent>,
    #[serde(rename = "playerIdNameDictionary")]
    pub player_names: HashMap<String, String>,
    pub home: TeamSide,
    pub away: TeamSide,
    /// Full-time score in the page's `"<home> : <away>"` form.
    pub score: String,
}

/// A parsed match document, reusable across any number of projections.
#[derive(Debug, Clone)]
pub struct MatchData {
    centre: MatchCentre,
}

impl MatchData {
    /// Extract and decode the match document embedded in a rendered page.
    pub fn from_page(html: &str) -> Result<Self> {
        let literal = source::locate_embedded_literal(html)?;
        let repaired = repair::quote_object_keys(literal);
        let document: Value = serde_json::from_str(&repaired).map_err(Error::RepairFailed)?;
        Self::from_document(document)
    }

    /// Accept a pre-parsed document, e.g. one cached from an earlier run.
    ///
    /// The same containment rule applies as for a live page: the top-level
    /// object must carry the `matchCentreData` key.
    pub fn from_document(document: Value) -> Result<Self> {
        let Value::Object(mut root) = document else {
            return Err(Error::InputInvalid(
                "match document must be a JSON object".into(),
            ));
        };
        let centre = root.remove(MATCH_CENTRE_KEY).ok_or_else(|| {
            Error::SchemaMismatch(format!("document has no {MATCH_CENTRE_KEY} key"))
        })?;
        let centre: MatchCentre = serde_json::from_value(centre)
            .map_err(|e| Error::SchemaMismatch(format!("{MATCH_CENTRE_KEY}: {e}")))?;
        Ok(Self { centre })
    }

    pub fn centre(&self) -> &MatchCentre {
        &self.centre
    }

    /// All pass events as one table, in timeline order.
    pub fn passes(&self) -> Result<DataFrame> {
        passes::pass_table(self)
    }

    /// All shot events as one table, in timeline order.
    pub fn shots(&self) -> Result<DataFrame> {
        shots::shot_table(self)
    }

    /// Aggregated per-team statistics plus the final score.
    pub fn team_stats(&self) -> Result<DataFrame> {
        stats::team_stats_table(self)
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use serde_json::{json, Value};

    /// A minimal well-formed top-level document around the given pieces.
    pub fn match_document(
        events: Value,
        player_names: Value,
        home_stats: Value,
        away_stats: Value,
        score: &str,
    ) -> Value {
        json!({
            "matchId": 1821372,
            "matchCentreData": {
                "events": events,
                "playerIdNameDictionary": player_names,
                "home": { "stats": home_stats },
                "away": { "stats": away_stats },
                "score": score,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::testutil::match_document;
    use super::*;
    use serde_json::json;

    #[test]
    fn page_round_trip_preserves_events_and_score() {
        let page = r#"<html><script>require.config.params["args"] = {
                matchId: 1821372,
                matchCentreData: {
                    "events": [
                        {"minute": 3, "type": {"displayName": "Pass"}},
                        {"minute": 88, "isShot": true}
                    ],
                    "playerIdNameDictionary": {"101": "A. Keeper"},
                    "home": {"stats": {}},
                    "away": {"stats": {}},
                    "score": "2 : 1"
                },
                matchCentreEventTypeJson: {}
            };</script></html>"#;
        let data = MatchData::from_page(page).unwrap();
        assert_eq!(data.centre().events.len(), 2);
        assert_eq!(data.centre().score, "2 : 1");
        assert!(data.centre().events[0].is_pass());
        assert!(data.centre().events[1].is_shot_event());
    }

    #[test]
    fn document_without_centre_key_is_a_schema_mismatch() {
        let err = MatchData::from_document(json!({"matchId": 1})).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch(_)));
    }

    #[test]
    fn non_object_document_is_invalid_input() {
        let err = MatchData::from_document(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, Error::InputInvalid(_)));
    }

    #[test]
    fn is_shot_null_still_counts_as_present() {
        let event: RawEvent = serde_json::from_value(json!({"isShot": null})).unwrap();
        assert!(event.is_shot_event());

        let event: RawEvent = serde_json::from_value(json!({"minute": 1})).unwrap();
        assert!(!event.is_shot_event());
    }

    #[test]
    fn well_formed_document_parses() {
        let doc = match_document(
            json!([{"minute": 1}]),
            json!({"7": "T. Winger"}),
            json!({}),
            json!({}),
            "0 : 0",
        );
        let data = MatchData::from_document(doc).unwrap();
        assert_eq!(data.centre().player_names.get("7").unwrap(), "T. Winger");
    }
}
