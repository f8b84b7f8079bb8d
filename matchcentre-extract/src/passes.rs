//! Pass-event projection.

use matchcentre_common::Result;
use polars::prelude::*;

use crate::parse::{MatchCentre, MatchData};
use crate::util::into_frame;

/// Fallback label used wherever a pass field carries no value.
pub(crate) const UNKNOWN: &str = "Unknown";

fn resolved_name(centre: &MatchCentre, player_id: Option<i64>) -> String {
    player_id
        .and_then(|id| centre.player_names.get(&id.to_string()))
        .cloned()
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// One row per event whose type label is `"Pass"`, in timeline order.
///
/// Absent fields take explicit defaults (0 for times and coordinates,
/// `"Unknown"` for labels and unresolvable player names, null ids, false
/// touch flag). Zero pass events still yield the full 12-column shape.
pub fn pass_table(data: &MatchData) -> Result<DataFrame> {
    let centre = data.centre();

    let mut minute: Vec<i64> = Vec::new();
    let mut second: Vec<i64> = Vec::new();
    let mut half: Vec<String> = Vec::new();
    let mut team_id: Vec<Option<i64>> = Vec::new();
    let mut player_id: Vec<Option<i64>> = Vec::new();
    let mut player_name: Vec<String> = Vec::new();
    let mut x: Vec<f64> = Vec::new();
    let mut y: Vec<f64> = Vec::new();
    let mut end_x: Vec<f64> = Vec::new();
    let mut end_y: Vec<f64> = Vec::new();
    let mut outcome: Vec<String> = Vec::new();
    let mut is_touch: Vec<bool> = Vec::new();

    for event in centre.events.iter().filter(|e| e.is_pass()) {
        minute.push(event.minute.unwrap_or(0));
        second.push(event.second.unwrap_or(0));
        half.push(event.period_name().unwrap_or(UNKNOWN).to_string());
        team_id.push(event.team_id);
        player_id.push(event.player_id);
        player_name.push(resolved_name(centre, event.player_id));
        x.push(event.x.unwrap_or(0.0));
        y.push(event.y.unwrap_or(0.0));
        end_x.push(event.end_x.unwrap_or(0.0));
        end_y.push(event.end_y.unwrap_or(0.0));
        outcome.push(event.outcome_name().unwrap_or(UNKNOWN).to_string());
        is_touch.push(event.is_touch.unwrap_or(false));
    }

    into_frame(vec![
        Series::new("minute", minute),
        Series::new("second", second),
        Series::new("half", half),
        Series::new("teamId", team_id),
        Series::new("playerId", player_id),
        Series::new("playerName", player_name),
        Series::new("x", x),
        Series::new("y", y),
        Series::new("endX", end_x),
        Series::new("endY", end_y),
        Series::new("outcome", outcome),
        Series::new("isTouch", is_touch),
    ])
}

#[cfg(test)]
mod tests {
    use crate::parse::testutil::match_document;
    use crate::parse::MatchData;
    use serde_json::json;

    #[test]
    fn selects_pass_events_in_order_with_defaults() {
        let doc = match_document(
            json!([
                {
                    "minute": 3, "second": 12,
                    "period": {"displayName": "FirstHalf"},
                    "teamId": 26, "playerId": 101,
                    "x": 45.0, "y": 30.5, "endX": 60.1, "endY": 33.0,
                    "type": {"displayName": "Pass"},
                    "outcomeType": {"displayName": "Successful"},
                    "isTouch": true
                },
                {"minute": 5, "type": {"displayName": "Foul"}},
                {"type": {"displayName": "Pass"}}
            ]),
            json!({"101": "B. Playmaker"}),
            json!({}),
            json!({}),
            "0 : 0",
        );
        let df = MatchData::from_document(doc).unwrap().passes().unwrap();

        assert_eq!(df.height(), 2);
        let minutes = df.column("minute").unwrap().i64().unwrap();
        assert_eq!(minutes.get(0), Some(3));
        assert_eq!(minutes.get(1), Some(0));

        let names = df.column("playerName").unwrap().str().unwrap();
        assert_eq!(names.get(0), Some("B. Playmaker"));
        assert_eq!(names.get(1), Some("Unknown"));

        let halves = df.column("half").unwrap().str().unwrap();
        assert_eq!(halves.get(0), Some("FirstHalf"));
        assert_eq!(halves.get(1), Some("Unknown"));

        let team_ids = df.column("teamId").unwrap().i64().unwrap();
        assert_eq!(team_ids.get(0), Some(26));
        assert_eq!(team_ids.get(1), None);

        let xs = df.column("x").unwrap().f64().unwrap();
        assert_eq!(xs.get(1), Some(0.0));

        let touch = df.column("isTouch").unwrap().bool().unwrap();
        assert_eq!(touch.get(0), Some(true));
        assert_eq!(touch.get(1), Some(false));
    }

    #[test]
    fn no_pass_events_still_gives_the_stable_shape() {
        let doc = match_document(
            json!([{"minute": 5, "isShot": true, "playerId": 7}]),
            json!({"7": "S. Striker"}),
            json!({}),
            json!({}),
            "0 : 0",
        );
        let df = MatchData::from_document(doc).unwrap().passes().unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(
            df.get_column_names(),
            vec![
                "minute",
                "second",
                "half",
                "teamId",
                "playerId",
                "playerName",
                "x",
                "y",
                "endX",
                "endY",
                "outcome",
                "isTouch"
            ]
        );
    }

    #[test]
    fn pass_that_is_also_a_shot_lands_in_both_tables() {
        let doc = match_document(
            json!([{
                "minute": 90,
                "playerId": 7,
                "type": {"displayName": "Pass"},
                "isShot": true
            }]),
            json!({"7": "S. Striker"}),
            json!({}),
            json!({}),
            "1 : 0",
        );
        let data = MatchData::from_document(doc).unwrap();
        assert_eq!(data.passes().unwrap().height(), 1);
        assert_eq!(data.shots().unwrap().height(), 1);
    }
}
