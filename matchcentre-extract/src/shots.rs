//! Shot-event projection.

use matchcentre_common::{Error, Result};
use polars::prelude::*;

use crate::parse::{MatchCentre, MatchData, RawEvent};
use crate::util::into_frame;

/// Shots must resolve to a named player; an unmapped or missing id is a
/// schema failure rather than a silent `"Unknown"` — unlike passes, where
/// the name is cosmetic, downstream shot analysis keys on the shooter.
fn shooter_name(centre: &MatchCentre, event: &RawEvent) -> Result<String> {
    let id = event
        .player_id
        .ok_or_else(|| Error::SchemaMismatch("shot event carries no playerId".into()))?;
    centre
        .player_names
        .get(&id.to_string())
        .cloned()
        .ok_or_else(|| Error::SchemaMismatch(format!("no player name for id {id}")))
}

/// One row per event carrying the `isShot` key, in timeline order.
///
/// Selection is by key presence, not value: `isShot: false` still counts.
/// Blocked-shot and goal-mouth coordinates stay null when the page omits
/// them (unblocked shots, shots that never reach the frame).
pub fn shot_table(data: &MatchData) -> Result<DataFrame> {
    let centre = data.centre();

    let mut minute: Vec<Option<i64>> = Vec::new();
    let mut second: Vec<Option<i64>> = Vec::new();
    let mut team_id: Vec<Option<i64>> = Vec::new();
    let mut player_id: Vec<Option<i64>> = Vec::new();
    let mut player_name: Vec<String> = Vec::new();
    let mut x: Vec<Option<f64>> = Vec::new();
    let mut y: Vec<Option<f64>> = Vec::new();
    let mut period: Vec<Option<String>> = Vec::new();
    let mut kind: Vec<Option<String>> = Vec::new();
    let mut blocked_x: Vec<Option<f64>> = Vec::new();
    let mut blocked_y: Vec<Option<f64>> = Vec::new();
    let mut goal_mouth_z: Vec<Option<f64>> = Vec::new();
    let mut goal_mouth_y: Vec<Option<f64>> = Vec::new();

    for event in centre.events.iter().filter(|e| e.is_shot_event()) {
        player_name.push(shooter_name(centre, event)?);
        minute.push(event.minute);
        second.push(event.second);
        team_id.push(event.team_id);
        player_id.push(event.player_id);
        x.push(event.x);
        y.push(event.y);
        period.push(event.period_name().map(str::to_string));
        kind.push(event.type_name().map(str::to_string));
        blocked_x.push(event.blocked_x);
        blocked_y.push(event.blocked_y);
        goal_mouth_z.push(event.goal_mouth_z);
        goal_mouth_y.push(event.goal_mouth_y);
    }

    into_frame(vec![
        Series::new("minute", minute),
        Series::new("second", second),
        Series::new("teamId", team_id),
        Series::new("playerId", player_id),
        Series::new("playerName", player_name),
        Series::new("x", x),
        Series::new("y", y),
        Series::new("period", period),
        Series::new("type", kind),
        Series::new("blockedX", blocked_x),
        Series::new("blockedY", blocked_y),
        Series::new("goalMouthZ", goal_mouth_z),
        Series::new("goalMouthY", goal_mouth_y),
    ])
}
