//! Per-team statistic aggregation.

use std::collections::{HashMap, HashSet};

use matchcentre_common::{Error, Result};
use polars::prelude::*;

use crate::parse::{MatchData, TeamSide};
use crate::util::into_frame;

/// Statistic names whose per-minute values are percentages or rating-like
/// quantities; summing them would be meaningless.
const EXCLUDED_STATS: [&str; 7] = [
    "minutesWithStats",
    "ratings",
    "possession",
    "passSuccess",
    "tackleSuccess",
    "dribbleSuccess",
    "aerialSuccess",
];

/// Sum each retained statistic's per-minute breakdown, truncating to an
/// integer, preserving the document's statistic order.
fn side_totals(side: &TeamSide, label: &str) -> Result<Vec<(String, i64)>> {
    let mut totals = Vec::with_capacity(side.stats.len());
    for (name, breakdown) in &side.stats {
        if EXCLUDED_STATS.contains(&name.as_str()) {
            continue;
        }
        let per_minute = breakdown.as_object().ok_or_else(|| {
            Error::SchemaMismatch(format!("{label} statistic {name} is not a per-minute map"))
        })?;
        let mut total = 0.0;
        for (minute, value) in per_minute {
            total += value.as_f64().ok_or_else(|| {
                Error::SchemaMismatch(format!(
                    "{label} statistic {name} has a non-numeric value at minute {minute}"
                ))
            })?;
        }
        totals.push((name.clone(), total as i64));
    }
    Ok(totals)
}

/// `"<home> : <away>"` → the two integers.
fn parse_score(score: &str) -> Result<(i64, i64)> {
    let (home, away) = score
        .split_once(" : ")
        .ok_or_else(|| Error::SchemaMismatch(format!("unrecognized score format: {score:?}")))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<i64>()
            .map_err(|_| Error::SchemaMismatch(format!("unrecognized score format: {score:?}")))
    };
    Ok((parse(home)?, parse(away)?))
}

/// Two rows, `home` and `away`. Columns: `team`, then `score`, then the
/// union of retained statistic names in first-encountered order (home's
/// names first); a statistic one side never recorded fills as 0.
pub fn team_stats_table(data: &MatchData) -> Result<DataFrame> {
    let centre = data.centre();
    let (home_score, away_score) = parse_score(&centre.score)?;
    let home = side_totals(&centre.home, "home")?;
    let away = side_totals(&centre.away, "away")?;

    let mut order: Vec<&str> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for (name, _) in home.iter().chain(away.iter()) {
        if seen.insert(name.as_str()) {
            order.push(name.as_str());
        }
    }

    let home_totals: HashMap<&str, i64> = home.iter().map(|(n, v)| (n.as_str(), *v)).collect();
    let away_totals: HashMap<&str, i64> = away.iter().map(|(n, v)| (n.as_str(), *v)).collect();

    let mut columns = vec![
        Series::new("team", vec!["home", "away"]),
        Series::new("score", vec![home_score, away_score]),
    ];
    for name in order {
        columns.push(Series::new(
            name,
            vec![
                home_totals.get(name).copied().unwrap_or(0),
                away_totals.get(name).copied().unwrap_or(0),
            ],
        ));
    }

    into_frame(columns)
}
