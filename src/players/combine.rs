use std::collections::HashMap;
use tracing::debug;

use super::types::{ModelType, PlayerStatRecord, RecentForm, StatLine};
use crate::api::{PredictionRecord, RosterRecord};

/// Season line and recent form from a roster row. Missing numbers become 0.
pub fn record_from_roster(roster: &RosterRecord) -> PlayerStatRecord {
    let v = |x: Option<f64>| finite_or_zero(x);
    PlayerStatRecord {
        person_id: roster.person_id,
        display_name: roster.display_name.clone().unwrap_or_default(),
        team: roster.team.clone().unwrap_or_default(),
        position: roster.position.clone().unwrap_or_default(),
        height: roster.height.clone().unwrap_or_default(),
        weight: roster.weight.filter(|w| w.is_finite()),
        current: StatLine {
            points: v(roster.points),
            rebounds: v(roster.rebounds),
            assists: v(roster.assists),
            steals: v(roster.steals),
            blocks: v(roster.blocks),
            turnovers: v(roster.turnovers),
            field_goals_made: v(roster.field_goals_made),
            field_goals_attempted: v(roster.field_goals_attempted),
            three_points_made: v(roster.three_points_made),
            three_points_attempted: v(roster.three_points_attempted),
            free_throws_made: v(roster.free_throws_made),
            free_throws_attempted: v(roster.free_throws_attempted),
            offensive_rebounds: v(roster.offensive_rebounds),
            defensive_rebounds: v(roster.defensive_rebounds),
            personal_fouls: v(roster.personal_fouls),
            minutes: v(roster.minutes),
        },
        projected: None,
        recent: RecentForm {
            points: roster.points_5g_avg,
            rebounds: roster.rebounds_5g_avg,
            assists: roster.assists_5g_avg,
            steals: roster.steals_5g_avg,
            blocks: roster.blocks_5g_avg,
            turnovers: roster.turnovers_5g_avg,
        },
        efficiency: roster.efficiency.filter(|e| e.is_finite()),
        usage_rate: None,
        model: None,
    }
}

/// Forecast line from a prediction row (`next_*` columns).
pub fn projected_line(prediction: &PredictionRecord) -> StatLine {
    let v = |x: Option<f64>| finite_or_zero(x);
    StatLine {
        points: v(prediction.points),
        rebounds: v(prediction.rebounds),
        assists: v(prediction.assists),
        steals: v(prediction.steals),
        blocks: v(prediction.blocks),
        turnovers: v(prediction.turnovers),
        field_goals_made: v(prediction.field_goals_made),
        field_goals_attempted: v(prediction.field_goals_attempted),
        three_points_made: v(prediction.three_points_made),
        three_points_attempted: v(prediction.three_points_attempted),
        free_throws_made: v(prediction.free_throws_made),
        free_throws_attempted: v(prediction.free_throws_attempted),
        offensive_rebounds: v(prediction.offensive_rebounds),
        defensive_rebounds: v(prediction.defensive_rebounds),
        personal_fouls: v(prediction.personal_fouls),
        minutes: v(prediction.minutes),
    }
}

/// Join predictions to roster rows by person id.
///
/// Output follows prediction order. Predictions whose player is not on the
/// roster are dropped.
pub fn combine_records(
    roster: &[RosterRecord],
    predictions: &[PredictionRecord],
    model: ModelType,
) -> Vec<PlayerStatRecord> {
    let by_id: HashMap<i64, &RosterRecord> = roster.iter().map(|r| (r.person_id, r)).collect();
    let mut dropped = 0usize;

    let combined: Vec<PlayerStatRecord> = predictions
        .iter()
        .filter_map(|prediction| {
            let Some(player) = by_id.get(&prediction.person_id) else {
                dropped += 1;
                return None;
            };
            let mut record = record_from_roster(player);
            record.projected = Some(projected_line(prediction));
            if prediction.efficiency.is_some_and(f64::is_finite) {
                record.efficiency = prediction.efficiency;
            }
            record.usage_rate = prediction.usage_rate.filter(|u| u.is_finite());
            record.model = Some(model);
            Some(record)
        })
        .collect();

    if dropped > 0 {
        debug!(model = %model, dropped, "predictions without a roster entry");
    }
    combined
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}
