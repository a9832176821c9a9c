use serde::Serialize;

use super::engine::{compute_fantasy_score, round_to};
use super::ranking::{rank_scored, FantasyProjection};
use super::weights::{ScoringWeights, StatCategory};
use crate::players::PlayerStatRecord;

/// Weight of the trailing five-game average in a blended estimate.
pub const RECENT_WEIGHT: f64 = 0.7;
/// Weight of the season average. `RECENT_WEIGHT + SEASON_WEIGHT == 1.0`.
pub const SEASON_WEIGHT: f64 = 0.3;

/// Forward estimate for the six core categories, one decimal each.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CoreProjection {
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub turnovers: f64,
}

impl CoreProjection {
    pub fn get(&self, category: StatCategory) -> Option<f64> {
        match category {
            StatCategory::Points => Some(self.points),
            StatCategory::Rebounds => Some(self.rebounds),
            StatCategory::Assists => Some(self.assists),
            StatCategory::Steals => Some(self.steals),
            StatCategory::Blocks => Some(self.blocks),
            StatCategory::Turnovers => Some(self.turnovers),
            _ => None,
        }
    }
}

/// Blend one category. Falls back to the season value when the recent
/// average is missing or the blend comes out zero or non-finite.
pub fn blend(recent: Option<f64>, season: f64) -> f64 {
    let blended = match recent {
        Some(recent) => RECENT_WEIGHT * recent + SEASON_WEIGHT * season,
        None => return round_to(season, 1),
    };
    if blended == 0.0 || !blended.is_finite() {
        round_to(season, 1)
    } else {
        round_to(blended, 1)
    }
}

/// Blend recent form with the season line for the six core categories.
///
/// The season value is the record's current line; recent form comes from the
/// record's five-game averages.
pub fn synthesize_projection(record: &PlayerStatRecord) -> CoreProjection {
    let season = &record.current;
    let recent = &record.recent;
    CoreProjection {
        points: blend(recent.points, season.points),
        rebounds: blend(recent.rebounds, season.rebounds),
        assists: blend(recent.assists, season.assists),
        steals: blend(recent.steals, season.steals),
        blocks: blend(recent.blocks, season.blocks),
        turnovers: blend(recent.turnovers, season.turnovers),
    }
}

/// Copy of `record` whose scoring line has the six core categories replaced
/// by the synthesized projection. The other nine categories are untouched.
pub fn apply_projection(record: &PlayerStatRecord, projection: &CoreProjection) -> PlayerStatRecord {
    let mut line = *record.scoring_line();
    for category in StatCategory::CORE {
        if let Some(value) = projection.get(category) {
            line = line.with(category, value);
        }
    }
    let mut out = record.clone();
    out.projected = Some(line);
    out
}

/// Synthesize, score and rank every record.
pub fn generate_fantasy_projections(
    records: &[PlayerStatRecord],
    weights: &ScoringWeights,
) -> Vec<FantasyProjection> {
    let scored = records
        .iter()
        .map(|r| {
            let blended = apply_projection(r, &synthesize_projection(r));
            let score = compute_fantasy_score(&blended, weights);
            (blended, score)
        })
        .collect();
    rank_scored(scored)
}
