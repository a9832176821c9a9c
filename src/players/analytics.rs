use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::types::PlayerStatRecord;
use crate::scoring::{by_score_desc, round_to, StatCategory};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionAverages {
    pub avg_points: f64,
    pub avg_rebounds: f64,
    pub avg_assists: f64,
    pub avg_steals: f64,
    pub avg_blocks: f64,
    pub player_count: usize,
}

/// Number of players per position.
pub fn position_breakdown<T: AsRef<PlayerStatRecord>>(records: &[T]) -> BTreeMap<String, usize> {
    let mut breakdown = BTreeMap::new();
    for record in records {
        *breakdown
            .entry(record.as_ref().position.clone())
            .or_insert(0) += 1;
    }
    breakdown
}

/// Per-position averages of the scoring line, one decimal each.
pub fn average_stats_by_position<T: AsRef<PlayerStatRecord>>(
    records: &[T],
) -> BTreeMap<String, PositionAverages> {
    // position -> (totals for points..blocks, count)
    let mut totals: BTreeMap<String, ([f64; 5], usize)> = BTreeMap::new();
    let categories = [
        StatCategory::Points,
        StatCategory::Rebounds,
        StatCategory::Assists,
        StatCategory::Steals,
        StatCategory::Blocks,
    ];

    for record in records {
        let record = record.as_ref();
        let entry = totals
            .entry(record.position.clone())
            .or_insert(([0.0; 5], 0));
        for (slot, category) in entry.0.iter_mut().zip(categories.iter()) {
            *slot += record.stat(*category);
        }
        entry.1 += 1;
    }

    totals
        .into_iter()
        .map(|(position, (sums, count))| {
            let avg = |i: usize| round_to(sums[i] / count as f64, 1);
            (
                position,
                PositionAverages {
                    avg_points: avg(0),
                    avg_rebounds: avg(1),
                    avg_assists: avg(2),
                    avg_steals: avg(3),
                    avg_blocks: avg(4),
                    player_count: count,
                },
            )
        })
        .collect()
}

/// First `count` items of an already ranked sequence.
pub fn top_projections<T: Clone>(ranked: &[T], count: usize) -> Vec<T> {
    ranked.iter().take(count).cloned().collect()
}

/// The `count` records with the highest value in `category`; ties keep input order.
pub fn top_by_category<'a, T: AsRef<PlayerStatRecord>>(
    records: &'a [T],
    category: StatCategory,
    count: usize,
) -> Vec<&'a PlayerStatRecord> {
    let mut refs: Vec<&PlayerStatRecord> = records.iter().map(|r| r.as_ref()).collect();
    refs.sort_by(|a, b| by_score_desc(a.stat(category), b.stat(category)));
    refs.truncate(count);
    refs
}

/// Sorted, de-duplicated team abbreviations (empty values dropped).
pub fn unique_teams<T: AsRef<PlayerStatRecord>>(records: &[T]) -> Vec<String> {
    unique_by(records, |r| &r.team)
}

/// Sorted, de-duplicated positions (empty values dropped).
pub fn unique_positions<T: AsRef<PlayerStatRecord>>(records: &[T]) -> Vec<String> {
    unique_by(records, |r| &r.position)
}

fn unique_by<T, F>(records: &[T], field: F) -> Vec<String>
where
    T: AsRef<PlayerStatRecord>,
    F: Fn(&PlayerStatRecord) -> &String,
{
    records
        .iter()
        .map(|r| field(r.as_ref()))
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
