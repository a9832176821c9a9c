use std::cmp::Ordering;

use super::engine::compute_fantasy_score;
use super::weights::ScoringWeights;
use crate::players::PlayerStatRecord;

/// A record with its score and 1-based position from one ranking pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FantasyProjection {
    pub record: PlayerStatRecord,
    pub score: f64,
    pub rank: usize,
}

impl AsRef<PlayerStatRecord> for FantasyProjection {
    fn as_ref(&self) -> &PlayerStatRecord {
        &self.record
    }
}

/// Descending score order with NaN last. Equal scores compare equal so a
/// stable sort keeps their input order.
pub fn by_score_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Score every record and order them by descending fantasy score.
///
/// Ties keep their relative input order, and ranks are dense positions
/// `1..=n`: two equal scores still get consecutive ranks.
pub fn rank_by_fantasy_score(
    records: &[PlayerStatRecord],
    weights: &ScoringWeights,
) -> Vec<FantasyProjection> {
    let scored: Vec<(PlayerStatRecord, f64)> = records
        .iter()
        .map(|r| (r.clone(), compute_fantasy_score(r, weights)))
        .collect();
    rank_scored(scored)
}

/// Rank records that already carry a score.
pub fn rank_scored(mut scored: Vec<(PlayerStatRecord, f64)>) -> Vec<FantasyProjection> {
    // slice::sort_by is stable
    scored.sort_by(|a, b| by_score_desc(a.1, b.1));

    scored
        .into_iter()
        .enumerate()
        .map(|(idx, (record, score))| FantasyProjection {
            record,
            score,
            rank: idx + 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::StatLine;
    use crate::scoring::StatCategory;

    fn record(id: i64, name: &str, points: f64) -> PlayerStatRecord {
        let mut r = PlayerStatRecord::new(id, name, "BOS", "Guard");
        r.projected = Some(StatLine::default().with(StatCategory::Points, points));
        r
    }

    fn points_only() -> ScoringWeights {
        ScoringWeights::zero().with(StatCategory::Points, 1.0)
    }

    #[test]
    fn test_sorted_descending() {
        let records = vec![record(1, "Low", 5.0), record(2, "High", 30.0), record(3, "Mid", 15.0)];
        let ranked = rank_by_fantasy_score(&records, &points_only());
        let names: Vec<_> = ranked.iter().map(|p| p.record.display_name.as_str()).collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);
        assert_eq!(ranked[0].score, 30.0);
    }

    #[test]
    fn test_ties_keep_input_order() {
        // Both score 42.5
        let line = StatLine::default()
            .with(StatCategory::Points, 20.0)
            .with(StatCategory::Rebounds, 10.0)
            .with(StatCategory::Assists, 5.0)
            .with(StatCategory::Steals, 2.0)
            .with(StatCategory::Blocks, 1.0)
            .with(StatCategory::Turnovers, 3.0);
        let mut b = PlayerStatRecord::new(2, "B", "BOS", "Guard");
        b.projected = Some(line);
        let mut a = PlayerStatRecord::new(1, "A", "BOS", "Guard");
        a.projected = Some(line);

        let weights = ScoringWeights::zero()
            .with(StatCategory::Points, 1.0)
            .with(StatCategory::Rebounds, 1.2)
            .with(StatCategory::Assists, 1.5)
            .with(StatCategory::Steals, 2.0)
            .with(StatCategory::Blocks, 2.0)
            .with(StatCategory::Turnovers, -1.0);

        let ranked = rank_by_fantasy_score(&[b, a], &weights);
        assert_eq!(ranked[0].record.display_name, "B");
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].record.display_name, "A");
        assert_eq!(ranked[1].rank, 2);
        assert!((ranked[0].score - 42.5).abs() < 1e-9);
    }

    #[test]
    fn test_ranks_dense() {
        let records = vec![
            record(1, "A", 10.0),
            record(2, "B", 10.0),
            record(3, "C", 20.0),
            record(4, "D", 10.0),
        ];
        let ranked = rank_by_fantasy_score(&records, &points_only());
        let ranks: Vec<_> = ranked.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        let names: Vec<_> = ranked.iter().map(|p| p.record.display_name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B", "D"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank_by_fantasy_score(&[], &points_only()).is_empty());
    }

    #[test]
    fn test_does_not_mutate_input() {
        let records = vec![record(1, "Low", 5.0), record(2, "High", 30.0)];
        let before = records.clone();
        let _ = rank_by_fantasy_score(&records, &points_only());
        assert_eq!(records, before);
    }

    #[test]
    fn test_nan_scores_do_not_panic() {
        let scored = vec![
            (record(1, "A", 0.0), f64::NAN),
            (record(2, "B", 0.0), 3.0),
            (record(3, "C", 0.0), 1.0),
        ];
        let ranked = rank_scored(scored);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].record.person_id, 2);
        assert_eq!(ranked[2].record.person_id, 1);
    }
}
