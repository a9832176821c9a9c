use super::weights::{ScoringWeights, StatCategory};
use crate::players::PlayerStatRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryContribution {
    pub category: StatCategory,
    pub stat: f64,   // Value read from the record's scoring line
    pub weight: f64, // Multiplier applied
    pub points: f64, // stat * weight
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub score: f64,
    pub contributions: Vec<CategoryContribution>,
}

/// Fantasy score of one record: the weighted sum over all fifteen categories.
///
/// Reads the projected line when the record carries one. The result is not
/// rounded; use [`round_to`] for display.
pub fn compute_fantasy_score(record: &PlayerStatRecord, weights: &ScoringWeights) -> f64 {
    let line = record.scoring_line();
    StatCategory::ALL
        .iter()
        .map(|c| line.get(*c) * weights.get(*c))
        .sum()
}

/// Same sum as [`compute_fantasy_score`], itemized per category.
/// Categories with a zero contribution are left out.
pub fn score_breakdown(record: &PlayerStatRecord, weights: &ScoringWeights) -> ScoreBreakdown {
    let line = record.scoring_line();
    let mut score = 0.0;
    let mut contributions = Vec::new();

    for category in StatCategory::ALL {
        let stat = line.get(category);
        let weight = weights.get(category);
        let points = stat * weight;
        score += points;
        if points != 0.0 {
            contributions.push(CategoryContribution {
                category,
                stat,
                weight,
                points,
            });
        }
    }

    ScoreBreakdown {
        score,
        contributions,
    }
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::StatLine;

    fn projected_record(line: StatLine) -> PlayerStatRecord {
        let mut record = PlayerStatRecord::new(1, "Test Player", "LAL", "Forward");
        record.projected = Some(line);
        record
    }

    fn sample_line() -> StatLine {
        StatLine::default()
            .with(StatCategory::Points, 20.0)
            .with(StatCategory::Rebounds, 10.0)
            .with(StatCategory::Assists, 5.0)
            .with(StatCategory::Steals, 2.0)
            .with(StatCategory::Blocks, 1.0)
            .with(StatCategory::Turnovers, 3.0)
    }

    #[test]
    fn test_standard_scenario() {
        // 20 + 12 + 7.5 + 4 + 2 - 3
        let record = projected_record(sample_line());
        let weights = ScoringWeights::zero()
            .with(StatCategory::Points, 1.0)
            .with(StatCategory::Rebounds, 1.2)
            .with(StatCategory::Assists, 1.5)
            .with(StatCategory::Steals, 2.0)
            .with(StatCategory::Blocks, 2.0)
            .with(StatCategory::Turnovers, -1.0);
        let score = compute_fantasy_score(&record, &weights);
        assert!((score - 42.5).abs() < 1e-9, "got {}", score);
    }

    #[test]
    fn test_zero_weights_score_zero() {
        let record = projected_record(sample_line());
        assert_eq!(compute_fantasy_score(&record, &ScoringWeights::zero()), 0.0);
    }

    #[test]
    fn test_empty_record_scores_zero() {
        let record = PlayerStatRecord::new(2, "Bench", "NYK", "Center");
        assert_eq!(compute_fantasy_score(&record, &ScoringWeights::default()), 0.0);
    }

    #[test]
    fn test_current_line_used_without_projection() {
        let mut record = PlayerStatRecord::new(3, "Vet", "MIA", "Guard");
        record.current = StatLine::default().with(StatCategory::Points, 30.0);
        let weights = ScoringWeights::zero().with(StatCategory::Points, 1.0);
        assert_eq!(compute_fantasy_score(&record, &weights), 30.0);
    }

    #[test]
    fn test_shooting_and_fouls_count() {
        let line = StatLine::default()
            .with(StatCategory::FieldGoalsMade, 8.0)
            .with(StatCategory::FieldGoalsAttempted, 16.0)
            .with(StatCategory::PersonalFouls, 4.0);
        let record = projected_record(line);
        let weights = ScoringWeights::zero()
            .with(StatCategory::FieldGoalsMade, 1.0)
            .with(StatCategory::FieldGoalsAttempted, -0.5)
            .with(StatCategory::PersonalFouls, -0.5);
        // 8 - 8 - 2
        assert_eq!(compute_fantasy_score(&record, &weights), -2.0);
    }

    #[test]
    fn test_large_weights_not_capped() {
        let record = projected_record(sample_line());
        let weights = ScoringWeights::zero().with(StatCategory::Points, 1e12);
        assert_eq!(compute_fantasy_score(&record, &weights), 2e13);
    }

    #[test]
    fn test_breakdown_sums_to_score() {
        let record = projected_record(sample_line());
        let weights = ScoringWeights::default();
        let breakdown = score_breakdown(&record, &weights);
        let total: f64 = breakdown.contributions.iter().map(|c| c.points).sum();
        assert!((total - compute_fantasy_score(&record, &weights)).abs() < 1e-9);
        assert!((breakdown.score - total).abs() < 1e-9);
        // Only the six non-zero categories are listed
        assert_eq!(breakdown.contributions.len(), 6);
        assert_eq!(breakdown.contributions[0].category, StatCategory::Points);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(42.456, 2), 42.46);
        assert_eq!(round_to(7.25, 1), 7.3);
        assert_eq!(round_to(-1.005, 0), -1.0);
    }
}
