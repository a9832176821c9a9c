pub mod engine;
pub mod projection;
pub mod ranking;
pub mod validation;
pub mod weights;

pub use engine::{compute_fantasy_score, round_to, score_breakdown, CategoryContribution, ScoreBreakdown};
pub use projection::{generate_fantasy_projections, synthesize_projection, CoreProjection};
pub use ranking::{by_score_desc, rank_by_fantasy_score, rank_scored, FantasyProjection};
pub use validation::{parse_weight, validate_weights};
pub use weights::{ScoringWeights, StatCategory, WeightPreset};
