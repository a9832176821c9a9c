use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::scoring::StatCategory;

/// Prediction source offered by the stats API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    Bayesian,
    Ridge,
    Lightgbm,
    Xgboost,
    Lstm,
    Transformer,
    EnsembleSimple,
    #[default]
    EnsembleWeighted,
    EnsembleStacking,
}

impl ModelType {
    pub const ALL: [ModelType; 9] = [
        ModelType::Bayesian,
        ModelType::Ridge,
        ModelType::Lightgbm,
        ModelType::Xgboost,
        ModelType::Lstm,
        ModelType::Transformer,
        ModelType::EnsembleSimple,
        ModelType::EnsembleWeighted,
        ModelType::EnsembleStacking,
    ];

    /// Path segment used by `/predictions/{model}`
    pub fn slug(&self) -> &'static str {
        match self {
            ModelType::Bayesian => "bayesian",
            ModelType::Ridge => "ridge",
            ModelType::Lightgbm => "lightgbm",
            ModelType::Xgboost => "xgboost",
            ModelType::Lstm => "lstm",
            ModelType::Transformer => "transformer",
            ModelType::EnsembleSimple => "ensemble_simple",
            ModelType::EnsembleWeighted => "ensemble_weighted",
            ModelType::EnsembleStacking => "ensemble_stacking",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ModelType::Bayesian => "Bayesian Regression",
            ModelType::Ridge => "Ridge Regression",
            ModelType::Lightgbm => "LightGBM",
            ModelType::Xgboost => "XGBoost",
            ModelType::Lstm => "LSTM Neural Network",
            ModelType::Transformer => "Transformer Neural Network",
            ModelType::EnsembleSimple => "Simple Ensemble",
            ModelType::EnsembleWeighted => "Weighted Ensemble",
            ModelType::EnsembleStacking => "Stacking Ensemble",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ModelType::Bayesian => "Probabilistic regression with a matrix-normal prior",
            ModelType::Ridge => "Linear regression with L2 regularization",
            ModelType::Lightgbm => "Gradient boosting framework optimized for speed and memory",
            ModelType::Xgboost => "Extreme gradient boosting with advanced regularization",
            ModelType::Lstm => "Long Short-Term Memory neural network for sequence modeling",
            ModelType::Transformer => "Transformer architecture with self-attention",
            ModelType::EnsembleSimple => "Simple average of all individual model predictions",
            ModelType::EnsembleWeighted => "Weighted average of individual model predictions",
            ModelType::EnsembleStacking => "Meta-learning ensemble using stacking",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        match ModelType::ALL
            .iter()
            .find(|m| m.slug().eq_ignore_ascii_case(s))
        {
            Some(model) => Ok(*model),
            None => bail!("Unknown model '{}'. Run `fantasy-hoops models` to list them.", s),
        }
    }

    /// Next model in `ALL`, wrapping around
    pub fn next(&self) -> Self {
        let idx = ModelType::ALL.iter().position(|m| m == self).unwrap_or(0);
        ModelType::ALL[(idx + 1) % ModelType::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let idx = ModelType::ALL.iter().position(|m| m == self).unwrap_or(0);
        ModelType::ALL[(idx + ModelType::ALL.len() - 1) % ModelType::ALL.len()]
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// One value per scoring category, plus minutes. Absent values are 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StatLine {
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub turnovers: f64,
    pub field_goals_made: f64,
    pub field_goals_attempted: f64,
    pub three_points_made: f64,
    pub three_points_attempted: f64,
    pub free_throws_made: f64,
    pub free_throws_attempted: f64,
    pub offensive_rebounds: f64,
    pub defensive_rebounds: f64,
    pub personal_fouls: f64,
    pub minutes: f64,
}

impl StatLine {
    pub fn get(&self, category: StatCategory) -> f64 {
        match category {
            StatCategory::Points => self.points,
            StatCategory::Rebounds => self.rebounds,
            StatCategory::Assists => self.assists,
            StatCategory::Steals => self.steals,
            StatCategory::Blocks => self.blocks,
            StatCategory::Turnovers => self.turnovers,
            StatCategory::FieldGoalsMade => self.field_goals_made,
            StatCategory::FieldGoalsAttempted => self.field_goals_attempted,
            StatCategory::ThreePointsMade => self.three_points_made,
            StatCategory::ThreePointsAttempted => self.three_points_attempted,
            StatCategory::FreeThrowsMade => self.free_throws_made,
            StatCategory::FreeThrowsAttempted => self.free_throws_attempted,
            StatCategory::OffensiveRebounds => self.offensive_rebounds,
            StatCategory::DefensiveRebounds => self.defensive_rebounds,
            StatCategory::PersonalFouls => self.personal_fouls,
        }
    }

    pub fn with(mut self, category: StatCategory, value: f64) -> Self {
        let slot = match category {
            StatCategory::Points => &mut self.points,
            StatCategory::Rebounds => &mut self.rebounds,
            StatCategory::Assists => &mut self.assists,
            StatCategory::Steals => &mut self.steals,
            StatCategory::Blocks => &mut self.blocks,
            StatCategory::Turnovers => &mut self.turnovers,
            StatCategory::FieldGoalsMade => &mut self.field_goals_made,
            StatCategory::FieldGoalsAttempted => &mut self.field_goals_attempted,
            StatCategory::ThreePointsMade => &mut self.three_points_made,
            StatCategory::ThreePointsAttempted => &mut self.three_points_attempted,
            StatCategory::FreeThrowsMade => &mut self.free_throws_made,
            StatCategory::FreeThrowsAttempted => &mut self.free_throws_attempted,
            StatCategory::OffensiveRebounds => &mut self.offensive_rebounds,
            StatCategory::DefensiveRebounds => &mut self.defensive_rebounds,
            StatCategory::PersonalFouls => &mut self.personal_fouls,
        };
        *slot = value;
        self
    }
}

/// Trailing five-game averages for the core counting categories.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RecentForm {
    pub points: Option<f64>,
    pub rebounds: Option<f64>,
    pub assists: Option<f64>,
    pub steals: Option<f64>,
    pub blocks: Option<f64>,
    pub turnovers: Option<f64>,
}

impl RecentForm {
    /// Recent average for a core category; always `None` for the others.
    pub fn get(&self, category: StatCategory) -> Option<f64> {
        match category {
            StatCategory::Points => self.points,
            StatCategory::Rebounds => self.rebounds,
            StatCategory::Assists => self.assists,
            StatCategory::Steals => self.steals,
            StatCategory::Blocks => self.blocks,
            StatCategory::Turnovers => self.turnovers,
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        StatCategory::CORE.iter().all(|c| self.get(*c).is_none())
    }
}

/// A player's statistics in one context, joined with roster attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStatRecord {
    pub person_id: i64,
    pub display_name: String,
    pub team: String,
    pub position: String,
    pub height: String,
    pub weight: Option<f64>,
    /// Season-level numbers as reported by the roster
    pub current: StatLine,
    /// A model's forecast; takes precedence over `current` for scoring
    pub projected: Option<StatLine>,
    pub recent: RecentForm,
    pub efficiency: Option<f64>,
    pub usage_rate: Option<f64>,
    pub model: Option<ModelType>,
}

impl PlayerStatRecord {
    pub fn new(person_id: i64, display_name: &str, team: &str, position: &str) -> Self {
        Self {
            person_id,
            display_name: display_name.to_string(),
            team: team.to_string(),
            position: position.to_string(),
            height: String::new(),
            weight: None,
            current: StatLine::default(),
            projected: None,
            recent: RecentForm::default(),
            efficiency: None,
            usage_rate: None,
            model: None,
        }
    }

    /// The line scoring reads from: projected when present, else current.
    pub fn scoring_line(&self) -> &StatLine {
        self.projected.as_ref().unwrap_or(&self.current)
    }

    pub fn stat(&self, category: StatCategory) -> f64 {
        self.scoring_line().get(category)
    }
}

impl AsRef<PlayerStatRecord> for PlayerStatRecord {
    fn as_ref(&self) -> &PlayerStatRecord {
        self
    }
}
