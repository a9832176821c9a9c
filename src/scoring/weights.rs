use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the fifteen statistical categories a fantasy formula can weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatCategory {
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
    Turnovers,
    FieldGoalsMade,
    FieldGoalsAttempted,
    ThreePointsMade,
    ThreePointsAttempted,
    FreeThrowsMade,
    FreeThrowsAttempted,
    OffensiveRebounds,
    DefensiveRebounds,
    PersonalFouls,
}

impl StatCategory {
    pub const ALL: [StatCategory; 15] = [
        StatCategory::Points,
        StatCategory::Rebounds,
        StatCategory::Assists,
        StatCategory::Steals,
        StatCategory::Blocks,
        StatCategory::Turnovers,
        StatCategory::FieldGoalsMade,
        StatCategory::FieldGoalsAttempted,
        StatCategory::ThreePointsMade,
        StatCategory::ThreePointsAttempted,
        StatCategory::FreeThrowsMade,
        StatCategory::FreeThrowsAttempted,
        StatCategory::OffensiveRebounds,
        StatCategory::DefensiveRebounds,
        StatCategory::PersonalFouls,
    ];

    /// The six counting categories the projection blend works on.
    pub const CORE: [StatCategory; 6] = [
        StatCategory::Points,
        StatCategory::Rebounds,
        StatCategory::Assists,
        StatCategory::Steals,
        StatCategory::Blocks,
        StatCategory::Turnovers,
    ];

    /// Key used in the persisted weights JSON (camelCase).
    pub fn key(&self) -> &'static str {
        match self {
            StatCategory::Points => "points",
            StatCategory::Rebounds => "rebounds",
            StatCategory::Assists => "assists",
            StatCategory::Steals => "steals",
            StatCategory::Blocks => "blocks",
            StatCategory::Turnovers => "turnovers",
            StatCategory::FieldGoalsMade => "fieldGoalsMade",
            StatCategory::FieldGoalsAttempted => "fieldGoalsAttempted",
            StatCategory::ThreePointsMade => "threePointsMade",
            StatCategory::ThreePointsAttempted => "threePointsAttempted",
            StatCategory::FreeThrowsMade => "freeThrowsMade",
            StatCategory::FreeThrowsAttempted => "freeThrowsAttempted",
            StatCategory::OffensiveRebounds => "offensiveRebounds",
            StatCategory::DefensiveRebounds => "defensiveRebounds",
            StatCategory::PersonalFouls => "personalFouls",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatCategory::Points => "Points",
            StatCategory::Rebounds => "Rebounds",
            StatCategory::Assists => "Assists",
            StatCategory::Steals => "Steals",
            StatCategory::Blocks => "Blocks",
            StatCategory::Turnovers => "Turnovers",
            StatCategory::FieldGoalsMade => "Field Goals Made",
            StatCategory::FieldGoalsAttempted => "Field Goals Attempted",
            StatCategory::ThreePointsMade => "3-Pointers Made",
            StatCategory::ThreePointsAttempted => "3-Pointers Attempted",
            StatCategory::FreeThrowsMade => "Free Throws Made",
            StatCategory::FreeThrowsAttempted => "Free Throws Attempted",
            StatCategory::OffensiveRebounds => "Offensive Rebounds",
            StatCategory::DefensiveRebounds => "Defensive Rebounds",
            StatCategory::PersonalFouls => "Personal Fouls",
        }
    }

    /// Column abbreviation used by the stats API (`Points`, `REB`, `3PM`, ...).
    pub fn abbreviation(&self) -> &'static str {
        match self {
            StatCategory::Points => "Points",
            StatCategory::Rebounds => "REB",
            StatCategory::Assists => "AST",
            StatCategory::Steals => "STL",
            StatCategory::Blocks => "BLK",
            StatCategory::Turnovers => "TO",
            StatCategory::FieldGoalsMade => "FGM",
            StatCategory::FieldGoalsAttempted => "FGA",
            StatCategory::ThreePointsMade => "3PM",
            StatCategory::ThreePointsAttempted => "3PA",
            StatCategory::FreeThrowsMade => "FTM",
            StatCategory::FreeThrowsAttempted => "FTA",
            StatCategory::OffensiveRebounds => "OREB",
            StatCategory::DefensiveRebounds => "DREB",
            StatCategory::PersonalFouls => "PF",
        }
    }

    /// Parse a category from its JSON key, API abbreviation or label.
    /// Matching is case-insensitive.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        for category in StatCategory::ALL {
            if s.eq_ignore_ascii_case(category.key())
                || s.eq_ignore_ascii_case(category.abbreviation())
                || s.eq_ignore_ascii_case(category.label())
            {
                return Ok(category);
            }
        }
        // Short aliases people type on the command line
        let alias = match s.to_ascii_lowercase().as_str() {
            "pts" => Some(StatCategory::Points),
            "tov" => Some(StatCategory::Turnovers),
            "fouls" => Some(StatCategory::PersonalFouls),
            _ => None,
        };
        match alias {
            Some(category) => Ok(category),
            None => bail!("Unknown stat category: {}", s),
        }
    }
}

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-category multipliers of a fantasy scoring formula.
///
/// Serializes to the flat camelCase JSON object the weights store persists:
/// ```json
/// { "points": 1.0, "rebounds": 1.2, "assists": 1.5, "turnovers": -1.0, ... }
/// ```
/// Any finite value is legal, including negatives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringWeights {
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
}

impl Default for ScoringWeights {
    fn default() -> Self {
        WeightPreset::Standard.weights()
    }
}

impl ScoringWeights {
    /// All categories weighted zero.
    pub fn zero() -> Self {
        Self {
            points: 0.0,
            rebounds: 0.0,
            assists: 0.0,
            steals: 0.0,
            blocks: 0.0,
            turnovers: 0.0,
            field_goals_made: 0.0,
            field_goals_attempted: 0.0,
            three_points_made: 0.0,
            three_points_attempted: 0.0,
            free_throws_made: 0.0,
            free_throws_attempted: 0.0,
            offensive_rebounds: 0.0,
            defensive_rebounds: 0.0,
            personal_fouls: 0.0,
        }
    }

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

    fn slot(&mut self, category: StatCategory) -> &mut f64 {
        match category {
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
        }
    }

    /// Return a copy with one category replaced.
    pub fn with(mut self, category: StatCategory, value: f64) -> Self {
        *self.slot(category) = value;
        self
    }

    pub fn set(&mut self, category: StatCategory, value: f64) {
        *self.slot(category) = value;
    }

    /// Iterate `(category, weight)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (StatCategory, f64)> + '_ {
        StatCategory::ALL.iter().map(move |c| (*c, self.get(*c)))
    }
}

/// Named starting points for a scoring formula.
///
/// The historical dashboard shipped conflicting defaults in different places;
/// each of them is kept here under its own name and the config picks which one
/// is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightPreset {
    /// Points 1, Rebounds 1.2, Assists 1.5, Steals/Blocks 2, TO -1, PF -0.5
    #[default]
    Standard,
    /// Every positive category 1, turnovers and fouls -1
    Equal,
    /// Steals/Blocks 3 and rebound splits 1.2 on top of total rebounds
    Legacy,
}

impl WeightPreset {
    pub const ALL: [WeightPreset; 3] = [WeightPreset::Standard, WeightPreset::Equal, WeightPreset::Legacy];

    pub fn name(&self) -> &'static str {
        match self {
            WeightPreset::Standard => "standard",
            WeightPreset::Equal => "equal",
            WeightPreset::Legacy => "legacy",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WeightPreset::Standard => "Points (1), Rebounds (1.2), Assists (1.5), Steals/Blocks (2)",
            WeightPreset::Equal => "All positive stats (1), negative stats (-1)",
            WeightPreset::Legacy => "Steals/Blocks (3), rebound splits counted again (1.2)",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(WeightPreset::Standard),
            "equal" => Ok(WeightPreset::Equal),
            "legacy" => Ok(WeightPreset::Legacy),
            other => bail!(
                "Unknown preset '{}'. Expected one of: standard, equal, legacy",
                other
            ),
        }
    }

    pub fn weights(&self) -> ScoringWeights {
        let zero = ScoringWeights::zero();
        match self {
            WeightPreset::Standard => ScoringWeights {
                points: 1.0,
                rebounds: 1.2,
                assists: 1.5,
                steals: 2.0,
                blocks: 2.0,
                turnovers: -1.0,
                personal_fouls: -0.5,
                ..zero
            },
            WeightPreset::Equal => ScoringWeights {
                points: 1.0,
                rebounds: 1.0,
                assists: 1.0,
                steals: 1.0,
                blocks: 1.0,
                turnovers: -1.0,
                personal_fouls: -1.0,
                ..zero
            },
            WeightPreset::Legacy => ScoringWeights {
                points: 1.0,
                rebounds: 1.2,
                assists: 1.5,
                steals: 3.0,
                blocks: 3.0,
                turnovers: -1.0,
                offensive_rebounds: 1.2,
                defensive_rebounds: 1.2,
                personal_fouls: -0.5,
                ..zero
            },
        }
    }
}

impl fmt::Display for WeightPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
