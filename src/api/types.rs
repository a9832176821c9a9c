use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One row of `GET /players`.
///
/// The API serializes NaN as `null`, so every numeric column is optional.
/// Unknown columns are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct RosterRecord {
    #[serde(rename = "PERSON_ID", deserialize_with = "de_person_id")]
    pub person_id: i64,
    #[serde(rename = "DISPLAY_FIRST_LAST", default)]
    pub display_name: Option<String>,
    #[serde(rename = "TEAM_ABBREVIATION", default)]
    pub team: Option<String>,
    #[serde(rename = "POSITION", default)]
    pub position: Option<String>,
    #[serde(rename = "HEIGHT", default, deserialize_with = "de_lenient_string")]
    pub height: Option<String>,
    #[serde(rename = "WEIGHT", default)]
    pub weight: Option<f64>,

    #[serde(rename = "Points", default)]
    pub points: Option<f64>,
    #[serde(rename = "REB", default)]
    pub rebounds: Option<f64>,
    #[serde(rename = "AST", default)]
    pub assists: Option<f64>,
    #[serde(rename = "STL", default)]
    pub steals: Option<f64>,
    #[serde(rename = "BLK", default)]
    pub blocks: Option<f64>,
    #[serde(rename = "TO", default)]
    pub turnovers: Option<f64>,
    #[serde(rename = "FGM", default)]
    pub field_goals_made: Option<f64>,
    #[serde(rename = "FGA", default)]
    pub field_goals_attempted: Option<f64>,
    #[serde(rename = "3PM", default)]
    pub three_points_made: Option<f64>,
    #[serde(rename = "3PA", default)]
    pub three_points_attempted: Option<f64>,
    #[serde(rename = "FTM", default)]
    pub free_throws_made: Option<f64>,
    #[serde(rename = "FTA", default)]
    pub free_throws_attempted: Option<f64>,
    #[serde(rename = "OREB", default)]
    pub offensive_rebounds: Option<f64>,
    #[serde(rename = "DREB", default)]
    pub defensive_rebounds: Option<f64>,
    #[serde(rename = "PF", default)]
    pub personal_fouls: Option<f64>,
    #[serde(rename = "Minutes", default)]
    pub minutes: Option<f64>,
    #[serde(rename = "GAME_EFFICIENCY", default)]
    pub efficiency: Option<f64>,

    #[serde(rename = "Points_5G_AVG", default)]
    pub points_5g_avg: Option<f64>,
    #[serde(rename = "REB_5G_AVG", default)]
    pub rebounds_5g_avg: Option<f64>,
    #[serde(rename = "AST_5G_AVG", default)]
    pub assists_5g_avg: Option<f64>,
    #[serde(rename = "STL_5G_AVG", default)]
    pub steals_5g_avg: Option<f64>,
    #[serde(rename = "BLK_5G_AVG", default)]
    pub blocks_5g_avg: Option<f64>,
    #[serde(rename = "TO_5G_AVG", default)]
    pub turnovers_5g_avg: Option<f64>,
}

/// One row of `GET /predictions/{model}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct PredictionRecord {
    #[serde(rename = "PERSON_ID", deserialize_with = "de_person_id")]
    pub person_id: i64,
    #[serde(rename = "SEASON_ID", default, deserialize_with = "de_lenient_string")]
    pub season_id: Option<String>,

    #[serde(rename = "next_Points", default)]
    pub points: Option<f64>,
    #[serde(rename = "next_REB", default)]
    pub rebounds: Option<f64>,
    #[serde(rename = "next_AST", default)]
    pub assists: Option<f64>,
    #[serde(rename = "next_STL", default)]
    pub steals: Option<f64>,
    #[serde(rename = "next_BLK", default)]
    pub blocks: Option<f64>,
    #[serde(rename = "next_TO", default)]
    pub turnovers: Option<f64>,
    #[serde(rename = "next_FGM", default)]
    pub field_goals_made: Option<f64>,
    #[serde(rename = "next_FGA", default)]
    pub field_goals_attempted: Option<f64>,
    #[serde(rename = "next_3PM", default)]
    pub three_points_made: Option<f64>,
    #[serde(rename = "next_3PA", default)]
    pub three_points_attempted: Option<f64>,
    #[serde(rename = "next_FTM", default)]
    pub free_throws_made: Option<f64>,
    #[serde(rename = "next_FTA", default)]
    pub free_throws_attempted: Option<f64>,
    #[serde(rename = "next_OREB", default)]
    pub offensive_rebounds: Option<f64>,
    #[serde(rename = "next_DREB", default)]
    pub defensive_rebounds: Option<f64>,
    #[serde(rename = "next_PF", default)]
    pub personal_fouls: Option<f64>,
    #[serde(rename = "next_Minutes", default)]
    pub minutes: Option<f64>,
    #[serde(rename = "next_USAGE_RATE", default)]
    pub usage_rate: Option<f64>,
    #[serde(rename = "next_GAME_EFFICIENCY", default)]
    pub efficiency: Option<f64>,
}

/// Entry of `GET /models/available`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModelAvailability {
    pub available: bool,
    #[serde(default)]
    pub filename: String,
}

pub type AvailableModels = BTreeMap<String, ModelAvailability>;

/// Per-model mean of one stat; `None` when the model has no data for it.
pub type ModelComparison = BTreeMap<String, Option<f64>>;

/// Response of `GET /player/{id}/history`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerHistory {
    pub player_id: i64,
    #[serde(default)]
    pub history: Vec<SeasonLine>,
}

/// One season of career stats. Only the columns shown in the history table
/// are typed; the rest are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct SeasonLine {
    #[serde(rename = "SEASON_ID", default, deserialize_with = "de_lenient_string")]
    pub season_id: Option<String>,
    #[serde(rename = "TEAM_ABBREVIATION", default)]
    pub team: Option<String>,
    #[serde(rename = "GP", default)]
    pub games_played: Option<f64>,
    #[serde(rename = "MIN", default)]
    pub minutes: Option<f64>,
    #[serde(rename = "PTS", default)]
    pub points: Option<f64>,
    #[serde(rename = "REB", default)]
    pub rebounds: Option<f64>,
    #[serde(rename = "AST", default)]
    pub assists: Option<f64>,
    #[serde(rename = "STL", default)]
    pub steals: Option<f64>,
    #[serde(rename = "BLK", default)]
    pub blocks: Option<f64>,
    #[serde(rename = "TOV", default)]
    pub turnovers: Option<f64>,
}

/// pandas may emit integral ids as `2544.0`.
fn de_person_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Id::deserialize(deserializer)? {
        Id::Int(id) => Ok(id),
        Id::Float(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
        Id::Float(f) => Err(serde::de::Error::custom(format!("invalid PERSON_ID {}", f))),
        Id::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid PERSON_ID '{}'", s))),
    }
}

/// Accept strings, numbers or null for columns like `HEIGHT` ("6-9" or 81).
fn de_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_record_nulls_and_unknown_fields() {
        let json = r#"{
            "PERSON_ID": 2544,
            "DISPLAY_FIRST_LAST": "LeBron James",
            "TEAM_ABBREVIATION": "LAL",
            "POSITION": "Forward",
            "HEIGHT": "6-9",
            "WEIGHT": 250,
            "Points": 25.7,
            "REB": null,
            "Points_5G_AVG": 28.1,
            "SCHOOL": "St. Vincent-St. Mary HS"
        }"#;
        let record: RosterRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.person_id, 2544);
        assert_eq!(record.height.as_deref(), Some("6-9"));
        assert_eq!(record.points, Some(25.7));
        assert_eq!(record.rebounds, None);
        assert_eq!(record.points_5g_avg, Some(28.1));
    }

    #[test]
    fn test_prediction_record_float_id() {
        let json = r#"{"PERSON_ID": 201939.0, "next_Points": 24.2, "next_3PM": 4.1, "next_3P%": 0.41}"#;
        let record: PredictionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.person_id, 201939);
        assert_eq!(record.points, Some(24.2));
        assert_eq!(record.three_points_made, Some(4.1));
        assert_eq!(record.rebounds, None);
    }

    #[test]
    fn test_missing_person_id_fails() {
        let json = r#"{"next_Points": 10.0}"#;
        assert!(serde_json::from_str::<PredictionRecord>(json).is_err());
    }

    #[test]
    fn test_numeric_height_becomes_string() {
        let json = r#"{"PERSON_ID": 1, "HEIGHT": 81}"#;
        let record: RosterRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.height.as_deref(), Some("81"));
    }

    #[test]
    fn test_available_models_map() {
        let json = r#"{"ridge": {"available": true, "filename": "ridge_predictions.csv"},
                       "lstm": {"available": false, "filename": "lstm_predictions.csv"}}"#;
        let models: AvailableModels = serde_json::from_str(json).unwrap();
        assert!(models["ridge"].available);
        assert!(!models["lstm"].available);
    }

    #[test]
    fn test_player_history() {
        let json = r#"{"player_id": 2544, "history": [{"SEASON_ID": "2023-24", "PTS": 1822, "GP": 71}]}"#;
        let history: PlayerHistory = serde_json::from_str(json).unwrap();
        assert_eq!(history.history.len(), 1);
        assert_eq!(history.history[0].season_id.as_deref(), Some("2023-24"));
        assert_eq!(history.history[0].points, Some(1822.0));
    }
}
