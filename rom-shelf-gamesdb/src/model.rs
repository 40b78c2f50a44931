//! Serde model of the TheGamesDB database dump.
//!
//! Game records are kept as raw JSON values so one malformed record can
//! be skipped during import without failing the whole array.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DumpError {
    #[error("Failed to read dump: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The whole dump file.
#[derive(Debug, Deserialize)]
pub struct Dump {
    pub data: DumpData,
    #[serde(default)]
    pub include: Include,
}

#[derive(Debug, Deserialize)]
pub struct DumpData {
    /// Raw game records, deserialized one at a time by the importer.
    pub games: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Include {
    #[serde(default)]
    pub platform: Option<PlatformBlock>,
    #[serde(default)]
    pub boxart: Option<BoxartBlock>,
}

#[derive(Debug, Deserialize)]
pub struct PlatformBlock {
    /// Keyed by the platform id as a string.
    pub data: HashMap<String, PlatformEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlatformEntry {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BoxartBlock {
    /// Keyed by the game id as a string.
    pub data: HashMap<String, Vec<BoxartEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoxartEntry {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
}

/// One game record. `id` and `game_title` are required; everything else
/// rides along when present.
#[derive(Debug, Clone, Deserialize)]
pub struct GameEntry {
    pub id: i64,
    pub game_title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub platform: Option<i64>,
    #[serde(default)]
    pub region_id: Option<i64>,
    #[serde(default)]
    pub country_id: Option<i64>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
    #[serde(default)]
    pub players: Option<i64>,
    #[serde(default)]
    pub coop: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub developers: Option<Vec<i64>>,
    #[serde(default)]
    pub genres: Option<Vec<i64>>,
    #[serde(default)]
    pub publishers: Option<Vec<i64>>,
    /// May contain nulls in the wild; the importer filters them.
    #[serde(default)]
    pub alternates: Option<Vec<Option<String>>>,
}

/// Read and parse a dump file.
pub fn load_dump(path: &Path) -> Result<Dump, DumpError> {
    let text = std::fs::read_to_string(path)?;
    let dump = serde_json::from_str(&text)?;
    Ok(dump)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_entry_requires_title() {
        let value = serde_json::json!({ "id": 5 });
        assert!(serde_json::from_value::<GameEntry>(value).is_err());
    }

    #[test]
    fn game_entry_tolerates_missing_optionals() {
        let value = serde_json::json!({ "id": 5, "game_title": "Tetris" });
        let game: GameEntry = serde_json::from_value(value).unwrap();
        assert_eq!(game.id, 5);
        assert_eq!(game.platform, None);
        assert_eq!(game.alternates, None);
    }

    #[test]
    fn alternates_may_hold_nulls() {
        let value = serde_json::json!({
            "id": 5,
            "game_title": "Tetris",
            "alternates": ["Tetris DX", null]
        });
        let game: GameEntry = serde_json::from_value(value).unwrap();
        assert_eq!(
            game.alternates,
            Some(vec![Some("Tetris DX".to_string()), None])
        );
    }
}
