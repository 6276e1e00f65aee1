//! # Save Data
//!
//! The single local save slot: level progress, pig coins, the mascot's
//! inventory, settings, and lifetime statistics, stored as JSON.
//!
//! Loading never fails. A missing file means a first run; a file that can't
//! be read or decoded is logged and treated as missing, so the player starts
//! over instead of being locked out.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::TrainerError;
use crate::progress::ProgressBook;

/// Lifetime play statistics
///
/// Times are in milliseconds. Play time counts the time spent answering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStatistics {
    pub total_notes_played: u64,
    pub correct_notes: u64,
    pub average_response_time: f64,
    pub longest_streak: u32,
    pub total_play_time: f64,
}

impl GameStatistics {
    pub fn record_answer(&mut self, correct: bool, streak: u32, response_time: Duration) {
        let millis = response_time.as_secs_f64() * 1000.0;
        self.total_notes_played += 1;
        if correct {
            self.correct_notes += 1;
        }
        self.longest_streak = self.longest_streak.max(streak);
        self.average_response_time +=
            (millis - self.average_response_time) / self.total_notes_played as f64;
        self.total_play_time += millis;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Hat,
    Accessory,
    Background,
    Instrument,
}

/// Mascot customization bought with pig coins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub name: String,
    pub cost: u32,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default)]
    pub equipped: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveData {
    pub progress: ProgressBook,
    pub pig_coins: u32,
    pub inventory: Vec<CustomizationItem>,
    pub settings: Settings,
    pub statistics: GameStatistics,
}

impl SaveData {
    pub fn from_json(content: &str) -> Result<Self, TrainerError> {
        let mut data: SaveData =
            serde_json::from_str(content).map_err(|e| TrainerError::Save(e.to_string()))?;
        data.settings = data.settings.sanitized();
        Ok(data)
    }

    pub fn to_json(&self) -> Result<String, TrainerError> {
        serde_json::to_string_pretty(self).map_err(|e| TrainerError::Save(e.to_string()))
    }
}

/// Persistence collaborator
pub trait SaveStore {
    /// Read the save slot. `None` when there is nothing usable.
    fn load(&mut self) -> Option<SaveData>;

    fn save(&mut self, data: &SaveData) -> Result<(), TrainerError>;
}

/// Save slot in a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for JsonFileStore {
    fn load(&mut self) -> Option<SaveData> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No save file at {}, starting fresh", self.path.display());
                return None;
            }
            Err(e) => {
                log::warn!("Could not read save file {}: {}", self.path.display(), e);
                return None;
            }
        };

        match SaveData::from_json(&content) {
            Ok(data) => Some(data),
            Err(e) => {
                log::warn!("Ignoring malformed save file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&mut self, data: &SaveData) -> Result<(), TrainerError> {
        let json = data.to_json()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| TrainerError::Save(format!("{}: {}", parent.display(), e)))?;
        }
        fs::write(&self.path, json)
            .map_err(|e| TrainerError::Save(format!("{}: {}", self.path.display(), e)))?;
        log::debug!("Saved progress to {}", self.path.display());
        Ok(())
    }
}

/// Save slot held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Option<SaveData>,
    writes: usize,
}

impl MemoryStore {
    pub fn with_data(data: SaveData) -> Self {
        Self {
            data: Some(data),
            writes: 0,
        }
    }

    pub fn data(&self) -> Option<&SaveData> {
        self.data.as_ref()
    }

    /// Number of successful saves
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SaveStore for MemoryStore {
    fn load(&mut self) -> Option<SaveData> {
        self.data.clone()
    }

    fn save(&mut self, data: &SaveData) -> Result<(), TrainerError> {
        self.data = Some(data.clone());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::LevelProgress;

    #[test]
    fn test_json_field_names() {
        let json = SaveData::default().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["pigCoins"], 0);
        assert_eq!(value["progress"].as_array().unwrap().len(), 4);
        assert_eq!(value["progress"][0]["levelNumber"], 1);
        assert_eq!(value["settings"]["showHints"], true);
        assert_eq!(value["statistics"]["longestStreak"], 0);
        assert_eq!(value["inventory"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let data = SaveData::from_json(r#"{"pigCoins": 40}"#).unwrap();
        assert_eq!(data.pig_coins, 40);
        assert_eq!(data.progress, ProgressBook::default());
        assert_eq!(data.settings, Settings::default());
    }

    #[test]
    fn test_progress_is_normalized_on_load() {
        let data = SaveData::from_json(
            r#"{"progress": [{"levelNumber": 1, "oinks": 2, "completed": true}]}"#,
        )
        .unwrap();
        assert_eq!(data.progress.levels().len(), 4);
        assert_eq!(
            data.progress.get(1),
            Some(&LevelProgress {
                level_number: 1,
                oinks: 2,
                best_score: 0,
                completed: true,
            })
        );
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        assert!(SaveData::from_json(r#"{"pigCoins": "lots"}"#).is_err());
        assert!(SaveData::from_json("not json").is_err());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested").join("save.json"));
        assert_eq!(store.load(), None);

        let mut data = SaveData::default();
        data.pig_coins = 120;
        data.progress.record(1, 3, 4000).unwrap();
        store.save(&data).unwrap();

        assert_eq!(store.load(), Some(data));
    }

    #[test]
    fn test_file_store_malformed_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "{\"progress\": 12").unwrap();
        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_statistics() {
        let mut stats = GameStatistics::default();
        stats.record_answer(true, 1, Duration::from_millis(1000));
        stats.record_answer(true, 2, Duration::from_millis(2000));
        stats.record_answer(false, 0, Duration::from_millis(3000));
        assert_eq!(stats.total_notes_played, 3);
        assert_eq!(stats.correct_notes, 2);
        assert_eq!(stats.longest_streak, 2);
        assert!((stats.average_response_time - 2000.0).abs() < 1e-6);
        assert!((stats.total_play_time - 6000.0).abs() < 1e-6);
    }

    #[test]
    fn test_inventory_and_timings_survive_rewrite() {
        let content = r#"{
            "pigCoins": 55,
            "inventory": [
                {"id": "hat-1", "type": "hat", "name": "Top Hat", "cost": 50,
                 "unlocked": true, "equipped": true}
            ],
            "statistics": {"totalNotesPlayed": 4, "averageResponseTime": 1200,
                           "totalPlayTime": 4800}
        }"#;
        let data = SaveData::from_json(content).unwrap();
        assert_eq!(
            data.inventory,
            vec![CustomizationItem {
                id: "hat-1".to_string(),
                kind: ItemKind::Hat,
                name: "Top Hat".to_string(),
                cost: 50,
                unlocked: true,
                equipped: true,
            }]
        );
        assert_eq!(data.statistics.average_response_time, 1200.0);

        let rewritten = data.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&rewritten).unwrap();
        assert_eq!(value["inventory"][0]["type"], "hat");
        assert_eq!(value["inventory"][0]["equipped"], true);
        assert_eq!(value["statistics"]["averageResponseTime"], 1200.0);
        assert_eq!(value["statistics"]["totalPlayTime"], 4800.0);
        assert_eq!(SaveData::from_json(&rewritten).unwrap(), data);
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryStore::default();
        assert!(store.load().is_none());
        store.save(&SaveData::default()).unwrap();
        assert_eq!(store.writes(), 1);
        assert_eq!(store.load(), Some(SaveData::default()));
    }
}
