//! High-score persistence
//!
//! The JSON store keeps one object keyed by `DN{n}_G{grid}` in the user's home
//! directory. Reads tolerate a missing or damaged file; writes go through a
//! temporary file and a rename so a crash never leaves a half-written file.

use super::record::{HighScoreRecord, StoredRecord, record_key};
use crate::core::PersistenceError;
use directories::BaseDirs;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name used under the home directory
pub const SCORE_FILE_NAME: &str = ".nback_scores.json";

/// Rows shown in high-score listings
pub const TOP_SCORES: usize = 10;

/// Keyed get/put access to high scores
pub trait ScoreStore {
    /// Best record for (n, grid size), if any
    ///
    /// # Errors
    /// Returns [`PersistenceError`] if the backing storage cannot be read.
    fn load(&self, n: usize, grid_size: usize) -> Result<Option<HighScoreRecord>, PersistenceError>;

    /// Insert or replace the record for its (n, grid size) key
    ///
    /// # Errors
    /// Returns [`PersistenceError`] if the record cannot be written.
    fn save(&mut self, record: &HighScoreRecord) -> Result<(), PersistenceError>;

    /// Every stored record, best accuracy first
    ///
    /// # Errors
    /// Returns [`PersistenceError`] if the backing storage cannot be read.
    fn all(&self) -> Result<Vec<HighScoreRecord>, PersistenceError>;
}

/// Scores kept in a JSON file
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.nback_scores.json`
    ///
    /// # Errors
    /// Returns [`PersistenceError::NoHomeDir`] if the home directory is unknown.
    pub fn in_home_dir() -> Result<Self, PersistenceError> {
        let dirs = BaseDirs::new().ok_or(PersistenceError::NoHomeDir)?;
        Ok(Self::new(dirs.home_dir().join(SCORE_FILE_NAME)))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every valid entry; a missing or unparsable file reads as empty
    ///
    /// Entries that fail to parse are skipped individually.
    fn read_entries(&self) -> Result<Map<String, Value>, PersistenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => {
                warn!(path = %self.path.display(), "score file is not a JSON object, ignoring it");
                Ok(Map::new())
            }
            Err(err) => {
                warn!(path = %self.path.display(), "score file is corrupt, ignoring it: {err}");
                Ok(Map::new())
            }
        }
    }

    /// Entries from older versions of the game take their level from the key
    fn parse_entry(key: &str, value: &Value) -> Option<HighScoreRecord> {
        match StoredRecord::deserialize(value) {
            Ok(stored) => {
                let record = stored.into_record(key);
                if record.is_none() {
                    debug!(key, "skipping score entry with no level");
                }
                record
            }
            Err(err) => {
                debug!(key, "skipping unreadable score entry: {err}");
                None
            }
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(
        &self,
        n: usize,
        grid_size: usize,
    ) -> Result<Option<HighScoreRecord>, PersistenceError> {
        let key = record_key(n, grid_size);
        let entries = self.read_entries()?;
        Ok(entries.get(&key).and_then(|value| Self::parse_entry(&key, value)))
    }

    fn save(&mut self, record: &HighScoreRecord) -> Result<(), PersistenceError> {
        let mut entries = self.read_entries()?;
        entries.insert(record.key(), serde_json::to_value(record)?);
        self.write_entries(&entries)
    }

    fn all(&self) -> Result<Vec<HighScoreRecord>, PersistenceError> {
        let entries = self.read_entries()?;
        let mut records: Vec<HighScoreRecord> = entries
            .iter()
            .filter_map(|(key, value)| Self::parse_entry(key, value))
            .collect();
        sort_best_first(&mut records);
        Ok(records)
    }
}

/// Scores kept in memory; used by tests and when no home directory exists
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    records: FxHashMap<(usize, usize), HighScoreRecord>,
}

impl ScoreStore for MemoryScoreStore {
    fn load(
        &self,
        n: usize,
        grid_size: usize,
    ) -> Result<Option<HighScoreRecord>, PersistenceError> {
        Ok(self.records.get(&(n, grid_size)).cloned())
    }

    fn save(&mut self, record: &HighScoreRecord) -> Result<(), PersistenceError> {
        self.records.insert((record.n, record.grid_size), record.clone());
        Ok(())
    }

    fn all(&self) -> Result<Vec<HighScoreRecord>, PersistenceError> {
        let mut records: Vec<HighScoreRecord> = self.records.values().cloned().collect();
        sort_best_first(&mut records);
        Ok(records)
    }
}

fn sort_best_first(records: &mut [HighScoreRecord]) {
    records.sort_by(|a, b| {
        b.accuracy
            .total_cmp(&a.accuracy)
            .then_with(|| a.n.cmp(&b.n))
            .then_with(|| a.grid_size.cmp(&b.grid_size))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use time::macros::datetime;

    fn record(n: usize, grid_size: usize, accuracy: f64) -> HighScoreRecord {
        HighScoreRecord {
            n,
            grid_size,
            trial_count: Some(20),
            accuracy,
            score: 5,
            total: 8,
            timestamp: datetime!(2026-03-04 05:06:07 UTC),
        }
    }

    fn store_in(dir: &TempDir) -> JsonScoreStore {
        JsonScoreStore::new(dir.path().join(SCORE_FILE_NAME))
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load(2, 8).unwrap(), None);
        assert!(store.all().unwrap().is_empty());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let saved = record(2, 8, 62.5);
        store.save(&saved).unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.load(2, 8).unwrap(), Some(saved));
        assert_eq!(reopened.load(3, 8).unwrap(), None);
        assert!(!dir.path().join(".nback_scores.json.tmp").exists());
    }

    #[test]
    fn save_replaces_same_key_and_keeps_others() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.save(&record(2, 8, 50.0)).unwrap();
        store.save(&record(3, 5, 40.0)).unwrap();
        store.save(&record(2, 8, 70.0)).unwrap();

        let all = store.all().unwrap();
        assert_eq!(all.len(), 2);
        assert!((all[0].accuracy - 70.0).abs() < 1e-9);
        assert_eq!(all[1].key(), "DN3_G5");
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").unwrap();
        assert_eq!(store.load(2, 8).unwrap(), None);
        assert!(store.all().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_is_replaced_on_save() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        fs::write(store.path(), "[1, 2, 3]").unwrap();
        store.save(&record(1, 3, 90.0)).unwrap();
        assert_eq!(store.all().unwrap().len(), 1);
    }

    #[test]
    fn unreadable_entries_are_skipped() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.save(&record(2, 8, 80.0)).unwrap();

        let mut content: Map<String, Value> =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        content.insert(
            "DN4_G4".to_string(),
            serde_json::json!({ "accuracy": "high" }),
        );
        fs::write(store.path(), serde_json::to_string(&content).unwrap()).unwrap();

        assert_eq!(store.all().unwrap().len(), 1);
        assert_eq!(store.load(4, 4).unwrap(), None);
    }

    #[test]
    fn legacy_entries_are_kept_and_compared() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let content = serde_json::json!({
            "DN2_G8": { "accuracy": 95.0, "score": 19, "total": 20, "date": "2025-01-01 10:00:00" }
        });
        fs::write(store.path(), content.to_string()).unwrap();

        let legacy = store.load(2, 8).unwrap().unwrap();
        assert!((legacy.accuracy - 95.0).abs() < 1e-9);
        assert_eq!(legacy.trial_count, None);
        assert_eq!(legacy.timestamp, datetime!(2025-01-01 10:00:00 UTC));
        assert_eq!(store.all().unwrap().len(), 1);

        // A weaker result must not displace the legacy best
        assert!(!record(2, 8, 33.3).beats(&legacy));

        store.save(&record(3, 5, 40.0)).unwrap();
        assert_eq!(store.load(2, 8).unwrap(), Some(legacy));
        assert_eq!(store.all().unwrap().len(), 2);
    }

    #[test]
    fn memory_store_sorts_best_first() {
        let mut store = MemoryScoreStore::default();
        store.save(&record(1, 3, 20.0)).unwrap();
        store.save(&record(2, 3, 95.0)).unwrap();
        store.save(&record(3, 3, 60.0)).unwrap();
        let accuracies: Vec<f64> = store.all().unwrap().iter().map(|r| r.accuracy).collect();
        assert_eq!(accuracies, vec![95.0, 60.0, 20.0]);
    }
}
