//! High-score records and submission

use super::store::ScoreStore;
use crate::core::PersistenceError;
use crate::session::SessionReport;
use serde::{Deserialize, Deserializer, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::{info, warn};

/// Best result for one (n, grid size) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub n: usize,
    pub grid_size: usize,
    /// Unknown for entries written by older versions of the game
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_count: Option<usize>,
    pub accuracy: f64,
    /// Points earned (correct matches over both channels)
    pub score: u32,
    /// Matches that could have been claimed
    pub total: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl HighScoreRecord {
    /// Record for a finished session, stamped with the current time
    ///
    /// Returns `None` for quit or failed sessions and for sessions where no
    /// match occurred, since their accuracy is undefined.
    #[must_use]
    pub fn from_report(report: &SessionReport) -> Option<Self> {
        Self::from_report_at(report, OffsetDateTime::now_utc())
    }

    #[must_use]
    pub fn from_report_at(report: &SessionReport, timestamp: OffsetDateTime) -> Option<Self> {
        if !report.completed {
            return None;
        }
        let accuracy = report.accuracy()?;
        Some(Self {
            n: report.config.n(),
            grid_size: report.config.grid_size(),
            trial_count: Some(report.config.trial_count()),
            accuracy,
            score: report.score.points(),
            total: report.score.total_possible(),
            timestamp,
        })
    }

    /// Storage key, e.g. `DN2_G8`
    #[must_use]
    pub fn key(&self) -> String {
        record_key(self.n, self.grid_size)
    }

    /// Strictly better than `other`; ties keep the older record
    #[must_use]
    pub fn beats(&self, other: &Self) -> bool {
        self.accuracy > other.accuracy
    }
}

#[must_use]
pub fn record_key(n: usize, grid_size: usize) -> String {
    format!("DN{n}_G{grid_size}")
}

/// Inverse of [`record_key`]
#[must_use]
pub fn parse_record_key(key: &str) -> Option<(usize, usize)> {
    let (n, grid_size) = key.strip_prefix("DN")?.split_once("_G")?;
    Some((n.parse().ok()?, grid_size.parse().ok()?))
}

/// A score file entry in either the current or the legacy layout
///
/// Legacy entries carry no `n`, `grid_size` or `trial_count` and store a
/// local `date` as `YYYY-MM-DD HH:MM:SS`.
#[derive(Debug, Deserialize)]
pub(crate) struct StoredRecord {
    n: Option<usize>,
    grid_size: Option<usize>,
    #[serde(default)]
    trial_count: Option<usize>,
    accuracy: f64,
    score: u32,
    total: u32,
    #[serde(alias = "date", deserialize_with = "deserialize_stamp")]
    timestamp: OffsetDateTime,
}

impl StoredRecord {
    /// Fill in the level from `key` where the entry does not name it
    pub(crate) fn into_record(self, key: &str) -> Option<HighScoreRecord> {
        let from_key = parse_record_key(key);
        Some(HighScoreRecord {
            n: self.n.or(from_key.map(|(n, _)| n))?,
            grid_size: self.grid_size.or(from_key.map(|(_, g)| g))?,
            trial_count: self.trial_count,
            accuracy: self.accuracy,
            score: self.score,
            total: self.total,
            timestamp: self.timestamp,
        })
    }
}

/// RFC 3339, or the legacy `YYYY-MM-DD HH:MM:SS` read as UTC
fn deserialize_stamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<OffsetDateTime, D::Error> {
    let text = String::deserialize(deserializer)?;
    if let Ok(stamp) = OffsetDateTime::parse(&text, &Rfc3339) {
        return Ok(stamp);
    }
    PrimitiveDateTime::parse(
        &text,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
    .map(PrimitiveDateTime::assume_utc)
    .map_err(serde::de::Error::custom)
}

/// How a finished session compares with the stored best
#[derive(Debug, Clone, PartialEq)]
pub enum RecordStatus {
    /// No prior record, or this one is better
    NewRecord { previous: Option<HighScoreRecord> },
    NotImproved { best: HighScoreRecord },
    /// Quit, failed, or no match occurred
    NotEligible,
}

impl RecordStatus {
    #[must_use]
    pub const fn is_new_record(&self) -> bool {
        matches!(self, Self::NewRecord { .. })
    }
}

/// Result of offering a session to the store
#[derive(Debug)]
pub struct Submission {
    pub status: RecordStatus,
    /// Set when a new record could not be written
    pub save_error: Option<PersistenceError>,
}

/// Compare a session with the stored best and save it if it wins
///
/// A failed load counts as "no prior record". A failed save is returned in
/// [`Submission::save_error`] and never aborts the caller.
pub fn submit_high_score<S: ScoreStore + ?Sized>(
    store: &mut S,
    report: &SessionReport,
) -> Submission {
    let Some(record) = HighScoreRecord::from_report(report) else {
        return Submission {
            status: RecordStatus::NotEligible,
            save_error: None,
        };
    };

    let previous = store
        .load(record.n, record.grid_size)
        .unwrap_or_else(|err| {
            warn!("could not read previous high score, treating as none: {err}");
            None
        });

    if let Some(best) = previous.as_ref().filter(|best| !record.beats(best)) {
        return Submission {
            status: RecordStatus::NotImproved { best: best.clone() },
            save_error: None,
        };
    }

    info!(key = %record.key(), accuracy = record.accuracy, "new high score");
    let save_error = store.save(&record).err();
    if let Some(err) = &save_error {
        warn!("could not save high score: {err}");
    }

    Submission {
        status: RecordStatus::NewRecord { previous },
        save_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, GroundTruth, PlayerResponse};
    use crate::scoring::{ScoreState, TrialOutcome};
    use crate::storage::MemoryScoreStore;
    use time::macros::datetime;

    fn report(hits: u32, misses: u32, completed: bool) -> SessionReport {
        let mut score = ScoreState::new();
        let truth = GroundTruth {
            position_match: true,
            color_match: false,
        };
        for _ in 0..hits {
            score.record(&TrialOutcome::evaluate(0, truth, PlayerResponse::POSITION));
        }
        for _ in 0..misses {
            score.record(&TrialOutcome::evaluate(0, truth, PlayerResponse::NONE));
        }
        SessionReport {
            config: GameConfig::new(2, 3, 20, 1.0).unwrap(),
            score,
            outcomes: Vec::new(),
            completed,
            trials_presented: 20,
            error: None,
        }
    }

    /// Store whose writes always fail
    struct ReadOnlyStore(MemoryScoreStore);

    impl ScoreStore for ReadOnlyStore {
        fn load(
            &self,
            n: usize,
            grid_size: usize,
        ) -> Result<Option<HighScoreRecord>, PersistenceError> {
            self.0.load(n, grid_size)
        }

        fn save(&mut self, _record: &HighScoreRecord) -> Result<(), PersistenceError> {
            Err(PersistenceError::Io(std::io::Error::other("read-only")))
        }

        fn all(&self) -> Result<Vec<HighScoreRecord>, PersistenceError> {
            self.0.all()
        }
    }

    #[test]
    fn record_from_report() {
        let stamp = datetime!(2026-01-02 03:04:05 UTC);
        let record = HighScoreRecord::from_report_at(&report(3, 1, true), stamp).unwrap();
        assert_eq!(record.key(), "DN2_G3");
        assert_eq!(record.trial_count, Some(20));
        assert_eq!(record.score, 3);
        assert_eq!(record.total, 4);
        assert!((record.accuracy - 75.0).abs() < 1e-9);
    }

    #[test]
    fn record_keys_parse_back() {
        assert_eq!(parse_record_key("DN2_G8"), Some((2, 8)));
        assert_eq!(parse_record_key(&record_key(7, 3)), Some((7, 3)));
        assert_eq!(parse_record_key("DN2G8"), None);
        assert_eq!(parse_record_key("DNx_G8"), None);
    }

    #[test]
    fn legacy_entry_takes_level_from_key() {
        let value = serde_json::json!({
            "accuracy": 95.0,
            "score": 19,
            "total": 20,
            "date": "2025-01-01 10:00:00"
        });
        let record = StoredRecord::deserialize(&value)
            .unwrap()
            .into_record("DN2_G8")
            .unwrap();
        assert_eq!((record.n, record.grid_size), (2, 8));
        assert_eq!(record.trial_count, None);
        assert_eq!(record.score, 19);
        assert_eq!(record.timestamp, datetime!(2025-01-01 10:00:00 UTC));
    }

    #[test]
    fn legacy_entry_under_foreign_key_is_rejected() {
        let value = serde_json::json!({
            "accuracy": 95.0,
            "score": 19,
            "total": 20,
            "date": "2025-01-01 10:00:00"
        });
        let stored = StoredRecord::deserialize(&value).unwrap();
        assert!(stored.into_record("best").is_none());
    }

    #[test]
    fn partial_sessions_are_not_eligible() {
        assert!(HighScoreRecord::from_report(&report(3, 1, false)).is_none());
        let mut store = MemoryScoreStore::default();
        let submission = submit_high_score(&mut store, &report(3, 1, false));
        assert_eq!(submission.status, RecordStatus::NotEligible);
        assert!(store.all().unwrap().is_empty());
    }

    #[test]
    fn sessions_without_matches_are_not_eligible() {
        let mut store = MemoryScoreStore::default();
        let submission = submit_high_score(&mut store, &report(0, 0, true));
        assert_eq!(submission.status, RecordStatus::NotEligible);
    }

    #[test]
    fn first_result_is_a_record() {
        let mut store = MemoryScoreStore::default();
        let submission = submit_high_score(&mut store, &report(1, 1, true));
        assert_eq!(submission.status, RecordStatus::NewRecord { previous: None });
        assert!(submission.save_error.is_none());
        assert_eq!(store.load(2, 3).unwrap().unwrap().score, 1);
    }

    #[test]
    fn only_strictly_better_results_replace() {
        let mut store = MemoryScoreStore::default();
        submit_high_score(&mut store, &report(1, 1, true));

        let tie = submit_high_score(&mut store, &report(2, 2, true));
        assert!(matches!(tie.status, RecordStatus::NotImproved { .. }));
        assert_eq!(store.load(2, 3).unwrap().unwrap().score, 1);

        let better = submit_high_score(&mut store, &report(3, 1, true));
        assert!(better.status.is_new_record());
        assert_eq!(store.load(2, 3).unwrap().unwrap().score, 3);
    }

    #[test]
    fn legacy_best_survives_a_weaker_result() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        let legacy = serde_json::json!({
            "DN2_G3": { "accuracy": 95.0, "score": 19, "total": 20, "date": "2025-01-01 10:00:00" }
        });
        std::fs::write(&path, legacy.to_string()).unwrap();
        let mut store = crate::storage::JsonScoreStore::new(&path);

        let submission = submit_high_score(&mut store, &report(1, 2, true));
        assert!(matches!(submission.status, RecordStatus::NotImproved { .. }));
        let best = store.load(2, 3).unwrap().unwrap();
        assert_eq!(best.score, 19);
        assert_eq!(best.trial_count, None);
    }

    #[test]
    fn save_failure_is_reported_not_fatal() {
        let mut store = ReadOnlyStore(MemoryScoreStore::default());
        let submission = submit_high_score(&mut store, &report(2, 0, true));
        assert!(submission.status.is_new_record());
        assert!(submission.save_error.is_some());
    }
}
