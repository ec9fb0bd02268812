//! Scores command
//!
//! Reads the high-score file for the plain-terminal listing.

use crate::core::PersistenceError;
use crate::storage::{HighScoreRecord, ScoreStore, TOP_SCORES};

/// Best records across all levels, at most [`TOP_SCORES`] of them
///
/// # Errors
/// Returns [`PersistenceError`] if the store cannot be read.
pub fn top_scores<S: ScoreStore + ?Sized>(
    store: &S,
) -> Result<Vec<HighScoreRecord>, PersistenceError> {
    let mut records = store.all()?;
    records.truncate(TOP_SCORES);
    Ok(records)
}
