//! High-score persistence
//!
//! Sessions reach storage only through the [`ScoreStore`] port.

mod record;
mod store;

pub use record::{HighScoreRecord, RecordStatus, Submission, record_key, submit_high_score};
pub use store::{JsonScoreStore, MemoryScoreStore, SCORE_FILE_NAME, ScoreStore, TOP_SCORES};
