//! Error types for configuration, generation and persistence

use super::Channel;
use thiserror::Error;

/// Invalid game settings, reported before any trial runs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("N must be between 1 and 8, got {0}")]
    NBack(usize),

    #[error("grid size must be between 3 and 9, got {0}")]
    GridSize(usize),

    #[error("trial count must exceed N ({n}), got {trial_count}")]
    TrialCount { trial_count: usize, n: usize },

    #[error("display time must be a positive number of seconds, got {0}")]
    DisplayTime(f64),
}

/// A channel with fewer than two values cannot produce a controlled non-match
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationError {
    #[error("{channel} channel has {choices} value(s); at least 2 are required")]
    Degenerate { channel: Channel, choices: usize },
}

/// High-score storage failure; never fatal to gameplay
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("score file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("score file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no home directory available for the score file")]
    NoHomeDir,
}
