//! Game configuration and validation
//!
//! Every entry point (CLI flags, the settings wizard, tests) builds a
//! [`GameConfig`] through [`GameConfig::new`], so range checks live in one place.

use super::ConfigError;
use std::ops::RangeInclusive;
use std::time::Duration;

/// Accepted N-back levels
pub const N_RANGE: RangeInclusive<usize> = 1..=8;

/// Accepted grid side lengths
pub const GRID_SIZE_RANGE: RangeInclusive<usize> = 3..=9;

/// Trial counts offered by the settings wizard
pub const TRIAL_OPTIONS: [usize; 6] = [20, 30, 40, 50, 60, 80];

/// Response windows (seconds) offered by the settings wizard
pub const DISPLAY_TIME_OPTIONS: [f64; 5] = [1.0, 1.5, 2.0, 2.5, 3.0];

pub const DEFAULT_N: usize = 2;
pub const DEFAULT_GRID_SIZE: usize = 8;
pub const DEFAULT_TRIALS: usize = 20;
pub const DEFAULT_DISPLAY_TIME: f64 = 2.0;

/// Validated settings for one game session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    n: usize,
    grid_size: usize,
    trial_count: usize,
    display_time: Duration,
}

impl GameConfig {
    /// Build a configuration, rejecting out-of-range values
    ///
    /// `trial_count` counts every presented stimulus, including the first `n`
    /// memorize-only trials, so it must exceed `n`.
    ///
    /// # Errors
    /// Returns [`ConfigError`] naming the first invalid field. Values are never clamped.
    pub fn new(
        n: usize,
        grid_size: usize,
        trial_count: usize,
        display_time: f64,
    ) -> Result<Self, ConfigError> {
        if !N_RANGE.contains(&n) {
            return Err(ConfigError::NBack(n));
        }
        if !GRID_SIZE_RANGE.contains(&grid_size) {
            return Err(ConfigError::GridSize(grid_size));
        }
        if trial_count <= n {
            return Err(ConfigError::TrialCount { trial_count, n });
        }
        if !display_time.is_finite() || display_time <= 0.0 {
            return Err(ConfigError::DisplayTime(display_time));
        }

        Ok(Self {
            n,
            grid_size,
            trial_count,
            display_time: Duration::from_secs_f64(display_time),
        })
    }

    #[inline]
    #[must_use]
    pub const fn n(&self) -> usize {
        self.n
    }

    #[inline]
    #[must_use]
    pub const fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Number of cells on the grid
    #[inline]
    #[must_use]
    pub const fn positions(&self) -> usize {
        self.grid_size * self.grid_size
    }

    #[inline]
    #[must_use]
    pub const fn trial_count(&self) -> usize {
        self.trial_count
    }

    /// Response window for each trial
    #[inline]
    #[must_use]
    pub const fn display_time(&self) -> Duration {
        self.display_time
    }

    /// Number of trials that are actually scored
    #[must_use]
    pub const fn scored_trials(&self) -> usize {
        self.trial_count - self.n
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            n: DEFAULT_N,
            grid_size: DEFAULT_GRID_SIZE,
            trial_count: DEFAULT_TRIALS,
            display_time: Duration::from_secs_f64(DEFAULT_DISPLAY_TIME),
        }
    }
}
