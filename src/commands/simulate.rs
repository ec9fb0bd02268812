//! Simulate command
//!
//! Plays many sessions with an automated player and aggregates the results.
//! Useful for checking the generator's match rates and the rating scale.

use crate::core::{Channel, GameConfig, GenerationError};
use crate::scoring::Rating;
use crate::sequence::{SequenceGenerator, StrategyType};
use crate::session::{PlayerKind, Session, SessionReport, SimulatedPlayer};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};
use tracing::info;

/// Keeps the player's random stream apart from the sequence's
const PLAYER_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Settings for a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub game: GameConfig,
    pub player: PlayerKind,
    pub sessions: usize,
    pub strategy: String,
    /// Session `i` uses `seed + i`
    pub seed: u64,
    pub show_progress: bool,
}

/// Aggregate statistics over all simulated sessions
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub sessions: usize,
    pub completed: usize,
    /// Sessions in which no match occurred on either channel
    pub without_matches: usize,
    /// Mean accuracy over sessions that had at least one match
    pub mean_accuracy: Option<f64>,
    pub best_accuracy: Option<f64>,
    pub worst_accuracy: Option<f64>,
    pub total_points: u64,
    pub total_possible: u64,
    pub false_positives: u64,
    pub scored_trials: u64,
    pub possible_position: u64,
    pub possible_color: u64,
    pub rating_distribution: FxHashMap<Rating, usize>,
    pub duration: Duration,
}

impl SimulationResult {
    /// Aggregate finished session reports
    #[must_use]
    pub fn from_reports(reports: &[SessionReport], duration: Duration) -> Self {
        let mut rating_distribution: FxHashMap<Rating, usize> = FxHashMap::default();
        let mut accuracies = Vec::with_capacity(reports.len());
        let mut result = Self {
            sessions: reports.len(),
            completed: 0,
            without_matches: 0,
            mean_accuracy: None,
            best_accuracy: None,
            worst_accuracy: None,
            total_points: 0,
            total_possible: 0,
            false_positives: 0,
            scored_trials: 0,
            possible_position: 0,
            possible_color: 0,
            rating_distribution: FxHashMap::default(),
            duration,
        };

        for report in reports {
            let score = &report.score;
            result.completed += usize::from(report.completed);
            result.total_points += u64::from(score.points());
            result.total_possible += u64::from(score.total_possible());
            result.false_positives += u64::from(score.false_position + score.false_color);
            result.scored_trials += u64::from(score.scored_trials);
            result.possible_position += u64::from(score.possible(Channel::Position));
            result.possible_color += u64::from(score.possible(Channel::Color));

            match report.accuracy() {
                Some(accuracy) => {
                    accuracies.push(accuracy);
                    *rating_distribution
                        .entry(Rating::from_accuracy(accuracy))
                        .or_insert(0) += 1;
                }
                None => result.without_matches += 1,
            }
        }

        if !accuracies.is_empty() {
            result.mean_accuracy = Some(accuracies.iter().sum::<f64>() / accuracies.len() as f64);
            result.best_accuracy = accuracies.iter().copied().reduce(f64::max);
            result.worst_accuracy = accuracies.iter().copied().reduce(f64::min);
        }
        result.rating_distribution = rating_distribution;
        result
    }

    /// Fraction of scored trials that were matches on `channel`
    #[must_use]
    pub fn match_rate(&self, channel: Channel) -> Option<f64> {
        let possible = match channel {
            Channel::Position => self.possible_position,
            Channel::Color => self.possible_color,
        };
        (self.scored_trials > 0).then(|| possible as f64 / self.scored_trials as f64)
    }

    #[must_use]
    pub fn sessions_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.sessions as f64 / secs
        } else {
            0.0
        }
    }
}

/// Run every session in parallel
///
/// # Errors
/// Returns [`GenerationError`] if the configuration cannot produce sequences.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationResult, GenerationError> {
    // Fail once up front rather than once per session
    SequenceGenerator::new(&config.game)?;

    info!(
        sessions = config.sessions,
        player = ?config.player,
        strategy = %config.strategy,
        "simulation started"
    );

    let pb = if config.show_progress {
        let pb = ProgressBar::new(config.sessions as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░");
        pb.set_style(style);
        pb
    } else {
        ProgressBar::hidden()
    };

    let start = Instant::now();
    let reports = (0..config.sessions)
        .into_par_iter()
        .map(|i| -> Result<SessionReport, GenerationError> {
            let seed = config.seed.wrapping_add(i as u64);
            let strategy = StrategyType::from_name(&config.strategy, Some(seed));
            let session = Session::new(config.game, strategy)?;
            let mut player = SimulatedPlayer::new(config.player, seed ^ PLAYER_SEED_SALT);
            let report = session.run(&mut player);
            pb.inc(1);
            Ok(report)
        })
        .collect::<Result<Vec<_>, _>>()?;
    pb.finish_with_message("Complete!");

    let result = SimulationResult::from_reports(&reports, start.elapsed());
    info!(
        sessions = result.sessions,
        mean_accuracy = ?result.mean_accuracy,
        "simulation finished"
    );
    Ok(result)
}
