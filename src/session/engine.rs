//! Game session state machine
//!
//! `Setup → Presenting(i) → AwaitingResponse(i) → Scored(i) → Presenting(i+1)`,
//! repeated until `Finished`
//!
//! Trials inside the first `n` pass through `AwaitingResponse` and `Scored`
//! without touching the score.

use super::ports::{InputSource, Poll, Renderer, StimulusFrame};
use crate::core::{GameConfig, GenerationError, PlayerResponse, Sequence};
use crate::scoring::{Rating, ScoreState, TrialOutcome};
use crate::sequence::{MatchStrategy, SequenceGenerator};
use std::io;
use tracing::{debug, error, info};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Presenting(usize),
    AwaitingResponse(usize),
    Scored(usize),
    /// `completed` is false after a quit or a frontend failure
    Finished { completed: bool },
}

/// One game: the sequence, the running score and the recorded outcomes
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    sequence: Sequence,
    score: ScoreState,
    outcomes: Vec<TrialOutcome>,
    phase: Phase,
    presented: usize,
    error: Option<String>,
}

impl Session {
    /// Generate a fresh sequence with the built-in palette
    ///
    /// # Errors
    /// Returns [`GenerationError`] if the configuration cannot produce non-matches.
    pub fn new<S: MatchStrategy>(config: GameConfig, strategy: S) -> Result<Self, GenerationError> {
        let sequence = SequenceGenerator::new(&config)?.generate(strategy);
        Ok(Self::with_sequence(config, sequence))
    }

    /// Play a prepared sequence
    ///
    /// The sequence length takes precedence over `config.trial_count()`.
    #[must_use]
    pub fn with_sequence(config: GameConfig, sequence: Sequence) -> Self {
        Self {
            config,
            sequence,
            score: ScoreState::new(),
            outcomes: Vec::new(),
            phase: Phase::Setup,
            presented: 0,
            error: None,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    #[must_use]
    pub const fn score(&self) -> &ScoreState {
        &self.score
    }

    #[must_use]
    pub fn outcomes(&self) -> &[TrialOutcome] {
        &self.outcomes
    }

    /// Leave `Setup` for the first trial
    pub fn start(&mut self) {
        if self.phase == Phase::Setup {
            self.phase = if self.sequence.is_empty() {
                Phase::Finished { completed: true }
            } else {
                Phase::Presenting(0)
            };
        }
    }

    /// Frame for the trial currently on screen, if any
    #[must_use]
    pub fn frame(&self) -> Option<StimulusFrame<'_>> {
        let index = match self.phase {
            Phase::Presenting(i) | Phase::AwaitingResponse(i) | Phase::Scored(i) => i,
            Phase::Setup | Phase::Finished { .. } => return None,
        };
        let trial = self.sequence.get(index)?;
        Some(StimulusFrame {
            stimulus: trial.stimulus,
            index,
            trial_count: self.sequence.len(),
            n: self.sequence.n(),
            grid_size: self.config.grid_size(),
            memorizing: index < self.sequence.n(),
            score: &self.score,
        })
    }

    /// Display the current trial and open its response window
    ///
    /// Does nothing outside `Presenting`.
    ///
    /// # Errors
    /// Propagates renderer failures; the phase is left unchanged.
    pub fn present<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> io::Result<()> {
        let Phase::Presenting(index) = self.phase else {
            return Ok(());
        };
        if let Some(frame) = self.frame() {
            renderer.display(&frame)?;
        }
        self.presented = self.presented.max(index + 1);
        self.phase = Phase::AwaitingResponse(index);
        Ok(())
    }

    /// Close the response window with the player's response
    ///
    /// Returns the outcome for scored trials and `None` for memorize-only
    /// trials or when no window is open.
    pub fn respond(&mut self, response: PlayerResponse) -> Option<TrialOutcome> {
        let Phase::AwaitingResponse(index) = self.phase else {
            return None;
        };
        self.phase = Phase::Scored(index);

        let truth = self.sequence.ground_truth(index)?;
        let outcome = TrialOutcome::evaluate(index, truth, response);
        self.score.record(&outcome);
        self.outcomes.push(outcome);
        debug!(
            trial = index,
            position = ?outcome.position,
            color = ?outcome.color,
            points = self.score.points(),
            "trial scored"
        );
        Some(outcome)
    }

    /// Move from `Scored(i)` to the next trial, or finish after the last one
    pub fn advance(&mut self) {
        if let Phase::Scored(index) = self.phase {
            let next = index + 1;
            self.phase = if next < self.sequence.len() {
                Phase::Presenting(next)
            } else {
                Phase::Finished { completed: true }
            };
        }
    }

    /// Stop immediately, keeping everything recorded so far
    pub fn abort(&mut self) {
        if !matches!(self.phase, Phase::Finished { .. }) {
            self.phase = Phase::Finished { completed: false };
        }
    }

    fn fail(&mut self, err: &io::Error) {
        error!(phase = ?self.phase, "frontend failure: {err}");
        self.error = Some(err.to_string());
        self.abort();
    }

    /// Drive the whole session against a frontend
    ///
    /// A quit or a frontend error ends the session early; outcomes recorded
    /// before that point are kept in the report.
    pub fn run<F: Renderer + InputSource + ?Sized>(mut self, frontend: &mut F) -> SessionReport {
        info!(
            n = self.config.n(),
            grid_size = self.config.grid_size(),
            trials = self.sequence.len(),
            "session started"
        );

        loop {
            match self.phase {
                Phase::Setup => self.start(),
                Phase::Presenting(_) => {
                    if let Err(err) = self.present(frontend) {
                        self.fail(&err);
                    }
                }
                Phase::AwaitingResponse(_) => {
                    match frontend.poll_response(self.config.display_time()) {
                        Ok(poll) => match poll.response() {
                            Some(response) => {
                                if let Some(outcome) = self.respond(response)
                                    && let Err(err) = frontend.feedback(&outcome, &self.score)
                                {
                                    self.fail(&err);
                                }
                            }
                            None => {
                                info!("session quit by player");
                                self.abort();
                            }
                        },
                        Err(err) => self.fail(&err),
                    }
                }
                Phase::Scored(_) => self.advance(),
                Phase::Finished { .. } => break,
            }
        }

        let report = self.into_report();
        info!(
            completed = report.completed,
            points = report.score.points(),
            possible = report.score.total_possible(),
            "session finished"
        );
        report
    }

    /// Finalize into a report, whatever the current phase
    #[must_use]
    pub fn into_report(self) -> SessionReport {
        SessionReport {
            completed: matches!(self.phase, Phase::Finished { completed: true }),
            config: self.config,
            score: self.score,
            outcomes: self.outcomes,
            trials_presented: self.presented,
            error: self.error,
        }
    }
}

/// Final (or partial) results of a session
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub config: GameConfig,
    pub score: ScoreState,
    pub outcomes: Vec<TrialOutcome>,
    pub completed: bool,
    pub trials_presented: usize,
    pub error: Option<String>,
}

impl SessionReport {
    /// Accuracy over the scored trials, `None` if no match occurred
    #[must_use]
    pub fn accuracy(&self) -> Option<f64> {
        self.score.accuracy()
    }

    #[must_use]
    pub fn rating(&self) -> Option<Rating> {
        self.accuracy().map(Rating::from_accuracy)
    }
}
