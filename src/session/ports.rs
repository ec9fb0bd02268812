//! Collaborator interfaces consumed by a running session
//!
//! The session never touches the terminal directly. A frontend implements
//! [`Renderer`] and [`InputSource`]; the TUI, the simulator and the tests each
//! provide their own.

use crate::core::{PlayerResponse, Stimulus};
use crate::scoring::{ScoreState, TrialOutcome};
use std::io;
use std::time::Duration;

/// Everything a renderer needs to draw one trial
#[derive(Debug, Clone, Copy)]
pub struct StimulusFrame<'a> {
    pub stimulus: Stimulus,
    pub index: usize,
    pub trial_count: usize,
    pub n: usize,
    pub grid_size: usize,
    /// Inside the first `n` trials: nothing to compare against yet
    pub memorizing: bool,
    pub score: &'a ScoreState,
}

/// Result of waiting for the player during one response window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    Answered(PlayerResponse),
    TimedOut,
    Quit,
}

impl Poll {
    /// The response to score, or `None` for a quit
    #[must_use]
    pub fn response(self) -> Option<PlayerResponse> {
        match self {
            Self::Answered(response) => Some(response),
            Self::TimedOut => Some(PlayerResponse::NONE),
            Self::Quit => None,
        }
    }
}

/// Presents stimuli and per-trial feedback
pub trait Renderer {
    /// Show a stimulus on the grid
    ///
    /// # Errors
    /// Returns any I/O error from the output device.
    fn display(&mut self, frame: &StimulusFrame<'_>) -> io::Result<()>;

    /// Show how a scored trial was judged
    ///
    /// # Errors
    /// Returns any I/O error from the output device.
    fn feedback(&mut self, outcome: &TrialOutcome, score: &ScoreState) -> io::Result<()>;
}

/// Collects at most one response per trial
pub trait InputSource {
    /// Block until a response, a quit, or `timeout` elapses
    ///
    /// # Errors
    /// Returns any I/O error from the input device.
    fn poll_response(&mut self, timeout: Duration) -> io::Result<Poll>;
}
