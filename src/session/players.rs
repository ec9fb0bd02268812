//! Automated players for the simulator and for tests
//!
//! A simulated player is a frontend: it sees stimuli only through
//! [`Renderer::display`] and answers through [`InputSource::poll_response`],
//! exactly like a human at the terminal.

use super::ports::{InputSource, Poll, Renderer, StimulusFrame};
use crate::core::{PlayerResponse, Stimulus};
use crate::scoring::{ScoreState, TrialOutcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

/// Built-in answering behaviors
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerKind {
    /// Remembers every stimulus and always answers correctly
    Perfect,
    /// Never presses a key
    Idle,
    /// Claims both channels on every trial
    Eager,
    /// Claims each channel at random with the given probability
    Guesser(f64),
}

impl PlayerKind {
    /// Parse a player name: "perfect", "idle", "eager", "guesser"
    ///
    /// Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "perfect" => Some(Self::Perfect),
            "idle" => Some(Self::Idle),
            "eager" => Some(Self::Eager),
            "guesser" => Some(Self::Guesser(0.3)),
            _ => None,
        }
    }
}

/// Frontend that answers on its own
pub struct SimulatedPlayer {
    kind: PlayerKind,
    rng: StdRng,
    seen: VecDeque<Stimulus>,
    pending: Option<PlayerResponse>,
}

impl SimulatedPlayer {
    #[must_use]
    pub fn new(kind: PlayerKind, seed: u64) -> Self {
        Self {
            kind,
            rng: StdRng::seed_from_u64(seed),
            seen: VecDeque::new(),
            pending: None,
        }
    }

    fn decide(&mut self, frame: &StimulusFrame<'_>) -> PlayerResponse {
        match self.kind {
            PlayerKind::Perfect => {
                let back = self.seen.front().filter(|_| self.seen.len() == frame.n);
                back.map_or(PlayerResponse::NONE, |back| PlayerResponse {
                    claims_position_match: back.position == frame.stimulus.position,
                    claims_color_match: back.color == frame.stimulus.color,
                })
            }
            PlayerKind::Idle => PlayerResponse::NONE,
            PlayerKind::Eager => PlayerResponse::BOTH,
            PlayerKind::Guesser(rate) => {
                let rate = rate.clamp(0.0, 1.0);
                PlayerResponse {
                    claims_position_match: self.rng.random_bool(rate),
                    claims_color_match: self.rng.random_bool(rate),
                }
            }
        }
    }
}

impl Renderer for SimulatedPlayer {
    fn display(&mut self, frame: &StimulusFrame<'_>) -> io::Result<()> {
        self.pending = (!frame.memorizing).then(|| self.decide(frame));

        self.seen.push_back(frame.stimulus);
        while self.seen.len() > frame.n {
            self.seen.pop_front();
        }
        Ok(())
    }

    fn feedback(&mut self, _outcome: &TrialOutcome, _score: &ScoreState) -> io::Result<()> {
        Ok(())
    }
}

impl InputSource for SimulatedPlayer {
    fn poll_response(&mut self, _timeout: Duration) -> io::Result<Poll> {
        Ok(match self.pending.take() {
            Some(response) if !response.is_empty() => Poll::Answered(response),
            _ => Poll::TimedOut,
        })
    }
}
