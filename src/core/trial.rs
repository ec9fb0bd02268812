//! Trials, sequences and derived ground truth

use super::{Channel, Stimulus};

/// A stimulus at its place in the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trial {
    pub index: usize,
    pub stimulus: Stimulus,
}

/// Whether each channel repeats the stimulus shown `n` trials earlier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroundTruth {
    pub position_match: bool,
    pub color_match: bool,
}

impl GroundTruth {
    /// Compare a stimulus against the one `n` trials back
    #[must_use]
    pub fn between(current: &Stimulus, back: &Stimulus) -> Self {
        Self {
            position_match: current.position == back.position,
            color_match: current.color == back.color,
        }
    }

    #[must_use]
    pub const fn channel(self, channel: Channel) -> bool {
        match channel {
            Channel::Position => self.position_match,
            Channel::Color => self.color_match,
        }
    }
}

/// What the player claimed during a trial's response window
///
/// The default (no key pressed) claims nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerResponse {
    pub claims_position_match: bool,
    pub claims_color_match: bool,
}

impl PlayerResponse {
    pub const NONE: Self = Self {
        claims_position_match: false,
        claims_color_match: false,
    };
    pub const POSITION: Self = Self {
        claims_position_match: true,
        claims_color_match: false,
    };
    pub const COLOR: Self = Self {
        claims_position_match: false,
        claims_color_match: true,
    };
    /// Shorthand for claiming both channels at once
    pub const BOTH: Self = Self {
        claims_position_match: true,
        claims_color_match: true,
    };

    #[must_use]
    pub const fn channel(self, channel: Channel) -> bool {
        match channel {
            Channel::Position => self.claims_position_match,
            Channel::Color => self.claims_color_match,
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        !self.claims_position_match && !self.claims_color_match
    }
}

/// An N-back trial sequence
///
/// Stores the look-back distance so ground truth can be re-derived for any trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    n: usize,
    trials: Vec<Trial>,
}

impl Sequence {
    /// Wrap a list of stimuli, numbering them from 0
    #[must_use]
    pub fn from_stimuli(n: usize, stimuli: impl IntoIterator<Item = Stimulus>) -> Self {
        let trials = stimuli
            .into_iter()
            .enumerate()
            .map(|(index, stimulus)| Trial { index, stimulus })
            .collect();
        Self { n, trials }
    }

    #[inline]
    #[must_use]
    pub const fn n(&self) -> usize {
        self.n
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.trials.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Trial> {
        self.trials.get(index)
    }

    /// Ground truth for trial `index`, or `None` inside the first `n` trials
    #[must_use]
    pub fn ground_truth(&self, index: usize) -> Option<GroundTruth> {
        if index < self.n {
            return None;
        }
        let current = self.trials.get(index)?;
        let back = &self.trials[index - self.n];
        Some(GroundTruth::between(&current.stimulus, &back.stimulus))
    }

    /// Number of trials whose ground truth is a match on `channel`
    #[must_use]
    pub fn possible_matches(&self, channel: Channel) -> usize {
        (self.n..self.trials.len())
            .filter_map(|i| self.ground_truth(i))
            .filter(|truth| truth.channel(channel))
            .count()
    }
}
