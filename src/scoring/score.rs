//! Running score and accuracy

use super::outcome::{Outcome, TrialOutcome};
use crate::core::Channel;

/// Counters accumulated over the scored trials of a session
///
/// Only [`Outcome::CorrectMatch`] earns points. False positives and misses
/// are counted for reporting but never reduce the score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub correct_position: u32,
    pub correct_color: u32,
    pub false_position: u32,
    pub false_color: u32,
    pub missed_position: u32,
    pub missed_color: u32,
    pub possible_position: u32,
    pub possible_color: u32,
    pub scored_trials: u32,
}

impl ScoreState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one trial outcome into the counters
    pub fn record(&mut self, outcome: &TrialOutcome) {
        self.scored_trials += 1;
        if outcome.truth.position_match {
            self.possible_position += 1;
        }
        if outcome.truth.color_match {
            self.possible_color += 1;
        }

        match outcome.position {
            Outcome::CorrectMatch => self.correct_position += 1,
            Outcome::FalsePositive => self.false_position += 1,
            Outcome::MissedMatch => self.missed_position += 1,
            Outcome::CorrectNonMatch => {}
        }
        match outcome.color {
            Outcome::CorrectMatch => self.correct_color += 1,
            Outcome::FalsePositive => self.false_color += 1,
            Outcome::MissedMatch => self.missed_color += 1,
            Outcome::CorrectNonMatch => {}
        }
    }

    #[must_use]
    pub const fn correct(&self, channel: Channel) -> u32 {
        match channel {
            Channel::Position => self.correct_position,
            Channel::Color => self.correct_color,
        }
    }

    #[must_use]
    pub const fn false_positives(&self, channel: Channel) -> u32 {
        match channel {
            Channel::Position => self.false_position,
            Channel::Color => self.false_color,
        }
    }

    #[must_use]
    pub const fn missed(&self, channel: Channel) -> u32 {
        match channel {
            Channel::Position => self.missed_position,
            Channel::Color => self.missed_color,
        }
    }

    #[must_use]
    pub const fn possible(&self, channel: Channel) -> u32 {
        match channel {
            Channel::Position => self.possible_position,
            Channel::Color => self.possible_color,
        }
    }

    /// Points earned: correct matches over both channels
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.correct_position + self.correct_color
    }

    /// Matches that could have been claimed over both channels
    #[must_use]
    pub const fn total_possible(&self) -> u32 {
        self.possible_position + self.possible_color
    }

    /// Percentage of possible matches that were claimed
    ///
    /// Returns `None` when no match occurred in the scored trials.
    #[must_use]
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.total_possible();
        (total > 0).then(|| f64::from(self.points()) / f64::from(total) * 100.0)
    }

    /// Accuracy for a single channel
    #[must_use]
    pub fn channel_accuracy(&self, channel: Channel) -> Option<f64> {
        let total = self.possible(channel);
        (total > 0).then(|| f64::from(self.correct(channel)) / f64::from(total) * 100.0)
    }
}

/// Performance tier shown at the end of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rating {
    TryAgain,
    KeepPracticing,
    GoodJob,
    Excellent,
    Outstanding,
}

impl Rating {
    pub const ALL: [Self; 5] = [
        Self::TryAgain,
        Self::KeepPracticing,
        Self::GoodJob,
        Self::Excellent,
        Self::Outstanding,
    ];

    /// Tier for a whole-number percentage (inclusive lower bounds)
    #[must_use]
    pub const fn from_percent(percent: u32) -> Self {
        match percent {
            90.. => Self::Outstanding,
            75..=89 => Self::Excellent,
            60..=74 => Self::GoodJob,
            40..=59 => Self::KeepPracticing,
            _ => Self::TryAgain,
        }
    }

    /// Tier for a raw accuracy, rounded half away from zero to a whole percent first
    ///
    /// So 39.4 rates as 39 and 39.5 as 40.
    #[must_use]
    pub fn from_accuracy(accuracy: f64) -> Self {
        Self::from_percent(rounded_percent(accuracy))
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Outstanding => "OUTSTANDING!",
            Self::Excellent => "EXCELLENT!",
            Self::GoodJob => "GOOD JOB!",
            Self::KeepPracticing => "KEEP PRACTICING!",
            Self::TryAgain => "TRY AGAIN!",
        }
    }

    /// Star count, 1 to 5
    #[must_use]
    pub const fn stars(self) -> usize {
        match self {
            Self::TryAgain => 1,
            Self::KeepPracticing => 2,
            Self::GoodJob => 3,
            Self::Excellent => 4,
            Self::Outstanding => 5,
        }
    }
}

/// Round an accuracy to a whole percent, clamped to `0..=100`
#[must_use]
pub fn rounded_percent(accuracy: f64) -> u32 {
    if accuracy.is_nan() {
        return 0;
    }
    accuracy.round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GroundTruth, PlayerResponse};
    use rstest::rstest;

    fn outcome(pos: bool, col: bool, response: PlayerResponse) -> TrialOutcome {
        TrialOutcome::evaluate(
            0,
            GroundTruth {
                position_match: pos,
                color_match: col,
            },
            response,
        )
    }

    #[test]
    fn empty_score_has_no_accuracy() {
        let score = ScoreState::new();
        assert_eq!(score.accuracy(), None);
        assert_eq!(score.channel_accuracy(Channel::Color), None);
        assert_eq!(score.points(), 0);
    }

    #[test]
    fn non_matching_trials_leave_accuracy_undefined() {
        let mut score = ScoreState::new();
        score.record(&outcome(false, false, PlayerResponse::BOTH));
        score.record(&outcome(false, false, PlayerResponse::NONE));
        assert_eq!(score.accuracy(), None);
        assert_eq!(score.false_position, 1);
        assert_eq!(score.false_color, 1);
        assert_eq!(score.scored_trials, 2);
    }

    #[test]
    fn counters_follow_outcomes() {
        let mut score = ScoreState::new();
        score.record(&outcome(true, true, PlayerResponse::POSITION));
        score.record(&outcome(false, true, PlayerResponse::BOTH));
        score.record(&outcome(true, false, PlayerResponse::NONE));

        assert_eq!(score.correct_position, 1);
        assert_eq!(score.correct_color, 1);
        assert_eq!(score.missed_position, 1);
        assert_eq!(score.missed_color, 1);
        assert_eq!(score.false_position, 1);
        assert_eq!(score.false_color, 0);
        assert_eq!(score.possible_position, 2);
        assert_eq!(score.possible_color, 2);
        assert_eq!(score.points(), 2);
        assert_eq!(score.total_possible(), 4);
        assert_eq!(score.accuracy(), Some(50.0));
        assert_eq!(score.channel_accuracy(Channel::Position), Some(50.0));
    }

    #[test]
    fn wrong_answers_never_reduce_points() {
        let mut score = ScoreState::new();
        score.record(&outcome(true, true, PlayerResponse::BOTH));
        let mut last = score.points();
        for _ in 0..10 {
            score.record(&outcome(false, false, PlayerResponse::BOTH));
            score.record(&outcome(true, true, PlayerResponse::NONE));
            assert!(score.points() >= last);
            last = score.points();
        }
        assert_eq!(score.points(), 2);
    }

    #[rstest]
    #[case(0, Rating::TryAgain)]
    #[case(39, Rating::TryAgain)]
    #[case(40, Rating::KeepPracticing)]
    #[case(59, Rating::KeepPracticing)]
    #[case(60, Rating::GoodJob)]
    #[case(74, Rating::GoodJob)]
    #[case(75, Rating::Excellent)]
    #[case(89, Rating::Excellent)]
    #[case(90, Rating::Outstanding)]
    #[case(100, Rating::Outstanding)]
    fn rating_boundaries(#[case] percent: u32, #[case] expected: Rating) {
        assert_eq!(Rating::from_percent(percent), expected);
        assert_eq!(Rating::from_accuracy(f64::from(percent)), expected);
    }

    #[rstest]
    #[case(39.4, Rating::TryAgain)]
    #[case(39.5, Rating::KeepPracticing)]
    #[case(59.49, Rating::KeepPracticing)]
    #[case(74.5, Rating::Excellent)]
    #[case(89.9, Rating::Outstanding)]
    fn rating_rounds_before_comparing(#[case] accuracy: f64, #[case] expected: Rating) {
        assert_eq!(Rating::from_accuracy(accuracy), expected);
    }

    #[test]
    fn rounded_percent_clamps() {
        assert_eq!(rounded_percent(-3.0), 0);
        assert_eq!(rounded_percent(150.0), 100);
        assert_eq!(rounded_percent(f64::NAN), 0);
    }

    #[test]
    fn stars_increase_with_tier() {
        let stars: Vec<usize> = Rating::ALL.iter().map(|r| r.stars()).collect();
        assert_eq!(stars, vec![1, 2, 3, 4, 5]);
    }
}
