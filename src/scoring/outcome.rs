//! Per-trial match evaluation

use crate::core::{Channel, GroundTruth, PlayerResponse};

/// Result of judging one channel of one trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Match present and claimed
    CorrectMatch,
    /// No match and nothing claimed
    CorrectNonMatch,
    /// Claimed a match that did not occur
    FalsePositive,
    /// Failed to claim a match that did occur
    MissedMatch,
}

impl Outcome {
    /// Apply the decision table for a single channel
    #[must_use]
    pub const fn judge(is_match: bool, claimed: bool) -> Self {
        match (is_match, claimed) {
            (true, true) => Self::CorrectMatch,
            (true, false) => Self::MissedMatch,
            (false, true) => Self::FalsePositive,
            (false, false) => Self::CorrectNonMatch,
        }
    }

    /// Points awarded; wrong answers cost nothing
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::CorrectMatch => 1,
            Self::CorrectNonMatch | Self::FalsePositive | Self::MissedMatch => 0,
        }
    }

    #[must_use]
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::CorrectMatch | Self::CorrectNonMatch)
    }
}

/// Both channel outcomes for one scored trial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialOutcome {
    pub index: usize,
    pub truth: GroundTruth,
    pub response: PlayerResponse,
    pub position: Outcome,
    pub color: Outcome,
}

impl TrialOutcome {
    /// Evaluate a response against the ground truth of trial `index`
    #[must_use]
    pub const fn evaluate(index: usize, truth: GroundTruth, response: PlayerResponse) -> Self {
        Self {
            index,
            truth,
            response,
            position: Outcome::judge(truth.position_match, response.claims_position_match),
            color: Outcome::judge(truth.color_match, response.claims_color_match),
        }
    }

    #[must_use]
    pub const fn channel(&self, channel: Channel) -> Outcome {
        match channel {
            Channel::Position => self.position,
            Channel::Color => self.color,
        }
    }

    /// Points earned over both channels
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.position.points() + self.color.points()
    }

    /// True when neither channel was judged wrong
    #[must_use]
    pub const fn is_correct(&self) -> bool {
        self.position.is_correct() && self.color.is_correct()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn truth(position_match: bool, color_match: bool) -> GroundTruth {
        GroundTruth {
            position_match,
            color_match,
        }
    }

    #[test]
    fn decision_table() {
        assert_eq!(Outcome::judge(true, true), Outcome::CorrectMatch);
        assert_eq!(Outcome::judge(true, false), Outcome::MissedMatch);
        assert_eq!(Outcome::judge(false, true), Outcome::FalsePositive);
        assert_eq!(Outcome::judge(false, false), Outcome::CorrectNonMatch);
    }

    #[test]
    fn only_correct_matches_score() {
        assert_eq!(Outcome::CorrectMatch.points(), 1);
        assert_eq!(Outcome::CorrectNonMatch.points(), 0);
        assert_eq!(Outcome::FalsePositive.points(), 0);
        assert_eq!(Outcome::MissedMatch.points(), 0);
    }

    #[test]
    fn channels_are_independent() {
        let outcome = TrialOutcome::evaluate(3, truth(true, false), PlayerResponse::BOTH);
        assert_eq!(outcome.position, Outcome::CorrectMatch);
        assert_eq!(outcome.color, Outcome::FalsePositive);
        assert_eq!(outcome.points(), 1);
        assert!(!outcome.is_correct());
    }

    #[test]
    fn both_claim_on_dual_match_earns_two() {
        let outcome = TrialOutcome::evaluate(5, truth(true, true), PlayerResponse::BOTH);
        assert_eq!(outcome.points(), 2);
        assert!(outcome.is_correct());
    }

    #[test]
    fn silence_on_non_match_is_correct() {
        let outcome = TrialOutcome::evaluate(2, truth(false, false), PlayerResponse::NONE);
        assert_eq!(outcome.channel(Channel::Position), Outcome::CorrectNonMatch);
        assert_eq!(outcome.channel(Channel::Color), Outcome::CorrectNonMatch);
        assert_eq!(outcome.points(), 0);
        assert!(outcome.is_correct());
    }

    #[test]
    fn silence_on_match_is_missed() {
        let outcome = TrialOutcome::evaluate(2, truth(false, true), PlayerResponse::NONE);
        assert_eq!(outcome.color, Outcome::MissedMatch);
    }
}
