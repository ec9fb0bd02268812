//! Match evaluation and scoring

mod outcome;
mod score;

pub use outcome::{Outcome, TrialOutcome};
pub use score::{Rating, ScoreState, rounded_percent};
