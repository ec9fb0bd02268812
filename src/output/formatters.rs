//! Formatting utilities for terminal output

use crate::scoring::{Outcome, Rating, ScoreState};

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// One star per rating tier
#[must_use]
pub fn stars(rating: Rating) -> String {
    "★".repeat(rating.stars())
}

/// Accuracy with one decimal, or "N/A" when no match occurred
#[must_use]
pub fn accuracy_text(accuracy: Option<f64>) -> String {
    accuracy.map_or_else(|| "N/A".to_string(), |acc| format!("{acc:.1}%"))
}

/// Running score as "points/possible (accuracy)"
#[must_use]
pub fn score_line(score: &ScoreState) -> String {
    format!(
        "{}/{} ({})",
        score.points(),
        score.total_possible(),
        accuracy_text(score.accuracy())
    )
}

/// Level name used in score tables, e.g. "N-2 Grid:8"
#[must_use]
pub fn level_label(n: usize, grid_size: usize) -> String {
    format!("N-{n} Grid:{grid_size}")
}

#[must_use]
pub const fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::CorrectMatch => "match ✓",
        Outcome::CorrectNonMatch => "no match ✓",
        Outcome::FalsePositive => "false alarm ✗",
        Outcome::MissedMatch => "missed ✗",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GroundTruth, PlayerResponse};
    use crate::scoring::TrialOutcome;

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3.0, 0.0, 4), "░░░░");
    }

    #[test]
    fn stars_per_rating() {
        assert_eq!(stars(Rating::Outstanding), "★★★★★");
        assert_eq!(stars(Rating::TryAgain), "★");
    }

    #[test]
    fn accuracy_and_score_text() {
        assert_eq!(accuracy_text(None), "N/A");
        assert_eq!(accuracy_text(Some(66.666)), "66.7%");

        let mut score = ScoreState::new();
        assert_eq!(score_line(&score), "0/0 (N/A)");
        let truth = GroundTruth {
            position_match: true,
            color_match: true,
        };
        score.record(&TrialOutcome::evaluate(2, truth, PlayerResponse::POSITION));
        assert_eq!(score_line(&score), "1/2 (50.0%)");
    }

    #[test]
    fn level_labels() {
        assert_eq!(level_label(2, 8), "N-2 Grid:8");
    }
}
