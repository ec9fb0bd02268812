//! Display functions for command results

use super::formatters::{accuracy_text, create_progress_bar, level_label, stars};
use crate::commands::{SimulationConfig, SimulationResult};
use crate::core::Channel;
use crate::scoring::Rating;
use crate::storage::HighScoreRecord;
use colored::Colorize;

/// One row of the high-score table, without colors
#[must_use]
pub fn score_row(rank: usize, record: &HighScoreRecord) -> String {
    format!(
        "{:<4} {:<12} {:<12} {:<15} {:<12}",
        rank,
        level_label(record.n, record.grid_size),
        format!("{:.1}%", record.accuracy),
        format!("{}/{}", record.score, record.total),
        record.timestamp.date().to_string(),
    )
}

/// Print the high-score table, best first
pub fn print_scores_table(records: &[HighScoreRecord]) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "🏆 HIGH SCORES 🏆".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    if records.is_empty() {
        println!("\n{}", "No high scores yet!".dimmed());
        println!("{}", "Play some games to set records.".dimmed());
        return;
    }

    println!(
        "\n{}",
        format!(
            "{:<4} {:<12} {:<12} {:<15} {:<12}",
            "#", "Level", "Accuracy", "Score", "Date"
        )
        .bold()
    );
    println!("{}", "─".repeat(60).dimmed());

    for (i, record) in records.iter().enumerate() {
        let rank = i + 1;
        let row = score_row(rank, record);
        match rank {
            1 => println!("{}", row.green()),
            2 | 3 => println!("{}", row.blue()),
            _ => println!("{row}"),
        }
    }
}

/// Print the result of a simulation run
pub fn print_simulation_result(result: &SimulationResult, config: &SimulationConfig) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "SIMULATION RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    let game = &config.game;
    println!("\n⚙️  {}", "Configuration:".bright_cyan().bold());
    println!(
        "   Level:            {}",
        level_label(game.n(), game.grid_size())
    );
    println!("   Trials:           {}", game.trial_count());
    println!("   Player:           {:?}", config.player);
    println!("   Strategy:         {}", config.strategy);
    println!("   Seed:             {}", config.seed);

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Sessions:         {}", result.sessions);
    println!(
        "   Mean accuracy:    {}",
        accuracy_text(result.mean_accuracy).bright_yellow().bold()
    );
    println!(
        "   Best / worst:     {} / {}",
        accuracy_text(result.best_accuracy).green(),
        accuracy_text(result.worst_accuracy).yellow()
    );
    println!(
        "   Points:           {}/{}",
        result.total_points, result.total_possible
    );
    println!("   False alarms:     {}", result.false_positives);
    if result.without_matches > 0 {
        println!(
            "   No matches:       {} sessions",
            result.without_matches
        );
    }
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Sessions/second:  {:.1}", result.sessions_per_second());

    println!("\n🎯 {}", "Observed match rates:".bright_cyan().bold());
    for channel in Channel::ALL {
        let rate = result
            .match_rate(channel)
            .map_or_else(|| "N/A".to_string(), |rate| format!("{:.1}%", rate * 100.0));
        println!("   {:<17} {rate}", format!("{channel}:"));
    }

    let rated = result.sessions - result.without_matches;
    if rated == 0 {
        return;
    }
    println!("\n📈 {}", "Ratings:".bright_cyan().bold());
    for rating in Rating::ALL.iter().rev() {
        let count = result
            .rating_distribution
            .get(rating)
            .copied()
            .unwrap_or(0);
        let pct = count as f64 / rated as f64 * 100.0;
        let bar = create_progress_bar(pct, 100.0, 30);
        println!(
            "   {:<17} {:<6} {} {count:4} ({pct:5.1}%)",
            rating.label(),
            stars(*rating),
            bar.green()
        );
    }
}
