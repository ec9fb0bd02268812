//! TUI rendering with ratatui
//!
//! Menu, settings wizard, trial grid and results screens.

use super::app::{
    App, GameResults, MessageStyle, Screen, SettingsStep, default_display_time_option,
    default_trial_option,
};
use super::frontend::{Overlay, TrialView};
use crate::core::Color as DotColor;
use crate::core::config::{DISPLAY_TIME_OPTIONS, TRIAL_OPTIONS};
use crate::output::formatters::{accuracy_text, level_label, outcome_label, score_line, stars};
use crate::scoring::{Rating, TrialOutcome};
use crate::storage::{HighScoreRecord, RecordStatus, TOP_SCORES};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Row, Table, Wrap},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    let title = match app.screen {
        Screen::Menu => "DUAL N-BACK TRAINER".to_string(),
        Screen::Settings(step) => format!("GAME SETTINGS - Step {} of 4", step.number()),
        Screen::Ready => "GAME READY".to_string(),
        Screen::Help => "HELP GUIDE".to_string(),
        Screen::HighScores => "🏆 HIGH SCORES 🏆".to_string(),
        Screen::Results => match &app.results {
            Some(results) if !results.report.completed => "SESSION ENDED".to_string(),
            _ => "🏆 TRAINING COMPLETE 🏆".to_string(),
        },
    };
    render_header(f, chunks[0], &title);

    match app.screen {
        Screen::Menu => render_menu(f, chunks[1]),
        Screen::Settings(step) => render_settings(f, app, step, chunks[1]),
        Screen::Ready => render_ready(f, app, chunks[1]),
        Screen::Help => render_help(f, chunks[1]),
        Screen::HighScores => render_scores(f, &app.high_scores, chunks[1]),
        Screen::Results => {
            if let Some(results) = &app.results {
                render_results(f, results, chunks[1]);
            }
        }
    }

    render_status(f, app, chunks[2]);
}

/// Trial screen shown while a session runs
pub fn trial_ui(
    f: &mut Frame,
    view: &TrialView,
    overlay: Option<Overlay>,
    high_scores: &[HighScoreRecord],
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Progress
            Constraint::Min(5),    // Grid
            Constraint::Length(3), // Feedback
            Constraint::Length(3), // Controls
        ])
        .split(f.area());

    let title = format!(
        "DUAL N-BACK  |  Level N-{}  |  Grid {}×{}  |  Score {}",
        view.n,
        view.grid_size,
        view.grid_size,
        score_line(&view.score)
    );
    render_header(f, chunks[0], &title);
    render_progress(f, view, chunks[1]);

    if view.interstitial {
        render_phase_change(f, chunks[2]);
    } else {
        render_grid(f, view, chunks[2]);
    }

    render_feedback(f, view, chunks[3]);

    let controls = Paragraph::new(
        "L: Position | A: Color | SPACE: Both | H: Help | S: Scores | Q: Quit",
    )
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(controls, chunks[4]);

    if let Some(overlay) = overlay {
        let area = centered_rect(70, 70, f.area());
        f.render_widget(Clear, area);
        match overlay {
            Overlay::Help => render_help(f, area),
            Overlay::Scores => render_scores(f, high_scores, area),
        }
    }
}

fn render_header(f: &mut Frame, area: Rect, title: &str) {
    let header = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_menu(f: &mut Frame, area: Rect) {
    let option = |key: &'static str, text: &'static str| {
        Line::from(vec![
            Span::styled(
                key,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("   {text}")),
        ])
    };

    let content = vec![
        Line::from("Train your working memory by tracking position and color"),
        Line::from(""),
        option("1", "Start New Game"),
        option("2", "View High Scores"),
        option("3", "How to Play"),
        option("4", "Exit"),
    ];

    let menu = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .title(" Main Menu ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(menu, area);
}

fn render_settings(f: &mut Frame, app: &App, step: SettingsStep, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(area);

    let recommended = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);

    let mut content = Vec::new();
    match step {
        SettingsStep::NBack => {
            content.push(Line::from("Select N-Back Level (1-8)"));
            content.push(Line::from(Span::styled("Recommended: 2", recommended)));
            content.push(Line::from(""));
            content.push(Line::from("Higher levels ask you to remember further back"));
        }
        SettingsStep::GridSize => {
            content.push(Line::from("Select Grid Size (3-9)"));
            content.push(Line::from(Span::styled("Recommended: 8", recommended)));
            content.push(Line::from(""));
            content.push(Line::from("Larger grids make positions harder to track"));
        }
        SettingsStep::Trials => {
            content.push(Line::from("Select Number of Trials"));
            content.push(Line::from(""));
            let default = default_trial_option();
            for (i, trials) in TRIAL_OPTIONS.iter().enumerate() {
                content.push(option_line(i + 1, &format!("{trials} trials"), i + 1 == default));
            }
        }
        SettingsStep::DisplayTime => {
            content.push(Line::from("Select Response Time"));
            content.push(Line::from(""));
            let default = default_display_time_option();
            for (i, secs) in DISPLAY_TIME_OPTIONS.iter().enumerate() {
                content.push(option_line(i + 1, &format!("{secs:.1} seconds"), i + 1 == default));
            }
        }
    }

    let prompt = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(prompt, chunks[0]);

    let input = Paragraph::new(format!("> {}_", app.input_buffer))
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .title(" Your choice (Enter for recommended, Esc to cancel) ")
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(input, chunks[1]);
}

fn option_line(number: usize, text: &str, recommended: bool) -> Line<'static> {
    if recommended {
        Line::from(Span::styled(
            format!("{number}. {text} (recommended)"),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(format!("{number}. {text}"))
    }
}

fn render_ready(f: &mut Frame, app: &App, area: Rect) {
    let config = &app.config;
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let info = Style::default().fg(Color::Cyan);

    let content = vec![
        Line::from(vec![
            Span::styled("N-Back Level: ", info),
            Span::styled(config.n().to_string(), bold),
        ]),
        Line::from(vec![
            Span::styled("Grid Size: ", info),
            Span::styled(format!("{0}×{0}", config.grid_size()), bold),
        ]),
        Line::from(vec![
            Span::styled("Trials: ", info),
            Span::styled(config.trial_count().to_string(), bold),
        ]),
        Line::from(vec![
            Span::styled("Response Time: ", info),
            Span::styled(format!("{:.1}s", config.display_time().as_secs_f64()), bold),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("First, memorize {} position/color pairs", config.n()),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(Span::styled(
            "Then respond to matches during the game",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to begin training...",
            Style::default().fg(Color::Green),
        )),
    ];

    let ready = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(ready, area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let arrow = Span::styled("→ ", Style::default().fg(Color::Green));
    let control = |k: &'static str, text: &'static str| {
        Line::from(vec![Span::styled(format!("{k:<8}"), key), Span::raw(text)])
    };

    let content = vec![
        Line::from(Span::styled("What is Dual N-Back?", bold)),
        Line::from("A working memory exercise that tracks both position and color sequences."),
        Line::from(""),
        Line::from(Span::styled("How to Play:", bold)),
        Line::from(vec![arrow.clone(), Span::raw("Watch the colored dot appear on the grid")]),
        Line::from(vec![
            arrow.clone(),
            Span::raw("Remember positions and colors from N steps back"),
        ]),
        Line::from(vec![arrow, Span::raw("Press keys when you detect a match")]),
        Line::from(""),
        Line::from(Span::styled("Controls:", bold)),
        control("L", "Match in location/position"),
        control("A", "Match in color"),
        control("SPACE", "Both location AND color match"),
        control("H", "Show this help"),
        control("S", "View high scores"),
        control("Q", "Quit to menu"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to continue...",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(help, area);
}

fn render_scores(f: &mut Frame, records: &[HighScoreRecord], area: Rect) {
    let block = Block::default()
        .title(" High Scores ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    if records.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from("No high scores yet!"),
            Line::from("Play some games to set records."),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = records
        .iter()
        .take(TOP_SCORES)
        .enumerate()
        .map(|(i, record)| {
            let rank = i + 1;
            let style = match rank {
                1 => Style::default().fg(Color::Green),
                2 | 3 => Style::default().fg(Color::Blue),
                _ => Style::default(),
            };
            Row::new(vec![
                rank.to_string(),
                level_label(record.n, record.grid_size),
                format!("{:.1}%", record.accuracy),
                format!("{}/{}", record.score, record.total),
                record.timestamp.date().to_string(),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Length(12),
        ],
    )
    .header(
        Row::new(vec!["#", "Level", "Accuracy", "Score", "Date"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(block);
    f.render_widget(table, area);
}

fn render_results(f: &mut Frame, results: &GameResults, area: Rect) {
    let report = &results.report;
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut content = Vec::new();

    if let Some(err) = &report.error {
        content.push(Line::from(Span::styled(
            format!("Game stopped by a terminal error: {err}"),
            Style::default().fg(Color::Red),
        )));
        content.push(Line::from(""));
    }

    match (report.accuracy(), report.rating()) {
        (Some(accuracy), Some(rating)) => {
            let style = Style::default()
                .fg(rating_color(rating))
                .add_modifier(Modifier::BOLD);
            content.push(Line::from(Span::styled(rating.label(), style)));
            content.push(Line::from(Span::styled(stars(rating), style)));
            content.push(Line::from(""));
            content.push(Line::from(vec![
                Span::styled("Final Score: ", bold),
                Span::styled(
                    report.score.points().to_string(),
                    Style::default().fg(Color::Green),
                ),
                Span::raw(format!("/{}", report.score.total_possible())),
            ]));
            content.push(Line::from(vec![
                Span::styled("Accuracy: ", bold),
                Span::styled(format!("{accuracy:.1}%"), Style::default().fg(Color::Cyan)),
            ]));
            content.push(Line::from(format!(
                "Position {}/{}  |  Color {}/{}  |  False alarms {}",
                report.score.correct_position,
                report.score.possible_position,
                report.score.correct_color,
                report.score.possible_color,
                report.score.false_position + report.score.false_color,
            )));
        }
        _ => content.push(Line::from(Span::styled(
            "No scoring opportunities in this session",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    if !report.completed {
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            format!(
                "Stopped after {} of {} trials; not eligible for high scores",
                report.trials_presented,
                report.config.trial_count()
            ),
            Style::default().fg(Color::Yellow),
        )));
    }

    match &results.submission.status {
        RecordStatus::NewRecord { .. } => {
            content.push(Line::from(""));
            content.push(Line::from(Span::styled(
                "🏆 NEW HIGH SCORE! 🏆",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        RecordStatus::NotImproved { best } => {
            content.push(Line::from(""));
            content.push(Line::from(Span::styled(
                format!(
                    "Best for {}: {}",
                    level_label(best.n, best.grid_size),
                    accuracy_text(Some(best.accuracy))
                ),
                Style::default().fg(Color::DarkGray),
            )));
        }
        RecordStatus::NotEligible => {}
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "Press any key to return to menu...",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match &app.message {
        Some(message) => {
            let color = match message.style {
                MessageStyle::Info => Color::White,
                MessageStyle::Success => Color::Green,
                MessageStyle::Error => Color::Red,
            };
            (message.text.clone(), Style::default().fg(color))
        }
        None => {
            let hint = match app.screen {
                Screen::Menu => "Press 1-4 to choose | Q: Quit",
                Screen::Settings(_) => "Type a number and press Enter | Esc: Menu",
                Screen::Ready => "Any key: Start | Esc: Menu",
                Screen::Help | Screen::HighScores | Screen::Results => "Any key: Menu",
            };
            (hint.to_string(), Style::default().fg(Color::DarkGray))
        }
    };

    let status = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

fn render_progress(f: &mut Frame, view: &TrialView, area: Rect) {
    let done = view.index + 1;
    let percent = (done * 100 / view.trial_count.max(1)).min(100) as u16;
    let label = if view.memorizing {
        format!("Memorize {done}/{}", view.n)
    } else {
        format!("Trial {}/{}", done - view.n, view.trial_count - view.n)
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Progress ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(percent)
        .label(label);
    f.render_widget(gauge, area);
}

fn render_grid(f: &mut Frame, view: &TrialView, area: Rect) {
    let size = view.grid_size;
    let dot = Style::default()
        .fg(dot_color(view.stimulus.color))
        .add_modifier(Modifier::BOLD);
    let empty = Style::default().fg(Color::DarkGray);

    let lines: Vec<Line> = (0..size)
        .map(|row| {
            let cells: Vec<Span> = (0..size)
                .map(|col| {
                    if view.stimulus.position.row == row && view.stimulus.position.col == col {
                        Span::styled(" ● ", dot)
                    } else {
                        Span::styled(" · ", empty)
                    }
                })
                .collect();
            Line::from(cells)
        })
        .collect();

    let width = u16::try_from(size * 3 + 2).unwrap_or(u16::MAX);
    let height = u16::try_from(size + 2).unwrap_or(u16::MAX);
    let grid = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(grid, centered_fixed(width, height, area));
}

fn render_phase_change(f: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Memory phase complete! ✓",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("Game starting...", Style::default().fg(Color::Cyan))),
    ];
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn render_feedback(f: &mut Frame, view: &TrialView, area: Rect) {
    let line = if view.memorizing {
        Line::from(Span::styled(
            format!("Memorize item {} of {}", view.index + 1, view.n),
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(outcome) = &view.feedback {
        feedback_line(outcome)
    } else {
        Line::from(Span::styled(
            "Match? L: position  A: color  SPACE: both",
            Style::default().fg(Color::DarkGray),
        ))
    };

    let feedback = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(feedback, area);
}

fn feedback_line(outcome: &TrialOutcome) -> Line<'static> {
    let headline = if outcome.response.is_empty() && outcome.is_correct() {
        Span::styled("⏱ Time's up!", Style::default().fg(Color::DarkGray))
    } else if outcome.is_correct() {
        let points = outcome.points();
        let text = if points > 0 {
            format!("✓ Correct! +{points} point{}", if points > 1 { "s" } else { "" })
        } else {
            "✓ Correct!".to_string()
        };
        Span::styled(text, Style::default().fg(Color::Green))
    } else {
        Span::styled("✗ Incorrect!", Style::default().fg(Color::Red))
    };

    Line::from(vec![
        headline,
        Span::raw(format!(
            "   Position: {}   Color: {}",
            outcome_label(outcome.position),
            outcome_label(outcome.color)
        )),
    ])
}

const fn rating_color(rating: Rating) -> Color {
    match rating {
        Rating::Outstanding | Rating::Excellent => Color::Green,
        Rating::GoodJob => Color::Cyan,
        Rating::KeepPracticing => Color::Yellow,
        Rating::TryAgain => Color::Red,
    }
}

/// Terminal color for a stimulus; orange and pink use the 256-color palette
#[must_use]
pub const fn dot_color(color: DotColor) -> Color {
    match color {
        DotColor::Red => Color::Red,
        DotColor::Green => Color::Green,
        DotColor::Yellow => Color::Yellow,
        DotColor::Blue => Color::Blue,
        DotColor::Magenta => Color::Magenta,
        DotColor::Cyan => Color::Cyan,
        DotColor::Orange => Color::Indexed(208),
        DotColor::Pink => Color::Indexed(213),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, Position, Stimulus};
    use crate::scoring::ScoreState;
    use crate::session::{PlayerKind, SimulatedPlayer};
    use crate::storage::MemoryScoreStore;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn view(memorizing: bool) -> TrialView {
        TrialView {
            stimulus: Stimulus::new(Position::new(0, 0), DotColor::Orange),
            index: if memorizing { 0 } else { 2 },
            trial_count: 10,
            n: 2,
            grid_size: 3,
            memorizing,
            score: ScoreState::new(),
            feedback: None,
            interstitial: false,
        }
    }

    #[test]
    fn palette_colors_are_distinct() {
        let colors: Vec<Color> = DotColor::PALETTE.iter().map(|&c| dot_color(c)).collect();
        for (i, a) in colors.iter().enumerate() {
            assert!(colors[i + 1..].iter().all(|b| a != b));
        }
    }

    #[test]
    fn centered_fixed_stays_inside() {
        let area = Rect::new(0, 0, 10, 4);
        let rect = centered_fixed(20, 2, area);
        assert_eq!(rect.width, 10);
        assert_eq!(rect.y, 1);
    }

    #[test]
    fn trial_screen_shows_score_and_grid() {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal
            .draw(|f| trial_ui(f, &view(false), None, &[]))
            .unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Score 0/0 (N/A)"));
        assert!(text.contains("Trial 1/8"));
        assert!(text.contains('●'));
    }

    #[test]
    fn help_overlay_draws_over_trial() {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|f| trial_ui(f, &view(false), Some(Overlay::Help), &[]))
            .unwrap();
        assert!(screen_text(&terminal).contains("Match in color"));
    }

    #[test]
    fn results_without_matches() {
        let config = GameConfig::new(1, 3, 2, 1.0).unwrap();
        let mut app = App::new(Box::new(MemoryScoreStore::default()), "controlled", None);
        let session = crate::session::Session::with_sequence(
            config,
            crate::core::Sequence::from_stimuli(
                1,
                [
                    Stimulus::new(Position::new(0, 0), DotColor::Red),
                    Stimulus::new(Position::new(1, 1), DotColor::Blue),
                ],
            ),
        );
        app.finish_session(session.run(&mut SimulatedPlayer::new(PlayerKind::Idle, 0)));

        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();
        assert!(screen_text(&terminal).contains("No scoring opportunities in this session"));
    }

    #[test]
    fn menu_lists_options() {
        let app = App::new(Box::new(MemoryScoreStore::default()), "controlled", None);
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Start New Game"));
        assert!(text.contains("Exit"));
    }
}
