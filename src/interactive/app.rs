//! TUI application state and logic

use super::frontend::TerminalFrontend;
use crate::core::GameConfig;
use crate::core::config::{
    DEFAULT_DISPLAY_TIME, DEFAULT_GRID_SIZE, DEFAULT_N, DEFAULT_TRIALS, DISPLAY_TIME_OPTIONS,
    GRID_SIZE_RANGE, N_RANGE, TRIAL_OPTIONS,
};
use crate::sequence::StrategyType;
use crate::session::{Session, SessionReport};
use crate::storage::{HighScoreRecord, ScoreStore, Submission, submit_high_score};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io;
use std::ops::RangeInclusive;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Settings(SettingsStep),
    Ready,
    Help,
    HighScores,
    Results,
}

/// The four questions of the settings wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsStep {
    NBack,
    GridSize,
    Trials,
    DisplayTime,
}

impl SettingsStep {
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::NBack => Some(Self::GridSize),
            Self::GridSize => Some(Self::Trials),
            Self::Trials => Some(Self::DisplayTime),
            Self::DisplayTime => None,
        }
    }

    /// 1-based step number for the "Step k of 4" title
    #[must_use]
    pub const fn number(self) -> usize {
        match self {
            Self::NBack => 1,
            Self::GridSize => 2,
            Self::Trials => 3,
            Self::DisplayTime => 4,
        }
    }

    /// Accepted inputs and the value used for an empty answer
    #[must_use]
    pub fn choices(self) -> (RangeInclusive<usize>, usize) {
        match self {
            Self::NBack => (N_RANGE, DEFAULT_N),
            Self::GridSize => (GRID_SIZE_RANGE, DEFAULT_GRID_SIZE),
            Self::Trials => (1..=TRIAL_OPTIONS.len(), default_trial_option()),
            Self::DisplayTime => (1..=DISPLAY_TIME_OPTIONS.len(), default_display_time_option()),
        }
    }
}

/// 1-based option number of the recommended trial count
#[must_use]
pub fn default_trial_option() -> usize {
    TRIAL_OPTIONS
        .iter()
        .position(|&t| t == DEFAULT_TRIALS)
        .map_or(1, |i| i + 1)
}

/// 1-based option number of the recommended response time
#[must_use]
pub fn default_display_time_option() -> usize {
    DISPLAY_TIME_OPTIONS
        .iter()
        .position(|&t| (t - DEFAULT_DISPLAY_TIME).abs() < f64::EPSILON)
        .map_or(1, |i| i + 1)
}

/// Parse a wizard answer; an empty answer takes the recommended value
#[must_use]
pub fn parse_choice(input: &str, range: &RangeInclusive<usize>, default: usize) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() {
        return Some(default);
    }
    input.parse().ok().filter(|value| range.contains(value))
}

/// Values picked so far in the wizard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draft {
    pub n: usize,
    pub grid_size: usize,
    pub trial_count: usize,
    pub display_time: f64,
}

impl From<&GameConfig> for Draft {
    fn from(config: &GameConfig) -> Self {
        Self {
            n: config.n(),
            grid_size: config.grid_size(),
            trial_count: config.trial_count(),
            display_time: config.display_time().as_secs_f64(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Outcome of the last game, shown on the results screen
#[derive(Debug)]
pub struct GameResults {
    pub report: SessionReport,
    pub submission: Submission,
}

/// Application state
pub struct App {
    pub screen: Screen,
    pub config: GameConfig,
    pub draft: Draft,
    pub input_buffer: String,
    pub message: Option<Message>,
    pub high_scores: Vec<HighScoreRecord>,
    pub results: Option<GameResults>,
    pub should_quit: bool,
    store: Box<dyn ScoreStore>,
    strategy: String,
    seed: Option<u64>,
    games_played: u64,
}

impl App {
    #[must_use]
    pub fn new(store: Box<dyn ScoreStore>, strategy: &str, seed: Option<u64>) -> Self {
        let config = GameConfig::default();
        Self {
            screen: Screen::Menu,
            draft: Draft::from(&config),
            config,
            input_buffer: String::new(),
            message: None,
            high_scores: Vec::new(),
            results: None,
            should_quit: false,
            store,
            strategy: strategy.to_string(),
            seed,
            games_played: 0,
        }
    }

    /// Skip the menu and go straight to the game-ready screen
    #[must_use]
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.draft = Draft::from(&config);
        self.config = config;
        self.screen = Screen::Ready;
        self
    }

    pub fn set_message(&mut self, text: impl Into<String>, style: MessageStyle) {
        self.message = Some(Message {
            text: text.into(),
            style,
        });
    }

    /// Reload the high-score table from the store
    pub fn refresh_scores(&mut self) {
        match self.store.all() {
            Ok(records) => self.high_scores = records,
            Err(err) => {
                warn!("could not load high scores: {err}");
                self.set_message(format!("Could not load scores: {err}"), MessageStyle::Error);
                self.high_scores.clear();
            }
        }
    }

    /// Handle one key press
    ///
    /// Returns the configuration to play when the key starts a game.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<GameConfig> {
        if let KeyCode::Char('c') = key.code
            && key.modifiers.contains(KeyModifiers::CONTROL)
        {
            self.should_quit = true;
            return None;
        }

        match self.screen {
            Screen::Menu => {
                self.handle_menu_key(key.code);
                None
            }
            Screen::Settings(step) => {
                self.handle_settings_key(step, key.code);
                None
            }
            Screen::Ready => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => {
                    self.screen = Screen::Menu;
                    None
                }
                _ => {
                    self.refresh_scores();
                    Some(self.config)
                }
            },
            Screen::Help | Screen::HighScores | Screen::Results => {
                self.screen = Screen::Menu;
                None
            }
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        self.message = None;
        match code {
            KeyCode::Char('1') => {
                self.draft = Draft::from(&self.config);
                self.input_buffer.clear();
                self.screen = Screen::Settings(SettingsStep::NBack);
            }
            KeyCode::Char('2') => {
                self.refresh_scores();
                self.screen = Screen::HighScores;
            }
            KeyCode::Char('3') => self.screen = Screen::Help,
            KeyCode::Char('4' | 'q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, step: SettingsStep, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.input_buffer.clear();
                self.message = None;
                self.screen = Screen::Menu;
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.input_buffer.len() < 2 {
                    self.input_buffer.push(c);
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Enter => self.submit_setting(step),
            _ => {}
        }
    }

    fn submit_setting(&mut self, step: SettingsStep) {
        let (range, default) = step.choices();
        let input = std::mem::take(&mut self.input_buffer);
        let Some(value) = parse_choice(&input, &range, default) else {
            self.set_message(
                format!(
                    "Please enter a number between {} and {}",
                    range.start(),
                    range.end()
                ),
                MessageStyle::Error,
            );
            return;
        };
        self.message = None;

        match step {
            SettingsStep::NBack => self.draft.n = value,
            SettingsStep::GridSize => self.draft.grid_size = value,
            SettingsStep::Trials => self.draft.trial_count = TRIAL_OPTIONS[value - 1],
            SettingsStep::DisplayTime => self.draft.display_time = DISPLAY_TIME_OPTIONS[value - 1],
        }

        if let Some(next) = step.next() {
            self.screen = Screen::Settings(next);
            return;
        }

        let draft = self.draft;
        match GameConfig::new(draft.n, draft.grid_size, draft.trial_count, draft.display_time) {
            Ok(config) => {
                self.config = config;
                self.screen = Screen::Ready;
            }
            Err(err) => {
                self.set_message(err.to_string(), MessageStyle::Error);
                self.screen = Screen::Settings(SettingsStep::NBack);
            }
        }
    }

    /// Build the next session; a fixed seed still varies from game to game
    ///
    /// # Errors
    /// Returns an error if the configuration cannot produce a sequence.
    pub fn start_session(&self, config: GameConfig) -> Result<Session> {
        let seed = self.seed.map(|seed| seed.wrapping_add(self.games_played));
        let strategy = StrategyType::from_name(&self.strategy, seed);
        Ok(Session::new(config, strategy)?)
    }

    /// Record a finished game and show its results
    pub fn finish_session(&mut self, report: SessionReport) {
        self.games_played += 1;
        let submission = submit_high_score(self.store.as_mut(), &report);
        if let Some(err) = &submission.save_error {
            self.set_message(format!("Could not save high score: {err}"), MessageStyle::Error);
        } else if submission.status.is_new_record() {
            self.set_message("High score saved", MessageStyle::Success);
        } else if !report.completed {
            self.set_message("Game ended early, score not saved", MessageStyle::Info);
        } else {
            self.message = None;
        }
        self.results = Some(GameResults { report, submission });
        self.screen = Screen::Results;
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if let Some(config) = app.handle_key(key) {
                let session = app.start_session(config)?;
                let mut frontend = TerminalFrontend::new(terminal, app.high_scores.clone());
                let report = session.run(&mut frontend);
                if let Some(err) = &report.error {
                    info!("game ended by a terminal error: {err}");
                }
                app.finish_session(report);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
