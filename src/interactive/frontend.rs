//! Terminal frontend for a running session
//!
//! Implements the session ports on top of a ratatui terminal. Each response
//! window is a single deadline; opening the help or high-score overlay does
//! not pause it.

use super::rendering;
use crate::core::{PlayerResponse, Stimulus};
use crate::scoring::{ScoreState, TrialOutcome};
use crate::session::{InputSource, Poll, Renderer, StimulusFrame};
use crate::storage::HighScoreRecord;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::Backend};
use std::io;
use std::thread;
use std::time::{Duration, Instant};

/// How long per-trial feedback stays on screen
pub const FEEDBACK_PAUSE: Duration = Duration::from_millis(600);

/// Interstitial between the memorize phase and the first scored trial
pub const PHASE_PAUSE: Duration = Duration::from_millis(1500);

/// What a key means while a trial is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Claim(PlayerResponse),
    Quit,
    Help,
    Scores,
}

/// Translate a key press into a trial action
///
/// `L` claims position, `A` claims color and `Space` claims both.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<KeyAction> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyAction::Quit)
        }
        KeyCode::Char('l' | 'L') => Some(KeyAction::Claim(PlayerResponse::POSITION)),
        KeyCode::Char('a' | 'A') => Some(KeyAction::Claim(PlayerResponse::COLOR)),
        KeyCode::Char(' ') => Some(KeyAction::Claim(PlayerResponse::BOTH)),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(KeyAction::Quit),
        KeyCode::Char('h' | 'H') => Some(KeyAction::Help),
        KeyCode::Char('s' | 'S') => Some(KeyAction::Scores),
        _ => None,
    }
}

/// Popup drawn over the trial screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Help,
    Scores,
}

/// Owned copy of the frame currently on screen
#[derive(Debug, Clone)]
pub struct TrialView {
    pub stimulus: Stimulus,
    pub index: usize,
    pub trial_count: usize,
    pub n: usize,
    pub grid_size: usize,
    pub memorizing: bool,
    pub score: ScoreState,
    pub feedback: Option<TrialOutcome>,
    /// Shown instead of the grid between phases
    pub interstitial: bool,
}

impl TrialView {
    fn from_frame(frame: &StimulusFrame<'_>) -> Self {
        Self {
            stimulus: frame.stimulus,
            index: frame.index,
            trial_count: frame.trial_count,
            n: frame.n,
            grid_size: frame.grid_size,
            memorizing: frame.memorizing,
            score: *frame.score,
            feedback: None,
            interstitial: false,
        }
    }
}

pub struct TerminalFrontend<'t, B: Backend> {
    terminal: &'t mut Terminal<B>,
    view: Option<TrialView>,
    overlay: Option<Overlay>,
    high_scores: Vec<HighScoreRecord>,
}

impl<'t, B: Backend> TerminalFrontend<'t, B> {
    pub fn new(terminal: &'t mut Terminal<B>, high_scores: Vec<HighScoreRecord>) -> Self {
        Self {
            terminal,
            view: None,
            overlay: None,
            high_scores,
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        let Some(view) = &self.view else {
            return Ok(());
        };
        let overlay = self.overlay;
        let scores = &self.high_scores;
        self.terminal
            .draw(|f| rendering::trial_ui(f, view, overlay, scores))?;
        Ok(())
    }

    fn memorizing(&self) -> bool {
        self.view.as_ref().is_some_and(|view| view.memorizing)
    }

    /// Apply one key action; `Some` ends the response window
    ///
    /// Quit always ends the session, even with an overlay open. Any other key
    /// only closes the overlay.
    fn handle_action(&mut self, action: Option<KeyAction>) -> io::Result<Option<Poll>> {
        if action == Some(KeyAction::Quit) {
            self.overlay = None;
            return Ok(Some(Poll::Quit));
        }
        if self.overlay.is_some() {
            self.overlay = None;
            self.draw()?;
            return Ok(None);
        }

        match action {
            Some(KeyAction::Help) => {
                self.overlay = Some(Overlay::Help);
                self.draw()?;
            }
            Some(KeyAction::Scores) => {
                self.overlay = Some(Overlay::Scores);
                self.draw()?;
            }
            Some(KeyAction::Claim(response)) if !self.memorizing() => {
                return Ok(Some(Poll::Answered(response)));
            }
            Some(KeyAction::Claim(_) | KeyAction::Quit) | None => {}
        }
        Ok(None)
    }
}

impl<B: Backend> Renderer for TerminalFrontend<'_, B> {
    fn display(&mut self, frame: &StimulusFrame<'_>) -> io::Result<()> {
        let mut view = TrialView::from_frame(frame);

        if frame.index == frame.n {
            view.interstitial = true;
            self.view = Some(view.clone());
            self.draw()?;
            thread::sleep(PHASE_PAUSE);
            view.interstitial = false;
        }

        self.view = Some(view);
        self.draw()
    }

    fn feedback(&mut self, outcome: &TrialOutcome, score: &ScoreState) -> io::Result<()> {
        if let Some(view) = &mut self.view {
            view.score = *score;
            view.feedback = Some(*outcome);
        }
        self.draw()?;
        thread::sleep(FEEDBACK_PAUSE);
        Ok(())
    }
}

impl<B: Backend> InputSource for TerminalFrontend<'_, B> {
    fn poll_response(&mut self, timeout: Duration) -> io::Result<Poll> {
        let deadline = Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                self.overlay = None;
                return Ok(Poll::TimedOut);
            }
            if !event::poll(remaining)? {
                continue;
            }

            let Event::Key(key) = event::read()? else {
                continue;
            };
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if let Some(poll) = self.handle_action(map_key(key))? {
                return Ok(poll);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, Position};
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn claim_keys() {
        assert_eq!(
            map_key(press(KeyCode::Char('l'))),
            Some(KeyAction::Claim(PlayerResponse::POSITION))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('A'))),
            Some(KeyAction::Claim(PlayerResponse::COLOR))
        );
        assert_eq!(
            map_key(press(KeyCode::Char(' '))),
            Some(KeyAction::Claim(PlayerResponse::BOTH))
        );
    }

    #[test]
    fn control_keys() {
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(KeyAction::Quit));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(KeyAction::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(map_key(press(KeyCode::Char('h'))), Some(KeyAction::Help));
        assert_eq!(map_key(press(KeyCode::Char('s'))), Some(KeyAction::Scores));
        assert_eq!(map_key(press(KeyCode::Char('c'))), None);
        assert_eq!(map_key(press(KeyCode::Enter)), None);
    }

    fn frame(score: &ScoreState, memorizing: bool) -> StimulusFrame<'_> {
        StimulusFrame {
            stimulus: Stimulus::new(Position::new(0, 0), Color::Blue),
            index: 2,
            trial_count: 4,
            n: 1,
            grid_size: 3,
            memorizing,
            score,
        }
    }

    #[test]
    fn quit_ends_the_window_with_an_overlay_open() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut frontend = TerminalFrontend::new(&mut terminal, Vec::new());
        let score = ScoreState::new();
        frontend.display(&frame(&score, false)).unwrap();

        for overlay in [KeyAction::Help, KeyAction::Scores] {
            assert_eq!(frontend.handle_action(Some(overlay)).unwrap(), None);
            assert!(frontend.overlay.is_some());
            assert_eq!(
                frontend.handle_action(map_key(press(KeyCode::Char('q')))).unwrap(),
                Some(Poll::Quit)
            );
            assert!(frontend.overlay.is_none());
        }

        frontend.handle_action(Some(KeyAction::Help)).unwrap();
        assert_eq!(
            frontend.handle_action(map_key(press(KeyCode::Esc))).unwrap(),
            Some(Poll::Quit)
        );
    }

    #[test]
    fn other_keys_only_close_the_overlay() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut frontend = TerminalFrontend::new(&mut terminal, Vec::new());
        let score = ScoreState::new();
        frontend.display(&frame(&score, false)).unwrap();

        frontend.handle_action(Some(KeyAction::Scores)).unwrap();
        let claim = Some(KeyAction::Claim(PlayerResponse::POSITION));
        assert_eq!(frontend.handle_action(claim).unwrap(), None);
        assert!(frontend.overlay.is_none());
        assert_eq!(
            frontend.handle_action(claim).unwrap(),
            Some(Poll::Answered(PlayerResponse::POSITION))
        );
    }

    #[test]
    fn claims_are_ignored_while_memorizing() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut frontend = TerminalFrontend::new(&mut terminal, Vec::new());
        let score = ScoreState::new();
        frontend.display(&frame(&score, true)).unwrap();

        let claim = Some(KeyAction::Claim(PlayerResponse::BOTH));
        assert_eq!(frontend.handle_action(claim).unwrap(), None);
        assert_eq!(frontend.handle_action(Some(KeyAction::Quit)).unwrap(), Some(Poll::Quit));
    }

    #[test]
    fn display_draws_the_dot() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut frontend = TerminalFrontend::new(&mut terminal, Vec::new());

        let score = ScoreState::new();
        let frame = StimulusFrame {
            stimulus: Stimulus::new(Position::new(1, 2), Color::Red),
            index: 0,
            trial_count: 4,
            n: 1,
            grid_size: 3,
            memorizing: true,
            score: &score,
        };
        frontend.display(&frame).unwrap();
        assert!(frontend.memorizing());

        let buffer = frontend.terminal.backend().buffer().clone();
        let text: String = buffer.content.iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains('●'));
        assert!(text.contains("Memorize item 1 of 1"));
    }
}
