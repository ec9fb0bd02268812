//! Interactive TUI interface
//!
//! Menu, settings wizard and timed trials on top of ratatui and crossterm.

mod app;
mod frontend;
mod rendering;

pub use app::{App, Screen, SettingsStep, run_tui};
pub use frontend::{KeyAction, TerminalFrontend, map_key};
