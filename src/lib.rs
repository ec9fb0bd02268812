//! Dual N-Back Trainer
//!
//! A terminal working-memory exercise: each trial shows a colored dot on a
//! grid, and the player reports whether its position and/or color matches
//! the trial `n` steps back.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dual_nback::core::GameConfig;
//! use dual_nback::sequence::{ControlledStrategy, SequenceGenerator};
//!
//! let config = GameConfig::new(2, 3, 20, 2.0).unwrap();
//! let sequence = SequenceGenerator::new(&config)
//!     .unwrap()
//!     .generate(ControlledStrategy::seeded(7));
//! for trial in sequence.trials() {
//!     println!("{}: {:?}", trial.index, sequence.ground_truth(trial.index));
//! }
//! ```

// Core domain types
pub mod core;

// Trial sequence generation
pub mod sequence;

// Match evaluation and scoring
pub mod scoring;

// Game session state machine and its ports
pub mod session;

// High-score persistence
pub mod storage;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
