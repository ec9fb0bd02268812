//! Core domain types for the dual N-back task
//!
//! This module contains the fundamental domain types with no terminal or
//! filesystem dependencies. Everything here is pure and directly testable.

pub mod config;
mod error;
mod stimulus;
mod trial;

pub use config::GameConfig;
pub use error::{ConfigError, GenerationError, PersistenceError};
pub use stimulus::{Channel, Color, Position, Stimulus};
pub use trial::{GroundTruth, PlayerResponse, Sequence, Trial};
