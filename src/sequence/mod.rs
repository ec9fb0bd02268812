//! Trial sequence generation
//!
//! The generator decides match placement through an injected strategy, which
//! keeps sequences reproducible under a seed.

mod generator;
pub mod strategy;

pub use generator::{SequenceGenerator, TrialStream};
pub use strategy::{ControlledStrategy, MatchStrategy, StrategyType, UniformStrategy};
