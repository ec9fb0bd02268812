//! Command implementations

pub mod scores;
pub mod simulate;

pub use scores::top_scores;
pub use simulate::{SimulationConfig, SimulationResult, run_simulation};
