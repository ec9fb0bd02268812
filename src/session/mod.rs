//! Running a game session
//!
//! The session owns the sequence and the score for one game and talks to the
//! outside world only through the ports in [`ports`].

mod engine;
pub mod players;
pub mod ports;

pub use engine::{Phase, Session, SessionReport};
pub use players::{PlayerKind, SimulatedPlayer};
pub use ports::{InputSource, Poll, Renderer, StimulusFrame};
