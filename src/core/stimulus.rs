//! Stimulus representation
//!
//! A stimulus is a colored dot at one cell of a square grid. Each of the two
//! attributes is an independent memory channel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two independently judged attributes of a stimulus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Position,
    Color,
}

impl Channel {
    pub const ALL: [Self; 2] = [Self::Position, Self::Color];
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position => write!(f, "position"),
            Self::Color => write!(f, "color"),
        }
    }
}

/// A grid cell, addressed by row and column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Convert a row-major cell index into a position
    #[must_use]
    pub const fn from_index(index: usize, grid_size: usize) -> Self {
        Self {
            row: index / grid_size,
            col: index % grid_size,
        }
    }

    /// Row-major cell index in `0..grid_size²`
    #[must_use]
    pub const fn index(self, grid_size: usize) -> usize {
        self.row * grid_size + self.col
    }

    #[must_use]
    pub const fn fits(self, grid_size: usize) -> bool {
        self.row < grid_size && self.col < grid_size
    }
}

/// Dot colors available to the color channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Orange,
    Pink,
}

impl Color {
    /// The built-in eight-color palette
    pub const PALETTE: [Self; 8] = [
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::Orange,
        Self::Pink,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::Orange => "orange",
            Self::Pink => "pink",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One presented item: where the dot is and what color it has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stimulus {
    pub position: Position,
    pub color: Color,
}

impl Stimulus {
    #[must_use]
    pub const fn new(position: Position, color: Color) -> Self {
        Self { position, color }
    }
}
