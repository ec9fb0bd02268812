//! Trial sequence generation with a controlled match rate

use super::strategy::MatchStrategy;
use crate::core::{Channel, Color, GameConfig, GenerationError, Position, Sequence, Stimulus};
use std::collections::VecDeque;

/// Builds N-back sequences for one configuration and palette
///
/// The generator holds no random state of its own; every call takes the
/// strategy that supplies draws, so two calls with equally seeded strategies
/// produce the same sequence.
#[derive(Debug, Clone)]
pub struct SequenceGenerator<'p> {
    n: usize,
    grid_size: usize,
    trial_count: usize,
    palette: &'p [Color],
}

impl<'p> SequenceGenerator<'p> {
    /// Create a generator over the built-in palette
    ///
    /// # Errors
    /// See [`SequenceGenerator::with_palette`].
    pub fn new(config: &GameConfig) -> Result<Self, GenerationError> {
        Self::with_palette(config, &Color::PALETTE)
    }

    /// Create a generator over a custom palette
    ///
    /// # Errors
    /// Returns [`GenerationError::Degenerate`] if the grid has a single cell or
    /// the palette has fewer than two colors, since a non-match could not be drawn.
    pub fn with_palette(
        config: &GameConfig,
        palette: &'p [Color],
    ) -> Result<Self, GenerationError> {
        let positions = config.positions();
        if positions < 2 {
            return Err(GenerationError::Degenerate {
                channel: Channel::Position,
                choices: positions,
            });
        }
        if palette.len() < 2 {
            return Err(GenerationError::Degenerate {
                channel: Channel::Color,
                choices: palette.len(),
            });
        }

        Ok(Self {
            n: config.n(),
            grid_size: config.grid_size(),
            trial_count: config.trial_count(),
            palette,
        })
    }

    #[must_use]
    pub const fn palette(&self) -> &'p [Color] {
        self.palette
    }

    /// Generate the whole sequence up front
    pub fn generate<S: MatchStrategy>(&self, strategy: S) -> Sequence {
        Sequence::from_stimuli(self.n, self.stream(strategy))
    }

    /// Generate lazily, one stimulus per `next()`
    ///
    /// Only the last `n` stimuli are kept in memory.
    pub fn stream<S: MatchStrategy>(&self, strategy: S) -> TrialStream<'p, S> {
        TrialStream {
            generator: self.clone(),
            strategy,
            window: VecDeque::with_capacity(self.n),
            emitted: 0,
        }
    }
}

/// Lazy stimulus iterator returned by [`SequenceGenerator::stream`]
pub struct TrialStream<'p, S> {
    generator: SequenceGenerator<'p>,
    strategy: S,
    window: VecDeque<(usize, usize)>,
    emitted: usize,
}

impl<S: MatchStrategy> TrialStream<'_, S> {
    /// Draw a value in `0..choices`, either repeating `back` or avoiding it
    fn draw(&mut self, channel: Channel, choices: usize, back: Option<usize>) -> usize {
        match back {
            None => self.strategy.pick(choices),
            Some(back) if self.strategy.wants_match(channel, choices) => back,
            // Exclusion sampling: draw from choices-1 values and skip over `back`
            Some(back) => {
                let drawn = self.strategy.pick(choices - 1);
                if drawn >= back { drawn + 1 } else { drawn }
            }
        }
    }
}

impl<S: MatchStrategy> Iterator for TrialStream<'_, S> {
    type Item = Stimulus;

    fn next(&mut self) -> Option<Self::Item> {
        let generator = &self.generator;
        if self.emitted >= generator.trial_count {
            return None;
        }

        let (positions, colors, n, grid_size) = (
            generator.grid_size * generator.grid_size,
            generator.palette.len(),
            generator.n,
            generator.grid_size,
        );

        // The front of a full window is the stimulus exactly n trials back
        let back = (self.window.len() == n).then(|| self.window[0]);
        let position = self.draw(Channel::Position, positions, back.map(|(p, _)| p));
        let color = self.draw(Channel::Color, colors, back.map(|(_, c)| c));

        if self.window.len() == n {
            self.window.pop_front();
        }
        self.window.push_back((position, color));
        self.emitted += 1;

        Some(Stimulus::new(
            Position::from_index(position, grid_size),
            self.generator.palette[color],
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.generator.trial_count - self.emitted;
        (remaining, Some(remaining))
    }
}

impl<S: MatchStrategy> ExactSizeIterator for TrialStream<'_, S> {}
