//! Match-rate strategies
//!
//! A strategy owns the random source and decides, per channel, whether a trial
//! should repeat the value shown `n` trials back.

use crate::core::Channel;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default per-channel probability that a trial is a match
pub const DEFAULT_MATCH_RATE: f64 = 0.3;

/// Source of randomness and match decisions for the generator
pub trait MatchStrategy {
    /// Decide whether the next trial repeats the `n`-back value on `channel`
    ///
    /// `choices` is the number of distinct values the channel can take.
    fn wants_match(&mut self, channel: Channel, choices: usize) -> bool;

    /// Uniform draw in `0..upper`; `upper` is always at least 1
    fn pick(&mut self, upper: usize) -> usize;
}

impl<S: MatchStrategy + ?Sized> MatchStrategy for &mut S {
    fn wants_match(&mut self, channel: Channel, choices: usize) -> bool {
        (**self).wants_match(channel, choices)
    }

    fn pick(&mut self, upper: usize) -> usize {
        (**self).pick(upper)
    }
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
pub enum StrategyType {
    /// Fixed target match probability per channel (default)
    Controlled(ControlledStrategy),
    /// Every value drawn uniformly at random
    Uniform(UniformStrategy),
}

impl MatchStrategy for StrategyType {
    fn wants_match(&mut self, channel: Channel, choices: usize) -> bool {
        match self {
            Self::Controlled(s) => s.wants_match(channel, choices),
            Self::Uniform(s) => s.wants_match(channel, choices),
        }
    }

    fn pick(&mut self, upper: usize) -> usize {
        match self {
            Self::Controlled(s) => s.pick(upper),
            Self::Uniform(s) => s.pick(upper),
        }
    }
}

impl StrategyType {
    /// Create strategy from name string
    ///
    /// Supported names: "controlled", "uniform" (alias "random").
    /// Defaults to controlled if name is unrecognized. A seed makes the
    /// resulting sequence reproducible.
    #[must_use]
    pub fn from_name(name: &str, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        match name {
            "uniform" | "random" => Self::Uniform(UniformStrategy::new(rng)),
            _ => Self::Controlled(ControlledStrategy::new(rng)),
        }
    }
}

/// Controlled match rate
///
/// Each channel independently becomes a match with a fixed probability, far
/// above the `1/choices` a pure random draw would give.
pub struct ControlledStrategy<R = StdRng> {
    rng: R,
    position_rate: f64,
    color_rate: f64,
}

impl<R: Rng> ControlledStrategy<R> {
    /// Create a strategy with the default rate on both channels
    pub const fn new(rng: R) -> Self {
        Self::with_rates(rng, DEFAULT_MATCH_RATE, DEFAULT_MATCH_RATE)
    }

    /// Create a strategy with explicit per-channel rates
    ///
    /// Rates are probabilities; values outside `[0, 1]` are clamped on use.
    pub const fn with_rates(rng: R, position_rate: f64, color_rate: f64) -> Self {
        Self {
            rng,
            position_rate,
            color_rate,
        }
    }

    #[must_use]
    pub const fn rate(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Position => self.position_rate,
            Channel::Color => self.color_rate,
        }
    }
}

impl ControlledStrategy<StdRng> {
    /// Reproducible strategy for tests and `--seed`
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MatchStrategy for ControlledStrategy<R> {
    fn wants_match(&mut self, channel: Channel, _choices: usize) -> bool {
        let rate = self.rate(channel).clamp(0.0, 1.0);
        self.rng.random_bool(rate)
    }

    fn pick(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }
}

/// Uniform random stimuli
///
/// Matches occur only by chance, with probability `1/choices` per channel.
pub struct UniformStrategy<R = StdRng> {
    rng: R,
}

impl<R: Rng> UniformStrategy<R> {
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl UniformStrategy<StdRng> {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MatchStrategy for UniformStrategy<R> {
    fn wants_match(&mut self, _channel: Channel, choices: usize) -> bool {
        self.rng.random_bool(1.0 / choices.max(1) as f64)
    }

    fn pick(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controlled_default_rates() {
        let strategy = ControlledStrategy::seeded(1);
        assert!((strategy.rate(Channel::Position) - DEFAULT_MATCH_RATE).abs() < f64::EPSILON);
        assert!((strategy.rate(Channel::Color) - DEFAULT_MATCH_RATE).abs() < f64::EPSILON);
    }

    #[test]
    fn controlled_extreme_rates() {
        let mut always = ControlledStrategy::with_rates(StdRng::seed_from_u64(3), 1.0, 0.0);
        for _ in 0..100 {
            assert!(always.wants_match(Channel::Position, 64));
            assert!(!always.wants_match(Channel::Color, 8));
        }
    }

    #[test]
    fn controlled_rate_is_clamped() {
        let mut strategy = ControlledStrategy::with_rates(StdRng::seed_from_u64(3), 7.0, -2.0);
        assert!(strategy.wants_match(Channel::Position, 9));
        assert!(!strategy.wants_match(Channel::Color, 9));
    }

    #[test]
    fn controlled_rate_is_respected_on_average() {
        let mut strategy = ControlledStrategy::seeded(42);
        let hits = (0..10_000)
            .filter(|_| strategy.wants_match(Channel::Position, 64))
            .count();
        let rate = hits as f64 / 10_000.0;
        assert!((rate - DEFAULT_MATCH_RATE).abs() < 0.03, "rate {rate}");
    }

    #[test]
    fn uniform_rate_follows_choices() {
        let mut strategy = UniformStrategy::seeded(42);
        let hits = (0..10_000)
            .filter(|_| strategy.wants_match(Channel::Color, 4))
            .count();
        let rate = hits as f64 / 10_000.0;
        assert!((rate - 0.25).abs() < 0.03, "rate {rate}");
    }

    #[test]
    fn pick_stays_in_range() {
        let mut strategy = StrategyType::from_name("controlled", Some(9));
        for upper in 1..20 {
            for _ in 0..50 {
                assert!(strategy.pick(upper) < upper);
            }
        }
    }

    #[test]
    fn from_name_selects_variant() {
        assert!(matches!(
            StrategyType::from_name("uniform", Some(1)),
            StrategyType::Uniform(_)
        ));
        assert!(matches!(
            StrategyType::from_name("random", Some(1)),
            StrategyType::Uniform(_)
        ));
        assert!(matches!(
            StrategyType::from_name("controlled", Some(1)),
            StrategyType::Controlled(_)
        ));
        assert!(matches!(
            StrategyType::from_name("bogus", None),
            StrategyType::Controlled(_)
        ));
    }

    #[test]
    fn same_seed_same_draws() {
        let mut a = ControlledStrategy::seeded(7);
        let mut b = ControlledStrategy::seeded(7);
        for _ in 0..100 {
            assert_eq!(a.pick(81), b.pick(81));
            assert_eq!(
                a.wants_match(Channel::Color, 8),
                b.wants_match(Channel::Color, 8)
            );
        }
    }
}
