//! Dice with a known sequence of rolls.
//!
//! Scripted dice make it possible to force exact plate appearances. With
//! the standard fixture teams (hit chance 0.5):
//!
//! | rolls          | plate appearance            |
//! |----------------|-----------------------------|
//! | `0.01`         | home run                    |
//! | `0.10, 0.9`    | single                      |
//! | `0.10, 0.1`    | double                      |
//! | `0.17`         | walk                        |
//! | `0.99, 0.0`    | strikeout                   |

use koshien_core::dice::Dice;
use koshien_core::error::{MatchError, Result};

/// Rolls for a home run against the standard fixtures.
pub const HOME_RUN: [f64; 1] = [0.01];
/// Rolls for a single.
pub const SINGLE: [f64; 2] = [0.10, 0.9];
/// Rolls for a double.
pub const DOUBLE: [f64; 2] = [0.10, 0.1];
/// Rolls for a walk.
pub const WALK: [f64; 1] = [0.17];
/// Rolls for a strikeout.
pub const STRIKEOUT: [f64; 2] = [0.99, 0.0];

/// Replays a fixed list of rolls.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    rolls: Vec<f64>,
    next: usize,
    cycle: bool,
}

impl ScriptedDice {
    /// Repeat `rolls` forever.
    ///
    /// # Panics
    ///
    /// Panics if `rolls` is empty.
    #[must_use]
    pub fn cycle(rolls: Vec<f64>) -> Self {
        assert!(!rolls.is_empty(), "cannot cycle an empty script");
        Self {
            rolls,
            next: 0,
            cycle: true,
        }
    }

    /// Play `rolls` once, then fail every further roll.
    #[must_use]
    pub fn once(rolls: Vec<f64>) -> Self {
        Self {
            rolls,
            next: 0,
            cycle: false,
        }
    }

    /// Build a script from a list of plate appearances.
    #[must_use]
    pub fn plays(plays: &[&[f64]]) -> Vec<f64> {
        plays.iter().flat_map(|p| p.iter().copied()).collect()
    }

    /// Rolls drawn so far.
    #[must_use]
    pub const fn draws(&self) -> usize {
        self.next
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> Result<f64> {
        let index = if self.cycle {
            self.next % self.rolls.len()
        } else {
            self.next
        };
        let roll = self.rolls.get(index).copied().ok_or_else(|| {
            MatchError::RandomSource(format!("script exhausted after {} rolls", self.next))
        })?;
        self.next += 1;
        tracing::trace!(draw = self.next, roll, "Scripted roll");
        Ok(roll)
    }
}

/// Returns the same roll every time.
#[derive(Debug, Clone, Copy)]
pub struct ConstantDice(pub f64);

impl Dice for ConstantDice {
    fn roll(&mut self) -> Result<f64> {
        Ok(self.0)
    }
}
