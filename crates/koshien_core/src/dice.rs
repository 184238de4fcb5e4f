//! Random draws for the match engine.
//!
//! Every random decision in a match goes through [`Dice`], so a match is a
//! pure function of its roster snapshots and the sequence of rolls. Seeded
//! matches use a ChaCha stream, which is identical on every platform.

use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::{MatchError, Result};

/// Source of uniform rolls in `[0, 1)`.
pub trait Dice {
    /// Draw the next roll.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::RandomSource`] if the underlying source fails.
    /// A failed roll aborts the match in progress.
    fn roll(&mut self) -> Result<f64>;
}

impl<D: Dice + ?Sized> Dice for &mut D {
    fn roll(&mut self) -> Result<f64> {
        (**self).roll()
    }
}

/// Adapter turning any `rand` generator into [`Dice`].
#[derive(Debug, Clone)]
pub struct RngDice<R> {
    rng: R,
}

impl<R: RngCore> RngDice<R> {
    /// Wrap an existing generator.
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Unwrap the generator.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngDice<ChaCha8Rng> {
    /// Deterministic dice for a seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Dice for RngDice<R> {
    fn roll(&mut self) -> Result<f64> {
        let mut bytes = [0u8; 8];
        self.rng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| MatchError::RandomSource(e.to_string()))?;
        Ok(unit_interval(u64::from_le_bytes(bytes)))
    }
}

/// Map 64 random bits onto `[0, 1)` using the top 53 bits.
#[allow(clippy::cast_precision_loss)]
fn unit_interval(bits: u64) -> f64 {
    const SCALE: f64 = 1.0 / (1u64 << 53) as f64;
    (bits >> 11) as f64 * SCALE
}

/// Draw a roll and reject values outside `[0, 1)`.
pub(crate) fn checked_roll<D: Dice + ?Sized>(dice: &mut D) -> Result<f64> {
    let roll = dice.roll()?;
    if (0.0..1.0).contains(&roll) {
        Ok(roll)
    } else {
        Err(MatchError::RandomSource(format!(
            "roll {roll} outside [0, 1)"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl RngCore for Broken {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            Err(rand::Error::new(std::io::Error::other("entropy unavailable")))
        }
    }

    #[test]
    fn test_seeded_dice_repeat() {
        let mut a = RngDice::seeded(42);
        let mut b = RngDice::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.roll().unwrap().to_bits(), b.roll().unwrap().to_bits());
        }
    }

    #[test]
    fn test_rolls_in_unit_interval() {
        let mut dice = RngDice::seeded(7);
        for _ in 0..1000 {
            let roll = dice.roll().unwrap();
            assert!((0.0..1.0).contains(&roll));
        }
    }

    #[test]
    fn test_unit_interval_bounds() {
        assert_eq!(unit_interval(0), 0.0);
        assert!(unit_interval(u64::MAX) < 1.0);
    }

    #[test]
    fn test_failing_rng_reports_random_source() {
        let mut dice = RngDice::new(Broken);
        assert!(matches!(dice.roll(), Err(MatchError::RandomSource(_))));
    }

    #[test]
    fn test_checked_roll_rejects_one() {
        struct One;
        impl Dice for One {
            fn roll(&mut self) -> Result<f64> {
                Ok(1.0)
            }
        }
        assert!(matches!(
            checked_roll(&mut One),
            Err(MatchError::RandomSource(_))
        ));
    }
}
