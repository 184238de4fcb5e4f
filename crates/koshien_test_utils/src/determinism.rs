//! Determinism testing utilities.
//!
//! Provides a harness for verifying that a match produces identical
//! results given identical inputs.
//!
//! # Testing Strategy
//!
//! A match is a pure function of its two snapshots, its config and the
//! roll sequence. Sources of non-determinism to watch for:
//!
//! - **HashMap iteration order**: Rust's default hasher is randomized.
//!   Anything reported in order (box score, MVP tie-breaks) must come from
//!   an ordered container.
//!
//! - **System randomness**: every roll goes through
//!   [`koshien_core::dice::Dice`]; seeded runs use ChaCha.
//!
//! # Test Levels
//!
//! 1. **Unit tests**: individual resolvers with scripted dice
//! 2. **Property tests**: random rosters and seeds must still replay exactly
//! 3. **Parallel tests**: running N matches on separate threads all match

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use koshien_core::config::MatchConfig;
use koshien_core::error::Result;
use koshien_core::game::simulate_seeded;
use koshien_core::roster::TeamSnapshot;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Fingerprints from each run.
    pub hashes: Vec<u64>,
}

impl DeterminismResult {
    fn from_hashes(hashes: Vec<u64>) -> Self {
        Self {
            is_deterministic: hashes.windows(2).all(|w| w[0] == w[1]),
            hashes,
        }
    }

    /// Get all unique hashes (should be 1 for a deterministic match).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that the runs were deterministic, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Match is non-deterministic!\n\
                 Runs: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run a computation several times and compare the hashes it yields.
///
/// # Errors
///
/// Returns the first error any run produced.
pub fn verify_determinism<F>(runs: usize, run: F) -> Result<DeterminismResult>
where
    F: Fn() -> Result<u64>,
{
    let hashes = (0..runs).map(|_| run()).collect::<Result<Vec<_>>>()?;
    Ok(DeterminismResult::from_hashes(hashes))
}

/// Play the same seeded match `runs` times and compare fingerprints.
///
/// # Errors
///
/// Returns the first error any run produced.
pub fn verify_match_determinism(
    home: &TeamSnapshot,
    away: &TeamSnapshot,
    config: MatchConfig,
    seed: u64,
    runs: usize,
) -> Result<DeterminismResult> {
    verify_determinism(runs, || {
        simulate_seeded(home.clone(), away.clone(), config, seed)?.fingerprint()
    })
}

/// Play the same seeded match on `threads` scoped threads at once.
///
/// Catches non-determinism that only shows up under thread scheduling.
///
/// # Errors
///
/// Returns the first error any thread produced.
///
/// # Panics
///
/// Re-raises a panic from any worker thread.
pub fn run_parallel_matches_scoped(
    home: &TeamSnapshot,
    away: &TeamSnapshot,
    config: MatchConfig,
    seed: u64,
    threads: usize,
) -> Result<DeterminismResult> {
    let outcomes: Vec<Result<u64>> = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                s.spawn(|| {
                    simulate_seeded(home.clone(), away.clone(), config, seed)?.fingerprint()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    });

    let hashes = outcomes.into_iter().collect::<Result<Vec<_>>>()?;
    Ok(DeterminismResult::from_hashes(hashes))
}

/// Compute a simple hash for any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Proptest strategies for rosters and matches.
///
/// Generated teams always pass validation, so properties can focus on
/// match behaviour.
pub mod strategies {
    use koshien_core::roster::{
        Abilities, PitchingAbilities, Position, RosterSnapshot, TeamSnapshot, ABILITY_MAX,
    };
    use proptest::prelude::*;

    use crate::fixtures::{pitcher, player, team};

    /// Any legal ability value.
    pub fn arb_ability() -> impl Strategy<Value = u8> {
        0..=ABILITY_MAX
    }

    /// Player abilities across the full legal range.
    pub fn arb_abilities() -> impl Strategy<Value = Abilities> {
        (
            arb_ability(),
            arb_ability(),
            arb_ability(),
            arb_ability(),
            arb_ability(),
        )
            .prop_map(|(batting, power, running, throwing, fielding)| Abilities {
                batting,
                power,
                running,
                throwing,
                fielding,
            })
    }

    /// Pitching abilities across the full legal range.
    pub fn arb_pitching() -> impl Strategy<Value = PitchingAbilities> {
        (arb_ability(), arb_ability(), arb_ability()).prop_map(|(pitching, control, stamina)| {
            PitchingAbilities {
                pitching,
                control,
                stamina,
            }
        })
    }

    /// A valid nine-man team with random abilities.
    pub fn arb_team(name: &'static str) -> impl Strategy<Value = TeamSnapshot> {
        (
            proptest::collection::vec(arb_abilities(), 9),
            arb_pitching(),
        )
            .prop_map(move |(abilities, arm)| {
                let players: Vec<RosterSnapshot> = Position::ALL
                    .iter()
                    .zip(abilities)
                    .enumerate()
                    .map(|(i, (&position, abilities))| {
                        let id = format!("{name}{i}");
                        if position == Position::Pitcher {
                            pitcher(&id, abilities, arm)
                        } else {
                            player(&id, position, abilities)
                        }
                    })
                    .collect();
                team(name, players)
            })
    }

    /// Dice seeds.
    pub fn arb_seed() -> impl Strategy<Value = u64> {
        any::<u64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::standard_matchup;

    #[test]
    fn test_seeded_match_is_deterministic() {
        let (home, away) = standard_matchup();
        let result =
            verify_match_determinism(&home, &away, MatchConfig::default(), 42, 3).unwrap();
        result.assert_deterministic();
        assert_eq!(result.unique_hashes().len(), 1);
    }

    #[test]
    fn test_parallel_matches_agree() {
        let (home, away) = standard_matchup();
        let result =
            run_parallel_matches_scoped(&home, &away, MatchConfig::default(), 7, 4).unwrap();
        result.assert_deterministic();
        assert_eq!(result.hashes.len(), 4);
    }

    #[test]
    fn test_divergence_detected() {
        let counter = std::cell::Cell::new(0u64);
        let result = verify_determinism(3, || {
            counter.set(counter.get() + 1);
            Ok(counter.get())
        })
        .unwrap();
        assert!(!result.is_deterministic);
        assert_eq!(result.unique_hashes(), [1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "non-deterministic")]
    fn test_assert_deterministic_panics() {
        DeterminismResult::from_hashes(vec![1, 2]).assert_deterministic();
    }

    #[test]
    fn test_compute_hash_stable() {
        assert_eq!(compute_hash(&"koshien"), compute_hash(&"koshien"));
    }
}
