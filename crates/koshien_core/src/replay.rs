//! Match records for reproducing a game later.
//!
//! A record stores everything the engine consumed (both snapshots, the
//! guard limits and the dice seed) plus the fingerprint of the result it
//! produced. Because the engine is deterministic, re-running the record
//! must reproduce the same fingerprint.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::MatchConfig;
use crate::error::{MatchError, Result};
use crate::game::simulate_seeded;
use crate::result::MatchResult;
use crate::roster::TeamSnapshot;

/// Record file format version for compatibility.
pub const RECORD_VERSION: u32 = 1;

/// A seeded match and the fingerprint of its result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Record format version.
    pub version: u32,
    /// Dice seed.
    pub seed: u64,
    /// Guard limits used.
    pub config: MatchConfig,
    /// Home snapshot.
    pub home: TeamSnapshot,
    /// Away snapshot.
    pub away: TeamSnapshot,
    /// Final score as `(home, away)`.
    pub final_score: (u32, u32),
    /// [`MatchResult::fingerprint`] of the recorded game.
    pub fingerprint: u64,
}

impl MatchRecord {
    /// Play a seeded match and capture it.
    pub fn record(
        home: TeamSnapshot,
        away: TeamSnapshot,
        config: MatchConfig,
        seed: u64,
    ) -> Result<(Self, MatchResult)> {
        let result = simulate_seeded(home.clone(), away.clone(), config, seed)?;
        let record = Self {
            version: RECORD_VERSION,
            seed,
            config,
            home,
            away,
            final_score: (result.home_score, result.away_score),
            fingerprint: result.fingerprint()?,
        };
        Ok((record, result))
    }

    /// Play the recorded match again.
    pub fn replay(&self) -> Result<MatchResult> {
        simulate_seeded(self.home.clone(), self.away.clone(), self.config, self.seed)
    }

    /// Whether replaying reproduces the recorded fingerprint.
    ///
    /// # Errors
    /// Returns an error if the replayed match itself fails.
    pub fn verify(&self) -> Result<bool> {
        let actual = self.replay()?.fingerprint()?;
        if actual != self.fingerprint {
            tracing::warn!(
                seed = self.seed,
                expected = self.fingerprint,
                actual,
                "Match record diverged"
            );
        }
        Ok(actual == self.fingerprint)
    }

    /// Save the record to a file.
    ///
    /// # Errors
    /// Returns an error if serialization or file writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = bincode::serialize(self)
            .map_err(|e| MatchError::InvalidState(format!("Failed to serialize record: {e}")))?;
        std::fs::write(path.as_ref(), bytes)
            .map_err(|e| MatchError::InvalidState(format!("Failed to write record file: {e}")))?;
        Ok(())
    }

    /// Load a record from a file.
    ///
    /// # Errors
    /// Returns an error if reading, decoding or the version check fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())
            .map_err(|e| MatchError::InvalidState(format!("Failed to read record file: {e}")))?;
        let record: Self = bincode::deserialize(&bytes)
            .map_err(|e| MatchError::InvalidState(format!("Failed to deserialize record: {e}")))?;

        if record.version != RECORD_VERSION {
            return Err(MatchError::InvalidState(format!(
                "Record version mismatch: expected {RECORD_VERSION}, got {}",
                record.version
            )));
        }

        Ok(record)
    }
}
