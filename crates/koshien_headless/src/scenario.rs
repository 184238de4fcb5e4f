//! Scenario loading and configuration.
//!
//! A scenario names the two teams for a headless match and, optionally,
//! the engine guard limits.

use std::path::Path;

use koshien_core::config::MatchConfig;
use koshien_core::error::MatchError;
use koshien_core::roster::TeamSnapshot;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::roster_generator::generate_team;

/// Seed for the built-in exhibition's home team.
pub const EXHIBITION_HOME_SEED: u64 = 1905;
/// Seed for the built-in exhibition's away team.
pub const EXHIBITION_AWAY_SEED: u64 = 1915;

/// Error type for scenario operations.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// File not found.
    #[error("Scenario file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read scenario file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// A team or the config is not playable.
    #[error("Invalid scenario: {0}")]
    Invalid(#[from] MatchError),
}

/// A complete scenario configuration.
///
/// # Example RON
///
/// ```ron
/// Scenario(
///     name: "Prefectural final",
///     description: "Seiryo vs Meikun",
///     home: TeamSnapshot( /* ... */ ),
///     away: TeamSnapshot( /* ... */ ),
///     config: MatchConfig(inning_limit: 15),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Team batting in the bottom half.
    pub home: TeamSnapshot,
    /// Team batting in the top half.
    pub away: TeamSnapshot,
    /// Engine guard limits.
    #[serde(default)]
    pub config: MatchConfig,
}

impl Scenario {
    /// Load a scenario from a RON file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Load from a RON string and validate it.
    pub fn from_ron_str(ron: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = ron::from_str(ron)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load `path` if given, otherwise the built-in exhibition.
    pub fn load_or_exhibition(path: Option<&Path>) -> Result<Self, ScenarioError> {
        match path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading scenario");
                Self::load(path)
            }
            None => Ok(Self::exhibition()),
        }
    }

    /// Check both teams and the config.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        self.config.validate()?;
        self.home.validate()?;
        self.away.validate()?;
        Ok(())
    }

    /// Built-in match between two generated teams.
    #[must_use]
    pub fn exhibition() -> Self {
        Self {
            name: "Exhibition".to_string(),
            description: "Generated teams, fixed seeds".to_string(),
            home: generate_team("Seiryo High", EXHIBITION_HOME_SEED),
            away: generate_team("Meikun High", EXHIBITION_AWAY_SEED),
            config: MatchConfig::default(),
        }
    }

    /// Write the scenario as pretty RON.
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}
