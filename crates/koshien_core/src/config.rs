//! Engine configuration.
//!
//! Rules of the game itself (nine regulation innings, three outs) are fixed
//! constants. [`MatchConfig`] only carries guard limits that stop a
//! degenerate random source from looping forever.

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// Innings played before the game may end.
pub const REGULATION_INNINGS: u32 = 9;

/// Outs that end a half-inning.
pub const OUTS_PER_HALF_INNING: u8 = 3;

/// Guard limits for a single match.
///
/// # Example RON
///
/// ```ron
/// MatchConfig(
///     plate_appearance_limit: 200,
///     inning_limit: 99,
/// )
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Maximum plate appearances in one half-inning.
    #[serde(default = "default_plate_appearance_limit")]
    pub plate_appearance_limit: u32,
    /// Maximum innings (regulation plus extras) in one match.
    #[serde(default = "default_inning_limit")]
    pub inning_limit: u32,
}

const fn default_plate_appearance_limit() -> u32 {
    200
}

const fn default_inning_limit() -> u32 {
    99
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            plate_appearance_limit: default_plate_appearance_limit(),
            inning_limit: default_inning_limit(),
        }
    }
}

impl MatchConfig {
    /// Set the per-half-inning plate appearance limit.
    #[must_use]
    pub const fn with_plate_appearance_limit(mut self, limit: u32) -> Self {
        self.plate_appearance_limit = limit;
        self
    }

    /// Set the inning limit.
    #[must_use]
    pub const fn with_inning_limit(mut self, limit: u32) -> Self {
        self.inning_limit = limit;
        self
    }

    /// Check that the limits leave room for a regulation game.
    pub fn validate(&self) -> Result<()> {
        if self.inning_limit < REGULATION_INNINGS {
            return Err(MatchError::InvalidState(format!(
                "inning_limit {} is below the {REGULATION_INNINGS} regulation innings",
                self.inning_limit
            )));
        }
        if self.plate_appearance_limit < u32::from(OUTS_PER_HALF_INNING) {
            return Err(MatchError::InvalidState(format!(
                "plate_appearance_limit {} cannot fit {OUTS_PER_HALF_INNING} outs",
                self.plate_appearance_limit
            )));
        }
        Ok(())
    }

    /// Parse a config from a RON string.
    pub fn from_ron_str(source: &str) -> Result<Self> {
        ron::from_str(source).map_err(|e| MatchError::DataParseError {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MatchConfig::default();
        assert_eq!(config.plate_appearance_limit, 200);
        assert_eq!(config.inning_limit, 99);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inning_limit_below_regulation_rejected() {
        let config = MatchConfig::default().with_inning_limit(8);
        assert!(matches!(
            config.validate(),
            Err(MatchError::InvalidState(_))
        ));
    }

    #[test]
    fn test_ron_fields_default_when_missing() {
        let config = MatchConfig::from_ron_str("(inning_limit: 15)").unwrap();
        assert_eq!(config.inning_limit, 15);
        assert_eq!(config.plate_appearance_limit, 200);
    }
}
