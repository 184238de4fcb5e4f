//! Error types for the match simulation.

use thiserror::Error;

/// Result type alias using [`MatchError`].
pub type Result<T> = std::result::Result<T, MatchError>;

/// Top-level error type for all match simulation errors.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Roster is empty or incomplete; raised before any simulation starts.
    #[error("Invalid roster for '{team}': {reason}")]
    RosterInvalid {
        /// Team name.
        team: String,
        /// What is missing or inconsistent.
        reason: String,
    },

    /// An ability or condition value lies outside its 0-100 range.
    #[error("Invariant violation: player '{player}' has {field} = {value} (expected 0-100)")]
    InvariantViolation {
        /// Player identifier.
        player: String,
        /// Name of the offending field.
        field: &'static str,
        /// The out-of-range value.
        value: u32,
    },

    /// The random source failed or produced a value outside [0, 1).
    #[error("Random source failure: {0}")]
    RandomSource(String),

    /// A guard limit from [`MatchConfig`](crate::config::MatchConfig) was hit.
    #[error("Safety limit exceeded in inning {inning}: {limit}")]
    SafetyLimitExceeded {
        /// Inning being played when the limit tripped.
        inning: u32,
        /// Which limit was exceeded.
        limit: String,
    },

    /// Data file parsing error.
    #[error("Failed to parse data file '{path}': {message}")]
    DataParseError {
        /// Path to the file that failed to parse.
        path: String,
        /// Error message.
        message: String,
    },

    /// Invalid engine or record state.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}
