//! # Koshien Core
//!
//! Baseball match engine for the Koshien high-school baseball manager.
//!
//! Given two team snapshots and a source of uniform random numbers, the
//! engine plays a complete game plate appearance by plate appearance and
//! returns a [`result::MatchResult`].
//!
//! This crate contains **only** match logic:
//! - No rendering
//! - No IO outside explicit record save/load
//! - No system randomness (all rolls come through [`dice::Dice`])
//!
//! Seeding the dice makes a match fully reproducible, which the headless
//! runner uses for batch balance runs and determinism checks.
//!
//! ## Crate Structure
//!
//! - [`roster`] - Team and player snapshots, validation
//! - [`bases`] - Base-out state and runner advancement
//! - [`at_bat`] - Plate appearance resolution
//! - [`half_inning`] - One team's turn at bat
//! - [`game`] - Inning loop and match entry points
//! - [`performance`] - Per-player batting counters
//! - [`result`] - Final record, MVP and highlights
//! - [`replay`] - Seeded match records

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod at_bat;
pub mod bases;
pub mod config;
pub mod dice;
pub mod error;
pub mod game;
pub mod half_inning;
pub mod performance;
pub mod replay;
pub mod result;
pub mod roster;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::at_bat::{AtBatOutcome, HitKind, OutKind};
    pub use crate::bases::{BaseOutState, BaseState};
    pub use crate::config::{MatchConfig, OUTS_PER_HALF_INNING, REGULATION_INNINGS};
    pub use crate::dice::{Dice, RngDice};
    pub use crate::error::{MatchError, Result};
    pub use crate::game::{simulate_match, simulate_seeded, GameState, MatchSimulator, Scoreboard};
    pub use crate::half_inning::Half;
    pub use crate::performance::{BattingLine, PlayerPerformance};
    pub use crate::replay::MatchRecord;
    pub use crate::result::{InningResult, MatchResult};
    pub use crate::roster::{
        Abilities, Condition, PitchingAbilities, PlayerId, Position, RosterSnapshot, TeamSide,
        TeamSnapshot,
    };
}
