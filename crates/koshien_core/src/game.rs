//! Game driver: alternates half-innings until the game is decided.
//!
//! # State Machine
//!
//! ```text
//! TopHalf(1) -> BottomHalf(1) -> TopHalf(2) -> ... -> BottomHalf(9)
//!                                                        |
//!                     scores differ: GameOver <----------+
//!                     tied:          TopHalf(10) -> BottomHalf(10) -> ...
//! ```
//!
//! Both halves of every inning are always played: the home team bats in
//! the bottom of the ninth even when it already leads, and there is no
//! walk-off ending mid-inning.
//!
//! # Example
//!
//! ```
//! use koshien_core::prelude::*;
//! # fn team(name: &str) -> TeamSnapshot {
//! #     let players: Vec<RosterSnapshot> = Position::ALL.iter().enumerate().map(|(i, &position)| RosterSnapshot {
//! #         id: PlayerId::new(format!("{name}-{i}")),
//! #         name: format!("{name} {i}"),
//! #         position,
//! #         abilities: Abilities { batting: 55, power: 50, running: 50, throwing: 50, fielding: 50 },
//! #         pitching: (position == Position::Pitcher)
//! #             .then_some(PitchingAbilities { pitching: 60, control: 55, stamina: 60 }),
//! #         condition: Condition::default(),
//! #     }).collect();
//! #     TeamSnapshot {
//! #         name: name.to_string(),
//! #         batting_order: players.iter().map(|p| p.id.clone()).collect(),
//! #         starting_pitcher: players[0].id.clone(),
//! #         players,
//! #     }
//! # }
//! let home = team("Seiryo");
//! let away = team("Meikun");
//!
//! let result = simulate_seeded(home, away, MatchConfig::default(), 2024).unwrap();
//! assert!(result.innings.len() >= 9);
//! assert_ne!(result.home_score, result.away_score);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{MatchConfig, REGULATION_INNINGS};
use crate::dice::{Dice, RngDice};
use crate::error::{MatchError, Result};
use crate::half_inning::{play_half_inning, Half, HalfInningLog, Lineup};
use crate::performance::PerformanceLedger;
use crate::result::{compile, CompiledGame, InningResult, MatchResult};
use crate::roster::{TeamSide, TeamSnapshot};

/// Runs on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Home team runs.
    pub home: u32,
    /// Away team runs.
    pub away: u32,
}

impl Scoreboard {
    /// Credit runs to a side.
    pub fn add(&mut self, side: TeamSide, runs: u32) {
        match side {
            TeamSide::Home => self.home += runs,
            TeamSide::Away => self.away += runs,
        }
    }

    /// Whether the teams are level.
    #[must_use]
    pub const fn is_tied(&self) -> bool {
        self.home == self.away
    }
}

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Away team batting in inning `n`.
    TopHalf(u32),
    /// Home team batting in inning `n`.
    BottomHalf(u32),
    /// Decided.
    GameOver,
}

impl GameState {
    /// Opening state.
    pub const START: Self = Self::TopHalf(1);

    /// State after the current half-inning completes with `score` on the board.
    #[must_use]
    pub const fn advance(self, score: &Scoreboard) -> Self {
        match self {
            Self::TopHalf(n) => Self::BottomHalf(n),
            Self::BottomHalf(n) if n >= REGULATION_INNINGS && !score.is_tied() => Self::GameOver,
            Self::BottomHalf(n) => Self::TopHalf(n + 1),
            Self::GameOver => Self::GameOver,
        }
    }
}

/// A match ready to be played.
///
/// Owns the two snapshots so nothing outside can change them mid-match.
/// Construction validates both rosters; nothing is simulated on invalid
/// input.
#[derive(Debug, Clone)]
pub struct MatchSimulator {
    home: TeamSnapshot,
    away: TeamSnapshot,
    config: MatchConfig,
}

impl MatchSimulator {
    /// Validate inputs and prepare a match.
    pub fn new(home: TeamSnapshot, away: TeamSnapshot, config: MatchConfig) -> Result<Self> {
        config.validate()?;
        home.validate()?;
        away.validate()?;
        Ok(Self { home, away, config })
    }

    /// Home snapshot.
    #[must_use]
    pub const fn home(&self) -> &TeamSnapshot {
        &self.home
    }

    /// Away snapshot.
    #[must_use]
    pub const fn away(&self) -> &TeamSnapshot {
        &self.away
    }

    /// Guard limits in force.
    #[must_use]
    pub const fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Play the whole match.
    ///
    /// The result depends only on the snapshots and the rolls drawn from
    /// `dice`; replaying the same rolls yields an identical record.
    pub fn simulate<D: Dice + ?Sized>(&self, dice: &mut D) -> Result<MatchResult> {
        let mut home = Lineup::new(&self.home, TeamSide::Home)?;
        let mut away = Lineup::new(&self.away, TeamSide::Away)?;
        let home_pitcher = *home.pitching();
        let away_pitcher = *away.pitching();

        let mut score = Scoreboard::default();
        let mut ledger = PerformanceLedger::new();
        let mut innings = Vec::new();
        let mut play_highlights = Vec::new();
        let mut pending_top: Option<HalfInningLog> = None;
        let mut state = GameState::START;

        tracing::debug!(home = %self.home.name, away = %self.away.name, "Match started");

        loop {
            let log = match state {
                GameState::TopHalf(n) => {
                    if n > self.config.inning_limit {
                        return Err(MatchError::SafetyLimitExceeded {
                            inning: n,
                            limit: format!("inning limit {}", self.config.inning_limit),
                        });
                    }
                    play_half_inning(
                        n,
                        Half::Top,
                        &mut away,
                        &home_pitcher,
                        &mut ledger,
                        &self.config,
                        dice,
                    )?
                }
                GameState::BottomHalf(n) => play_half_inning(
                    n,
                    Half::Bottom,
                    &mut home,
                    &away_pitcher,
                    &mut ledger,
                    &self.config,
                    dice,
                )?,
                GameState::GameOver => break,
            };

            score.add(log.half.batting_side(), log.runs);
            play_highlights.extend(log.highlights.iter().cloned());

            match log.half {
                Half::Top => pending_top = Some(log),
                Half::Bottom => {
                    let top = pending_top.take().ok_or_else(|| {
                        MatchError::InvalidState(format!(
                            "bottom of inning {} played without a top half",
                            log.inning
                        ))
                    })?;
                    innings.push(InningResult::from_halves(top, log)?);
                }
            }

            state = state.advance(&score);
        }

        Ok(compile(CompiledGame {
            home_team: self.home.name.clone(),
            away_team: self.away.name.clone(),
            home_score: score.home,
            away_score: score.away,
            innings,
            play_highlights,
            ledger,
        }))
    }
}

/// Validate, then play a match with the given dice.
pub fn simulate_match<D: Dice + ?Sized>(
    home: TeamSnapshot,
    away: TeamSnapshot,
    config: MatchConfig,
    dice: &mut D,
) -> Result<MatchResult> {
    MatchSimulator::new(home, away, config)?.simulate(dice)
}

/// Play a match with ChaCha dice seeded from `seed`.
pub fn simulate_seeded(
    home: TeamSnapshot,
    away: TeamSnapshot,
    config: MatchConfig,
    seed: u64,
) -> Result<MatchResult> {
    simulate_match(home, away, config, &mut RngDice::seeded(seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_always_goes_to_bottom() {
        let tied = Scoreboard::default();
        let lead = Scoreboard { home: 0, away: 3 };
        for n in [1, 9, 12] {
            assert_eq!(GameState::TopHalf(n).advance(&tied), GameState::BottomHalf(n));
            assert_eq!(GameState::TopHalf(n).advance(&lead), GameState::BottomHalf(n));
        }
    }

    #[test]
    fn test_regulation_continues_even_with_lead() {
        let lead = Scoreboard { home: 5, away: 0 };
        for n in 1..REGULATION_INNINGS {
            assert_eq!(GameState::BottomHalf(n).advance(&lead), GameState::TopHalf(n + 1));
        }
    }

    #[test]
    fn test_ninth_ends_when_not_tied() {
        let lead = Scoreboard { home: 2, away: 1 };
        assert_eq!(GameState::BottomHalf(9).advance(&lead), GameState::GameOver);
    }

    #[test]
    fn test_extra_innings_while_tied() {
        let tied = Scoreboard { home: 3, away: 3 };
        assert_eq!(GameState::BottomHalf(9).advance(&tied), GameState::TopHalf(10));
        assert_eq!(GameState::BottomHalf(14).advance(&tied), GameState::TopHalf(15));
        let lead = Scoreboard { home: 3, away: 4 };
        assert_eq!(GameState::BottomHalf(14).advance(&lead), GameState::GameOver);
    }

    #[test]
    fn test_game_over_is_terminal() {
        assert_eq!(
            GameState::GameOver.advance(&Scoreboard::default()),
            GameState::GameOver
        );
    }

    #[test]
    fn test_scoreboard_credits_side() {
        let mut score = Scoreboard::default();
        score.add(TeamSide::Away, 2);
        score.add(TeamSide::Home, 1);
        assert_eq!(score, Scoreboard { home: 1, away: 2 });
        assert!(!score.is_tied());
    }
}
