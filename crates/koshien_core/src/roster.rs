//! Immutable roster snapshots consumed by the simulator.
//!
//! The team-management layer owns the live roster. Before a match it hands
//! the engine a [`TeamSnapshot`] per side; the engine never writes back.
//! Condition changes caused by a match are applied by the roster owner
//! after it receives the [`MatchResult`](crate::result::MatchResult).
//!
//! # Example RON
//!
//! ```ron
//! TeamSnapshot(
//!     name: "Seiryo High",
//!     players: [
//!         RosterSnapshot(
//!             id: "ace",
//!             name: "Kenta Ito",
//!             position: Pitcher,
//!             abilities: Abilities(batting: 45, power: 40, running: 50, throwing: 70, fielding: 55),
//!             pitching: Some(PitchingAbilities(pitching: 72, control: 65, stamina: 60)),
//!             condition: Condition(fatigue: 0, motivation: 100, injured: false),
//!         ),
//!         // ...
//!     ],
//!     batting_order: ["lead", "ace", /* ... */],
//!     starting_pitcher: "ace",
//! )
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// Highest value any ability or condition field may take.
pub const ABILITY_MAX: u8 = 100;

/// Stable player identifier assigned by the roster owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Fielding positions. A valid batting order covers all nine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Pitcher.
    Pitcher,
    /// Catcher.
    Catcher,
    /// First baseman.
    FirstBase,
    /// Second baseman.
    SecondBase,
    /// Third baseman.
    ThirdBase,
    /// Shortstop.
    ShortStop,
    /// Left fielder.
    LeftField,
    /// Center fielder.
    CenterField,
    /// Right fielder.
    RightField,
}

impl Position {
    /// All positions a lineup must field.
    pub const ALL: [Position; 9] = [
        Position::Pitcher,
        Position::Catcher,
        Position::FirstBase,
        Position::SecondBase,
        Position::ThirdBase,
        Position::ShortStop,
        Position::LeftField,
        Position::CenterField,
        Position::RightField,
    ];
}

/// Abilities every player has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Abilities {
    /// Contact hitting.
    pub batting: u8,
    /// Hitting power; also the chance a hit goes for extra bases.
    pub power: u8,
    /// Base running.
    pub running: u8,
    /// Arm strength.
    pub throwing: u8,
    /// Glove work.
    pub fielding: u8,
}

/// Abilities only pitchers have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PitchingAbilities {
    /// Stuff. Higher values suppress hits.
    pub pitching: u8,
    /// Command. Higher values suppress hits.
    pub control: u8,
    /// Endurance.
    pub stamina: u8,
}

/// Physical and mental state at match time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    /// Accumulated fatigue, 0-100.
    pub fatigue: u8,
    /// Motivation, 0-100.
    pub motivation: u8,
    /// Whether the player is carrying an injury.
    pub injured: bool,
}

impl Default for Condition {
    fn default() -> Self {
        Self {
            fatigue: 0,
            motivation: 100,
            injured: false,
        }
    }
}

/// Match-scoped copy of one player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RosterSnapshot {
    /// Player identifier.
    pub id: PlayerId,
    /// Display name used in events and the MVP field.
    pub name: String,
    /// Fielding position.
    pub position: Position,
    /// General abilities.
    pub abilities: Abilities,
    /// Pitching abilities, present for pitchers.
    #[serde(default)]
    pub pitching: Option<PitchingAbilities>,
    /// Condition at match start.
    #[serde(default)]
    pub condition: Condition,
}

impl RosterSnapshot {
    fn check_ranges(&self) -> Result<()> {
        let a = &self.abilities;
        let mut fields: Vec<(&'static str, u8)> = vec![
            ("batting", a.batting),
            ("power", a.power),
            ("running", a.running),
            ("throwing", a.throwing),
            ("fielding", a.fielding),
            ("fatigue", self.condition.fatigue),
            ("motivation", self.condition.motivation),
        ];
        if let Some(p) = &self.pitching {
            fields.extend([
                ("pitching", p.pitching),
                ("control", p.control),
                ("stamina", p.stamina),
            ]);
        }

        match fields.into_iter().find(|(_, value)| *value > ABILITY_MAX) {
            Some((field, value)) => Err(MatchError::InvariantViolation {
                player: self.id.to_string(),
                field,
                value: u32::from(value),
            }),
            None => Ok(()),
        }
    }
}

/// Which side of the scoreboard a team is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSide {
    /// Bats in the bottom half.
    Home,
    /// Bats in the top half.
    Away,
}

/// Immutable per-match copy of a team.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamSnapshot {
    /// Team name.
    pub name: String,
    /// Every player available for the match.
    pub players: Vec<RosterSnapshot>,
    /// Batting order, cycled for the whole match.
    pub batting_order: Vec<PlayerId>,
    /// The pitcher who faces every opposing batter.
    pub starting_pitcher: PlayerId,
}

impl TeamSnapshot {
    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&RosterSnapshot> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Parse a team from a RON string.
    pub fn from_ron_str(source: &str) -> Result<Self> {
        ron::from_str(source).map_err(|e| MatchError::DataParseError {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Check the snapshot can be simulated.
    ///
    /// Structural problems are reported as [`MatchError::RosterInvalid`];
    /// out-of-range values as [`MatchError::InvariantViolation`].
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| MatchError::RosterInvalid {
            team: self.name.clone(),
            reason,
        };

        if self.players.is_empty() {
            return Err(invalid("roster has no players".to_string()));
        }

        let mut ids = HashSet::new();
        for player in &self.players {
            if !ids.insert(&player.id) {
                return Err(invalid(format!("duplicate player id '{}'", player.id)));
            }
        }

        if self.batting_order.is_empty() {
            return Err(invalid("batting order is empty".to_string()));
        }

        let mut seen = HashSet::new();
        let mut positions = HashSet::new();
        for id in &self.batting_order {
            if !seen.insert(id) {
                return Err(invalid(format!("'{id}' appears twice in the batting order")));
            }
            let player = self
                .player(id)
                .ok_or_else(|| invalid(format!("batting order names unknown player '{id}'")))?;
            positions.insert(player.position);
        }

        if let Some(missing) = Position::ALL.iter().find(|p| !positions.contains(*p)) {
            return Err(invalid(format!("batting order has no {missing:?}")));
        }

        let pitcher = self.player(&self.starting_pitcher).ok_or_else(|| {
            invalid(format!(
                "starting pitcher '{}' is not on the roster",
                self.starting_pitcher
            ))
        })?;
        if pitcher.position != Position::Pitcher {
            return Err(invalid(format!(
                "starting pitcher '{}' plays {:?}",
                pitcher.id, pitcher.position
            )));
        }
        if pitcher.pitching.is_none() {
            return Err(invalid(format!(
                "starting pitcher '{}' has no pitching abilities",
                pitcher.id
            )));
        }

        self.players.iter().try_for_each(RosterSnapshot::check_ranges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str, position: Position) -> RosterSnapshot {
        RosterSnapshot {
            id: PlayerId::new(id),
            name: id.to_uppercase(),
            position,
            abilities: Abilities {
                batting: 50,
                power: 50,
                running: 50,
                throwing: 50,
                fielding: 50,
            },
            pitching: (position == Position::Pitcher).then_some(PitchingAbilities {
                pitching: 50,
                control: 50,
                stamina: 50,
            }),
            condition: Condition::default(),
        }
    }

    fn team() -> TeamSnapshot {
        let players: Vec<_> = Position::ALL
            .iter()
            .enumerate()
            .map(|(i, pos)| player(&format!("p{i}"), *pos))
            .collect();
        let batting_order = players.iter().map(|p| p.id.clone()).collect();
        TeamSnapshot {
            name: "Test High".to_string(),
            players,
            batting_order,
            starting_pitcher: PlayerId::new("p0"),
        }
    }

    #[test]
    fn test_complete_team_validates() {
        assert!(team().validate().is_ok());
    }

    #[test]
    fn test_empty_roster_rejected() {
        let mut t = team();
        t.players.clear();
        assert!(matches!(t.validate(), Err(MatchError::RosterInvalid { .. })));
    }

    #[test]
    fn test_missing_position_rejected() {
        let mut t = team();
        t.batting_order.retain(|id| id.as_str() != "p8");
        let err = t.validate().unwrap_err();
        assert!(err.to_string().contains("RightField"));
    }

    #[test]
    fn test_unknown_batter_rejected() {
        let mut t = team();
        t.batting_order.push(PlayerId::new("ghost"));
        assert!(matches!(t.validate(), Err(MatchError::RosterInvalid { .. })));
    }

    #[test]
    fn test_duplicate_batter_rejected() {
        let mut t = team();
        t.batting_order.push(PlayerId::new("p3"));
        assert!(matches!(t.validate(), Err(MatchError::RosterInvalid { .. })));
    }

    #[test]
    fn test_non_pitcher_starter_rejected() {
        let mut t = team();
        t.starting_pitcher = PlayerId::new("p1");
        assert!(matches!(t.validate(), Err(MatchError::RosterInvalid { .. })));
    }

    #[test]
    fn test_pitcher_without_pitching_abilities_rejected() {
        let mut t = team();
        t.players[0].pitching = None;
        assert!(matches!(t.validate(), Err(MatchError::RosterInvalid { .. })));
    }

    #[test]
    fn test_out_of_range_ability_is_invariant_violation() {
        let mut t = team();
        t.players[4].abilities.power = 101;
        match t.validate() {
            Err(MatchError::InvariantViolation {
                player,
                field,
                value,
            }) => {
                assert_eq!(player, "p4");
                assert_eq!(field, "power");
                assert_eq!(value, 101);
            }
            other => panic!("expected invariant violation, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_control_is_invariant_violation() {
        let mut t = team();
        if let Some(p) = t.players[0].pitching.as_mut() {
            p.control = 150;
        }
        assert!(matches!(
            t.validate(),
            Err(MatchError::InvariantViolation { field: "control", .. })
        ));
    }

    #[test]
    fn test_team_ron_parses() {
        let source = r#"(
            name: "Mini",
            players: [(
                id: "ace",
                name: "Ace",
                position: Pitcher,
                abilities: (batting: 40, power: 40, running: 40, throwing: 40, fielding: 40),
                pitching: Some((pitching: 60, control: 60, stamina: 60)),
            )],
            batting_order: ["ace"],
            starting_pitcher: "ace",
        )"#;
        let team = TeamSnapshot::from_ron_str(source).unwrap();
        assert_eq!(team.players[0].condition, Condition::default());
        // One player cannot cover nine positions.
        assert!(matches!(team.validate(), Err(MatchError::RosterInvalid { .. })));
    }
}
