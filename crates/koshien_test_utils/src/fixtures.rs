//! Test fixtures and helpers.
//!
//! Pre-built players and teams for consistent testing. Every player built
//! here has 50 in every ability unless stated otherwise, so a fixture
//! batter facing a fixture pitcher has a hit chance of exactly 0.5:
//! home run below 0.05, hit below 0.15, walk below 0.2, out otherwise.

use koshien_core::roster::{
    Abilities, Condition, PitchingAbilities, PlayerId, Position, RosterSnapshot, TeamSnapshot,
};

/// Abilities with the given batting and power, 50 elsewhere.
#[must_use]
pub const fn abilities(batting: u8, power: u8) -> Abilities {
    Abilities {
        batting,
        power,
        running: 50,
        throwing: 50,
        fielding: 50,
    }
}

/// Pitching abilities with the given pitching and control, 50 stamina.
#[must_use]
pub const fn pitching(pitching: u8, control: u8) -> PitchingAbilities {
    PitchingAbilities {
        pitching,
        control,
        stamina: 50,
    }
}

/// A fielder at `position`.
#[must_use]
pub fn player(id: &str, position: Position, abilities: Abilities) -> RosterSnapshot {
    RosterSnapshot {
        id: PlayerId::new(id),
        name: format!("Player {id}"),
        position,
        abilities,
        pitching: None,
        condition: Condition::default(),
    }
}

/// A pitcher with pitching abilities attached.
#[must_use]
pub fn pitcher(id: &str, abilities: Abilities, pitching: PitchingAbilities) -> RosterSnapshot {
    RosterSnapshot {
        pitching: Some(pitching),
        ..player(id, Position::Pitcher, abilities)
    }
}

/// Assemble a team batting in roster order with the first pitcher starting.
///
/// # Panics
///
/// Panics if `players` has no pitcher.
#[must_use]
pub fn team(name: &str, players: Vec<RosterSnapshot>) -> TeamSnapshot {
    let starting_pitcher = players
        .iter()
        .find(|p| p.position == Position::Pitcher)
        .map(|p| p.id.clone())
        .expect("fixture team needs a pitcher");
    TeamSnapshot {
        name: name.to_string(),
        batting_order: players.iter().map(|p| p.id.clone()).collect(),
        starting_pitcher,
        players,
    }
}

/// Nine players, one per position, with the given batting ability and
/// pitcher. Ids are `{prefix}1` through `{prefix}9`, pitcher first.
#[must_use]
pub fn team_with(name: &str, prefix: &str, batting: u8, arm: PitchingAbilities) -> TeamSnapshot {
    let players = Position::ALL
        .iter()
        .enumerate()
        .map(|(i, &position)| {
            let id = format!("{prefix}{}", i + 1);
            if position == Position::Pitcher {
                pitcher(&id, abilities(batting, 50), arm)
            } else {
                player(&id, position, abilities(batting, 50))
            }
        })
        .collect();
    team(name, players)
}

/// The standard all-50 team.
#[must_use]
pub fn standard_team(name: &str, prefix: &str) -> TeamSnapshot {
    team_with(name, prefix, 50, pitching(50, 50))
}

/// A pair of standard teams, home first.
#[must_use]
pub fn standard_matchup() -> (TeamSnapshot, TeamSnapshot) {
    (
        standard_team("Seiryo", "h"),
        standard_team("Meikun", "a"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_team_is_valid() {
        let team = standard_team("Test", "t");
        assert!(team.validate().is_ok());
        assert_eq!(team.batting_order.len(), 9);
        assert_eq!(team.starting_pitcher.as_str(), "t1");
    }

    #[test]
    fn test_standard_hit_chance() {
        let team = standard_team("Test", "t");
        let arm = team.players[0].pitching.unwrap();
        let chance = koshien_core::at_bat::hit_chance(&team.players[1].abilities, &arm);
        assert!((chance - 0.5).abs() < 1e-12);
    }
}
