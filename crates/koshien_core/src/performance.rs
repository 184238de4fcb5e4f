//! Per-player batting counters for one match.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::at_bat::AtBatOutcome;
use crate::roster::{PlayerId, RosterSnapshot, TeamSide};

/// Counting stats for one batter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PlayerPerformance {
    /// Official at-bats (walks excluded).
    pub at_bats: u32,
    /// Hits, home runs included.
    pub hits: u32,
    /// Home runs.
    pub home_runs: u32,
    /// Walks.
    pub walks: u32,
}

impl PlayerPerformance {
    /// Apply one plate appearance.
    pub fn record(&mut self, outcome: &AtBatOutcome) {
        match outcome {
            AtBatOutcome::HomeRun { .. } => {
                self.home_runs += 1;
                self.hits += 1;
                self.at_bats += 1;
            }
            AtBatOutcome::Hit { .. } => {
                self.hits += 1;
                self.at_bats += 1;
            }
            AtBatOutcome::Walk { .. } => self.walks += 1,
            AtBatOutcome::Out { .. } => self.at_bats += 1,
        }
    }

    /// `hits*2 + home_runs*5 + walks`.
    #[must_use]
    pub const fn mvp_score(&self) -> u32 {
        self.hits * 2 + self.home_runs * 5 + self.walks
    }
}

/// One batter's row in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BattingLine {
    /// Player identifier.
    pub player_id: PlayerId,
    /// Display name.
    pub name: String,
    /// Team the player bats for.
    pub side: TeamSide,
    /// Accumulated counters.
    pub performance: PlayerPerformance,
}

/// Accumulates batting lines keyed by side and player, in first-appearance
/// order.
///
/// Iteration order is the order players first came to the plate, which is
/// what MVP tie-breaking relies on.
#[derive(Debug, Clone, Default)]
pub struct PerformanceLedger {
    lines: Vec<BattingLine>,
    index: HashMap<(TeamSide, PlayerId), usize>,
}

impl PerformanceLedger {
    /// Empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a plate appearance, creating the batter's line on first use.
    pub fn record(&mut self, batter: &RosterSnapshot, side: TeamSide, outcome: &AtBatOutcome) {
        let key = (side, batter.id.clone());
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                self.lines.push(BattingLine {
                    player_id: batter.id.clone(),
                    name: batter.name.clone(),
                    side,
                    performance: PlayerPerformance::default(),
                });
                self.index.insert(key, self.lines.len() - 1);
                self.lines.len() - 1
            }
        };
        self.lines[slot].performance.record(outcome);
    }

    /// Counters for one player, if they have batted.
    #[must_use]
    pub fn get(&self, side: TeamSide, id: &PlayerId) -> Option<&PlayerPerformance> {
        self.index
            .get(&(side, id.clone()))
            .map(|&slot| &self.lines[slot].performance)
    }

    /// Lines in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = &BattingLine> {
        self.lines.iter()
    }

    /// Number of players who have batted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nobody has batted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Consume the ledger into its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<BattingLine> {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::at_bat::{HitKind, OutKind};
    use crate::roster::{Abilities, Condition, Position};

    fn batter(id: &str) -> RosterSnapshot {
        RosterSnapshot {
            id: PlayerId::new(id),
            name: id.to_string(),
            position: Position::LeftField,
            abilities: Abilities {
                batting: 50,
                power: 50,
                running: 50,
                throwing: 50,
                fielding: 50,
            },
            pitching: None,
            condition: Condition::default(),
        }
    }

    #[test]
    fn test_counters_per_outcome() {
        let mut perf = PlayerPerformance::default();
        perf.record(&AtBatOutcome::HomeRun { runs: 2 });
        perf.record(&AtBatOutcome::Hit {
            kind: HitKind::Single,
            runs: 0,
        });
        perf.record(&AtBatOutcome::Walk { runs: 0 });
        perf.record(&AtBatOutcome::Out {
            kind: OutKind::Groundout,
        });

        assert_eq!(
            perf,
            PlayerPerformance {
                at_bats: 3,
                hits: 2,
                home_runs: 1,
                walks: 1,
            }
        );
        assert_eq!(perf.mvp_score(), 2 * 2 + 5 + 1);
    }

    #[test]
    fn test_ledger_keeps_first_appearance_order() {
        let mut ledger = PerformanceLedger::new();
        let walk = AtBatOutcome::Walk { runs: 0 };
        ledger.record(&batter("c"), TeamSide::Away, &walk);
        ledger.record(&batter("a"), TeamSide::Home, &walk);
        ledger.record(&batter("c"), TeamSide::Away, &walk);

        let order: Vec<_> = ledger.iter().map(|l| l.player_id.as_str()).collect();
        assert_eq!(order, ["c", "a"]);
        assert_eq!(ledger.len(), 2);
        assert_eq!(
            ledger.get(TeamSide::Away, &PlayerId::new("c")).map(|p| p.walks),
            Some(2)
        );
        assert!(ledger.get(TeamSide::Home, &PlayerId::new("c")).is_none());
        assert!(ledger.get(TeamSide::Away, &PlayerId::new("b")).is_none());
    }

    #[test]
    fn test_same_id_on_both_sides_kept_apart() {
        let mut ledger = PerformanceLedger::new();
        let homer = AtBatOutcome::HomeRun { runs: 1 };
        ledger.record(&batter("p1"), TeamSide::Away, &homer);
        ledger.record(&batter("p1"), TeamSide::Home, &AtBatOutcome::Walk { runs: 0 });

        assert_eq!(ledger.len(), 2);
        assert_eq!(
            ledger.get(TeamSide::Away, &PlayerId::new("p1")).map(|p| p.home_runs),
            Some(1)
        );
    }
}
