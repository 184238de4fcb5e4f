//! One team's turn at bat.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::at_bat::resolve_at_bat;
use crate::bases::BaseOutState;
use crate::config::MatchConfig;
use crate::dice::Dice;
use crate::error::{MatchError, Result};
use crate::performance::PerformanceLedger;
use crate::result::play_highlight;
use crate::roster::{PitchingAbilities, RosterSnapshot, TeamSide, TeamSnapshot};

/// Top or bottom of an inning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Half {
    /// Away team bats.
    Top,
    /// Home team bats.
    Bottom,
}

impl Half {
    /// Team at the plate in this half.
    #[must_use]
    pub const fn batting_side(self) -> TeamSide {
        match self {
            Half::Top => TeamSide::Away,
            Half::Bottom => TeamSide::Home,
        }
    }
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Half::Top => f.write_str("Top"),
            Half::Bottom => f.write_str("Bottom"),
        }
    }
}

/// A validated team with its batting order resolved.
///
/// The batting cursor persists across innings, so the leadoff hitter of
/// each half-inning is whoever follows the last batter of the previous one.
#[derive(Debug, Clone)]
pub struct Lineup<'a> {
    team: &'a TeamSnapshot,
    side: TeamSide,
    order: Vec<&'a RosterSnapshot>,
    pitcher: &'a PitchingAbilities,
    cursor: usize,
}

impl<'a> Lineup<'a> {
    /// Validate a team and resolve its batting order and starting pitcher.
    pub fn new(team: &'a TeamSnapshot, side: TeamSide) -> Result<Self> {
        team.validate()?;

        let invalid = |reason: &str| MatchError::RosterInvalid {
            team: team.name.clone(),
            reason: reason.to_string(),
        };

        let order = team
            .batting_order
            .iter()
            .map(|id| team.player(id).ok_or_else(|| invalid("unknown batter")))
            .collect::<Result<Vec<_>>>()?;
        let pitcher = team
            .player(&team.starting_pitcher)
            .and_then(|p| p.pitching.as_ref())
            .ok_or_else(|| invalid("starting pitcher has no pitching abilities"))?;

        Ok(Self {
            team,
            side,
            order,
            pitcher,
            cursor: 0,
        })
    }

    /// Team name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.team.name
    }

    /// Scoreboard side.
    #[must_use]
    pub const fn side(&self) -> TeamSide {
        self.side
    }

    /// Abilities of the pitcher this team fields.
    #[must_use]
    pub const fn pitching(&self) -> &'a PitchingAbilities {
        self.pitcher
    }

    /// Take the next batter, wrapping at the end of the order.
    pub fn next_batter(&mut self) -> &'a RosterSnapshot {
        let batter = self.order[self.cursor];
        self.cursor = (self.cursor + 1) % self.order.len();
        batter
    }
}

/// What happened in one half-inning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HalfInningLog {
    /// Inning number, from 1.
    pub inning: u32,
    /// Which half.
    pub half: Half,
    /// Runs scored by the batting team.
    pub runs: u32,
    /// Outs recorded; always 3 for a completed half.
    pub outs: u8,
    /// Plate appearances taken.
    pub plate_appearances: u32,
    /// Event text in order.
    pub events: Vec<String>,
    /// Notable plays.
    pub highlights: Vec<String>,
}

/// Play one half-inning: batters come up in order until three outs.
pub fn play_half_inning<D: Dice + ?Sized>(
    inning: u32,
    half: Half,
    batting: &mut Lineup<'_>,
    pitcher: &PitchingAbilities,
    ledger: &mut PerformanceLedger,
    config: &MatchConfig,
    dice: &mut D,
) -> Result<HalfInningLog> {
    let mut state = BaseOutState::new();

    let mut log = HalfInningLog {
        inning,
        half,
        runs: 0,
        outs: 0,
        plate_appearances: 0,
        events: Vec::new(),
        highlights: Vec::new(),
    };

    while !state.is_complete() {
        if log.plate_appearances >= config.plate_appearance_limit {
            return Err(MatchError::SafetyLimitExceeded {
                inning,
                limit: format!(
                    "{half} half passed {} plate appearances",
                    config.plate_appearance_limit
                ),
            });
        }

        let batter = batting.next_batter();
        let outcome = resolve_at_bat(&batter.abilities, pitcher, &mut state, dice)?;

        log.plate_appearances += 1;
        log.runs += outcome.runs();
        ledger.record(batter, batting.side(), &outcome);
        log.events.push(outcome.describe(&batter.name));
        if let Some(highlight) = play_highlight(inning, half, &batter.name, &outcome) {
            log.highlights.push(highlight);
        }
    }

    log.outs = state.outs();
    tracing::debug!(
        inning,
        %half,
        team = batting.name(),
        runs = log.runs,
        plate_appearances = log.plate_appearances,
        "Half-inning complete"
    );
    Ok(log)
}
