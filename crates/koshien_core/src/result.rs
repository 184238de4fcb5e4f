//! Match result record and MVP selection.
//!
//! [`MatchResult`] is the only artifact the engine hands back to the
//! meta-game. It is a plain value: the roster owner applies fatigue, funds
//! and fan support from it, and the UI renders it.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::at_bat::AtBatOutcome;
use crate::error::{MatchError, Result};
use crate::half_inning::{Half, HalfInningLog};
use crate::performance::{BattingLine, PerformanceLedger};
use crate::roster::TeamSide;

/// Runs per half for one inning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InningResult {
    /// Inning number, from 1.
    pub inning: u32,
    /// Runs the away team scored in the top half.
    pub top_runs: u32,
    /// Runs the home team scored in the bottom half.
    pub bottom_runs: u32,
    /// Play-by-play for the top half followed by the bottom half.
    pub events: Vec<String>,
}

impl InningResult {
    /// Combine the two halves of an inning.
    pub fn from_halves(top: HalfInningLog, bottom: HalfInningLog) -> Result<Self> {
        if top.half != Half::Top || bottom.half != Half::Bottom || top.inning != bottom.inning {
            return Err(MatchError::InvalidState(format!(
                "cannot pair {} {} with {} {}",
                top.half, top.inning, bottom.half, bottom.inning
            )));
        }
        let mut events = top.events;
        events.extend(bottom.events);
        Ok(Self {
            inning: top.inning,
            top_runs: top.runs,
            bottom_runs: bottom.runs,
            events,
        })
    }
}

/// Final record of a match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchResult {
    /// Home team name.
    pub home_team: String,
    /// Away team name.
    pub away_team: String,
    /// Home team runs.
    pub home_score: u32,
    /// Away team runs.
    pub away_score: u32,
    /// Line score, one entry per inning played.
    pub innings: Vec<InningResult>,
    /// Name of the MVP, if anyone earned a positive MVP score.
    pub mvp: Option<String>,
    /// Notable plays in the order they happened, then the final score.
    pub highlights: Vec<String>,
    /// Box score in first-appearance order.
    pub batting_lines: Vec<BattingLine>,
}

impl MatchResult {
    /// Winning side, or `None` for a tie.
    ///
    /// A completed match never ties; the case exists for hand-built records.
    #[must_use]
    pub fn winner(&self) -> Option<TeamSide> {
        match self.home_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => Some(TeamSide::Home),
            std::cmp::Ordering::Less => Some(TeamSide::Away),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Name of the winning team.
    #[must_use]
    pub fn winner_name(&self) -> Option<&str> {
        self.winner().map(|side| match side {
            TeamSide::Home => self.home_team.as_str(),
            TeamSide::Away => self.away_team.as_str(),
        })
    }

    /// Number of innings played.
    #[must_use]
    pub fn total_innings(&self) -> u32 {
        self.innings.last().map_or(0, |i| i.inning)
    }

    /// Whether the game went past regulation.
    #[must_use]
    pub fn went_to_extra_innings(&self) -> bool {
        self.total_innings() > crate::config::REGULATION_INNINGS
    }

    /// Runs a side scored, summed from the line score.
    #[must_use]
    pub fn line_score_total(&self, side: TeamSide) -> u32 {
        self.innings
            .iter()
            .map(|i| match side {
                TeamSide::Home => i.bottom_runs,
                TeamSide::Away => i.top_runs,
            })
            .sum()
    }

    /// Canonical byte encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| MatchError::InvalidState(format!("Failed to serialize result: {e}")))
    }

    /// Hash of the canonical encoding, for cheap equality checks.
    pub fn fingerprint(&self) -> Result<u64> {
        let bytes = self.to_bytes()?;
        let mut hasher = DefaultHasher::new();
        bytes.hash(&mut hasher);
        Ok(hasher.finish())
    }
}

/// Pick the MVP: highest `hits*2 + home_runs*5 + walks`.
///
/// Only a strictly higher score replaces the current leader, so ties go to
/// whoever batted first. Returns `None` if nobody scored above zero.
#[must_use]
pub fn select_mvp(ledger: &PerformanceLedger) -> Option<&BattingLine> {
    let mut best: Option<&BattingLine> = None;
    let mut best_score = 0;
    for line in ledger.iter() {
        let score = line.performance.mvp_score();
        if score > best_score {
            best = Some(line);
            best_score = score;
        }
    }
    best
}

/// Highlight text for a play worth calling out.
pub(crate) fn play_highlight(
    inning: u32,
    half: Half,
    batter: &str,
    outcome: &AtBatOutcome,
) -> Option<String> {
    let worth_it = match outcome {
        AtBatOutcome::HomeRun { .. } => true,
        AtBatOutcome::Hit { runs, .. } => *runs >= 2,
        AtBatOutcome::Walk { runs } => *runs > 0,
        AtBatOutcome::Out { .. } => false,
    };
    worth_it.then(|| {
        format!(
            "{half} of the {}: {}",
            ordinal(inning),
            outcome.describe(batter)
        )
    })
}

/// `1` -> `1st`, `12` -> `12th`, `23` -> `23rd`.
#[must_use]
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Totals gathered by the game driver.
#[derive(Debug)]
pub(crate) struct CompiledGame {
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub innings: Vec<InningResult>,
    pub play_highlights: Vec<String>,
    pub ledger: PerformanceLedger,
}

/// Assemble the final record.
pub(crate) fn compile(game: CompiledGame) -> MatchResult {
    let mvp = select_mvp(&game.ledger).map(|line| line.name.clone());

    let mut highlights = game.play_highlights;
    let innings_played = game.innings.last().map_or(0, |i| i.inning);
    if innings_played > crate::config::REGULATION_INNINGS {
        highlights.push(format!(
            "Extra innings! Decided in the {}.",
            ordinal(innings_played)
        ));
    }
    highlights.push(format!(
        "Final: {} {} - {} {}",
        game.away_team, game.away_score, game.home_score, game.home_team
    ));

    tracing::debug!(
        home = %game.home_team,
        away = %game.away_team,
        home_score = game.home_score,
        away_score = game.away_score,
        innings = innings_played,
        mvp = ?mvp,
        "Match compiled"
    );

    MatchResult {
        home_team: game.home_team,
        away_team: game.away_team,
        home_score: game.home_score,
        away_score: game.away_score,
        innings: game.innings,
        mvp,
        highlights,
        batting_lines: game.ledger.into_lines(),
    }
}
