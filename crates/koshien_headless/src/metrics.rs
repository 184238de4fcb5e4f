//! Match metrics collection for balance analysis.
//!
//! One [`GameMetrics`] per simulated match, folded into a [`BatchSummary`]
//! for the whole batch.

use std::collections::BTreeMap;

use koshien_core::error::Result;
use koshien_core::result::MatchResult;
use koshien_core::roster::TeamSide;
use serde::{Deserialize, Serialize};

/// Complete metrics for a single match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameMetrics {
    /// Unique game identifier.
    pub game_id: String,
    /// Scenario name.
    pub scenario: String,
    /// Dice seed used.
    pub seed: u64,
    /// Home team name.
    pub home_team: String,
    /// Away team name.
    pub away_team: String,
    /// Home team runs.
    pub home_score: u32,
    /// Away team runs.
    pub away_score: u32,
    /// Innings played.
    pub innings: u32,
    /// Home runs hit by both teams.
    pub home_runs: u32,
    /// Winning team name.
    pub winner: Option<String>,
    /// Whether the home team won.
    pub home_win: bool,
    /// MVP name, if any.
    pub mvp: Option<String>,
    /// Result fingerprint (for determinism validation).
    pub fingerprint: u64,
}

impl GameMetrics {
    /// Extract metrics from a finished match.
    pub fn from_result(scenario: &str, seed: u64, result: &MatchResult) -> Result<Self> {
        Ok(Self {
            game_id: format!("game_{seed}"),
            scenario: scenario.to_string(),
            seed,
            home_team: result.home_team.clone(),
            away_team: result.away_team.clone(),
            home_score: result.home_score,
            away_score: result.away_score,
            innings: result.total_innings(),
            home_runs: result
                .batting_lines
                .iter()
                .map(|l| l.performance.home_runs)
                .sum(),
            winner: result.winner_name().map(str::to_string),
            home_win: result.winner() == Some(TeamSide::Home),
            mvp: result.mvp.clone(),
            fingerprint: result.fingerprint()?,
        })
    }

    /// Runs scored by both teams.
    #[must_use]
    pub const fn total_runs(&self) -> u32 {
        self.home_score + self.away_score
    }

    /// Whether the match went past nine innings.
    #[must_use]
    pub const fn extra_innings(&self) -> bool {
        self.innings > koshien_core::config::REGULATION_INNINGS
    }
}

/// Summary statistics for a batch of matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Total games played.
    pub total_games: u32,
    /// Games won by each team.
    pub wins_by_team: BTreeMap<String, u32>,
    /// Win rates by team.
    pub win_rates: BTreeMap<String, f64>,
    /// Share of games the home team won.
    pub home_win_rate: f64,
    /// Average combined runs per game.
    pub avg_runs_per_game: f64,
    /// Average innings per game.
    pub avg_innings: f64,
    /// Longest game in innings.
    pub max_innings: u32,
    /// Share of games that went to extra innings.
    pub extra_inning_rate: f64,
    /// Average home runs per game.
    pub avg_home_runs: f64,
    /// Most frequent MVPs, by award count.
    pub mvp_awards: BTreeMap<String, u32>,
}

impl BatchSummary {
    /// Calculate summary from a list of game metrics.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn from_games(games: &[GameMetrics]) -> Self {
        if games.is_empty() {
            return Self::default();
        }

        let mut summary = Self {
            total_games: games.len() as u32,
            ..Default::default()
        };

        let mut runs = 0u64;
        let mut innings = 0u64;
        let mut home_runs = 0u64;
        let mut home_wins = 0u32;
        let mut extra = 0u32;

        for game in games {
            runs += u64::from(game.total_runs());
            innings += u64::from(game.innings);
            home_runs += u64::from(game.home_runs);
            summary.max_innings = summary.max_innings.max(game.innings);

            if game.home_win {
                home_wins += 1;
            }
            if game.extra_innings() {
                extra += 1;
            }
            if let Some(winner) = &game.winner {
                *summary.wins_by_team.entry(winner.clone()).or_default() += 1;
            }
            if let Some(mvp) = &game.mvp {
                *summary.mvp_awards.entry(mvp.clone()).or_default() += 1;
            }
        }

        let total = games.len() as f64;
        summary.win_rates = summary
            .wins_by_team
            .iter()
            .map(|(team, wins)| (team.clone(), f64::from(*wins) / total))
            .collect();
        summary.home_win_rate = f64::from(home_wins) / total;
        summary.avg_runs_per_game = runs as f64 / total;
        summary.avg_innings = innings as f64 / total;
        summary.extra_inning_rate = f64::from(extra) / total;
        summary.avg_home_runs = home_runs as f64 / total;

        summary
    }
}
