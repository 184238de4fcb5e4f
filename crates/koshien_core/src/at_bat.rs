//! Plate appearance resolution.
//!
//! One roll against nested thresholds decides the outcome:
//!
//! | roll                    | outcome  |
//! |-------------------------|----------|
//! | `< hit_chance * 0.1`    | home run |
//! | `< hit_chance * 0.3`    | hit      |
//! | `< hit_chance * 0.4`    | walk     |
//! | otherwise               | out      |
//!
//! The thresholds are checked in order against the same roll; they are
//! not renormalized. Hits and outs take a second roll to pick the hit type
//! (double with probability `power / 100`) or the kind of out.

use serde::{Deserialize, Serialize};

use crate::bases::BaseOutState;
use crate::dice::{checked_roll, Dice};
use crate::error::Result;
use crate::roster::{Abilities, PitchingAbilities};

const HOME_RUN_FACTOR: f64 = 0.1;
const HIT_FACTOR: f64 = 0.3;
const WALK_FACTOR: f64 = 0.4;

/// Kind of base hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitKind {
    /// Batter reaches first.
    Single,
    /// Batter reaches second.
    Double,
}

/// Kind of out. Only flavours the event text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutKind {
    /// Struck out.
    Strikeout,
    /// Grounded out.
    Groundout,
    /// Flied out.
    Flyout,
}

impl OutKind {
    const ALL: [OutKind; 3] = [OutKind::Strikeout, OutKind::Groundout, OutKind::Flyout];

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn from_roll(roll: f64) -> Self {
        let index = (roll * Self::ALL.len() as f64) as usize;
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }
}

/// Result of one plate appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AtBatOutcome {
    /// Ball left the park.
    HomeRun {
        /// Runs scored, batter included.
        runs: u32,
    },
    /// Base hit.
    Hit {
        /// Single or double.
        kind: HitKind,
        /// Runs driven in.
        runs: u32,
    },
    /// Base on balls.
    Walk {
        /// 1 when the bases were loaded.
        runs: u32,
    },
    /// Batter retired.
    Out {
        /// How the batter was retired.
        kind: OutKind,
    },
}

impl AtBatOutcome {
    /// Runs that scored on the play.
    #[must_use]
    pub const fn runs(&self) -> u32 {
        match *self {
            Self::HomeRun { runs } | Self::Hit { runs, .. } | Self::Walk { runs } => runs,
            Self::Out { .. } => 0,
        }
    }

    /// Event text for the inning log.
    #[must_use]
    pub fn describe(&self, batter: &str) -> String {
        match *self {
            Self::HomeRun { runs: 1 } => format!("{batter} hits a solo home run!"),
            Self::HomeRun { runs: 4 } => format!("{batter} hits a grand slam! 4 runs score!"),
            Self::HomeRun { runs } => format!("{batter} hits a home run! {runs} runs score!"),
            Self::Hit { kind, runs } => {
                let hit = match kind {
                    HitKind::Single => "a single",
                    HitKind::Double => "a double",
                };
                match runs {
                    0 => format!("{batter} hits {hit}."),
                    1 => format!("{batter} hits {hit}! 1 run scores."),
                    n => format!("{batter} hits {hit}! {n} runs score."),
                }
            }
            Self::Walk { runs: 0 } => format!("{batter} draws a walk."),
            Self::Walk { .. } => format!("{batter} draws a bases-loaded walk, forcing in a run."),
            Self::Out {
                kind: OutKind::Strikeout,
            } => format!("{batter} strikes out."),
            Self::Out {
                kind: OutKind::Groundout,
            } => format!("{batter} grounds out."),
            Self::Out {
                kind: OutKind::Flyout,
            } => format!("{batter} flies out."),
        }
    }
}

/// Probability scale for a batter against a pitcher.
///
/// `(batting*0.4 + power*0.3 + (100-pitching)*0.2 + (100-control)*0.1) / 100`
#[must_use]
pub fn hit_chance(batter: &Abilities, pitcher: &PitchingAbilities) -> f64 {
    (f64::from(batter.batting) * 0.4
        + f64::from(batter.power) * 0.3
        + (100.0 - f64::from(pitcher.pitching)) * 0.2
        + (100.0 - f64::from(pitcher.control)) * 0.1)
        / 100.0
}

/// Resolve one plate appearance and apply it to the base-out state.
///
/// Runs are returned in the outcome; crediting them to a team is the
/// caller's job.
pub fn resolve_at_bat<D: Dice + ?Sized>(
    batter: &Abilities,
    pitcher: &PitchingAbilities,
    state: &mut BaseOutState,
    dice: &mut D,
) -> Result<AtBatOutcome> {
    let chance = hit_chance(batter, pitcher);
    let roll = checked_roll(dice)?;

    let outcome = if roll < chance * HOME_RUN_FACTOR {
        AtBatOutcome::HomeRun {
            runs: state.bases.home_run(),
        }
    } else if roll < chance * HIT_FACTOR {
        if checked_roll(dice)? < f64::from(batter.power) / 100.0 {
            AtBatOutcome::Hit {
                kind: HitKind::Double,
                runs: state.bases.double(),
            }
        } else {
            AtBatOutcome::Hit {
                kind: HitKind::Single,
                runs: state.bases.single(),
            }
        }
    } else if roll < chance * WALK_FACTOR {
        AtBatOutcome::Walk {
            runs: state.bases.walk(),
        }
    } else {
        state.record_out();
        AtBatOutcome::Out {
            kind: OutKind::from_roll(checked_roll(dice)?),
        }
    };

    tracing::trace!(roll, chance, ?outcome, "Plate appearance resolved");
    Ok(outcome)
}
