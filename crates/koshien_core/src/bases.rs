//! Base-out state for the current half-inning.
//!
//! [`BaseState`] holds one flag per base and implements the runner
//! advancement rules for each batted-ball outcome. Each advancement method
//! returns the number of runs that crossed the plate. [`BaseOutState`]
//! pairs the bases with the out count.

use serde::{Deserialize, Serialize};

use crate::config::OUTS_PER_HALF_INNING;

/// Occupancy of first, second and third base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BaseState {
    /// Runner on first.
    pub first: bool,
    /// Runner on second.
    pub second: bool,
    /// Runner on third.
    pub third: bool,
}

impl BaseState {
    /// No runners on.
    pub const EMPTY: Self = Self {
        first: false,
        second: false,
        third: false,
    };

    /// Runners on every base.
    pub const LOADED: Self = Self {
        first: true,
        second: true,
        third: true,
    };

    /// Build from a `[first, second, third]` array.
    #[must_use]
    pub const fn from_array(bases: [bool; 3]) -> Self {
        Self {
            first: bases[0],
            second: bases[1],
            third: bases[2],
        }
    }

    /// Occupancy as `[first, second, third]`.
    #[must_use]
    pub const fn as_array(self) -> [bool; 3] {
        [self.first, self.second, self.third]
    }

    /// Number of runners on base.
    #[must_use]
    pub fn runners(self) -> u32 {
        self.as_array().iter().map(|&on| u32::from(on)).sum()
    }

    /// Whether every base is occupied.
    #[must_use]
    pub const fn is_loaded(self) -> bool {
        self.first && self.second && self.third
    }

    /// Batter and every runner score.
    pub fn home_run(&mut self) -> u32 {
        let runs = 1 + self.runners();
        *self = Self::EMPTY;
        runs
    }

    /// Runners on second and third score, first goes to third, batter to second.
    pub fn double(&mut self) -> u32 {
        let runs = u32::from(self.third) + u32::from(self.second);
        *self = Self {
            first: false,
            second: true,
            third: self.first,
        };
        runs
    }

    /// Every runner moves up one base, batter to first.
    pub fn single(&mut self) -> u32 {
        let runs = u32::from(self.third);
        *self = Self {
            first: true,
            second: self.first,
            third: self.second,
        };
        runs
    }

    /// Batter to first, runners move only when forced.
    pub fn walk(&mut self) -> u32 {
        let runs = u32::from(self.is_loaded());
        if self.first {
            if self.second {
                self.third = true;
            }
            self.second = true;
        }
        self.first = true;
        runs
    }
}

/// Outs and runners within one half-inning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BaseOutState {
    outs: u8,
    /// Current runners.
    pub bases: BaseState,
}

impl BaseOutState {
    /// Fresh state for a new half-inning.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            outs: 0,
            bases: BaseState::EMPTY,
        }
    }

    /// Zero the outs and clear the bases.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Record one out.
    pub fn record_out(&mut self) {
        self.outs = (self.outs + 1).min(OUTS_PER_HALF_INNING);
    }

    /// Outs recorded so far.
    #[must_use]
    pub const fn outs(&self) -> u8 {
        self.outs
    }

    /// Whether the half-inning is over.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.outs >= OUTS_PER_HALF_INNING
    }
}
