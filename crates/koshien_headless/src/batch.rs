//! Batch match runner for balance testing.
//!
//! Runs many seeded matches in parallel using rayon to collect balance
//! metrics across a scenario efficiently.

use crate::metrics::{BatchSummary, GameMetrics};
use crate::scenario::Scenario;
use koshien_core::dice::RngDice;
use koshien_core::game::{simulate_seeded, MatchSimulator};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Configuration for a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Scenario label recorded in every game's metrics
    pub scenario: String,
    /// Number of games to run
    pub game_count: u32,
    /// Maximum parallel games (0 = use rayon default)
    pub parallel_games: u32,
    /// Output directory for results
    pub output_dir: PathBuf,
    /// Starting seed for deterministic runs
    pub seed_start: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            scenario: "exhibition".to_string(),
            game_count: 100,
            parallel_games: 0,
            output_dir: PathBuf::from("results"),
            seed_start: 0,
        }
    }
}

impl BatchConfig {
    /// Create config for a specific scenario
    pub fn new(scenario: &str, game_count: u32) -> Self {
        Self {
            scenario: scenario.to_string(),
            game_count,
            ..Default::default()
        }
    }

    /// Set output directory
    pub fn with_output(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    /// Set seed start
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed_start = seed;
        self
    }

    /// Set the worker count
    pub fn with_parallelism(mut self, games: u32) -> Self {
        self.parallel_games = games;
        self
    }
}

/// Results from a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResults {
    /// Configuration used
    pub config: BatchConfig,
    /// Individual game metrics, in seed order
    pub games: Vec<GameMetrics>,
    /// Aggregate summary
    pub summary: BatchSummary,
    /// Total runtime
    pub duration_seconds: f64,
    /// Errors encountered
    pub errors: Vec<BatchError>,
}

impl BatchResults {
    /// Save results to JSON file
    pub fn save(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Load results from JSON file
    pub fn load(path: &std::path::Path) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(std::io::Error::other)
    }
}

/// Error during batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchError {
    /// Game index
    pub game_index: u32,
    /// Seed used
    pub seed: u64,
    /// Error message
    pub message: String,
}

/// Progress tracking for batch runs
#[derive(Debug)]
pub struct BatchProgress {
    /// Total games
    pub total: u32,
    completed: AtomicU32,
    home_wins: AtomicU32,
    start_time: Instant,
}

impl BatchProgress {
    /// Create new progress tracker
    pub fn new(total: u32) -> Self {
        Self {
            total,
            completed: AtomicU32::new(0),
            home_wins: AtomicU32::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a completed game
    pub fn record_completion(&self, home_win: bool) {
        self.completed.fetch_add(1, Ordering::Relaxed);
        if home_win {
            self.home_wins.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get current completion count
    pub fn current(&self) -> u32 {
        self.completed.load(Ordering::Relaxed)
    }

    /// Get completion percentage
    pub fn percentage(&self) -> f64 {
        f64::from(self.current()) / f64::from(self.total.max(1)) * 100.0
    }

    /// Home win rate over the games finished so far
    pub fn home_win_rate(&self) -> f64 {
        let completed = self.current();
        if completed == 0 {
            return 0.0;
        }
        f64::from(self.home_wins.load(Ordering::Relaxed)) / f64::from(completed)
    }

    /// Log progress
    pub fn report(&self) {
        info!(
            completed = self.current(),
            total = self.total,
            percent = format!("{:.1}", self.percentage()),
            home_win_rate = format!("{:.3}", self.home_win_rate()),
            elapsed_secs = self.start_time.elapsed().as_secs(),
            "Batch progress"
        );
    }
}

fn run_single_game(scenario: &Scenario, label: &str, seed: u64) -> Result<GameMetrics, String> {
    let result = simulate_seeded(
        scenario.home.clone(),
        scenario.away.clone(),
        scenario.config,
        seed,
    )
    .map_err(|e| e.to_string())?;
    GameMetrics::from_result(label, seed, &result).map_err(|e| e.to_string())
}

fn play_all(scenario: &Scenario, config: &BatchConfig) -> Vec<Result<GameMetrics, BatchError>> {
    let progress = BatchProgress::new(config.game_count);

    (0..config.game_count)
        .into_par_iter()
        .map(|i| {
            let seed = config.seed_start.wrapping_add(u64::from(i));
            match run_single_game(scenario, &config.scenario, seed) {
                Ok(metrics) => {
                    progress.record_completion(metrics.home_win);

                    let completed = progress.current();
                    if completed % 100 == 0 {
                        progress.report();
                    } else if completed % 10 == 0 {
                        debug!("Progress: {}/{}", completed, config.game_count);
                    }

                    Ok(metrics)
                }
                Err(e) => {
                    warn!("Game {} failed: {}", i, e);
                    Err(BatchError {
                        game_index: i,
                        seed,
                        message: e,
                    })
                }
            }
        })
        .collect()
}

/// Run a batch of seeded matches for one scenario
pub fn run_batch(scenario: &Scenario, config: BatchConfig) -> BatchResults {
    let start = Instant::now();

    info!(
        "Starting batch run: {} games of '{}'",
        config.game_count, config.scenario
    );

    let results = if config.parallel_games > 0 {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(config.parallel_games as usize)
            .build()
        {
            Ok(pool) => pool.install(|| play_all(scenario, &config)),
            Err(e) => {
                warn!("Failed to build thread pool: {}, using global pool", e);
                play_all(scenario, &config)
            }
        }
    } else {
        play_all(scenario, &config)
    };

    let (games, errors): (Vec<_>, Vec<_>) = results.into_iter().partition(Result::is_ok);
    let games: Vec<GameMetrics> = games.into_iter().filter_map(Result::ok).collect();
    let errors: Vec<BatchError> = errors.into_iter().filter_map(Result::err).collect();

    let summary = BatchSummary::from_games(&games);
    let duration_seconds = start.elapsed().as_secs_f64();

    info!(
        "Batch complete: {} games in {:.1}s ({:.1} games/sec)",
        games.len(),
        duration_seconds,
        games.len() as f64 / duration_seconds.max(0.001)
    );

    BatchResults {
        config,
        games,
        summary,
        duration_seconds,
        errors,
    }
}

/// Verify determinism by running the same seed several times.
///
/// Every run must produce the same result fingerprint.
pub fn verify_determinism(
    scenario: &Scenario,
    seed: u64,
    runs: u32,
) -> koshien_core::error::Result<bool> {
    let simulator = MatchSimulator::new(
        scenario.home.clone(),
        scenario.away.clone(),
        scenario.config,
    )?;

    let mut fingerprints = Vec::with_capacity(runs as usize);
    for _ in 0..runs {
        let result = simulator.simulate(&mut RngDice::seeded(seed))?;
        fingerprints.push(result.fingerprint()?);
    }
    debug!(?fingerprints, "Determinism runs");

    Ok(fingerprints.windows(2).all(|w| w[0] == w[1]))
}
