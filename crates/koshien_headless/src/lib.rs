//! Headless match runner for batch simulation and determinism checks.
//!
//! This crate drives `koshien_core` without any game UI:
//!
//! - **Single matches**: play a scenario and print the result as JSON
//! - **Batch runs**: thousands of seeded matches in parallel for balance work
//! - **Determinism checks**: replay a seed and compare fingerprints
//! - **Match records**: save a seeded match and verify it later
//!
//! # Output
//!
//! - **stdout**: match results and team files (JSON / RON)
//! - **stderr**: logs (human-readable)
//!
//! # Example
//!
//! ```bash
//! # Play the built-in exhibition
//! cargo run -p koshien_headless -- run --seed 7
//!
//! # Play a scenario file
//! cargo run -p koshien_headless -- run --scenario scenarios/prefectural_final.ron
//!
//! # Balance batch
//! cargo run -p koshien_headless -- batch --count 1000 --output results/
//! ```

pub mod batch;
pub mod metrics;
pub mod roster_generator;
pub mod scenario;

pub use batch::{run_batch, BatchConfig, BatchResults};
pub use metrics::{BatchSummary, GameMetrics};
pub use roster_generator::generate_team;
pub use scenario::{Scenario, ScenarioError};
