//! Headless Koshien match runner.
//!
//! Plays matches without the game UI. Results go to stdout as JSON, logs go
//! to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Play one match
//! cargo run -p koshien_headless -- run --scenario scenarios/prefectural_final.ron --seed 3
//!
//! # Run batch balance test
//! cargo run -p koshien_headless -- batch --count 1000 --output results/
//!
//! # Verify determinism
//! cargo run -p koshien_headless -- verify --seed 12345 --runs 5
//!
//! # Record a match and check it later
//! cargo run -p koshien_headless -- record --seed 9 --output final.rec
//! cargo run -p koshien_headless -- replay --file final.rec --verify
//!
//! # Generate a team file
//! cargo run -p koshien_headless -- generate --name "Seiryo High" --seed 4
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use koshien_core::game::simulate_seeded;
use koshien_core::replay::MatchRecord;
use koshien_core::result::MatchResult;
use koshien_headless::{
    batch::{run_batch, verify_determinism, BatchConfig},
    roster_generator::generate_team,
    scenario::Scenario,
};

#[derive(Parser)]
#[command(name = "koshien_headless")]
#[command(about = "Headless Koshien match runner for balance testing and CI")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single match and print the result
    Run {
        /// Scenario file to load (default: built-in exhibition)
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Dice seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Pretty-print the JSON result
        #[arg(long)]
        pretty: bool,
    },

    /// Run batch of matches for balance testing
    Batch {
        /// Scenario file to load (default: built-in exhibition)
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Number of matches to run
        #[arg(short, long, default_value = "100")]
        count: u32,

        /// Maximum parallel matches (0 = auto)
        #[arg(short, long, default_value = "0")]
        parallel: u32,

        /// Output directory for results
        #[arg(short, long, default_value = "results")]
        output: PathBuf,

        /// Starting random seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Verify determinism by running same seed multiple times
    Verify {
        /// Scenario file to load (default: built-in exhibition)
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Seed to verify
        #[arg(long, default_value = "12345")]
        seed: u64,

        /// Number of verification runs
        #[arg(short, long, default_value = "5")]
        runs: u32,
    },

    /// Play a match and save a record of it
    Record {
        /// Scenario file to load (default: built-in exhibition)
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Dice seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Record file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Replay a recorded match
    Replay {
        /// Record file path
        #[arg(short, long)]
        file: PathBuf,

        /// Verify the replay produces the recorded fingerprint
        #[arg(long)]
        verify: bool,
    },

    /// Generate a team and print it as RON
    Generate {
        /// Team name
        #[arg(short, long)]
        name: String,

        /// Generator seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logs to stderr (stdout is for results)
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    match cli.command {
        Some(Commands::Run {
            scenario,
            seed,
            pretty,
        }) => cmd_run(scenario, seed, pretty),
        Some(Commands::Batch {
            scenario,
            count,
            parallel,
            output,
            seed,
        }) => cmd_batch(scenario, count, parallel, output, seed),
        Some(Commands::Verify {
            scenario,
            seed,
            runs,
        }) => cmd_verify(scenario, seed, runs),
        Some(Commands::Record {
            scenario,
            seed,
            output,
        }) => cmd_record(scenario, seed, output),
        Some(Commands::Replay { file, verify }) => cmd_replay(file, verify),
        Some(Commands::Generate { name, seed }) => cmd_generate(&name, seed),
        None => cmd_run(None, 0, true),
    }
}

fn load_scenario(path: Option<PathBuf>) -> Scenario {
    match Scenario::load_or_exhibition(path.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to load scenario: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_result(result: &MatchResult, pretty: bool) {
    let json = if pretty {
        serde_json::to_string_pretty(result)
    } else {
        serde_json::to_string(result)
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to encode result: {}", e);
            std::process::exit(1);
        }
    }
}

/// Play a single match
fn cmd_run(scenario: Option<PathBuf>, seed: u64, pretty: bool) {
    let scenario = load_scenario(scenario);
    tracing::info!(scenario = %scenario.name, seed, "Playing match");

    match simulate_seeded(scenario.home, scenario.away, scenario.config, seed) {
        Ok(result) => {
            tracing::info!(
                home = %result.home_team,
                away = %result.away_team,
                home_score = result.home_score,
                away_score = result.away_score,
                innings = result.total_innings(),
                "Match finished"
            );
            print_result(&result, pretty);
        }
        Err(e) => {
            eprintln!("Match failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Run batch of matches for balance testing
fn cmd_batch(scenario: Option<PathBuf>, count: u32, parallel: u32, output: PathBuf, seed: u64) {
    let scenario = load_scenario(scenario);

    tracing::info!(
        scenario = %scenario.name,
        count,
        parallel,
        seed,
        output = %output.display(),
        "Batch configuration"
    );

    if let Err(e) = std::fs::create_dir_all(&output) {
        tracing::error!(error = %e, path = %output.display(), "Failed to create output directory");
        eprintln!(
            "FATAL: Cannot create output directory '{}': {}",
            output.display(),
            e
        );
        std::process::exit(1);
    }

    let config = BatchConfig::new(&scenario.name, count)
        .with_output(output.clone())
        .with_seed(seed)
        .with_parallelism(parallel);

    let results = run_batch(&scenario, config);

    let results_path = output.join("batch_results.json");
    if let Err(e) = results.save(&results_path) {
        tracing::error!(error = %e, path = %results_path.display(), "Failed to save results");
        eprintln!("FATAL: Failed to save results: {}", e);
        std::process::exit(1);
    }

    let summary = &results.summary;
    eprintln!("\n{}", "=".repeat(50));
    eprintln!("BATCH COMPLETE");
    eprintln!("{}", "=".repeat(50));
    eprintln!("Games played: {}", results.games.len());
    if !results.errors.is_empty() {
        eprintln!("Games FAILED: {}", results.errors.len());
    }
    eprintln!("Duration: {:.1}s", results.duration_seconds);
    eprintln!("\nWin Rates:");
    for (team, rate) in &summary.win_rates {
        eprintln!("  {}: {:.1}%", team, rate * 100.0);
    }
    eprintln!("  Home: {:.1}%", summary.home_win_rate * 100.0);
    eprintln!("\nPer game:");
    eprintln!("  Runs: {:.2}", summary.avg_runs_per_game);
    eprintln!("  Innings: {:.2} (max {})", summary.avg_innings, summary.max_innings);
    eprintln!("  Home runs: {:.2}", summary.avg_home_runs);
    eprintln!("  Extra innings: {:.1}%", summary.extra_inning_rate * 100.0);

    if !results.errors.is_empty() {
        eprintln!("\nGAME FAILURES:");
        for error in results.errors.iter().take(10) {
            eprintln!(
                "  Game {} (seed {}): {}",
                error.game_index, error.seed, error.message
            );
        }
        if results.errors.len() > 10 {
            eprintln!("  ... and {} more failures", results.errors.len() - 10);
        }
    }

    eprintln!("\nResults saved to: {}", results_path.display());
}

/// Verify determinism
fn cmd_verify(scenario: Option<PathBuf>, seed: u64, runs: u32) {
    let scenario = load_scenario(scenario);
    tracing::info!(
        "Verifying determinism: {} with seed {} ({} runs)",
        scenario.name,
        seed,
        runs
    );

    match verify_determinism(&scenario, seed, runs) {
        Ok(true) => eprintln!("PASS: All {} runs produced identical results", runs),
        Ok(false) => {
            eprintln!("FAIL: Non-determinism detected!");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("FAIL: Match failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Play a match and save its record
fn cmd_record(scenario: Option<PathBuf>, seed: u64, output: PathBuf) {
    let scenario = load_scenario(scenario);

    let (record, result) =
        match MatchRecord::record(scenario.home, scenario.away, scenario.config, seed) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Match failed: {}", e);
                std::process::exit(1);
            }
        };

    if let Err(e) = record.save(&output) {
        eprintln!("Failed to save record: {}", e);
        std::process::exit(1);
    }

    eprintln!("Recorded: {}", output.display());
    eprintln!(
        "  {} {} - {} {}",
        result.away_team, result.away_score, result.home_score, result.home_team
    );
    eprintln!("  Fingerprint: {:016x}", record.fingerprint);
}

/// Replay a recorded match
fn cmd_replay(file: PathBuf, verify: bool) {
    tracing::info!("Loading record: {}", file.display());

    let record = match MatchRecord::load(&file) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to load record: {}", e);
            std::process::exit(1);
        }
    };

    eprintln!("Loaded record:");
    eprintln!("  {} at {}", record.away.name, record.home.name);
    eprintln!("  Seed: {}", record.seed);
    eprintln!("  Final: {} - {}", record.final_score.1, record.final_score.0);

    let result = match record.replay() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("FAIL: Error during replay: {}", e);
            std::process::exit(1);
        }
    };

    if verify {
        let actual = match result.fingerprint() {
            Ok(f) => f,
            Err(e) => {
                eprintln!("FAIL: {}", e);
                std::process::exit(1);
            }
        };
        if actual == record.fingerprint {
            eprintln!("PASS: Replay verification successful");
            eprintln!("  Fingerprint: {:016x}", actual);
        } else {
            eprintln!("FAIL: Replay produced a different result!");
            eprintln!("  Expected: {:016x}", record.fingerprint);
            eprintln!("  Actual:   {:016x}", actual);
            std::process::exit(1);
        }
    } else {
        print_result(&result, true);
    }
}

/// Print a generated team as RON
fn cmd_generate(name: &str, seed: u64) {
    let team = generate_team(name, seed);
    match ron::ser::to_string_pretty(&team, ron::ser::PrettyConfig::default()) {
        Ok(ron) => println!("{}", ron),
        Err(e) => {
            eprintln!("Failed to encode team: {}", e);
            std::process::exit(1);
        }
    }
}
