//! Headless career runner.
//!
//! This binary runs careers without a user interface, controlled via JSON on
//! stdin/stdout or driven by a built-in coaching strategy.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode - read commands from stdin
//! cargo run -p gridiron_headless
//!
//! # Interactive mode with a setup file
//! cargo run -p gridiron_headless -- run --setup setups/dillon.ron
//!
//! # Batch balance run
//! cargo run -p gridiron_headless -- batch --count 500 --years 2 --output results/
//!
//! # Check a setup file
//! cargo run -p gridiron_headless -- validate --file setups/dillon.ron
//! ```
//!
//! # Protocol
//!
//! Input (stdin): JSON commands, one per line
//! Output (stdout): JSON responses, one per line
//! Logs (stderr): Debug information
//!
//! See the protocol module for command/response format.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gridiron_core::data::CareerSetup;
use gridiron_core::replay::{Replay, ReplayPlayer};
use gridiron_headless::{
    batch::{run_batch, verify_determinism, BatchConfig},
    runner::{HeadlessConfig, HeadlessRunner},
    setup::{load_setup, setup_or_default},
    strategies::Strategy,
};

#[derive(Parser)]
#[command(name = "gridiron_headless")]
#[command(about = "Headless high-school football career runner for scripting and CI")]
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
    /// Coach a single career over the JSON-lines protocol
    Run {
        /// Career setup file (RON)
        #[arg(short, long)]
        setup: Option<PathBuf>,

        /// Override the setup's seed
        #[arg(long)]
        seed: Option<u64>,

        /// Follow every career command with a state summary
        #[arg(long)]
        auto_state: bool,
    },

    /// Play a batch of strategy-driven careers for balance testing
    Batch {
        /// Career setup file (RON)
        #[arg(short, long)]
        setup: Option<PathBuf>,

        /// Number of careers to run
        #[arg(short, long, default_value = "100")]
        count: u32,

        /// Seasons per career
        #[arg(short, long, default_value = "1")]
        years: usize,

        /// Maximum parallel careers (0 = auto)
        #[arg(short, long, default_value = "0")]
        parallel: u32,

        /// Output directory for results
        #[arg(short, long, default_value = "results")]
        output: PathBuf,

        /// Starting random seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Strategy preset name or RON file
        #[arg(long, default_value = "balanced")]
        strategy: String,

        /// Write a replay file per career
        #[arg(long)]
        save_replays: bool,
    },

    /// Verify determinism by playing the same seed multiple times
    Verify {
        /// Career setup file (RON)
        #[arg(short, long)]
        setup: Option<PathBuf>,

        /// Seed to verify
        #[arg(long, default_value = "12345")]
        seed: u64,

        /// Number of verification runs
        #[arg(short, long, default_value = "5")]
        runs: u32,

        /// Seasons per run
        #[arg(short, long, default_value = "1")]
        years: usize,

        /// Strategy preset name or RON file
        #[arg(long, default_value = "gunslinger")]
        strategy: String,
    },

    /// Verify a recorded replay
    Replay {
        /// Replay file path
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Check a career setup file
    Validate {
        /// Setup file path
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout is for protocol)
    let fallback = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(filter)
        .init();

    match cli.command {
        Some(Commands::Run {
            setup,
            seed,
            auto_state,
        }) => {
            cmd_run(setup.as_deref(), seed, auto_state);
        }
        Some(Commands::Batch {
            setup,
            count,
            years,
            parallel,
            output,
            seed,
            strategy,
            save_replays,
        }) => {
            let config = BatchConfig {
                setup: setup_or_exit(setup.as_deref(), None),
                career_count: count,
                years,
                parallel_careers: parallel,
                output_dir: output,
                seed_start: seed,
                strategy: strategy_or_exit(&strategy),
                save_replays,
            };
            cmd_batch(config);
        }
        Some(Commands::Verify {
            setup,
            seed,
            runs,
            years,
            strategy,
        }) => {
            let setup = setup_or_exit(setup.as_deref(), Some(seed));
            cmd_verify(&setup, &strategy_or_exit(&strategy), runs, years);
        }
        Some(Commands::Replay { file }) => {
            cmd_replay(&file);
        }
        Some(Commands::Validate { file }) => {
            cmd_validate(&file);
        }
        None => {
            // Default: interactive mode
            cmd_run(None, None, false);
        }
    }
}

fn setup_or_exit(path: Option<&Path>, seed: Option<u64>) -> CareerSetup {
    match setup_or_default(path, seed) {
        Ok(setup) => setup,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load setup");
            std::process::exit(1);
        }
    }
}

fn strategy_or_exit(name: &str) -> Strategy {
    match Strategy::resolve(name) {
        Ok(strategy) => strategy,
        Err(e) => {
            tracing::error!(
                error = %e,
                presets = ?Strategy::preset_names(),
                "Unknown strategy"
            );
            std::process::exit(1);
        }
    }
}

/// Coach a single career over stdin/stdout
fn cmd_run(setup: Option<&Path>, seed: Option<u64>, auto_state: bool) {
    let setup = setup_or_exit(setup, seed);
    tracing::info!(
        team = %setup.team_name,
        coach = %setup.coach.name,
        seed = setup.seed,
        "Starting interactive session"
    );

    let config = HeadlessConfig {
        auto_state_output: auto_state,
    };
    let mut runner = match HeadlessRunner::new(&setup, config) {
        Ok(runner) => runner,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start career");
            std::process::exit(1);
        }
    };
    if let Err(e) = runner.run_stdio() {
        tracing::error!(error = %e, "Session ended with an IO error");
        std::process::exit(1);
    }
}

/// Play a batch of careers for balance testing
fn cmd_batch(config: BatchConfig) {
    let num_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);

    tracing::info!(
        count = config.career_count,
        years = config.years,
        parallel = config.parallel_careers,
        seed = config.seed_start,
        strategy = %config.strategy.name,
        output = %config.output_dir.display(),
        cpus_available = num_cpus,
        "Batch configuration"
    );

    // Ensure output directory exists
    if let Err(e) = std::fs::create_dir_all(&config.output_dir) {
        tracing::error!(
            error = %e,
            path = %config.output_dir.display(),
            "Failed to create output directory"
        );
        std::process::exit(1);
    }

    let results_path = config.output_dir.join("batch_results.json");
    let results = run_batch(config);

    if let Err(e) = results.save(&results_path) {
        tracing::error!(error = %e, path = %results_path.display(), "Failed to save results");
        std::process::exit(1);
    }

    let summary = &results.summary;
    eprintln!("\n{}", "=".repeat(50));
    eprintln!("BATCH COMPLETE");
    eprintln!("{}", "=".repeat(50));
    eprintln!("Careers played: {}", results.careers.len());
    if !results.errors.is_empty() {
        eprintln!("Careers FAILED: {}", results.errors.len());
    }
    eprintln!("Seasons: {}", summary.total_seasons);
    eprintln!("Duration: {:.1}s", results.duration_seconds);
    eprintln!("\nWin rate:      {:>5.1}%", summary.win_rate * 100.0);
    eprintln!("Playoff rate:  {:>5.1}%", summary.playoff_rate * 100.0);
    eprintln!("Title rate:    {:>5.1}%", summary.title_rate * 100.0);
    eprintln!(
        "Team rating:   {:.1} avg ({}-{})",
        summary.avg_team_rating, summary.min_team_rating, summary.max_team_rating
    );
    eprintln!("Recruits/career: {:.1}", summary.avg_recruits_committed);

    if !results.errors.is_empty() {
        eprintln!("\nCAREER FAILURES:");
        for error in results.errors.iter().take(10) {
            eprintln!(
                "  Career {} (seed {}): {}",
                error.career_index, error.seed, error.message
            );
        }
        if results.errors.len() > 10 {
            eprintln!("  ... and {} more failures", results.errors.len() - 10);
        }
    }

    eprintln!("\nResults saved to: {}", results_path.display());
}

/// Verify determinism
fn cmd_verify(setup: &CareerSetup, strategy: &Strategy, runs: u32, years: usize) {
    tracing::info!(
        seed = setup.seed,
        runs,
        years,
        strategy = %strategy.name,
        "Verifying determinism"
    );

    if verify_determinism(setup, strategy, runs, years) {
        eprintln!("PASS: All {runs} runs produced identical results");
    } else {
        eprintln!("FAIL: Non-determinism detected!");
        std::process::exit(1);
    }
}

/// Verify a recorded replay
fn cmd_replay(file: &Path) {
    tracing::info!("Verifying replay: {}", file.display());

    let replay = match Replay::load(file) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to load replay: {e}");
            std::process::exit(1);
        }
    };

    eprintln!("Loaded replay:");
    eprintln!("  Seed: {}", replay.seed);
    eprintln!("  Commands: {}", replay.command_count());
    eprintln!("  Final step: {}", replay.final_step);

    let mut player = match ReplayPlayer::new(replay) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to create replay player: {e}");
            std::process::exit(1);
        }
    };

    match player.verify() {
        Ok(true) => {
            let state = player.career().state();
            eprintln!("PASS: Replay verification successful");
            eprintln!("  Hash: {:016x}", player.replay().final_hash);
            eprintln!(
                "  Ended: {} week {} of {} ({} seasons logged)",
                state.phase,
                state.week,
                state.year,
                state.history.len()
            );
        }
        Ok(false) => {
            eprintln!("FAIL: Replay produced different hash!");
            eprintln!("  Expected: {:016x}", player.replay().final_hash);
            eprintln!("  Actual:   {:016x}", player.career().state_hash());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("FAIL: Error during verification: {e}");
            std::process::exit(1);
        }
    }
}

/// Check a setup file
fn cmd_validate(file: &Path) {
    match load_setup(file) {
        Ok(setup) => {
            eprintln!("OK: {}", file.display());
            eprintln!("  Coach: {} ({:?})", setup.coach.name, setup.coach.archetype);
            eprintln!("  Team: {}", setup.team_name);
            eprintln!("  Seed: {}", setup.seed);
            eprintln!("  Roster: {} players", setup.roster_size());
            eprintln!("  League: {} schools", setup.league_size);
        }
        Err(e) => {
            eprintln!("INVALID: {}: {e}", file.display());
            std::process::exit(1);
        }
    }
}
