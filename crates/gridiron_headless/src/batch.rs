//! Batch career runner for balance testing.
//!
//! Plays many strategy-driven careers in parallel using rayon and collects
//! their metrics. Each career is recorded, so any interesting run can be
//! written out as a replay and stepped through later.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use gridiron_core::data::CareerSetup;
use gridiron_core::replay::{Recorder, Replay};
use gridiron_core::session::{Career, CareerCommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::metrics::{BatchSummary, CareerMetrics};
use crate::strategies::Strategy;

/// Calendar weeks allowed per simulated year before a career is abandoned.
const MAX_WEEKS_PER_YEAR: usize = 64;

/// Offset between the career seed and the seed of the coach's own dice.
const STRATEGY_SEED_SALT: u64 = 0x5EED_C0AC;

/// Configuration for a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Career template; each run overrides the seed.
    pub setup: CareerSetup,
    /// Number of careers to run
    pub career_count: u32,
    /// Full seasons to play per career
    pub years: usize,
    /// Maximum parallel careers (0 = use rayon default)
    pub parallel_careers: u32,
    /// Output directory for results
    pub output_dir: PathBuf,
    /// Starting seed for deterministic runs
    pub seed_start: u64,
    /// Strategy driving every career
    pub strategy: Strategy,
    /// Write a replay file per career
    pub save_replays: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            setup: CareerSetup::default(),
            career_count: 100,
            years: 1,
            parallel_careers: 0,
            output_dir: PathBuf::from("results"),
            seed_start: 0,
            strategy: Strategy::default(),
            save_replays: false,
        }
    }
}

impl BatchConfig {
    /// Create config for a setup
    #[must_use]
    pub fn new(setup: CareerSetup, career_count: u32) -> Self {
        Self {
            setup,
            career_count,
            ..Default::default()
        }
    }

    /// Set output directory
    #[must_use]
    pub fn with_output(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    /// Set seed start
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed_start = seed;
        self
    }

    /// Set seasons per career
    #[must_use]
    pub fn with_years(mut self, years: usize) -> Self {
        self.years = years;
        self
    }

    /// Set strategy
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Results from a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResults {
    /// Configuration used
    pub config: BatchConfig,
    /// Individual career metrics
    pub careers: Vec<CareerMetrics>,
    /// Aggregate summary
    pub summary: BatchSummary,
    /// Total runtime
    pub duration_seconds: f64,
    /// Errors encountered
    pub errors: Vec<BatchError>,
}

impl BatchResults {
    /// Save results to JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Load results from JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(std::io::Error::other)
    }
}

/// Error during batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchError {
    /// Career index
    pub career_index: u32,
    /// Seed used
    pub seed: u64,
    /// Error message
    pub message: String,
}

/// Progress tracking for batch runs
#[derive(Debug)]
pub struct BatchProgress {
    /// Total careers
    pub total: u32,
    /// Completed careers
    pub completed: Arc<AtomicU32>,
    /// Titles won so far
    titles: Arc<AtomicU32>,
    /// Start time
    pub start_time: Instant,
}

impl BatchProgress {
    /// Create new progress tracker
    #[must_use]
    pub fn new(total: u32) -> Self {
        Self {
            total,
            completed: Arc::new(AtomicU32::new(0)),
            titles: Arc::new(AtomicU32::new(0)),
            start_time: Instant::now(),
        }
    }

    /// Record a completed career
    pub fn record_completion(&self, titles: u32) {
        self.completed.fetch_add(1, Ordering::Relaxed);
        self.titles.fetch_add(titles, Ordering::Relaxed);
    }

    /// Get current completion count
    #[must_use]
    pub fn current(&self) -> u32 {
        self.completed.load(Ordering::Relaxed)
    }

    /// Titles won by the careers completed so far
    #[must_use]
    pub fn titles(&self) -> u32 {
        self.titles.load(Ordering::Relaxed)
    }

    /// Get completion percentage
    #[must_use]
    pub fn percentage(&self) -> f64 {
        f64::from(self.current()) / f64::from(self.total.max(1)) * 100.0
    }

    /// Get estimated time remaining
    #[must_use]
    pub fn eta(&self) -> Duration {
        let completed = self.current();
        if completed == 0 {
            return Duration::from_secs(0);
        }

        let elapsed = self.start_time.elapsed();
        let per_career = elapsed.as_secs_f64() / f64::from(completed);
        let remaining = self.total.saturating_sub(completed);
        Duration::from_secs_f64(per_career * f64::from(remaining))
    }

    /// Display progress to stderr
    pub fn display(&self) {
        let eta = self.eta();
        eprintln!("╔════════════════════════════════════╗");
        eprintln!(
            "║ Batch Progress: {:>4}/{:<4} ({:>5.1}%) ║",
            self.current(),
            self.total,
            self.percentage()
        );
        eprintln!(
            "║ ETA: {:>28} ║",
            format!("{}m {}s", eta.as_secs() / 60, eta.as_secs() % 60)
        );
        eprintln!("║ Titles so far: {:>19} ║", self.titles());
        eprintln!("╚════════════════════════════════════╝");
    }
}

/// A finished strategy-driven career.
#[derive(Debug)]
pub struct CareerRun {
    /// What happened.
    pub metrics: CareerMetrics,
    /// Every accepted command, replayable from the starting snapshot.
    pub replay: Replay,
    /// The career as it ended.
    pub career: Career,
}

struct Driver {
    recorder: Recorder,
    metrics: CareerMetrics,
}

impl Driver {
    /// Apply a command the strategy chose; refusals are counted, not fatal.
    fn try_apply(&mut self, command: CareerCommand) {
        match self.recorder.apply(command.clone()) {
            Ok(outcome) => self.metrics.record_command(&command, outcome),
            Err(e) => {
                debug!(command = command.name(), error = %e, "Strategy move refused");
                self.metrics.record_rejection();
            }
        }
    }

    /// Apply a command the calendar depends on.
    fn apply(&mut self, command: CareerCommand) -> Result<(), String> {
        let name = command.name();
        let outcome = self
            .recorder
            .apply(command.clone())
            .map_err(|e| format!("{name} failed at step {}: {e}", self.recorder.career().step()))?;
        self.metrics.record_command(&command, outcome);
        Ok(())
    }

    fn coach_live_game<R: rand::Rng + ?Sized>(
        &mut self,
        strategy: &Strategy,
        matchup_id: String,
        rng: &mut R,
    ) -> Result<(), String> {
        self.apply(CareerCommand::StartGame { matchup_id })?;
        loop {
            self.apply(CareerCommand::SimToDecision)?;
            let Some(game) = self.recorder.career().active_game() else {
                return Err("live game vanished before the final whistle".to_string());
            };
            if game.is_game_over {
                break;
            }
            let call = strategy.choose_call(game, rng);
            self.apply(CareerCommand::CallPlay { call })?;
        }
        self.apply(CareerCommand::FinishGame)
    }
}

/// Play `years` full seasons of a career under `strategy`.
///
/// Each week the strategy's front-office moves are applied, this week's game
/// is coached live when the strategy asks for it, and the calendar advances.
///
/// # Errors
///
/// Returns a message if the career cannot be recorded, a calendar command is
/// refused, or the seasons do not finish within a sane number of weeks.
pub fn play_career(setup: &CareerSetup, strategy: &Strategy, years: usize) -> Result<CareerRun, String> {
    let career = Career::new(setup);
    let recorder = Recorder::new(setup.seed, career).map_err(|e| e.to_string())?;
    let mut driver = Driver {
        recorder,
        metrics: CareerMetrics::new(
            format!("career_{}", setup.seed),
            strategy.name.clone(),
            setup.seed,
        ),
    };
    let mut rng = ChaCha8Rng::seed_from_u64(setup.seed ^ STRATEGY_SEED_SALT);

    let mut weeks = 0;
    while driver.recorder.career().state().history.len() < years {
        if weeks >= years * MAX_WEEKS_PER_YEAR {
            return Err(format!("career did not finish {years} seasons in {weeks} weeks"));
        }

        for command in strategy.plan_week(driver.recorder.career().state()) {
            driver.try_apply(command);
        }

        if strategy.coach_games_live {
            let matchup = driver
                .recorder
                .career()
                .state()
                .current_matchup()
                .map(|m| m.id.clone());
            if let Some(matchup_id) = matchup {
                driver.coach_live_game(strategy, matchup_id, &mut rng)?;
            }
        }

        driver.apply(CareerCommand::AdvanceWeek)?;
        weeks += 1;
    }

    let (career, replay) = driver.recorder.finish();
    let mut metrics = driver.metrics;
    metrics.finalize(&career);
    debug!(
        seed = setup.seed,
        steps = metrics.final_step,
        titles = metrics.titles(),
        "Career complete"
    );
    Ok(CareerRun {
        metrics,
        replay,
        career,
    })
}

fn run_single_career(index: u32, config: &BatchConfig) -> Result<CareerMetrics, String> {
    let seed = config.seed_start.wrapping_add(u64::from(index));
    let setup = config.setup.clone().with_seed(seed);
    let run = play_career(&setup, &config.strategy, config.years)?;

    if config.save_replays {
        let path = config
            .output_dir
            .join("replays")
            .join(format!("career_{seed}.replay"));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        run.replay.save(&path).map_err(|e| e.to_string())?;
    }

    Ok(run.metrics)
}

/// Run a batch of careers
#[must_use]
pub fn run_batch(config: BatchConfig) -> BatchResults {
    let start = Instant::now();
    let progress = Arc::new(BatchProgress::new(config.career_count));

    info!(
        careers = config.career_count,
        years = config.years,
        strategy = %config.strategy.name,
        "Starting batch run"
    );

    if config.parallel_careers > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.parallel_careers as usize)
            .build_global()
            .ok(); // Ignore if already set
    }

    let results: Vec<Result<CareerMetrics, BatchError>> = (0..config.career_count)
        .into_par_iter()
        .map(|i| match run_single_career(i, &config) {
            Ok(metrics) => {
                progress.record_completion(metrics.titles());

                let completed = progress.current();
                if completed % 10 == 0 {
                    debug!("Progress: {}/{}", completed, config.career_count);
                }
                if completed % 100 == 0 {
                    progress.display();
                }

                Ok(metrics)
            }
            Err(message) => {
                let seed = config.seed_start.wrapping_add(u64::from(i));
                warn!(career = i, seed, %message, "Career failed");
                Err(BatchError {
                    career_index: i,
                    seed,
                    message,
                })
            }
        })
        .collect();

    let (careers, errors): (Vec<_>, Vec<_>) = results.into_iter().partition(Result::is_ok);
    let careers: Vec<CareerMetrics> = careers.into_iter().filter_map(Result::ok).collect();
    let errors: Vec<BatchError> = errors.into_iter().filter_map(Result::err).collect();

    let summary = BatchSummary::from_careers(&careers);
    let duration_seconds = start.elapsed().as_secs_f64();

    info!(
        "Batch complete: {} careers in {:.1}s ({:.1} careers/sec)",
        careers.len(),
        duration_seconds,
        careers.len() as f64 / duration_seconds.max(f64::EPSILON)
    );

    BatchResults {
        config,
        careers,
        summary,
        duration_seconds,
        errors,
    }
}

/// Verify determinism by playing the same seed several times
#[must_use]
pub fn verify_determinism(setup: &CareerSetup, strategy: &Strategy, runs: u32, years: usize) -> bool {
    let hashes: Vec<Option<u64>> = (0..runs)
        .map(|_| {
            play_career(setup, strategy, years)
                .ok()
                .map(|run| run.metrics.final_state_hash)
        })
        .collect();

    match hashes.first() {
        Some(Some(first)) => hashes.iter().all(|h| *h == Some(*first)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridiron_core::replay::ReplayPlayer;

    fn setup(seed: u64) -> CareerSetup {
        CareerSetup::default().with_seed(seed)
    }

    #[test]
    fn test_batch_config_default() {
        let config = BatchConfig::default();
        assert_eq!(config.career_count, 100);
        assert_eq!(config.years, 1);
        assert_eq!(config.strategy.name, "Balanced");
    }

    #[test]
    fn test_batch_config_builder() {
        let config = BatchConfig::new(setup(0), 500)
            .with_output(PathBuf::from("/tmp/results"))
            .with_seed(12345)
            .with_years(3)
            .with_strategy(Strategy::grinder());

        assert_eq!(config.career_count, 500);
        assert_eq!(config.seed_start, 12345);
        assert_eq!(config.years, 3);
        assert_eq!(config.strategy.name, "Grinder");
    }

    #[test]
    fn test_progress_tracking() {
        let progress = BatchProgress::new(100);
        assert_eq!(progress.current(), 0);
        assert!(progress.percentage().abs() < f64::EPSILON);

        progress.record_completion(1);
        progress.record_completion(0);
        progress.record_completion(2);

        assert_eq!(progress.current(), 3);
        assert_eq!(progress.titles(), 3);
        assert!((progress.percentage() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_play_one_season() {
        let run = play_career(&setup(11), &Strategy::default(), 1).unwrap();
        assert_eq!(run.metrics.seasons.len(), 1);
        assert_eq!(run.metrics.live_games, 0);
        // Preseason and regular season, plus the bracket for qualifiers.
        let weeks = if run.metrics.seasons[0].made_playoffs() { 19 } else { 15 };
        assert_eq!(run.metrics.command_count("advance_week"), weeks);
        assert_eq!(run.metrics.final_state_hash, run.career.state_hash());
    }

    #[test]
    fn test_live_coaching_plays_every_game() {
        let run = play_career(&setup(12), &Strategy::grinder(), 1).unwrap();
        let season = &run.metrics.seasons[0];
        // Two scrimmages are coached live too but stay off the record.
        assert_eq!(run.metrics.live_games, season.wins + season.losses + 2);
        assert!(run.career.active_game().is_none());
    }

    #[test]
    fn test_replay_reproduces_run() {
        let run = play_career(&setup(13), &Strategy::gunslinger(), 1).unwrap();
        assert_eq!(run.replay.command_count() as u64, run.career.step());

        let mut player = ReplayPlayer::new(run.replay).unwrap();
        while player.advance().unwrap() {}
        assert!(player.verify().unwrap());
        assert_eq!(player.career().state_hash(), run.metrics.final_state_hash);
    }

    #[test]
    fn test_run_batch_small() {
        let config = BatchConfig::new(setup(0), 4).with_seed(100);
        let results = run_batch(config);

        assert_eq!(results.careers.len(), 4);
        assert!(results.errors.is_empty());
        assert_eq!(results.summary.total_careers, 4);
        assert_eq!(results.summary.total_seasons, 4);
        let seeds: Vec<u64> = results.careers.iter().map(|c| c.seed).collect();
        assert!(seeds.iter().all(|s| (100..104).contains(s)));
    }

    #[test]
    fn test_verify_determinism() {
        assert!(verify_determinism(&setup(12345), &Strategy::gunslinger(), 3, 1));
    }

    #[test]
    fn test_batch_results_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = BatchConfig::new(setup(0), 2).with_output(dir.path().to_path_buf());
        config.save_replays = true;
        let results = run_batch(config);

        let path = dir.path().join("results.json");
        results.save(&path).unwrap();
        assert!(path.exists());
        assert!(dir.path().join("replays").join("career_0.replay").exists());

        let loaded = BatchResults::load(&path).unwrap();
        assert_eq!(loaded.careers.len(), 2);
        assert_eq!(loaded.config.career_count, 2);
    }
}
