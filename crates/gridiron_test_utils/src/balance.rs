//! Balance testing utilities for headless careers.
//!
//! Plays whole seasons on the fast-sim path and aggregates the outcomes,
//! so tuning changes to ratings or schedules can be checked in bulk.

use gridiron_core::data::CareerSetup;
use gridiron_core::session::{Career, CareerCommand};
use gridiron_core::state::SeasonRecord;
use tracing::debug;

/// Outcome of one simulated season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonResult {
    /// Year the season was played.
    pub year: u32,
    /// Wins, scrimmages excluded.
    pub wins: u32,
    /// Losses, scrimmages excluded.
    pub losses: u32,
    /// Reached the playoffs.
    pub made_playoffs: bool,
    /// Won the state title.
    pub champion: bool,
}

impl SeasonResult {
    /// Read a season back out of the career history.
    #[must_use]
    pub fn from_record(record: &SeasonRecord) -> Self {
        let mut parts = record.record.split('-').map(|n| n.parse().unwrap_or(0));
        let wins = parts.next().unwrap_or(0);
        let losses = parts.next().unwrap_or(0);
        Self {
            year: record.year,
            wins,
            losses,
            made_playoffs: record.achievement != "Rebuilding Year",
            champion: record.achievement == "State Champion",
        }
    }
}

/// Statistics for a set of seasons.
#[derive(Debug, Clone, Default)]
pub struct SeasonStats {
    /// Seasons played.
    pub seasons: u32,
    /// Total wins.
    pub wins: u32,
    /// Total losses.
    pub losses: u32,
    /// Seasons that reached the playoffs.
    pub playoff_seasons: u32,
    /// Titles won.
    pub titles: u32,
}

impl SeasonStats {
    /// Fold one season into the totals.
    pub fn record(&mut self, result: &SeasonResult) {
        self.seasons += 1;
        self.wins += result.wins;
        self.losses += result.losses;
        self.playoff_seasons += u32::from(result.made_playoffs);
        self.titles += u32::from(result.champion);
    }

    /// Share of games won (0.0 to 1.0).
    pub fn win_rate(&self) -> f64 {
        let games = self.wins + self.losses;
        if games == 0 {
            return 0.5;
        }
        f64::from(self.wins) / f64::from(games)
    }

    /// Share of seasons that reached the playoffs.
    pub fn playoff_rate(&self) -> f64 {
        if self.seasons == 0 {
            return 0.0;
        }
        f64::from(self.playoff_seasons) / f64::from(self.seasons)
    }

    /// Check whether the win rate falls in an acceptable band.
    pub fn is_balanced(&self, min_rate: f64, max_rate: f64) -> bool {
        let rate = self.win_rate();
        rate >= min_rate && rate <= max_rate
    }
}

/// Play `years` full seasons for each seed and collect the results.
#[must_use]
pub fn simulate_seasons(seeds: impl IntoIterator<Item = u64>, years: usize) -> SeasonStats {
    let mut stats = SeasonStats::default();
    for seed in seeds {
        let mut career = Career::new(&CareerSetup::default().with_seed(seed));
        while career.state().history.len() < years {
            if career.apply(CareerCommand::AdvanceWeek).is_err() {
                break;
            }
        }
        for record in &career.state().history {
            let result = SeasonResult::from_record(record);
            debug!(seed, year = result.year, wins = result.wins, "Season simulated");
            stats.record(&result);
        }
    }
    stats
}
