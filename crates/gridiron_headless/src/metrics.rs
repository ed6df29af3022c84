//! Career metrics collection for balance analysis.
//!
//! A [`CareerMetrics`] records what one automated career did and how it
//! turned out; a [`BatchSummary`] folds many of them together.

use std::collections::HashMap;

use gridiron_core::commands::RecruitOutcome;
use gridiron_core::ratings::team_rating;
use gridiron_core::session::{Career, CareerCommand, CommandOutcome};
use gridiron_core::state::SeasonRecord;
use serde::{Deserialize, Serialize};

/// One finished season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonLine {
    /// Season year.
    pub year: u32,
    /// Wins, scrimmages excluded.
    pub wins: u32,
    /// Losses, scrimmages excluded.
    pub losses: u32,
    /// "State Champion", "Playoff Appearance" or "Rebuilding Year".
    pub achievement: String,
}

impl From<&SeasonRecord> for SeasonLine {
    fn from(record: &SeasonRecord) -> Self {
        let (wins, losses) = record
            .record
            .split_once('-')
            .map_or((0, 0), |(w, l)| (w.parse().unwrap_or(0), l.parse().unwrap_or(0)));
        Self {
            year: record.year,
            wins,
            losses,
            achievement: record.achievement.clone(),
        }
    }
}

impl SeasonLine {
    /// Reached the playoffs.
    #[must_use]
    pub fn made_playoffs(&self) -> bool {
        self.achievement != "Rebuilding Year"
    }

    /// Won the state title.
    #[must_use]
    pub fn champion(&self) -> bool {
        self.achievement == "State Champion"
    }
}

/// Complete metrics for a single career.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CareerMetrics {
    /// Unique career identifier.
    pub career_id: String,
    /// Strategy that drove the career.
    pub strategy: String,
    /// Random seed used.
    pub seed: u64,
    /// Finished seasons, oldest first.
    pub seasons: Vec<SeasonLine>,
    /// Accepted commands by name.
    pub commands: HashMap<String, u32>,
    /// Commands the session refused.
    pub rejected_commands: u32,
    /// Pitches that landed.
    pub recruits_committed: u32,
    /// Pitches that missed.
    pub recruits_declined: u32,
    /// Games coached live to the final whistle.
    pub live_games: u32,
    /// Team rating at the end.
    pub final_team_rating: u32,
    /// Roster size at the end.
    pub final_roster_size: usize,
    /// Budget at the end.
    pub final_budget: i64,
    /// Commands applied in total.
    pub final_step: u64,
    /// Final career hash (for determinism validation).
    pub final_state_hash: u64,
}

impl CareerMetrics {
    /// Create a new career metrics instance.
    #[must_use]
    pub fn new(career_id: impl Into<String>, strategy: impl Into<String>, seed: u64) -> Self {
        Self {
            career_id: career_id.into(),
            strategy: strategy.into(),
            seed,
            ..Default::default()
        }
    }

    /// Record an accepted command and what it produced.
    pub fn record_command(&mut self, command: &CareerCommand, outcome: CommandOutcome) {
        *self.commands.entry(command.name().to_string()).or_default() += 1;
        match outcome {
            CommandOutcome::Recruit(RecruitOutcome::Committed) => self.recruits_committed += 1,
            CommandOutcome::Recruit(RecruitOutcome::Declined) => self.recruits_declined += 1,
            CommandOutcome::Recruit(RecruitOutcome::NotFound) | CommandOutcome::Applied => {}
        }
        if matches!(command, CareerCommand::FinishGame) {
            self.live_games += 1;
        }
    }

    /// Record a refused command.
    pub fn record_rejection(&mut self) {
        self.rejected_commands += 1;
    }

    /// Capture the career's final shape.
    pub fn finalize(&mut self, career: &Career) {
        let state = career.state();
        self.seasons = state.history.iter().map(SeasonLine::from).collect();
        self.final_team_rating = team_rating(&state.roster);
        self.final_roster_size = state.roster.len();
        self.final_budget = state.user_school.budget;
        self.final_step = career.step();
        self.final_state_hash = career.state_hash();
    }

    /// Total wins across finished seasons.
    #[must_use]
    pub fn wins(&self) -> u32 {
        self.seasons.iter().map(|s| s.wins).sum()
    }

    /// Total losses across finished seasons.
    #[must_use]
    pub fn losses(&self) -> u32 {
        self.seasons.iter().map(|s| s.losses).sum()
    }

    /// State titles won.
    #[must_use]
    pub fn titles(&self) -> u32 {
        self.seasons.iter().filter(|s| s.champion()).count() as u32
    }

    /// Seasons that reached the playoffs.
    #[must_use]
    pub fn playoff_seasons(&self) -> u32 {
        self.seasons.iter().filter(|s| s.made_playoffs()).count() as u32
    }

    /// Accepted commands of one kind.
    #[must_use]
    pub fn command_count(&self, name: &str) -> u32 {
        self.commands.get(name).copied().unwrap_or(0)
    }
}

/// Summary statistics across multiple careers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Careers played.
    pub total_careers: u32,
    /// Seasons played across all careers.
    pub total_seasons: u32,
    /// Share of games won.
    pub win_rate: f64,
    /// Share of seasons that reached the playoffs.
    pub playoff_rate: f64,
    /// Share of seasons that ended in a title.
    pub title_rate: f64,
    /// Mean final team rating.
    pub avg_team_rating: f64,
    /// Lowest final team rating.
    pub min_team_rating: u32,
    /// Highest final team rating.
    pub max_team_rating: u32,
    /// Mean pitches landed per career.
    pub avg_recruits_committed: f64,
    /// Mean commands applied per career.
    pub avg_steps: f64,
    /// Title counts by strategy name.
    pub titles_by_strategy: HashMap<String, u32>,
}

impl BatchSummary {
    /// Calculate summary from a list of career metrics.
    #[must_use]
    pub fn from_careers(careers: &[CareerMetrics]) -> Self {
        if careers.is_empty() {
            return Self::default();
        }

        let count = careers.len() as f64;
        let mut summary = Self {
            total_careers: careers.len() as u32,
            min_team_rating: u32::MAX,
            ..Default::default()
        };

        let (mut wins, mut losses, mut playoffs, mut titles) = (0u32, 0u32, 0u32, 0u32);
        let (mut rating_sum, mut committed_sum, mut step_sum) = (0u64, 0u64, 0u64);

        for career in careers {
            summary.total_seasons += career.seasons.len() as u32;
            wins += career.wins();
            losses += career.losses();
            playoffs += career.playoff_seasons();
            titles += career.titles();

            rating_sum += u64::from(career.final_team_rating);
            summary.min_team_rating = summary.min_team_rating.min(career.final_team_rating);
            summary.max_team_rating = summary.max_team_rating.max(career.final_team_rating);
            committed_sum += u64::from(career.recruits_committed);
            step_sum += career.final_step;

            *summary
                .titles_by_strategy
                .entry(career.strategy.clone())
                .or_default() += career.titles();
        }

        let games = wins + losses;
        summary.win_rate = if games == 0 {
            0.0
        } else {
            f64::from(wins) / f64::from(games)
        };
        if summary.total_seasons > 0 {
            let seasons = f64::from(summary.total_seasons);
            summary.playoff_rate = f64::from(playoffs) / seasons;
            summary.title_rate = f64::from(titles) / seasons;
        }
        summary.avg_team_rating = rating_sum as f64 / count;
        summary.avg_recruits_committed = committed_sum as f64 / count;
        summary.avg_steps = step_sum as f64 / count;

        summary
    }

    /// Check if the win rate sits within `threshold` of a coin flip.
    #[must_use]
    pub fn is_balanced(&self, threshold: f64) -> bool {
        (self.win_rate - 0.5).abs() <= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season(year: u32, record: &str, achievement: &str) -> SeasonLine {
        SeasonLine::from(&SeasonRecord {
            year,
            record: record.to_string(),
            achievement: achievement.to_string(),
            school_name: "East High Eagles".to_string(),
        })
    }

    fn metrics(strategy: &str, seasons: Vec<SeasonLine>, rating: u32) -> CareerMetrics {
        CareerMetrics {
            seasons,
            final_team_rating: rating,
            final_step: 100,
            ..CareerMetrics::new("career_1", strategy, 1)
        }
    }

    #[test]
    fn test_season_line_parses_record() {
        let line = season(2024, "10-3", "State Champion");
        assert_eq!((line.wins, line.losses), (10, 3));
        assert!(line.champion() && line.made_playoffs());

        let rebuild = season(2025, "2-7", "Rebuilding Year");
        assert!(!rebuild.made_playoffs());
    }

    #[test]
    fn test_record_command_counts() {
        let mut m = CareerMetrics::new("c", "balanced", 0);
        m.record_command(&CareerCommand::AdvanceWeek, CommandOutcome::Applied);
        m.record_command(&CareerCommand::AdvanceWeek, CommandOutcome::Applied);
        let pitch = CareerCommand::AttemptRecruit {
            prospect_id: "p".into(),
        };
        m.record_command(&pitch, CommandOutcome::Recruit(RecruitOutcome::Committed));
        m.record_command(&pitch, CommandOutcome::Recruit(RecruitOutcome::Declined));
        m.record_command(&CareerCommand::FinishGame, CommandOutcome::Applied);
        m.record_rejection();

        assert_eq!(m.command_count("advance_week"), 2);
        assert_eq!(m.command_count("attempt_recruit"), 2);
        assert_eq!(m.command_count("scout"), 0);
        assert_eq!((m.recruits_committed, m.recruits_declined), (1, 1));
        assert_eq!(m.live_games, 1);
        assert_eq!(m.rejected_commands, 1);
    }

    #[test]
    fn test_finalize_captures_career() {
        let mut career = Career::new(&gridiron_core::data::CareerSetup::default().with_seed(2));
        career.apply(CareerCommand::AdvanceWeek).unwrap();
        let mut m = CareerMetrics::new("c", "balanced", 2);
        m.finalize(&career);
        assert_eq!(m.final_step, 1);
        assert_eq!(m.final_roster_size, 51);
        assert_eq!(m.final_state_hash, career.state_hash());
        assert!(m.seasons.is_empty());
    }

    #[test]
    fn test_summary_empty() {
        let summary = BatchSummary::from_careers(&[]);
        assert_eq!(summary.total_careers, 0);
        assert_eq!(summary.min_team_rating, 0);
    }

    #[test]
    fn test_summary_rates() {
        let careers = vec![
            metrics(
                "grinder",
                vec![
                    season(2024, "10-3", "State Champion"),
                    season(2025, "3-6", "Rebuilding Year"),
                ],
                70,
            ),
            metrics("balanced", vec![season(2024, "7-3", "Playoff Appearance")], 60),
        ];
        let summary = BatchSummary::from_careers(&careers);

        assert_eq!(summary.total_careers, 2);
        assert_eq!(summary.total_seasons, 3);
        assert!((summary.win_rate - 20.0 / 32.0).abs() < 1e-9);
        assert!((summary.playoff_rate - 2.0 / 3.0).abs() < 1e-9);
        assert!((summary.title_rate - 1.0 / 3.0).abs() < 1e-9);
        assert!((summary.avg_team_rating - 65.0).abs() < 1e-9);
        assert_eq!((summary.min_team_rating, summary.max_team_rating), (60, 70));
        assert_eq!(summary.titles_by_strategy["grinder"], 1);
        assert_eq!(summary.titles_by_strategy["balanced"], 0);
        assert!(summary.is_balanced(0.2));
        assert!(!summary.is_balanced(0.1));
    }
}
