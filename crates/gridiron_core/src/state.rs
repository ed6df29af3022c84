//! The career root record and its calendar.
//!
//! [`GameState`] is plain data: every field serializes, nothing holds a
//! handle, and every engine transition returns a fresh value instead of
//! mutating the caller's copy.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::live_game::ActiveGame;
use crate::player::Player;
use crate::school::{School, SchoolId};
use crate::staff::Staff;

/// Segment of the yearly cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeasonPhase {
    /// Recruiting and training; no games.
    Offseason,
    /// Camp; scrimmages in the last two weeks.
    Preseason,
    /// Nine league games.
    RegularSeason,
    /// Four-round bracket for qualifiers.
    Playoffs,
}

impl SeasonPhase {
    /// Phases in calendar order.
    pub const ALL: [SeasonPhase; 4] = [
        SeasonPhase::Offseason,
        SeasonPhase::Preseason,
        SeasonPhase::RegularSeason,
        SeasonPhase::Playoffs,
    ];

    /// Configured length in weeks.
    #[must_use]
    pub const fn weeks(self) -> u8 {
        match self {
            SeasonPhase::Offseason => 3,
            SeasonPhase::Preseason => 6,
            SeasonPhase::RegularSeason => 9,
            SeasonPhase::Playoffs => 4,
        }
    }

    /// Injuries can happen in this phase.
    #[must_use]
    pub const fn has_contact(self) -> bool {
        matches!(self, SeasonPhase::Preseason | SeasonPhase::RegularSeason)
    }

    /// Players develop in this phase.
    #[must_use]
    pub const fn has_training(self) -> bool {
        matches!(self, SeasonPhase::Offseason | SeasonPhase::Preseason)
    }
}

impl fmt::Display for SeasonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SeasonPhase::Offseason => "OFFSEASON",
            SeasonPhase::Preseason => "PRESEASON",
            SeasonPhase::RegularSeason => "REGULAR_SEASON",
            SeasonPhase::Playoffs => "PLAYOFFS",
        })
    }
}

/// Head coach persona chosen at career start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoachArchetype {
    /// +20 points to recruiting odds.
    Recruiter,
    /// +15 starting morale for the seeded roster.
    Motivator,
    /// Better odds on risky play calls.
    Tactician,
}

/// The user's coach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachProfile {
    /// Display name.
    pub name: String,
    /// Cosmetic appearance tag.
    pub appearance: String,
    /// Persona.
    pub archetype: CoachArchetype,
}

/// Career counters. Wins and losses reset every year.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CareerStats {
    pub wins: u32,
    pub losses: u32,
    pub titles: u32,
    pub experience: u32,
    pub reputation: u32,
}

/// One line of the year-by-year history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRecord {
    /// Season year.
    pub year: u32,
    /// Final record as "W-L".
    pub record: String,
    /// "State Champion", "Playoff Appearance" or "Rebuilding Year".
    pub achievement: String,
    /// Program name at the time.
    pub school_name: String,
}

/// Category of a scheduled contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchKind {
    /// Preseason tune-up; excluded from the record.
    Scrimmage,
    /// League game.
    Regular,
    /// Bracket game.
    Playoff,
}

/// One scheduled contest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMatchup {
    /// "scrimmage-N", "reg-N" or "playoff-N".
    pub id: String,
    /// Week within the matchup's phase (scrimmages are numbered 1-2).
    pub week: u8,
    /// Home school.
    pub home_team_id: SchoolId,
    /// Away school.
    pub away_team_id: SchoolId,
    /// Home points once played.
    pub home_score: Option<u32>,
    /// Away points once played.
    pub away_score: Option<u32>,
    /// Result recorded.
    pub played: bool,
    /// Category.
    pub summary: MatchKind,
    /// Opponent strength used by the fast-sim resolver.
    pub opponent_rating: u32,
    /// Opponent display name.
    pub opponent_name: String,
}

impl GameMatchup {
    /// True when `school_id` is the home side.
    #[must_use]
    pub fn is_home(&self, school_id: &str) -> bool {
        self.home_team_id == school_id
    }

    /// Points for `school_id`'s side and the opponent, once played.
    #[must_use]
    pub fn score_for(&self, school_id: &str) -> Option<(u32, u32)> {
        let (home, away) = (self.home_score?, self.away_score?);
        Some(if self.is_home(school_id) {
            (home, away)
        } else {
            (away, home)
        })
    }
}

/// Root of a career.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Calendar year.
    pub year: u32,
    /// Week within `phase`, starting at 1.
    pub week: u8,
    /// Current phase.
    pub phase: SeasonPhase,
    /// The user's program.
    pub user_school: School,
    /// The user's coach.
    pub coach: CoachProfile,
    /// Roster in depth-chart order.
    pub roster: Vec<Player>,
    /// Hired staff.
    pub staff: Vec<Staff>,
    /// Hiring board, refreshed weekly.
    #[serde(default)]
    pub staff_candidates: Vec<Staff>,
    /// Career counters.
    pub career: CareerStats,
    /// Opponent pool, generated once per career.
    pub league_schools: Vec<School>,
    /// This year's matchups.
    pub schedule: Vec<GameMatchup>,
    /// Prospects available this week.
    pub recruitment_pool: Vec<Player>,
    /// Scouting points left this week.
    pub scouting_points: u32,
    /// Recruiting pitches left this week.
    #[serde(default)]
    pub recruiting_actions: u32,
    /// Live interactive game, if any.
    pub active_game: Option<ActiveGame>,
    /// Year-by-year log.
    pub history: Vec<SeasonRecord>,
}

impl GameState {
    /// Find a roster player.
    #[must_use]
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.roster.iter().find(|p| p.id == id)
    }

    /// Find a prospect in the recruiting pool.
    #[must_use]
    pub fn prospect(&self, id: &str) -> Option<&Player> {
        self.recruitment_pool.iter().find(|p| p.id == id)
    }

    /// Find a scheduled matchup.
    #[must_use]
    pub fn matchup(&self, id: &str) -> Option<&GameMatchup> {
        self.schedule.iter().find(|m| m.id == id)
    }

    /// The unplayed matchup that belongs to the current calendar slot.
    ///
    /// Preseason weeks map onto scrimmage numbers by subtracting the
    /// scrimmage offset; the offseason has no games.
    #[must_use]
    pub fn current_matchup(&self) -> Option<&GameMatchup> {
        let (kind, week) = match self.phase {
            SeasonPhase::Offseason => return None,
            SeasonPhase::Preseason => (
                MatchKind::Scrimmage,
                self.week.checked_sub(crate::constants::SCRIMMAGE_WEEK_OFFSET)?,
            ),
            SeasonPhase::RegularSeason => (MatchKind::Regular, self.week),
            SeasonPhase::Playoffs => (MatchKind::Playoff, self.week),
        };
        self.schedule
            .iter()
            .find(|m| m.summary == kind && m.week == week && !m.played)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_weeks() {
        let total: u32 = SeasonPhase::ALL.iter().map(|p| u32::from(p.weeks())).sum();
        assert_eq!(total, 22);
        assert_eq!(SeasonPhase::Preseason.weeks(), 6);
    }

    #[test]
    fn test_phase_serde_names() {
        let json = serde_json::to_string(&SeasonPhase::RegularSeason).unwrap();
        assert_eq!(json, "\"REGULAR_SEASON\"");
        assert_eq!(SeasonPhase::Playoffs.to_string(), "PLAYOFFS");
    }

    #[test]
    fn test_score_for_away_side() {
        let matchup = GameMatchup {
            id: "reg-1".into(),
            week: 1,
            home_team_id: "them".into(),
            away_team_id: "us".into(),
            home_score: Some(14),
            away_score: Some(21),
            played: true,
            summary: MatchKind::Regular,
            opponent_rating: 60,
            opponent_name: "Riverdale".into(),
        };
        assert_eq!(matchup.score_for("us"), Some((21, 14)));
        assert_eq!(matchup.score_for("them"), Some((14, 21)));
    }
}
