//! Career setup loaded from RON.

use serde::{Deserialize, Serialize};

use crate::constants::{IN_SEASON_SCOUTING_POINTS, ROSTER_CAP};
use crate::error::{GameError, Result};
use crate::player::Position;
use crate::state::{CoachArchetype, CoachProfile};

/// How many players of one position the seeded roster gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSlot {
    /// Position to fill.
    pub position: Position,
    /// Players generated for it.
    pub count: u8,
}

/// Everything needed to start a career.
///
/// # Example RON
///
/// ```ron
/// CareerSetup(
///     coach: (name: "Eric Taylor", appearance: "suit", archetype: Motivator),
///     team_name: "Dillon Panthers",
///     seed: 42,
///     league_size: 9,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerSetup {
    /// The user's coach.
    pub coach: CoachProfile,

    /// Program name.
    #[serde(default = "default_team_name")]
    pub team_name: String,

    /// Seed for the career's random source.
    #[serde(default)]
    pub seed: u64,

    /// First season.
    #[serde(default = "default_start_year")]
    pub start_year: u32,

    /// Opponent schools in the league pool.
    #[serde(default = "default_league_size")]
    pub league_size: usize,

    /// Scouting points available in the first week.
    #[serde(default = "default_scouting_points")]
    pub scouting_points: u32,

    /// Seeded roster by position.
    #[serde(default = "default_roster")]
    pub roster: Vec<RosterSlot>,
}

fn default_team_name() -> String {
    "East High Eagles".to_string()
}

const fn default_start_year() -> u32 {
    2024
}

const fn default_league_size() -> usize {
    9
}

const fn default_scouting_points() -> u32 {
    IN_SEASON_SCOUTING_POINTS
}

fn default_roster() -> Vec<RosterSlot> {
    use Position as P;
    [
        (P::Quarterback, 3),
        (P::RunningBack, 4),
        (P::WideReceiver, 6),
        (P::TightEnd, 3),
        (P::LeftTackle, 2),
        (P::LeftGuard, 2),
        (P::Center, 2),
        (P::RightGuard, 2),
        (P::RightTackle, 2),
        (P::DefensiveEnd, 4),
        (P::DefensiveTackle, 4),
        (P::Linebacker, 6),
        (P::Cornerback, 5),
        (P::Safety, 4),
        (P::Kicker, 1),
        (P::Punter, 1),
    ]
    .into_iter()
    .map(|(position, count)| RosterSlot { position, count })
    .collect()
}

impl CareerSetup {
    /// Setup with defaults for everything but the coach and program name.
    #[must_use]
    pub fn new(coach: CoachProfile, team_name: impl Into<String>) -> Self {
        Self {
            coach,
            team_name: team_name.into(),
            seed: 0,
            start_year: default_start_year(),
            league_size: default_league_size(),
            scouting_points: default_scouting_points(),
            roster: default_roster(),
        }
    }

    /// Builder-style seed override.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse from RON text.
    ///
    /// # Errors
    ///
    /// [`GameError::SetupParse`] when the text is not a valid setup.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| GameError::SetupParse(e.to_string()))
    }

    /// Players the seeded roster will contain.
    #[must_use]
    pub fn roster_size(&self) -> usize {
        self.roster.iter().map(|slot| usize::from(slot.count)).sum()
    }

    /// Check the setup describes a playable career.
    ///
    /// # Errors
    ///
    /// [`GameError::SetupParse`] naming the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.coach.name.trim().is_empty() {
            return Err(GameError::SetupParse("coach name is empty".into()));
        }
        if self.team_name.trim().is_empty() {
            return Err(GameError::SetupParse("team name is empty".into()));
        }
        if self.league_size == 0 {
            return Err(GameError::SetupParse("league needs at least one school".into()));
        }
        let size = self.roster_size();
        if size == 0 || size > ROSTER_CAP {
            return Err(GameError::SetupParse(format!(
                "roster of {size} players must be between 1 and {ROSTER_CAP}"
            )));
        }
        Ok(())
    }
}

impl Default for CareerSetup {
    fn default() -> Self {
        Self::new(
            CoachProfile {
                name: "Coach".to_string(),
                appearance: "suit".to_string(),
                archetype: CoachArchetype::Tactician,
            },
            default_team_name(),
        )
    }
}
