//! Scripted coaching strategies for headless careers.
//!
//! A strategy decides, week by week, which career commands an automated
//! coach issues: recruiting, scouting, hiring, staff dials and whether to
//! coach this week's game live. Every decision comes from the career state
//! and the strategy's own seeded generator, so a strategy-driven career is
//! as reproducible as a scripted one.

use std::path::Path;

use gridiron_core::commands::{commit_odds, hire_cost, DepthOrder};
use gridiron_core::constants::{MAX_SCOUTING_LEVEL, ROSTER_CAP};
use gridiron_core::live_game::{ActiveGame, PlayCall};
use gridiron_core::session::CareerCommand;
use gridiron_core::staff::StaffRole;
use gridiron_core::state::GameState;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for strategy operations.
#[derive(Error, Debug)]
pub enum StrategyError {
    /// File not found.
    #[error("Strategy file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read strategy file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse strategy: {0}")]
    ParseError(#[from] ron::error::SpannedError),
}

/// A complete coaching strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    /// Strategy name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Coach games live instead of letting the week fast-sim them.
    pub coach_games_live: bool,
    /// Play-calling tendencies.
    pub play_calling: PlayCalling,
    /// Recruiting plan.
    pub recruiting: RecruitingPlan,
    /// Staff dial targets, 0-100.
    pub styles: StyleTargets,
    /// Upgrade staff only while the budget stays above this floor.
    pub hire_budget_floor: i64,
}

/// How the coach calls plays at decision points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayCalling {
    /// Chance of going for it on 4th down instead of punting.
    pub fourth_down_aggression: f64,
    /// Share of called passes that go deep.
    pub deep_shot_rate: f64,
}

impl Default for PlayCalling {
    fn default() -> Self {
        Self {
            fourth_down_aggression: 0.2,
            deep_shot_rate: 0.3,
        }
    }
}

/// Weekly recruiting behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecruitingPlan {
    /// Scouting points to spend per week.
    pub scout_per_week: u32,
    /// Pitches to make per week.
    pub pitches_per_week: u32,
    /// Skip prospects whose commit odds fall below this.
    pub min_commit_odds: f64,
    /// Keep this many roster spots open.
    pub roster_buffer: usize,
}

impl Default for RecruitingPlan {
    fn default() -> Self {
        Self {
            scout_per_week: 3,
            pitches_per_week: 2,
            min_commit_odds: 0.4,
            roster_buffer: 0,
        }
    }
}

/// Staff dial settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleTargets {
    /// Offensive coordinator risk.
    pub offense: u8,
    /// Defensive coordinator aggression.
    pub defense: u8,
    /// Strength coach intensity.
    pub strength: u8,
    /// Academic advisor strictness.
    pub academics: u8,
}

impl Default for StyleTargets {
    fn default() -> Self {
        Self {
            offense: 50,
            defense: 50,
            strength: 50,
            academics: 50,
        }
    }
}

impl StyleTargets {
    const fn for_role(self, role: StaffRole) -> Option<u8> {
        match role {
            StaffRole::OffensiveCoordinator => Some(self.offense),
            StaffRole::DefensiveCoordinator => Some(self.defense),
            StaffRole::StrengthCoach => Some(self.strength),
            StaffRole::AcademicAdvisor => Some(self.academics),
            StaffRole::HeadCoach => None,
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self {
            name: "Balanced".to_string(),
            description: "Steady recruiting, neutral staff dials, fast-sim games".to_string(),
            coach_games_live: false,
            play_calling: PlayCalling::default(),
            recruiting: RecruitingPlan::default(),
            styles: StyleTargets::default(),
            hire_budget_floor: 20_000,
        }
    }
}

impl Strategy {
    /// Load a strategy from a RON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or malformed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StrategyError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StrategyError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        let strategy: Strategy = ron::from_str(&contents)?;
        Ok(strategy)
    }

    /// Load from a RON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is malformed.
    pub fn from_ron_str(ron: &str) -> Result<Self, StrategyError> {
        let strategy: Strategy = ron::from_str(ron)?;
        Ok(strategy)
    }

    /// A "Grinder" strategy: coaches every game live, conservative calls,
    /// hard practices.
    #[must_use]
    pub fn grinder() -> Self {
        Self {
            name: "Grinder".to_string(),
            description: "Live games, safe calls, high practice intensity".to_string(),
            coach_games_live: true,
            play_calling: PlayCalling {
                fourth_down_aggression: 0.05,
                deep_shot_rate: 0.1,
            },
            styles: StyleTargets {
                offense: 30,
                defense: 40,
                strength: 80,
                academics: 50,
            },
            ..Self::default()
        }
    }

    /// A "Gunslinger" strategy: live games with aggressive calls and
    /// high-variance coordinators.
    #[must_use]
    pub fn gunslinger() -> Self {
        Self {
            name: "Gunslinger".to_string(),
            description: "Live games, deep shots, go for it on 4th".to_string(),
            coach_games_live: true,
            play_calling: PlayCalling {
                fourth_down_aggression: 0.7,
                deep_shot_rate: 0.6,
            },
            styles: StyleTargets {
                offense: 90,
                defense: 80,
                strength: 50,
                academics: 30,
            },
            ..Self::default()
        }
    }

    /// A "Recruiter" strategy: spends every pitch and scouting point.
    #[must_use]
    pub fn recruiter() -> Self {
        Self {
            name: "Recruiter".to_string(),
            description: "Maximum recruiting effort, fast-sim games".to_string(),
            recruiting: RecruitingPlan {
                scout_per_week: 10,
                pitches_per_week: 5,
                min_commit_odds: 0.2,
                roster_buffer: 0,
            },
            ..Self::default()
        }
    }

    /// Built-in strategy by name, case-insensitive.
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "balanced" => Some(Self::default()),
            "grinder" => Some(Self::grinder()),
            "gunslinger" => Some(Self::gunslinger()),
            "recruiter" => Some(Self::recruiter()),
            _ => None,
        }
    }

    /// A preset by name, or else a RON file at that path.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is no preset and loading it as a file fails.
    pub fn resolve(name: &str) -> Result<Self, StrategyError> {
        match Self::preset(name) {
            Some(strategy) => Ok(strategy),
            None => Self::load(name),
        }
    }

    /// Names of the built-in strategies.
    #[must_use]
    pub fn preset_names() -> &'static [&'static str] {
        &["balanced", "grinder", "gunslinger", "recruiter"]
    }

    /// Front-office moves for the current week, in the order to apply them.
    ///
    /// Moves respect the weekly limits visible in `state`, so the session
    /// accepts each one unless an earlier move changed the picture.
    #[must_use]
    pub fn plan_week(&self, state: &GameState) -> Vec<CareerCommand> {
        let mut plan = Vec::new();

        let mut budget = state.user_school.budget;
        let mut hired = Vec::new();
        for role in StaffRole::HIREABLE {
            let incumbent = state.staff.iter().find(|s| s.role == role);
            let incumbent_skill = incumbent.map_or(0, |s| s.skill);
            let best = state
                .staff_candidates
                .iter()
                .filter(|c| c.role == role && c.skill > incumbent_skill)
                .filter(|c| budget - hire_cost(c) >= self.hire_budget_floor)
                .max_by(|a, b| a.skill.cmp(&b.skill).then_with(|| b.id.cmp(&a.id)));
            if let Some(candidate) = best {
                budget -= hire_cost(candidate);
                plan.push(CareerCommand::HireStaff {
                    candidate_id: candidate.id.clone(),
                });
            }
            if let Some(member) = best.or(incumbent) {
                hired.push(member);
            }
        }

        // Dials go on whoever holds the role once this week's hires land.
        for member in hired {
            if let Some(target) = self.styles.for_role(member.role) {
                if member.style_value != target {
                    plan.push(CareerCommand::SetStaffStyle {
                        staff_id: member.id.clone(),
                        value: target,
                    });
                }
            }
        }

        let mut prospects: Vec<_> = state.recruitment_pool.iter().collect();
        prospects.sort_by(|a, b| b.potential.cmp(&a.potential).then_with(|| a.id.cmp(&b.id)));

        let scouting_budget = self.recruiting.scout_per_week.min(state.scouting_points);
        let mut spent = 0;
        'scouting: for prospect in &prospects {
            for _ in prospect.scouting_level..MAX_SCOUTING_LEVEL {
                if spent == scouting_budget {
                    break 'scouting;
                }
                plan.push(CareerCommand::Scout {
                    prospect_id: prospect.id.clone(),
                });
                spent += 1;
            }
        }

        let open_spots = ROSTER_CAP
            .saturating_sub(self.recruiting.roster_buffer)
            .saturating_sub(state.roster.len());
        let pitches = self
            .recruiting
            .pitches_per_week
            .min(state.recruiting_actions) as usize;
        prospects
            .iter()
            .filter(|p| commit_odds(p, state.coach.archetype) >= self.recruiting.min_commit_odds)
            .take(pitches.min(open_spots))
            .for_each(|p| {
                plan.push(CareerCommand::AttemptRecruit {
                    prospect_id: p.id.clone(),
                });
            });

        if !plan.is_empty() {
            plan.push(CareerCommand::AutoDepthChart {
                order: DepthOrder::Overall,
            });
        }
        plan
    }

    /// Pick a call at a decision point.
    pub fn choose_call<R: Rng + ?Sized>(&self, game: &ActiveGame, rng: &mut R) -> PlayCall {
        if game.down < 4 {
            return PlayCall::Continue;
        }
        let go_for_it = rng.gen_bool(self.play_calling.fourth_down_aggression.clamp(0.0, 1.0));
        if game.can_punt() && !go_for_it {
            return PlayCall::Punt;
        }
        if game.distance <= 3 {
            PlayCall::Run
        } else if rng.gen_bool(self.play_calling.deep_shot_rate.clamp(0.0, 1.0)) {
            PlayCall::PassLong
        } else {
            PlayCall::PassShort
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridiron_core::commands::create_career;
    use gridiron_core::data::CareerSetup;
    use gridiron_core::generators::generate_prospect;
    use gridiron_core::live_game::Side;
    use gridiron_core::session::Career;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn state_with_pool() -> GameState {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut state = create_career(&CareerSetup::default(), &mut rng);
        state.recruitment_pool = (0..5).map(|_| generate_prospect(&mut rng)).collect();
        state
    }

    #[test]
    fn test_presets_resolve() {
        for name in Strategy::preset_names() {
            assert!(Strategy::preset(name).is_some(), "{name}");
        }
        assert_eq!(Strategy::preset("GRINDER").unwrap().name, "Grinder");
        assert!(Strategy::preset("blitz").is_none());
    }

    #[test]
    fn test_resolve_preset_or_file() {
        assert_eq!(Strategy::resolve("recruiter").unwrap(), Strategy::recruiter());
        assert!(matches!(
            Strategy::resolve("no_such_strategy"),
            Err(StrategyError::FileNotFound(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.ron");
        let mut custom = Strategy::grinder();
        custom.name = "Custom".to_string();
        std::fs::write(&path, ron::to_string(&custom).unwrap()).unwrap();
        assert_eq!(Strategy::resolve(path.to_str().unwrap()).unwrap().name, "Custom");
    }

    #[test]
    fn test_ron_roundtrip() {
        let text = ron::to_string(&Strategy::gunslinger()).unwrap();
        assert_eq!(Strategy::from_ron_str(&text).unwrap(), Strategy::gunslinger());
    }

    #[test]
    fn test_plan_respects_weekly_limits() {
        let state = state_with_pool();
        let strategy = Strategy::recruiter();
        let plan = strategy.plan_week(&state);
        let scouts = plan.iter().filter(|c| matches!(c, CareerCommand::Scout { .. })).count();
        let pitches = plan
            .iter()
            .filter(|c| matches!(c, CareerCommand::AttemptRecruit { .. }))
            .count();
        assert!(scouts as u32 <= state.scouting_points);
        assert!(pitches <= 2); // 51 players leaves two open spots
    }

    #[test]
    fn test_planned_moves_are_accepted() {
        let setup = CareerSetup::default().with_seed(4);
        let mut career = Career::new(&setup);
        career.apply(CareerCommand::AdvanceWeek).unwrap();
        let plan = Strategy::default().plan_week(career.state());
        for command in plan {
            career.apply(command).unwrap();
        }
    }

    #[test]
    fn test_style_dials_set() {
        let state = state_with_pool();
        let plan = Strategy::grinder().plan_week(&state);
        assert!(plan.iter().any(|c| matches!(
            c,
            CareerCommand::SetStaffStyle { value: 80, .. }
        )));
    }

    #[test]
    fn test_calls_follow_situation() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut game = ActiveGame::new("reg-1", "Riverdale", Side::Home);
        assert_eq!(Strategy::default().choose_call(&game, &mut rng), PlayCall::Continue);

        game.down = 4;
        game.distance = 2;
        game.yard_line = 40;
        let timid = Strategy {
            play_calling: PlayCalling {
                fourth_down_aggression: 0.0,
                deep_shot_rate: 0.0,
            },
            ..Strategy::default()
        };
        assert_eq!(timid.choose_call(&game, &mut rng), PlayCall::Punt);

        game.yard_line = 75;
        assert_eq!(timid.choose_call(&game, &mut rng), PlayCall::Run);
        game.distance = 8;
        assert_eq!(timid.choose_call(&game, &mut rng), PlayCall::PassShort);
    }
}
