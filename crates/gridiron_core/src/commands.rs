//! Career creation and the roster, recruiting and staff reducers.
//!
//! Every reducer takes the current [`GameState`] by value and returns the
//! next one. An id that matches nothing leaves the state untouched.
//! Caller-side limits (roster cap, budget, scouting points) are checked in
//! [`crate::policy`], not here.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    CANDIDATES_PER_ROLE, DECLINED_INTEREST_PENALTY, HIRE_COST_PER_SKILL, MAX_OVERALL,
    MAX_SCOUTING_LEVEL, MIN_OVERALL, MOTIVATOR_MORALE_BONUS, RECRUITER_BONUS,
    RECRUITING_ACTIONS_PER_WEEK, SCOUTING_MARGINS,
};
use crate::data::CareerSetup;
use crate::dice;
use crate::generators::{
    generate_league, generate_player, generate_school, generate_staff, generate_staff_candidates,
};
use crate::player::{Player, PositionRequest};
use crate::schedule::generate_schedule_for_year;
use crate::staff::{Staff, StaffRole};
use crate::state::{CareerStats, CoachArchetype, GameState, SeasonPhase};

const USER_PRIMARY_COLOR: &str = "#1e40af";

/// Start a new career.
///
/// Seeds a fully scouted roster from the setup's distribution, a league of
/// opponents, one staff member per hireable role and the first schedule.
/// The career opens in week 1 of the preseason.
pub fn create_career<R: Rng + ?Sized>(setup: &CareerSetup, rng: &mut R) -> GameState {
    let mut user_school = generate_school(rng, Some(&setup.team_name));
    user_school.colors.primary = USER_PRIMARY_COLOR.to_string();

    let morale_bonus = if setup.coach.archetype == CoachArchetype::Motivator {
        MOTIVATOR_MORALE_BONUS
    } else {
        0.0
    };
    let mut roster = Vec::with_capacity(setup.roster_size());
    for slot in &setup.roster {
        for _ in 0..slot.count {
            let mut player =
                generate_player(rng, None, Some(PositionRequest::Exact(slot.position)), None);
            player.morale = (player.morale + morale_bonus).min(100.0);
            player.scouting_level = MAX_SCOUTING_LEVEL;
            roster.push(player);
        }
    }

    let league_schools = generate_league(rng, setup.league_size);
    let schedule = generate_schedule_for_year(rng, &user_school, &league_schools);
    let staff = StaffRole::HIREABLE
        .iter()
        .map(|&role| generate_staff(rng, role))
        .collect();
    let staff_candidates = generate_staff_candidates(rng, CANDIDATES_PER_ROLE);

    debug!(
        team = %setup.team_name,
        roster = roster.len(),
        league = league_schools.len(),
        "Created career"
    );

    GameState {
        year: setup.start_year,
        week: 1,
        phase: SeasonPhase::Preseason,
        user_school,
        coach: setup.coach.clone(),
        roster,
        staff,
        staff_candidates,
        career: CareerStats {
            wins: 0,
            losses: 0,
            titles: 0,
            experience: 1,
            reputation: 50,
        },
        league_schools,
        schedule,
        recruitment_pool: Vec::new(),
        scouting_points: setup.scouting_points,
        recruiting_actions: RECRUITING_ACTIONS_PER_WEEK,
        active_game: None,
        history: Vec::new(),
    }
}

/// Sign a prospect outright: move them from the pool to the roster.
pub fn recruit(mut state: GameState, prospect_id: &str) -> GameState {
    if let Some(index) = state.recruitment_pool.iter().position(|p| p.id == prospect_id) {
        let prospect = state.recruitment_pool.remove(index);
        state.roster.push(prospect);
    }
    state
}

/// Result of a recruiting pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecruitOutcome {
    /// The prospect joined the roster.
    Committed,
    /// The prospect turned the program down and cooled on it.
    Declined,
    /// No prospect with that id.
    NotFound,
}

/// Odds, 0..=1, that `prospect` commits to a program led by `archetype`.
#[must_use]
pub fn commit_odds(prospect: &Player, archetype: CoachArchetype) -> f64 {
    let bonus = if archetype == CoachArchetype::Recruiter {
        RECRUITER_BONUS
    } else {
        0
    };
    f64::from(u32::from(prospect.interest_level) + bonus) / 100.0
}

/// Pitch a prospect.
///
/// Commits join the roster fully scouted; a refusal costs the prospect 15
/// interest. Each pitch spends one weekly recruiting action.
pub fn attempt_recruit<R: Rng + ?Sized>(
    mut state: GameState,
    prospect_id: &str,
    rng: &mut R,
) -> (GameState, RecruitOutcome) {
    let Some(index) = state.recruitment_pool.iter().position(|p| p.id == prospect_id) else {
        return (state, RecruitOutcome::NotFound);
    };
    state.recruiting_actions = state.recruiting_actions.saturating_sub(1);

    let odds = commit_odds(&state.recruitment_pool[index], state.coach.archetype);
    if dice::chance(rng, odds) {
        let mut prospect = state.recruitment_pool.remove(index);
        prospect.scouting_level = MAX_SCOUTING_LEVEL;
        state.roster.push(prospect);
        (state, RecruitOutcome::Committed)
    } else {
        let prospect = &mut state.recruitment_pool[index];
        prospect.interest_level = prospect.interest_level.saturating_sub(DECLINED_INTEREST_PENALTY);
        (state, RecruitOutcome::Declined)
    }
}

/// Release a player from the roster.
pub fn cut(mut state: GameState, player_id: &str) -> GameState {
    state.roster.retain(|p| p.id != player_id);
    state
}

/// Spend a scouting point on a prospect, revealing one more level.
pub fn scout(mut state: GameState, prospect_id: &str) -> GameState {
    let Some(prospect) = state.recruitment_pool.iter_mut().find(|p| p.id == prospect_id) else {
        return state;
    };
    if prospect.scouting_level < MAX_SCOUTING_LEVEL {
        prospect.scouting_level += 1;
    }
    state.scouting_points = state.scouting_points.saturating_sub(1);
    state
}

/// Overall range shown for a player at their scouting level.
#[must_use]
pub fn visible_overall_range(player: &Player) -> (u8, u8) {
    let level = usize::from(player.scouting_level.min(MAX_SCOUTING_LEVEL));
    let margin = SCOUTING_MARGINS[level];
    (
        player.overall.saturating_sub(margin).max(MIN_OVERALL),
        player.overall.saturating_add(margin).min(MAX_OVERALL),
    )
}

/// Budget cost of hiring `candidate`.
#[must_use]
pub fn hire_cost(candidate: &Staff) -> i64 {
    i64::from(candidate.skill) * HIRE_COST_PER_SKILL
}

/// Hire a candidate from the board, replacing the incumbent in that role.
pub fn hire_staff(mut state: GameState, candidate_id: &str) -> GameState {
    let Some(index) = state.staff_candidates.iter().position(|s| s.id == candidate_id) else {
        return state;
    };
    let hire = state.staff_candidates.remove(index);
    state.user_school.budget -= hire_cost(&hire);
    state.staff.retain(|s| s.role != hire.role);
    debug!(role = ?hire.role, name = %hire.name, "Hired staff");
    state.staff.push(hire);
    state
}

/// Set a staff member's style dial, clamped to 0-100.
pub fn set_staff_style(mut state: GameState, staff_id: &str, value: u8) -> GameState {
    if let Some(member) = state.staff.iter_mut().find(|s| s.id == staff_id) {
        member.style_value = value.min(100);
    }
    state
}

/// Reorder the roster to follow `order`.
///
/// Ids not on the roster are skipped; players missing from `order` keep
/// their relative order after the listed ones.
pub fn reorder_roster(mut state: GameState, order: &[String]) -> GameState {
    let mut remaining = std::mem::take(&mut state.roster);
    let mut roster = Vec::with_capacity(remaining.len());
    for id in order {
        if let Some(index) = remaining.iter().position(|p| &p.id == id) {
            roster.push(remaining.remove(index));
        }
    }
    roster.append(&mut remaining);
    state.roster = roster;
    state
}

/// Key for automatic depth-chart sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthOrder {
    /// Best current players first.
    Overall,
    /// Highest ceilings first.
    Potential,
}

/// Group the roster by position label and rank each group.
pub fn auto_depth_chart(mut state: GameState, order: DepthOrder) -> GameState {
    state.roster.sort_by(|a, b| {
        let by_position = a.position.label().cmp(b.position.label());
        let by_rank = match order {
            DepthOrder::Overall => b.overall.cmp(&a.overall),
            DepthOrder::Potential => b.potential.cmp(&a.potential),
        };
        by_position.then(by_rank)
    });
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Position;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn career(archetype: CoachArchetype) -> (GameState, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let mut setup = CareerSetup::default();
        setup.coach.archetype = archetype;
        let mut state = create_career(&setup, &mut rng);
        state.recruitment_pool = (0..5)
            .map(|_| generate_player(&mut rng, Some(10), None, None))
            .collect();
        (state, rng)
    }

    #[test]
    fn test_create_career_shape() {
        let (state, _) = career(CoachArchetype::Tactician);
        assert_eq!(state.year, 2024);
        assert_eq!((state.phase, state.week), (SeasonPhase::Preseason, 1));
        assert_eq!(state.roster.len(), 51);
        assert_eq!(state.roster.iter().filter(|p| p.position == Position::Quarterback).count(), 3);
        assert!(state.roster.iter().all(|p| p.scouting_level == 3));
        assert_eq!(state.league_schools.len(), 9);
        assert_eq!(state.staff.len(), 4);
        assert_eq!(state.schedule.len(), 11);
        assert_eq!(state.scouting_points, 10);
        assert_eq!(state.career.reputation, 50);
        assert_eq!(state.user_school.name, "East High Eagles");
        assert_eq!(state.user_school.colors.primary, "#1e40af");
        assert!(state.active_game.is_none());
    }

    #[test]
    fn test_motivator_raises_morale() {
        let mut a = ChaCha8Rng::seed_from_u64(5);
        let mut b = ChaCha8Rng::seed_from_u64(5);
        let mut setup = CareerSetup::default();
        setup.coach.archetype = CoachArchetype::Tactician;
        let plain = create_career(&setup, &mut a);
        setup.coach.archetype = CoachArchetype::Motivator;
        let fired_up = create_career(&setup, &mut b);
        for (p, q) in plain.roster.iter().zip(&fired_up.roster) {
            assert_eq!(q.morale, (p.morale + 15.0).min(100.0));
        }
    }

    #[test]
    fn test_recruit_moves_prospect() {
        let (state, _) = career(CoachArchetype::Tactician);
        let id = state.recruitment_pool[0].id.clone();
        let next = recruit(state.clone(), &id);
        assert_eq!(next.roster.len(), state.roster.len() + 1);
        assert!(next.prospect(&id).is_none());
        assert!(next.player(&id).is_some());
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let (state, mut rng) = career(CoachArchetype::Tactician);
        assert_eq!(recruit(state.clone(), "nope"), state);
        assert_eq!(cut(state.clone(), "nope"), state);
        assert_eq!(scout(state.clone(), "nope"), state);
        assert_eq!(hire_staff(state.clone(), "nope"), state);
        assert_eq!(set_staff_style(state.clone(), "nope", 90), state);
        let (same, outcome) = attempt_recruit(state.clone(), "nope", &mut rng);
        assert_eq!(outcome, RecruitOutcome::NotFound);
        assert_eq!(same, state);
    }

    #[test]
    fn test_attempt_recruit_outcomes() {
        let (mut state, mut rng) = career(CoachArchetype::Recruiter);
        state.recruitment_pool[0].interest_level = 80; // 100% with the Recruiter bonus
        state.recruitment_pool[1].interest_level = 0;
        let sure = state.recruitment_pool[0].id.clone();
        let cold = state.recruitment_pool[1].id.clone();

        let (state, outcome) = attempt_recruit(state, &sure, &mut rng);
        assert_eq!(outcome, RecruitOutcome::Committed);
        assert_eq!(state.player(&sure).unwrap().scouting_level, 3);
        assert_eq!(state.recruiting_actions, 4);

        let mut state = state;
        state.coach.archetype = CoachArchetype::Tactician;
        let (state, outcome) = attempt_recruit(state, &cold, &mut rng);
        assert_eq!(outcome, RecruitOutcome::Declined);
        assert_eq!(state.prospect(&cold).unwrap().interest_level, 0);
    }

    #[test]
    fn test_declined_interest_drops() {
        let (mut state, mut rng) = career(CoachArchetype::Tactician);
        state.recruitment_pool[0].interest_level = 40;
        let id = state.recruitment_pool[0].id.clone();
        let (state, outcome) = attempt_recruit(state, &id, &mut rng);
        match outcome {
            RecruitOutcome::Declined => {
                let prospect = state.prospect(&id).unwrap();
                assert_eq!(prospect.interest_level, 25);
                assert!((commit_odds(prospect, CoachArchetype::Recruiter) - 0.45).abs() < 1e-9);
            }
            RecruitOutcome::Committed => assert!(state.player(&id).is_some()),
            RecruitOutcome::NotFound => panic!("prospect vanished"),
        }
    }

    #[test]
    fn test_cut_removes_player() {
        let (state, _) = career(CoachArchetype::Tactician);
        let id = state.roster[3].id.clone();
        let next = cut(state, &id);
        assert_eq!(next.roster.len(), 50);
        assert!(next.player(&id).is_none());
    }

    #[test]
    fn test_scout_levels_and_points() {
        let (state, _) = career(CoachArchetype::Tactician);
        let id = state.recruitment_pool[0].id.clone();
        let mut next = state;
        for _ in 0..4 {
            next = scout(next, &id);
        }
        assert_eq!(next.prospect(&id).unwrap().scouting_level, 3);
        assert_eq!(next.scouting_points, 6);
    }

    #[test]
    fn test_visible_range_narrows() {
        let (state, _) = career(CoachArchetype::Tactician);
        let mut p = state.recruitment_pool[0].clone();
        p.overall = 60;
        p.scouting_level = 0;
        assert_eq!(visible_overall_range(&p), (48, 72));
        p.scouting_level = 2;
        assert_eq!(visible_overall_range(&p), (57, 63));
        p.scouting_level = 3;
        assert_eq!(visible_overall_range(&p), (60, 60));
        p.overall = 30;
        p.scouting_level = 0;
        assert_eq!(visible_overall_range(&p), (25, 42));
    }

    #[test]
    fn test_hire_replaces_incumbent() {
        let (state, _) = career(CoachArchetype::Tactician);
        let candidate = state
            .staff_candidates
            .iter()
            .find(|s| s.role == StaffRole::StrengthCoach)
            .unwrap()
            .clone();
        let budget = state.user_school.budget;
        let next = hire_staff(state, &candidate.id);
        assert_eq!(next.staff.len(), 4);
        let coach = next.staff.iter().find(|s| s.role == StaffRole::StrengthCoach).unwrap();
        assert_eq!(coach.id, candidate.id);
        assert_eq!(next.user_school.budget, budget - i64::from(candidate.skill) * 150);
        assert!(next.staff_candidates.iter().all(|s| s.id != candidate.id));
    }

    #[test]
    fn test_style_is_clamped() {
        let (state, _) = career(CoachArchetype::Tactician);
        let id = state.staff[0].id.clone();
        let next = set_staff_style(state, &id, 250);
        assert_eq!(next.staff[0].style_value, 100);
        let next = set_staff_style(next, &id, 10);
        assert_eq!(next.staff[0].style_value, 10);
    }

    #[test]
    fn test_reorder_roster() {
        let (state, _) = career(CoachArchetype::Tactician);
        let last = state.roster[50].id.clone();
        let first = state.roster[0].id.clone();
        let next = reorder_roster(state.clone(), &[last.clone(), "ghost".into(), first.clone()]);
        assert_eq!(next.roster.len(), 51);
        assert_eq!(next.roster[0].id, last);
        assert_eq!(next.roster[1].id, first);
        assert_eq!(next.roster[2].id, state.roster[1].id);
    }

    #[test]
    fn test_auto_depth_chart() {
        let (state, _) = career(CoachArchetype::Tactician);
        let next = auto_depth_chart(state, DepthOrder::Overall);
        for pair in next.roster.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.position.label() <= b.position.label());
            if a.position == b.position {
                assert!(a.overall >= b.overall);
            }
        }
    }
}
