//! Caller-side preconditions for the career reducers.
//!
//! The reducers in [`crate::commands`] trust their caller. These checks are
//! what the caller runs first; [`crate::session::Career`] runs them for
//! every command it applies.

use crate::commands::hire_cost;
use crate::constants::{MAX_SCOUTING_LEVEL, ROSTER_CAP};
use crate::error::PolicyViolation;
use crate::state::GameState;

/// Result of a policy check.
pub type PolicyResult = std::result::Result<(), PolicyViolation>;

/// A prospect may be signed while the roster has room and, for pitches,
/// while weekly recruiting actions remain.
///
/// # Errors
///
/// [`PolicyViolation::RosterFull`] or [`PolicyViolation::NoRecruitingActions`].
pub fn check_recruit(state: &GameState, spends_action: bool) -> PolicyResult {
    if state.roster.len() >= ROSTER_CAP {
        return Err(PolicyViolation::RosterFull { cap: ROSTER_CAP });
    }
    if spends_action && state.recruiting_actions == 0 {
        return Err(PolicyViolation::NoRecruitingActions);
    }
    Ok(())
}

/// A prospect may be scouted while points remain and the prospect is not
/// already fully scouted. Unknown prospects pass; the reducer ignores them.
///
/// # Errors
///
/// [`PolicyViolation::NoScoutingPoints`] or [`PolicyViolation::AlreadyScouted`].
pub fn check_scout(state: &GameState, prospect_id: &str) -> PolicyResult {
    if state.scouting_points == 0 {
        return Err(PolicyViolation::NoScoutingPoints);
    }
    match state.prospect(prospect_id) {
        Some(p) if p.scouting_level >= MAX_SCOUTING_LEVEL => Err(PolicyViolation::AlreadyScouted),
        _ => Ok(()),
    }
}

/// A candidate may be hired when the school can cover the cost.
///
/// # Errors
///
/// [`PolicyViolation::InsufficientBudget`].
pub fn check_hire(state: &GameState, candidate_id: &str) -> PolicyResult {
    let Some(candidate) = state.staff_candidates.iter().find(|s| s.id == candidate_id) else {
        return Ok(());
    };
    let cost = hire_cost(candidate);
    let budget = state.user_school.budget;
    if cost > budget {
        return Err(PolicyViolation::InsufficientBudget { cost, budget });
    }
    Ok(())
}

/// Style dials run 0-100.
///
/// # Errors
///
/// [`PolicyViolation::StyleOutOfRange`].
pub const fn check_style(value: u8) -> PolicyResult {
    if value > 100 {
        return Err(PolicyViolation::StyleOutOfRange(value));
    }
    Ok(())
}
