//! Weekly season advancement.
//!
//! [`advance_week`] is the only calendar transition. Each call runs, in
//! order:
//!
//! 1. Match resolution (fast-sim of this week's unplayed matchup, if any)
//! 2. Weekly player mutation (injuries, progression, academics, morale)
//! 3. Recruiting refresh (new prospects, scouting points, staff board)
//! 4. Clock transition (week/phase/year, playoff bracket, season reset)
//!
//! All steps are total: vacant staff roles read as the neutral style and
//! an empty roster rates 0.

use rand::Rng;
use tracing::{debug, info};

use crate::constants::{
    CANDIDATES_PER_ROLE, CHAMPION_WIN_THRESHOLD, IN_SEASON_POOL_SIZE, IN_SEASON_SCOUTING_POINTS,
    MAX_ACADEMICS, MAX_OVERALL, OFFSEASON_POOL_SIZE, OFFSEASON_SCOUTING_POINTS,
    PLAYOFF_WIN_THRESHOLD, RECRUITING_ACTIONS_PER_WEEK,
};
use crate::dice;
use crate::generators::{generate_prospect, generate_staff_candidates};
use crate::live_game::{ActiveGame, Side};
use crate::player::{InjuryStatus, Player, PlayerTrait, Position, SeasonStats};
use crate::ratings::team_rating;
use crate::schedule::{generate_playoffs, generate_schedule_for_year};
use crate::staff::{style_of, StaffRole};
use crate::state::{GameState, MatchKind, SeasonPhase, SeasonRecord};

/// Advance the career by one week.
///
/// # Example
///
/// ```
/// use gridiron_core::commands::create_career;
/// use gridiron_core::data::CareerSetup;
/// use gridiron_core::season::advance_week;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let state = create_career(&CareerSetup::default(), &mut rng);
/// assert_eq!(state.week, 1);
///
/// let next = advance_week(state, &mut rng);
/// assert_eq!(next.week, 2);
/// ```
pub fn advance_week<R: Rng + ?Sized>(mut state: GameState, rng: &mut R) -> GameState {
    resolve_scheduled_match(&mut state, rng);
    apply_weekly_mutation(&mut state, rng);
    refresh_recruiting(&mut state, rng);
    advance_clock(&mut state, rng);
    state
}

fn score_roll<R: Rng + ?Sized>(rng: &mut R, variance: f64, rating_edge: f64) -> u32 {
    (14.0 + dice::unit(rng) * 20.0 * (1.0 + variance) + rating_edge)
        .round()
        .max(0.0) as u32
}

/// Fast-sim this week's unplayed matchup, if there is one.
fn resolve_scheduled_match<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    let Some(matchup_id) = state.current_matchup().map(|m| m.id.clone()) else {
        return;
    };

    let user_rating = f64::from(team_rating(&state.roster));
    let oc = style_of(&state.staff, StaffRole::OffensiveCoordinator);
    let dc = style_of(&state.staff, StaffRole::DefensiveCoordinator);
    let variance = (f64::from(oc) + f64::from(dc)) / 100.0;

    let user_id = state.user_school.id.clone();
    let Some(matchup) = state.schedule.iter_mut().find(|m| m.id == matchup_id) else {
        return;
    };
    let edge = (user_rating - f64::from(matchup.opponent_rating)) / 2.0;
    let user_score = score_roll(rng, variance, edge);
    let opponent_score = score_roll(rng, variance, -edge);

    if matchup.is_home(&user_id) {
        matchup.home_score = Some(user_score);
        matchup.away_score = Some(opponent_score);
    } else {
        matchup.home_score = Some(opponent_score);
        matchup.away_score = Some(user_score);
    }
    matchup.played = true;
    let counts_for_record = matchup.summary != MatchKind::Scrimmage;

    debug!(
        matchup = %matchup_id,
        user_score,
        opponent_score,
        variance,
        "Resolved scheduled match"
    );

    let phase = state.phase;
    for player in state.roster.iter_mut().filter(|p| !p.is_out()) {
        credit_fast_sim_stats(player, phase, user_score, rng);
    }

    if counts_for_record {
        record_result(state, user_score, opponent_score);
    }
}

fn record_result(state: &mut GameState, user_score: u32, opponent_score: u32) {
    if user_score > opponent_score {
        state.career.wins += 1;
    } else {
        state.career.losses += 1;
    }
}

/// Role-based box score for a fast-simmed game, scaled by the user's points.
fn credit_fast_sim_stats<R: Rng + ?Sized>(
    player: &mut Player,
    phase: SeasonPhase,
    user_score: u32,
    rng: &mut R,
) {
    let points = f64::from(user_score);
    let stats = player.stats.get_mut(phase);
    stats.games_played += 1;

    match player.position {
        Position::Quarterback => {
            stats.passing_yards += (points * (5.0 + dice::unit(rng) * 5.0)).round() as u32;
            stats.passing_tds += user_score / 10;
        }
        Position::RunningBack => {
            stats.rushing_yards += (points * (2.0 + dice::unit(rng) * 3.0)).round() as u32;
            stats.rushing_tds += u32::from(dice::chance(rng, 0.4));
        }
        Position::WideReceiver | Position::TightEnd => {
            stats.receiving_yards += (points * (3.0 + dice::unit(rng) * 4.0)).round() as u32;
            stats.receiving_tds += u32::from(dice::chance(rng, 0.3));
        }
        position if position.is_defense() => {
            stats.tackles += dice::roll(rng, 0, 7) as u32;
            stats.sacks += u32::from(dice::chance(rng, 0.1));
            stats.interceptions_caught += u32::from(dice::chance(rng, 0.05));
        }
        _ => {}
    }
}

/// Role-based box score for an interactively played game, scaled by the
/// team's actual yardage.
fn credit_live_game_stats<R: Rng + ?Sized>(
    player: &mut Player,
    phase: SeasonPhase,
    user_score: u32,
    pass_yards: u32,
    rush_yards: u32,
    rng: &mut R,
) {
    let overall = f64::from(player.overall);
    let stats = player.stats.get_mut(phase);
    stats.games_played += 1;

    match player.position {
        Position::Quarterback => {
            stats.passing_yards += pass_yards;
            stats.passing_tds += user_score / 10;
        }
        Position::RunningBack => {
            stats.rushing_yards += (f64::from(rush_yards) * overall / 300.0).round() as u32;
            stats.rushing_tds += u32::from(dice::chance(rng, 0.3));
        }
        Position::WideReceiver | Position::TightEnd => {
            stats.receiving_yards += (f64::from(pass_yards) * overall / 400.0).round() as u32;
            stats.receptions += dice::roll(rng, 0, 3) as u32;
            stats.receiving_tds += u32::from(dice::chance(rng, 0.2));
        }
        position if position.is_defense() => {
            stats.tackles += dice::roll(rng, 2, 7) as u32;
            stats.sacks += u32::from(dice::chance(rng, 0.08));
            stats.interceptions_caught += u32::from(dice::chance(rng, 0.04));
        }
        _ => {}
    }
}

/// Fold a finished interactive game back into the career.
///
/// Marks the matchup played with the final score, credits every available
/// player, updates the record (scrimmages excluded) and clears the live
/// game. A game that is not over, or whose matchup is unknown, leaves the
/// state unchanged.
pub fn merge_finished_game<R: Rng + ?Sized>(
    mut state: GameState,
    game: &ActiveGame,
    rng: &mut R,
) -> GameState {
    if !game.is_game_over {
        return state;
    }
    let user_id = state.user_school.id.clone();
    let Some(matchup) = state.schedule.iter_mut().find(|m| m.id == game.matchup_id) else {
        return state;
    };
    matchup.home_score = Some(game.home_score);
    matchup.away_score = Some(game.away_score);
    matchup.played = true;

    let user_side = if matchup.is_home(&user_id) { Side::Home } else { Side::Away };
    let counts_for_record = matchup.summary != MatchKind::Scrimmage;
    let user_score = game.score(user_side);
    let opponent_score = game.score(user_side.flip());
    let team = *game.game_stats.side(user_side);

    let phase = state.phase;
    for player in state.roster.iter_mut().filter(|p| !p.is_out()) {
        credit_live_game_stats(player, phase, user_score, team.pass_yards, team.rush_yards, rng);
    }
    if counts_for_record {
        record_result(&mut state, user_score, opponent_score);
    }
    state.active_game = None;

    info!(
        matchup = %game.matchup_id,
        user_score,
        opponent_score,
        "Merged interactive game"
    );
    state
}

/// Injuries, progression, academics and morale for every rostered player.
fn apply_weekly_mutation<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    let intensity = f64::from(style_of(&state.staff, StaffRole::StrengthCoach)) / 100.0;
    let strictness = f64::from(style_of(&state.staff, StaffRole::AcademicAdvisor)) / 100.0;
    let phase = state.phase;

    let mut injuries = 0u32;
    let mut progressed = 0u32;
    for player in &mut state.roster {
        player.last_ovr_change = 0;

        if player.injury_weeks > 0 {
            player.injury_weeks -= 1;
        }
        if player.injury_weeks == 0 && player.is_out() {
            player.injury_status = InjuryStatus::Healthy;
        }

        if phase.has_contact() && player.injury_status == InjuryStatus::Healthy {
            let prone = if player.has_trait(PlayerTrait::InjuryProne) { 0.08 } else { 0.0 };
            if dice::chance(rng, 0.01 + intensity * 0.05 + prone) {
                player.injury_status = InjuryStatus::Out;
                player.injury_weeks = dice::roll(rng, 1, 4) as u8;
                injuries += 1;
            }
        }

        if phase.has_training() && dice::chance(rng, 0.1 + intensity * 0.3) {
            let gain = if player.potential > 85 && dice::chance(rng, 0.3) { 2 } else { 1 };
            let before = player.overall;
            player.overall = (player.overall + gain).min(MAX_OVERALL);
            player.potential = player.potential.max(player.overall);
            player.last_ovr_change = player.overall - before;
            progressed += 1;
        }

        player.academics = (player.academics + strictness * 0.1).min(MAX_ACADEMICS);
        player.morale = (player.morale - strictness * 5.0).max(0.0);
    }

    debug!(
        year = state.year,
        week = state.week,
        phase = %phase,
        injuries,
        progressed,
        "Applied weekly player updates"
    );
}

/// New prospects, scouting points, recruiting pitches and staff board.
fn refresh_recruiting<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    let offseason = state.phase == SeasonPhase::Offseason;
    let count = if offseason { OFFSEASON_POOL_SIZE } else { IN_SEASON_POOL_SIZE };
    state.recruitment_pool = (0..count).map(|_| generate_prospect(rng)).collect();
    state.scouting_points = if offseason {
        OFFSEASON_SCOUTING_POINTS
    } else {
        IN_SEASON_SCOUTING_POINTS
    };
    state.recruiting_actions = RECRUITING_ACTIONS_PER_WEEK;
    state.staff_candidates = generate_staff_candidates(rng, CANDIDATES_PER_ROLE);
}

/// Move the calendar forward one week, rolling phases and years.
fn advance_clock<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    if state.week < state.phase.weeks() {
        state.week += 1;
        return;
    }

    state.week = 1;
    let leaving = state.phase;
    match leaving {
        SeasonPhase::Offseason => state.phase = SeasonPhase::Preseason,
        SeasonPhase::Preseason => state.phase = SeasonPhase::RegularSeason,
        SeasonPhase::RegularSeason if state.career.wins >= PLAYOFF_WIN_THRESHOLD => {
            state.phase = SeasonPhase::Playoffs;
            let bracket = generate_playoffs(rng, &state.user_school, &state.league_schools);
            state.schedule.extend(bracket);
            info!(year = state.year, wins = state.career.wins, "Qualified for the playoffs");
        }
        SeasonPhase::RegularSeason | SeasonPhase::Playoffs => {
            state.phase = SeasonPhase::Offseason;
            reset_season(state, leaving, rng);
        }
    }
    info!(year = state.year, phase = %state.phase, "Entered new phase");
}

/// Close out the year: log history, graduate seniors, promote everyone
/// else and build next year's schedule.
///
/// `leaving` is the phase the season ended in; a champion is only crowned
/// coming out of the playoffs.
pub fn reset_season<R: Rng + ?Sized>(state: &mut GameState, leaving: SeasonPhase, rng: &mut R) {
    let wins = state.career.wins;
    let champion = leaving == SeasonPhase::Playoffs && wins > CHAMPION_WIN_THRESHOLD;
    let achievement = if champion {
        "State Champion"
    } else if wins >= PLAYOFF_WIN_THRESHOLD {
        "Playoff Appearance"
    } else {
        "Rebuilding Year"
    };
    state.history.push(SeasonRecord {
        year: state.year,
        record: format!("{}-{}", wins, state.career.losses),
        achievement: achievement.to_string(),
        school_name: state.user_school.name.clone(),
    });

    state.year += 1;
    if champion {
        state.career.titles += 1;
    }
    state.career.wins = 0;
    state.career.losses = 0;

    let before = state.roster.len();
    state.roster.retain(|p| p.grade < 12);
    let graduated = before - state.roster.len();
    for player in &mut state.roster {
        player.grade += 1;
        player.stats = SeasonStats::default();
        player.last_ovr_change = 0;
    }
    state.schedule = generate_schedule_for_year(rng, &state.user_school, &state.league_schools);

    info!(
        year = state.year,
        graduated,
        returning = state.roster.len(),
        achievement,
        "Season reset"
    );
}
