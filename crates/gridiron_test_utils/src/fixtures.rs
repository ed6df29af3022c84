//! Test fixtures and helpers.
//!
//! Seeded careers, hand-tuned players and shortcuts for putting a career
//! at a given point on the calendar.

use gridiron_core::commands::create_career;
use gridiron_core::data::CareerSetup;
use gridiron_core::generators::generate_player;
use gridiron_core::player::{InjuryStatus, Player, Position};
use gridiron_core::season::advance_week;
use gridiron_core::session::Career;
use gridiron_core::state::{CoachArchetype, CoachProfile, GameState, SeasonPhase};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Default setup with a fixed seed.
#[must_use]
pub fn setup_with_seed(seed: u64) -> CareerSetup {
    CareerSetup::default().with_seed(seed)
}

/// Setup led by a coach of the given archetype.
#[must_use]
pub fn setup_for(archetype: CoachArchetype, seed: u64) -> CareerSetup {
    let coach = CoachProfile {
        name: "Coach Taylor".to_string(),
        appearance: "visor".to_string(),
        archetype,
    };
    CareerSetup::new(coach, "Dillon Panthers").with_seed(seed)
}

/// A fresh session career.
#[must_use]
pub fn new_career(seed: u64) -> Career {
    Career::new(&setup_with_seed(seed))
}

/// A fresh career state and the generator that built it.
#[must_use]
pub fn career_state(seed: u64) -> (GameState, ChaCha8Rng) {
    let setup = setup_with_seed(seed);
    let mut rng = ChaCha8Rng::seed_from_u64(setup.seed);
    let state = create_career(&setup, &mut rng);
    (state, rng)
}

/// Advance `weeks` times.
#[must_use]
pub fn advance_weeks(mut state: GameState, weeks: usize, rng: &mut ChaCha8Rng) -> GameState {
    for _ in 0..weeks {
        state = advance_week(state, rng);
    }
    state
}

/// Advance until the calendar reads `phase`, week 1.
///
/// Gives up after two full years so a career that never reaches the
/// playoffs cannot loop forever; check the returned phase.
#[must_use]
pub fn advance_to_phase(mut state: GameState, phase: SeasonPhase, rng: &mut ChaCha8Rng) -> GameState {
    for _ in 0..44 {
        if state.phase == phase && state.week == 1 {
            break;
        }
        state = advance_week(state, rng);
    }
    state
}

/// A generated player with the given position, grade and overall.
#[must_use]
pub fn player(position: Position, grade: u8, overall: u8) -> Player {
    let mut rng = ChaCha8Rng::seed_from_u64(u64::from(grade) * 100 + u64::from(overall));
    let mut p = generate_player(&mut rng, Some(grade), Some(position.into()), None);
    p.overall = overall;
    p.potential = p.potential.max(overall);
    p
}

/// An injured player, out for `weeks`.
#[must_use]
pub fn injured(position: Position, weeks: u8) -> Player {
    let mut p = player(position, 11, 60);
    p.injury_status = InjuryStatus::Out;
    p.injury_weeks = weeks;
    p
}

/// A full-strength roster: one player per position at `overall`.
#[must_use]
pub fn uniform_roster(overall: u8) -> Vec<Player> {
    Position::ALL
        .iter()
        .map(|&position| player(position, 11, overall))
        .collect()
}
