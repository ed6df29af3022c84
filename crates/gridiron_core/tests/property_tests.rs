//! Property-based tests over generators, the season machine and live games.

use gridiron_core::commands::create_career;
use gridiron_core::data::CareerSetup;
use gridiron_core::generators::{generate_player, generate_prospect};
use gridiron_core::live_game::{
    execute_coach_play, execute_single_play, ActiveGame, PlayCall, PlayCallModifier, Side,
    LONG_PASS_BASE_ODDS,
};
use gridiron_core::player::RecruitSource;
use gridiron_core::season::advance_week;
use gridiron_core::session::Career;
use gridiron_core::state::{CoachArchetype, GameState};
use gridiron_test_utils::determinism::strategies::{
    arb_archetype, arb_phase, arb_play_call, arb_position, arb_seed,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn fresh(seed: u64) -> (GameState, ChaCha8Rng) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let state = create_career(&CareerSetup::default(), &mut rng);
    (state, rng)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_generated_players_in_bounds(
        seed in arb_seed(),
        grade in proptest::option::of(8u8..=12),
        position in arb_position(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let p = generate_player(&mut rng, grade, Some(position.into()), None);
        prop_assert!((25..=99).contains(&p.overall));
        prop_assert!(p.potential >= p.overall);
        prop_assert!(p.academics >= 1.5 && p.academics <= 4.0);
        prop_assert_eq!(p.position, position);
        if p.grade == 8 {
            prop_assert_eq!(p.source, RecruitSource::MiddleSchool);
        }
    }

    #[test]
    fn prop_eighth_graders_come_from_middle_school(seed in arb_seed()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let p = generate_player(&mut rng, Some(8), None, Some(RecruitSource::TransferPortal));
        prop_assert_eq!(p.source, RecruitSource::MiddleSchool);
    }

    #[test]
    fn prop_prospects_start_unscouted(seed in arb_seed()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let p = generate_prospect(&mut rng);
        prop_assert_eq!(p.scouting_level, 0);
        prop_assert!(p.interest_level <= 100);
    }

    #[test]
    fn prop_advance_week_moves_clock_once(
        seed in arb_seed(),
        phase in arb_phase(),
        week in 1u8..=9,
    ) {
        let (mut state, mut rng) = fresh(seed);
        state.phase = phase;
        state.week = week.min(phase.weeks());
        let before = (state.phase, state.week);
        let next = advance_week(state, &mut rng);
        if before.1 < before.0.weeks() {
            prop_assert_eq!((next.phase, next.week), (before.0, before.1 + 1));
        } else {
            prop_assert_eq!(next.week, 1);
            prop_assert_ne!(next.phase, before.0);
        }
        for p in &next.roster {
            prop_assert!((25..=99).contains(&p.overall));
            if p.injury_weeks == 0 {
                prop_assert!(!p.is_out());
            }
        }
    }

    #[test]
    fn prop_live_game_invariants(
        seed in arb_seed(),
        calls in proptest::collection::vec(arb_play_call(), 0..40),
        archetype in arb_archetype(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut game = ActiveGame::new("reg-1", "Riverdale", Side::Home);
        let mut calls = calls.into_iter();
        for _ in 0..400 {
            game = if game.waiting_for_coach {
                let call = calls.next().unwrap_or_else(|| PlayCall::suggested(&game));
                execute_coach_play(game, call, 70, &archetype, &mut rng)
            } else {
                execute_single_play(game, &mut rng)
            };
            prop_assert!(game.play_history.len() <= 50);
            prop_assert!((1..=4).contains(&game.quarter));
            prop_assert!(game.time_remaining <= 480);
            prop_assert!((1..=4).contains(&game.down));
            prop_assert_eq!(game.home_score % 7, 0);
            prop_assert_eq!(game.away_score % 7, 0);
            if game.is_game_over {
                break;
            }
        }
        let over = game.clone();
        let after = execute_single_play(game, &mut rng);
        if over.is_game_over {
            prop_assert_eq!(after, over);
        }
    }

    #[test]
    fn prop_snapshot_roundtrip(seed in arb_seed(), weeks in 0usize..6) {
        let (mut state, mut rng) = fresh(seed);
        for _ in 0..weeks {
            state = advance_week(state, &mut rng);
        }
        let json = serde_json::to_string(&state).unwrap();
        let from_json: GameState = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(&from_json, &state);

        let career = Career::from_state(state, seed);
        let bytes = career.serialize().unwrap();
        let restored = Career::deserialize(&bytes).unwrap();
        prop_assert_eq!(restored.state(), career.state());
        prop_assert_eq!(restored.state_hash(), career.state_hash());
    }
}

#[test]
fn test_coach_archetypes_share_base_odds() {
    let base = LONG_PASS_BASE_ODDS;
    assert!((CoachArchetype::Recruiter.long_pass_odds(base, 80) - base).abs() < 1e-12);
    assert!((CoachArchetype::Motivator.long_pass_odds(base, 80) - base).abs() < 1e-12);
    assert!((CoachArchetype::Tactician.long_pass_odds(base, 80) - 0.78).abs() < 1e-12);
}
