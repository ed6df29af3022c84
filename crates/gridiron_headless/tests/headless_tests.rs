//! End-to-end tests for the headless runner.
//!
//! These drive the protocol loop and the batch runner the way an external
//! controller or CI job would.

use gridiron_core::replay::{Replay, ReplayPlayer};
use gridiron_core::state::{CoachArchetype, SeasonPhase};
use gridiron_headless::protocol::Response;
use gridiron_headless::runner::{HeadlessConfig, HeadlessRunner};
use gridiron_headless::{play_career, run_batch, BatchConfig, Strategy};
use gridiron_test_utils::fixtures::{setup_for, setup_with_seed};

fn responses(runner: &mut HeadlessRunner, lines: &[&str]) -> Vec<Response> {
    lines.iter().flat_map(|line| runner.handle_line(line)).collect()
}

// =============================================================================
// Protocol Sessions
// =============================================================================

mod protocol {
    use super::*;

    /// A controller can coach a scrimmage from kickoff to the final whistle.
    #[test]
    fn test_coach_scrimmage_over_protocol() {
        let mut runner = HeadlessRunner::new(&setup_with_seed(31), HeadlessConfig::default()).unwrap();
        for _ in 0..4 {
            runner.handle_line(r#"{"cmd":"advance_week"}"#);
        }
        let matchup = runner.career().state().current_matchup().unwrap().id.clone();
        runner.handle_line(&format!(r#"{{"cmd":"start_game","matchup_id":"{matchup}"}}"#));

        let mut guard = 0;
        while runner.career().active_game().is_some_and(|g| !g.is_game_over) {
            runner.handle_line(r#"{"cmd":"sim_to_decision"}"#);
            let Some(game) = runner.career().active_game() else {
                break;
            };
            if !game.is_game_over {
                let call = if game.can_punt() { "PUNT" } else { "RUN" };
                let line = format!(r#"{{"cmd":"call_play","call":"{call}"}}"#);
                assert!(matches!(
                    runner.handle_line(&line).as_slice(),
                    [Response::Ack { .. }]
                ));
            }
            guard += 1;
            assert!(guard < 1000, "game never ended");
        }

        let finish = responses(&mut runner, &[r#"{"cmd":"finish_game"}"#, r#"{"cmd":"query"}"#]);
        assert!(matches!(finish[0], Response::Ack { .. }));
        match &finish[1] {
            Response::State(summary) => {
                assert!(!summary.game_in_progress);
                // Scrimmages stay off the record.
                assert_eq!((summary.wins, summary.losses), (0, 0));
                assert_eq!(summary.current_matchup, None);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    /// Recruiting commands answer with their outcome.
    #[test]
    fn test_recruiting_over_protocol() {
        let mut runner =
            HeadlessRunner::new(&setup_for(CoachArchetype::Recruiter, 5), HeadlessConfig::default()).unwrap();
        runner.handle_line(r#"{"cmd":"advance_week"}"#);
        let prospect = runner.career().state().recruitment_pool[0].id.clone();

        let out = responses(
            &mut runner,
            &[
                &format!(r#"{{"cmd":"scout","prospect_id":"{prospect}"}}"#),
                &format!(r#"{{"cmd":"attempt_recruit","prospect_id":"{prospect}"}}"#),
            ],
        );
        assert!(matches!(out[0], Response::Ack { .. }));
        assert!(matches!(out[1], Response::Recruit { step: 3, .. }));
        assert_eq!(runner.career().state().recruiting_actions, 4);
    }
}

// =============================================================================
// Batch Runs
// =============================================================================

mod batch {
    use super::*;

    /// Every coach archetype finishes a season under every preset.
    #[test]
    fn test_presets_finish_a_season() {
        for name in Strategy::preset_names() {
            let strategy = Strategy::preset(name).unwrap();
            for archetype in [
                CoachArchetype::Recruiter,
                CoachArchetype::Motivator,
                CoachArchetype::Tactician,
            ] {
                let run = play_career(&setup_for(archetype, 77), &strategy, 1).unwrap();
                assert_eq!(run.metrics.seasons.len(), 1, "{name} / {archetype:?}");
                assert_eq!(run.career.state().phase, SeasonPhase::Offseason);
            }
        }
    }

    /// Saved batch replays verify on their own.
    #[test]
    fn test_batch_replays_verify() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = BatchConfig::new(setup_with_seed(0), 2)
            .with_seed(40)
            .with_strategy(Strategy::grinder())
            .with_output(dir.path().to_path_buf());
        config.save_replays = true;
        let results = run_batch(config);
        assert!(results.errors.is_empty());

        for career in &results.careers {
            let path = dir.path().join("replays").join(format!("career_{}.replay", career.seed));
            let replay = Replay::load(&path).unwrap();
            assert_eq!(replay.final_hash, career.final_state_hash);
            assert!(ReplayPlayer::new(replay).unwrap().verify().unwrap());
        }
    }

    /// Same seed range, same results, regardless of thread scheduling.
    #[test]
    fn test_batch_is_reproducible() {
        let run = || {
            let mut hashes: Vec<(u64, u64)> = run_batch(BatchConfig::new(setup_with_seed(0), 6).with_seed(900))
                .careers
                .iter()
                .map(|c| (c.seed, c.final_state_hash))
                .collect();
            hashes.sort_unstable();
            hashes
        };
        assert_eq!(run(), run());
    }
}
