//! Determinism testing utilities.
//!
//! Provides a harness for verifying that a career produces identical
//! results given an identical seed and command stream.
//!
//! # Testing Strategy
//!
//! A career must be fully reproducible from its seed for batch runs and
//! replays to mean anything. Sources of non-determinism include:
//!
//! - **Unseeded randomness**: every random draw must come from the
//!   injected generator, never `thread_rng()`.
//!
//! - **HashMap iteration order**: Rust's default hasher is randomized.
//!   Game state lives in `Vec`s and is walked in order.
//!
//! - **Float formatting and parsing**: snapshots go through bincode, which
//!   stores floats bit-exact.
//!
//! # Test Levels
//!
//! 1. **Unit tests**: single reducers with seeded generators
//! 2. **Property tests**: random seeds and command streams still reproduce
//! 3. **Integration tests**: whole careers are reproducible
//! 4. **Parallel tests**: N careers across threads all match

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use gridiron_core::session::{Career, CareerCommand};

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
    /// Number of steps applied per run.
    pub steps: u64,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for a deterministic career).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that the runs were deterministic, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Career is non-deterministic!\n\
                 Runs: {}\n\
                 Steps: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.steps,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run a system multiple times and verify determinism.
///
/// # Arguments
///
/// * `runs` - Number of times to run
/// * `steps` - Number of steps per run
/// * `setup` - Function to create the initial state
/// * `step` - Function to advance the state by one step
/// * `hash` - Function to compute the state hash
pub fn verify_determinism<S, Setup, Step, HashFn>(
    runs: usize,
    steps: u64,
    setup: Setup,
    step: Step,
    hash: HashFn,
) -> DeterminismResult
where
    Setup: Fn() -> S,
    Step: Fn(&mut S),
    HashFn: Fn(&S) -> u64,
{
    let mut hashes = Vec::with_capacity(runs);

    for _ in 0..runs {
        let mut state = setup();

        for _ in 0..steps {
            step(&mut state);
        }

        hashes.push(hash(&state));
    }

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
        steps,
    }
}

fn advance(career: &mut Career) {
    // A career never has a live game here, so the week always advances.
    let _ = career.apply(CareerCommand::AdvanceWeek);
}

/// Run a seeded career twice for `weeks` and compare final hashes.
pub fn verify_career_determinism<F>(setup_fn: F, weeks: u64) -> bool
where
    F: Fn() -> Career,
{
    verify_determinism(2, weeks, &setup_fn, advance, Career::state_hash).is_deterministic
}

/// Run N careers on scoped threads and collect final hashes.
///
/// Catches non-determinism that only shows up under thread scheduling.
pub fn run_parallel_careers<F>(setup_fn: F, num_careers: usize, weeks: u64) -> DeterminismResult
where
    F: Fn() -> Career + Sync,
{
    let hashes: Vec<u64> = thread::scope(|s| {
        let handles: Vec<_> = (0..num_careers)
            .map(|_| {
                s.spawn(|| {
                    let mut career = setup_fn();
                    for _ in 0..weeks {
                        advance(&mut career);
                    }
                    career.state_hash()
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    DeterminismResult {
        is_deterministic: hashes.windows(2).all(|w| w[0] == w[1]),
        hashes,
        steps: weeks,
    }
}

/// Compare two careers week by week, finding the first divergence.
///
/// # Returns
///
/// `None` if the careers match throughout, `Some(week)` if they diverge
/// after that many advances.
pub fn find_first_divergence<F>(setup_fn: F, weeks: u64) -> Option<u64>
where
    F: Fn() -> Career,
{
    let mut a = setup_fn();
    let mut b = setup_fn();

    if a.state_hash() != b.state_hash() {
        return Some(0);
    }

    for week in 1..=weeks {
        advance(&mut a);
        advance(&mut b);

        if a.state_hash() != b.state_hash() {
            return Some(week);
        }
    }

    None
}

/// Verify that a snapshot round-trip preserves the career exactly.
pub fn verify_serialization_determinism<F>(setup_fn: F, weeks: u64) -> bool
where
    F: Fn() -> Career,
{
    let mut career = setup_fn();

    for _ in 0..weeks {
        advance(&mut career);
    }

    let hash_before = career.state_hash();

    let Ok(bytes) = career.serialize() else {
        return false;
    };
    let Ok(restored) = Career::deserialize(&bytes) else {
        return false;
    };

    hash_before == restored.state_hash()
}

/// Compute a simple hash for any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Proptest strategies for determinism testing.
///
/// These strategies generate random but reproducible inputs for
/// property-based testing of careers and live games.
pub mod strategies {
    use gridiron_core::commands::DepthOrder;
    use gridiron_core::live_game::PlayCall;
    use gridiron_core::player::Position;
    use gridiron_core::session::CareerCommand;
    use gridiron_core::state::{CoachArchetype, SeasonPhase};
    use proptest::prelude::*;

    /// Generate a career seed.
    pub fn arb_seed() -> impl Strategy<Value = u64> {
        any::<u64>()
    }

    /// Generate any play call.
    pub fn arb_play_call() -> impl Strategy<Value = PlayCall> {
        prop_oneof![
            Just(PlayCall::Run),
            Just(PlayCall::PassShort),
            Just(PlayCall::PassLong),
            Just(PlayCall::Punt),
            Just(PlayCall::Continue),
        ]
    }

    /// Generate a season phase.
    pub fn arb_phase() -> impl Strategy<Value = SeasonPhase> {
        prop::sample::select(SeasonPhase::ALL.to_vec())
    }

    /// Generate a position.
    pub fn arb_position() -> impl Strategy<Value = Position> {
        prop::sample::select(Position::ALL.to_vec())
    }

    /// Generate a coach archetype.
    pub fn arb_archetype() -> impl Strategy<Value = CoachArchetype> {
        prop_oneof![
            Just(CoachArchetype::Recruiter),
            Just(CoachArchetype::Motivator),
            Just(CoachArchetype::Tactician),
        ]
    }

    /// Generate a command that needs no ids from the live state.
    pub fn arb_command() -> impl Strategy<Value = CareerCommand> {
        prop_oneof![
            4 => Just(CareerCommand::AdvanceWeek),
            1 => Just(CareerCommand::AutoDepthChart {
                order: DepthOrder::Overall
            }),
            1 => Just(CareerCommand::AutoDepthChart {
                order: DepthOrder::Potential
            }),
            1 => arb_play_call().prop_map(|call| CareerCommand::CallPlay { call }),
            1 => Just(CareerCommand::SimToDecision),
        ]
    }

    /// Generate a sequence of commands.
    pub fn arb_command_sequence(max_len: usize) -> impl Strategy<Value = Vec<CareerCommand>> {
        proptest::collection::vec(arb_command(), 0..max_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::new_career;
    use proptest::prelude::*;

    #[test]
    fn test_verify_determinism_simple() {
        let result = verify_determinism(3, 100, || 0u64, |n| *n += 1, |n| *n);

        assert!(result.is_deterministic);
        assert_eq!(result.hashes, vec![100, 100, 100]);
    }

    #[test]
    fn test_detects_non_determinism() {
        let counter = std::cell::Cell::new(0u64);
        let result = verify_determinism(
            2,
            1,
            || {
                counter.set(counter.get() + 1);
                counter.get()
            },
            |_| {},
            |n| *n,
        );
        assert!(!result.is_deterministic);
        assert_eq!(result.unique_hashes().len(), 2);
    }

    #[test]
    fn test_career_determinism() {
        assert!(verify_career_determinism(|| new_career(42), 12));
    }

    #[test]
    fn test_parallel_careers_match() {
        run_parallel_careers(|| new_career(7), 4, 10).assert_deterministic();
    }

    #[test]
    fn test_no_divergence() {
        assert_eq!(find_first_divergence(|| new_career(3), 8), None);
    }

    #[test]
    fn test_different_seeds_diverge_immediately() {
        let seeds = std::cell::Cell::new(0u64);
        let first = find_first_divergence(
            || {
                seeds.set(seeds.get() + 1);
                new_career(seeds.get())
            },
            4,
        );
        assert_eq!(first, Some(0));
    }

    #[test]
    fn test_snapshot_determinism() {
        assert!(verify_serialization_determinism(|| new_career(5), 7));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_any_seed_is_reproducible(seed in strategies::arb_seed()) {
            prop_assert!(verify_career_determinism(|| new_career(seed), 3));
        }

        #[test]
        fn prop_command_streams_reproduce(
            seed in strategies::arb_seed(),
            commands in strategies::arb_command_sequence(12),
        ) {
            let run = || {
                let mut career = new_career(seed);
                for command in &commands {
                    let _ = career.apply(command.clone());
                }
                career.state_hash()
            };
            prop_assert_eq!(run(), run());
        }
    }
}
