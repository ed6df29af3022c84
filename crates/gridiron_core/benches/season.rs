//! Season benchmarks for gridiron_core.
//!
//! Run with: `cargo bench -p gridiron_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridiron_core::commands::create_career;
use gridiron_core::data::CareerSetup;
use gridiron_core::live_game::{play_out, ActiveGame, PlayCall, Side};
use gridiron_core::season::advance_week;
use gridiron_core::state::CoachArchetype;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// One calendar week on a freshly created career.
pub fn advance_week_benchmark(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let state = create_career(&CareerSetup::default(), &mut rng);
    c.bench_function("advance_week", |b| {
        b.iter(|| advance_week(black_box(state.clone()), &mut rng));
    });
}

/// A full season, preseason through playoffs and the rollover.
pub fn full_year_benchmark(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let state = create_career(&CareerSetup::default(), &mut rng);
    c.bench_function("full_year", |b| {
        b.iter(|| {
            let mut s = state.clone();
            for _ in 0..22 {
                s = advance_week(s, &mut rng);
            }
            black_box(s)
        });
    });
}

/// An interactive game played to the final whistle with suggested calls.
pub fn live_game_benchmark(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    c.bench_function("play_out", |b| {
        b.iter(|| {
            let game = ActiveGame::new("reg-1", "Riverdale", Side::Home);
            play_out(game, 60, &CoachArchetype::Tactician, &mut rng, PlayCall::suggested)
        });
    });
}

criterion_group!(benches, advance_week_benchmark, full_year_benchmark, live_game_benchmark);
criterion_main!(benches);
