//! Match simulation benchmarks for koshien_core.
//!
//! Run with: `cargo bench -p koshien_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use koshien_core::at_bat::resolve_at_bat;
use koshien_core::bases::BaseOutState;
use koshien_core::config::MatchConfig;
use koshien_core::dice::RngDice;
use koshien_core::game::simulate_seeded;
use koshien_test_utils::fixtures::{abilities, pitching, standard_matchup};

/// Full nine-inning matches between standard fixture teams.
pub fn match_benchmark(c: &mut Criterion) {
    let (home, away) = standard_matchup();
    let mut seed = 0u64;
    c.bench_function("simulate_match", |b| {
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(simulate_seeded(
                home.clone(),
                away.clone(),
                MatchConfig::default(),
                seed,
            ))
        })
    });
}

/// Single plate appearances against a fresh base-out state.
pub fn at_bat_benchmark(c: &mut Criterion) {
    let batter = abilities(60, 55);
    let arm = pitching(55, 50);
    let mut dice = RngDice::seeded(1);
    c.bench_function("resolve_at_bat", |b| {
        b.iter(|| {
            let mut state = BaseOutState::new();
            black_box(resolve_at_bat(&batter, &arm, &mut state, &mut dice))
        })
    });
}

criterion_group!(benches, match_benchmark, at_bat_benchmark);
criterion_main!(benches);
