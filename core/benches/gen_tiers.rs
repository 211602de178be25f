use std::hint::black_box;

use clearmine_core::*;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

const TIERS: [(&str, BoardConfig); 4] = [
    ("9x9/10", BoardConfig::new(9, 9, 10)),
    ("9x9/16", BoardConfig::new(9, 9, 16)),
    ("16x16/40", BoardConfig::new(16, 16, 40)),
    ("30x16/99", BoardConfig::new(30, 16, 99)),
];

fn guess_free_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("guess_free_generation");
    group.sample_size(20);

    for (name, config) in TIERS {
        let config = config.with_guess_free(true);
        let first_click = Position::new(config.height / 2, config.width / 2);

        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, config| {
            let mut generator = RandomMineGenerator::new(SmallRng::seed_from_u64(0));
            b.iter(|| {
                // expert boards may run out of attempts, that is still a measured outcome
                let generated = generate_board(&mut generator, first_click, config);
                black_box(generated.map(|generated| generated.attempts))
            });
        });
    }

    group.finish();
}

fn solver_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver");

    for (name, config) in TIERS {
        let first_click = Position::new(config.height / 2, config.width / 2);
        let mut generator = RandomMineGenerator::new(SmallRng::seed_from_u64(1));
        let Ok(generated) = generate_board(&mut generator, first_click, &config) else {
            continue;
        };

        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &generated.board,
            |b, board| b.iter(|| black_box(solve(board).solved)),
        );
    }

    group.finish();
}

criterion_group!(benches, guess_free_generation, solver_only);
criterion_main!(benches);
