use breakthrough_engine::agent::ai::{mcts_search, simulate, MctsConfig};
use breakthrough_engine::agent::ThinkLimit;
use breakthrough_engine::game_repr::Position;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_playout(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let mut pos = Position::new();
    c.bench_function("random playout", |b| b.iter(|| black_box(simulate(&mut pos, &mut rng))));
}

fn bench_mcts_1000(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let config = MctsConfig::default();
    let limit = ThinkLimit {
        limit: 1000,
        ..ThinkLimit::default()
    };
    c.bench_function("mcts 1000 simulations", |b| {
        b.iter(|| {
            let mut pos = Position::new();
            black_box(mcts_search(&mut pos, &config, &limit, &mut rng))
        })
    });
}

criterion_group!(benches, bench_playout, bench_mcts_1000);
criterion_main!(benches);
