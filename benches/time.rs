//! Criterion benchmarks measure time of the clearly separated pieces of code.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use naught::search::{rollout, Config, Searcher};
use naught::tictactoe::{Board, Move};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn opening(cells: &[&str]) -> Board {
    let moves: Vec<Move> = cells
        .iter()
        .map(|cell| Move::try_from(*cell).expect("benchmarks use valid cells"))
        .collect();
    Board::from_moves(&moves).expect("benchmarks use legal openings")
}

fn rollouts(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut board = Board::new();
    let _ = c.bench_function("rollout from the empty board", |b| {
        b.iter(|| black_box(rollout(&mut board, &mut rng)));
    });
}

criterion_group! {
    name = rollout_group;
    config = Criterion::default().sample_size(100);
    targets = rollouts
}

fn search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    for rounds in [1_000, 10_000] {
        let _ = group.throughput(Throughput::Elements(u64::from(rounds)));
        for (name, cells) in [("empty", &[][..]), ("midgame", &["5", "1", "9"][..])] {
            let _ = group.bench_with_input(
                BenchmarkId::new(name, rounds),
                &rounds,
                |b, &rounds| {
                    let config = Config {
                        rounds,
                        ..Config::default()
                    };
                    let mut searcher = Searcher::new(config, ChaCha8Rng::seed_from_u64(42));
                    let mut board = opening(cells);
                    b.iter(|| black_box(searcher.get_next_move(&mut board)));
                },
            );
        }
    }
    group.finish();
}

criterion_group! {
    name = search_group;
    config = Criterion::default().sample_size(10);
    targets = search
}

criterion_main!(rollout_group, search_group);
