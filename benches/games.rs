//! Criterion benchmarks measure how fast full games are played through the
//! turn processor.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pawns::chess::board::Board;
use pawns::chess::core::Player;
use pawns::chess::game::{Game, Rules, TurnOutcome};

const GAME: &[&str] = &[
    "e2e4", "d7d5", "e4d5", "e7e5", "d5d6", "c7d6", "d2d4", "e5d4", "c2c4", "d4c3", "b2c3", "a7a5",
    "c3c4", "a5a4", "c4c5", "d6c5", "f2f4", "c5c4", "f4f5", "c4c3", "f5f6", "g7f6", "g2g4", "c3c2",
    "g4g5", "c2c1",
];

fn play(turns: &[&str]) -> TurnOutcome {
    let mut game = Game::default();
    let mut player = Player::White;
    let mut outcome = TurnOutcome::Normal;
    for input in turns {
        outcome = game.process_turn(input, player);
        player = player.opponent();
    }
    outcome
}

fn game_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("Games");
    let _ = group.throughput(Throughput::Elements(GAME.len() as u64));
    let _ = group.bench_with_input(
        BenchmarkId::new("process_turn", format!("{} turns", GAME.len())),
        &GAME,
        |b, turns| {
            b.iter(|| std::hint::black_box(play(turns)));
        },
    );
    // Rejected input is the common case in an interactive game.
    let _ = group.bench_function("invalid_turns", |b| {
        b.iter(|| {
            let mut game = Game::default();
            for input in ["e2e5", "e7e5", "a2b3", "hello"] {
                let _ = std::hint::black_box(game.process_turn(input, Player::White));
            }
        });
    });
    group.finish();
}

fn stalemate_bench(c: &mut Criterion) {
    let board = Board::starting();
    let rules = Rules::default();
    let _ = c.bench_function("can_move", |b| {
        b.iter(|| {
            std::hint::black_box(board.can_move(Player::White, rules.stalemate))
                && std::hint::black_box(board.can_move(Player::Black, rules.stalemate))
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = game_bench, stalemate_bench
}
criterion_main!(benches);
