use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetris_server::core::{Board, GameEngine, PieceSource};
use tetris_server::types::PieceKind;

fn bench_hard_drop(c: &mut Criterion) {
    c.bench_function("hard_drop_until_reset", |b| {
        let mut engine = GameEngine::with_source(10, 20, PieceSource::seeded(10, 12345));
        b.iter(|| {
            if engine.is_game_over() {
                engine.reset();
            }
            black_box(engine.hard_drop());
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new(10, 20);
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            black_box(board.clear_full_lines());
        })
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    let mut engine = GameEngine::with_source(10, 20, PieceSource::seeded(10, 12345));

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            engine.spawn_next();
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut engine = GameEngine::with_source(10, 20, PieceSource::seeded(10, 12345));

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            black_box(engine.move_left());
            black_box(engine.move_right());
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut engine = GameEngine::with_source(10, 20, PieceSource::seeded(10, 12345));
    engine.move_down();
    engine.move_down();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            black_box(engine.rotate());
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut engine = GameEngine::with_source(10, 20, PieceSource::seeded(10, 12345));
    for _ in 0..6 {
        engine.hard_drop();
    }

    c.bench_function("snapshot_to_json", |b| {
        b.iter(|| black_box(serde_json::to_string(&engine.snapshot())))
    });
}

criterion_group!(
    benches,
    bench_hard_drop,
    bench_line_clear,
    bench_piece_spawn,
    bench_move,
    bench_rotate,
    bench_snapshot
);
criterion_main!(benches);
