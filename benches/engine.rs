use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetrs_engine::{Action, Board, Cell, Game, MoveDirection, RotationDirection, TetrominoType};

fn bench_tick(c: &mut Criterion) {
    let game = Game::with_seed(12345);

    c.bench_function("apply_tick", |b| {
        b.iter(|| black_box(&game).apply(Action::Tick))
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let game = Game::with_seed(12345);

    c.bench_function("apply_hard_drop", |b| {
        b.iter(|| black_box(&game).apply(Action::HardDrop))
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let mut board = Board::new();
    // Fill bottom 4 rows
    for row in 16..20 {
        for col in 0..10 {
            board.set(row, col, Cell::Filled(TetrominoType::I));
        }
    }

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| black_box(&board).clear_full_lines())
    });
}

fn bench_move(c: &mut Criterion) {
    let game = Game::with_seed(12345);

    c.bench_function("apply_move", |b| {
        b.iter(|| black_box(&game).apply(Action::Move(MoveDirection::Right)))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let game = Game::with_seed(12345);

    c.bench_function("apply_rotate", |b| {
        b.iter(|| black_box(&game).apply(Action::Rotate(RotationDirection::Clockwise)))
    });
}

fn bench_full_game(c: &mut Criterion) {
    c.bench_function("drop_until_top_out", |b| {
        b.iter(|| {
            let mut game = Game::with_seed(black_box(7));
            while !game.is_game_over() {
                game = game.apply(Action::HardDrop);
            }
            game
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_hard_drop,
    bench_line_clear,
    bench_move,
    bench_rotate,
    bench_full_game
);
criterion_main!(benches);
