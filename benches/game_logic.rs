use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blocktris::core::{place_on_grid, GameState, Grid, PieceSupply, Tetromino};
use blocktris::types::{GameEvent, GameKey, ShapeKind};

fn bench_loop(c: &mut Criterion) {
    let state = GameState::new(12345).unwrap();

    c.bench_function("reduce_loop", |b| {
        b.iter(|| black_box(state.reduce(black_box(&GameEvent::Loop))))
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    grid.set(x, y, ShapeKind::I.color_id());
                }
            }
            grid.clear_full_rows()
        })
    });
}

fn bench_draw(c: &mut Criterion) {
    let mut supply = PieceSupply::new(12345);

    c.bench_function("supply_draw", |b| b.iter(|| supply.draw()));
}

fn bench_shift(c: &mut Criterion) {
    let state = GameState::new(12345).unwrap();
    let left = GameEvent::KeyUp(GameKey::Left);

    c.bench_function("reduce_shift", |b| {
        b.iter(|| black_box(state.reduce(black_box(&left))))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let state = GameState::new(12345).unwrap();
    let rotate = GameEvent::KeyUp(GameKey::RotateCw);

    c.bench_function("reduce_rotate", |b| {
        b.iter(|| black_box(state.reduce(black_box(&rotate))))
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let state = GameState::new(12345).unwrap();
    let drop = GameEvent::KeyUp(GameKey::HardDrop);

    c.bench_function("reduce_hard_drop", |b| {
        b.iter(|| black_box(state.reduce(black_box(&drop))))
    });
}

fn bench_place(c: &mut Criterion) {
    let grid = Grid::new();
    let piece = Tetromino::spawn(ShapeKind::T);

    c.bench_function("place_on_grid", |b| {
        b.iter(|| place_on_grid(black_box(&piece), black_box(&grid)))
    });
}

criterion_group!(
    benches,
    bench_loop,
    bench_line_clear,
    bench_draw,
    bench_shift,
    bench_rotate,
    bench_hard_drop,
    bench_place
);
criterion_main!(benches);
