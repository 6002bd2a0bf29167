use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rectoku::board::{Board, BoxShape};
use rectoku::session::SolverSession;

const CLASSIC_NINE: &str =
    "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

fn empty_board_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Empty Boards");

    for (width, height) in [(2, 2), (3, 2), (3, 3)].iter() {
        let shape = BoxShape::new(*width, *height).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &shape,
            |b, &shape| {
                b.iter(|| {
                    let mut session = SolverSession::new(black_box(Board::empty(shape)));
                    assert!(session.solve_one().unwrap());
                });
            },
        );
    }
    group.finish();
}

fn classic_puzzle_benchmark(c: &mut Criterion) {
    let shape = BoxShape::square(3).unwrap();
    let board = Board::from_string(CLASSIC_NINE, shape, None).unwrap();

    c.bench_function("Classic 9x9 Solve", |b| {
        b.iter(|| {
            let mut session = SolverSession::new(black_box(board.clone()));
            assert!(session.solve_one().unwrap());
        });
    });
}

fn enumeration_benchmark(c: &mut Criterion) {
    let shape = BoxShape::new(2, 2).unwrap();

    c.bench_function("Enumerate 20 of 4x4", |b| {
        b.iter(|| {
            let mut session = SolverSession::new(black_box(Board::empty(shape)));
            let solutions = session.find_all(Some(20)).unwrap();
            assert_eq!(solutions.len(), 20);
        });
    });
}

criterion_group!(
    benches,
    empty_board_benchmark,
    classic_puzzle_benchmark,
    enumeration_benchmark
);
criterion_main!(benches);
