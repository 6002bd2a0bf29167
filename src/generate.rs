//! Random puzzle generation: scramble a solved board, then dig holes.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::board::{Board, BoxShape, Cell};
use crate::error::Result;
use crate::session::SolverSession;

/// A generated puzzle plus the difficulty actually achieved (the fraction of
/// cells cleared, which can fall short of the target when uniqueness keeps a
/// clue in place).
#[derive(Debug, Clone)]
pub struct Generated {
    pub board: Board,
    pub achieved_difficulty: f64,
}

/// Generates a puzzle for `shape` with roughly the given difficulty.
///
/// Starts from a solved board (a canonical shifted-band pattern, scrambled
/// by value relabeling plus row, column and band shuffles — every transform
/// preserves validity for rectangular boxes), then clears cells in random
/// order up to `difficulty * size^2` of them. With `unique`, each clear is
/// verified to keep the solution unique and is undone otherwise.
///
/// Deterministic for a given RNG state; pass a seeded `rand_chacha` RNG for
/// reproducible puzzles.
pub fn generate<R: Rng + ?Sized>(
    shape: BoxShape,
    difficulty: f64,
    unique: bool,
    rng: &mut R,
) -> Result<Generated> {
    let size = shape.size();
    let mut grid = solved_pattern(shape);
    scramble(&mut grid, shape, rng);

    let mut order: Vec<(usize, usize)> = (0..size)
        .flat_map(|row| (0..size).map(move |col| (row, col)))
        .collect();
    order.shuffle(rng);

    let target = (difficulty.clamp(0.0, 1.0) * (size * size) as f64).round() as usize;
    let mut cleared = 0usize;
    for (row, col) in order {
        if cleared == target {
            break;
        }
        let kept = grid[row][col].take();
        if unique {
            let candidate = Board::from_rows(grid.clone(), shape)?;
            let mut session = SolverSession::new(candidate);
            if session.find_all(Some(2))?.len() > 1 {
                // A second solution appeared; this clue has to stay.
                grid[row][col] = kept;
                continue;
            }
        }
        cleared += 1;
    }

    let achieved_difficulty = cleared as f64 / (size * size) as f64;
    debug!(cleared, achieved_difficulty, "puzzle generated");
    Ok(Generated {
        board: Board::from_rows(grid, shape)?,
        achieved_difficulty,
    })
}

/// The canonical solved board for a shape: row `r` is the base sequence
/// rotated by `(r % height) * width + r / height`, which lands each value
/// exactly once per row, column and box.
fn solved_pattern(shape: BoxShape) -> Vec<Vec<Cell>> {
    let size = shape.size();
    (0..size)
        .map(|row| {
            let offset = (row % shape.height()) * shape.width() + row / shape.height();
            (0..size)
                .map(|col| Some(((offset + col) % size) as u32 + 1))
                .collect()
        })
        .collect()
}

fn scramble<R: Rng + ?Sized>(grid: &mut Vec<Vec<Cell>>, shape: BoxShape, rng: &mut R) {
    let size = shape.size();

    // Relabel values with a random permutation.
    let mut relabel: Vec<u32> = (1..=size as u32).collect();
    relabel.shuffle(rng);
    for row in grid.iter_mut() {
        for cell in row.iter_mut() {
            *cell = cell.map(|value| relabel[value as usize - 1]);
        }
    }

    // Reorder rows within each horizontal band and the bands themselves,
    // then the same for columns and vertical stacks.
    let row_order = banded_order(size, shape.height(), rng);
    let reordered: Vec<Vec<Cell>> = row_order.iter().map(|&row| grid[row].clone()).collect();
    *grid = reordered;

    let col_order = banded_order(size, shape.width(), rng);
    for row in grid.iter_mut() {
        let reordered: Vec<Cell> = col_order.iter().map(|&col| row[col]).collect();
        *row = reordered;
    }
}

/// A permutation of `0..size` that only moves indices within their band of
/// `band` consecutive positions, and whole bands as units.
fn banded_order<R: Rng + ?Sized>(size: usize, band: usize, rng: &mut R) -> Vec<usize> {
    let mut bands: Vec<Vec<usize>> = (0..size)
        .collect::<Vec<_>>()
        .chunks(band)
        .map(<[usize]>::to_vec)
        .collect();
    for chunk in bands.iter_mut() {
        chunk.shuffle(rng);
    }
    bands.shuffle(rng);
    bands.into_iter().flatten().collect()
}
