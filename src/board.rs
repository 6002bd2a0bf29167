//! Puzzle boards: the rectangular sub-grid shape, structural validation and
//! the flexible string codec.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One cell of a board: `None` for empty, `Some(v)` with `v` in `[1, size]`.
pub type Cell = Option<u32>;

/// The rectangular shape of a single sub-grid (box).
///
/// A board built from this shape has side `size = width * height` and is
/// partitioned into `size / height` box rows by `size / width` box columns,
/// each box spanning `height` rows and `width` columns of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoxShape {
    width: usize,
    height: usize,
}

impl BoxShape {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width < 1 {
            return Err(Error::SubGridWidth);
        }
        if height < 1 {
            return Err(Error::SubGridHeight);
        }
        Ok(Self { width, height })
    }

    /// A square `width x width` sub-grid, e.g. `square(3)` for classic Sudoku.
    pub fn square(width: usize) -> Result<Self> {
        Self::new(width, width)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Full side length of a board with this shape.
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    /// Number of box rows on the board (`size / height`).
    pub fn box_rows(&self) -> usize {
        self.size() / self.height
    }

    /// Number of box columns on the board (`size / width`).
    pub fn box_cols(&self) -> usize {
        self.size() / self.width
    }
}

/// A validated `size x size` puzzle grid.
///
/// Immutable once constructed: every constructor checks the row count, the
/// length of every row and the range of every filled value, and fails with a
/// specific [`Error`] instead of producing a partial board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    shape: BoxShape,
    cells: Vec<Cell>,
}

impl Board {
    /// A board of the given shape with every cell empty.
    pub fn empty(shape: BoxShape) -> Self {
        let size = shape.size();
        Self {
            shape,
            cells: vec![None; size * size],
        }
    }

    /// Validates a rectangular array of optional values into a board.
    pub fn from_rows(rows: Vec<Vec<Cell>>, shape: BoxShape) -> Result<Self> {
        let size = shape.size();
        if rows.len() != size {
            return Err(Error::RowCount {
                expected: size,
                actual: rows.len(),
            });
        }
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != size {
                return Err(Error::RowLength {
                    row,
                    expected: size,
                    actual: cells.len(),
                });
            }
        }
        for (row, cells) in rows.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if let Some(value) = cell {
                    if value < 1 || value as usize > size {
                        return Err(Error::ValueRange {
                            row,
                            col,
                            value,
                            max: size,
                        });
                    }
                }
            }
        }
        Ok(Self {
            shape,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Decodes a flat puzzle string.
    ///
    /// For boards up to 9x9 (and no explicit delimiter) every character is
    /// one cell after all whitespace is stripped: `'0'` or any non-digit
    /// means empty. Larger boards need delimiter-separated tokens; the
    /// delimiter is auto-detected (comma, then whitespace) when not given,
    /// and each token is either a digit string or empty when non-numeric or
    /// zero. Fails when the flat cell count is not `size * size` or any
    /// value is out of range.
    pub fn from_string(input: &str, shape: BoxShape, delimiter: Option<char>) -> Result<Self> {
        let size = shape.size();
        let cells = if size <= 9 && delimiter.is_none() {
            decode_chars(input)
        } else {
            decode_tokens(input, delimiter)?
        };
        if cells.len() != size * size {
            return Err(Error::CellCount {
                expected: size * size,
                actual: cells.len(),
            });
        }
        let rows = cells.chunks(size).map(<[Cell]>::to_vec).collect();
        Self::from_rows(rows, shape)
    }

    /// Encodes the board back into its flat string form.
    ///
    /// Boards up to 9x9 become one character per cell with `empty` as the
    /// empty marker (pass a non-digit, e.g. `'.'` or `'0'`); larger boards
    /// become comma-separated tokens with `"0"` for empty. The output
    /// round-trips through [`Board::from_string`].
    pub fn encode(&self, empty: char) -> String {
        let size = self.shape.size();
        if size <= 9 {
            self.cells
                .iter()
                .map(|cell| match cell {
                    Some(value) => char::from_digit(*value, 10).unwrap_or(empty),
                    None => empty,
                })
                .collect()
        } else {
            self.cells
                .iter()
                .map(|cell| match cell {
                    Some(value) => value.to_string(),
                    None => "0".to_string(),
                })
                .collect::<Vec<_>>()
                .join(",")
        }
    }

    pub fn shape(&self) -> BoxShape {
        self.shape
    }

    pub fn size(&self) -> usize {
        self.shape.size()
    }

    /// The cell at `(row, col)`. Panics when either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size() + col]
    }

    /// Rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size())
    }

    /// The board as a plain matrix of optional values.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(<[Cell]>::to_vec).collect()
    }

    /// All filled cells as `(row, col, value)` triples in row-major order.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        let size = self.size();
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(index, cell)| cell.map(|value| (index / size, index % size, value)))
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

fn decode_chars(input: &str) -> Vec<Cell> {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c.to_digit(10) {
            Some(0) | None => None,
            Some(digit) => Some(digit),
        })
        .collect()
}

fn decode_tokens(input: &str, delimiter: Option<char>) -> Result<Vec<Cell>> {
    let trimmed = input.trim();
    let tokens: Vec<&str> = match delimiter {
        Some(d) => trimmed.split(d).map(str::trim).collect(),
        None if trimmed.contains(',') => trimmed.split(',').map(str::trim).collect(),
        None if trimmed.chars().any(char::is_whitespace) => trimmed.split_whitespace().collect(),
        None => return Err(Error::NoDelimiter),
    };
    Ok(tokens
        .into_iter()
        .map(|token| match token.parse::<u32>() {
            Ok(0) | Err(_) => None,
            Ok(value) => Some(value),
        })
        .collect())
}
