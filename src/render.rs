//! Presentation helpers: boards as text grids, models as summary tables.
//!
//! Nothing here is consulted by the solving core; callers that want a
//! different look can render the plain matrix from [`Board::to_rows`].

use prettytable::{Cell as TableCell, Row, Table};

use crate::board::Board;
use crate::model::ConstraintModel;

/// Renders a board as a grid with box-aware separators.
///
/// Cells are right-justified to the width of the largest value, empty cells
/// print as `.`:
///
/// ```text
/// +----+----+
/// | 1 .| . 3|
/// | 2 .| . .|
/// +----+----+
/// | 4 .| . 1|
/// | . .| . .|
/// +----+----+
/// ```
pub fn grid(board: &Board) -> String {
    let shape = board.shape();
    let size = shape.size();
    let cell_width = size.to_string().len() + 1;

    let mut separator = String::from("+");
    for _ in 0..shape.box_cols() {
        separator.push_str(&"-".repeat(cell_width * shape.width()));
        separator.push('+');
    }

    let mut out = String::new();
    for row in 0..size {
        if row % shape.height() == 0 {
            out.push_str(&separator);
            out.push('\n');
        }
        for col in 0..size {
            if col % shape.width() == 0 {
                out.push('|');
            }
            let text = match board.get(row, col) {
                Some(value) => value.to_string(),
                None => ".".to_string(),
            };
            out.push_str(&format!("{text:>cell_width$}"));
        }
        out.push_str("|\n");
    }
    out.push_str(&separator);
    out
}

/// Tabulates a model's constraint families and variable count.
pub fn model_summary(model: &ConstraintModel) -> String {
    let families = [
        ("cell", "cell_"),
        ("row", "row_"),
        ("column", "col_"),
        ("box", "box_"),
        ("clue", "fixed_"),
        ("cut", "cut_"),
    ];

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        TableCell::new("Constraint family"),
        TableCell::new("Count"),
    ]));
    for (label, prefix) in families {
        let count = model
            .constraints()
            .filter(|constraint| constraint.name().starts_with(prefix))
            .count();
        table.add_row(Row::new(vec![
            TableCell::new(label),
            TableCell::new(&count.to_string()),
        ]));
    }
    table.add_row(Row::new(vec![
        TableCell::new("variables"),
        TableCell::new(&model.vars().len().to_string()),
    ]));
    table.to_string()
}
