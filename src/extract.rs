//! Maps a raw variable assignment back into a board.

use crate::board::Board;
use crate::engine::Assignment;
use crate::error::{Error, Result};
use crate::model::ConstraintModel;

/// Reads the solved board out of an assignment.
///
/// The constraint system guarantees exactly one "on" variable per cell of a
/// feasible assignment; this function does not trust that. A cell with zero
/// or several on-variables (an engine bug, or a tolerance artifact in a
/// numeric backend) fails loudly with [`Error::AmbiguousCell`] instead of
/// quietly defaulting to empty.
pub fn extract(model: &ConstraintModel, assignment: &Assignment) -> Result<Board> {
    let size = model.shape().size();
    let mut rows = vec![vec![None; size]; size];
    for (row, cells) in rows.iter_mut().enumerate() {
        for (col, cell) in cells.iter_mut().enumerate() {
            let mut on = 0;
            for value in 1..=size as u32 {
                if assignment.is_on(model.vars().id(row, col, value)) {
                    on += 1;
                    *cell = Some(value);
                }
            }
            if on != 1 {
                return Err(Error::AmbiguousCell { row, col, on });
            }
        }
    }
    Board::from_rows(rows, model.shape())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::board::BoxShape;

    use super::*;

    #[test]
    fn extracts_the_on_variables() {
        let board = Board::empty(BoxShape::new(2, 1).unwrap());
        let model = ConstraintModel::build(&board);
        // Row 0 = [1, 2], row 1 = [2, 1].
        let mut values = vec![false; model.vars().len()];
        for (r, c, v) in [(0, 0, 1), (0, 1, 2), (1, 0, 2), (1, 1, 1)] {
            values[model.vars().id(r, c, v) as usize] = true;
        }
        let solved = extract(&model, &Assignment::new(values)).unwrap();
        assert_eq!(
            solved.to_rows(),
            vec![vec![Some(1), Some(2)], vec![Some(2), Some(1)]]
        );
    }

    #[test]
    fn a_cell_with_no_on_variable_fails_loudly() {
        let board = Board::empty(BoxShape::new(2, 1).unwrap());
        let model = ConstraintModel::build(&board);
        let assignment = Assignment::new(vec![false; model.vars().len()]);
        assert_eq!(
            extract(&model, &assignment),
            Err(Error::AmbiguousCell {
                row: 0,
                col: 0,
                on: 0
            })
        );
    }

    #[test]
    fn a_cell_with_two_on_variables_fails_loudly() {
        let board = Board::empty(BoxShape::new(2, 1).unwrap());
        let model = ConstraintModel::build(&board);
        let mut values = vec![false; model.vars().len()];
        values[model.vars().id(0, 0, 1) as usize] = true;
        values[model.vars().id(0, 0, 2) as usize] = true;
        assert_eq!(
            extract(&model, &Assignment::new(values)),
            Err(Error::AmbiguousCell {
                row: 0,
                col: 0,
                on: 2
            })
        );
    }
}
