use crate::board::Board;
use crate::game_elements::Color;
use crate::line::{count_line, AXES};

/// True iff placing `color` at `(row, col)` (already on the board) produces
/// five in a row along some axis. For black, *exactly* five — six or more is
/// an overline, handled by `check_forbidden_move`, not a win.
pub fn check_five(board: &Board, row: u8, col: u8, color: Color) -> bool {
    let (r, c) = (row as i32, col as i32);
    for &(dr, dc) in AXES.iter() {
        let run = count_line(board, r, c, dr, dc, color);
        let is_five = match color {
            Color::Black => run == 5,
            Color::White => run >= 5,
        };
        if is_five {
            return true;
        }
    }
    false
}

/// True iff `mv` completes a win for `color`. Equivalent to `check_five`
/// once `mv` has been placed; kept as a distinct name to match spec.md §6's
/// `checkWin(board, move, color)` contract, which the search and VCF/VCT
/// provers call directly after placing a move.
pub fn check_win(board: &Board, row: u8, col: u8, color: Color) -> bool {
    check_five(board, row, col, color)
}
