//! Line analysis primitives (spec.md §4.1).
//!
//! Every pattern-recognition routine in the engine — the pattern scorer, the
//! threat detector, and the forbidden-move checker — goes through this one
//! module so the notion of "axis" and "open end" stays consistent across all
//! of them (see the Design Notes' warning about keeping the scorer and the
//! threat detector in sync on this point).

use crate::board::{Board, Cell};
use crate::game_elements::{Color, Move};

/// The four non-oriented axes a line can run along. `checkJumpFour` /
/// `checkJumpThree` in spec.md §6 take an 8-valued oriented `axisIndex`
/// instead; `oriented_direction` maps one onto the other.
pub const AXES: [(i32, i32); 4] = [
    (0, 1),  // horizontal
    (1, 0),  // vertical
    (1, 1),  // diagonal \
    (1, -1), // diagonal /
];

/// Maps an oriented axis index (0..8, per spec.md §6) to a (dr, dc) step.
/// Even indices walk the positive direction of axis `idx/2`, odd indices
/// the negative one.
pub fn oriented_direction(axis_index: usize) -> (i32, i32) {
    let (dr, dc) = AXES[axis_index / 2];
    if axis_index % 2 == 0 {
        (dr, dc)
    } else {
        (-dr, -dc)
    }
}

/// Counts consecutive `color` stones through `(row, col)` along axis
/// `(dr, dc)`, scanning both directions. Assumes `board[row][col] == color`.
pub fn count_line(board: &Board, row: i32, col: i32, dr: i32, dc: i32, color: Color) -> u32 {
    let mut count = 1;
    count += scan_run(board, row, col, dr, dc, color);
    count += scan_run(board, row, col, -dr, -dc, color);
    count
}

fn scan_run(board: &Board, row: i32, col: i32, dr: i32, dc: i32, color: Color) -> u32 {
    let mut count = 0;
    let (mut r, mut c) = (row + dr, col + dc);
    while Board::is_valid_position(r, c) && board.get_rc(r, c).color() == Some(color) {
        count += 1;
        r += dr;
        c += dc;
    }
    count
}

/// Whether each end of the run through `(row, col)` along `(dr, dc)` is
/// open (in-bounds and empty).
pub fn check_ends(board: &Board, row: i32, col: i32, dr: i32, dc: i32, color: Color) -> (bool, bool) {
    (
        end_is_open(board, row, col, dr, dc, color),
        end_is_open(board, row, col, -dr, -dc, color),
    )
}

/// The two cells immediately past each end of the run through `(row, col)`
/// along `(dr, dc)` — the squares that would need to be filled (or, from
/// the other side's perspective, defended) to extend the run by one in
/// either direction. Used by the threat detector to report concrete
/// defense squares rather than a bare open/closed flag.
pub fn run_end_cells(board: &Board, row: i32, col: i32, dr: i32, dc: i32, color: Color) -> ((i32, i32), (i32, i32)) {
    (far_end(board, row, col, dr, dc, color), far_end(board, row, col, -dr, -dc, color))
}

/// Returns the coordinates just past the run's end, whether or not they are
/// in-bounds; callers must check `Board::is_valid_position` before use.
fn far_end(board: &Board, row: i32, col: i32, dr: i32, dc: i32, color: Color) -> (i32, i32) {
    let mut r = row;
    let mut c = col;
    while Board::is_valid_position(r + dr, c + dc) && board.get_rc(r + dr, c + dc).color() == Some(color) {
        r += dr;
        c += dc;
    }
    (r + dr, c + dc)
}

fn end_is_open(board: &Board, row: i32, col: i32, dr: i32, dc: i32, color: Color) -> bool {
    let mut r = row;
    let mut c = col;
    // Walk to the far end of the run, then check one past it.
    while Board::is_valid_position(r + dr, c + dc) && board.get_rc(r + dr, c + dc).color() == Some(color) {
        r += dr;
        c += dc;
    }
    let (er, ec) = (r + dr, c + dc);
    Board::is_valid_position(er, ec) && board.get_rc(er, ec).is_empty()
}

/// Looks for a jump pattern of `needed` same-color stones with a single
/// interior gap, in a window of `needed + 1` cells along the axis that
/// contains `(row, col)`. Returns the gap's position when found.
///
/// With `needed = 4` this is the "jump four" of spec.md's glossary
/// (●●●·● / ●●·●● / ●·●●●): filling the gap produces five in a row, so the
/// gap is as forced a defense as a normal four's single open end. With
/// `needed = 3` it is the analogous jump three, additionally required to be
/// open on both outer flanks (a jump three that isn't open cannot become an
/// open four, so it carries none of a real three's urgency).
pub fn find_jump_gap(board: &Board, row: i32, col: i32, dr: i32, dc: i32, color: Color, needed: u32) -> Option<Move> {
    let window_len = needed as i32 + 1;

    // Try every window of `window_len` consecutive cells along the axis
    // that includes (row, col).
    for start_offset in -(window_len - 1)..=0 {
        let start_r = row + dr * start_offset;
        let start_c = col + dc * start_offset;

        let mut stones = 0u32;
        let mut gap: Option<(i32, i32)> = None;
        let mut in_bounds = true;

        for i in 0..window_len {
            let r = start_r + dr * i;
            let c = start_c + dc * i;
            if !Board::is_valid_position(r, c) {
                in_bounds = false;
                break;
            }
            match board.get_rc(r, c) {
                Cell::Stone(s) if s == color => stones += 1,
                Cell::Empty => {
                    if gap.is_some() {
                        // More than one gap, not a valid jump pattern.
                        gap = None;
                        stones = 0;
                        break;
                    }
                    gap = Some((r, c));
                }
                _ => {
                    in_bounds = false;
                    break;
                }
            }
        }

        if !in_bounds || stones != needed {
            continue;
        }

        let (gr, gc) = match gap {
            Some(g) => g,
            None => continue,
        };

        if needed == 3 {
            // Require both flanks of the window to be open so the
            // resulting three (once the gap fills) is a real open three.
            let before = (start_r - dr, start_c - dc);
            let after = (start_r + dr * window_len, start_c + dc * window_len);
            let before_open = Board::is_valid_position(before.0, before.1) && board.get_rc(before.0, before.1).is_empty();
            let after_open = Board::is_valid_position(after.0, after.1) && board.get_rc(after.0, after.1).is_empty();
            if !before_open && !after_open {
                continue;
            }
        }

        return Some(Move::new(gr as u8, gc as u8));
    }

    None
}
