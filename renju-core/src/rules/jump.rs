use crate::board::Board;
use crate::game_elements::Color;
use crate::line::{find_jump_gap, oriented_direction};

/// Whether the stone at `(row, col)` participates in a jump-four pattern
/// along oriented axis `axis_index` (0..8, spec.md §6).
pub fn check_jump_four(board: &Board, row: u8, col: u8, axis_index: usize, color: Color) -> bool {
    let (dr, dc) = oriented_direction(axis_index);
    find_jump_gap(board, row as i32, col as i32, dr, dc, color, 4).is_some()
}

/// Whether the stone at `(row, col)` participates in a jump-three pattern
/// along oriented axis `axis_index` (0..8, spec.md §6).
pub fn check_jump_three(board: &Board, row: u8, col: u8, axis_index: usize, color: Color) -> bool {
    let (dr, dc) = oriented_direction(axis_index);
    find_jump_gap(board, row as i32, col as i32, dr, dc, color, 3).is_some()
}
