mod board;
mod error;
mod game_elements;
mod line;
mod rules;
mod zobrist;

pub use board::{Board, Cell, BOARD_SIZE};
pub use error::RenjuError;
pub use game_elements::{Color, Move};
pub use line::{check_ends, count_line, find_jump_gap, oriented_direction, run_end_cells, AXES};
pub use rules::{check_five, check_forbidden_move, check_jump_four, check_jump_three, check_win, ForbiddenKind, ForbiddenResult};
pub use zobrist::{get_key_for_cell, get_key_side_to_move, init_zobrist_keys};