mod board;

pub use board::{Board, Cell, BOARD_SIZE};
