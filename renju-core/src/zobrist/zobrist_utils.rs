use std::sync::OnceLock;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use crate::board::BOARD_SIZE;
use crate::game_elements::Color;

/*
 Z[row][col][color] holds one 64-bit value per (cell, color) combination,
 generated once from a fixed seed so that repeated process runs agree (the
 teacher's equivalent table is instead baked in from a generated
 `rng_values.in`; a seeded PRNG gets the same determinism without a
 checked-in data file). An extra slot holds the side-to-move salt used by
 cache keys that must distinguish whose turn it is (spec.md §4.2).
*/
const ZOBRIST_SEED: u64 = 0x52454e4a55; // "RENJU" in ASCII, just a fixed seed

struct ZobristTable {
    cells: [[[u64; 2]; BOARD_SIZE]; BOARD_SIZE],
    side_to_move: u64,
}

static TABLE: OnceLock<ZobristTable> = OnceLock::new();

fn table() -> &'static ZobristTable {
    TABLE.get_or_init(|| {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut cells = [[[0u64; 2]; BOARD_SIZE]; BOARD_SIZE];
        for row in cells.iter_mut() {
            for cell in row.iter_mut() {
                cell[0] = rng.gen();
                cell[1] = rng.gen();
            }
        }
        let side_to_move = rng.gen();
        ZobristTable { cells, side_to_move }
    })
}

/// Forces initialization of the Zobrist table. Calling this ahead of time
/// (as the server's launch hook does) avoids paying the one-time generation
/// cost inside the first search.
pub fn init_zobrist_keys() {
    let _ = table();
}

pub fn get_key_for_cell(row: u8, col: u8, color: Color) -> u64 {
    table().cells[row as usize][col as usize][color.to_index()]
}

/// Salt XORed in when a cache key must distinguish side-to-move (the board
/// hash alone does not, since a Renju position's stone colors are already
/// encoded per-cell, but the *side to move* at a given stone count is not
/// recoverable from the cells alone when used as an external cache key).
pub fn get_key_side_to_move(color: Color) -> u64 {
    match color {
        Color::Black => 0,
        Color::White => table().side_to_move,
    }
}
