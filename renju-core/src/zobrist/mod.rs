mod zobrist_utils;

pub use zobrist_utils::{init_zobrist_keys, get_key_for_cell, get_key_side_to_move};