use renju_core::{get_key_for_cell, get_key_side_to_move, init_zobrist_keys, Board, Color, Move};

#[test]
fn init_is_idempotent_and_stable() {
    init_zobrist_keys();
    let a = get_key_for_cell(7, 7, Color::Black);
    init_zobrist_keys();
    let b = get_key_for_cell(7, 7, Color::Black);
    assert_eq!(a, b);
}

#[test]
fn distinct_cells_and_colors_get_distinct_keys() {
    let k1 = get_key_for_cell(0, 0, Color::Black);
    let k2 = get_key_for_cell(0, 0, Color::White);
    let k3 = get_key_for_cell(0, 1, Color::Black);
    assert_ne!(k1, k2);
    assert_ne!(k1, k3);
}

#[test]
fn side_to_move_salt_differs_by_color() {
    assert_ne!(get_key_side_to_move(Color::Black), get_key_side_to_move(Color::White));
}

#[test]
fn board_hash_matches_xor_of_placed_keys() {
    let mut board = Board::new();
    let moves = [
        (Move::new(7, 7), Color::Black),
        (Move::new(7, 8), Color::White),
        (Move::new(8, 7), Color::Black),
    ];

    let mut expected = 0u64;
    for &(mv, color) in moves.iter() {
        board.place_in_place(mv, color);
        expected ^= get_key_for_cell(mv.row, mv.col, color);
    }

    assert_eq!(board.zobrist_key(), expected);
}
