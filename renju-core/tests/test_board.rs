use renju_core::{Board, Color, Move};

#[test]
fn new_board_is_empty() {
    let board = Board::new();
    assert!(board.is_empty_board());
    assert_eq!(board.stone_count(), 0);
    assert_eq!(board.zobrist_key(), 0);
}

#[test]
fn place_and_undo_restores_hash_and_stones() {
    let mut board = Board::new();
    let before_hash = board.zobrist_key();
    let before = board.clone();

    let mv = Move::center();
    board.place_in_place(mv, Color::Black);
    assert!(!board.get(mv).is_empty());
    assert_eq!(board.stone_count(), 1);
    assert_ne!(board.zobrist_key(), before_hash);

    board.undo_in_place(mv, Color::Black);
    assert_eq!(board.stone_count(), 0);
    assert_eq!(board.zobrist_key(), before_hash);
    assert!(board.snapshot_eq(&before));
}

#[test]
fn from_moves_alternates_colors() {
    let moves = [Move::new(7, 7), Move::new(7, 8), Move::new(8, 7)];
    let board = Board::from_moves(&moves, Color::Black).unwrap();

    assert_eq!(board.get(Move::new(7, 7)).color(), Some(Color::Black));
    assert_eq!(board.get(Move::new(7, 8)).color(), Some(Color::White));
    assert_eq!(board.get(Move::new(8, 7)).color(), Some(Color::Black));
    assert_eq!(board.stone_count(), 3);
}

#[test]
fn from_moves_rejects_occupied_cell() {
    let moves = [Move::new(7, 7), Move::new(7, 7)];
    assert!(Board::from_moves(&moves, Color::Black).is_err());
}

#[test]
fn from_moves_rejects_out_of_bounds() {
    let moves = [Move::new(20, 20)];
    assert!(Board::from_moves(&moves, Color::Black).is_err());
}

#[test]
fn has_neighbor_within_detects_adjacent_stones() {
    let mut board = Board::new();
    board.place_in_place(Move::center(), Color::Black);

    assert!(board.has_neighbor_within(7, 8, 1));
    assert!(board.has_neighbor_within(8, 8, 1));
    assert!(!board.has_neighbor_within(0, 0, 1));
    assert!(!board.has_neighbor_within(10, 10, 2));
}

#[test]
fn zobrist_key_is_order_independent() {
    // Building the same position by placing the same (cell, color) pairs
    // in different orders must produce the same hash: the hash is a
    // function of the final board content, not of how it was reached.
    let placements = [
        (Move::new(7, 7), Color::Black),
        (Move::new(3, 3), Color::White),
        (Move::new(7, 8), Color::Black),
        (Move::new(3, 4), Color::White),
    ];

    let mut a = Board::new();
    for &(mv, color) in placements.iter() {
        a.place_in_place(mv, color);
    }

    let mut b = Board::new();
    for &(mv, color) in placements.iter().rev() {
        b.place_in_place(mv, color);
    }

    assert_eq!(a.zobrist_key(), b.zobrist_key());
}
