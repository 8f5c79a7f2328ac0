use renju_core::{check_five, check_forbidden_move, check_jump_four, check_jump_three, Board, Color, ForbiddenKind, Move};

fn place_all(board: &mut Board, moves: &[(Move, Color)]) {
    for &(mv, color) in moves {
        board.place_in_place(mv, color);
    }
}

#[test]
fn five_in_a_row_wins_for_either_color() {
    let mut board = Board::new();
    let last = Move::new(7, 4);
    place_all(
        &mut board,
        &[
            (Move::new(7, 0), Color::Black),
            (Move::new(7, 1), Color::Black),
            (Move::new(7, 2), Color::Black),
            (Move::new(7, 3), Color::Black),
        ],
    );
    board.place_in_place(last, Color::Black);
    assert!(check_five(&board, last.row, last.col, Color::Black));
}

#[test]
fn six_in_a_row_is_not_a_five_for_black() {
    let mut board = Board::new();
    let last = Move::new(7, 5);
    place_all(
        &mut board,
        &[
            (Move::new(7, 0), Color::Black),
            (Move::new(7, 1), Color::Black),
            (Move::new(7, 2), Color::Black),
            (Move::new(7, 3), Color::Black),
            (Move::new(7, 4), Color::Black),
        ],
    );
    board.place_in_place(last, Color::Black);
    // An overline (six in a row) does not satisfy black's exact-five win
    // condition; it is a forbidden move, not a win.
    assert!(!check_five(&board, last.row, last.col, Color::Black));
}

#[test]
fn six_in_a_row_is_a_win_for_white() {
    let mut board = Board::new();
    let last = Move::new(7, 5);
    place_all(
        &mut board,
        &[
            (Move::new(7, 0), Color::White),
            (Move::new(7, 1), Color::White),
            (Move::new(7, 2), Color::White),
            (Move::new(7, 3), Color::White),
            (Move::new(7, 4), Color::White),
        ],
    );
    board.place_in_place(last, Color::White);
    assert!(check_five(&board, last.row, last.col, Color::White));
}

#[test]
fn jump_four_gap_detected_on_filling_move() {
    // B B B . B along the horizontal axis through row 7: placing the last
    // stone at col 3 leaves a single gap at col 3... construct so the
    // stone just placed is part of the pattern and the gap is elsewhere.
    let mut board = Board::new();
    place_all(
        &mut board,
        &[
            (Move::new(7, 0), Color::Black),
            (Move::new(7, 1), Color::Black),
            (Move::new(7, 2), Color::Black),
            (Move::new(7, 4), Color::Black),
        ],
    );
    // Oriented axis 0 is the positive horizontal direction (see line.rs).
    assert!(check_jump_four(&board, 7, 4, 1, Color::Black));
}

#[test]
fn jump_three_requires_open_flank() {
    let mut board = Board::new();
    place_all(
        &mut board,
        &[
            (Move::new(7, 1), Color::Black),
            (Move::new(7, 2), Color::Black),
            (Move::new(7, 4), Color::Black),
        ],
    );
    assert!(check_jump_three(&board, 7, 4, 1, Color::Black));
}

#[test]
fn open_three_is_forbidden_when_doubled() {
    let mut board = Board::new();
    // Two open threes through (7,7) crossing on the stone about to be
    // placed: one horizontal, one vertical, both open on every end.
    place_all(
        &mut board,
        &[
            (Move::new(7, 6), Color::Black),
            (Move::new(7, 5), Color::Black),
            (Move::new(6, 7), Color::Black),
            (Move::new(5, 7), Color::Black),
        ],
    );

    let result = check_forbidden_move(&board, 7, 7);
    assert!(result.is_forbidden);
    assert_eq!(result.kind, Some(ForbiddenKind::DoubleThree));
}

#[test]
fn double_four_is_forbidden() {
    let mut board = Board::new();
    place_all(
        &mut board,
        &[
            (Move::new(7, 4), Color::Black),
            (Move::new(7, 5), Color::Black),
            (Move::new(7, 6), Color::Black),
            (Move::new(4, 7), Color::Black),
            (Move::new(5, 7), Color::Black),
            (Move::new(6, 7), Color::Black),
        ],
    );

    let result = check_forbidden_move(&board, 7, 7);
    assert!(result.is_forbidden);
    assert_eq!(result.kind, Some(ForbiddenKind::DoubleFour));
}

#[test]
fn overline_is_forbidden() {
    let mut board = Board::new();
    place_all(
        &mut board,
        &[
            (Move::new(7, 0), Color::Black),
            (Move::new(7, 1), Color::Black),
            (Move::new(7, 2), Color::Black),
            (Move::new(7, 3), Color::Black),
            (Move::new(7, 5), Color::Black),
        ],
    );

    let result = check_forbidden_move(&board, 7, 4);
    assert!(result.is_forbidden);
    assert_eq!(result.kind, Some(ForbiddenKind::Overline));
}

#[test]
fn forbidden_check_does_not_mutate_board() {
    let mut board = Board::new();
    place_all(
        &mut board,
        &[
            (Move::new(7, 4), Color::Black),
            (Move::new(7, 5), Color::Black),
            (Move::new(7, 6), Color::Black),
        ],
    );
    let before = board.clone();
    let _ = check_forbidden_move(&board, 7, 7);
    assert!(board.snapshot_eq(&before));
}

#[test]
fn a_completing_five_is_never_forbidden_even_if_it_also_doubles_threes() {
    let mut board = Board::new();
    place_all(
        &mut board,
        &[
            // Horizontal four that (7,7) turns into a five.
            (Move::new(7, 3), Color::Black),
            (Move::new(7, 4), Color::Black),
            (Move::new(7, 5), Color::Black),
            (Move::new(7, 6), Color::Black),
            // Open three on the vertical axis through (7,7).
            (Move::new(6, 7), Color::Black),
            (Move::new(5, 7), Color::Black),
            // Open three on the diagonal axis through (7,7).
            (Move::new(6, 6), Color::Black),
            (Move::new(5, 5), Color::Black),
        ],
    );

    // (7,7) completes a horizontal five *and* would otherwise double up
    // two open threes; the five exempts it regardless.
    let result = check_forbidden_move(&board, 7, 7);
    assert!(!result.is_forbidden);
}
