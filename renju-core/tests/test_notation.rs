use renju_core::Move;

#[test]
fn roundtrip_corners_and_center() {
    let cases = ["A15", "O15", "A1", "O1", "H8"];
    for notation in cases {
        let mv = Move::from_notation(notation).unwrap();
        assert_eq!(notation, mv.to_notation());
    }
}

#[test]
fn center_is_h8() {
    assert_eq!(Move::center(), Move::from_notation("H8").unwrap());
}

#[test]
fn letter_is_column_number_is_display_row() {
    // "A15" is the top-left corner: column 0, display row 15 -> board row 0.
    let mv = Move::from_notation("A15").unwrap();
    assert_eq!(mv, Move::new(0, 0));

    // "A1" is the bottom-left corner: column 0, display row 1 -> board row 14.
    let mv = Move::from_notation("A1").unwrap();
    assert_eq!(mv, Move::new(14, 0));

    // "O1" is the bottom-right corner: column 14, display row 1 -> board row 14.
    let mv = Move::from_notation("O1").unwrap();
    assert_eq!(mv, Move::new(14, 14));
}

#[test]
fn lowercase_letter_accepted() {
    assert_eq!(Move::from_notation("h8").unwrap(), Move::new(7, 7));
}

#[test]
fn rejects_garbage() {
    for bad in ["", "Z8", "P8", "H0", "H16", "88", "H"] {
        assert!(Move::from_notation(bad).is_err(), "expected {bad:?} to be rejected");
    }
}
