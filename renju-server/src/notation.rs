use renju_core::{Move, RenjuError};

/// Parses a whitespace-separated move history string (e.g. `"H8 I7 G7"`)
/// into the sequence of moves it describes, in order (spec.md §6). Each
/// token is parsed with [`Move::from_notation`]; this module only owns the
/// "split the history into tokens" grammar on top of that.
pub fn parse_move_history(history: &str) -> Result<Vec<Move>, RenjuError> {
    history.split_whitespace().map(Move::from_notation).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_short_history() {
        let moves = parse_move_history("H8 I7 G7").unwrap();
        assert_eq!(moves.len(), 3);
        assert_eq!(moves[0], Move::center());
    }

    #[test]
    fn empty_history_parses_to_no_moves() {
        assert_eq!(parse_move_history("").unwrap(), Vec::new());
    }

    #[test]
    fn rejects_garbage_tokens() {
        assert!(parse_move_history("H8 ZZ").is_err());
    }
}
