#![no_main]
use libfuzzer_sys::fuzz_target;
use naught::tictactoe::{Board, Move};
use pretty_assertions::assert_eq;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(parsed) = Move::try_from(s) {
            assert_eq!(Move::try_from(parsed.to_string().as_str()).unwrap(), parsed);
        }
        if let Ok(board) = Board::try_from(s) {
            assert_eq!(Board::try_from(board.to_string().as_str()).unwrap(), board);
        }
    }
});
