#![no_main]
use libfuzzer_sys::fuzz_target;
use naught::environment::Environment;
use naught::tictactoe::Board;
use pretty_assertions::assert_eq;

// Every byte picks one of the remaining legal moves. All of them are then
// undone in reverse order, which must give back the empty board.
fuzz_target!(|data: &[u8]| {
    let mut board = Board::new();
    let mut played = vec![];
    for &byte in data {
        let moves = board.legal_moves();
        if moves.is_empty() {
            break;
        }
        let next_move = moves[byte as usize % moves.len()];
        board.apply(next_move);
        played.push(next_move);
        assert_eq!(board.legal_moves().len() + board.occupied(), 9);
    }
    for &next_move in played.iter().rev() {
        board.undo(next_move);
    }
    board.set_player_to_move(Board::new().player_to_move());
    assert_eq!(board, Board::new());
});
