//! Uniformly random playouts used to evaluate positions the tree has not
//! explored yet.

use crate::environment::{Environment, Player};
use crate::search::random::RandomSource;

/// Plays uniformly random legal moves until the game is over, takes all of
/// them back and returns the winner of the simulated game (`None` is a draw).
///
/// The state is left exactly as it was, including the player to move.
pub fn rollout<E: Environment>(state: &mut E, rng: &mut impl RandomSource) -> Option<Player> {
    let player_to_move = state.player_to_move();
    let mut played = Vec::new();
    loop {
        if state.is_terminal() {
            break;
        }
        let actions = state.actions();
        let actions = actions.as_ref();
        if actions.is_empty() {
            break;
        }
        let action = actions[rng.pick(actions.len())];
        state.apply(action);
        played.push(action);
    }
    let winner = state.winner();
    for &action in played.iter().rev() {
        state.undo(action);
    }
    state.set_player_to_move(player_to_move);
    winner
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::tictactoe::{Board, Move};

    /// Always takes the first legal move.
    struct First {
        picks: usize,
    }

    impl RandomSource for First {
        fn flip_coin(&mut self) -> bool {
            panic!("rollouts never flip coins")
        }

        fn pick(&mut self, _: usize) -> usize {
            self.picks += 1;
            0
        }
    }

    #[test]
    fn deterministic_playout() {
        // X: 0 2 4 6, O: 1 3 5. X completes the anti-diagonal on 6.
        let mut board = Board::new();
        let mut rng = First { picks: 0 };
        assert_eq!(rollout(&mut board, &mut rng), Some(Player::One));
        assert_eq!(rng.picks, 7);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn terminal_position_is_not_played() {
        let mut board = Board::try_from("XXX OO- ---").unwrap();
        let before = board.clone();
        let mut rng = First { picks: 0 };
        assert_eq!(rollout(&mut board, &mut rng), Some(Player::One));
        assert_eq!(rng.picks, 0);
        assert_eq!(board, before);
    }

    #[test]
    fn full_board_draw() {
        let mut board = Board::try_from("XOX XOO OXX").unwrap();
        let mut rng = First { picks: 0 };
        assert_eq!(rollout(&mut board, &mut rng), None);
    }

    #[test]
    fn state_is_restored() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let mut board = Board::from_moves(&[Move::new(4).unwrap(), Move::new(0).unwrap()])
            .unwrap();
        let before = board.clone();
        for _ in 0..1000 {
            let _ = rollout(&mut board, &mut rng);
            assert_eq!(board, before);
        }
    }
}
