//! Rules of [tic-tac-toe] on a 3×3 board. This is the game the engine plays,
//! [`Board`] implements [`crate::environment::Environment`] for it.
//!
//! [tic-tac-toe]: https://en.wikipedia.org/wiki/Tic-tac-toe

pub mod board;
pub mod core;

pub use self::board::{Board, MoveList};
pub use self::core::{Cell, Move, BOARD_SIZE, BOARD_WIDTH};
