//! Tic-tac-toe primitives commonly used within [`crate::tictactoe`].

use std::fmt;

use anyhow::{bail, Context};

use crate::environment::Player;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 3;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// A move places the marker of the player to move into an empty cell, so it
/// is fully described by the cell. Cells are indexed densely in row-major
/// order:
///
/// ```text
/// 0 | 1 | 2
/// ---------
/// 3 | 4 | 5
/// ---------
/// 6 | 7 | 8
/// ```
///
/// Human-facing notation is the 1-based cell number (`1` to `9`), which is
/// what [`fmt::Display`] prints and [`TryFrom<&str>`] parses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    index: u8,
}

impl Move {
    /// Creates a move from its cell index or returns `None` if the index is
    /// outside of the board.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if index < BOARD_SIZE {
            Some(Self { index })
        } else {
            None
        }
    }

    /// # Panics
    ///
    /// Panics if `row` or `col` is outside of the board.
    #[must_use]
    pub const fn from_coordinates(row: u8, col: u8) -> Self {
        assert!(row < BOARD_WIDTH && col < BOARD_WIDTH);
        Self {
            index: row * BOARD_WIDTH + col,
        }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.index
    }

    #[must_use]
    pub const fn row(self) -> u8 {
        self.index / BOARD_WIDTH
    }

    #[must_use]
    pub const fn col(self) -> u8 {
        self.index % BOARD_WIDTH
    }

    /// Iterates over every cell of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE).map(|index| Self { index })
    }
}

impl TryFrom<&str> for Move {
    type Error = anyhow::Error;

    fn try_from(input: &str) -> anyhow::Result<Self> {
        let input = input.trim();
        let cell: u8 = input
            .parse()
            .with_context(|| format!("expected cell number, got '{input}'"))?;
        match cell.checked_sub(1).and_then(Self::new) {
            Some(result) => Ok(result),
            None => bail!("cell number should be within 1..={BOARD_SIZE}, got {cell}"),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index + 1)
    }
}

/// Contents of a single board cell.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Player),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "-"),
            Self::Occupied(player) => write!(f, "{player}"),
        }
    }
}
