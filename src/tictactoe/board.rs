//! [`Board`] is the mutable tic-tac-toe position searched by the engine.

use std::fmt;

use anyhow::bail;
use arrayvec::ArrayVec;
use itertools::Itertools;

use crate::environment::{Environment, Player};
use crate::tictactoe::core::{Cell, Move, BOARD_SIZE, BOARD_WIDTH};

/// Legal moves in a position. There are never more than [`BOARD_SIZE`] of
/// them.
pub type MoveList = ArrayVec<Move, { BOARD_SIZE as usize }>;

/// Grid of cells plus the player to move.
///
/// The board does not keep the move history: the search applies and undoes
/// moves in stack order and tracks the history itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; BOARD_SIZE as usize],
    player_to_move: Player,
}

impl Board {
    /// Creates an empty board with [`Player::One`] to move.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_SIZE as usize],
            player_to_move: Player::One,
        }
    }

    /// Plays `moves` from the empty board, alternating the players.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the moves targets an occupied cell.
    pub fn from_moves(moves: &[Move]) -> anyhow::Result<Self> {
        let mut board = Self::new();
        for &next_move in moves {
            if board.cell(next_move) != Cell::Empty {
                bail!("cell {next_move} is already occupied");
            }
            board.apply(next_move);
        }
        Ok(board)
    }

    #[must_use]
    pub const fn cell(&self, cell: Move) -> Cell {
        self.cells[cell.index() as usize]
    }

    /// Returns empty cells in row-major order.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        Move::all()
            .filter(|&candidate| self.cell(candidate) == Cell::Empty)
            .collect()
    }

    /// Returns `true` if `candidate` is an empty cell.
    #[must_use]
    pub fn is_legal(&self, candidate: Move) -> bool {
        self.cell(candidate) == Cell::Empty
    }

    /// Number of cells with a marker.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Returns the owner of the line if all of its cells hold the same marker.
    fn line_owner(&self, line: impl Iterator<Item = Move>) -> Option<Player> {
        match line.map(|cell| self.cell(cell)).all_equal_value() {
            Ok(Cell::Occupied(player)) => Some(player),
            _ => None,
        }
    }

    fn rows(&self) -> Option<Player> {
        (0..BOARD_WIDTH).find_map(|row| {
            self.line_owner((0..BOARD_WIDTH).map(move |col| Move::from_coordinates(row, col)))
        })
    }

    fn columns(&self) -> Option<Player> {
        (0..BOARD_WIDTH).find_map(|col| {
            self.line_owner((0..BOARD_WIDTH).map(move |row| Move::from_coordinates(row, col)))
        })
    }

    fn diagonals(&self) -> Option<Player> {
        self.line_owner((0..BOARD_WIDTH).map(|i| Move::from_coordinates(i, i)))
            .or_else(|| {
                self.line_owner(
                    (0..BOARD_WIDTH).map(|i| Move::from_coordinates(i, BOARD_WIDTH - 1 - i)),
                )
            })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for Board {
    type Action = Move;
    type Actions = MoveList;

    fn actions(&self) -> MoveList {
        self.legal_moves()
    }

    fn apply(&mut self, action: Move) {
        debug_assert!(self.is_legal(action), "{action} is occupied:\n{self}");
        self.cells[action.index() as usize] = Cell::Occupied(self.player_to_move);
        self.player_to_move = !self.player_to_move;
    }

    /// Clears the cell. Clearing an empty cell is a no-op.
    fn undo(&mut self, action: Move) {
        self.cells[action.index() as usize] = Cell::Empty;
    }

    fn is_terminal(&self) -> bool {
        self.occupied() == BOARD_SIZE as usize || self.winner().is_some()
    }

    /// Checks rows, then columns, then the diagonals and reports the first
    /// complete line.
    fn winner(&self) -> Option<Player> {
        self.rows()
            .or_else(|| self.columns())
            .or_else(|| self.diagonals())
    }

    fn player_to_move(&self) -> Player {
        self.player_to_move
    }

    fn set_player_to_move(&mut self, player: Player) {
        self.player_to_move = player;
    }
}

impl TryFrom<&str> for Board {
    type Error = anyhow::Error;

    /// Parses the grid in the same format as [`fmt::Display`] produces:
    /// [`BOARD_SIZE`] glyphs (`-`, `X`, `O`) in row-major order, whitespace is
    /// ignored. The player to move is inferred from the marker counts.
    fn try_from(input: &str) -> anyhow::Result<Self> {
        let glyphs: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
        if glyphs.len() != BOARD_SIZE as usize {
            bail!("expected {BOARD_SIZE} cells, got {}", glyphs.len());
        }
        let mut board = Self::new();
        for (cell, glyph) in board.cells.iter_mut().zip(glyphs) {
            *cell = match glyph {
                '-' => Cell::Empty,
                'X' | 'x' => Cell::Occupied(Player::One),
                'O' | 'o' => Cell::Occupied(Player::Two),
                _ => bail!("unexpected cell glyph '{glyph}'"),
            };
        }
        let count = |player| {
            board
                .cells
                .iter()
                .filter(|&&cell| cell == Cell::Occupied(player))
                .count()
        };
        let (first, second) = (count(Player::One), count(Player::Two));
        board.player_to_move = match first.checked_sub(second) {
            Some(0) => Player::One,
            Some(1) => Player::Two,
            _ => bail!("expected X to have the same or one more marker than O, got {first} and {second}"),
        };
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(BOARD_WIDTH as usize) {
            writeln!(f, "{}", row.iter().join(""))?;
        }
        Ok(())
    }
}
