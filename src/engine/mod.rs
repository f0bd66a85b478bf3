//! The engine puts all pieces together: it owns the real game, asks the
//! [`Searcher`] for its own moves and gets the opponent's moves from a human
//! (through the input stream), a random player or a second search.
//!
//! [`Engine::play`] is the "main loop" which plays one game to the end and
//! reports the result to the output stream.

use std::io::{BufRead, Write};

use anyhow::{bail, Context};
use tracing::info;

use crate::environment::{Environment, Player};
use crate::search::{RandomSource, Searcher};
use crate::tictactoe::{Board, Move, BOARD_SIZE};

mod command;
pub mod openbench;

use command::Command;

/// Who plays against the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Opponent {
    /// Moves are read from the input stream.
    #[default]
    Human,
    /// Uniformly random legal moves.
    Random,
    /// The same search plays both sides.
    Engine,
}

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    #[allow(missing_docs)]
    Win(Player),
    #[allow(missing_docs)]
    Draw,
    /// The human player quit before the game was over.
    Abandoned,
}

/// Plays a single game of tic-tac-toe between the search and an [`Opponent`]
/// and handles all I/O.
pub struct Engine<R: BufRead, W: Write, S: RandomSource> {
    board: Board,
    searcher: Searcher<S>,
    side: Player,
    opponent: Opponent,
    /// Only used by [`Opponent::Random`].
    rng: S,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write, S: RandomSource> Engine<R, W, S> {
    /// Creates an engine playing [`Player::One`] from the empty board.
    #[must_use]
    pub fn new(input: R, output: W, searcher: Searcher<S>, opponent: Opponent, rng: S) -> Self {
        Self {
            board: Board::new(),
            searcher,
            side: Player::One,
            opponent,
            rng,
            input,
            output,
        }
    }

    /// Makes the engine play `side` instead of moving first.
    #[must_use]
    pub fn playing(mut self, side: Player) -> Self {
        self.side = side;
        self
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Plays moves until the game is over or the human quits. The board is
    /// printed after every move and the winner at the end.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the input or writing the output fails, or
    /// if the input ends before the game does.
    pub fn play(&mut self) -> anyhow::Result<GameResult> {
        if self.opponent == Opponent::Human {
            writeln!(
                self.output,
                "You play {}, cells are numbered 1-{BOARD_SIZE} row by row.",
                !self.side
            )?;
            write!(self.output, "{}", self.board)?;
        }
        while !self.board.is_terminal() {
            let player = self.board.player_to_move();
            let next_move = if player == self.side {
                self.engine_move()?
            } else {
                match self.opponent_move()? {
                    Some(next_move) => next_move,
                    None => {
                        info!("game abandoned");
                        return Ok(GameResult::Abandoned);
                    },
                }
            };
            self.board.apply(next_move);
            info!(%player, cell = %next_move, "move played");
            writeln!(self.output, "{player} plays {next_move}")?;
            write!(self.output, "{}", self.board)?;
        }

        let winner = self.board.winner();
        match winner {
            Some(player) => writeln!(self.output, "WINNER: {player}")?,
            None => writeln!(self.output, "WINNER: NO ONE")?,
        }
        Ok(winner.map_or(GameResult::Draw, GameResult::Win))
    }

    fn engine_move(&mut self) -> anyhow::Result<Move> {
        self.searcher
            .get_next_move(&mut self.board)
            .context("search found no moves in an unfinished game")
    }

    /// Returns `None` if the human quits.
    fn opponent_move(&mut self) -> anyhow::Result<Option<Move>> {
        match self.opponent {
            Opponent::Human => self.human_move(),
            Opponent::Random => {
                let moves = self.board.legal_moves();
                Ok(Some(moves[self.rng.pick(moves.len())]))
            },
            Opponent::Engine => self.engine_move().map(Some),
        }
    }

    /// Keeps asking until the input is a legal move or "quit". Nothing
    /// unchecked ever reaches the board.
    fn human_move(&mut self) -> anyhow::Result<Option<Move>> {
        loop {
            write!(self.output, "Your move: ")?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                bail!("input ended before the game was over");
            }
            match Command::parse(&line) {
                Command::Play(next_move) if self.board.is_legal(next_move) => {
                    return Ok(Some(next_move));
                },
                Command::Play(next_move) => {
                    writeln!(self.output, "Cell {next_move} is already taken")?;
                },
                Command::Board => write!(self.output, "{}", self.board)?,
                Command::Help => writeln!(
                    self.output,
                    "Enter a cell number 1-{BOARD_SIZE} (row by row), \"board\" or \"quit\""
                )?,
                Command::Quit => return Ok(None),
                Command::Unknown(input) => {
                    writeln!(self.output, "Unknown command: {input:?}, try \"help\"")?;
                },
            }
        }
    }
}
