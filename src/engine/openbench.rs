//! Implementing a `bench` command gives a quick and reproducible estimate of
//! the search speed: it runs the search on a small fixed set of positions and
//! reports the throughput in rounds per second.

use std::io::Write;
use std::time::Instant;

use crate::search::{Config, RandomSource, Searcher};
use crate::tictactoe::{Board, Move, BOARD_WIDTH};

/// Openings of increasing depth, as 1-based cell numbers.
const POSITIONS: [&[u8]; 4] = [&[], &[5], &[1, 5, 9], &[5, 1, 3, 7]];

/// Runs the search on every bench position and prints
/// `<rounds> rounds <rps> rps`.
///
/// # Errors
///
/// Returns an error if the output can not be written.
pub fn bench(config: Config, rng: impl RandomSource, out: &mut impl Write) -> anyhow::Result<()> {
    let mut searcher = Searcher::new(config, rng);
    let mut total_rounds: u64 = 0;
    let timer = Instant::now();

    for cells in POSITIONS {
        let moves: Vec<Move> = cells
            .iter()
            .map(|&cell| Move::from_coordinates((cell - 1) / BOARD_WIDTH, (cell - 1) % BOARD_WIDTH))
            .collect();
        let mut board = Board::from_moves(&moves)?;
        let tree = searcher.search(&mut board);
        writeln!(
            out,
            "position {} nodes {}",
            board.to_string().replace('\n', "/"),
            tree.len()
        )?;
        total_rounds += u64::from(config.rounds);
    }

    let elapsed = timer.elapsed();
    writeln!(
        out,
        "{} rounds {} rps",
        total_rounds,
        (total_rounds as f64 / elapsed.as_secs_f64()) as u64,
    )?;
    Ok(())
}
