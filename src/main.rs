use std::io;

use anyhow::Context;
use clap::{Parser, Subcommand};
use naught::engine::{openbench, Opponent};
use naught::environment::Player;
use naught::search::{self, LeafEvaluation, Searcher};
use naught::Engine;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// Plays tic-tac-toe against a Monte Carlo Tree Search engine.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    #[command(subcommand)]
    command: Option<Mode>,
    /// Who plays against the engine.
    #[arg(long, value_enum, default_value_t = Opponent::Human)]
    opponent: Opponent,
    /// Search rounds per engine move.
    #[arg(long, default_value_t = search::DEFAULT_ROUNDS)]
    rounds: u32,
    /// UCB1 exploration constant used during the search.
    #[arg(long, default_value_t = search::DEFAULT_TEMPERATURE)]
    temperature: f64,
    /// Where random playouts of new leaves start.
    #[arg(long, value_enum, default_value_t = LeafEvaluation::Parent)]
    leaf_evaluation: LeafEvaluation,
    /// Let the opponent move first.
    #[arg(long)]
    second: bool,
    /// Seed for all random choices. Runs are not reproducible without it.
    #[arg(long)]
    seed: Option<u64>,
    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Play a single game (default).
    Play,
    /// Measure the search speed on a fixed set of positions.
    Bench,
}

impl Config {
    fn search_config(&self) -> anyhow::Result<search::Config> {
        let config = search::Config {
            rounds: self.rounds,
            temperature: self.temperature,
            leaf_evaluation: self.leaf_evaluation,
        };
        config.validate()?;
        Ok(config)
    }

    fn rng(&self, stream: u64) -> ChaCha8Rng {
        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        rng.set_stream(stream);
        rng
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(&config.log_level);
    let search_config = config.search_config()?;
    info!(?search_config, seed = ?config.seed, "starting");

    match config.command.unwrap_or(Mode::Play) {
        Mode::Bench => openbench::bench(search_config, config.rng(0), &mut io::stdout().lock()),
        Mode::Play => {
            naught::print_engine_info();
            naught::print_binary_info();
            let searcher = Searcher::new(search_config, config.rng(0));
            let side = if config.second { Player::Two } else { Player::One };
            let mut engine = Engine::new(
                io::stdin().lock(),
                io::stdout().lock(),
                searcher,
                config.opponent,
                config.rng(1),
            )
            .playing(side);
            let result = engine.play().context("game failed")?;
            info!(?result, "game over");
            Ok(())
        },
    }
}
