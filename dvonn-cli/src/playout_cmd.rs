//! Playout command - play a game of uniformly random legal moves
//!
//! Produces test games for the other tools; there is no search or
//! evaluation involved.

use anyhow::{Context, Result};
use clap::Args;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use dvonn_core::{OutputFormat, Phase, Replayer};

use crate::replay_cmd::{parse_output_format, render, LoadedGame};

/// Upper bound on moves in one game; real games end well before this
const MAX_MOVES: usize = 500;

#[derive(Args)]
pub struct PlayoutArgs {
    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format: state, plain, transcript, logfile, dvonner or json
    #[arg(long, short, default_value = "logfile", value_parser = parse_output_format)]
    pub output: OutputFormat,
}

/// Run the playout command
pub fn run(args: PlayoutArgs) -> Result<()> {
    let mut rng = create_rng(args.seed);
    let replayer = play_random_game(&mut rng)?;

    let game = replayer.game();
    let [white, black] = game.board().scores();
    tracing::info!(
        "Random game finished after {} moves: {:?} ({} - {})",
        replayer.history().len(),
        game.result(),
        white,
        black
    );

    let loaded = LoadedGame {
        replayer,
        metadata: Vec::new(),
    };
    print!("{}", render(&loaded, args.output)?);
    Ok(())
}

fn play_random_game(rng: &mut ChaCha8Rng) -> Result<Replayer> {
    let mut replayer = Replayer::new();
    while replayer.game().phase() != Phase::Complete && replayer.history().len() < MAX_MOVES {
        let moves = replayer.game().legal_moves();
        let Some(&mv) = moves.choose(rng) else {
            break;
        };
        replayer
            .play(&[mv])
            .with_context(|| format!("Random move {} was rejected", mv))?;
    }
    Ok(replayer)
}

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
