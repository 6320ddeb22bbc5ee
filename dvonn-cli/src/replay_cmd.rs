//! Replay command - load a game, apply extra moves, print the result
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_game(), continue_game(), render()
//! - Level 3: read_moves(), parse_tokens()
//! - Level 4: formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use dvonn_core::notation::{
    format_dvonner, format_logfile, format_transcript, parse_logfile, parse_transcript,
};
use dvonn_core::{
    decode_state, encode_state, replay, Game, Move, OutputFormat, ParseError, Phase,
    ReplayOptions, Replayer, Transcript,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ReplayArgs {
    /// Start from a 50-character state string
    #[arg(long, value_name = "STATE", conflicts_with_all = ["transcript", "logfile"])]
    pub state: Option<String>,

    /// Load moves from a Little Golem transcript
    #[arg(long, value_name = "FILE", conflicts_with = "logfile")]
    pub transcript: Option<PathBuf>,

    /// Load moves from a logfile (one or more moves per line)
    #[arg(long, value_name = "FILE")]
    pub logfile: Option<PathBuf>,

    /// Only replay the first N loaded moves
    #[arg(long, value_name = "N", conflicts_with = "state")]
    pub truncate: Option<usize>,

    /// Output format: state, plain, transcript, logfile, dvonner or json
    #[arg(long, short, default_value = "state", value_parser = parse_output_format)]
    pub output: OutputFormat,

    /// Moves to apply after loading, e.g. `A1` `C3E3` `PASS`
    #[arg(value_name = "MOVE")]
    pub moves: Vec<String>,
}

pub(crate) fn parse_output_format(s: &str) -> Result<OutputFormat, ParseError> {
    s.parse()
}

/// A loaded game together with any transcript metadata
pub(crate) struct LoadedGame {
    pub replayer: Replayer,
    pub metadata: Vec<(String, String)>,
}

// ============================================================================
// MAIN ENTRY POINT (Level 1)
// ============================================================================

/// Run the replay command
pub fn run(args: ReplayArgs) -> Result<()> {
    let mut loaded = load_game(&args)?;
    continue_game(&mut loaded.replayer, &args.moves)?;

    let game = loaded.replayer.game();
    tracing::info!(
        "Replayed {} moves, phase {:?}, result {:?}",
        loaded.replayer.history().len(),
        game.phase(),
        game.result()
    );

    print!("{}", render(&loaded, args.output)?);
    Ok(())
}

// ============================================================================
// LOADING (Level 2)
// ============================================================================

fn load_game(args: &ReplayArgs) -> Result<LoadedGame> {
    let options = ReplayOptions {
        truncate: args.truncate,
    };

    if let Some(state) = &args.state {
        let state = decode_state(state).context("Failed to decode state string")?;
        return Ok(LoadedGame {
            replayer: Replayer::from_game(Game::from_state(state)),
            metadata: Vec::new(),
        });
    }

    let (moves, metadata) = read_moves(args)?;
    let replayer = replay(&moves, &options).context("Failed to replay game")?;
    Ok(LoadedGame { replayer, metadata })
}

/// Apply moves given on the command line
fn continue_game(replayer: &mut Replayer, tokens: &[String]) -> Result<()> {
    if tokens.is_empty() {
        return Ok(());
    }
    let moves = parse_tokens(tokens)?;
    replayer
        .play(&moves)
        .context("Failed to apply command-line moves")?;
    Ok(())
}

// ============================================================================
// INPUT (Level 3)
// ============================================================================

fn read_moves(args: &ReplayArgs) -> Result<(Vec<Move>, Vec<(String, String)>)> {
    if let Some(path) = &args.transcript {
        let data = read_file(path)?;
        let transcript = parse_transcript(&data)
            .with_context(|| format!("Failed to parse transcript: {}", path.display()))?;
        return Ok((transcript.moves, transcript.metadata));
    }
    if let Some(path) = &args.logfile {
        let data = read_file(path)?;
        let moves = parse_logfile(&data)
            .with_context(|| format!("Failed to parse logfile: {}", path.display()))?;
        return Ok((moves, Vec::new()));
    }
    Ok((Vec::new(), Vec::new()))
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn parse_tokens(tokens: &[String]) -> Result<Vec<Move>> {
    tokens
        .iter()
        .map(|t| t.parse::<Move>().with_context(|| format!("Bad move argument '{}'", t)))
        .collect()
}

// ============================================================================
// OUTPUT (Level 2/4)
// ============================================================================

/// Format a loaded game. Move-list formats cover the moves applied in this
/// run, which is the whole game unless it was started from a state string.
pub(crate) fn render(loaded: &LoadedGame, format: OutputFormat) -> Result<String> {
    let replayer = &loaded.replayer;
    let game = replayer.game();
    let moves: Vec<Move> = replayer.history().iter().map(|snap| snap.mv).collect();

    let out = match format {
        OutputFormat::State => format!("{}\n", encode_state(game.state())?),
        OutputFormat::Plain => format!("{}{}\n", game.board(), status_line(game)),
        OutputFormat::Transcript => {
            let transcript = Transcript {
                metadata: loaded.metadata.clone(),
                moves,
            };
            format!(
                "{}\n",
                format_transcript(&transcript, game.phase() == Phase::Complete)
            )
        }
        OutputFormat::Logfile => format_logfile(&moves),
        OutputFormat::Dvonner => format_dvonner(&moves),
        OutputFormat::Json => format!("{}\n", serde_json::to_string(&replayer.records()?)?),
    };
    Ok(out)
}

fn status_line(game: &Game) -> String {
    let [white, black] = game.board().scores();
    match game.next_player() {
        Some(player) => format!(
            "{:?} phase, {:?} to move ({} - {})",
            game.phase(),
            player,
            white,
            black
        ),
        None => format!("Game over: {:?} ({} - {})", game.result(), white, black),
    }
}

// ============================================================================
// TESTS
// ============================================================================
