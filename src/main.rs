//! Mage Craft - Main Binary
//!
//! Runs auto-played matches of the Mage Craft chain-scoring rules: both
//! seats are driven by the best-response search, which makes the binary a
//! deterministic rules testbed given a fixed seed.

use clap::{Parser, Subcommand};
use magecraft::{
    core::Seat,
    game::VerbosityLevel,
    loader::{CardCatalog, DeckLoader, MatchInitializer},
    Result,
};
use std::path::PathBuf;

/// Verbosity level for match output (supports both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

#[derive(Parser)]
#[command(name = "magecraft")]
#[command(about = "Mage Craft - trading-card playtest engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Auto-play a match, both seats driven by the best-response search
    Play {
        /// Deck list file (.json) for the player seat
        #[arg(value_name = "PLAYER_DECK")]
        deck1: PathBuf,

        /// Deck list file (.json) for the opponent seat
        #[arg(value_name = "OPPONENT_DECK")]
        deck2: PathBuf,

        /// Card catalog file
        #[arg(long, default_value = "data/cards.json")]
        cards: PathBuf,

        /// Player seat name
        #[arg(long, default_value = "Player")]
        p1_name: String,

        /// Opponent seat name
        #[arg(long, default_value = "Opponent")]
        p2_name: String,

        /// Set random seed for deterministic matches
        #[arg(long)]
        seed: Option<u64>,

        /// Maximum rounds before the match is called
        #[arg(long, default_value_t = 40)]
        rounds: u32,

        /// End the match when a seat reaches this many victory points
        /// (0 = play until the round cap)
        #[arg(long, default_value_t = 0)]
        first_to: u32,

        /// Verbosity level for match output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            deck1,
            deck2,
            cards,
            p1_name,
            p2_name,
            seed,
            rounds,
            first_to,
            verbosity,
        } => run_match(
            &deck1, &deck2, &cards, p1_name, p2_name, seed, rounds, first_to, verbosity.0,
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_match(
    deck1: &PathBuf,
    deck2: &PathBuf,
    cards: &PathBuf,
    p1_name: String,
    p2_name: String,
    seed: Option<u64>,
    rounds: u32,
    first_to: u32,
    verbosity: VerbosityLevel,
) -> Result<()> {
    let catalog = CardCatalog::load_from_file(cards)?;
    let player_deck = DeckLoader::load_from_file(deck1)?;
    let opponent_deck = DeckLoader::load_from_file(deck2)?;

    let mut state = MatchInitializer::new(&catalog).init_match(
        p1_name,
        &player_deck,
        p2_name,
        &opponent_deck,
    )?;
    state.logger.set_verbosity(verbosity);
    if let Some(seed) = seed {
        state.seed_rng(seed);
    }
    state.start()?;

    while let Some(seat) = state.phase.staging_seat() {
        if state.battlefield.round > rounds {
            break;
        }
        if first_to > 0
            && [Seat::Player, Seat::Opponent]
                .iter()
                .any(|&s| state.battlefield.victory_points(s) >= first_to)
        {
            break;
        }
        state.auto_turn(seat)?;
        state.advance_round();
    }

    let p1 = state.player(Seat::Player).name.clone();
    let p2 = state.player(Seat::Opponent).name.clone();
    state.logger.minimal("=== Match Over ===");
    state.logger.minimal(&format!(
        "{} {} - {} {} after {} rounds",
        p1,
        state.battlefield.victory_points(Seat::Player),
        p2,
        state.battlefield.victory_points(Seat::Opponent),
        state.battlefield.round - 1,
    ));

    Ok(())
}
