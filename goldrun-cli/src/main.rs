//! GOLDRUN CLI - Command-line interface
//!
//! Commands:
//! - play: Play against the Monster in the terminal
//! - simulate: Pit an AI Player against the Monster over many games
//! - layout: Print, check or export a board layout

mod config;
mod layout_cmd;
mod play_cmd;
mod simulate_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "goldrun")]
#[command(about = "Grab the gold, reach the exit, escape the Monster")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game against the Monster
    Play(play_cmd::PlayArgs),
    /// Run automated games
    Simulate(simulate_cmd::SimulateArgs),
    /// Print or export a board layout
    Layout(layout_cmd::LayoutArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never break up the board
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Simulate(args) => simulate_cmd::run(args, cli.seed),
        Commands::Layout(args) => layout_cmd::run(args),
    }
}
