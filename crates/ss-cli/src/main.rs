//! Terminal frontend for the Swimming Star narrative.

mod commands;
mod prompt;
mod render;

use std::process;

use clap::{Args, Parser, Subcommand};

use ss_core::SessionConfig;

use commands::play::PlayOptions;
use render::{DEFAULT_WIDTH, RenderConfig};

/// Upper bound accepted for `--energy` and `--max-energy`.
const ENERGY_LIMIT: i64 = 9999;

#[derive(Parser)]
#[command(
    name = "swimstar",
    about = "Swimming Star: guide a star through the void, one choice at a time",
    version,
    propagate_version = true,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the story (default when no command is given)
    Play(PlayArgs),

    /// Validate the built-in story graph and report its size
    Check,

    /// Print every node with its choices and targets
    Map,
}

#[derive(Args, Clone)]
struct PlayArgs {
    /// Initial energy
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(i32).range(0..=ENERGY_LIMIT))]
    energy: i32,

    /// Maximum energy
    #[arg(long, default_value = "12", value_parser = clap::value_parser!(i32).range(1..=ENERGY_LIMIT))]
    max_energy: i32,

    /// Wrap width for narration
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Disable ANSI colours
    #[arg(long)]
    no_color: bool,

    /// Print a table of energy and flags at the end
    #[arg(long)]
    summary: bool,

    /// Print the final state as JSON at the end
    #[arg(long)]
    json: bool,
}

impl PlayArgs {
    fn options(&self) -> PlayOptions {
        PlayOptions {
            session: SessionConfig::default()
                .with_max_energy(self.max_energy)
                .with_initial_energy(self.energy),
            render: RenderConfig {
                width: self.width,
                color: !self.no_color,
            },
            summary: self.summary,
            json: self.json,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        None => commands::play::run(&cli.play.options()),
        Some(Commands::Play(args)) => commands::play::run(&args.options()),
        Some(Commands::Check) => commands::check::run(),
        Some(Commands::Map) => commands::map::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
