use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use twin_snake::game::{CollisionPolicy, GameConfig, ModeConfig, PlayerCount};
use twin_snake::highscore::HighscoreList;
use twin_snake::modes::{HumanConfig, HumanMode};

#[derive(Parser)]
#[command(name = "twin_snake")]
#[command(version, about = "Snake for one or two players on a wrap-around grid")]
struct Cli {
    /// Number of local players (player 1: arrow keys, player 2: WASD)
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=2))]
    players: u8,

    /// What happens when a snake runs into a body
    #[arg(long, default_value = "traditional")]
    policy: Policy,

    /// Side length of the square grid
    #[arg(long, default_value = "20", value_parser = clap::value_parser!(u16).range(4..))]
    grid_size: u16,

    /// Milliseconds between simulation ticks
    #[arg(long, default_value = "200")]
    tick_ms: u64,

    /// Seed for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,

    /// File where highscores are kept
    #[arg(long)]
    highscores: Option<PathBuf>,

    /// Delete the stored highscores before playing
    #[arg(long, requires = "highscores")]
    clear_highscores: bool,

    /// Write logs to this file (the terminal belongs to the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Policy {
    /// Any collision ends the game for everyone
    Traditional,
    /// A snake that collides starts over; play goes on
    Endless,
}

impl From<Policy> for CollisionPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Traditional => CollisionPolicy::Traditional,
            Policy::Endless => CollisionPolicy::Endless,
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    if cli.clear_highscores {
        if let Some(path) = &cli.highscores {
            HighscoreList::default().save(path)?;
        }
    }

    let players = if cli.players == 2 {
        PlayerCount::Two
    } else {
        PlayerCount::One
    };

    let config = HumanConfig {
        game: GameConfig::new(cli.grid_size as usize),
        mode: ModeConfig::new(players, cli.policy.into()),
        tick_interval: Duration::from_millis(cli.tick_ms.max(1)),
        seed: cli.seed,
        highscore_path: cli.highscores,
    };

    let mut human_mode = HumanMode::new(config)?;
    human_mode.run().await?;

    Ok(())
}
