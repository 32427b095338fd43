//! Frogtui — Frogger-style lane-crossing arcade game in the terminal.

mod app;
mod board;
mod clock;
mod collision;
mod entity;
mod game;
mod input;
mod motion;
mod rider;
mod spawner;
mod theme;
mod ui;

use anyhow::Result;
use app::App;
use board::{Band, Board, BoardError};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Options derived from CLI that affect the simulation and its pacing.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub board: Board,
    pub tick: Duration,
    pub frame: Duration,
    pub seed: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("tick interval must be at least 1 ms")]
    TickInterval,
    #[error("frame rate must be a positive number, got {0}")]
    FrameRate(f64),
}

impl GameConfig {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let board = Board::with_bands(args.hazard_band, args.float_band)?;
        if args.tick_ms == 0 {
            return Err(ConfigError::TickInterval);
        }
        if !(args.frame_rate.is_finite() && args.frame_rate > 0.0) {
            return Err(ConfigError::FrameRate(args.frame_rate));
        }
        Ok(Self {
            board,
            tick: Duration::from_millis(args.tick_ms),
            frame: Duration::from_secs_f64(1.0 / args.frame_rate),
            seed: args.seed.unwrap_or_else(rand::random),
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;
    let config = GameConfig::from_args(&args)?;
    log::info!(
        "starting: hazard band {}, float band {}, tick {:?}, seed {}",
        config.board.hazard_band,
        config.board.float_band,
        config.tick,
        config.seed
    );
    let theme = theme::Theme::load(args.theme.as_deref(), args.palette).unwrap_or_else(|e| {
        log::warn!("theme load failed ({e}), using defaults");
        theme::Theme::default_for(args.palette)
    });
    let mut app = App::new(config, theme);
    app.run()?;
    Ok(())
}

/// The terminal is owned by the game, so logs only go to a file when asked for.
/// `RUST_LOG` overrides the default `info` filter.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

/// Frogger-style arcade game in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "frogtui",
    version,
    about = "Frogger-style arcade game in the terminal. Cross the road and the river to reach the top.",
    long_about = "Frogtui is a terminal take on the classic lane-crossing arcade game.\n\n\
        Hop across a road full of cars, then ride the logs over the river to reach the goal \
        row. Touch a car, fall in the water or get carried off the edge and the round is over.\n\n\
        CONTROLS:\n  Arrows / hjkl  Move    R  Restart    Q / Esc  Quit\n\n\
        The on-screen pad can also be clicked with the mouse."
)]
pub struct Args {
    /// Milliseconds between simulation ticks.
    #[arg(long, default_value = "200", value_name = "MS")]
    pub tick_ms: u64,

    /// Rows holding cars, as START-END.
    #[arg(long, default_value = "3-7", value_name = "ROWS")]
    pub hazard_band: Band,

    /// Rows holding the river and its logs, as START-END.
    #[arg(long, default_value = "9-13", value_name = "ROWS")]
    pub float_band: Band,

    /// Seed for lane generation; random when not set.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Path to theme file (btop-style theme[key]=\"value\").
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Colour palette: normal (theme), high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Target render frames per second.
    #[arg(long, default_value = "30.0", value_name = "RATE")]
    pub frame_rate: f64,

    /// Write logs to this file (RUST_LOG sets the level).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}
