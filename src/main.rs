use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use grid_snake::config::THEME_CLASSIC;
use grid_snake::error::AppError;
use grid_snake::game::GameState;
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::logging::init_file_logger;
use grid_snake::renderer;
use grid_snake::settings::{Settings, SettingsFile, default_settings_path, load_settings_file};
use grid_snake::terminal_runtime::TerminalSession;
use simplelog::LevelFilter;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Board height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Milliseconds between snake moves.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file (JSON); defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log level used with --log-file.
    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

impl Cli {
    fn overrides(&self) -> SettingsFile {
        SettingsFile {
            width: self.width,
            height: self.height,
            tick_interval_ms: self.tick_ms,
            seed: self.seed,
        }
    }
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logger(path, cli.log_level.into())?;
    }

    let settings = load_settings(&cli)?;
    log::info!(
        "starting {}x{} game, tick {:?}",
        settings.grid.width,
        settings.grid.height,
        settings.tick_interval
    );

    run(settings)?;

    log::info!("quit");
    Ok(())
}

fn load_settings(cli: &Cli) -> Result<Settings, AppError> {
    let file = match (&cli.config, default_settings_path()) {
        (Some(path), _) => load_settings_file(path, true)?,
        (None, Some(path)) => load_settings_file(&path, false)?,
        (None, None) => {
            log::warn!("no config directory on this platform; using defaults");
            SettingsFile::default()
        }
    };

    Ok(Settings::resolve(file.merged_with(cli.overrides()))?)
}

fn run(settings: Settings) -> Result<(), AppError> {
    let mut state = match settings.seed {
        Some(seed) => GameState::new_with_seed(settings.grid, seed),
        None => GameState::new(settings.grid),
    };
    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new(Duration::ZERO);
    let mut last_tick = Instant::now();

    loop {
        session.draw(|frame| renderer::render(frame, &state, &THEME_CLASSIC))?;

        while let Some(game_input) = input.poll_input()? {
            match game_input {
                GameInput::Quit => return Ok(()),
                GameInput::Direction(heading) => state.set_direction(heading),
                GameInput::Restart if !state.is_running() => {
                    log::info!("restart after score {}", state.score());
                    state.reset();
                    last_tick = Instant::now();
                }
                GameInput::Restart => {}
            }
        }

        if last_tick.elapsed() >= settings.tick_interval {
            state.tick();
            last_tick = Instant::now();
        }

        thread::sleep(FRAME_INTERVAL);
    }
}
