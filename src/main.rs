//! Dual N-Back Trainer - CLI
//!
//! Interactive TUI game plus plain-terminal score listing and simulation.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dual_nback::{
    commands::{SimulationConfig, run_simulation, top_scores},
    core::{
        GameConfig,
        config::{DEFAULT_DISPLAY_TIME, DEFAULT_GRID_SIZE, DEFAULT_N, DEFAULT_TRIALS},
    },
    interactive::{App, run_tui},
    output::{print_scores_table, print_simulation_result},
    session::PlayerKind,
    storage::{JsonScoreStore, MemoryScoreStore, ScoreStore},
};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "nback",
    about = "Dual N-back working memory trainer for the terminal",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Write log output to this file (the TUI never logs to the terminal)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log filter: a level (error, warn, info, debug, trace) or
    /// `RUST_LOG`-style directives such as `dual_nback::session=debug`
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// High-score file (default: ~/.nback_scores.json)
    #[arg(long, global = true)]
    scores_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play in the interactive TUI (default)
    Play {
        #[command(flatten)]
        game: GameArgs,

        /// Seed for reproducible sequences
        #[arg(long)]
        seed: Option<u64>,

        /// Sequence strategy: controlled (default) or uniform
        #[arg(short, long, default_value = "controlled")]
        strategy: String,
    },

    /// Print the high-score table
    Scores,

    /// Run automated sessions and report aggregate statistics
    Simulate {
        #[command(flatten)]
        game: GameArgs,

        /// Number of sessions to run
        #[arg(long, default_value = "100")]
        sessions: usize,

        /// Simulated player: perfect, idle, eager, guesser
        #[arg(short, long, default_value = "perfect")]
        player: String,

        /// Base seed; session i uses seed + i
        #[arg(long, default_value = "1")]
        seed: u64,

        /// Sequence strategy: controlled (default) or uniform
        #[arg(short, long, default_value = "controlled")]
        strategy: String,
    },
}

/// Game parameters shared by `play` and `simulate`
#[derive(Args, Default)]
struct GameArgs {
    /// How many steps back to compare (1-8)
    #[arg(short = 'n', long = "n-value")]
    n: Option<usize>,

    /// Grid side length (3-9)
    #[arg(short, long)]
    grid_size: Option<usize>,

    /// Total trials, including the first n memorize trials
    #[arg(short, long)]
    trials: Option<usize>,

    /// Response window per trial in seconds
    #[arg(short, long)]
    display_time: Option<f64>,
}

impl GameArgs {
    fn any_given(&self) -> bool {
        self.n.is_some()
            || self.grid_size.is_some()
            || self.trials.is_some()
            || self.display_time.is_some()
    }

    fn to_config(&self) -> Result<GameConfig> {
        GameConfig::new(
            self.n.unwrap_or(DEFAULT_N),
            self.grid_size.unwrap_or(DEFAULT_GRID_SIZE),
            self.trials.unwrap_or(DEFAULT_TRIALS),
            self.display_time.unwrap_or(DEFAULT_DISPLAY_TIME),
        )
        .context("invalid game settings")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play {
        game: GameArgs::default(),
        seed: None,
        strategy: "controlled".to_string(),
    });

    let is_tui = matches!(command, Commands::Play { .. });
    init_logging(&cli.log_level, cli.log_file.as_deref(), is_tui)?;

    match command {
        Commands::Play {
            game,
            seed,
            strategy,
        } => run_play_command(&game, seed, &strategy, cli.scores_file),
        Commands::Scores => run_scores_command(cli.scores_file),
        Commands::Simulate {
            game,
            sessions,
            player,
            seed,
            strategy,
        } => run_simulate_command(&game, sessions, &player, seed, strategy),
    }
}

/// Install the fmt subscriber
///
/// The TUI owns the terminal, so without a log file it gets no subscriber.
fn init_logging(filter: &str, log_file: Option<&Path>, is_tui: bool) -> Result<()> {
    let filter = log_filter(filter)?;

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if !is_tui => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

/// Parse `--log-level` as `RUST_LOG`-style directives
fn log_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).with_context(|| format!("invalid log filter '{directives}'"))
}

fn open_store(path: Option<PathBuf>) -> Box<dyn ScoreStore> {
    if let Some(path) = path {
        return Box::new(JsonScoreStore::new(path));
    }
    match JsonScoreStore::in_home_dir() {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!("high scores will not be saved: {err}");
            Box::new(MemoryScoreStore::default())
        }
    }
}

fn run_play_command(
    game: &GameArgs,
    seed: Option<u64>,
    strategy: &str,
    scores_file: Option<PathBuf>,
) -> Result<()> {
    // Validate before the terminal switches to the alternate screen
    let config = game.to_config()?;
    let app = App::new(open_store(scores_file), strategy, seed);

    // Any game parameter on the command line skips the menu
    let app = if game.any_given() {
        app.with_config(config)
    } else {
        app
    };
    run_tui(app)
}

fn run_scores_command(scores_file: Option<PathBuf>) -> Result<()> {
    let store = open_store(scores_file);
    let records = top_scores(store.as_ref()).context("cannot read high scores")?;
    print_scores_table(&records);
    Ok(())
}

fn run_simulate_command(
    game: &GameArgs,
    sessions: usize,
    player: &str,
    seed: u64,
    strategy: String,
) -> Result<()> {
    let player = PlayerKind::from_name(player)
        .with_context(|| format!("unknown player '{player}' (perfect, idle, eager, guesser)"))?;

    let config = SimulationConfig {
        game: game.to_config()?,
        player,
        sessions,
        strategy,
        seed,
        show_progress: true,
    };

    println!(
        "Running {} sessions with the {:?} player...",
        config.sessions, config.player
    );
    let result = run_simulation(&config)?;
    print_simulation_result(&result, &config);
    Ok(())
}
