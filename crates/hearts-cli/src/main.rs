use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;

use hearts_agents::{FillPolicy, RolloutHorizon};
use hearts_cli::config::GameConfig;
use hearts_cli::logging::init_logging;
use hearts_cli::report::{render_outcome, render_round};
use hearts_core::AppInfo;
use hearts_core::game::engine::HeartsGame;
use hearts_core::game::serialization::TableSnapshot;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FillArg {
    Manual,
    Random,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HorizonArg {
    Round,
    Trick,
}

/// Play Hearts against Monte Carlo tree search and random players.
#[derive(Debug, Parser)]
#[command(name = "hearts", author, version, about = AppInfo::description())]
struct Cli {
    /// Path to an optional YAML configuration file. Flags override its values.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of MCTS seats.
    #[arg(long, value_name = "N")]
    mcts: Option<usize>,

    /// Number of uniformly random seats.
    #[arg(long, value_name = "N")]
    random: Option<usize>,

    /// Number of seats played from this terminal.
    #[arg(long, value_name = "N")]
    manual: Option<usize>,

    /// Who takes seats left over after the counts above.
    #[arg(long, value_enum)]
    fill: Option<FillArg>,

    /// Rollouts per MCTS decision.
    #[arg(long, value_name = "N")]
    simulations: Option<u32>,

    /// UCB exploration constant.
    #[arg(long, value_name = "C")]
    exploration: Option<f64>,

    /// Round score below which a rollout counts as a win.
    #[arg(long, value_name = "N")]
    success_threshold: Option<u32>,

    /// Rollout worker threads per MCTS seat.
    #[arg(long, value_name = "N")]
    workers: Option<usize>,

    /// Wall-clock budget per MCTS decision; replaces the simulation count.
    #[arg(long, value_name = "MS")]
    time_budget_ms: Option<u64>,

    /// How far each rollout plays.
    #[arg(long, value_enum)]
    horizon: Option<HorizonArg>,

    /// Roll out against the real hidden hands instead of redealing them.
    #[arg(long)]
    no_determinize: bool,

    /// The game ends once any seat reaches this score.
    #[arg(long, value_name = "N")]
    target_score: Option<u32>,

    /// Seed for dealing and for the agents.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,

    /// Write logs to a file instead of stderr.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print the table as JSON after every round.
    #[arg(long)]
    show_state: bool,

    /// Exit after validating the configuration (no game is played).
    #[arg(long)]
    validate_only: bool,
}

impl Cli {
    fn apply(&self, config: &mut GameConfig) {
        if let Some(n) = self.mcts {
            config.seats.mcts = n;
        }
        if let Some(n) = self.random {
            config.seats.random = n;
        }
        if let Some(n) = self.manual {
            config.seats.manual = n;
        }
        if let Some(fill) = self.fill {
            config.seats.fill = match fill {
                FillArg::Manual => FillPolicy::Manual,
                FillArg::Random => FillPolicy::Random,
            };
        }
        if let Some(n) = self.simulations {
            config.mcts.simulations = n;
        }
        if let Some(c) = self.exploration {
            config.mcts.exploration = c;
        }
        if let Some(n) = self.success_threshold {
            config.mcts.success_threshold = n;
        }
        if let Some(n) = self.workers {
            config.mcts.workers = n;
        }
        if let Some(ms) = self.time_budget_ms {
            config.mcts.time_budget_ms = Some(ms);
        }
        if let Some(horizon) = self.horizon {
            config.mcts.horizon = match horizon {
                HorizonArg::Round => RolloutHorizon::EndOfRound,
                HorizonArg::Trick => RolloutHorizon::EndOfTrick,
            };
        }
        if self.no_determinize {
            config.mcts.determinize = false;
        }
        if let Some(n) = self.target_score {
            config.game.target_score = n;
        }
        if let Some(seed) = self.seed {
            config.game.seed = Some(seed);
            if config.mcts.seed.is_none() {
                config.mcts.seed = Some(seed);
            }
        }
        if let Some(level) = self.log_level.as_ref() {
            config.logging.level = level.clone();
        }
        if self.log_json {
            config.logging.json = true;
        }
        if let Some(path) = self.log_file.as_ref() {
            config.logging.file = Some(path.clone());
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::default(),
    };
    cli.apply(&mut config);
    config.validate().context("invalid settings")?;

    let _logging_guard = init_logging(&config.logging)?;
    let lineup = config.lineup();

    if cli.validate_only {
        println!(
            "Configuration valid: {} MCTS, {} random, {} manual seat(s), target {}",
            lineup.mcts, lineup.random, lineup.manual, config.game.target_score
        );
        return Ok(());
    }

    let seats = lineup
        .build(&config.mcts, config.seats.fill)
        .context("building seats")?;
    let seed = config.game.seed.unwrap_or_else(rand::random);
    info!(
        app = AppInfo::name(),
        version = AppInfo::version(),
        seed,
        target = config.game.target_score,
        "starting game"
    );

    let mut game = HeartsGame::new(seats, seed).with_target_score(config.game.target_score);
    println!("Welcome to Hearts! Playing to {} points.", game.target_score());

    while !game.is_over() {
        let summary = game.start_round().context("round aborted")?;
        print!("{}", render_round(game.table(), &summary));
        if cli.show_state {
            println!("{}", TableSnapshot::to_json(game.table())?);
        }
    }

    print!("{}", render_outcome(game.table(), &game.outcome()));
    Ok(())
}
