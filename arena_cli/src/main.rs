//! Arena - run a combat campaign from the command line

use clap::{Parser, ValueEnum};
use combat_core::event::{Broadcast, ConsoleLog, FileLog, DEFAULT_LOG_PATH};
use combat_core::{Outcome, Side, TurnOrder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use roster_core::{ConfigError, Roster};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "arena")]
#[command(about = "Run a hero through a queue of monsters")]
struct Cli {
    /// Roster TOML file (defaults to the built-in Goblin, Orc and Troll lineup)
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Seed for the battle RNG (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Override the roster's turn order
    #[arg(long, value_enum)]
    turn_order: Option<TurnOrderArg>,

    /// Durable battle log, appended to
    #[arg(long, default_value = DEFAULT_LOG_PATH)]
    log_file: PathBuf,

    /// Do not write the durable battle log
    #[arg(long)]
    no_log_file: bool,

    /// Print the outcome as JSON instead of narrating the battle
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum TurnOrderArg {
    ProtagonistFirst,
    Random,
    Simultaneous,
}

impl From<TurnOrderArg> for TurnOrder {
    fn from(arg: TurnOrderArg) -> Self {
        match arg {
            TurnOrderArg::ProtagonistFirst => TurnOrder::ProtagonistFirst,
            TurnOrderArg::Random => TurnOrder::Random,
            TurnOrderArg::Simultaneous => TurnOrder::Simultaneous,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Could not encode outcome: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Report<'a> {
    seed: u64,
    outcome: &'a Outcome,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Campaign could not start: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut roster = match &cli.roster {
        Some(path) => Roster::load(path)?,
        None => Roster::default(),
    };
    if let Some(order) = cli.turn_order {
        roster = roster.with_turn_order(order.into());
    }
    let campaign = roster.build_campaign()?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, turn_order = ?roster.rules.turn_order, "starting campaign");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut sink = Broadcast::new();
    if !cli.json {
        sink.add(ConsoleLog::stdout());
        println!("{}", roster.listing());
    }
    if !cli.no_log_file {
        sink.add(FileLog::new(cli.log_file.clone()));
    }

    let outcome = campaign.run(&mut rng, &mut sink);
    sink.flush();
    if sink.failures() > 0 {
        tracing::warn!(failures = sink.failures(), "some battle events were not delivered");
    }

    if cli.json {
        let report = Report {
            seed,
            outcome: &outcome,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    for encounter in &outcome.encounters {
        let result = match encounter.victor {
            Side::Protagonist => "won",
            Side::Opponent => "lost",
        };
        println!(
            "Battle vs {}: {} after {} rounds",
            encounter.opponent, result, encounter.rounds
        );
    }
    println!("\n{}", roster.inventory);
    println!("\nWinner: {}", outcome.winner_name());
    Ok(())
}
