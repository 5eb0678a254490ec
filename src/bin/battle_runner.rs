//! Headless Battle Runner
//!
//! Plays a scenario AI vs AI to completion and prints the outcome.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use hexfront::battle::{AiCommander, AiDriver, BattleEngine, SeededDice};
use hexfront::core::{Difficulty, EngineConfig, Result, Side, Tick};
use hexfront::scenario::Scenario;

/// Headless Battle Runner - AI vs AI battles
#[derive(Parser, Debug)]
#[command(name = "battle_runner")]
#[command(about = "Run an AI vs AI battle on a bundled or custom scenario")]
struct Args {
    /// Scenario name under data/scenarios/, or a path to a .toml file
    #[arg(long, default_value = "volga_anvil")]
    scenario: String,

    /// Engine config file
    #[arg(long, default_value = "data/config/engine.toml")]
    config: PathBuf,

    /// Random seed for deterministic runs (overrides the config seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Difficulty for the configured AI side (overrides the config)
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,

    /// Maximum host ticks before the run is abandoned
    #[arg(long, default_value_t = 50_000)]
    max_ticks: Tick,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Log every action
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DifficultyArg {
    Normal,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// JSON output structure
#[derive(Serialize)]
struct BattleResult {
    scenario: String,
    seed: u64,
    ticks: Tick,
    turn: u32,
    finished: bool,
    winner: Option<Side>,
    ger_score: i32,
    sov_score: i32,
    ger_vp: u32,
    sov_vp: u32,
    ger_units_left: usize,
    sov_units_left: usize,
    events: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "hexfront=debug"
    } else {
        "hexfront=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = if args.config.exists() {
        EngineConfig::load(&args.config)?
    } else {
        tracing::warn!(path = %args.config.display(), "Config not found, using defaults");
        EngineConfig::default()
    };
    let seed = args
        .seed
        .or_else(|| (config.seed != 0).then_some(config.seed))
        .unwrap_or_else(rand::random);

    let scenario = if args.scenario.ends_with(".toml") {
        Scenario::load(&args.scenario)?
    } else {
        Scenario::load_named(&args.scenario)?
    };
    tracing::info!(scenario = %scenario.name, seed, "Starting battle");

    let mut engine = scenario.build_engine(Box::new(SeededDice::new(seed)))?;

    // The configured AI side plays at the chosen difficulty, its opponent at Normal
    let tuned_side = config.ai_side.unwrap_or(Side::Sov);
    let tuned = args
        .difficulty
        .map(Difficulty::from)
        .unwrap_or(config.ai.difficulty);
    let mut drivers: Vec<AiDriver> = Side::all()
        .iter()
        .map(|&side| {
            let difficulty = if side == tuned_side {
                tuned
            } else {
                Difficulty::Normal
            };
            let ai = AiCommander::new(side, difficulty);
            AiDriver::from_config(Box::new(ai), &config.ai)
        })
        .collect();

    let ticks = run(&mut engine, &mut drivers, args.max_ticks, args.verbose);
    if !engine.is_game_over() {
        tracing::warn!(
            ticks,
            turn = engine.turn(),
            "Tick limit reached before the battle ended"
        );
    }

    let result = summarize(&engine, &scenario.name, seed, ticks);
    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)?;
            println!("{}", json);
        }
        OutputFormat::Text => print_text(&result),
    }
    Ok(())
}

/// Tick both drivers until the battle ends or the tick budget runs out
fn run(
    engine: &mut BattleEngine,
    drivers: &mut [AiDriver],
    max_ticks: Tick,
    verbose: bool,
) -> Tick {
    let mut tick = 0;
    while !engine.is_game_over() && tick < max_ticks {
        tick += 1;
        let events_before = engine.log().len();
        for driver in drivers.iter_mut() {
            driver.on_tick(engine);
        }
        if verbose {
            for event in engine.log().since(events_before) {
                eprintln!("  [T{} {}] {}", event.turn, event.side, event.description);
            }
        }
    }
    tick
}

fn summarize(engine: &BattleEngine, scenario: &str, seed: u64, ticks: Tick) -> BattleResult {
    let (winner, ger_score, sov_score) = match engine.outcome() {
        Some(outcome) => (outcome.winner, outcome.scores.ger, outcome.scores.sov),
        None => (None, 0, 0),
    };
    BattleResult {
        scenario: scenario.to_string(),
        seed,
        ticks,
        turn: engine.turn(),
        finished: engine.is_game_over(),
        winner,
        ger_score,
        sov_score,
        ger_vp: engine.victory_points(Side::Ger),
        sov_vp: engine.victory_points(Side::Sov),
        ger_units_left: engine.roster().living_count(Side::Ger),
        sov_units_left: engine.roster().living_count(Side::Sov),
        events: engine.log().len(),
    }
}

fn print_text(result: &BattleResult) {
    println!("Battle Result");
    println!("=============");
    println!("Scenario: {}", result.scenario);
    match (result.finished, result.winner) {
        (false, _) => println!("Outcome: unfinished after {} ticks", result.ticks),
        (true, Some(side)) => println!("Outcome: {} victory", side),
        (true, None) => println!("Outcome: draw"),
    }
    println!("Turn: {}", result.turn);
    println!("Score: GER {} - SOV {}", result.ger_score, result.sov_score);
    println!(
        "Victory points: GER {} - SOV {}",
        result.ger_vp, result.sov_vp
    );
    println!(
        "Units left: GER {} - SOV {}",
        result.ger_units_left, result.sov_units_left
    );
    println!("Events logged: {}", result.events);
    println!();
    println!("Seed: {}", result.seed);
}
