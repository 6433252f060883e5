//! Headless session simulator.
//!
//! Plays seeded games against a bot that finds the odd swatch with a fixed probability,
//! and reports how far it got. Useful for tuning the difficulty and time rules without
//! opening a window.
//!
//! Example:
//!   cargo run --bin swatch_sim -- --games 200 --accuracy 0.7 --guesses-per-second 2 --json

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;

use swatch_hunt::core::config::{GameConfig, DEFAULT_CONFIG_PATHS};
use swatch_hunt::{
    BestScoreStore, FileBestScoreStore, GuessOutcome, MemoryBestScoreStore, RoundEngine,
    TickOutcome, GRID_SIZE,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Simulate Swatch Hunt sessions headlessly", long_about = None)]
struct Args {
    #[arg(long, default_value_t = 20)]
    games: u32,
    /// Probability that a bot guess hits the odd swatch
    #[arg(long, default_value_t = 0.8)]
    accuracy: f64,
    #[arg(long, default_value_t = 1)]
    guesses_per_second: u32,
    /// Stop a game after this many simulated seconds even if the clock never empties
    #[arg(long, default_value_t = 600)]
    max_seconds: u32,
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Config layers (defaults to the game's own config files)
    #[arg(long = "config")]
    configs: Vec<PathBuf>,
    /// Persist the best score here instead of keeping it in memory
    #[arg(long)]
    best_score_file: Option<PathBuf>,
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize, Default)]
struct GameReport {
    score: u32,
    level: u32,
    correct: u32,
    incorrect: u32,
    seconds: u32,
    capped: bool,
    new_best: bool,
}

#[derive(Debug, Serialize, Default)]
struct Summary {
    games: u32,
    mean_score: f64,
    max_score: u32,
    max_level: u32,
    new_bests: u32,
    capped: u32,
    best_score: u32,
    reports: Vec<GameReport>,
}

fn play(engine: &mut RoundEngine, bot: &mut StdRng, args: &Args) -> GameReport {
    let mut report = GameReport::default();
    let best_before = engine.best_score();
    engine.start();
    'clock: while report.seconds < args.max_seconds {
        for _ in 0..args.guesses_per_second {
            let Some(round) = engine.round() else { break 'clock };
            let target = round.target_index;
            let index = if bot.gen_bool(args.accuracy) {
                target
            } else {
                (target + bot.gen_range(1..GRID_SIZE)) % GRID_SIZE
            };
            match engine.submit_guess(index) {
                Some(GuessOutcome::Correct) => report.correct += 1,
                Some(GuessOutcome::Incorrect) => report.incorrect += 1,
                None => break 'clock,
            }
        }
        report.seconds += 1;
        match engine.tick() {
            TickOutcome::Running { .. } => {}
            TickOutcome::Expired | TickOutcome::Inactive => break,
        }
    }
    report.capped = engine.session().active();
    report.score = engine.session().score;
    report.level = engine.session().level;
    report.new_best = engine.best_score() > best_before;
    // No renderer listens here; keep the queue from growing across games.
    engine.drain_signals();
    report
}

fn main() -> Result<()> {
    let args = Args::parse();
    if !(0.0..=1.0).contains(&args.accuracy) {
        bail!("--accuracy must be within 0..=1 (got {})", args.accuracy);
    }
    if args.games == 0 {
        bail!("--games must be > 0");
    }

    let (mut cfg, _used, errors) = if args.configs.is_empty() {
        GameConfig::load_layered(DEFAULT_CONFIG_PATHS)
    } else {
        GameConfig::load_layered(args.configs.iter())
    };
    for e in errors {
        eprintln!("config: {e}");
    }
    cfg.seed = Some(args.seed);

    let store: Box<dyn BestScoreStore> = match &args.best_score_file {
        Some(path) => Box::new(FileBestScoreStore::new(path)),
        None => Box::new(MemoryBestScoreStore::default()),
    };
    let mut engine = RoundEngine::new(&cfg, store);
    let mut bot = StdRng::seed_from_u64(args.seed.wrapping_add(1));

    let mut summary = Summary {
        games: args.games,
        ..Default::default()
    };
    for _ in 0..args.games {
        let report = play(&mut engine, &mut bot, &args);
        summary.max_score = summary.max_score.max(report.score);
        summary.max_level = summary.max_level.max(report.level);
        summary.new_bests += report.new_best as u32;
        summary.capped += report.capped as u32;
        summary.reports.push(report);
    }
    let total: u64 = summary.reports.iter().map(|r| r.score as u64).sum();
    summary.mean_score = total as f64 / args.games as f64;
    summary.best_score = engine.best_score();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "games={} mean_score={:.2} max_score={} max_level={} new_bests={} capped={} best={}",
            summary.games,
            summary.mean_score,
            summary.max_score,
            summary.max_level,
            summary.new_bests,
            summary.capped,
            summary.best_score
        );
    }
    Ok(())
}
