//! Bankroll Risk-of-Ruin Engine — CLI Entry Point
//!
//! Runs one risk assessment from the command line and prints the response
//! as JSON on stdout. Logs go to stderr so output stays pipeable.
//!
//! Wiring sequence:
//! 1. Parse arguments (game, bankroll, bet size, optional overrides)
//! 2. Load config.toml when present, defaults otherwise
//! 3. Init tracing (JSON structured logging, stderr)
//! 4. Build the assessor (entropy-seeded, or pinned via --seed)
//! 5. Assess and print
//!
//! Exit codes: 0 success (including invalid-input reports, which are
//! normal output), 1 engine unavailable, 2 usage error.

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use anyhow::{Context, Result};
use tracing::info;

mod config;
mod domain;
mod usecases;

use domain::ruin::RuinSimulator;
use usecases::{RiskAssessor, RiskQuery};

const USAGE: &str = "Usage: ruin-engine <game> <bankroll> <bet_size> \
[--count N] [--odds N] [--rounds N] [--trials N] [--seed N] [--config PATH]";

struct CliArgs {
    query: RiskQuery,
    seed: Option<u64>,
    config_path: Option<String>,
}

fn main() -> Result<()> {
    // ── 1. Parse command line ───────────────────────────────
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    // ── 2. Load configuration ───────────────────────────────
    // An explicit --config must exist; the default path is optional.
    let config = match &args.config_path {
        Some(path) => config::loader::load_config(path)?,
        None if std::path::Path::new("config.toml").exists() => {
            config::loader::load_config("config.toml")?
        }
        None => config::AppConfig::default(),
    };

    // ── 3. Initialize structured JSON logging on stderr ─────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.app.log_level)),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!(
        name = %config.app.name,
        version = env!("CARGO_PKG_VERSION"),
        game = %args.query.game,
        seeded = args.seed.is_some(),
        "Starting risk assessment"
    );

    // ── 4. Wire the assessor ────────────────────────────────
    let assessor = match args.seed {
        Some(seed) => RiskAssessor::with_simulator(&config, RuinSimulator::seeded(seed)),
        None => RiskAssessor::new(&config),
    };

    // ── 5. Assess and print ─────────────────────────────────
    let response = assessor.assess(&args.query)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&response).context("Failed to serialize response")?
    );

    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut positional: Vec<String> = Vec::new();
    let mut count = None;
    let mut odds = None;
    let mut total_rounds = None;
    let mut trial_count = None;
    let mut seed = None;
    let mut config_path = None;

    while let Some(arg) = args.next() {
        if let Some(flag) = arg.strip_prefix("--") {
            let value = args
                .next()
                .ok_or_else(|| format!("Missing value for --{flag}"))?;
            match flag {
                "count" => count = Some(parse_num(flag, &value)?),
                "odds" => odds = Some(parse_num(flag, &value)?),
                "rounds" => total_rounds = Some(parse_int(flag, &value)?),
                "trials" => trial_count = Some(parse_int(flag, &value)?),
                "seed" => {
                    seed = Some(
                        value
                            .parse::<u64>()
                            .map_err(|_| format!("Invalid --seed value: {value}"))?,
                    );
                }
                "config" => config_path = Some(value),
                _ => return Err(format!("Unknown flag: --{flag}")),
            }
        } else {
            positional.push(arg);
        }
    }

    if positional.len() != 3 {
        return Err(format!(
            "Expected 3 positional arguments, got {}",
            positional.len()
        ));
    }

    let bankroll = parse_num("bankroll", &positional[1])?;
    let bet_size = parse_num("bet_size", &positional[2])?;

    Ok(CliArgs {
        query: RiskQuery {
            game: positional[0].clone(),
            bankroll,
            bet_size,
            odds,
            count,
            total_rounds,
            trial_count,
        },
        seed,
        config_path,
    })
}

fn parse_num(name: &str, value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .map_err(|_| format!("Invalid {name} value: {value}"))
}

fn parse_int(name: &str, value: &str) -> Result<u32, String> {
    value
        .parse::<u32>()
        .map_err(|_| format!("Invalid {name} value: {value}"))
}
