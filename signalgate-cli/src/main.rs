//! SignalGate CLI: score candle files offline.
//!
//! Commands:
//! - `score`: run the decision engine on one window and print the message
//! - `cards`: print the score card of every strategy for one window

mod input;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use signalgate_core::scoring::all_strategies;
use signalgate_core::{
    DecisionEngine, Mode, RiskConfig, ScoreCard, ScoringContext, SignalInput, Timeframe,
};

use input::load_candles;

#[derive(Parser)]
#[command(name = "signalgate", about = "SignalGate CLI — offline candle scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a candle window and print the decision.
    Score {
        /// Candle file (.json or .csv), oldest bar first.
        #[arg(long)]
        candles: PathBuf,

        #[arg(long, default_value = "TEST")]
        symbol: String,

        #[arg(long, default_value = "BYBIT")]
        exchange: String,

        /// Timeframe: 5m or 15m.
        #[arg(long, default_value = "5m")]
        tf: Timeframe,

        /// Force a mode: FIRST_MOVE or CONFIRM_LIGHT.
        #[arg(long)]
        mode: Option<Mode>,

        /// Risk % for first-move entries.
        #[arg(long)]
        risk_first_move: Option<f64>,

        /// Risk % for confirm-light entries.
        #[arg(long)]
        risk_confirm: Option<f64>,

        /// Print the decision as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print per-strategy score cards.
    Cards {
        /// Candle file (.json or .csv), oldest bar first.
        #[arg(long)]
        candles: PathBuf,

        /// Optional higher-timeframe candle file.
        #[arg(long)]
        higher: Option<PathBuf>,

        /// Print the cards as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            candles,
            symbol,
            exchange,
            tf,
            mode,
            risk_first_move,
            risk_confirm,
            json,
        } => {
            let defaults = RiskConfig::default();
            let risk = RiskConfig {
                first_move_pct: risk_first_move.unwrap_or(defaults.first_move_pct),
                confirm_pct: risk_confirm.unwrap_or(defaults.confirm_pct),
            };
            run_score(&candles, symbol, exchange, tf, mode, risk, json)
        }
        Commands::Cards {
            candles,
            higher,
            json,
        } => run_cards(&candles, higher.as_deref(), json),
    }
}

fn run_score(
    path: &Path,
    symbol: String,
    exchange: String,
    tf: Timeframe,
    mode: Option<Mode>,
    risk: RiskConfig,
    json: bool,
) -> Result<()> {
    let candles = load_candles(path)?;
    let input = SignalInput::new(symbol, exchange, tf, candles, mode)?;
    let decision = DecisionEngine::new(risk).evaluate(&input);

    if json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
    } else {
        println!("{}", decision.message);
        println!();
        println!("dedup key: {}", decision.dedup_key());
    }
    Ok(())
}

fn run_cards(path: &Path, higher: Option<&Path>, json: bool) -> Result<()> {
    let candles = load_candles(path)?;
    let higher = higher.map(load_candles).transpose()?;

    let mut ctx = ScoringContext::new(&candles);
    if let Some(h) = higher.as_deref() {
        ctx = ctx.with_higher(h);
    }

    let cards: Vec<ScoreCard> = all_strategies()
        .iter()
        .map(|s| s.evaluate(&ctx))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
    } else {
        for card in &cards {
            print_card(card);
        }
    }
    Ok(())
}

fn print_card(card: &ScoreCard) {
    let grade = card.grade.map_or("-", |g| g.as_str());
    println!("{} — {} pts, grade {}", card.strategy, card.points, grade);
    for check in &card.checks {
        let mark = if check.passed { "+" } else { " " };
        println!("  [{mark}] {:<28} {}  {}", check.rule, check.points, check.reason);
    }
    println!();
}
