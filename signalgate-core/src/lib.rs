//! SignalGate Core: candle scoring and entry decisions.
//!
//! This crate contains the decision engine:
//! - Domain types (candles, timeframes, modes, grades, the input envelope)
//! - Metric primitives shared by all rules
//! - Rule evaluators grouped by scoring strategy
//! - Scoring strategies (market structure, momentum, liquidity)
//! - Mode selection and the first-move / confirm-light entry gates
//! - The decision builder that renders the notification text
//!
//! Everything here is synchronous and side-effect free. Delivery, dedup and
//! configuration loading live in `signalgate-server`.

pub mod decision;
pub mod domain;
pub mod entry;
pub mod metrics;
pub mod rules;
pub mod scoring;

pub use decision::{build_decision, Decision, DecisionEngine, RiskConfig};
pub use domain::{Candle, CandleError, Grade, InputError, Mode, Score, SignalInput, Timeframe};
pub use entry::{check_entry, entry_confirm, entry_first_move, pick_mode, EntryCheck};
pub use rules::RuleResult;
pub use scoring::{
    score_market, score_momentum, ScoreCard, ScoringContext, ScoringStrategy,
};
