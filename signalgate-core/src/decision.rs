//! Decision builder: mode, score and entry gate folded into one record.
//!
//! The builder performs no I/O. Its output carries the rendered notification
//! text and the dedup key; delivering or suppressing it is the caller's job.

use serde::{Deserialize, Serialize};

use crate::domain::{Mode, Score, SignalInput};
use crate::entry::{check_entry, pick_mode};
use crate::scoring::score_market;

/// Risk per trade, as a percentage of the deposit, per entry mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub first_move_pct: f64,
    pub confirm_pct: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            first_move_pct: 0.25,
            confirm_pct: 0.5,
        }
    }
}

/// Per-mode presentation and exit policy.
struct ModeProfile {
    icon: &'static str,
    entry_type: &'static str,
    take_profit: &'static str,
}

fn profile(mode: Mode) -> ModeProfile {
    match mode {
        Mode::FirstMove => ModeProfile {
            icon: "🟢",
            entry_type: "FIRST MOVE",
            take_profit: "TP1 +1R → 50%, stop BE",
        },
        Mode::ConfirmLight => ModeProfile {
            icon: "🟡",
            entry_type: "CONFIRM-LIGHT",
            take_profit: "TP1 +1R → 30%, stop BE",
        },
    }
}

/// The engine's verdict for one [`SignalInput`]. Output only:
///
/// ```compile_fail
/// let _: signalgate_core::Decision = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub symbol: String,
    pub mode: Mode,
    pub score: Score,
    pub entry_open: bool,
    pub entry_type: String,
    pub reason: String,
    pub risk_pct: f64,
    /// Plain-text notification; must be delivered without markup parsing.
    pub message: String,
}

impl Decision {
    /// Key under which repeated notifications are suppressed.
    pub fn dedup_key(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}",
            self.symbol, self.mode, self.score.letter, self.score.points, self.entry_open
        )
    }

    /// Compact score label, e.g. `A(4/4)`.
    pub fn score_label(&self) -> String {
        format!("{}({}/4)", self.score.letter, self.score.points)
    }
}

/// Build the decision for `input` with the given risk settings.
pub fn build_decision(input: &SignalInput, risk: &RiskConfig) -> Decision {
    let mode = pick_mode(input);
    let score = score_market(&input.candles);
    let entry = check_entry(mode, &input.candles, &score);

    let profile = profile(mode);
    let risk_pct = match mode {
        Mode::FirstMove => risk.first_move_pct,
        Mode::ConfirmLight => risk.confirm_pct,
    };
    let status = if entry.open { "ENTRY OPEN" } else { "NO ENTRY" };

    log::debug!(
        "{} {}: {} ({}/4), entry={} ({})",
        input.symbol,
        mode,
        score.letter,
        score.points,
        entry.open,
        entry.reason
    );

    let message = format!(
        "{icon} {entry_type} — {status}\n\n\
         {symbol} ({exchange}) TF {tf}\n\
         SCORE: {letter} ({points}/4)\n\
         Risk: {risk_pct:.2}%\n\n\
         Reason:\n- {reason}\n\n\
         Exit:\n- {tp}",
        icon = profile.icon,
        entry_type = profile.entry_type,
        symbol = input.symbol,
        exchange = input.exchange,
        tf = input.timeframe,
        letter = score.letter,
        points = score.points,
        reason = entry.reason,
        tp = profile.take_profit,
    );

    Decision {
        symbol: input.symbol.clone(),
        mode,
        score,
        entry_open: entry.open,
        entry_type: profile.entry_type.to_string(),
        reason: entry.reason.to_string(),
        risk_pct,
        message,
    }
}

/// Decision engine bound to one immutable risk configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionEngine {
    risk: RiskConfig,
}

impl DecisionEngine {
    pub fn new(risk: RiskConfig) -> Self {
        Self { risk }
    }

    pub fn risk(&self) -> &RiskConfig {
        &self.risk
    }

    /// Score `input` and decide whether an entry is open. Pure and synchronous.
    pub fn evaluate(&self, input: &SignalInput) -> Decision {
        build_decision(input, &self.risk)
    }
}
