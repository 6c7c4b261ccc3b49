//! Rule evaluators: independent point-valued checks over a candle window.
//!
//! Every rule is a pure function of the window that returns a [`RuleResult`].
//! Rules are total: a window that is too short or numerically degenerate
//! yields a failing result with a reason, never a panic.
//!
//! Three families live here, one per scoring strategy:
//! - [`market`]: volume expansion, impulse size, hold above midpoint, structure
//! - [`momentum`]: impulse candle, volume, close structure, higher-timeframe confirmation
//! - [`liquidity`]: liquidity/spread, fake impulse, timing/follow-through

pub mod liquidity;
pub mod market;
pub mod momentum;

use serde::{Deserialize, Serialize};

/// Outcome of a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    /// Stable rule identifier (e.g. "volume_expansion").
    pub rule: String,
    pub passed: bool,
    /// Points awarded; always 0 when `passed` is false.
    pub points: u32,
    /// Human-readable explanation of the verdict.
    pub reason: String,
}

impl RuleResult {
    pub fn pass(rule: &str, points: u32, reason: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            passed: true,
            points,
            reason: reason.into(),
        }
    }

    pub fn fail(rule: &str, reason: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            passed: false,
            points: 0,
            reason: reason.into(),
        }
    }
}

/// Sum of points over a set of results.
pub fn total_points(results: &[RuleResult]) -> u32 {
    results.iter().map(|r| r.points).sum()
}
