//! Momentum scorer: impulse, volume, close structure and higher-timeframe
//! confirmation, one point each.
//!
//! Unlike the market-structure table, 0 or 1 points grade as NO_TRADE and the
//! setup is not surfaced.

use serde::{Deserialize, Serialize};

use crate::domain::{Candle, Grade};
use crate::rules::{momentum, total_points};

use super::{ScoreCard, ScoringContext, ScoringStrategy};

/// Momentum grade plus the send decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomentumScore {
    pub grade: Grade,
    pub points: u32,
    /// Reasons of the rules that passed.
    pub reasons: Vec<String>,
    /// False only for NO_TRADE.
    pub send: bool,
}

/// Score a trading-timeframe window, optionally confirmed by a coarser window.
pub fn score_momentum(candles: &[Candle], higher: Option<&[Candle]>) -> MomentumScore {
    let checks = momentum::evaluate_all(candles, higher);
    let points = total_points(&checks);
    let grade = Grade::from_momentum_points(points);
    MomentumScore {
        grade,
        points,
        reasons: checks
            .into_iter()
            .filter(|c| c.passed)
            .map(|c| c.reason)
            .collect(),
        send: grade.is_sendable(),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Momentum;

impl ScoringStrategy for Momentum {
    fn name(&self) -> &str {
        "momentum"
    }

    fn evaluate(&self, ctx: &ScoringContext<'_>) -> ScoreCard {
        let checks = momentum::evaluate_all(ctx.candles, ctx.higher);
        let points = total_points(&checks);
        ScoreCard {
            strategy: self.name().to_string(),
            checks,
            points,
            grade: Some(Grade::from_momentum_points(points)),
        }
    }
}
