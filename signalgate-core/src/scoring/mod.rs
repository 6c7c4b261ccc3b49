//! Scoring strategies: turn a candle window into a score card.
//!
//! Three strategies share the [`ScoringStrategy`] trait but keep their own
//! rules, windows and grade tables:
//! - [`MarketStructure`]: the scorer behind the decision engine (A/B/C).
//! - [`Momentum`]: impulse/volume/structure plus higher-timeframe confirmation
//!   (A/B/C/NO_TRADE with a send flag).
//! - [`Liquidity`]: liquidity/fake-impulse/timing checks reported side by side.
//!   No grade table exists for these checks, so its cards carry `grade: None`.

pub mod liquidity;
pub mod market;
pub mod momentum;

pub use liquidity::Liquidity;
pub use market::{score_market, MarketStructure};
pub use momentum::{score_momentum, Momentum, MomentumScore};

use serde::{Deserialize, Serialize};

use crate::domain::{Candle, Grade};
use crate::rules::RuleResult;

/// Windows available to a strategy.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    /// Trading-timeframe window, oldest first.
    pub candles: &'a [Candle],
    /// Optional coarser-timeframe window, oldest first.
    pub higher: Option<&'a [Candle]>,
}

impl<'a> ScoringContext<'a> {
    pub fn new(candles: &'a [Candle]) -> Self {
        Self {
            candles,
            higher: None,
        }
    }

    pub fn with_higher(mut self, higher: &'a [Candle]) -> Self {
        self.higher = Some(higher);
        self
    }
}

/// Result of running one strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub strategy: String,
    pub checks: Vec<RuleResult>,
    pub points: u32,
    /// `None` when the strategy has no grade table.
    pub grade: Option<Grade>,
}

impl ScoreCard {
    /// Reasons of the checks that passed, in evaluation order.
    pub fn passed_reasons(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| c.passed)
            .map(|c| c.reason.as_str())
            .collect()
    }
}

/// Trait for scoring strategies.
///
/// Strategies are stateless and only read the windows they are given.
pub trait ScoringStrategy: Send + Sync {
    /// Human-readable name (e.g., "market_structure").
    fn name(&self) -> &str;

    /// Score the context.
    fn evaluate(&self, ctx: &ScoringContext<'_>) -> ScoreCard;
}

/// Every strategy the engine ships, in a fixed order.
pub fn all_strategies() -> Vec<Box<dyn ScoringStrategy>> {
    vec![
        Box::new(MarketStructure),
        Box::new(Momentum),
        Box::new(Liquidity),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::make_candles;

    #[test]
    fn all_strategies_have_distinct_names() {
        let names: Vec<String> = all_strategies().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["market_structure", "momentum", "liquidity"]);
    }

    #[test]
    fn every_strategy_is_total_on_empty_input() {
        let ctx = ScoringContext::new(&[]);
        for strategy in all_strategies() {
            let card = strategy.evaluate(&ctx);
            assert_eq!(card.points, 0, "{}", strategy.name());
            assert!(card.checks.iter().all(|c| !c.passed));
        }
    }

    #[test]
    fn passed_reasons_filters_failures() {
        let bars = make_candles(&[100.0, 101.0, 102.0]);
        let card = MarketStructure.evaluate(&ScoringContext::new(&bars));
        assert_eq!(card.passed_reasons().len() as u32, card.points);
    }
}
