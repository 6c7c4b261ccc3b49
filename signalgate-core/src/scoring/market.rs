//! Market-structure scorer: the scorer the decision engine uses.
//!
//! One point each for impulse size, volume expansion, hold above midpoint and
//! structure; 4→A, 3→B, otherwise C.

use crate::domain::{Candle, Grade, Score};
use crate::rules::{market, total_points};

use super::{ScoreCard, ScoringContext, ScoringStrategy};

/// Score a window with the market-structure rules.
pub fn score_market(candles: &[Candle]) -> Score {
    let checks = market::evaluate_all(candles);
    Score::from_points(total_points(&checks))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarketStructure;

impl ScoringStrategy for MarketStructure {
    fn name(&self) -> &str {
        "market_structure"
    }

    fn evaluate(&self, ctx: &ScoringContext<'_>) -> ScoreCard {
        let checks = market::evaluate_all(ctx.candles);
        let points = total_points(&checks);
        ScoreCard {
            strategy: self.name().to_string(),
            checks,
            points,
            grade: Some(Grade::from_market_points(points)),
        }
    }
}
