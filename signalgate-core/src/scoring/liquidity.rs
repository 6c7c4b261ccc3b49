//! Liquidity scorer: reports the liquidity, fake-impulse and timing checks.
//!
//! The card sums the points but leaves `grade` empty: no grade table exists
//! for these checks.
// TODO: wire into the decision engine once a grade table for these checks is agreed.

use crate::rules::{liquidity, total_points};

use super::{ScoreCard, ScoringContext, ScoringStrategy};

#[derive(Debug, Clone, Copy, Default)]
pub struct Liquidity;

impl ScoringStrategy for Liquidity {
    fn name(&self) -> &str {
        "liquidity"
    }

    fn evaluate(&self, ctx: &ScoringContext<'_>) -> ScoreCard {
        let checks = liquidity::evaluate_all(ctx.candles);
        let points = total_points(&checks);
        ScoreCard {
            strategy: self.name().to_string(),
            checks,
            points,
            grade: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Candle;

    #[test]
    fn card_has_three_checks_and_no_grade() {
        let bars = vec![
            Candle {
                open: 100.0,
                high: 101.0,
                low: 95.0,
                close: 96.0,
                volume: 900.0,
            },
            Candle {
                open: 97.0,
                high: 106.0,
                low: 96.5,
                close: 105.0,
                volume: 1000.0,
            },
            Candle {
                open: 105.0,
                high: 105.5,
                low: 102.0,
                close: 103.0,
                volume: 1100.0,
            },
        ];
        let card = Liquidity.evaluate(&ScoringContext::new(&bars));
        assert_eq!(card.checks.len(), 3);
        assert_eq!(card.grade, None);
        assert!(card.checks.iter().all(|c| c.points <= 2));
    }
}
