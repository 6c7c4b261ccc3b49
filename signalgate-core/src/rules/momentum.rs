//! Momentum rules, one point each, scored on the trading timeframe with an
//! optional coarser timeframe for confirmation.

use crate::domain::Candle;
use crate::metrics::{body, tail};

use super::RuleResult;

pub const IMPULSE_BODY_RATIO: f64 = 1.3;
/// Bars averaged for the volume comparison.
pub const VOLUME_LOOKBACK: usize = 5;
pub const CLOSE_STRUCTURE_BARS: usize = 5;
pub const MAX_CLOSE_RANGE_PCT: f64 = 0.06;

/// Impulse and volume rules need the latest bar plus two bars of context.
const MIN_BARS: usize = 3;

/// Latest body exceeds 1.3× the prior body.
pub fn impulse_candle(candles: &[Candle]) -> RuleResult {
    const RULE: &str = "impulse_candle";
    if candles.len() < MIN_BARS {
        return RuleResult::fail(RULE, "insufficient history");
    }
    let last = &candles[candles.len() - 1];
    let prev = &candles[candles.len() - 2];

    if body(last) > body(prev) * IMPULSE_BODY_RATIO {
        RuleResult::pass(RULE, 1, "impulse candle")
    } else {
        RuleResult::fail(RULE, "latest body not above 1.3x prior body")
    }
}

/// Latest volume exceeds the average of the preceding five bars.
///
/// The sum is always divided by five, so a short window compares against a
/// deliberately diluted average.
pub fn volume_above_average(candles: &[Candle]) -> RuleResult {
    const RULE: &str = "volume_above_average";
    let Some((last, before)) = candles.split_last().filter(|_| candles.len() >= MIN_BARS) else {
        return RuleResult::fail(RULE, "insufficient history");
    };
    let reference: f64 =
        tail(before, VOLUME_LOOKBACK).iter().map(|c| c.volume).sum::<f64>() / VOLUME_LOOKBACK as f64;

    if last.volume > reference {
        RuleResult::pass(RULE, 1, "volume above average")
    } else {
        RuleResult::fail(RULE, "volume not above average")
    }
}

/// Last five closes stay within 6% of their minimum (no whipsaw).
pub fn controlled_structure(candles: &[Candle]) -> RuleResult {
    const RULE: &str = "controlled_structure";
    let closes = tail(candles, CLOSE_STRUCTURE_BARS).iter().map(|c| c.close);
    let (Some(max), Some(min)) = (
        closes.clone().reduce(f64::max),
        closes.reduce(f64::min),
    ) else {
        return RuleResult::fail(RULE, "insufficient history");
    };

    if max - min < min * MAX_CLOSE_RANGE_PCT {
        RuleResult::pass(RULE, 1, "controlled structure")
    } else {
        RuleResult::fail(RULE, "closes whipsawing")
    }
}

/// The coarser timeframe's latest close is above its prior close.
pub fn higher_timeframe_confirmation(higher: Option<&[Candle]>) -> RuleResult {
    const RULE: &str = "higher_timeframe_confirmation";
    let Some(bars) = higher.filter(|b| b.len() >= 2) else {
        return RuleResult::fail(RULE, "no higher timeframe data");
    };
    let last = &bars[bars.len() - 1];
    let prev = &bars[bars.len() - 2];

    if last.close > prev.close {
        RuleResult::pass(RULE, 1, "higher timeframe confirms")
    } else {
        RuleResult::fail(RULE, "higher timeframe not rising")
    }
}

/// All four momentum rules in a fixed order.
pub fn evaluate_all(candles: &[Candle], higher: Option<&[Candle]>) -> Vec<RuleResult> {
    vec![
        impulse_candle(candles),
        volume_above_average(candles),
        controlled_structure(candles),
        higher_timeframe_confirmation(higher),
    ]
}
