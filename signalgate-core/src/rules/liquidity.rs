//! Liquidity rules, worth up to two points each.
//!
//! These checks look for tradeable conditions rather than momentum: a live
//! order book, a real impulse with a pullback, and an entry that is neither
//! stale nor late.

use crate::domain::Candle;
use crate::metrics::{average, average_by, body, impulse_span, range, tail, RANGE_EPSILON};

use super::RuleResult;

pub const LIQUIDITY_BARS: usize = 20;
/// Trailing bars dropped to get the "earlier" volume average.
pub const LIQUIDITY_RECENT_BARS: usize = 5;
pub const MIN_BODY_TO_RANGE: f64 = 0.15;

pub const STRUCTURE_BARS: usize = 5;
pub const MIN_BODY_TO_IMPULSE: f64 = 0.25;

pub const TIMING_BARS: usize = 10;
pub const SPIKE_MULTIPLE: f64 = 2.0;

/// Volume present and bodies not swamped by wicks.
///
/// Awards 2 points when the 20-bar volume average is above the average that
/// excludes the last five bars (volume rising), 1 point otherwise.
pub fn liquidity(candles: &[Candle]) -> RuleResult {
    const RULE: &str = "liquidity";
    let window = tail(candles, LIQUIDITY_BARS);
    let volumes: Vec<f64> = window.iter().map(|c| c.volume).collect();

    let avg_vol = average(&volumes);
    if avg_vol <= 0.0 {
        return RuleResult::fail(RULE, "no volume");
    }

    let avg_body = average_by(window, body);
    let avg_range = average_by(window, range);
    if avg_body / avg_range < MIN_BODY_TO_RANGE {
        return RuleResult::fail(RULE, "thin market / wide spread");
    }

    let earlier = &volumes[..volumes.len().saturating_sub(LIQUIDITY_RECENT_BARS)];
    let points = if avg_vol > average(earlier) { 2 } else { 1 };
    RuleResult::pass(RULE, points, "liquidity ok")
}

/// The latest body carries the move, and price dipped before it.
pub fn fake_impulse(candles: &[Candle]) -> RuleResult {
    const RULE: &str = "fake_impulse";
    let window = tail(candles, STRUCTURE_BARS);
    let Some(last) = window.last() else {
        return RuleResult::fail(RULE, "insufficient history");
    };

    let impulse = impulse_span(window);
    if body(last) / impulse.max(RANGE_EPSILON) < MIN_BODY_TO_IMPULSE {
        return RuleResult::fail(RULE, "fake impulse");
    }

    let dipped_below = window.iter().any(|c| c.low < last.low);
    if !dipped_below {
        return RuleResult::fail(RULE, "no pullback");
    }

    RuleResult::pass(RULE, 2, "structure ok")
}

/// The latest bar follows through on earlier volume and leaves room to run.
pub fn timing(candles: &[Candle]) -> RuleResult {
    const RULE: &str = "timing";
    let window = tail(candles, TIMING_BARS);
    let Some((last, earlier)) = window.split_last().filter(|(_, e)| !e.is_empty()) else {
        return RuleResult::fail(RULE, "insufficient history");
    };

    let peak_earlier = earlier.iter().map(|c| c.volume).fold(f64::MIN, f64::max);
    if peak_earlier > last.volume * SPIKE_MULTIPLE {
        return RuleResult::fail(RULE, "no follow-through");
    }

    let highest_close = window.iter().map(|c| c.close).fold(f64::MIN, f64::max);
    if last.close == highest_close {
        return RuleResult::fail(RULE, "late entry");
    }

    RuleResult::pass(RULE, 2, "timing ok")
}

/// All three liquidity rules in a fixed order.
pub fn evaluate_all(candles: &[Candle]) -> Vec<RuleResult> {
    vec![liquidity(candles), fake_impulse(candles), timing(candles)]
}
