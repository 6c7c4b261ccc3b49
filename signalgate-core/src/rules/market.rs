//! Market-structure rules, one point each.
//!
//! The window is split into a "recent" segment (last 3 bars) and a "base"
//! segment. With 14 or more bars the base is the 10 bars before the recent
//! segment; with fewer it is everything except the last 3 (or the whole
//! window when there are 3 bars or fewer).

use crate::domain::Candle;
use crate::metrics::{average_by, max_high, midpoint, min_low, raw_range, tail};

use super::RuleResult;

/// Bars in the recent segment.
pub const RECENT_BARS: usize = 3;
/// Bars in the base segment once the window is long enough.
pub const BASE_BARS: usize = 10;
/// Window length from which the base segment is capped at [`BASE_BARS`].
pub const FULL_WINDOW: usize = 14;

pub const VOLUME_EXPANSION: f64 = 1.5;
pub const MIN_IMPULSE_PCT: f64 = 0.15;

/// Base segment of the window, see module docs.
pub fn base_segment(candles: &[Candle]) -> &[Candle] {
    let n = candles.len();
    if n >= FULL_WINDOW {
        &candles[n - RECENT_BARS - BASE_BARS..n - RECENT_BARS]
    } else if n > RECENT_BARS {
        &candles[..n - RECENT_BARS]
    } else {
        candles
    }
}

/// Recent volume is at least 1.5× the base volume.
pub fn volume_expansion(candles: &[Candle]) -> RuleResult {
    const RULE: &str = "volume_expansion";
    let base_vol = average_by(base_segment(candles), |c| c.volume);
    let recent_vol = average_by(tail(candles, RECENT_BARS), |c| c.volume);

    if base_vol <= 0.0 {
        return RuleResult::fail(RULE, "no base volume");
    }
    if recent_vol >= VOLUME_EXPANSION * base_vol {
        RuleResult::pass(
            RULE,
            1,
            format!("recent volume {:.2}x base", recent_vol / base_vol),
        )
    } else {
        RuleResult::fail(
            RULE,
            format!("recent volume only {:.2}x base", recent_vol / base_vol),
        )
    }
}

/// The window's high-low span is at least 15% of its lowest low.
pub fn impulse_size(candles: &[Candle]) -> RuleResult {
    const RULE: &str = "impulse_size";
    let (Some(hi), Some(lo)) = (max_high(candles), min_low(candles)) else {
        return RuleResult::fail(RULE, "insufficient history");
    };
    let impulse = if lo > 0.0 { (hi - lo) / lo } else { 0.0 };

    if impulse >= MIN_IMPULSE_PCT {
        RuleResult::pass(RULE, 1, format!("impulse {:.1}%", impulse * 100.0))
    } else {
        RuleResult::fail(RULE, format!("impulse only {:.1}%", impulse * 100.0))
    }
}

/// The latest close holds above the window midpoint.
pub fn hold_above_mid(candles: &[Candle]) -> RuleResult {
    const RULE: &str = "hold_above_mid";
    let (Some(hi), Some(lo), Some(last)) = (max_high(candles), min_low(candles), candles.last())
    else {
        return RuleResult::fail(RULE, "insufficient history");
    };

    if last.close > midpoint(lo, hi) {
        RuleResult::pass(RULE, 1, "close holds above midpoint")
    } else {
        RuleResult::fail(RULE, "close below midpoint")
    }
}

/// Higher low on the latest bar, or a narrowing range over the last 3 bars
/// compared to the 3 before them.
pub fn structure(candles: &[Candle]) -> RuleResult {
    const RULE: &str = "structure";
    let n = candles.len();

    let higher_low = n >= 3 && candles[n - 1].low > candles[n - 2].low;
    let narrowing = n >= 6 && {
        let prev = average_by(&candles[n - 6..n - 3], raw_range);
        let last = average_by(&candles[n - 3..], raw_range);
        last < prev
    };

    match (higher_low, narrowing) {
        (true, _) => RuleResult::pass(RULE, 1, "higher low"),
        (false, true) => RuleResult::pass(RULE, 1, "narrowing range"),
        (false, false) => RuleResult::fail(RULE, "no higher low or narrowing range"),
    }
}

/// All four market-structure rules in a fixed order.
pub fn evaluate_all(candles: &[Candle]) -> Vec<RuleResult> {
    vec![
        impulse_size(candles),
        volume_expansion(candles),
        hold_above_mid(candles),
        structure(candles),
    ]
}
