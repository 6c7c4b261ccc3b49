//! Metric primitives shared by every rule evaluator.
//!
//! All functions are pure and total. Empty inputs produce neutral values
//! (0 for averages, 0 for spans) so callers can guard with a zero check
//! instead of handling an error.

use crate::domain::Candle;

/// Floor applied to bar ranges so ratios never divide by zero.
pub const RANGE_EPSILON: f64 = 1e-9;

/// Arithmetic mean; 0.0 for an empty slice.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean of `f` applied to each candle; 0.0 for an empty slice.
pub fn average_by(candles: &[Candle], f: impl Fn(&Candle) -> f64) -> f64 {
    if candles.is_empty() {
        return 0.0;
    }
    candles.iter().map(f).sum::<f64>() / candles.len() as f64
}

/// Absolute candle body: `|close - open|`.
pub fn body(candle: &Candle) -> f64 {
    (candle.close - candle.open).abs()
}

/// Candle range floored at [`RANGE_EPSILON`].
pub fn range(candle: &Candle) -> f64 {
    (candle.high - candle.low).max(RANGE_EPSILON)
}

/// Unfloored `high - low`, for comparisons between bars where a zero range is meaningful.
pub fn raw_range(candle: &Candle) -> f64 {
    candle.high - candle.low
}

/// Highest high over the window; `None` when empty.
pub fn max_high(candles: &[Candle]) -> Option<f64> {
    candles.iter().map(|c| c.high).reduce(f64::max)
}

/// Lowest low over the window; `None` when empty.
pub fn min_low(candles: &[Candle]) -> Option<f64> {
    candles.iter().map(|c| c.low).reduce(f64::min)
}

/// `max(high) - min(low)` over the window; 0.0 when empty.
pub fn impulse_span(candles: &[Candle]) -> f64 {
    match (max_high(candles), min_low(candles)) {
        (Some(hi), Some(lo)) => hi - lo,
        _ => 0.0,
    }
}

/// Half-way point between a low and a high.
pub fn midpoint(min_low: f64, max_high: f64) -> f64 {
    min_low + 0.5 * (max_high - min_low)
}

/// The trailing `n` candles (or the whole slice when shorter).
pub fn tail(candles: &[Candle], n: usize) -> &[Candle] {
    &candles[candles.len().saturating_sub(n)..]
}

/// Build candles from close prices for tests.
///
/// open = previous close (or close for the first bar), high/low = ±1.0 around
/// the body, volume = 1000.
#[cfg(test)]
pub fn make_candles(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Candle {
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle {
            open,
            high,
            low,
            close,
            volume: 1.0,
        }
    }

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average_by(&[], |c| c.volume), 0.0);
    }

    #[test]
    fn average_of_values() {
        assert_eq!(average(&[1.0, 2.0, 3.0, 6.0]), 3.0);
    }

    #[test]
    fn body_is_absolute() {
        assert_eq!(body(&candle(10.0, 12.0, 7.0, 8.0)), 2.0);
        assert_eq!(body(&candle(8.0, 12.0, 7.0, 10.0)), 2.0);
    }

    #[test]
    fn range_is_floored() {
        assert_eq!(range(&candle(5.0, 5.0, 5.0, 5.0)), RANGE_EPSILON);
        assert_eq!(raw_range(&candle(5.0, 5.0, 5.0, 5.0)), 0.0);
        assert_eq!(range(&candle(5.0, 6.0, 4.0, 5.0)), 2.0);
    }

    #[test]
    fn span_and_midpoint() {
        let bars = vec![candle(10.0, 11.0, 9.0, 10.5), candle(10.5, 15.0, 10.0, 14.0)];
        assert_eq!(impulse_span(&bars), 6.0);
        assert_eq!(midpoint(9.0, 15.0), 12.0);
        assert_eq!(impulse_span(&[]), 0.0);
    }

    #[test]
    fn tail_clamps_to_length() {
        let bars = make_candles(&[1.0, 2.0, 3.0]);
        assert_eq!(tail(&bars, 2).len(), 2);
        assert_eq!(tail(&bars, 10).len(), 3);
        assert_eq!(tail(&bars, 2)[0].close, 2.0);
    }
}
