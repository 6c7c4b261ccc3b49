//! Candle: the fundamental market data unit.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One OHLCV bar.
///
/// Wire names are the short webhook keys (`o`, `h`, `l`, `c`, `v`); the long
/// names are accepted on input so CSV exports with a verbose header load too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    #[serde(rename = "o", alias = "open")]
    pub open: f64,
    #[serde(rename = "h", alias = "high")]
    pub high: f64,
    #[serde(rename = "l", alias = "low")]
    pub low: f64,
    #[serde(rename = "c", alias = "close")]
    pub close: f64,
    #[serde(rename = "v", alias = "volume")]
    pub volume: f64,
}

/// Why a candle was refused at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CandleError {
    #[error("candle field '{0}' is not a finite number")]
    NotFinite(&'static str),

    #[error("candle price '{field}' must be positive, got {value}")]
    NonPositivePrice { field: &'static str, value: f64 },

    #[error("candle high {high} is below low {low}")]
    HighBelowLow { high: f64, low: f64 },

    #[error("candle volume must be non-negative, got {0}")]
    NegativeVolume(f64),
}

impl Candle {
    /// Build a candle, enforcing positive prices, `high >= low` and non-negative volume.
    pub fn new(open: f64, high: f64, low: f64, close: f64, volume: f64) -> Result<Self, CandleError> {
        let candle = Self {
            open,
            high,
            low,
            close,
            volume,
        };
        candle.validate()?;
        Ok(candle)
    }

    /// Check the invariants on an already-deserialized candle.
    pub fn validate(&self) -> Result<(), CandleError> {
        let fields = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(CandleError::NotFinite(name));
            }
        }
        for &(name, value) in &fields[..4] {
            if value <= 0.0 {
                return Err(CandleError::NonPositivePrice { field: name, value });
            }
        }
        if self.high < self.low {
            return Err(CandleError::HighBelowLow {
                high: self.high,
                low: self.low,
            });
        }
        if self.volume < 0.0 {
            return Err(CandleError::NegativeVolume(self.volume));
        }
        Ok(())
    }

    /// True when the bar closed above its open.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_sane_candle() {
        let candle = Candle::new(100.0, 105.0, 98.0, 103.0, 5_000.0).unwrap();
        assert!(candle.is_bullish());
    }

    #[test]
    fn rejects_high_below_low() {
        let err = Candle::new(100.0, 97.0, 98.0, 99.0, 1.0).unwrap_err();
        assert_eq!(err, CandleError::HighBelowLow { high: 97.0, low: 98.0 });
    }

    #[test]
    fn rejects_zero_price() {
        let err = Candle::new(100.0, 105.0, 0.0, 103.0, 1.0).unwrap_err();
        assert!(matches!(err, CandleError::NonPositivePrice { field: "low", .. }));
    }

    #[test]
    fn rejects_nan_and_negative_volume() {
        assert_eq!(
            Candle::new(f64::NAN, 105.0, 98.0, 103.0, 1.0).unwrap_err(),
            CandleError::NotFinite("open")
        );
        assert_eq!(
            Candle::new(100.0, 105.0, 98.0, 103.0, -1.0).unwrap_err(),
            CandleError::NegativeVolume(-1.0)
        );
    }

    #[test]
    fn zero_volume_is_allowed() {
        assert!(Candle::new(100.0, 105.0, 98.0, 103.0, 0.0).is_ok());
    }

    #[test]
    fn deserializes_short_and_long_keys() {
        let short: Candle =
            serde_json::from_str(r#"{"o":1.0,"h":2.0,"l":0.5,"c":1.5,"v":10.0}"#).unwrap();
        let long: Candle = serde_json::from_str(
            r#"{"open":1.0,"high":2.0,"low":0.5,"close":1.5,"volume":10.0}"#,
        )
        .unwrap();
        assert_eq!(short, long);

        let json = serde_json::to_string(&short).unwrap();
        assert!(json.contains("\"o\":1.0"));
    }
}
