//! Signal input envelope: what a caller hands to the decision engine.
//!
//! The envelope is validated on construction: an unsupported timeframe or an
//! invalid candle is refused here, so the scoring code never sees one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::candle::{Candle, CandleError};

/// Accepted chart timeframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "5m")]
    M5,
    #[serde(rename = "15m")]
    M15,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M5 => "5m",
            Self::M15 => "15m",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5m" => Ok(Self::M5),
            "15m" => Ok(Self::M15),
            other => Err(InputError::UnsupportedTimeframe(other.to_string())),
        }
    }
}

/// Entry strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    /// Enter on the first pause after the impulse.
    FirstMove,
    /// Wait for a bounded pullback and renewed volume.
    ConfirmLight,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstMove => "FIRST_MOVE",
            Self::ConfirmLight => "CONFIRM_LIGHT",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FIRST_MOVE" => Ok(Self::FirstMove),
            "CONFIRM_LIGHT" => Ok(Self::ConfirmLight),
            other => Err(InputError::UnknownMode(other.to_string())),
        }
    }
}

/// Input envelope errors. All of these are raised before the engine runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("tf must be 5m or 15m (got '{0}')")]
    UnsupportedTimeframe(String),

    #[error("mode_hint must be FIRST_MOVE or CONFIRM_LIGHT (got '{0}')")]
    UnknownMode(String),

    #[error("candles must not be empty")]
    EmptyWindow,

    #[error("candle {index}: {source}")]
    InvalidCandle {
        index: usize,
        #[source]
        source: CandleError,
    },
}

/// One scoring request: a symbol, its timeframe and its candle window (oldest first).
///
/// Not deserializable; wire input goes through [`SignalInput::new`]:
///
/// ```compile_fail
/// let _: signalgate_core::SignalInput = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalInput {
    pub symbol: String,
    pub exchange: String,
    pub timeframe: Timeframe,
    pub candles: Vec<Candle>,
    pub mode_hint: Option<Mode>,
}

impl SignalInput {
    /// Build a validated envelope. The window must be non-empty and every candle sane.
    pub fn new(
        symbol: impl Into<String>,
        exchange: impl Into<String>,
        timeframe: Timeframe,
        candles: Vec<Candle>,
        mode_hint: Option<Mode>,
    ) -> Result<Self, InputError> {
        validate_window(&candles)?;
        Ok(Self {
            symbol: symbol.into(),
            exchange: exchange.into(),
            timeframe,
            candles,
            mode_hint,
        })
    }
}

/// Check a candle window: non-empty, each bar passes [`Candle::validate`].
pub fn validate_window(candles: &[Candle]) -> Result<(), InputError> {
    if candles.is_empty() {
        return Err(InputError::EmptyWindow);
    }
    for (index, candle) in candles.iter().enumerate() {
        candle
            .validate()
            .map_err(|source| InputError::InvalidCandle { index, source })?;
    }
    Ok(())
}
