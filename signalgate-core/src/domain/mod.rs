//! Domain types for SignalGate

pub mod candle;
pub mod score;
pub mod signal;

pub use candle::{Candle, CandleError};
pub use score::{Grade, Score};
pub use signal::{validate_window, InputError, Mode, SignalInput, Timeframe};
