//! Mode selection and the two entry gates.
//!
//! Each gate looks at the market-structure [`Score`] plus the shape of the
//! last few bars and answers "is an entry open right now?" with a reason.
//! Gates are total: short windows and low grades are rejections, not errors.

use crate::domain::{Candle, Grade, Mode, Score, SignalInput, Timeframe};
use crate::metrics::{average_by, max_high, midpoint, min_low, raw_range};

/// Ratio of one bar's range to the previous one that counts as a pause.
pub const PAUSE_CONTRACTION: f64 = 0.8;
pub const FIRST_MOVE_MIN_POINTS: u32 = 3;
pub const FIRST_MOVE_MIN_BARS: usize = 4;

pub const CONFIRM_MIN_BARS: usize = 14;
pub const RETRACE_MIN: f64 = 0.20;
pub const RETRACE_MAX: f64 = 0.40;
pub const RENEWED_VOLUME: f64 = 1.1;

/// Verdict of an entry gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryCheck {
    pub open: bool,
    pub reason: &'static str,
}

impl EntryCheck {
    fn open(reason: &'static str) -> Self {
        Self { open: true, reason }
    }

    fn rejected(reason: &'static str) -> Self {
        Self {
            open: false,
            reason,
        }
    }
}

/// Explicit hint wins; otherwise 5m trades the first move and anything else waits for confirmation.
pub fn pick_mode(input: &SignalInput) -> Mode {
    if let Some(mode) = input.mode_hint {
        return mode;
    }
    match input.timeframe {
        Timeframe::M5 => Mode::FirstMove,
        Timeframe::M15 => Mode::ConfirmLight,
    }
}

/// First-move gate: grade B or better, then a pause in the last two steps
/// and a close in the upper half of the latest bar.
pub fn entry_first_move(candles: &[Candle], score: &Score) -> EntryCheck {
    if score.points < FIRST_MOVE_MIN_POINTS {
        return EntryCheck::rejected("score below B");
    }
    if candles.len() < FIRST_MOVE_MIN_BARS {
        return EntryCheck::rejected("not enough candles");
    }

    let n = candles.len();
    let (prev2, prev, last) = (&candles[n - 3], &candles[n - 2], &candles[n - 1]);

    let pause = raw_range(last) <= PAUSE_CONTRACTION * raw_range(prev)
        || raw_range(prev) <= PAUSE_CONTRACTION * raw_range(prev2);
    let strong_close = last.close > midpoint(last.low, last.high);

    if pause && strong_close {
        EntryCheck::open("pause and strong close")
    } else {
        EntryCheck::rejected("no pause or weak close")
    }
}

/// Confirm-light gate: grade A, a 20–40% pullback of the impulse that still
/// holds above its midpoint, and volume picking up again.
pub fn entry_confirm(candles: &[Candle], score: &Score) -> EntryCheck {
    if score.letter != Grade::A {
        return EntryCheck::rejected("score A required");
    }
    if candles.len() < CONFIRM_MIN_BARS {
        return EntryCheck::rejected("not enough history");
    }

    let (Some(hi), Some(lo), Some(last)) = (max_high(candles), min_low(candles), candles.last())
    else {
        return EntryCheck::rejected("not enough history");
    };
    let span = hi - lo;
    if span <= 0.0 {
        return EntryCheck::rejected("no impulse");
    }

    let retrace = (hi - last.close) / span;
    let retrace_ok = (RETRACE_MIN..=RETRACE_MAX).contains(&retrace);
    let hold_ok = last.close > midpoint(lo, hi);

    let n = candles.len();
    let recent_vol = average_by(&candles[n - 3..], |c| c.volume);
    let prior_vol = average_by(&candles[n - 6..n - 3], |c| c.volume);
    let volume_ok = recent_vol >= RENEWED_VOLUME * prior_vol;

    if retrace_ok && hold_ok && volume_ok {
        EntryCheck::open("pullback and confirmation")
    } else {
        EntryCheck::rejected("no confirmation")
    }
}

/// Run the gate that belongs to `mode`.
pub fn check_entry(mode: Mode, candles: &[Candle], score: &Score) -> EntryCheck {
    match mode {
        Mode::FirstMove => entry_first_move(candles, score),
        Mode::ConfirmLight => entry_confirm(candles, score),
    }
}
