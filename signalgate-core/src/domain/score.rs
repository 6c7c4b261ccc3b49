//! Score: a point count and the letter grade derived from it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal trade grade.
///
/// Variants are declared worst-first so the derived ordering reads naturally:
/// `Grade::A > Grade::B > Grade::C > Grade::NoTrade`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "NO_TRADE")]
    NoTrade,
    C,
    B,
    A,
}

impl Grade {
    /// Grade table of the market-structure scorer: 4→A, 3→B, anything else→C.
    pub fn from_market_points(points: u32) -> Self {
        match points {
            p if p >= 4 => Self::A,
            3 => Self::B,
            _ => Self::C,
        }
    }

    /// Grade table of the momentum scorer: 4→A, 3→B, 2→C, 0 or 1→NO_TRADE.
    pub fn from_momentum_points(points: u32) -> Self {
        match points {
            p if p >= 4 => Self::A,
            3 => Self::B,
            2 => Self::C,
            _ => Self::NoTrade,
        }
    }

    /// Whether a setup with this grade is worth surfacing.
    pub fn is_sendable(&self) -> bool {
        !matches!(self, Self::NoTrade)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::NoTrade => "NO_TRADE",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the market-structure scorer. Never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub letter: Grade,
    pub points: u32,
}

impl Score {
    /// Score from a market-structure point count (0..=4).
    pub fn from_points(points: u32) -> Self {
        Self {
            letter: Grade::from_market_points(points),
            points,
        }
    }
}
