//! Option kind and exercise style.
//!
//! The payoff of every option priced by binotree depends only on the
//! underlying value at the node where it is evaluated, so the kind alone is
//! enough to compute intrinsic value.

use std::fmt;
use std::str::FromStr;

use crate::errors::Error;
use crate::Real;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Intrinsic value `max(φ(S − K), 0)` with `φ` = [`sign`](Self::sign).
    #[inline]
    pub fn intrinsic(self, spot: Real, strike: Real) -> Real {
        (self.sign() * (spot - strike)).max(0.0)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            other => Err(Error::InvalidArgument(format!(
                "unknown option type '{other}' (expected call or put)"
            ))),
        }
    }
}

/// Type of exercise right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExerciseType {
    /// Can only be exercised at expiry.
    #[default]
    European,
    /// Can be exercised at any node up to expiry.
    American,
}

impl ExerciseType {
    /// `true` if intrinsic value is compared against continuation at
    /// interior nodes.
    pub fn allows_early_exercise(self) -> bool {
        matches!(self, ExerciseType::American)
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseType::European => write!(f, "european"),
            ExerciseType::American => write!(f, "american"),
        }
    }
}

impl FromStr for ExerciseType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "european" => Ok(ExerciseType::European),
            "american" => Ok(ExerciseType::American),
            other => Err(Error::InvalidArgument(format!(
                "unknown exercise type '{other}' (expected european or american)"
            ))),
        }
    }
}
