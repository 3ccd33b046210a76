//! Error types for binotree.
//!
//! Every pricing routine validates its inputs before touching a lattice and
//! reports the first violation as one of the variants below. The
//! [`ensure!`](crate::ensure) macro covers the generic "argument must be
//! finite / non-negative" checks.

use thiserror::Error;

use crate::{Integer, Real};

/// The top-level error type used throughout binotree.
///
/// All variants are domain errors: they are raised before any computation
/// begins and never recovered internally.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// An up or down factor is non-positive or non-finite.
    #[error("invalid {parameter}: {value} (must be finite and strictly positive)")]
    InvalidFactor {
        /// Name of the offending factor (`up_factor` or `down_factor`).
        parameter: &'static str,
        /// The value supplied.
        value: Real,
    },

    /// The requested maturity is deeper than the supplied lattice.
    #[error("maturity ({maturity}) exceeds the number of time steps in the lattice ({steps})")]
    MaturityExceedsSteps {
        /// Requested maturity, in time steps.
        maturity: usize,
        /// Number of steps available in the lattice.
        steps: usize,
    },

    /// The factors and rate admit arbitrage: `down < exp(rate) < up` fails,
    /// so the risk-neutral probability falls outside `(0, 1)`.
    #[error(
        "arbitrage violation: require down ({down}) < exp(rate) ({growth}) < up ({up}), \
         risk-neutral probability = {probability}"
    )]
    ArbitrageViolation {
        /// Up factor.
        up: Real,
        /// Down factor.
        down: Real,
        /// One-step growth factor `exp(rate)`.
        growth: Real,
        /// The implied probability (may be non-finite when `up == down`).
        probability: Real,
    },

    /// A step count is negative.
    #[error("{parameter} must be non-negative, got {value}")]
    NegativeSteps {
        /// Name of the offending parameter (`steps` or `maturity`).
        parameter: &'static str,
        /// The value supplied.
        value: Integer,
    },

    /// A scalar argument is outside its domain (non-finite, negative, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidFactor { .. } => "InvalidFactor",
            Error::MaturityExceedsSteps { .. } => "MaturityExceedsSteps",
            Error::ArbitrageViolation { .. } => "ArbitrageViolation",
            Error::NegativeSteps { .. } => "NegativeSteps",
            Error::InvalidArgument(_) => "InvalidArgument",
        }
    }
}

/// Shorthand `Result` type used throughout binotree.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::InvalidArgument(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use bt_core::{ensure, errors::Error};
/// fn positive(x: f64) -> bt_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::InvalidArgument(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidArgument(
                format!($($msg)*)
            ));
        }
    };
}

/// Convert a signed step count into an index, rejecting negative values.
///
/// ```
/// use bt_core::errors::{non_negative_steps, Error};
/// assert_eq!(non_negative_steps("steps", 3), Ok(3));
/// assert_eq!(
///     non_negative_steps("steps", -1),
///     Err(Error::NegativeSteps { parameter: "steps", value: -1 })
/// );
/// ```
pub fn non_negative_steps(parameter: &'static str, value: Integer) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::NegativeSteps { parameter, value })
}

/// Check that a lattice factor is finite and strictly positive.
pub fn positive_factor(parameter: &'static str, value: Real) -> Result<Real> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidFactor { parameter, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_checks() {
        assert_eq!(positive_factor("up_factor", 1.1), Ok(1.1));
        assert!(matches!(
            positive_factor("down_factor", 0.0),
            Err(Error::InvalidFactor { parameter: "down_factor", .. })
        ));
        assert!(positive_factor("up_factor", -0.5).is_err());
        assert!(positive_factor("up_factor", Real::NAN).is_err());
        assert!(positive_factor("up_factor", Real::INFINITY).is_err());
    }

    #[test]
    fn messages_name_the_parameter() {
        let err = Error::NegativeSteps {
            parameter: "maturity",
            value: -4,
        };
        assert_eq!(err.to_string(), "maturity must be non-negative, got -4");
        assert_eq!(err.kind(), "NegativeSteps");

        let err = Error::MaturityExceedsSteps {
            maturity: 11,
            steps: 10,
        };
        assert!(err.to_string().contains("(11)"));
        assert!(err.to_string().contains("(10)"));
    }
}
