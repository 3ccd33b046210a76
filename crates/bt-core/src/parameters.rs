//! Immutable pricing parameters.
//!
//! These are plain value types: a host program fills them in (from flags, a
//! config file, or code) and hands them to the pricing engines. Step counts
//! are signed so that a negative request reaches validation and is reported
//! as [`Error::NegativeSteps`] rather than being unrepresentable.

use crate::errors::{non_negative_steps, positive_factor, Error, Result};
use crate::option::{ExerciseType, OptionType};
use crate::{ensure, Integer, Rate, Real};

/// Inputs of the lattice builder: `node(j, i) = x0 · u^(i−j) · d^j`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeParameters {
    /// Root value (an interest rate or an asset price).
    pub initial_value: Real,
    /// Multiplicative up factor.
    pub up_factor: Real,
    /// Multiplicative down factor.
    pub down_factor: Real,
    /// Number of time steps.
    pub steps: Integer,
}

impl LatticeParameters {
    /// Create a new set of lattice parameters.
    pub fn new(initial_value: Real, up_factor: Real, down_factor: Real, steps: Integer) -> Self {
        Self {
            initial_value,
            up_factor,
            down_factor,
            steps,
        }
    }

    /// Check every precondition and return the step count as an index.
    ///
    /// Order: steps, up factor, down factor, initial value.
    pub fn validate(&self) -> Result<usize> {
        let steps = non_negative_steps("steps", self.steps)?;
        positive_factor("up_factor", self.up_factor)?;
        positive_factor("down_factor", self.down_factor)?;
        ensure!(
            self.initial_value.is_finite() && self.initial_value >= 0.0,
            "initial_value must be finite and non-negative, got {}",
            self.initial_value
        );
        Ok(steps)
    }
}

/// A coupon-bearing instrument valued on a rate lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CouponBondParameters {
    /// Face (redemption) value.
    pub face_value: Real,
    /// Coupon rate per step, as a decimal.
    pub coupon_rate: Rate,
    /// Maturity, in lattice steps.
    pub maturity: Integer,
}

impl CouponBondParameters {
    /// Create a new coupon instrument description.
    pub fn new(face_value: Real, coupon_rate: Rate, maturity: Integer) -> Self {
        Self {
            face_value,
            coupon_rate,
            maturity,
        }
    }

    /// Coupon paid at every node: `face_value · coupon_rate`.
    pub fn coupon_payment(&self) -> Real {
        self.face_value * self.coupon_rate
    }

    /// Check the scalar inputs and return the maturity as an index.
    ///
    /// Does not check the maturity against a lattice; that needs the lattice.
    pub fn validate(&self) -> Result<usize> {
        let maturity = non_negative_steps("maturity", self.maturity)?;
        ensure!(
            self.face_value.is_finite(),
            "face_value must be finite, got {}",
            self.face_value
        );
        ensure!(
            self.coupon_rate.is_finite(),
            "coupon_rate must be finite, got {}",
            self.coupon_rate
        );
        Ok(maturity)
    }
}

/// A vanilla option on an asset whose price follows a multiplicative lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionParameters {
    /// Initial asset price.
    pub spot: Real,
    /// Strike price.
    pub strike: Real,
    /// Up factor for the asset price.
    pub up_factor: Real,
    /// Down factor for the asset price.
    pub down_factor: Real,
    /// Risk-free rate per step, continuously compounded.
    pub rate: Rate,
    /// Number of time steps to expiry.
    pub steps: Integer,
    /// Call or put.
    pub option_type: OptionType,
    /// European or American.
    #[cfg_attr(feature = "serde", serde(default))]
    pub exercise: ExerciseType,
}

impl OptionParameters {
    /// The spot lattice underlying this option.
    pub fn lattice(&self) -> LatticeParameters {
        LatticeParameters::new(self.spot, self.up_factor, self.down_factor, self.steps)
    }

    /// Risk-neutral up probability for this option's factors and rate.
    pub fn risk_neutral_probability(&self) -> Result<Real> {
        risk_neutral_probability(self.up_factor, self.down_factor, self.rate)
    }

    /// Check every precondition, including no-arbitrage.
    ///
    /// Returns `(steps, p)` where `p` is the risk-neutral up probability.
    pub fn validate(&self) -> Result<(usize, Real)> {
        let steps = self.lattice().validate()?;
        ensure!(
            self.strike.is_finite() && self.strike >= 0.0,
            "strike must be finite and non-negative, got {}",
            self.strike
        );
        ensure!(self.rate.is_finite(), "rate must be finite, got {}", self.rate);
        let p = risk_neutral_probability(self.up_factor, self.down_factor, self.rate)?;
        Ok((steps, p))
    }
}

/// Risk-neutral up probability `p = (e^r − d) / (u − d)`.
///
/// Fails with [`Error::ArbitrageViolation`] unless `d < e^r < u`, which is
/// equivalent to `0 < p < 1`.
///
/// ```
/// use bt_core::parameters::risk_neutral_probability;
/// let p = risk_neutral_probability(1.1, 0.9, 0.05).unwrap();
/// assert!((p - 0.756_355_481_880_120_3).abs() < 1e-12);
/// assert!(risk_neutral_probability(1.1, 0.9, 0.2).is_err());
/// ```
pub fn risk_neutral_probability(up: Real, down: Real, rate: Rate) -> Result<Real> {
    let growth = rate.exp();
    let probability = (growth - down) / (up - down);
    if down < growth && growth < up {
        Ok(probability)
    } else {
        Err(Error::ArbitrageViolation {
            up,
            down,
            growth,
            probability,
        })
    }
}

/// A complete pricing request for either instrument class.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "instrument", rename_all = "snake_case")
)]
pub enum PricingParameters {
    /// A coupon instrument discounted along a rate lattice.
    FixedIncome {
        /// The short-rate lattice.
        rate_lattice: LatticeParameters,
        /// The instrument.
        bond: CouponBondParameters,
    },
    /// A vanilla option on a spot lattice.
    #[cfg_attr(feature = "serde", serde(rename = "option"))]
    VanillaOption(OptionParameters),
}
