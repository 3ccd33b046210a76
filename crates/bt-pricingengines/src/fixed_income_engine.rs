//! Coupon instrument valued on a short-rate lattice.
//!
//! Every node at the maturity step holds face value plus one coupon. Rolling
//! back, each node receives the coupon plus the equally weighted average of
//! its two children, discounted at the node's own one-period rate:
//!
//! $$V_{j,t} = \left(C + \tfrac12 (V_{j,t+1} + V_{j+1,t+1})\right) \frac{1}{1 + r_{j,t}}$$
//!
//! The ½ weights are the rate-tree convention and are deliberately distinct
//! from the calibrated probability used by the option engine.

use bt_core::{CouponBondParameters, Error, Integer, Rate, Real, Result};
use bt_methods::{roll_back, Lattice, TriangularGrid, ValuationTree};
use tracing::debug;

/// Value a coupon-bearing instrument on `rate_lattice`.
///
/// Returns the full valuation tree; [`ValuationTree::root`] is the time-0
/// price. Cells past `maturity` are never written.
///
/// # Errors
/// * [`NegativeSteps`](Error::NegativeSteps) if `maturity < 0`
/// * [`InvalidArgument`](Error::InvalidArgument) if `face_value` or
///   `coupon_rate` is non-finite
/// * [`MaturityExceedsSteps`](Error::MaturityExceedsSteps) if `maturity`
///   is deeper than the lattice
///
/// # Example
/// ```
/// use bt_methods::Lattice;
/// use bt_pricingengines::value_fixed_income;
///
/// let rates = Lattice::build(0.05, 1.1, 0.9, 2).unwrap();
/// let tree = value_fixed_income(100.0, 0.05, 2, &rates).unwrap();
/// assert!((tree.root() - 104.537_409_875_399_39).abs() < 1e-9);
/// ```
pub fn value_fixed_income(
    face_value: Real,
    coupon_rate: Rate,
    maturity: Integer,
    rate_lattice: &Lattice,
) -> Result<ValuationTree> {
    FixedIncomeEngine::new(CouponBondParameters::new(face_value, coupon_rate, maturity))
        .value(rate_lattice)
}

/// Lattice engine for a coupon instrument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedIncomeEngine {
    bond: CouponBondParameters,
}

impl FixedIncomeEngine {
    /// Create an engine for `bond`.
    pub fn new(bond: CouponBondParameters) -> Self {
        Self { bond }
    }

    /// The instrument being valued.
    pub fn bond(&self) -> &CouponBondParameters {
        &self.bond
    }

    /// Full valuation tree on `rate_lattice`.
    pub fn value(&self, rate_lattice: &Lattice) -> Result<ValuationTree> {
        let maturity = self.bond.validate()?;
        let steps = rate_lattice.steps();
        if maturity > steps {
            return Err(Error::MaturityExceedsSteps { maturity, steps });
        }

        let coupon = self.bond.coupon_payment();
        let mut grid = TriangularGrid::new(steps, 0.0)?;
        grid.layer_mut(maturity).fill(self.bond.face_value + coupon);

        roll_back(&mut grid, maturity, |t, j, up, down| {
            let expected = 0.5 * (up + down);
            let discount_factor = 1.0 / (1.0 + rate_lattice.node(t, j));
            (coupon + expected) * discount_factor
        });

        let tree = ValuationTree::new(grid, maturity);
        debug!(
            face_value = self.bond.face_value,
            coupon,
            maturity,
            value = *tree.root(),
            "valued coupon instrument"
        );
        Ok(tree)
    }

    /// Time-0 price on `rate_lattice`.
    pub fn price(&self, rate_lattice: &Lattice) -> Result<Real> {
        self.value(rate_lattice).map(|tree| *tree.root())
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rates(steps: Integer) -> Lattice {
        Lattice::build(0.05, 1.1, 0.9, steps).unwrap()
    }

    #[test]
    fn two_step_tree_matches_hand_values() {
        let tree = value_fixed_income(100.0, 0.05, 2, &rates(2)).unwrap();
        assert_relative_eq!(*tree.root(), 104.537_409_875_399_39, epsilon = 1e-10);
        assert_relative_eq!(tree.layer(1)[0], 104.265_402_843_601_9, epsilon = 1e-10);
        assert_relative_eq!(tree.layer(1)[1], 105.263_157_894_736_85, epsilon = 1e-10);
        assert_eq!(tree.layer(2), &[105.0, 105.0, 105.0]);
    }

    #[test]
    fn deeper_lattice_leaves_tail_unwritten() {
        let shallow = value_fixed_income(100.0, 0.05, 2, &rates(2)).unwrap();
        let deep = value_fixed_income(100.0, 0.05, 2, &rates(3)).unwrap();
        assert_eq!(deep.root(), shallow.root());
        assert_eq!(deep.last_step(), 2);
        assert_eq!(deep.lattice_steps(), 3);
        assert_eq!(deep.get(3, 0), None);
        assert_eq!(deep.to_dense(0.0)[3], vec![0.0; 4]);
    }

    #[test]
    fn wider_lattice_example() {
        let rates = Lattice::build(0.03, 1.2, 0.8, 4).unwrap();
        let price = FixedIncomeEngine::new(CouponBondParameters::new(1000.0, 0.04, 3))
            .price(&rates)
            .unwrap();
        assert_relative_eq!(price, 1065.028_260_101_712_7, epsilon = 1e-8);
    }

    #[test]
    fn zero_rates_accumulate_coupons() {
        let flat = Lattice::build(0.0, 1.1, 0.9, 5).unwrap();
        let tree = value_fixed_income(100.0, 0.05, 4, &flat).unwrap();
        // face + one coupon at every step including t = 0
        assert_relative_eq!(*tree.root(), 100.0 + 5.0 * 5.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_maturity_is_face_plus_coupon() {
        let tree = value_fixed_income(100.0, 0.05, 0, &rates(3)).unwrap();
        assert_eq!(*tree.root(), 105.0);
        assert_eq!(tree.get(1, 0), None);
    }

    #[test]
    fn maturity_beyond_lattice_is_rejected() {
        let err = value_fixed_income(100.0, 0.05, 11, &rates(10)).unwrap_err();
        assert_eq!(
            err,
            Error::MaturityExceedsSteps {
                maturity: 11,
                steps: 10
            }
        );
    }

    #[test]
    fn negative_maturity_is_rejected() {
        let err = value_fixed_income(100.0, 0.05, -1, &rates(3)).unwrap_err();
        assert_eq!(
            err,
            Error::NegativeSteps {
                parameter: "maturity",
                value: -1
            }
        );
    }

    #[test]
    fn higher_rates_lower_the_price() {
        let low = Lattice::build(0.02, 1.1, 0.9, 6).unwrap();
        let high = Lattice::build(0.08, 1.1, 0.9, 6).unwrap();
        let engine = FixedIncomeEngine::new(CouponBondParameters::new(100.0, 0.05, 6));
        assert!(engine.price(&high).unwrap() < engine.price(&low).unwrap());
    }
}
