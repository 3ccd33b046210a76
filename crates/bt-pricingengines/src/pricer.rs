//! Single entry point over both instrument classes.

use bt_core::{Error, PricingParameters, Real, Result};
use bt_methods::{Lattice, ValuationTree};

use crate::binomial_option_engine::BinomialOptionEngine;
use crate::fixed_income_engine::FixedIncomeEngine;

/// Everything a host needs to report or render a valuation.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingOutcome {
    /// State lattice the instrument was valued on (rates or spot).
    pub lattice: Lattice,
    /// Time-0 value.
    pub value: Real,
    /// Value at every node up to maturity.
    pub tree: ValuationTree,
    /// Risk-neutral probability (option path only).
    pub probability: Option<Real>,
    /// Exercise decisions (option path only).
    pub exercise: Option<ValuationTree<bool>>,
}

/// Validate `params`, build the lattice, and run the matching engine.
///
/// Every input check runs before the lattice is built.
pub fn price(params: &PricingParameters) -> Result<PricingOutcome> {
    match params {
        PricingParameters::FixedIncome { rate_lattice, bond } => {
            let steps = rate_lattice.validate()?;
            let maturity = bond.validate()?;
            if maturity > steps {
                return Err(Error::MaturityExceedsSteps { maturity, steps });
            }
            let lattice = Lattice::from_parameters(rate_lattice)?;
            let tree = FixedIncomeEngine::new(*bond).value(&lattice)?;
            Ok(PricingOutcome {
                value: *tree.root(),
                lattice,
                tree,
                probability: None,
                exercise: None,
            })
        }
        PricingParameters::VanillaOption(option) => {
            let (lattice, valuation) = BinomialOptionEngine::new(*option).value_with_lattice()?;
            Ok(PricingOutcome {
                lattice,
                value: valuation.value,
                tree: valuation.tree,
                probability: Some(valuation.probability),
                exercise: Some(valuation.exercise),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bt_core::{
        CouponBondParameters, ExerciseType, LatticeParameters, OptionParameters, OptionType,
    };

    #[test]
    fn dispatches_fixed_income() {
        let outcome = price(&PricingParameters::FixedIncome {
            rate_lattice: LatticeParameters::new(0.05, 1.1, 0.9, 3),
            bond: CouponBondParameters::new(100.0, 0.05, 2),
        })
        .unwrap();
        assert_relative_eq!(outcome.value, 104.537_409_875_399_39, epsilon = 1e-10);
        assert_eq!(outcome.lattice.steps(), 3);
        assert!(outcome.exercise.is_none());
    }

    #[test]
    fn dispatches_options() {
        let outcome = price(&PricingParameters::VanillaOption(OptionParameters {
            spot: 100.0,
            strike: 100.0,
            up_factor: 1.1,
            down_factor: 0.9,
            rate: 0.05,
            steps: 2,
            option_type: OptionType::Call,
            exercise: ExerciseType::European,
        }))
        .unwrap();
        assert_relative_eq!(outcome.value, 10.870_305_866_617_077, epsilon = 1e-12);
        assert!(outcome.probability.is_some());
        assert_eq!(outcome.exercise.map(|e| e.last_step()), Some(2));
    }

    #[test]
    fn maturity_is_checked_before_building() {
        let err = price(&PricingParameters::FixedIncome {
            rate_lattice: LatticeParameters::new(0.05, 1.1, 0.9, 10),
            bond: CouponBondParameters::new(100.0, 0.05, 11),
        })
        .unwrap_err();
        assert_eq!(
            err,
            Error::MaturityExceedsSteps {
                maturity: 11,
                steps: 10
            }
        );
    }

    #[test]
    fn oversized_rate_lattice_is_rejected_not_aborted() {
        let err = price(&PricingParameters::FixedIncome {
            rate_lattice: LatticeParameters::new(0.05, 1.1, 0.9, i32::MAX),
            bond: CouponBondParameters::new(100.0, 0.05, 3),
        })
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(msg) if msg.contains("steps too large")));
    }
}
