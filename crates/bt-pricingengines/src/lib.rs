//! # bt-pricingengines
//!
//! Backward-induction pricing engines on recombining binomial lattices.
//!
//! ## Engines
//!
//! - [`FixedIncomeEngine`] / [`value_fixed_income`] — coupon instrument on a
//!   short-rate lattice, equal ½ branch weights
//! - [`BinomialOptionEngine`] / [`value_option`] — European and American
//!   vanilla options on a spot lattice, risk-neutral branch weights
//! - [`price`] — dispatch over [`PricingParameters`](bt_core::PricingParameters)

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod binomial_option_engine;
pub mod fixed_income_engine;
pub mod pricer;

pub use binomial_option_engine::{value_option, BinomialOptionEngine, OptionValuation};
pub use fixed_income_engine::{value_fixed_income, FixedIncomeEngine};
pub use pricer::{price, PricingOutcome};
