//! # binotree
//!
//! Recombining binomial-lattice valuation of coupon instruments and vanilla
//! options.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `bt-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use binotree::core::{ExerciseType, OptionType};
//! use binotree::methods::Lattice;
//! use binotree::pricingengines::{value_fixed_income, value_option};
//!
//! let rates = Lattice::build(0.05, 1.1, 0.9, 3).unwrap();
//! let bond = value_fixed_income(100.0, 0.05, 3, &rates).unwrap();
//! assert!(*bond.root() > 100.0);
//!
//! let put = value_option(
//!     100.0, 100.0, 1.1, 0.9, 0.05, 2,
//!     OptionType::Put, ExerciseType::American,
//! ).unwrap();
//! assert!(put.value > 0.0);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, parameters, and error definitions.
pub use bt_core as core;

/// Triangular grids, lattices, and backward induction.
pub use bt_methods as methods;

/// Fixed-income and option pricing engines.
pub use bt_pricingengines as pricingengines;
