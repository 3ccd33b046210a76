//! # bt-core
//!
//! Core types, parameter structs, and error definitions for binotree.
//!
//! This crate provides the building blocks shared across the workspace:
//! type aliases, the error enum, the option kind / exercise style enums,
//! and the immutable parameter structs consumed by the pricing engines.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` macro.
pub mod errors;

/// Option kind (call / put) and exercise style (European / American).
pub mod option;

/// Lattice, coupon instrument, and option parameters.
pub mod parameters;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Signed integer used for step counts at the API boundary.
pub type Integer = i32;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A discount factor in [0, 1].
pub type DiscountFactor = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use option::{ExerciseType, OptionType};
pub use parameters::{
    risk_neutral_probability, CouponBondParameters, LatticeParameters, OptionParameters,
    PricingParameters,
};
