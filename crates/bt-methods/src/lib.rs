//! # bt-methods
//!
//! Numerical methods: recombining lattice construction and the
//! backward-induction driver shared by every binotree pricing engine.
//!
//! # Modules
//!
//! * [`lattice`] — triangular grids, binomial lattices, valuation trees,
//!   and [`roll_back`]

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: binomial lattices and backward induction.
pub mod lattice;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{
    build_lattice, roll_back, Lattice, TriangularGrid, ValuationTree, PARALLEL_LAYER_THRESHOLD,
};
