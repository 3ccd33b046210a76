//! Lattice methods.
//!
//! # Overview
//!
//! * [`TriangularGrid`] — flat arena storage for a recombining tree
//! * [`Lattice`] — recombining binomial lattice of a rate or asset price
//! * [`ValuationTree`] — values produced by backward induction
//! * [`roll_back`] — the backward-induction driver
//!
//! Within one step every node depends only on its two children in the next
//! step, so a layer can be filled in parallel; the layers themselves must be
//! processed strictly from maturity back to the root.

pub mod binomial_lattice;
pub mod grid;
pub mod valuation_tree;

pub use binomial_lattice::{build_lattice, Lattice};
pub use grid::TriangularGrid;
pub use valuation_tree::ValuationTree;

use bt_core::Size;
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Layers with at least this many nodes are filled on the rayon pool.
pub const PARALLEL_LAYER_THRESHOLD: Size = 512;

// ─── Backward induction ───────────────────────────────────────────────────────

/// Fill layers `from_step − 1` down to `0` of `grid` from the layer after.
///
/// Layer `from_step` must already hold terminal values. For each node,
/// `node_fn(step, node, up_child, down_child)` receives the child reached by
/// an up-move (`(step + 1, node)`) and by a down-move (`(step + 1, node + 1)`).
///
/// Layers past `from_step` are left untouched.
///
/// # Panics
/// Panics if `from_step > grid.steps()`.
pub fn roll_back<T, F>(grid: &mut TriangularGrid<T>, from_step: Size, node_fn: F)
where
    T: Send + Sync,
    F: Fn(Size, Size, &T, &T) -> T + Sync,
{
    assert!(
        from_step <= grid.steps(),
        "cannot roll back from step {from_step} on a grid of depth {}",
        grid.steps()
    );
    for step in (0..from_step).rev() {
        let (current, next) = grid.layer_pair_mut(step);
        roll_layer(step, current, next, &node_fn);
        trace!(step, nodes = current.len(), "rolled back layer");
    }
}

#[cfg(feature = "parallel")]
fn roll_layer<T, F>(step: Size, current: &mut [T], next: &[T], node_fn: &F)
where
    T: Send + Sync,
    F: Fn(Size, Size, &T, &T) -> T + Sync,
{
    if current.len() >= PARALLEL_LAYER_THRESHOLD {
        current
            .par_iter_mut()
            .enumerate()
            .for_each(|(node, cell)| *cell = node_fn(step, node, &next[node], &next[node + 1]));
    } else {
        roll_layer_serial(step, current, next, node_fn);
    }
}

#[cfg(not(feature = "parallel"))]
fn roll_layer<T, F>(step: Size, current: &mut [T], next: &[T], node_fn: &F)
where
    F: Fn(Size, Size, &T, &T) -> T,
{
    roll_layer_serial(step, current, next, node_fn);
}

fn roll_layer_serial<T, F>(step: Size, current: &mut [T], next: &[T], node_fn: &F)
where
    F: Fn(Size, Size, &T, &T) -> T,
{
    for (node, cell) in current.iter_mut().enumerate() {
        *cell = node_fn(step, node, &next[node], &next[node + 1]);
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
