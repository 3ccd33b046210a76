//! Valuation trees produced by backward induction.
//!
//! A valuation tree shares the shape of the lattice it was computed on but
//! is only populated up to `last_step` (the instrument's maturity). Cells
//! past that step are never written, and [`ValuationTree::get`] refuses to
//! hand them out.

use bt_core::{Real, Size};

use super::grid::TriangularGrid;

/// Instrument or option values at every node up to maturity.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationTree<T = Real> {
    grid: TriangularGrid<T>,
    last_step: Size,
}

impl<T> ValuationTree<T> {
    /// Wrap a rolled-back grid whose layers `0..=last_step` are populated.
    ///
    /// # Panics
    /// Panics if `last_step > grid.steps()`.
    pub fn new(grid: TriangularGrid<T>, last_step: Size) -> Self {
        assert!(
            last_step <= grid.steps(),
            "last step {last_step} beyond grid depth {}",
            grid.steps()
        );
        Self { grid, last_step }
    }

    /// Last populated step (the maturity).
    pub fn last_step(&self) -> Size {
        self.last_step
    }

    /// Depth of the underlying lattice.
    pub fn lattice_steps(&self) -> Size {
        self.grid.steps()
    }

    /// Value at `(step, node)`, or `None` if the cell is outside the
    /// triangle or past maturity.
    pub fn get(&self, step: Size, node: Size) -> Option<&T> {
        if step > self.last_step {
            return None;
        }
        self.grid.get(step, node)
    }

    /// All populated values at `step`.
    ///
    /// # Panics
    /// Panics if `step > last_step()`.
    pub fn layer(&self, step: Size) -> &[T] {
        assert!(
            step <= self.last_step,
            "step {step} past maturity {}",
            self.last_step
        );
        self.grid.layer(step)
    }

    /// Value at node `(0, 0)`: the time-0 price.
    pub fn root(&self) -> &T {
        &self.grid[(0, 0)]
    }

    /// Apply `f` to every cell, keeping shape and maturity.
    pub fn map<U, F>(&self, f: F) -> ValuationTree<U>
    where
        F: FnMut(&T) -> U,
    {
        ValuationTree {
            grid: self.grid.map(f),
            last_step: self.last_step,
        }
    }
}

impl<T: Clone> ValuationTree<T> {
    /// Dense `(steps + 1) × (steps + 1)` rows of the full lattice shape;
    /// cells above the diagonal or past maturity hold `fill`.
    pub fn to_dense(&self, fill: T) -> Vec<Vec<T>> {
        let mut rows = self.grid.to_dense(fill.clone());
        for row in rows.iter_mut().skip(self.last_step + 1) {
            row.iter_mut().for_each(|cell| *cell = fill.clone());
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_past_maturity_are_hidden() {
        let grid = TriangularGrid::from_fn(3, |i, j| (i * 10 + j) as Real).unwrap();
        let tree = ValuationTree::new(grid, 1);
        assert_eq!(tree.get(1, 1), Some(&11.0));
        assert_eq!(tree.get(2, 0), None);
        assert_eq!(tree.get(0, 1), None);
        assert_eq!(*tree.root(), 0.0);
        assert_eq!(tree.lattice_steps(), 3);

        let dense = tree.to_dense(0.0);
        assert_eq!(dense.len(), 4);
        assert_eq!(dense[1], vec![10.0, 11.0, 0.0, 0.0]);
        assert_eq!(dense[2], vec![0.0; 4]);
    }

    #[test]
    #[should_panic]
    fn layer_past_maturity_panics() {
        let tree = ValuationTree::new(TriangularGrid::new(2, 0.0).unwrap(), 0);
        let _ = tree.layer(1);
    }
}
