//! Flat storage for recombining trees.
//!
//! A tree with `n` steps has `n + 1` layers and layer `i` holds `i + 1`
//! nodes, so the whole triangle fits in one allocation of
//! `(n + 1)(n + 2) / 2` cells. Layers are stored back to back:
//!
//! ```text
//! offset(i) = i (i + 1) / 2
//! cell(i, j) = data[offset(i) + j]      0 <= j <= i
//! ```
//!
//! Cells with `j > i` do not exist; reading them is a logic error.
//!
//! Construction reserves the whole arena up front and reports a tree that
//! cannot be addressed or allocated as an error instead of aborting.

use std::ops::{Index, IndexMut};

use bt_core::{Error, Result, Size};

/// A triangular grid indexed by `(step, node)` with `node <= step`.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangularGrid<T> {
    steps: Size,
    data: Vec<T>,
}

#[inline]
fn offset(step: Size) -> Size {
    step * (step + 1) / 2
}

/// Number of cells in a tree with `steps` steps, or `None` if it does not
/// fit in `usize`.
fn cell_count(steps: Size) -> Option<Size> {
    let layers = steps.checked_add(1)?;
    let doubled = layers.checked_mul(layers.checked_add(1)?)?;
    Some(doubled / 2)
}

fn too_large(steps: Size) -> Error {
    Error::InvalidArgument(format!(
        "steps too large: a {steps}-step tree cannot be allocated"
    ))
}

/// Empty storage with room for every cell of a `steps`-step tree.
fn reserve<T>(steps: Size) -> Result<Vec<T>> {
    let cells = cell_count(steps).ok_or_else(|| too_large(steps))?;
    let mut data = Vec::new();
    data.try_reserve_exact(cells).map_err(|_| too_large(steps))?;
    Ok(data)
}

impl<T> TriangularGrid<T> {
    /// Build a grid by evaluating `f(step, node)` at every valid cell.
    ///
    /// # Errors
    /// [`InvalidArgument`](Error::InvalidArgument) if the arena for `steps`
    /// cannot be sized or allocated.
    pub fn from_fn<F>(steps: Size, mut f: F) -> Result<Self>
    where
        F: FnMut(Size, Size) -> T,
    {
        let mut data = reserve(steps)?;
        for step in 0..=steps {
            for node in 0..=step {
                data.push(f(step, node));
            }
        }
        Ok(Self { steps, data })
    }

    /// Number of time steps (layers − 1).
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Number of nodes in layer `step` (always `step + 1`).
    pub fn size(&self, step: Size) -> Size {
        step + 1
    }

    /// Total number of stored cells.
    pub fn len(&self) -> Size {
        self.data.len()
    }

    /// Never `true` for a built grid: even a zero-step grid has its root.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Every cell, layer by layer.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// `true` if `(step, node)` lies inside the triangle.
    pub fn is_valid(&self, step: Size, node: Size) -> bool {
        step <= self.steps && node <= step
    }

    /// Cell `(step, node)`, or `None` outside the triangle.
    pub fn get(&self, step: Size, node: Size) -> Option<&T> {
        if self.is_valid(step, node) {
            Some(&self.data[offset(step) + node])
        } else {
            None
        }
    }

    /// All nodes of layer `step`, ordered by down-move count.
    ///
    /// # Panics
    /// Panics if `step > steps()`.
    pub fn layer(&self, step: Size) -> &[T] {
        assert!(step <= self.steps, "step {step} beyond grid depth {}", self.steps);
        &self.data[offset(step)..offset(step + 1)]
    }

    /// Mutable view of layer `step`.
    ///
    /// # Panics
    /// Panics if `step > steps()`.
    pub fn layer_mut(&mut self, step: Size) -> &mut [T] {
        assert!(step <= self.steps, "step {step} beyond grid depth {}", self.steps);
        &mut self.data[offset(step)..offset(step + 1)]
    }

    /// Layer `step` (mutable) together with layer `step + 1` (shared).
    ///
    /// The two layers are adjacent in storage, so a single split yields
    /// disjoint borrows.
    ///
    /// # Panics
    /// Panics if `step >= steps()`.
    pub fn layer_pair_mut(&mut self, step: Size) -> (&mut [T], &[T]) {
        assert!(
            step < self.steps,
            "no layer after step {step} (grid depth {})",
            self.steps
        );
        let (head, tail) = self.data.split_at_mut(offset(step + 1));
        (&mut head[offset(step)..], &tail[..step + 2])
    }

    /// Apply `f` cell by cell, preserving the shape.
    pub fn map<U, F>(&self, mut f: F) -> TriangularGrid<U>
    where
        F: FnMut(&T) -> U,
    {
        TriangularGrid {
            steps: self.steps,
            data: self.data.iter().map(&mut f).collect(),
        }
    }
}

impl<T: Clone> TriangularGrid<T> {
    /// A grid with every cell set to `fill`.
    ///
    /// # Errors
    /// [`InvalidArgument`](Error::InvalidArgument) if the arena for `steps`
    /// cannot be sized or allocated.
    pub fn new(steps: Size, fill: T) -> Result<Self> {
        let mut data = reserve(steps)?;
        data.resize(offset(steps + 1), fill);
        Ok(Self { steps, data })
    }

    /// Dense `(steps + 1) × (steps + 1)` rows, one per step, padded with
    /// `fill` past the diagonal.
    pub fn to_dense(&self, fill: T) -> Vec<Vec<T>> {
        (0..=self.steps)
            .map(|step| {
                let mut row = Vec::with_capacity(self.steps + 1);
                row.extend_from_slice(self.layer(step));
                row.resize(self.steps + 1, fill.clone());
                row
            })
            .collect()
    }
}

impl<T> Index<(Size, Size)> for TriangularGrid<T> {
    type Output = T;

    fn index(&self, (step, node): (Size, Size)) -> &T {
        assert!(
            self.is_valid(step, node),
            "node ({step}, {node}) outside triangle of depth {}",
            self.steps
        );
        &self.data[offset(step) + node]
    }
}

impl<T> IndexMut<(Size, Size)> for TriangularGrid<T> {
    fn index_mut(&mut self, (step, node): (Size, Size)) -> &mut T {
        assert!(
            self.is_valid(step, node),
            "node ({step}, {node}) outside triangle of depth {}",
            self.steps
        );
        &mut self.data[offset(step) + node]
    }
}
