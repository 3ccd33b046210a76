//! Recombining binomial lattice of a state variable.
//!
//! Node `(i, j)` is the state after `i` steps of which `j` were down-moves:
//!
//! $$x_{i,j} = x_0 \, u^{\,i-j} \, d^{\,j}, \qquad 0 \le j \le i \le n$$
//!
//! Every node is evaluated from the closed form rather than by multiplying
//! along a path, so the up-then-down and down-then-up routes land on the
//! very same number.

use bt_core::{ensure, Integer, LatticeParameters, Real, Result, Size};
use tracing::debug;

use super::grid::TriangularGrid;

/// An immutable recombining binomial lattice.
///
/// Used both as a short-rate tree (fixed-income path) and as a spot tree
/// (option path).
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    initial_value: Real,
    up_factor: Real,
    down_factor: Real,
    grid: TriangularGrid<Real>,
}

impl Lattice {
    /// Build a lattice with `steps` time steps.
    ///
    /// # Errors
    /// * [`NegativeSteps`](bt_core::Error::NegativeSteps) if `steps < 0`
    /// * [`InvalidFactor`](bt_core::Error::InvalidFactor) if either factor is
    ///   zero, negative, or non-finite
    /// * [`InvalidArgument`](bt_core::Error::InvalidArgument) if
    ///   `initial_value` is negative or non-finite
    pub fn build(
        initial_value: Real,
        up_factor: Real,
        down_factor: Real,
        steps: Integer,
    ) -> Result<Self> {
        Self::from_parameters(&LatticeParameters::new(
            initial_value,
            up_factor,
            down_factor,
            steps,
        ))
    }

    /// Build a lattice from a parameter struct.
    pub fn from_parameters(params: &LatticeParameters) -> Result<Self> {
        let steps = params.validate()?;
        let LatticeParameters {
            initial_value,
            up_factor,
            down_factor,
            ..
        } = *params;

        let grid = TriangularGrid::from_fn(steps, |i, j| {
            closed_form(initial_value, up_factor, down_factor, i - j, j)
        })?;
        ensure!(
            grid.iter().all(|x| x.is_finite()),
            "up_factor {up_factor} and down_factor {down_factor} over {steps} steps \
             take lattice nodes outside the f64 range"
        );
        debug!(
            initial_value,
            up_factor,
            down_factor,
            steps,
            nodes = grid.len(),
            "built binomial lattice"
        );

        Ok(Self {
            initial_value,
            up_factor,
            down_factor,
            grid,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Number of time steps.
    pub fn steps(&self) -> Size {
        self.grid.steps()
    }

    /// Root value.
    pub fn initial_value(&self) -> Real {
        self.initial_value
    }

    /// Up factor.
    pub fn up_factor(&self) -> Real {
        self.up_factor
    }

    /// Down factor.
    pub fn down_factor(&self) -> Real {
        self.down_factor
    }

    /// Value after `step` steps with `down` down-moves.
    ///
    /// # Panics
    /// Panics if `down > step` or `step > steps()`.
    pub fn node(&self, step: Size, down: Size) -> Real {
        self.grid[(step, down)]
    }

    /// Value at `(step, down)`, or `None` outside the triangle.
    pub fn get(&self, step: Size, down: Size) -> Option<Real> {
        self.grid.get(step, down).copied()
    }

    /// All node values at `step`, ordered by down-move count.
    pub fn layer(&self, step: Size) -> &[Real] {
        self.grid.layer(step)
    }

    /// The underlying flat grid.
    pub fn grid(&self) -> &TriangularGrid<Real> {
        &self.grid
    }

    /// Dense rows (row = step, column = down-moves), zero past the diagonal.
    pub fn to_dense(&self) -> Vec<Vec<Real>> {
        self.grid.to_dense(0.0)
    }
}

/// `x0 * u^ups * d^downs`.
///
/// The direct product is used for ordinary factors. When an intermediate
/// power leaves the `f64` range (e.g. `u^k = inf` against `d^m = 0`) the node
/// is recomputed in log space, so only a node whose true value is out of
/// range comes back non-finite.
fn closed_form(x0: Real, up: Real, down: Real, ups: Size, downs: Size) -> Real {
    if x0 == 0.0 {
        return 0.0;
    }
    let direct = x0 * up.powi(ups as i32) * down.powi(downs as i32);
    if direct.is_finite() && direct != 0.0 {
        return direct;
    }
    (x0.ln() + ups as Real * up.ln() + downs as Real * down.ln()).exp()
}

/// Free-function form of [`Lattice::build`].
pub fn build_lattice(
    initial_value: Real,
    up_factor: Real,
    down_factor: Real,
    steps: Integer,
) -> Result<Lattice> {
    Lattice::build(initial_value, up_factor, down_factor, steps)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bt_core::Error;
    use proptest::prelude::*;

    #[test]
    fn two_step_rate_lattice() {
        let lattice = Lattice::build(0.05, 1.1, 0.9, 2).unwrap();
        assert_eq!(lattice.steps(), 2);
        assert_relative_eq!(lattice.node(0, 0), 0.05);
        assert_relative_eq!(lattice.node(1, 0), 0.055, epsilon = 1e-15);
        assert_relative_eq!(lattice.node(1, 1), 0.045, epsilon = 1e-15);
        assert_relative_eq!(lattice.node(2, 0), 0.0605, epsilon = 1e-15);
        assert_relative_eq!(lattice.node(2, 1), 0.0495, epsilon = 1e-15);
        assert_relative_eq!(lattice.node(2, 2), 0.0405, epsilon = 1e-15);
        assert_eq!(lattice.get(1, 2), None);
    }

    #[test]
    fn zero_steps_is_just_the_root() {
        let lattice = build_lattice(100.0, 1.2, 0.8, 0).unwrap();
        assert_eq!(lattice.steps(), 0);
        assert_eq!(lattice.to_dense(), vec![vec![100.0]]);
    }

    #[test]
    fn dense_form_is_row_major_by_step() {
        let lattice = Lattice::build(100.0, 1.1, 0.9, 2).unwrap();
        let dense = lattice.to_dense();
        assert_eq!(dense.len(), 3);
        assert_eq!(dense[0][1], 0.0);
        assert_eq!(dense[1][2], 0.0);
        assert_relative_eq!(dense[2][1], 99.0, epsilon = 1e-12);
    }

    #[test]
    fn invalid_inputs_fail_before_building() {
        assert_eq!(
            Lattice::build(100.0, 1.1, 0.9, -3),
            Err(Error::NegativeSteps {
                parameter: "steps",
                value: -3
            })
        );
        assert!(matches!(
            Lattice::build(100.0, 0.0, 0.9, 3),
            Err(Error::InvalidFactor {
                parameter: "up_factor",
                ..
            })
        ));
        assert!(matches!(
            Lattice::build(100.0, 1.1, -0.9, 3),
            Err(Error::InvalidFactor {
                parameter: "down_factor",
                ..
            })
        ));
        assert!(matches!(
            Lattice::build(100.0, 1.1, Real::NAN, 3),
            Err(Error::InvalidFactor { .. })
        ));
        assert!(matches!(
            Lattice::build(-1.0, 1.1, 0.9, 3),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn step_count_beyond_addressable_memory_is_an_error() {
        assert!(matches!(
            Lattice::build(1.0, 1.1, 0.9, Integer::MAX),
            Err(Error::InvalidArgument(msg)) if msg.contains("steps too large")
        ));
    }

    #[test]
    fn out_of_range_nodes_are_rejected() {
        // u^33 alone is 1e660
        assert!(matches!(
            Lattice::build(1.0, 1e20, 1e-20, 33),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn overflowing_powers_fall_back_to_log_space() {
        // u^20 overflows on its own but x0 * u^20 * d^10 = 1e-100
        let lattice = Lattice::build(1e-300, 1e20, 1e-20, 30).unwrap();
        assert!(lattice.grid().iter().all(|x| x.is_finite() && *x >= 0.0));
        assert_relative_eq!(lattice.node(30, 0), 1e300, max_relative = 1e-9);
        assert_relative_eq!(lattice.node(30, 10), 1e-100, max_relative = 1e-9);
        assert_relative_eq!(lattice.node(30, 15), 1e-300, max_relative = 1e-9);
    }

    #[test]
    fn zero_initial_value_stays_zero() {
        let lattice = Lattice::build(0.0, 1e20, 1e-20, 40).unwrap();
        assert!(lattice.grid().iter().all(|&x| x == 0.0));
    }

    fn iterate_path(x0: Real, up: Real, down: Real, moves: &[bool]) -> Real {
        moves
            .iter()
            .fold(x0, |x, &is_down| if is_down { x * down } else { x * up })
    }

    proptest! {
        #[test]
        fn recombines_regardless_of_move_order(
            x0 in 0.01_f64..1_000.0,
            up in 1.001_f64..2.0,
            down in 0.1_f64..0.999,
            steps in 1_usize..40,
            seed in any::<u64>(),
        ) {
            let lattice = Lattice::build(x0, up, down, steps as Integer).unwrap();
            for i in 0..=steps {
                for j in 0..=i {
                    // two different interleavings of the same moves
                    let mut downs_first = vec![true; j];
                    downs_first.extend(std::iter::repeat(false).take(i - j));
                    let mut shuffled = downs_first.clone();
                    shuffled.rotate_left(((seed as usize) % (i + 1)).min(i));
                    let expected = lattice.node(i, j);
                    for path in [&downs_first, &shuffled] {
                        let walked = iterate_path(x0, up, down, path);
                        prop_assert!((walked - expected).abs() <= 1e-12 * expected.abs());
                    }
                }
            }
        }

        #[test]
        fn strictly_decreasing_in_down_moves(
            x0 in 0.01_f64..1_000.0,
            up in 1.001_f64..2.0,
            down in 0.1_f64..0.999,
            steps in 1_usize..60,
        ) {
            let lattice = Lattice::build(x0, up, down, steps as Integer).unwrap();
            for i in 0..=steps {
                for w in lattice.layer(i).windows(2) {
                    prop_assert!(w[1] < w[0], "layer {i}: {} !< {}", w[1], w[0]);
                }
            }
        }
    }
}
