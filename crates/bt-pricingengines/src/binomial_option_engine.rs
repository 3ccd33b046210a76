//! Vanilla options on a multiplicative spot lattice.
//!
//! The spot follows `S_{i,j} = S_0 u^{i-j} d^j` and the one-step rate `r`
//! is continuously compounded, so the risk-neutral up probability is
//!
//! $$p = \frac{e^{r} - d}{u - d}$$
//!
//! and must lie strictly inside `(0, 1)`. Terminal values are the payoff;
//! interior nodes hold the discounted expectation
//! `e^{-r} (p V_{j,t+1} + (1-p) V_{j+1,t+1})`, floored at intrinsic value
//! for American exercise.

use bt_core::{
    ExerciseType, Integer, OptionParameters, OptionType, Rate, Real, Result,
};
use bt_methods::{roll_back, Lattice, TriangularGrid, ValuationTree};
use tracing::debug;

/// Result of an option valuation.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionValuation {
    /// Time-0 value (node `(0, 0)` of [`tree`](Self::tree)).
    pub value: Real,
    /// Risk-neutral up probability used in the roll-back.
    pub probability: Real,
    /// Option value at every node.
    pub tree: ValuationTree,
    /// `true` where the holder exercises: in-the-money nodes at expiry and,
    /// for American options, interior nodes where intrinsic value strictly
    /// exceeds continuation.
    pub exercise: ValuationTree<bool>,
}

impl OptionValuation {
    /// Number of interior nodes (before expiry) flagged for early exercise.
    pub fn early_exercise_count(&self) -> usize {
        let last = self.exercise.last_step();
        (0..last)
            .map(|step| self.exercise.layer(step).iter().filter(|&&e| e).count())
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Node {
    value: Real,
    exercised: bool,
}

/// Value a vanilla option by backward induction on a binomial spot lattice.
///
/// # Errors
/// * [`NegativeSteps`](bt_core::Error::NegativeSteps) if `steps < 0`
/// * [`InvalidFactor`](bt_core::Error::InvalidFactor) for a non-positive or
///   non-finite factor
/// * [`InvalidArgument`](bt_core::Error::InvalidArgument) for a negative or
///   non-finite spot or strike, or a non-finite rate
/// * [`ArbitrageViolation`](bt_core::Error::ArbitrageViolation) unless
///   `down < exp(rate) < up`
///
/// # Example
/// ```
/// use bt_core::{ExerciseType, OptionType};
/// use bt_pricingengines::value_option;
///
/// let v = value_option(
///     100.0, 100.0, 1.1, 0.9, 0.05, 2,
///     OptionType::Call, ExerciseType::European,
/// ).unwrap();
/// assert!((v.value - 10.870_305_866_617_077).abs() < 1e-9);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn value_option(
    spot: Real,
    strike: Real,
    up: Real,
    down: Real,
    rate: Rate,
    steps: Integer,
    option_type: OptionType,
    exercise: ExerciseType,
) -> Result<OptionValuation> {
    BinomialOptionEngine::new(OptionParameters {
        spot,
        strike,
        up_factor: up,
        down_factor: down,
        rate,
        steps,
        option_type,
        exercise,
    })
    .value()
}

/// Binomial lattice engine for European and American vanilla options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialOptionEngine {
    params: OptionParameters,
}

impl BinomialOptionEngine {
    /// Create an engine for the given option.
    pub fn new(params: OptionParameters) -> Self {
        Self { params }
    }

    /// The option being valued.
    pub fn parameters(&self) -> &OptionParameters {
        &self.params
    }

    /// Value the option.
    pub fn value(&self) -> Result<OptionValuation> {
        self.value_with_lattice().map(|(_, valuation)| valuation)
    }

    /// Value the option and also return the spot lattice it was priced on.
    pub fn value_with_lattice(&self) -> Result<(Lattice, OptionValuation)> {
        let (steps, p) = self.params.validate()?;
        let spot_lattice = Lattice::from_parameters(&self.params.lattice())?;
        let valuation = self.roll_back_on(&spot_lattice, steps, p)?;
        Ok((spot_lattice, valuation))
    }

    fn roll_back_on(&self, spot_lattice: &Lattice, steps: usize, p: Real) -> Result<OptionValuation> {
        let OptionParameters {
            strike,
            rate,
            option_type,
            exercise,
            ..
        } = self.params;
        let discount = (-rate).exp();
        let early_exercise = exercise.allows_early_exercise();

        let mut grid = TriangularGrid::new(
            steps,
            Node {
                value: 0.0,
                exercised: false,
            },
        )?;
        for (j, cell) in grid.layer_mut(steps).iter_mut().enumerate() {
            let payoff = option_type.intrinsic(spot_lattice.node(steps, j), strike);
            *cell = Node {
                value: payoff,
                exercised: payoff > 0.0,
            };
        }

        roll_back(&mut grid, steps, |t, j, up, down| {
            let continuation = discount * (p * up.value + (1.0 - p) * down.value);
            if early_exercise {
                let intrinsic = option_type.intrinsic(spot_lattice.node(t, j), strike);
                if intrinsic > continuation {
                    return Node {
                        value: intrinsic,
                        exercised: true,
                    };
                }
            }
            Node {
                value: continuation,
                exercised: false,
            }
        });

        let nodes = ValuationTree::new(grid, steps);
        let valuation = OptionValuation {
            value: nodes.root().value,
            probability: p,
            tree: nodes.map(|n| n.value),
            exercise: nodes.map(|n| n.exercised),
        };
        debug!(
            %option_type,
            %exercise,
            steps,
            probability = p,
            value = valuation.value,
            early_exercise_nodes = valuation.early_exercise_count(),
            "valued option"
        );
        Ok(valuation)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
