//! Output formatting.
//!
//! The table format lists every node up to maturity with its state value
//! (rate or spot) next to its valuation, which is the textual counterpart of
//! drawing the tree.

use std::io::Write;

use bt_core::{PricingParameters, Real};
use bt_pricingengines::PricingOutcome;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliResult;

/// JSON document emitted by `--format json`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// The request as priced.
    pub parameters: &'a PricingParameters,
    /// Time-0 value.
    pub value: Real,
    /// Risk-neutral probability (options only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<Real>,
    /// Dense state lattice, row = step, column = down-moves.
    pub lattice: Vec<Vec<Real>>,
    /// Dense valuation tree, zero above the diagonal and past maturity.
    pub valuation: Vec<Vec<Real>>,
    /// Dense exercise map (options only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise: Option<Vec<Vec<bool>>>,
}

impl<'a> Report<'a> {
    /// Assemble the report for `outcome`.
    pub fn new(parameters: &'a PricingParameters, outcome: &PricingOutcome) -> Self {
        Self {
            parameters,
            value: outcome.value,
            probability: outcome.probability,
            lattice: outcome.lattice.to_dense(),
            valuation: outcome.tree.to_dense(0.0),
            exercise: outcome.exercise.as_ref().map(|e| e.to_dense(false)),
        }
    }
}

/// Write `outcome` to `out` in the requested format.
pub fn render<W: Write>(
    out: &mut W,
    params: &PricingParameters,
    outcome: &PricingOutcome,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Table => render_table(out, params, outcome)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &Report::new(params, outcome))?;
            writeln!(out)?;
        }
        OutputFormat::Minimal => writeln!(out, "{}", outcome.value)?,
    }
    Ok(())
}

fn headline(params: &PricingParameters) -> String {
    match params {
        PricingParameters::FixedIncome { bond, .. } => format!(
            "Fixed income: face {}, coupon rate {}, maturity {} steps",
            bond.face_value, bond.coupon_rate, bond.maturity
        ),
        PricingParameters::VanillaOption(o) => format!(
            "{} {} option: spot {}, strike {}, {} steps",
            o.exercise, o.option_type, o.spot, o.strike, o.steps
        ),
    }
}

fn render_table<W: Write>(
    out: &mut W,
    params: &PricingParameters,
    outcome: &PricingOutcome,
) -> std::io::Result<()> {
    writeln!(out, "{}", headline(params))?;
    writeln!(out, "Value: {:.6}", outcome.value)?;
    if let Some(p) = outcome.probability {
        writeln!(out, "Risk-neutral probability: {p:.6}")?;
    }
    writeln!(out)?;

    let state_label = match params {
        PricingParameters::FixedIncome { .. } => "rate",
        PricingParameters::VanillaOption(_) => "spot",
    };
    write!(out, "{:>5} {:>5} {:>14} {:>14}", "step", "node", state_label, "value")?;
    if outcome.exercise.is_some() {
        write!(out, " {:>8}", "exercise")?;
    }
    writeln!(out)?;

    for step in 0..=outcome.tree.last_step() {
        for (node, value) in outcome.tree.layer(step).iter().enumerate() {
            let state = outcome.lattice.node(step, node);
            write!(out, "{step:>5} {node:>5} {state:>14.6} {value:>14.6}")?;
            if let Some(flag) = outcome
                .exercise
                .as_ref()
                .and_then(|e| e.get(step, node).copied())
            {
                write!(out, " {:>8}", if flag { "yes" } else { "" })?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}
