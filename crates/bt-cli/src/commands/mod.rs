//! CLI command implementations.
//!
//! Each command turns its arguments into a
//! [`PricingParameters`](bt_core::PricingParameters) request, hands it to the
//! pricing core, and renders the outcome.

pub mod fixed_income;
pub mod option;
pub mod run;

pub use fixed_income::FixedIncomeArgs;
pub use option::OptionArgs;
pub use run::RunArgs;

use std::io::Write;

use bt_core::PricingParameters;
use tracing::info;

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::output;

/// Price `params` and write the report to `out`.
pub fn price_and_render<W: Write>(
    params: &PricingParameters,
    format: OutputFormat,
    out: &mut W,
) -> CliResult<()> {
    let outcome = bt_pricingengines::price(params)?;
    info!(value = outcome.value, "pricing complete");
    output::render(out, params, &outcome, format)
}
