//! `fixed-income` command: coupon instrument on a short-rate lattice.

use std::io::Write;

use bt_core::{CouponBondParameters, Integer, LatticeParameters, PricingParameters, Real};
use clap::Args;

use crate::cli::OutputFormat;
use crate::error::CliResult;

/// Arguments for the fixed-income command.
#[derive(Args, Debug, Clone)]
pub struct FixedIncomeArgs {
    /// Initial one-period interest rate (as a decimal)
    #[arg(long, allow_negative_numbers = true)]
    pub initial_rate: Real,

    /// Up factor for the interest rate
    #[arg(long, allow_negative_numbers = true)]
    pub up: Real,

    /// Down factor for the interest rate
    #[arg(long, allow_negative_numbers = true)]
    pub down: Real,

    /// Number of time steps in the rate lattice
    #[arg(long, allow_negative_numbers = true)]
    pub steps: Integer,

    /// Face value of the instrument
    #[arg(long, default_value = "100")]
    pub face_value: Real,

    /// Coupon rate per step (as a decimal)
    #[arg(long, allow_negative_numbers = true)]
    pub coupon_rate: Real,

    /// Maturity of the instrument, in time steps
    #[arg(long, allow_negative_numbers = true)]
    pub maturity: Integer,
}

impl FixedIncomeArgs {
    /// The pricing request described by these arguments.
    pub fn to_parameters(&self) -> PricingParameters {
        PricingParameters::FixedIncome {
            rate_lattice: LatticeParameters::new(self.initial_rate, self.up, self.down, self.steps),
            bond: CouponBondParameters::new(self.face_value, self.coupon_rate, self.maturity),
        }
    }
}

/// Run the fixed-income command.
pub fn execute<W: Write>(args: &FixedIncomeArgs, format: OutputFormat, out: &mut W) -> CliResult<()> {
    super::price_and_render(&args.to_parameters(), format, out)
}
