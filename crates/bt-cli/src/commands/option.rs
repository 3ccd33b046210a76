//! `option` command: vanilla option on a spot lattice.

use std::io::Write;

use bt_core::{ExerciseType, Integer, OptionParameters, OptionType, PricingParameters, Real};
use clap::Args;

use crate::cli::OutputFormat;
use crate::error::CliResult;

/// Arguments for the option command.
#[derive(Args, Debug, Clone)]
pub struct OptionArgs {
    /// Initial asset price
    #[arg(long, allow_negative_numbers = true)]
    pub spot: Real,

    /// Strike price
    #[arg(long, allow_negative_numbers = true)]
    pub strike: Real,

    /// Up factor for the asset price
    #[arg(long, allow_negative_numbers = true)]
    pub up: Real,

    /// Down factor for the asset price
    #[arg(long, allow_negative_numbers = true)]
    pub down: Real,

    /// Risk-free rate per step (as a decimal, continuously compounded)
    #[arg(long, allow_negative_numbers = true)]
    pub rate: Real,

    /// Number of time steps to expiry
    #[arg(long, allow_negative_numbers = true)]
    pub steps: Integer,

    /// Option type: call or put
    #[arg(long, default_value = "call")]
    pub option_type: OptionType,

    /// Exercise style: european or american
    #[arg(long, default_value = "european")]
    pub exercise: ExerciseType,
}

impl OptionArgs {
    /// The pricing request described by these arguments.
    pub fn to_parameters(&self) -> PricingParameters {
        PricingParameters::VanillaOption(OptionParameters {
            spot: self.spot,
            strike: self.strike,
            up_factor: self.up,
            down_factor: self.down,
            rate: self.rate,
            steps: self.steps,
            option_type: self.option_type,
            exercise: self.exercise,
        })
    }
}

/// Run the option command.
pub fn execute<W: Write>(args: &OptionArgs, format: OutputFormat, out: &mut W) -> CliResult<()> {
    super::price_and_render(&args.to_parameters(), format, out)
}
