//! `run` command: pricing request loaded from a TOML file.
//!
//! ```toml
//! instrument = "option"
//! spot = 100.0
//! strike = 100.0
//! up_factor = 1.1
//! down_factor = 0.9
//! rate = 0.05
//! steps = 2
//! option_type = "call"
//! exercise = "european"
//! ```

use std::io::Write;
use std::path::PathBuf;

use bt_core::PricingParameters;
use clap::Args;
use tracing::info;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Arguments for the run command.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Path to the TOML parameter file
    #[arg(short, long)]
    pub config: PathBuf,
}

/// Parse a pricing request from TOML text.
pub fn parse_parameters(text: &str) -> CliResult<PricingParameters> {
    Ok(toml::from_str(text)?)
}

/// Run the run command.
pub fn execute<W: Write>(args: &RunArgs, format: OutputFormat, out: &mut W) -> CliResult<()> {
    let text = std::fs::read_to_string(&args.config).map_err(|source| CliError::ConfigRead {
        path: args.config.display().to_string(),
        source,
    })?;
    let params = parse_parameters(&text)?;
    info!(config = %args.config.display(), "loaded pricing parameters");
    super::price_and_render(&params, format, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixed_income_request() {
        let params = parse_parameters(
            r#"
            instrument = "fixed_income"

            [rate_lattice]
            initial_value = 0.05
            up_factor = 1.1
            down_factor = 0.9
            steps = 2

            [bond]
            face_value = 100.0
            coupon_rate = 0.05
            maturity = 2
            "#,
        )
        .unwrap();
        let mut out = Vec::new();
        super::super::price_and_render(&params, OutputFormat::Minimal, &mut out).unwrap();
        let value: f64 = String::from_utf8(out).unwrap().trim().parse().unwrap();
        assert!((value - 104.537_409_875_399_39).abs() < 1e-6);
    }

    #[test]
    fn unknown_instrument_is_a_parse_error() {
        let err = parse_parameters("instrument = \"swap\"").unwrap_err();
        assert!(matches!(err, CliError::ConfigParse(_)));
    }

    #[test]
    fn missing_file_names_the_path() {
        let args = RunArgs {
            config: PathBuf::from("/nonexistent/binotree.toml"),
        };
        let err = execute(&args, OutputFormat::Table, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/binotree.toml"));
    }
}
