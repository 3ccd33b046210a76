//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{FixedIncomeArgs, OptionArgs, RunArgs};

/// binotree - binomial lattice valuation of coupon instruments and options
#[derive(Parser, Debug)]
#[command(name = "binotree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Log lattice construction and valuation details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Value a coupon instrument on a short-rate lattice
    FixedIncome(FixedIncomeArgs),

    /// Value a European or American option on a spot lattice
    Option(OptionArgs),

    /// Value the request described in a TOML parameter file
    Run(RunArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Value followed by one row per lattice node
    #[default]
    Table,
    /// JSON document with dense lattice and valuation arrays
    Json,
    /// Just the time-0 value
    Minimal,
}
