//! binotree CLI - command-line front end for lattice valuations.
//!
//! # Usage
//!
//! ```bash
//! # Coupon instrument on a rate lattice
//! binotree fixed-income --initial-rate 0.05 --up 1.1 --down 0.9 --steps 3 \
//!     --face-value 100 --coupon-rate 0.05 --maturity 3
//!
//! # American put
//! binotree option --spot 100 --strike 100 --up 1.1 --down 0.9 --rate 0.05 \
//!     --steps 2 --option-type put --exercise american
//!
//! # Request from a parameter file, JSON output
//! binotree --format json run --config request.toml
//! ```
//!
//! Set `RUST_LOG` to override the log filter (`warn` by default, `debug`
//! with `--verbose`).

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::FixedIncome(args) => commands::fixed_income::execute(args, cli.format, &mut out)?,
        Commands::Option(args) => commands::option::execute(args, cli.format, &mut out)?,
        Commands::Run(args) => commands::run::execute(args, cli.format, &mut out)?,
    }

    Ok(())
}
