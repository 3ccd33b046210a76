//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The pricing core rejected the inputs.
    #[error("{}: {}", .0.kind(), .0)]
    Pricing(#[from] bt_core::Error),

    /// The parameter file could not be read.
    #[error("cannot read {path}: {source}")]
    ConfigRead {
        /// Path given on the command line.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The parameter file is not valid TOML for a pricing request.
    #[error("invalid parameter file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Writing the report failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing_errors_lead_with_their_kind() {
        let err = CliError::from(bt_core::Error::NegativeSteps {
            parameter: "steps",
            value: -1,
        });
        assert_eq!(
            err.to_string(),
            "NegativeSteps: steps must be non-negative, got -1"
        );
    }
}
