//! Error type for CLI commands

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Errors surfaced by the verification client, shown verbatim
    #[error(transparent)]
    Api(#[from] rx_verify_client::Error),

    /// Single verification with a blank token/URL after trimming
    #[error("No token or URL provided")]
    EmptyInput,

    /// Batch input with no non-blank lines
    #[error("Batch input contains no entries (one token or URL per line)")]
    EmptyBatch,

    /// Batch input file could not be read
    #[error("Failed to read batch input from {path}: {source}")]
    ReadInput {
        path: String,
        source: std::io::Error,
    },
}
