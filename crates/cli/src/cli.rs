use crate::cmd::{
    batch::BatchArgs,
    verify::VerifyArgs,
};
use clap::Parser;
use rx_verify_client::DEFAULT_ENDPOINT;
use std::sync::OnceLock;

fn version_message() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION
        .get_or_init(|| {
            format!(
                "{}\nDefault API URL: {}",
                env!("CARGO_PKG_VERSION"),
                DEFAULT_ENDPOINT,
            )
        })
        .as_str()
}

/// Flags shared by every subcommand.
#[derive(Debug, Parser, Clone, Default)]
pub struct CliArgs {
    /// Print the raw API response as JSON instead of formatted output
    #[clap(short, long)]
    pub json: bool,
}

impl CliArgs {
    pub fn json_output(&self) -> bool {
        self.json
    }
}

#[derive(Parser)]
#[command(
    name = "rxv",
    version = version_message(),
    long_version = version_message(),
    about = "Verify prescriptions by token or URL against the verification API"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    #[command(flatten)]
    pub args: CliArgs,
}

#[derive(clap::Subcommand)]
pub enum Commands {
    #[command(name = "verify")]
    Verify(VerifyArgs),
    #[command(name = "batch")]
    Batch(BatchArgs),
}
