//! Batch prescription verification command

use crate::{
    cli::CliArgs,
    cmd::{
        ApiArgs,
        create_spinner,
        finish_spinner_with_error,
    },
    error::CliError,
    render,
};
use clap::{
    Parser,
    ValueHint,
};
use colored::Colorize;
use indicatif::ProgressBar;
use rx_verify_client::{
    BatchKind,
    BatchResult,
    LastResponse,
    MAX_BATCH_SIZE,
    NormalizedBatch,
    normalize_batch_input,
};
use std::io::Read;
use std::path::PathBuf;

const BATCH_AFTER_HELP: &str = "Reads one token or URL per line. Blank lines are skipped; \
duplicates are forwarded as-is.\nThe service accepts at most 50 entries per request; longer \
input is truncated to the first 50 with a warning.";

/// Command-line arguments for verifying a batch of prescriptions.
#[derive(Parser)]
#[clap(
    name = "batch",
    about = "Verify up to 50 prescriptions in one request.",
    after_help = BATCH_AFTER_HELP
)]
pub struct BatchArgs {
    /// Treat input lines as verification URLs instead of tokens
    #[clap(long)]
    pub urls: bool,

    /// File with one entry per line; reads stdin when omitted
    #[clap(long, short = 'f', value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    #[clap(flatten)]
    pub api: ApiArgs,
}

impl BatchArgs {
    fn kind(&self) -> BatchKind {
        if self.urls {
            BatchKind::Urls
        } else {
            BatchKind::Tokens
        }
    }

    /// Read the raw input from the file argument or stdin.
    fn read_input(&self) -> Result<String, CliError> {
        match &self.file {
            Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::ReadInput {
                path: path.display().to_string(),
                source,
            }),
            None => {
                let mut raw = String::new();
                std::io::stdin()
                    .read_to_string(&mut raw)
                    .map_err(|source| CliError::ReadInput {
                        path: "stdin".to_string(),
                        source,
                    })?;
                Ok(raw)
            }
        }
    }

    fn normalize(&self, raw: &str) -> Result<NormalizedBatch, CliError> {
        normalize_batch_input(self.kind(), raw, MAX_BATCH_SIZE).ok_or(CliError::EmptyBatch)
    }

    /// Run the batch verification flow.
    pub async fn run(&self, cli_args: &CliArgs) -> Result<(), CliError> {
        let json_output = cli_args.json_output();
        let raw_input = self.read_input()?;
        let batch = self.normalize(&raw_input)?;

        if batch.is_truncated() && !json_output {
            println!(
                "{}",
                format!(
                    "⚠️  Maximum {MAX_BATCH_SIZE} items per request. Sending the first \
                     {MAX_BATCH_SIZE}; {} dropped.",
                    batch.truncated
                )
                .yellow()
            );
        }

        let client = self.api.client()?;

        let spinner = if json_output {
            ProgressBar::hidden()
        } else {
            create_spinner()
        };
        spinner.set_message(format!(
            "Verifying {} prescription(s)…",
            batch.submitted()
        ));

        let raw = match client.verify(&batch.request).await {
            Ok(raw) => raw,
            Err(err) => {
                finish_spinner_with_error(&spinner, &err);
                return Err(err.into());
            }
        };
        spinner.finish_and_clear();

        let mut last = LastResponse::new();
        last.record(raw.clone());

        if json_output {
            println!(
                "{}",
                serde_json::to_string_pretty(&raw).map_err(rx_verify_client::Error::from)?
            );
            return Ok(());
        }

        let result = BatchResult::from_payload(raw)?;
        render::render_batch(&result);
        Ok(())
    }
}
