//! Single prescription verification command

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
use indicatif::ProgressBar;
use rx_verify_client::{
    LastResponse,
    VerificationRequest,
    VerificationResult,
};

const VERIFY_AFTER_HELP: &str = "Verify a prescription by its token or by the verification URL \
printed on the prescription.\nThe API key is read from RX_VERIFY_API_KEY unless --api-key is given.";

/// Command-line arguments for verifying a single prescription.
#[derive(Parser)]
#[clap(
    name = "verify",
    about = "Verify a single prescription token or URL.",
    after_help = VERIFY_AFTER_HELP
)]
pub struct VerifyArgs {
    /// Prescription token to verify
    #[clap(
        long,
        short = 't',
        value_name = "TOKEN",
        conflicts_with = "url",
        required_unless_present = "url"
    )]
    pub token: Option<String>,

    /// Prescription verification URL to verify
    #[clap(long, short = 'u', value_name = "URL", value_hint = ValueHint::Url)]
    pub url: Option<String>,

    #[clap(flatten)]
    pub api: ApiArgs,
}

impl VerifyArgs {
    /// Build the request from whichever input was given.
    fn request(&self) -> Result<VerificationRequest, CliError> {
        match (&self.token, &self.url) {
            (Some(token), _) => {
                let token = token.trim();
                if token.is_empty() {
                    return Err(CliError::EmptyInput);
                }
                Ok(VerificationRequest::token(token))
            }
            (None, Some(url)) => {
                let url = url.trim();
                if url.is_empty() {
                    return Err(CliError::EmptyInput);
                }
                Ok(VerificationRequest::url(url))
            }
            (None, None) => Err(CliError::EmptyInput),
        }
    }

    /// Run the single verification flow.
    pub async fn run(&self, cli_args: &CliArgs) -> Result<(), CliError> {
        let json_output = cli_args.json_output();
        let request = self.request()?;
        let client = self.api.client()?;

        let spinner = if json_output {
            ProgressBar::hidden()
        } else {
            create_spinner()
        };
        spinner.set_message("Verifying…");

        let raw = match client.verify(&request).await {
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

        let result: VerificationResult =
            serde_json::from_value(raw).map_err(rx_verify_client::Error::from)?;
        render::render_single(&result);
        Ok(())
    }
}
