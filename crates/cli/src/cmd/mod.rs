//! CLI command implementations

pub mod batch;
pub mod verify;

use clap::{
    Parser,
    ValueHint,
};
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use rx_verify_client::{
    Config,
    DEFAULT_ENDPOINT,
    Error,
    VerifyClient,
};
use tokio::time::Duration;

/// Connection flags shared by every command that talks to the service.
#[derive(Debug, Parser, Clone)]
pub struct ApiArgs {
    /// URL of the verification endpoint
    #[clap(
        long = "api-url",
        env = "RX_VERIFY_API_URL",
        value_hint = ValueHint::Url,
        default_value = DEFAULT_ENDPOINT
    )]
    pub api_url: String,

    /// API key for the verification service
    #[clap(long = "api-key", env = "RX_VERIFY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[clap(long, value_name = "SECONDS", default_value_t = 30)]
    pub timeout: u64,
}

impl ApiArgs {
    /// Build a client from these flags.
    pub fn client(&self) -> Result<VerifyClient, Error> {
        let mut config =
            Config::new(&self.api_url).with_timeout(Duration::from_secs(self.timeout));
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key.clone());
        }
        VerifyClient::new(config)
    }
}

/// Spinner shown while a request is in flight.
pub fn create_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner} {msg}")
            .expect("Failed to set spinner style"),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Finish the spinner with a message specific to the error kind.
pub fn finish_spinner_with_error(spinner: &ProgressBar, err: &Error) {
    let message = match err {
        Error::MissingCredential => {
            "❌ API key not found. Set RX_VERIFY_API_KEY or pass --api-key.".to_string()
        }
        Error::Unauthorized => "❌ 401 – Missing or invalid API key.".to_string(),
        Error::Forbidden => "❌ 403 – API key disabled or unauthorized role.".to_string(),
        Error::BadRequest(body) => format!("❌ 400 – Bad request: {body}"),
        Error::MethodNotAllowed => "❌ 405 – Method not allowed.".to_string(),
        Error::Service { status, body } => format!("❌ {status} – {body}"),
        Error::Transport(_) => {
            "❌ Network problem or timeout. Check your connection and try again.".to_string()
        }
        other => format!("❌ {other}"),
    };
    spinner.finish_with_message(message);
}
