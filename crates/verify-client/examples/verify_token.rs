//! Example demonstrating a single token verification

use rx_verify_client::{
    Config,
    VerificationRequest,
    VerifyClient,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Endpoint and API key come from RX_VERIFY_ENV / RX_VERIFY_API_KEY
    let config = Config::from_env();
    let client = VerifyClient::new(config)?;

    println!("Verifying against: {}", client.endpoint());

    let token = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "a1b2c3d4-e5f6-0000-0000-000000000000".to_string());

    match client.verify_single(&VerificationRequest::token(token)).await {
        Ok(result) if result.valid => {
            println!(
                "Valid prescription {} ({})",
                result.prescription_number.as_deref().unwrap_or("?"),
                result
                    .status
                    .as_ref()
                    .map(|s| s.as_str())
                    .unwrap_or("unknown"),
            );
        }
        Ok(result) => {
            println!(
                "Invalid prescription: {}",
                result.error.as_deref().unwrap_or("no reason given")
            );
        }
        Err(e) => {
            eprintln!("Verification failed: {e}");
        }
    }

    Ok(())
}
