//! Terminal rendering for verification results

use chrono::{
    DateTime,
    Utc,
};
use colored::Colorize;
use rx_verify_client::{
    BatchResult,
    PrescriptionStatus,
    VerificationResult,
};

/// Placeholder for fields the service did not populate.
const MISSING: &str = "—";

/// Format an ISO-8601 timestamp for display, falling back to the raw
/// string when it does not parse.
pub fn fmt_date(iso: Option<&str>) -> String {
    let Some(iso) = iso else {
        return MISSING.to_string();
    };
    match DateTime::parse_from_rfc3339(iso) {
        Ok(dt) => dt
            .with_timezone(&Utc)
            .format("%b %d, %Y %H:%M UTC")
            .to_string(),
        Err(_) => iso.to_string(),
    }
}

/// Colored badge for a status token. Unknown values render as an
/// uncolored "unknown" category rather than failing.
pub fn status_badge(status: Option<&PrescriptionStatus>) -> String {
    let Some(status) = status else {
        return MISSING.to_string();
    };
    let label = status.as_str().to_uppercase();
    match status {
        PrescriptionStatus::Active => label.green().bold().to_string(),
        PrescriptionStatus::Expired | PrescriptionStatus::Revoked => {
            label.red().bold().to_string()
        }
        PrescriptionStatus::Used => label.yellow().bold().to_string(),
        PrescriptionStatus::Other(_) => label,
    }
}

fn field(label: &str, value: Option<&str>) {
    println!("  {:<14} {}", format!("{label}:"), value.unwrap_or(MISSING));
}

/// Render one verification result as a formatted block.
pub fn render_single(result: &VerificationResult) {
    if !result.valid {
        println!(
            "{} {}",
            "❌ Invalid prescription —".red().bold(),
            result.error.as_deref().unwrap_or("Unknown error")
        );
        return;
    }

    println!("{}", "✅ Valid prescription".green().bold());
    field("Rx Number", result.prescription_number.as_deref());
    println!("  {:<14} {}", "Status:", status_badge(result.status.as_ref()));
    field("Patient", result.patient_name.as_deref());
    field("Patient ID", result.patient_id.as_deref());
    field("Doctor", result.doctor_name.as_deref());
    field("Organization", result.organization.as_deref());
    field("Issued", Some(&fmt_date(result.created_at.as_deref())));
    field("Valid Until", Some(&fmt_date(result.valid_until.as_deref())));

    if let Some(diagnosis) = &result.diagnosis {
        println!("  {:<14} {diagnosis}", "Diagnosis:");
    }

    if !result.medications.is_empty() {
        println!("\n  {}", "Medications".bold());
        for med in &result.medications {
            let line = med
                .iter()
                .map(|(key, value)| match value.as_str() {
                    Some(s) => format!("{key}: {s}"),
                    None => format!("{key}: {value}"),
                })
                .collect::<Vec<_>>()
                .join(", ");
            println!("    - {line}");
        }
    }
}

/// Render a batch outcome: summary counters, then one block per result.
pub fn render_batch(batch: &BatchResult) {
    println!(
        "{}  {}  {}",
        format!("Total: {}", batch.total()).bold(),
        format!("✅ Valid: {}", batch.valid_count()).green(),
        format!("❌ Invalid: {}", batch.invalid_count()).red(),
    );

    for (i, result) in batch.results().iter().enumerate() {
        let label = result
            .prescription_number
            .clone()
            .unwrap_or_else(|| format!("Result #{}", i + 1));
        let marker = if result.valid { "✅" } else { "❌" };

        println!("\n{}", format!("{marker} {label}").bold());
        println!("{}", "-".repeat(label.len() + 3));
        render_single(result);
    }
}
