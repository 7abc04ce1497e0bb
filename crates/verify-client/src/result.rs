//! Response types returned by the verification endpoint

use crate::error::Result;
use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;
use std::fmt;

/// Lifecycle status the service reports for a prescription.
///
/// The vocabulary is open: values outside the known set deserialize into
/// [`PrescriptionStatus::Other`] and are displayed as an "unknown"
/// category, never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrescriptionStatus {
    Active,
    Expired,
    Used,
    Revoked,
    #[serde(untagged)]
    Other(String),
}

impl PrescriptionStatus {
    /// The raw status token as the service sent it.
    pub fn as_str(&self) -> &str {
        match self {
            PrescriptionStatus::Active => "active",
            PrescriptionStatus::Expired => "expired",
            PrescriptionStatus::Used => "used",
            PrescriptionStatus::Revoked => "revoked",
            PrescriptionStatus::Other(raw) => raw,
        }
    }

    /// False for values outside the documented status set.
    pub fn is_known(&self) -> bool {
        !matches!(self, PrescriptionStatus::Other(_))
    }
}

impl fmt::Display for PrescriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One medication record. The schema is owned by the service; the client
/// forwards it opaquely.
pub type Medication = serde_json::Map<String, Value>;

/// The service's judgment on one prescription.
///
/// `valid: false` is normal data, with `error` explaining why; all other
/// fields are only populated for valid prescriptions. Unknown response
/// fields are ignored and missing ones default, so schema growth on the
/// service side does not break decoding.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VerificationResult {
    #[serde(default)]
    pub valid: bool,
    pub error: Option<String>,
    pub prescription_number: Option<String>,
    pub status: Option<PrescriptionStatus>,
    pub patient_name: Option<String>,
    pub patient_id: Option<String>,
    pub doctor_name: Option<String>,
    pub organization: Option<String>,
    pub diagnosis: Option<String>,
    /// ISO-8601 issue timestamp, forwarded as-is.
    pub created_at: Option<String>,
    /// ISO-8601 expiry timestamp, forwarded as-is.
    pub valid_until: Option<String>,
    #[serde(default)]
    pub medications: Vec<Medication>,
}

/// Extract the result list from a batch response payload.
///
/// The service normally answers `{"results": [...]}`, but legacy
/// single-result responses come back as a bare result object. Both shapes
/// are part of the contract: when no `results` array is present the whole
/// payload is decoded as a one-element list.
pub fn unwrap_batch_response(mut payload: Value) -> Result<Vec<VerificationResult>> {
    if let Some(results) = payload
        .get_mut("results")
        .filter(|v| v.is_array())
        .map(Value::take)
    {
        return Ok(serde_json::from_value(results)?);
    }

    Ok(vec![serde_json::from_value(payload)?])
}

/// Aggregated outcome of one batch verification call.
///
/// Constructed once per call and immutable thereafter; held only for the
/// duration of one display cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    results: Vec<VerificationResult>,
}

impl BatchResult {
    pub fn new(results: Vec<VerificationResult>) -> Self {
        Self { results }
    }

    /// Decode a raw batch payload, accepting both response shapes.
    pub fn from_payload(payload: Value) -> Result<Self> {
        Ok(Self::new(unwrap_batch_response(payload)?))
    }

    pub fn results(&self) -> &[VerificationResult] {
        &self.results
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn valid_count(&self) -> usize {
        self.results.iter().filter(|r| r.valid).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.total() - self.valid_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;

    #[rstest]
    #[case("active", PrescriptionStatus::Active)]
    #[case("expired", PrescriptionStatus::Expired)]
    #[case("used", PrescriptionStatus::Used)]
    #[case("revoked", PrescriptionStatus::Revoked)]
    fn known_status_values_round_trip(#[case] raw: &str, #[case] expected: PrescriptionStatus) {
        let status: PrescriptionStatus = serde_json::from_value(json!(raw)).unwrap();
        assert_eq!(status, expected);
        assert!(status.is_known());
        assert_eq!(status.as_str(), raw);
        assert_eq!(serde_json::to_value(&status).unwrap(), json!(raw));
    }

    #[rstest]
    #[case("on_hold")]
    #[case("ACTIVE")]
    #[case("suspended")]
    #[case("")]
    fn unknown_status_values_are_accepted_as_other(#[case] raw: &str) {
        let status: PrescriptionStatus = serde_json::from_value(json!(raw)).unwrap();
        assert_matches!(&status, PrescriptionStatus::Other(inner) if inner == raw);
        assert!(!status.is_known());
        assert_eq!(status.as_str(), raw);
    }

    #[test]
    fn status_display_matches_raw_token() {
        assert_eq!(PrescriptionStatus::Active.to_string(), "active");
        assert_eq!(
            PrescriptionStatus::Other("on_hold".to_string()).to_string(),
            "on_hold"
        );
    }

    #[test]
    fn decodes_a_full_valid_result() {
        let payload = json!({
            "valid": true,
            "prescription_number": "RX1",
            "status": "active",
            "patient_name": "Jane Roe",
            "patient_id": "P-42",
            "doctor_name": "Dr. Smith",
            "organization": "City Clinic",
            "diagnosis": "Hypertension",
            "created_at": "2025-01-01T10:00:00Z",
            "valid_until": "2025-02-01T10:00:00Z",
            "medications": [
                {"name": "Lisinopril", "dosage": "10mg", "frequency": "daily"}
            ]
        });

        let result: VerificationResult = serde_json::from_value(payload).unwrap();
        assert!(result.valid);
        assert_eq!(result.prescription_number.as_deref(), Some("RX1"));
        assert_eq!(result.status, Some(PrescriptionStatus::Active));
        assert_eq!(result.patient_name.as_deref(), Some("Jane Roe"));
        assert_eq!(result.medications.len(), 1);
        assert_eq!(
            result.medications[0].get("name"),
            Some(&json!("Lisinopril"))
        );
    }

    #[test]
    fn decodes_an_invalid_result_with_reason() {
        let payload = json!({"valid": false, "error": "Prescription expired"});
        let result: VerificationResult = serde_json::from_value(payload).unwrap();

        assert!(!result.valid);
        assert_eq!(result.error.as_deref(), Some("Prescription expired"));
        assert_eq!(result.status, None);
        assert!(result.medications.is_empty());
    }

    #[test]
    fn decodes_a_result_with_unknown_status_and_extra_fields() {
        let payload = json!({
            "valid": true,
            "status": "quarantined",
            "some_future_field": {"nested": true}
        });

        let result: VerificationResult = serde_json::from_value(payload).unwrap();
        assert!(result.valid);
        assert_matches!(
            result.status,
            Some(PrescriptionStatus::Other(raw)) if raw == "quarantined"
        );
    }

    #[test]
    fn missing_valid_field_defaults_to_invalid() {
        let result: VerificationResult = serde_json::from_value(json!({})).unwrap();
        assert!(!result.valid);
    }

    #[test]
    fn unwrap_uses_results_array_when_present() {
        let payload = json!({
            "results": [
                {"valid": true, "prescription_number": "RX1"},
                {"valid": false, "error": "revoked"}
            ]
        });

        let results = unwrap_batch_response(payload).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].prescription_number.as_deref(), Some("RX1"));
        assert!(!results[1].valid);
    }

    #[test]
    fn unwrap_falls_back_to_singleton_for_bare_objects() {
        // Legacy single-result shape: the whole payload is one result.
        let payload = json!({"valid": true, "prescription_number": "RX9"});

        let results = unwrap_batch_response(payload).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].prescription_number.as_deref(), Some("RX9"));
    }

    #[test]
    fn unwrap_treats_non_array_results_key_as_singleton() {
        // A `results` key that is not a sequence does not trigger the
        // batch path; the payload decodes as one result.
        let payload = json!({"valid": true, "results": "unexpected"});

        let results = unwrap_batch_response(payload).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].valid);
    }

    #[test]
    fn unwrap_propagates_malformed_entries() {
        let payload = json!({"results": [{"valid": "not-a-bool"}]});
        assert!(unwrap_batch_response(payload).is_err());
    }

    #[test]
    fn batch_result_counts() {
        let batch = BatchResult::new(vec![
            VerificationResult {
                valid: true,
                ..Default::default()
            },
            VerificationResult {
                valid: false,
                error: Some("expired".to_string()),
                ..Default::default()
            },
            VerificationResult {
                valid: true,
                ..Default::default()
            },
        ]);

        assert_eq!(batch.total(), 3);
        assert_eq!(batch.valid_count(), 2);
        assert_eq!(batch.invalid_count(), 1);
        assert_eq!(batch.results().len(), 3);
    }

    #[test]
    fn batch_result_from_payload_accepts_both_shapes() {
        let wrapped = BatchResult::from_payload(json!({"results": [{"valid": true}]})).unwrap();
        assert_eq!(wrapped.total(), 1);

        let bare = BatchResult::from_payload(json!({"valid": false, "error": "used"})).unwrap();
        assert_eq!(bare.total(), 1);
        assert_eq!(bare.invalid_count(), 1);
    }

    #[test]
    fn batch_result_preserves_order() {
        let payload = json!({
            "results": [
                {"valid": true, "prescription_number": "RX1"},
                {"valid": true, "prescription_number": "RX2"},
                {"valid": true, "prescription_number": "RX3"}
            ]
        });

        let batch = BatchResult::from_payload(payload).unwrap();
        let numbers: Vec<_> = batch
            .results()
            .iter()
            .map(|r| r.prescription_number.as_deref().unwrap())
            .collect();
        assert_eq!(numbers, vec!["RX1", "RX2", "RX3"]);
    }
}
