//! Request payloads accepted by the verification endpoint

use serde::Serialize;

/// Maximum number of entries the service accepts in one batch request.
///
/// The service enforces this limit itself; the batch constructors
/// truncate to it so an oversized batch is never sent.
pub const MAX_BATCH_SIZE: usize = 50;

/// One verification request.
///
/// Serializes to a JSON object carrying exactly one of the keys `token`,
/// `url`, `tokens`, `urls`. Batch variants hold between 1 and
/// [`MAX_BATCH_SIZE`] entries; the constructors truncate anything beyond
/// the cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VerificationRequest {
    Token { token: String },
    Url { url: String },
    TokenBatch { tokens: Vec<String> },
    UrlBatch { urls: Vec<String> },
}

impl VerificationRequest {
    /// Request for a single prescription token.
    pub fn token(value: impl Into<String>) -> Self {
        VerificationRequest::Token {
            token: value.into(),
        }
    }

    /// Request for a single verification URL.
    pub fn url(value: impl Into<String>) -> Self {
        VerificationRequest::Url { url: value.into() }
    }

    /// Batch request over tokens, truncated to [`MAX_BATCH_SIZE`].
    pub fn tokens(mut values: Vec<String>) -> Self {
        values.truncate(MAX_BATCH_SIZE);
        VerificationRequest::TokenBatch { tokens: values }
    }

    /// Batch request over URLs, truncated to [`MAX_BATCH_SIZE`].
    pub fn urls(mut values: Vec<String>) -> Self {
        values.truncate(MAX_BATCH_SIZE);
        VerificationRequest::UrlBatch { urls: values }
    }

    /// Number of items this request carries.
    pub fn len(&self) -> usize {
        match self {
            VerificationRequest::Token { .. } | VerificationRequest::Url { .. } => 1,
            VerificationRequest::TokenBatch { tokens } => tokens.len(),
            VerificationRequest::UrlBatch { urls } => urls.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_batch(&self) -> bool {
        matches!(
            self,
            VerificationRequest::TokenBatch { .. } | VerificationRequest::UrlBatch { .. }
        )
    }
}

/// Which batch variant free-form input should normalize into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Tokens,
    Urls,
}

/// Outcome of normalizing free-form batch input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedBatch {
    /// The batch request ready for dispatch.
    pub request: VerificationRequest,
    /// Entries dropped from the tail because the input exceeded the cap.
    /// Non-zero means the caller should warn the user; it is never an
    /// error.
    pub truncated: usize,
}

impl NormalizedBatch {
    /// Number of entries that will actually be sent.
    pub fn submitted(&self) -> usize {
        self.request.len()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated > 0
    }
}

/// Normalize one-entry-per-line input into a batch request.
///
/// Lines are trimmed; blank lines are dropped and do not count toward the
/// cap. Order is preserved and duplicates are forwarded as-is (weeding
/// them out is the service's concern). Input beyond `max` entries is
/// truncated to the first `max`, reported via [`NormalizedBatch::truncated`].
///
/// Returns `None` when no non-blank line remains.
pub fn normalize_batch_input(kind: BatchKind, raw: &str, max: usize) -> Option<NormalizedBatch> {
    let mut items: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        return None;
    }

    let truncated = items.len().saturating_sub(max);
    items.truncate(max);

    let request = match kind {
        BatchKind::Tokens => VerificationRequest::TokenBatch { tokens: items },
        BatchKind::Urls => VerificationRequest::UrlBatch { urls: items },
    };

    Some(NormalizedBatch { request, truncated })
}
