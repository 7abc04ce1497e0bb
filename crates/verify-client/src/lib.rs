//! Client for the prescription verification API
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod result;

pub use cache::LastResponse;
pub use client::{
    API_KEY_HEADER,
    VerifyClient,
};
pub use config::{
    Config,
    DEFAULT_ENDPOINT,
    DEFAULT_TIMEOUT,
    Environment,
};
pub use error::{
    Error,
    Result,
};
pub use request::{
    BatchKind,
    MAX_BATCH_SIZE,
    NormalizedBatch,
    VerificationRequest,
    normalize_batch_input,
};
pub use result::{
    BatchResult,
    Medication,
    PrescriptionStatus,
    VerificationResult,
    unwrap_batch_response,
};
