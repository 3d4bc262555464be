//! Verification-service collaborator: the wizard's only network seam.
//!
//! The wire vocabulary below matches the booking backend exactly, including
//! its `vaildNumber` and `roll` spellings; renaming them here would break
//! the deployed API.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use http::HttpVerificationService;

/// Failure classes produced at the service boundary. Raw transport and
/// decoding errors never cross into the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceFailure {
    /// The backend answered with a non-success status and a reason.
    #[error("{message}")]
    Rejected { message: String },
    /// No interpretable response: timeout, DNS failure, reset connection.
    #[error("no response from the verification service")]
    Unreachable,
}

/// Payload for `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "userEmail")]
    pub user_email: String,
    #[serde(rename = "userPassword")]
    pub user_password: String,
    /// Numeric role id.
    pub roll: u32,
}

/// Successful `POST /auth/authEmail` reply.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailChallenge {
    #[serde(default)]
    pub msg: String,
    #[serde(rename = "numParam")]
    pub num_param: i64,
}

/// Successful `POST /auth/register` reply.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterReply {
    pub token: String,
    #[serde(default)]
    pub msg: String,
}

/// External account and verification endpoints the wizard's side effects
/// call. Implementations own transport, timeouts, and retried policy; the
/// wizard only sees the two-class failure taxonomy.
#[async_trait]
pub trait VerificationService: Send + Sync {
    /// `POST /auth/authEmail` — asks the backend to email a challenge code
    /// to the candidate address.
    async fn request_email_challenge(&self, email: &str)
        -> Result<EmailChallenge, ServiceFailure>;

    /// `POST /auth/validEmail/{code}` — checks the entered code against the
    /// issued challenge parameter.
    async fn confirm_email_code(&self, code: &str, challenge: i64) -> Result<(), ServiceFailure>;

    /// `POST /auth/register` — creates the account and returns its session
    /// token.
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterReply, ServiceFailure>;
}
