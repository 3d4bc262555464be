//! reqwest-backed verification service client.

use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::{EmailChallenge, RegisterReply, RegisterRequest, ServiceFailure, VerificationService};

const BASE_URL_VAR: &str = "ONBOARD_API_URL";

/// HTTP client for the booking backend's auth endpoints.
pub struct HttpVerificationService {
    base_url: String,
    client: Client,
}

/// Error body shape shared by every auth endpoint.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    msg: String,
}

impl HttpVerificationService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: Client::new(),
        }
    }

    /// Reads the backend address from `ONBOARD_API_URL`. `None` when the
    /// variable is absent or empty.
    pub fn from_env() -> Option<Self> {
        match env::var(BASE_URL_VAR) {
            Ok(url) if !url.trim().is_empty() => Some(Self::new(url)),
            _ => None,
        }
    }

    async fn post<B>(&self, path: &str, body: &B) -> Result<reqwest::Response, ServiceFailure>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("auth POST: {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|_| ServiceFailure::Unreachable)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Non-success replies carry `{msg}`; fall back to the status line
        // when the body is something else entirely.
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.msg)
            .unwrap_or_else(|_| format!("request failed with status {}", status.as_u16()));
        Err(ServiceFailure::Rejected { message })
    }
}

#[async_trait]
impl VerificationService for HttpVerificationService {
    async fn request_email_challenge(
        &self,
        email: &str,
    ) -> Result<EmailChallenge, ServiceFailure> {
        let response = self
            .post("/auth/authEmail", &json!({ "userEmail": email }))
            .await?;
        response.json().await.map_err(|_| ServiceFailure::Unreachable)
    }

    async fn confirm_email_code(&self, code: &str, challenge: i64) -> Result<(), ServiceFailure> {
        self.post(
            &format!("/auth/validEmail/{code}"),
            &json!({ "vaildNumber": challenge }),
        )
        .await?;
        Ok(())
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterReply, ServiceFailure> {
        let response = self.post("/auth/register", request).await?;
        response.json().await.map_err(|_| ServiceFailure::Unreachable)
    }
}
