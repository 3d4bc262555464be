//! Asynchronous side effects that must complete before a step is left.

use async_trait::async_trait;
use thiserror::Error;

use crate::storage::TokenError;
use crate::wizard::answers::AnswerSet;

/// The named transitions that call out to external services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    SendVerificationEmail,
    ConfirmVerificationCode,
    SubmitRegistration,
}

impl SideEffect {
    /// Stable name used in tracing output.
    pub fn name(self) -> &'static str {
        match self {
            SideEffect::SendVerificationEmail => "sendVerificationEmail",
            SideEffect::ConfirmVerificationCode => "confirmVerificationCode",
            SideEffect::SubmitRegistration => "submitRegistration",
        }
    }
}

/// Successful effect results the controller folds into its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectOutcome {
    /// The backend issued an email challenge; the parameter must be kept
    /// for the confirmation call.
    ChallengeIssued { param: i64 },
    /// The entered code matched the issued challenge.
    CodeConfirmed,
    /// The account exists and its session token has been persisted.
    Registered,
}

/// Failure classes a side effect can produce. The controller never sees a
/// raw transport or serialization error.
#[derive(Debug, Error)]
pub enum EffectError {
    /// The backend answered with a structured rejection; the message is
    /// shown to the user verbatim.
    #[error("{message}")]
    Rejected { message: String },
    /// No interpretable response: timeout, DNS failure, reset connection.
    #[error("the verification service did not respond")]
    Unreachable,
    /// The session token could not be persisted after registration.
    #[error(transparent)]
    Storage(#[from] TokenError),
}

/// Executes side effects against external collaborators. At most one effect
/// runs per wizard at any time; the controller enforces that by state.
#[async_trait]
pub trait EffectRunner: Send + Sync {
    async fn run(
        &self,
        effect: SideEffect,
        answers: &AnswerSet,
    ) -> Result<EffectOutcome, EffectError>;
}
