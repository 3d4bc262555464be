//! Side-effect execution for the registration flow.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::auth::{ServiceFailure, VerificationService};
use crate::storage::TokenStore;
use crate::wizard::{
    AnswerSet, EffectError, EffectOutcome, EffectRunner, SideEffect, PARAMS_KEY,
};

use super::keys;
use super::payload::register_request;

/// Runs the registration flow's side effects against the verification
/// backend and the token store.
pub struct SignupEffects {
    service: Arc<dyn VerificationService>,
    tokens: Arc<dyn TokenStore>,
}

impl SignupEffects {
    pub fn new(service: Arc<dyn VerificationService>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { service, tokens }
    }
}

impl From<ServiceFailure> for EffectError {
    fn from(failure: ServiceFailure) -> Self {
        match failure {
            ServiceFailure::Rejected { message } => EffectError::Rejected { message },
            ServiceFailure::Unreachable => EffectError::Unreachable,
        }
    }
}

#[async_trait]
impl EffectRunner for SignupEffects {
    async fn run(
        &self,
        effect: SideEffect,
        answers: &AnswerSet,
    ) -> Result<EffectOutcome, EffectError> {
        match effect {
            SideEffect::SendVerificationEmail => {
                let email = answers.text(keys::EMAIL);
                let challenge = self.service.request_email_challenge(email).await?;
                debug!("email challenge issued");
                Ok(EffectOutcome::ChallengeIssued {
                    param: challenge.num_param,
                })
            }
            SideEffect::ConfirmVerificationCode => {
                let code = answers.text(keys::VALID_CODE);
                let challenge = answers.number(PARAMS_KEY).unwrap_or_default();
                self.service.confirm_email_code(code, challenge).await?;
                Ok(EffectOutcome::CodeConfirmed)
            }
            SideEffect::SubmitRegistration => {
                let reply = self.service.register(&register_request(answers)).await?;
                self.tokens.save(&reply.token)?;
                Ok(EffectOutcome::Registered)
            }
        }
    }
}
