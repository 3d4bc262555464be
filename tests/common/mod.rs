//! Shared doubles for driving the wizard without a network.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use onboard_core::auth::{
    EmailChallenge, RegisterReply, RegisterRequest, ServiceFailure, VerificationService,
};
use onboard_core::signup::{self, keys, Role, SignupEffects};
use onboard_core::storage::{self, TokenStore};
use onboard_core::wizard::{AnswerValue, WizardController};

/// Scripted verification backend. Replies are popped in call order; a call
/// with an empty queue reports the service as unreachable.
#[derive(Default)]
pub struct ScriptedService {
    email_replies: Mutex<VecDeque<Result<EmailChallenge, ServiceFailure>>>,
    confirm_replies: Mutex<VecDeque<Result<(), ServiceFailure>>>,
    register_replies: Mutex<VecDeque<Result<RegisterReply, ServiceFailure>>>,
    pub email_calls: Mutex<Vec<String>>,
    pub confirm_calls: Mutex<Vec<(String, i64)>>,
    pub register_calls: Mutex<Vec<RegisterRequest>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_email(&self, reply: Result<EmailChallenge, ServiceFailure>) {
        self.email_replies.lock().unwrap().push_back(reply);
    }

    pub fn queue_confirm(&self, reply: Result<(), ServiceFailure>) {
        self.confirm_replies.lock().unwrap().push_back(reply);
    }

    pub fn queue_register(&self, reply: Result<RegisterReply, ServiceFailure>) {
        self.register_replies.lock().unwrap().push_back(reply);
    }

    pub fn email_call_count(&self) -> usize {
        self.email_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl VerificationService for ScriptedService {
    async fn request_email_challenge(
        &self,
        email: &str,
    ) -> Result<EmailChallenge, ServiceFailure> {
        self.email_calls.lock().unwrap().push(email.to_string());
        self.email_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ServiceFailure::Unreachable))
    }

    async fn confirm_email_code(&self, code: &str, challenge: i64) -> Result<(), ServiceFailure> {
        self.confirm_calls
            .lock()
            .unwrap()
            .push((code.to_string(), challenge));
        self.confirm_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ServiceFailure::Unreachable))
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterReply, ServiceFailure> {
        self.register_calls.lock().unwrap().push(request.clone());
        self.register_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ServiceFailure::Unreachable))
    }
}

/// In-memory token slot standing in for the app's secure storage.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) -> storage::Result<()> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn load(&self) -> storage::Result<Option<String>> {
        Ok(self.token.lock().unwrap().clone())
    }

    fn clear(&self) -> storage::Result<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

pub fn challenge(param: i64) -> EmailChallenge {
    EmailChallenge {
        msg: "code sent".into(),
        num_param: param,
    }
}

pub fn register_reply(token: &str) -> RegisterReply {
    RegisterReply {
        token: token.into(),
        msg: "welcome".into(),
    }
}

/// A registration wizard wired to the given doubles.
pub fn wizard(
    service: Arc<ScriptedService>,
    tokens: Arc<MemoryTokenStore>,
) -> WizardController<SignupEffects> {
    signup::signup_wizard(service, tokens)
}

pub fn pick_role(wizard: &mut WizardController<SignupEffects>, role: Role) {
    wizard
        .set_answer(
            keys::ROLE,
            AnswerValue::Choice {
                label: role.label().into(),
                id: role.id(),
            },
        )
        .expect("role is a known field");
}

pub fn fill_names(wizard: &mut WizardController<SignupEffects>, first: &str, last: &str) {
    wizard
        .patch_answers(vec![
            (keys::FIRST_NAME, AnswerValue::Text(first.into())),
            (keys::LAST_NAME, AnswerValue::Text(last.into())),
        ])
        .expect("name fields are known");
}

pub fn fill_email(wizard: &mut WizardController<SignupEffects>, email: &str, confirm: &str) {
    wizard
        .patch_answers(vec![
            (keys::EMAIL, AnswerValue::Text(email.into())),
            (keys::CONFIRM_EMAIL, AnswerValue::Text(confirm.into())),
        ])
        .expect("email fields are known");
}

pub fn fill_code(wizard: &mut WizardController<SignupEffects>, code: &str, confirm: &str) {
    wizard
        .patch_answers(vec![
            (keys::VALID_CODE, AnswerValue::Text(code.into())),
            (keys::CONFIRM_CODE, AnswerValue::Text(confirm.into())),
        ])
        .expect("code fields are known");
}

pub fn fill_password(wizard: &mut WizardController<SignupEffects>, password: &str, confirm: &str) {
    wizard
        .patch_answers(vec![
            (keys::PASSWORD, AnswerValue::Text(password.into())),
            (keys::CONFIRM_PASSWORD, AnswerValue::Text(confirm.into())),
        ])
        .expect("password fields are known");
}
