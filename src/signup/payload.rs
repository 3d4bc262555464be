//! Maps collected answers onto the backend's registration payload.

use crate::auth::RegisterRequest;
use crate::wizard::AnswerSet;

use super::keys;

/// Builds the `POST /auth/register` body from a completed answer set.
/// Missing fields map to empty strings and the zero role; the step
/// validators make that unreachable in a driven wizard.
pub fn register_request(answers: &AnswerSet) -> RegisterRequest {
    RegisterRequest {
        name: answers.text(keys::FIRST_NAME).to_string(),
        last_name: answers.text(keys::LAST_NAME).to_string(),
        user_email: answers.text(keys::EMAIL).to_string(),
        user_password: answers.text(keys::PASSWORD).to_string(),
        roll: answers
            .choice(keys::ROLE)
            .map(|(_, id)| id)
            .unwrap_or_default(),
    }
}
