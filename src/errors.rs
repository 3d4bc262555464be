use thiserror::Error;

use crate::storage::TokenError;
use crate::wizard::answers::AnswerError;

/// Error type that captures wizard programming and environment faults.
///
/// User-correctable input problems never appear here; they travel as
/// [`ValidationOutcome::Blocked`](crate::wizard::ValidationOutcome) values so
/// the controller can keep the run alive.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("step index {0} is out of range")]
    OutOfRange(usize),
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error("token storage error: {0}")]
    Token(#[from] TokenError),
}
