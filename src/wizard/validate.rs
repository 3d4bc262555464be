//! Validation outcomes produced by per-step rules.

use std::fmt;

use crate::wizard::answers::AnswerSet;
use crate::wizard::effects::SideEffect;

/// Pure validation rule evaluated against the full answer set. Plain fn
/// pointers keep rules free of captured state, so the same answers always
/// produce the same outcome.
pub type StepValidatorFn = fn(&AnswerSet) -> ValidationOutcome;

/// Blocking failure surfaced to the user as a modal title/message pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedError {
    pub title: String,
    pub message: String,
    /// Opaque display hint picked by the flow author; the engine never
    /// interprets it.
    pub icon: u8,
}

impl BlockedError {
    pub fn new(title: impl Into<String>, message: impl Into<String>, icon: u8) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            icon,
        }
    }
}

impl fmt::Display for BlockedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Result of validating one step. Exactly one variant per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Input is acceptable; the step may be left immediately.
    Advance,
    /// Input is not acceptable; stay on the step and show the message.
    Blocked(BlockedError),
    /// Input is acceptable once the named effect completes successfully.
    RequiresSideEffect(SideEffect),
}
