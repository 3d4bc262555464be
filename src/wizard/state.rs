//! Explicit wizard lifecycle states.

use crate::wizard::effects::SideEffect;
use crate::wizard::validate::BlockedError;

/// The wizard lifecycle as a tagged machine. Illegal combinations — a run
/// that is simultaneously blocked and awaiting a side effect, say — cannot
/// be expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
    /// Waiting for input on the given step.
    Idle(usize),
    /// The given step's validator is being evaluated.
    Validating(usize),
    /// A side effect for the given step is in flight; navigation stays
    /// disabled until it resolves.
    AwaitingSideEffect { step: usize, effect: SideEffect },
    /// The given step is parked behind a user-facing error.
    Blocked { step: usize, error: BlockedError },
    /// The run finished and the collected answers were submitted.
    Terminal,
}

impl WizardState {
    /// Step index owning the current state, when there is one.
    pub fn step(&self) -> Option<usize> {
        match self {
            WizardState::Idle(step)
            | WizardState::Validating(step)
            | WizardState::AwaitingSideEffect { step, .. }
            | WizardState::Blocked { step, .. } => Some(*step),
            WizardState::Terminal => None,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, WizardState::AwaitingSideEffect { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WizardState::Terminal)
    }
}

/// Event handed back to the UI layer after navigation and effect calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The visible state changed; re-render the current view.
    Moved,
    /// A side effect is now pending; run it to continue.
    EffectRequired(SideEffect),
    /// The step is blocked; show the error.
    Blocked(BlockedError),
    /// The final submission succeeded; navigate away.
    Completed,
    /// The call was a no-op (in flight, terminal, or already at an edge).
    Ignored,
}
