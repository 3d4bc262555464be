//! The step-wizard engine: answer storage, step tables, validation
//! outcomes, side-effect orchestration, and the controller state machine
//! that UI layers drive.

pub mod answers;
pub mod controller;
pub mod effects;
pub mod state;
pub mod step;
pub mod validate;
pub mod view;

pub use answers::{AnswerError, AnswerSet, AnswerStore, AnswerValue, MAX_TEXT_LEN};
pub use controller::{FailureNotice, WizardController, PARAMS_KEY};
pub use effects::{EffectError, EffectOutcome, EffectRunner, SideEffect};
pub use state::{AdvanceOutcome, WizardState};
pub use step::{FieldSpec, InputKind, StepDefinition, StepTable};
pub use validate::{BlockedError, StepValidatorFn, ValidationOutcome};
pub use view::{FieldView, StepView};
