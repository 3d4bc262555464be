//! Top-level wizard state machine.
//!
//! The controller owns one run: the answer store, the current
//! [`WizardState`], and the execution of side effects through an
//! [`EffectRunner`]. Navigation is split in two so UI layers can drive it
//! precisely: [`advance`](WizardController::advance) is synchronous
//! validation and parking, [`run_pending_effect`](WizardController::run_pending_effect)
//! resolves a parked effect, and [`submit`](WizardController::submit)
//! composes both for a plain "Next" press.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::WizardError;
use crate::wizard::answers::{AnswerError, AnswerSet, AnswerStore, AnswerValue};
use crate::wizard::effects::{EffectError, EffectOutcome, EffectRunner};
use crate::wizard::state::{AdvanceOutcome, WizardState};
use crate::wizard::step::StepTable;
use crate::wizard::validate::{BlockedError, ValidationOutcome};
use crate::wizard::view::{FieldView, StepView};

/// Reserved answer key holding the emailed challenge parameter between the
/// send and confirm effects.
pub const PARAMS_KEY: &str = "params";

/// Presentation hook turning side-effect failures into user-facing errors.
/// Flows shape the generic connectivity message here (it can depend on
/// earlier answers, e.g. the selected role).
pub type FailureNotice = fn(&AnswerSet, &EffectError) -> BlockedError;

/// State machine for one wizard run.
pub struct WizardController<R: EffectRunner> {
    run_id: Uuid,
    table: StepTable,
    answers: AnswerStore,
    runner: R,
    notice: FailureNotice,
    state: WizardState,
    /// Bumped on cancellation; an effect result carrying a stale generation
    /// is discarded instead of applied.
    generation: u64,
}

impl<R: EffectRunner> WizardController<R> {
    /// Starts a fresh run at step zero with an empty answer store whose
    /// vocabulary is the table's field keys plus the reserved slots.
    pub fn new(table: StepTable, runner: R, notice: FailureNotice) -> Self {
        let mut vocabulary: Vec<&'static str> = table.field_keys().collect();
        vocabulary.push(PARAMS_KEY);
        let run_id = Uuid::new_v4();
        info!(%run_id, steps = table.len(), "wizard run started");
        Self {
            run_id,
            answers: AnswerStore::new(vocabulary),
            table,
            runner,
            notice,
            state: WizardState::Idle(0),
            generation: 0,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn answers(&self) -> &AnswerSet {
        self.answers.answers()
    }

    /// Writes one answer through the store's guarded path.
    pub fn set_answer(&mut self, field: &str, value: AnswerValue) -> Result<(), AnswerError> {
        self.answers.set(field, value)
    }

    /// Writes several answers as one unit.
    pub fn patch_answers(&mut self, entries: Vec<(&str, AnswerValue)>) -> Result<(), AnswerError> {
        self.answers.patch(entries)
    }

    /// Validates the current step and either moves, blocks, or parks a
    /// side effect. A call while an effect is in flight, while blocked, or
    /// after completion changes nothing.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, WizardError> {
        let index = match self.state {
            WizardState::Idle(index) => index,
            WizardState::AwaitingSideEffect { .. } => {
                debug!(run_id = %self.run_id, "advance ignored while a side effect is in flight");
                return Ok(AdvanceOutcome::Ignored);
            }
            _ => return Ok(AdvanceOutcome::Ignored),
        };

        self.state = WizardState::Validating(index);
        let outcome = self.table.describe(index)?.validate(self.answers.answers());
        match outcome {
            ValidationOutcome::Advance => Ok(self.move_forward(index)),
            ValidationOutcome::Blocked(error) => {
                warn!(run_id = %self.run_id, step = index, %error, "step blocked");
                self.state = WizardState::Blocked {
                    step: index,
                    error: error.clone(),
                };
                Ok(AdvanceOutcome::Blocked(error))
            }
            ValidationOutcome::RequiresSideEffect(effect) => {
                debug!(
                    run_id = %self.run_id,
                    step = index,
                    effect = effect.name(),
                    "side effect required before leaving step"
                );
                self.state = WizardState::AwaitingSideEffect {
                    step: index,
                    effect,
                };
                Ok(AdvanceOutcome::EffectRequired(effect))
            }
        }
    }

    /// Executes the parked side effect, if any, and folds its result into
    /// the machine. A result that arrives after [`cancel`](Self::cancel)
    /// is discarded untouched.
    pub async fn run_pending_effect(&mut self) -> Result<AdvanceOutcome, WizardError> {
        let WizardState::AwaitingSideEffect { step, effect } = self.state else {
            return Ok(AdvanceOutcome::Ignored);
        };
        let generation = self.generation;
        let snapshot = self.answers.snapshot();
        debug!(run_id = %self.run_id, step, effect = effect.name(), "running side effect");

        let result = self.runner.run(effect, &snapshot).await;

        if self.generation != generation {
            debug!(
                run_id = %self.run_id,
                effect = effect.name(),
                "discarding side-effect result from an abandoned run"
            );
            return Ok(AdvanceOutcome::Ignored);
        }

        match result {
            Ok(EffectOutcome::ChallengeIssued { param }) => {
                self.answers.set(PARAMS_KEY, AnswerValue::Number(param))?;
                Ok(self.move_forward(step))
            }
            Ok(EffectOutcome::CodeConfirmed) => Ok(self.move_forward(step)),
            Ok(EffectOutcome::Registered) => {
                info!(run_id = %self.run_id, "registration complete");
                Ok(self.finish_run())
            }
            Err(EffectError::Storage(source)) => {
                // The account exists but the token never landed; this is an
                // environment fault, not a user-correctable input problem.
                self.state = WizardState::Idle(step);
                Err(WizardError::Token(source))
            }
            Err(failure) => {
                warn!(
                    run_id = %self.run_id,
                    step,
                    effect = effect.name(),
                    %failure,
                    "side effect failed"
                );
                let error = (self.notice)(self.answers.answers(), &failure);
                self.state = WizardState::Blocked {
                    step,
                    error: error.clone(),
                };
                Ok(AdvanceOutcome::Blocked(error))
            }
        }
    }

    /// One full "Next" press: validation plus, when requested, the step's
    /// side effect.
    pub async fn submit(&mut self) -> Result<AdvanceOutcome, WizardError> {
        match self.advance()? {
            AdvanceOutcome::EffectRequired(_) => self.run_pending_effect().await,
            outcome => Ok(outcome),
        }
    }

    /// Moves one step back. Never re-validates and never re-triggers a
    /// side effect; a no-op at the first step, while in flight, while
    /// blocked, and after completion.
    pub fn back(&mut self) -> AdvanceOutcome {
        match self.state {
            WizardState::Idle(index) if index > 0 => {
                self.state = WizardState::Idle(index - 1);
                debug!(run_id = %self.run_id, step = index - 1, "moved back");
                AdvanceOutcome::Moved
            }
            _ => AdvanceOutcome::Ignored,
        }
    }

    /// Acknowledges a blocking error: same step, same answers, ready for
    /// another attempt.
    pub fn dismiss_error(&mut self) -> AdvanceOutcome {
        if let WizardState::Blocked { step, .. } = self.state {
            self.state = WizardState::Idle(step);
            AdvanceOutcome::Moved
        } else {
            AdvanceOutcome::Ignored
        }
    }

    /// Abandons the run: answers are discarded and the machine returns to
    /// the first step. An effect still in flight will have its result
    /// ignored when it resolves.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.answers.reset();
        self.state = WizardState::Idle(0);
        info!(run_id = %self.run_id, "wizard run cancelled");
    }

    /// Render data for the current step, templated against live answers.
    /// `None` once the run is terminal.
    pub fn view(&self) -> Option<StepView> {
        let index = self.state.step()?;
        let step = self.table.describe(index).ok()?;
        let answers = self.answers.answers();
        Some(StepView {
            index,
            total: self.table.len(),
            title: step.render_title(answers),
            subtitle: step.render_subtitle(answers),
            kind: step.kind,
            fields: step
                .fields
                .iter()
                .map(|field| FieldView {
                    key: field.key,
                    label: field.label,
                    value: answers.get(field.key).map(AnswerValue::display),
                })
                .collect(),
            controls_disabled: self.state.is_in_flight(),
            error: match &self.state {
                WizardState::Blocked { error, .. } => Some(error.clone()),
                _ => None,
            },
        })
    }

    fn move_forward(&mut self, index: usize) -> AdvanceOutcome {
        let next = index + 1;
        if next == self.table.len() {
            self.finish_run()
        } else {
            self.state = WizardState::Idle(next);
            debug!(run_id = %self.run_id, step = next, "advanced");
            AdvanceOutcome::Moved
        }
    }

    fn finish_run(&mut self) -> AdvanceOutcome {
        self.answers.reset();
        self.state = WizardState::Terminal;
        info!(run_id = %self.run_id, "wizard run completed");
        AdvanceOutcome::Completed
    }
}
