//! Declarative step tables: the ordered description of a wizard flow.

use crate::errors::WizardError;
use crate::wizard::answers::AnswerSet;
use crate::wizard::validate::{StepValidatorFn, ValidationOutcome};

/// How the active step's inputs are captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Numeric,
    Choice,
    Secret,
}

/// One answer key collected by a step, with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
}

/// Declarative description of a single wizard step.
///
/// Titles and subtitles are templates: `{field}` placeholders are replaced
/// with the display value of the named answer at render time.
#[derive(Debug, Clone)]
pub struct StepDefinition {
    pub index: usize,
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Zero to two answer keys this step writes. Choice steps collect their
    /// single value through a picker rather than text entry.
    pub fields: &'static [FieldSpec],
    pub kind: InputKind,
    pub validator: StepValidatorFn,
}

impl StepDefinition {
    pub fn render_title(&self, answers: &AnswerSet) -> String {
        render_template(self.title, answers)
    }

    pub fn render_subtitle(&self, answers: &AnswerSet) -> String {
        render_template(self.subtitle, answers)
    }

    /// Runs this step's rule against the full answer set.
    pub fn validate(&self, answers: &AnswerSet) -> ValidationOutcome {
        (self.validator)(answers)
    }
}

/// Ordered, immutable list of wizard steps.
#[derive(Debug, Clone)]
pub struct StepTable {
    steps: Vec<StepDefinition>,
}

impl StepTable {
    /// Builds the table. Indices must be contiguous from zero; anything
    /// else is a flow-authoring bug and fails immediately.
    pub fn new(steps: Vec<StepDefinition>) -> Self {
        assert!(!steps.is_empty(), "a wizard needs at least one step");
        for (position, step) in steps.iter().enumerate() {
            assert_eq!(
                step.index, position,
                "step indices must be contiguous from 0"
            );
        }
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn describe(&self, index: usize) -> Result<&StepDefinition, WizardError> {
        self.steps.get(index).ok_or(WizardError::OutOfRange(index))
    }

    pub fn fields_for(&self, index: usize) -> Result<&'static [FieldSpec], WizardError> {
        self.describe(index).map(|step| step.fields)
    }

    /// Every answer key collected across the table, in step order. Flows
    /// use this to seed the answer store's vocabulary.
    pub fn field_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.steps
            .iter()
            .flat_map(|step| step.fields.iter().map(|field| field.key))
    }
}

fn render_template(template: &str, answers: &AnswerSet) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                if let Some(value) = answers.get(&after[..end]) {
                    out.push_str(&value.display());
                }
                rest = &after[end + 1..];
            }
            None => {
                // Unterminated brace: emit literally.
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
