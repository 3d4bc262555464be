//! Read-only render data handed to UI layers.

use crate::wizard::step::InputKind;
use crate::wizard::validate::BlockedError;

/// Snapshot of everything a screen needs to draw the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub index: usize,
    pub total: usize,
    pub title: String,
    pub subtitle: String,
    pub kind: InputKind,
    pub fields: Vec<FieldView>,
    /// True while a side effect is pending; navigation controls must stay
    /// disabled.
    pub controls_disabled: bool,
    pub error: Option<BlockedError>,
}

/// One input slot on the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub key: &'static str,
    pub label: &'static str,
    pub value: Option<String>,
}
