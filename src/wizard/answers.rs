//! Accumulated answers for a single wizard run.
//!
//! The store owns a fixed key vocabulary declared by the flow's step table;
//! writes outside that vocabulary are rejected, as are over-long free-text
//! values. Everything else is deferred to the per-step validators.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

/// Hard cap applied to every free-text write, independent of step rules.
pub const MAX_TEXT_LEN: usize = 60;

/// Write-path rejections. These are input-shaped faults the UI surfaces
/// immediately at the offending field, before any step validation runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("unknown answer field `{0}`")]
    UnknownField(String),
    #[error("`{field}` cannot be longer than {limit} characters")]
    ValueTooLong { field: String, limit: usize },
}

/// Value attached to one answer field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    Text(String),
    /// A picked option, e.g. the account role: display label plus its id.
    Choice { label: String, id: u32 },
    /// Reserved numeric slots, e.g. the emailed challenge parameter.
    Number(i64),
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Human-readable rendering used by title templating and field views.
    pub fn display(&self) -> String {
        match self {
            AnswerValue::Text(value) => value.clone(),
            AnswerValue::Choice { label, .. } => label.clone(),
            AnswerValue::Number(value) => value.to_string(),
        }
    }
}

/// Read-only view of the collected answers, handed to validators, side
/// effects, and templating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    values: BTreeMap<&'static str, AnswerValue>,
}

impl AnswerSet {
    pub fn get(&self, field: &str) -> Option<&AnswerValue> {
        self.values.get(field)
    }

    /// Text value for `field`, or the empty string when unset or non-text.
    /// Keeps validator bodies free of unwrapping noise.
    pub fn text(&self, field: &str) -> &str {
        self.get(field).and_then(AnswerValue::as_text).unwrap_or("")
    }

    pub fn choice(&self, field: &str) -> Option<(&str, u32)> {
        match self.get(field) {
            Some(AnswerValue::Choice { label, id }) => Some((label.as_str(), *id)),
            _ => None,
        }
    }

    pub fn number(&self, field: &str) -> Option<i64> {
        match self.get(field) {
            Some(AnswerValue::Number(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Mutable answer container owned by one wizard controller per run.
#[derive(Debug)]
pub struct AnswerStore {
    allowed: BTreeSet<&'static str>,
    answers: AnswerSet,
    revision: u64,
}

impl AnswerStore {
    /// Builds a store accepting exactly the given key vocabulary.
    pub fn new<I>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        Self {
            allowed: vocabulary.into_iter().collect(),
            answers: AnswerSet::default(),
            revision: 0,
        }
    }

    /// Overwrites the value for `field`. Step-level validation is deferred;
    /// only the vocabulary and the free-text length cap are enforced here.
    pub fn set(&mut self, field: &str, value: AnswerValue) -> Result<(), AnswerError> {
        let key = self.checked_key(field, &value)?;
        self.answers.values.insert(key, value);
        self.revision += 1;
        Ok(())
    }

    /// Applies several writes as one unit: either every entry passes the
    /// write-path checks and all land, or none do.
    pub fn patch(&mut self, entries: Vec<(&str, AnswerValue)>) -> Result<(), AnswerError> {
        let mut checked = Vec::with_capacity(entries.len());
        for (field, value) in entries {
            let key = self.checked_key(field, &value)?;
            checked.push((key, value));
        }
        for (key, value) in checked {
            self.answers.values.insert(key, value);
        }
        self.revision += 1;
        Ok(())
    }

    pub fn get(&self, field: &str) -> Option<&AnswerValue> {
        self.answers.get(field)
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Read-only copy used when building submission payloads.
    pub fn snapshot(&self) -> AnswerSet {
        self.answers.clone()
    }

    /// Clears every key. Used after successful submission or cancellation.
    pub fn reset(&mut self) {
        self.answers.values.clear();
        self.revision += 1;
    }

    /// Monotonic write counter; templated titles re-render when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn checked_key(&self, field: &str, value: &AnswerValue) -> Result<&'static str, AnswerError> {
        let key = self
            .allowed
            .get(field)
            .copied()
            .ok_or_else(|| AnswerError::UnknownField(field.to_string()))?;
        if let AnswerValue::Text(text) = value {
            if text.chars().count() > MAX_TEXT_LEN {
                return Err(AnswerError::ValueTooLong {
                    field: field.to_string(),
                    limit: MAX_TEXT_LEN,
                });
            }
        }
        Ok(key)
    }
}
