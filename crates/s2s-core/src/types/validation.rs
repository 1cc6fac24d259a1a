//! Validation error collection types.
//!
//! A [`ValidationReport`] groups [`ValidationErrors`] by validation-group
//! name (entity caption plus short identifier, e.g. `"Case A1B2C3"`), so a
//! rejected multi-entity batch can be shown to an operator record by record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::id::short_uuid;

/// A single validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Caption of the offending entity or field.
    pub caption: String,
    /// Human-readable message.
    pub message: String,
}

/// Ordered list of validation messages for one validation group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create an empty error list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an error list holding a single message.
    pub fn create(caption: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(caption, message);
        errors
    }

    /// Append a message.
    pub fn add(&mut self, caption: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationError {
            caption: caption.into(),
            message: message.into(),
        });
    }

    /// Append all messages of another list.
    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// Whether at least one message was recorded.
    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Iterate over the recorded messages in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Number of recorded messages.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validation errors of a whole batch, keyed by validation-group name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport {
    groups: BTreeMap<String, ValidationErrors>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record errors under a group. Errors for an existing group are appended.
    pub fn insert(&mut self, group: impl Into<String>, errors: ValidationErrors) {
        if !errors.has_error() {
            return;
        }
        self.groups.entry(group.into()).or_default().extend(errors);
    }

    /// Merge every group of another report into this one.
    pub fn merge(&mut self, other: ValidationReport) {
        for (group, errors) in other.groups {
            self.insert(group, errors);
        }
    }

    /// Look up the errors of one group.
    pub fn get(&self, group: &str) -> Option<&ValidationErrors> {
        self.groups.get(group)
    }

    /// Whether the given group has errors.
    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    /// Iterate over groups in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ValidationErrors)> {
        self.groups.iter()
    }

    /// Number of groups with errors.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no group has errors.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Build the validation-group name for an entity.
pub fn validation_group_name(caption: &str, uuid: &Uuid) -> String {
    format!("{caption} {}", short_uuid(uuid))
}
