//! Declarative validation of raw task input.
//!
//! Input arrives as an untyped JSON object. Each known field is described by
//! a [`FieldRule`]; unknown fields are dropped. The same schema serves both
//! create and update: in [`ValidationMode::Update`] every field becomes
//! optional while type and enum constraints still apply.

use super::{NewTask, TITLE_MAX_CHARS, TaskPatch, TaskStatus, ValidationError};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Whether input is validated for a create or a partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Required fields must be present.
    Create,
    /// All fields are optional (patch semantics).
    Update,
}

/// Constraint on the shape of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A string value.
    Text {
        /// Maximum length in characters, if bounded.
        max_chars: Option<usize>,
        /// Whether JSON `null` is accepted.
        nullable: bool,
    },
    /// A string drawn from the task status enumeration.
    Status,
}

/// Per-field constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Input key.
    pub name: &'static str,
    /// Whether the field must be present in [`ValidationMode::Create`].
    pub required_on_create: bool,
    /// Value constraint applied whenever the field is present.
    pub kind: FieldKind,
}

/// Schema for task input.
pub const TASK_RULES: [FieldRule; 3] = [
    FieldRule {
        name: "title",
        required_on_create: true,
        kind: FieldKind::Text {
            max_chars: Some(TITLE_MAX_CHARS),
            nullable: false,
        },
    },
    FieldRule {
        name: "description",
        required_on_create: false,
        kind: FieldKind::Text {
            max_chars: None,
            nullable: true,
        },
    },
    FieldRule {
        name: "status",
        required_on_create: true,
        kind: FieldKind::Status,
    },
];

/// Validates raw task input against [`TASK_RULES`].
///
/// Non-object input is treated as an empty object. On success the returned
/// patch carries exactly the known fields that were present.
///
/// # Errors
///
/// Returns [`ValidationError`] listing every violated field when any rule
/// fails.
pub fn validate(input: &Value, mode: ValidationMode) -> Result<TaskPatch, ValidationError> {
    let empty = Map::new();
    let object = input.as_object().unwrap_or(&empty);

    let mut errors = BTreeMap::new();
    let mut accepted = Map::new();
    for rule in &TASK_RULES {
        match check_field(rule, object.get(rule.name), mode) {
            Ok(Some(value)) => {
                accepted.insert(rule.name.to_owned(), value);
            }
            Ok(None) => {}
            Err(message) => {
                errors.insert(rule.name.to_owned(), message);
            }
        }
    }

    if !errors.is_empty() {
        return Err(ValidationError::new(errors));
    }
    Ok(into_patch(accepted))
}

/// Validates input for task creation.
///
/// # Errors
///
/// Returns [`ValidationError`] when a required field is missing or any
/// present field is invalid.
pub fn validate_new_task(input: &Value) -> Result<NewTask, ValidationError> {
    let patch = validate(input, ValidationMode::Create)?;
    let title = patch
        .title
        .ok_or_else(|| ValidationError::single("title", required_message("title")))?;
    let status = patch
        .status
        .ok_or_else(|| ValidationError::single("status", required_message("status")))?;
    Ok(NewTask {
        title,
        description: patch.description.flatten(),
        status,
    })
}

/// Validates input for a partial task update.
///
/// # Errors
///
/// Returns [`ValidationError`] when any present field is invalid.
pub fn validate_task_patch(input: &Value) -> Result<TaskPatch, ValidationError> {
    validate(input, ValidationMode::Update)
}

fn check_field(
    rule: &FieldRule,
    supplied: Option<&Value>,
    mode: ValidationMode,
) -> Result<Option<Value>, String> {
    let Some(value) = supplied else {
        if rule.required_on_create && mode == ValidationMode::Create {
            return Err(required_message(rule.name));
        }
        return Ok(None);
    };

    match rule.kind {
        FieldKind::Text {
            max_chars,
            nullable,
        } => check_text(rule, value, mode, max_chars, nullable),
        FieldKind::Status => check_status(rule, value, mode),
    }
}

fn check_text(
    rule: &FieldRule,
    value: &Value,
    mode: ValidationMode,
    max_chars: Option<usize>,
    nullable: bool,
) -> Result<Option<Value>, String> {
    match value {
        Value::Null if nullable => Ok(Some(Value::Null)),
        Value::Null if rule.required_on_create && mode == ValidationMode::Create => {
            Err(required_message(rule.name))
        }
        Value::String(text) => {
            if !nullable && text.trim().is_empty() {
                return Err(required_message(rule.name));
            }
            if let Some(max) = max_chars
                && text.chars().count() > max
            {
                return Err(format!(
                    "The {} may not be greater than {max} characters.",
                    rule.name
                ));
            }
            Ok(Some(value.clone()))
        }
        _ => Err(format!("The {} must be a string.", rule.name)),
    }
}

fn check_status(
    rule: &FieldRule,
    value: &Value,
    mode: ValidationMode,
) -> Result<Option<Value>, String> {
    if value.is_null() && mode == ValidationMode::Create {
        return Err(required_message(rule.name));
    }
    let parsed = value
        .as_str()
        .and_then(|raw| TaskStatus::try_from(raw).ok());
    match parsed {
        Some(status) => Ok(Some(Value::String(status.as_str().to_owned()))),
        None => Err(format!(
            "The {} must be one of: {}.",
            rule.name,
            TaskStatus::allowed_values()
        )),
    }
}

fn required_message(field: &str) -> String {
    format!("The {field} field is required.")
}

fn into_patch(mut accepted: Map<String, Value>) -> TaskPatch {
    let title = match accepted.remove("title") {
        Some(Value::String(title)) => Some(title),
        _ => None,
    };
    let description = match accepted.remove("description") {
        Some(Value::String(description)) => Some(Some(description)),
        Some(Value::Null) => Some(None),
        _ => None,
    };
    let status = accepted
        .remove("status")
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|raw| TaskStatus::try_from(raw).ok());
    TaskPatch {
        title,
        description,
        status,
    }
}
