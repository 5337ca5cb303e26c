//! Error types for task validation and parsing.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Error returned while parsing task statuses from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Field-level validation failure for task input.
///
/// Validation is all-or-nothing: when this error is returned no field of the
/// input has been applied anywhere.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("task validation failed: {}", FieldList(&self.fields))]
pub struct ValidationError {
    fields: BTreeMap<String, String>,
}

impl ValidationError {
    /// Creates an error from a violated-field to message map.
    #[must_use]
    pub const fn new(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    /// Creates an error for a single violated field.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.into(), message.into());
        Self { fields }
    }

    /// Returns the violated fields and their messages.
    #[must_use]
    pub const fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Returns the message recorded for `field`, if it was violated.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

struct FieldList<'a>(&'a BTreeMap<String, String>);

impl fmt::Display for FieldList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}
