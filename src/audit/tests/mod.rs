//! Unit tests for the audit context.

pub(crate) mod support;
