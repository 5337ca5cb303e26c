//! Audit trail for mutating task operations.
//!
//! Every create, update and delete against a task produces one append-only
//! audit record in a store that is independent of the task store. The
//! module follows the same hexagonal split as [`crate::task`]:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The audit logger in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod tests;
