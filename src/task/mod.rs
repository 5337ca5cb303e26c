//! Task records and their orchestration.
//!
//! Clients create, list, update and delete tasks; every mutation is mirrored
//! by a record in the [`crate::audit`] trail. Tasks carry no state machine:
//! any status may replace any other. The module follows hexagonal
//! architecture:
//!
//! - Domain types and input validation in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
